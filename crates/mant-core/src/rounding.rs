//! 金額捨入

use rust_decimal::{Decimal, RoundingStrategy};

/// 金額預設小數位數
pub const AMOUNT_DECIMALS: u32 = 2;

/// 捨入到指定小數位數
///
/// 中間值一律往正無限大方向進位：`12.5 → 13`，`-12.5 → -12`。
pub fn round(value: Decimal, decimals: u32) -> Decimal {
    let strategy = if value.is_sign_negative() {
        RoundingStrategy::MidpointTowardZero
    } else {
        RoundingStrategy::MidpointAwayFromZero
    };
    value.round_dp_with_strategy(decimals, strategy)
}

/// 捨入到整數（罰款、利潤、稅額皆以整數貨幣單位計）
pub fn round_int(value: Decimal) -> Decimal {
    round(value, 0)
}
