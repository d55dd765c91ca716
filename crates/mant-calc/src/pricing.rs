//! 價格計算

use mant_core::validation::require_non_negative_number;
use mant_core::{round, EngineConfig, MantError, Result};
use rust_decimal::Decimal;

/// 總價 = round2(數量 × 單價)
pub fn compute_total_price(quantity: Decimal, unit_price: Decimal) -> Result<Decimal> {
    compute_total_price_with(&EngineConfig::default(), quantity, unit_price)
}

/// 使用指定配置的小數位數計算總價
pub fn compute_total_price_with(
    config: &EngineConfig,
    quantity: Decimal,
    unit_price: Decimal,
) -> Result<Decimal> {
    let quantity = require_non_negative_number(quantity, "quantity")?;
    let unit_price = require_non_negative_number(unit_price, "unit_price")?;

    let total = quantity.checked_mul(unit_price).ok_or_else(|| {
        MantError::validation("total_price", format!("{} × {} 超出範圍", quantity, unit_price))
    })?;

    Ok(round(total, config.amount_decimals))
}
