//! 付款報告金額彙總
//!
//! 順序固定：先算利潤，稅基為「淨額 + 利潤」，不是淨額本身。

use mant_core::{round_int, EngineConfig, MantError, ReportTotals, Requirement, Result};
use rust_decimal::Decimal;

/// 可提供應付淨額的項目
pub trait NetPayableSource {
    /// 應付淨額；缺少時以 0 計
    fn net_payable_amount(&self) -> Option<Decimal>;
}

impl NetPayableSource for Requirement {
    fn net_payable_amount(&self) -> Option<Decimal> {
        Some(self.derived.net_payable)
    }
}

impl NetPayableSource for Decimal {
    fn net_payable_amount(&self) -> Option<Decimal> {
        Some(*self)
    }
}

impl NetPayableSource for Option<Decimal> {
    fn net_payable_amount(&self) -> Option<Decimal> {
        *self
    }
}

impl<T: NetPayableSource + ?Sized> NetPayableSource for &T {
    fn net_payable_amount(&self) -> Option<Decimal> {
        (**self).net_payable_amount()
    }
}

/// 彙總付款報告金額（預設費率）
pub fn compute_report_totals<T: NetPayableSource>(items: &[T]) -> Result<ReportTotals> {
    compute_report_totals_with(&EngineConfig::default(), items)
}

/// 彙總付款報告金額
///
/// 1. 淨額 = Σ 應付淨額（不過濾，由呼叫端決定成員）
/// 2. 利潤 = round(淨額 × 利潤率)
/// 3. 稅額 = round((淨額 + 利潤) × 稅率)
/// 4. 總計 = 淨額 + 利潤 + 稅額
///
/// 任一步驟超出 `Decimal` 範圍時回傳驗證錯誤。
pub fn compute_report_totals_with<T: NetPayableSource>(
    config: &EngineConfig,
    items: &[T],
) -> Result<ReportTotals> {
    let net = items.iter().try_fold(Decimal::ZERO, |sum, item| {
        sum.checked_add(item.net_payable_amount().unwrap_or(Decimal::ZERO))
            .ok_or_else(|| overflow("net"))
    })?;

    let profit = round_int(
        net.checked_mul(config.profit_rate)
            .ok_or_else(|| overflow("profit"))?,
    );
    let tax_base = net.checked_add(profit).ok_or_else(|| overflow("tax"))?;
    let tax = round_int(
        tax_base
            .checked_mul(config.vat_rate)
            .ok_or_else(|| overflow("tax"))?,
    );
    let final_total = tax_base
        .checked_add(tax)
        .ok_or_else(|| overflow("final_total"))?;

    Ok(ReportTotals {
        net,
        profit,
        tax,
        final_total,
    })
}

fn overflow(field: &str) -> MantError {
    MantError::validation(field, "付款報告金額超出範圍")
}
