//! 延遲與罰款計算
//!
//! 罰款取兩種算法的較大者：
//! - 固定：延遲天數 × 每日固定罰款
//! - 比例：延遲天數 × (總價 / 總工期)，總工期為 0 時不適用
//!
//! 罰款不以總價為上限，應付淨額可能為負。

use chrono::NaiveDate;
use mant_core::calendar::days_between;
use mant_core::validation::{parse_iso_date, require_non_negative_days, require_non_negative_number};
use mant_core::{round_int, EngineConfig, MantError, Result};
use rust_decimal::Decimal;

/// 延遲天數 = 驗收日期 - 期限（任一缺少時為 0）
pub fn compute_delay_days(reception_date: Option<NaiveDate>, deadline: Option<NaiveDate>) -> i64 {
    match (reception_date, deadline) {
        (Some(reception), Some(deadline)) => days_between(deadline, reception),
        _ => 0,
    }
}

/// 以 `YYYY-MM-DD` 字串輸入的 [`compute_delay_days`]
pub fn compute_delay_days_iso(reception_date: Option<&str>, deadline: Option<&str>) -> Result<i64> {
    match (non_empty(reception_date), non_empty(deadline)) {
        (Some(reception), Some(deadline)) => {
            let reception = parse_iso_date(reception, "reception_date")?;
            let deadline = parse_iso_date(deadline, "deadline")?;
            Ok(days_between(deadline, reception))
        }
        _ => Ok(0),
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// 延遲罰款（預設參數）
pub fn compute_penalty(total_price: Decimal, delay_days: i64, total_term: u32) -> Result<Decimal> {
    compute_penalty_with(&EngineConfig::default(), total_price, delay_days, total_term)
}

/// 延遲罰款，四捨五入到整數
pub fn compute_penalty_with(
    config: &EngineConfig,
    total_price: Decimal,
    delay_days: i64,
    total_term: u32,
) -> Result<Decimal> {
    if delay_days <= 0 {
        return Ok(Decimal::ZERO);
    }

    let total_price = require_non_negative_number(total_price, "total_price")?;
    let days = Decimal::from(require_non_negative_days(delay_days, "delay_days")?);

    let fixed = days
        .checked_mul(config.fixed_daily_penalty)
        .ok_or_else(|| overflow(delay_days))?;

    let proportional = if total_term > 0 {
        let daily_rate = total_price / Decimal::from(total_term);
        days.checked_mul(daily_rate).ok_or_else(|| overflow(delay_days))?
    } else {
        Decimal::ZERO
    };

    Ok(round_int(fixed.max(proportional)))
}

fn overflow(delay_days: i64) -> MantError {
    MantError::validation("penalty", format!("延遲 {} 天的罰款超出範圍", delay_days))
}

/// 應付淨額 = 總價 - 罰款（不設下限）
pub fn compute_net_payable(total_price: Decimal, penalty: Decimal) -> Result<Decimal> {
    let total_price = require_non_negative_number(total_price, "total_price")?;
    let penalty = require_non_negative_number(penalty, "penalty")?;
    Ok(total_price - penalty)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[rstest]
    #[case(ymd(2025, 3, 25), ymd(2025, 3, 21), 4)] // 延遲
    #[case(ymd(2025, 3, 21), ymd(2025, 3, 21), 0)] // 準時
    #[case(ymd(2025, 3, 18), ymd(2025, 3, 21), -3)] // 提前
    #[case(ymd(2024, 3, 1), ymd(2024, 2, 28), 2)] // 閏年
    fn test_delay_days(#[case] reception: NaiveDate, #[case] deadline: NaiveDate, #[case] expected: i64) {
        assert_eq!(compute_delay_days(Some(reception), Some(deadline)), expected);
    }

    #[test]
    fn test_delay_days_absent_inputs() {
        assert_eq!(compute_delay_days(None, Some(ymd(2025, 1, 1))), 0);
        assert_eq!(compute_delay_days(Some(ymd(2025, 1, 1)), None), 0);
        assert_eq!(compute_delay_days_iso(None, Some("2025-01-01")).unwrap(), 0);
        assert_eq!(compute_delay_days_iso(Some(""), Some("2025-01-01")).unwrap(), 0);
    }

    #[test]
    fn test_delay_days_iso() {
        assert_eq!(compute_delay_days_iso(Some("2025-11-02"), Some("2025-10-30")).unwrap(), 3);
        // 夏令時間切換日（智利 2025-04-06）不影響天數
        assert_eq!(compute_delay_days_iso(Some("2025-04-07"), Some("2025-04-05")).unwrap(), 2);
        assert!(compute_delay_days_iso(Some("2025/11/02"), Some("2025-10-30"))
            .unwrap_err()
            .is_validation());
    }

    #[rstest]
    #[case(dec!(10000), 0, 30, dec!(0))]
    #[case(dec!(10000), -3, 30, dec!(0))]
    #[case(dec!(100000), 5, 10, dec!(50000))] // 比例較大
    #[case(dec!(10000), 5, 10, dec!(37500))] // 固定較大
    #[case(dec!(500000), 2, 0, dec!(15000))] // 無工期只用固定
    #[case(dec!(1000000), 1, 3, dec!(333333))]
    #[case(dec!(2000000), 1, 3, dec!(666667))]
    fn test_penalty(
        #[case] total_price: Decimal,
        #[case] delay_days: i64,
        #[case] total_term: u32,
        #[case] expected: Decimal,
    ) {
        assert_eq!(compute_penalty(total_price, delay_days, total_term).unwrap(), expected);
    }

    #[test]
    fn test_penalty_never_below_fixed_rate() {
        for days in 1..=30 {
            let penalty = compute_penalty(dec!(12345.67), days, 20).unwrap();
            assert!(penalty >= Decimal::from(days) * dec!(7500));
        }
    }

    #[test]
    fn test_penalty_skips_validation_when_not_late() {
        // 無延遲時直接回傳 0，不檢查金額
        assert_eq!(compute_penalty(dec!(-1), 0, 10).unwrap(), dec!(0));
        assert!(compute_penalty(dec!(-1), 1, 10).unwrap_err().is_validation());
    }

    #[test]
    fn test_penalty_custom_daily_rate() {
        let config = EngineConfig::default().with_fixed_daily_penalty(dec!(1000));
        assert_eq!(
            compute_penalty_with(&config, dec!(10000), 5, 100).unwrap(),
            dec!(5000)
        );
    }

    #[test]
    fn test_net_payable_not_clamped() {
        assert_eq!(compute_net_payable(dec!(100), dec!(150)).unwrap(), dec!(-50));
        assert_eq!(compute_net_payable(dec!(45000), dec!(0)).unwrap(), dec!(45000));
        assert!(compute_net_payable(dec!(100), dec!(-1)).unwrap_err().is_validation());
    }

    #[rstest]
    #[case(Some("2025-11-02"), Some("2025-10-30"))]
    #[case(Some("2025-10-28"), Some("2025-10-30"))]
    #[case(None, Some("2025-10-30"))]
    fn test_delay_days_iso_repeated_calls_are_equal(
        #[case] reception: Option<&str>,
        #[case] deadline: Option<&str>,
    ) {
        let first = compute_delay_days_iso(reception, deadline).unwrap();
        let second = compute_delay_days_iso(reception, deadline).unwrap();
        assert_eq!(first, second);
    }
}
