//! 工期與期限計算

use chrono::NaiveDate;
use mant_core::calendar::{add_calendar_days, to_iso};
use mant_core::validation::parse_iso_date;
use mant_core::{EngineConfig, MantError, Result};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// 總工期 = 基本工期 + 追加工期
pub fn compute_total_term(base_term: u32, extra_term: u32) -> Result<u32> {
    base_term.checked_add(extra_term).ok_or_else(|| {
        MantError::validation("total_term", format!("{} + {} 天超出範圍", base_term, extra_term))
    })
}

/// 追加工期上限 = floor(基本工期 × 0.5)
///
/// 僅供呼叫端與介面參考，計算器本身不強制。
pub fn compute_max_extra_term(base_term: u32) -> u32 {
    compute_max_extra_term_with(&EngineConfig::default(), base_term)
}

/// 使用指定比例計算追加工期上限
pub fn compute_max_extra_term_with(config: &EngineConfig, base_term: u32) -> u32 {
    (Decimal::from(base_term) * config.max_extra_term_ratio)
        .floor()
        .max(Decimal::ZERO)
        .to_u32()
        .unwrap_or(u32::MAX)
}

/// 期限 = 開工日期 + 總工期（日曆天）
///
/// 沒有開工日期或總工期為 0 時回傳 `None`。
pub fn compute_deadline(start_date: Option<NaiveDate>, total_term: u32) -> Result<Option<NaiveDate>> {
    match start_date {
        Some(start) if total_term > 0 => add_calendar_days(start, total_term).map(Some),
        _ => Ok(None),
    }
}

/// 以 `YYYY-MM-DD` 字串輸入輸出的 [`compute_deadline`]
pub fn compute_deadline_iso(start_date: Option<&str>, total_term: u32) -> Result<Option<String>> {
    let start = match start_date {
        Some(s) if !s.is_empty() && total_term > 0 => parse_iso_date(s, "start_date")?,
        _ => return Ok(None),
    };
    let deadline = add_calendar_days(start, total_term)?;
    Ok(Some(to_iso(deadline)))
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
    #[case(0, 0, 0)]
    #[case(20, 0, 20)]
    #[case(20, 10, 30)]
    fn test_total_term(#[case] base: u32, #[case] extra: u32, #[case] expected: u32) {
        assert_eq!(compute_total_term(base, extra).unwrap(), expected);
    }

    #[test]
    fn test_total_term_overflow() {
        assert!(compute_total_term(u32::MAX, 1).unwrap_err().is_validation());
    }

    #[rstest]
    #[case(0, 0)]
    #[case(1, 0)]
    #[case(7, 3)]
    #[case(10, 5)]
    #[case(45, 22)]
    fn test_max_extra_term(#[case] base: u32, #[case] expected: u32) {
        assert_eq!(compute_max_extra_term(base), expected);
    }

    #[test]
    fn test_max_extra_term_custom_ratio() {
        let config = EngineConfig::default().with_max_extra_term_ratio(dec!(0.25));
        assert_eq!(compute_max_extra_term_with(&config, 30), 7);
    }

    #[test]
    fn test_deadline_leap_year() {
        assert_eq!(
            compute_deadline(Some(ymd(2024, 2, 20)), 10).unwrap(),
            Some(ymd(2024, 3, 1))
        );
        assert_eq!(
            compute_deadline_iso(Some("2024-02-20"), 10).unwrap().as_deref(),
            Some("2024-03-01")
        );
    }

    #[test]
    fn test_deadline_year_rollover() {
        assert_eq!(
            compute_deadline_iso(Some("2025-12-20"), 30).unwrap().as_deref(),
            Some("2026-01-19")
        );
    }

    #[rstest]
    #[case(None, 10)]
    #[case(Some(""), 10)]
    #[case(Some("2025-01-01"), 0)]
    fn test_deadline_absent(#[case] start: Option<&str>, #[case] term: u32) {
        assert_eq!(compute_deadline_iso(start, term).unwrap(), None);
    }

    #[test]
    fn test_deadline_absent_typed() {
        assert_eq!(compute_deadline(None, 10).unwrap(), None);
        assert_eq!(compute_deadline(Some(ymd(2025, 1, 1)), 0).unwrap(), None);
    }

    #[rstest]
    #[case("01/02/2025")]
    #[case("2025-13-01")]
    fn test_deadline_rejects_bad_start(#[case] start: &str) {
        assert!(compute_deadline_iso(Some(start), 5).unwrap_err().is_validation());
    }

    #[rstest]
    #[case(Some("2024-02-20"), 10)]
    #[case(Some("2025-12-20"), 30)]
    #[case(None, 10)]
    #[case(Some("2024-02-20"), 0)]
    fn test_deadline_iso_repeated_calls_are_equal(#[case] start: Option<&str>, #[case] term: u32) {
        let first = compute_deadline_iso(start, term).unwrap();
        let second = compute_deadline_iso(start, term).unwrap();
        assert_eq!(first, second);
    }
}
