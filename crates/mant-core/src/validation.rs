//! 輸入驗證
//!
//! 所有計算器在進行任何運算前都先通過這裡的檢查，失敗時回傳
//! [`MantError::Validation`]，不做部分計算。

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::{MantError, Result};

/// 檢查數值非負
pub fn require_non_negative_number(value: Decimal, field: &str) -> Result<Decimal> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(MantError::validation(
            field,
            format!("必須是 >= 0 的數值，收到: {}", value),
        ));
    }
    Ok(value)
}

/// 檢查天數非負
pub fn require_non_negative_days(value: i64, field: &str) -> Result<i64> {
    if value < 0 {
        return Err(MantError::validation(
            field,
            format!("必須是 >= 0 的天數，收到: {}", value),
        ));
    }
    Ok(value)
}

/// 從文字解析金額或數量（邊界層使用）
pub fn parse_amount(text: &str, field: &str) -> Result<Decimal> {
    let trimmed = text.trim();
    let value = Decimal::from_str(trimmed)
        .map_err(|_| MantError::validation(field, format!("不是有效的數值: {:?}", text)))?;
    require_non_negative_number(value, field)
}

/// 從文字解析天數（邊界層使用）
pub fn parse_term_days(text: &str, field: &str) -> Result<u32> {
    let trimmed = text.trim();
    let value = i64::from_str(trimmed)
        .map_err(|_| MantError::validation(field, format!("不是有效的天數: {:?}", text)))?;
    let value = require_non_negative_days(value, field)?;
    u32::try_from(value)
        .map_err(|_| MantError::validation(field, format!("天數過大: {}", value)))
}

/// 檢查日期字串為 `YYYY-MM-DD` 格式，原樣回傳
///
/// 只檢查形狀，不檢查是否為真實存在的日期；需要日期值時改用 [`parse_iso_date`]。
pub fn require_iso_date<'a>(value: Option<&'a str>, field: &str) -> Result<&'a str> {
    let value = match value {
        Some(v) if !v.is_empty() => v,
        _ => return Err(MantError::validation(field, "為必填")),
    };

    if !has_iso_shape(value) {
        return Err(MantError::validation(
            field,
            format!("必須是 YYYY-MM-DD 格式，收到: {}", value),
        ));
    }

    Ok(value)
}

/// 解析 `YYYY-MM-DD` 日期
pub fn parse_iso_date(value: &str, field: &str) -> Result<NaiveDate> {
    let value = require_iso_date(Some(value), field)?;
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| MantError::validation(field, format!("不是有效的日曆日期: {}", value)))
}

/// 是否符合 `\d{4}-\d{2}-\d{2}`
pub(crate) fn has_iso_shape(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[test]
    fn test_non_negative_number() {
        assert_eq!(require_non_negative_number(dec!(0), "cantidad").unwrap(), dec!(0));
        assert_eq!(require_non_negative_number(dec!(12.5), "cantidad").unwrap(), dec!(12.5));

        let err = require_non_negative_number(dec!(-0.01), "cantidad").unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains("cantidad"));
    }

    #[test]
    fn test_negative_zero_is_accepted() {
        let neg_zero = -dec!(0.00);
        assert!(require_non_negative_number(neg_zero, "precio").is_ok());
    }

    #[rstest]
    #[case("10", dec!(10))]
    #[case(" 2.5 ", dec!(2.5))]
    #[case("0", dec!(0))]
    fn test_parse_amount_ok(#[case] text: &str, #[case] expected: Decimal) {
        assert_eq!(parse_amount(text, "cantidad").unwrap(), expected);
    }

    #[rstest]
    #[case("abc")]
    #[case("")]
    #[case("-3")]
    #[case("1,5")]
    fn test_parse_amount_rejects(#[case] text: &str) {
        assert!(parse_amount(text, "cantidad").unwrap_err().is_validation());
    }

    #[test]
    fn test_parse_term_days() {
        assert_eq!(parse_term_days("30", "plazo").unwrap(), 30);
        assert!(parse_term_days("-1", "plazo").is_err());
        assert!(parse_term_days("7.5", "plazo").is_err());
        assert!(parse_term_days("99999999999", "plazo").is_err());
    }

    #[rstest]
    #[case("2024-02-20")]
    #[case("2024-02-30")] // 形狀正確即可
    fn test_require_iso_date_returns_input(#[case] text: &str) {
        assert_eq!(require_iso_date(Some(text), "fecha").unwrap(), text);
    }

    #[rstest]
    #[case(None)]
    #[case(Some(""))]
    #[case(Some("2024-2-20"))]
    #[case(Some("20/02/2024"))]
    #[case(Some("2024-02-20T00:00:00"))]
    fn test_require_iso_date_rejects(#[case] value: Option<&str>) {
        assert!(require_iso_date(value, "fecha").unwrap_err().is_validation());
    }

    #[test]
    fn test_parse_iso_date() {
        assert_eq!(
            parse_iso_date("2024-02-29", "fecha").unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
        );
        assert!(parse_iso_date("2023-02-29", "fecha").is_err());
    }
}
