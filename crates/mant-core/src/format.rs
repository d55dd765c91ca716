//! 顯示格式（智利西語慣例）
//!
//! 只處理已計算完成的數值，不負責任何業務規則。

use chrono::{DateTime, NaiveDate};
use rust_decimal::Decimal;

use crate::rounding::round_int;
use crate::validation::has_iso_shape;

/// 千分位分隔符
const THOUSANDS_SEPARATOR: char = '.';

/// 整數千分位格式，如 `1.234.567`
pub fn format_number(value: Decimal) -> String {
    let rounded = round_int(value);
    let digits = rounded.abs().trunc().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if rounded.is_sign_negative() && !rounded.is_zero() {
        grouped.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(THOUSANDS_SEPARATOR);
        }
        grouped.push(ch);
    }
    grouped
}

/// 貨幣格式，如 `$1.234.567`
pub fn format_currency(value: Decimal) -> String {
    format!("${}", format_number(value))
}

/// 延遲天數顯示值（提前不顯示為負）
pub fn format_delay_days(days: i64) -> i64 {
    days.max(0)
}

/// `DD/MM/AAAA`；空值或無法解析時回傳空字串
pub fn format_date(value: Option<&str>) -> String {
    render_date(value, "%d/%m/%Y")
}

/// `DD/MM/AA`（列印用）
pub fn format_date_short(value: Option<&str>) -> String {
    render_date(value, "%d/%m/%y")
}

/// 日期值轉 `DD/MM/AAAA`
pub fn format_naive_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

fn render_date(value: Option<&str>, pattern: &str) -> String {
    let value = match value {
        Some(v) if !v.trim().is_empty() => v.trim(),
        _ => return String::new(),
    };

    // 資料庫日期直接拆欄位，不經過時區
    if has_iso_shape(value) {
        let (year, rest) = value.split_at(4);
        let month = &rest[1..3];
        let day = &rest[4..6];
        let year = if pattern.ends_with("%y") { &year[2..] } else { year };
        return format!("{}/{}/{}", day, month, year);
    }

    match DateTime::parse_from_rfc3339(value) {
        Ok(timestamp) => timestamp.date_naive().format(pattern).to_string(),
        Err(_) => String::new(),
    }
}
