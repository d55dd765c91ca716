//! 日曆日運算
//!
//! 只在日曆欄位上運算，不涉及時區或夏令時間。

use chrono::{Days, NaiveDate};

use crate::{MantError, Result};

/// ISO 日期格式
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// 加上日曆天數（跨月、跨年與閏年由 chrono 處理）
pub fn add_calendar_days(start: NaiveDate, days: u32) -> Result<NaiveDate> {
    start
        .checked_add_days(Days::new(u64::from(days)))
        .ok_or_else(|| MantError::DateOverflow(format!("{} + {} 天", start, days)))
}

/// 兩個日期之間的有號天數（`to - from`）
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}

/// 轉為 `YYYY-MM-DD`
pub fn to_iso(date: NaiveDate) -> String {
    date.format(ISO_DATE_FORMAT).to_string()
}
