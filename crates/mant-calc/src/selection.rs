//! 需求篩選與小計

use std::collections::HashSet;

use mant_core::{Requirement, RequirementId};
use rust_decimal::Decimal;

/// 已選需求的總價合計
pub fn selected_total_price(requirements: &[Requirement], selected: &HashSet<RequirementId>) -> Decimal {
    requirements
        .iter()
        .filter(|r| selected.contains(&r.id))
        .map(|r| r.derived.total_price)
        .sum()
}

/// 已派工、待驗收的需求
pub fn awaiting_reception<'a>(
    requirements: &'a [Requirement],
    garden_code: Option<&'a str>,
) -> impl Iterator<Item = &'a Requirement> + 'a {
    requirements
        .iter()
        .filter(|r| r.is_awaiting_reception())
        .filter(move |r| garden_code.map_or(true, |code| r.garden_code == code))
}

/// 已驗收的需求
pub fn with_reception<'a>(
    requirements: &'a [Requirement],
    garden_code: Option<&'a str>,
) -> impl Iterator<Item = &'a Requirement> + 'a {
    requirements
        .iter()
        .filter(|r| r.is_received())
        .filter(move |r| garden_code.map_or(true, |code| r.garden_code == code))
}

/// 可納入付款報告的需求：同一園所、已驗收、尚未在其他報告中
pub fn available_for_report<'a>(
    requirements: &'a [Requirement],
    garden_code: &'a str,
) -> impl Iterator<Item = &'a Requirement> + 'a {
    requirements
        .iter()
        .filter(move |r| r.garden_code == garden_code)
        .filter(|r| r.is_received() && r.payment_report_id.is_none())
}
