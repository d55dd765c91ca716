//! # Mant Calculation Engine
//!
//! 價格、工期、延遲罰款與付款報告計算。所有計算皆為純函數。

pub mod calculator;
pub mod penalty;
pub mod pricing;
pub mod report;
pub mod selection;
pub mod term;

// Re-export 主要類型
pub use calculator::{RecalcSummary, RequirementCalculator};
pub use penalty::{
    compute_delay_days, compute_delay_days_iso, compute_net_payable, compute_penalty,
    compute_penalty_with,
};
pub use pricing::{compute_total_price, compute_total_price_with};
pub use report::{compute_report_totals, compute_report_totals_with, NetPayableSource};
pub use selection::selected_total_price;
pub use term::{
    compute_deadline, compute_deadline_iso, compute_max_extra_term, compute_max_extra_term_with,
    compute_total_term,
};
