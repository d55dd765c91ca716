//! # Mant
//!
//! 園所維護工單計算引擎
//!
//! - [`mant_core`]：資料模型、驗證、格式化、文件編號
//! - [`mant_calc`]：價格、工期、延遲罰款、付款報告計算
//! - [`mant_cache`]：參考資料快取與增量重算

pub use mant_cache;
pub use mant_calc;
pub use mant_core;

/// 常用類型
pub mod prelude {
    pub use mant_cache::{CatalogCache, CatalogLoader, Clock, RecomputeQueue, SystemClock};
    pub use mant_calc::{
        compute_deadline, compute_delay_days, compute_max_extra_term, compute_net_payable,
        compute_penalty, compute_report_totals, compute_total_price, compute_total_term,
        RequirementCalculator,
    };
    pub use mant_core::{
        next_document_code, ContractConfig, DocumentKind, EngineConfig, MantError,
        PaymentReport, ReportTotals, Requirement, RequirementInput, RequirementPatch,
        RequirementStatus, WorkOrder,
    };
}
