//! # Mant Core
//!
//! 核心資料模型、驗證與格式化

pub mod calendar;
pub mod catalog;
pub mod codes;
pub mod config;
pub mod format;
pub mod report;
pub mod requirement;
pub mod rounding;
pub mod validation;

// Re-export 主要類型
pub use catalog::{CatalogItem, Garden, GardenDirectory, Zone};
pub use codes::{next_document_code, DocumentKind};
pub use config::{ContractConfig, EngineConfig};
pub use report::{PaymentReport, ReportId, ReportTotals, WorkOrder, WorkOrderId};
pub use requirement::{
    DerivedFields, PaymentState, Requirement, RequirementId, RequirementInput,
    RequirementPatch, RequirementStatus,
};
pub use rounding::{round, round_int};

/// 維護工單系統錯誤類型
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MantError {
    /// 輸入不符合契約（非數值、負數、日期格式錯誤）
    #[error("{field} 驗證失敗: {reason}")]
    Validation { field: String, reason: String },

    #[error("配置錯誤: {0}")]
    Config(String),

    #[error("目錄載入失敗: {0}")]
    CatalogLoad(String),

    #[error("找不到資料: {0}")]
    NotFound(String),

    #[error("日期超出範圍: {0}")]
    DateOverflow(String),
}

impl MantError {
    /// 建立驗證錯誤
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// 是否為驗證錯誤
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }
}

impl From<serde_json::Error> for MantError {
    fn from(e: serde_json::Error) -> Self {
        MantError::Config(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, MantError>;
