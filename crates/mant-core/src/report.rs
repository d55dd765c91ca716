//! 工單與付款報告模型

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::requirement::RequirementId;

pub type WorkOrderId = i64;
pub type ReportId = i64;

/// 工單（OT）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkOrder {
    pub id: WorkOrderId,

    /// 工單編號，如 `OT-J101-A001`
    pub code: String,

    pub garden_code: String,

    pub created_on: NaiveDate,

    pub requirement_ids: Vec<RequirementId>,

    pub observations: Option<String>,
}

impl WorkOrder {
    /// 創建新的工單
    pub fn new(
        id: WorkOrderId,
        code: String,
        garden_code: String,
        created_on: NaiveDate,
        requirement_ids: Vec<RequirementId>,
    ) -> Self {
        Self {
            id,
            code,
            garden_code,
            created_on,
            requirement_ids,
            observations: None,
        }
    }
}

/// 付款報告金額
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportTotals {
    /// 淨額 = Σ 應付淨額
    pub net: Decimal,

    /// 利潤
    pub profit: Decimal,

    /// 增值稅（以淨額 + 利潤為稅基）
    pub tax: Decimal,

    /// 總計 = 淨額 + 利潤 + 稅額
    pub final_total: Decimal,
}

/// 付款報告（IP）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentReport {
    pub id: ReportId,

    /// 報告編號，如 `IP-J101-A01`
    pub code: String,

    pub garden_code: String,

    pub created_on: NaiveDate,

    /// 成員需求
    pub requirement_ids: Vec<RequirementId>,

    #[serde(flatten)]
    pub totals: ReportTotals,

    pub observations: Option<String>,
}

impl PaymentReport {
    /// 創建新的付款報告（金額待計算）
    pub fn new(
        id: ReportId,
        code: String,
        garden_code: String,
        created_on: NaiveDate,
        requirement_ids: Vec<RequirementId>,
    ) -> Self {
        Self {
            id,
            code,
            garden_code,
            created_on,
            requirement_ids,
            totals: ReportTotals::default(),
            observations: None,
        }
    }

    /// 是否包含指定需求
    pub fn contains(&self, requirement_id: RequirementId) -> bool {
        self.requirement_ids.contains(&requirement_id)
    }
}
