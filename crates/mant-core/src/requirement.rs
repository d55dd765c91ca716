//! 需求模型

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::report::{ReportId, WorkOrderId};

/// 需求ID（由持久層配發）
pub type RequirementId = i64;

/// 需求流程狀態
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RequirementStatus {
    /// 尚未分派
    #[default]
    #[serde(rename = "pendiente")]
    Pending,
    /// 已納入工單
    #[serde(rename = "en_ot")]
    InWorkOrder,
    /// 已納入付款報告
    #[serde(rename = "en_informe")]
    InPaymentReport,
}

/// 付款狀態
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentState {
    /// 尚未驗收
    Pending,
    /// 已驗收，延遲/罰款/應付淨額已確定
    Received {
        delay_days: i64,
        penalty: Decimal,
        net_payable: Decimal,
    },
}

/// 計算輸入欄位
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequirementInput {
    /// 數量
    pub quantity: Decimal,

    /// 單價
    pub unit_price: Decimal,

    /// 基本工期（天）
    pub base_term: u32,

    /// 追加工期（天）
    pub extra_term: u32,

    /// 開工日期
    pub start_date: Option<NaiveDate>,

    /// 驗收日期（驗收後才有值）
    pub reception_date: Option<NaiveDate>,
}

impl RequirementInput {
    /// 創建新的計算輸入
    pub fn new(quantity: Decimal, unit_price: Decimal, base_term: u32) -> Self {
        Self {
            quantity,
            unit_price,
            base_term,
            ..Self::default()
        }
    }

    /// 建構器模式：設置追加工期
    pub fn with_extra_term(mut self, days: u32) -> Self {
        self.extra_term = days;
        self
    }

    /// 建構器模式：設置開工日期
    pub fn with_start_date(mut self, date: NaiveDate) -> Self {
        self.start_date = Some(date);
        self
    }

    /// 建構器模式：設置驗收日期
    pub fn with_reception_date(mut self, date: NaiveDate) -> Self {
        self.reception_date = Some(date);
        self
    }
}

/// 衍生欄位（全部由計算引擎產生）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivedFields {
    /// 總價 = round2(數量 × 單價)
    pub total_price: Decimal,

    /// 總工期 = 基本 + 追加
    pub total_term: u32,

    /// 期限 = 開工日期 + 總工期
    pub deadline: Option<NaiveDate>,

    /// 延遲天數（負值 = 提前）
    pub delay_days: i64,

    /// 罰款
    pub penalty: Decimal,

    /// 應付淨額 = 總價 - 罰款（可為負）
    pub net_payable: Decimal,
}

/// 維護需求
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Requirement {
    pub id: RequirementId,

    /// 園所代碼
    pub garden_code: String,

    /// 區域（recinto）
    pub zone: Option<String>,

    /// 價目表項目代碼
    pub item: String,

    pub description: Option<String>,

    /// 登錄日期
    pub registered_on: Option<NaiveDate>,

    pub status: RequirementStatus,

    pub work_order_id: Option<WorkOrderId>,

    pub payment_report_id: Option<ReportId>,

    #[serde(flatten)]
    pub input: RequirementInput,

    #[serde(flatten)]
    pub derived: DerivedFields,
}

impl Requirement {
    /// 創建新的需求（衍生欄位待計算）
    pub fn new(
        id: RequirementId,
        garden_code: String,
        item: String,
        input: RequirementInput,
    ) -> Self {
        Self {
            id,
            garden_code,
            zone: None,
            item,
            description: None,
            registered_on: None,
            status: RequirementStatus::Pending,
            work_order_id: None,
            payment_report_id: None,
            input,
            derived: DerivedFields::default(),
        }
    }

    /// 建構器模式：設置區域
    pub fn with_zone(mut self, zone: String) -> Self {
        self.zone = Some(zone);
        self
    }

    /// 建構器模式：設置說明
    pub fn with_description(mut self, description: String) -> Self {
        self.description = Some(description);
        self
    }

    /// 建構器模式：設置登錄日期
    pub fn with_registered_on(mut self, date: NaiveDate) -> Self {
        self.registered_on = Some(date);
        self
    }

    /// 付款狀態
    pub fn payment_state(&self) -> PaymentState {
        match self.input.reception_date {
            None => PaymentState::Pending,
            Some(_) => PaymentState::Received {
                delay_days: self.derived.delay_days,
                penalty: self.derived.penalty,
                net_payable: self.derived.net_payable,
            },
        }
    }

    /// 應付淨額
    pub fn net_payable(&self) -> Decimal {
        self.derived.net_payable
    }

    /// 已派工但尚未驗收
    pub fn is_awaiting_reception(&self) -> bool {
        self.work_order_id.is_some() && self.input.reception_date.is_none()
    }

    /// 已驗收
    pub fn is_received(&self) -> bool {
        self.input.reception_date.is_some()
    }

    /// 納入工單
    pub fn assign_work_order(&mut self, work_order_id: WorkOrderId) {
        self.work_order_id = Some(work_order_id);
        if self.payment_report_id.is_none() {
            self.status = RequirementStatus::InWorkOrder;
        }
    }

    /// 納入付款報告
    pub fn assign_payment_report(&mut self, report_id: ReportId) {
        self.payment_report_id = Some(report_id);
        self.status = RequirementStatus::InPaymentReport;
    }

    /// 移出付款報告，狀態回到工單或待處理
    pub fn release_payment_report(&mut self) {
        self.payment_report_id = None;
        self.status = if self.work_order_id.is_some() {
            RequirementStatus::InWorkOrder
        } else {
            RequirementStatus::Pending
        };
    }

    /// 套用修改，回傳是否變更了計算輸入
    pub fn apply_patch(&mut self, patch: &RequirementPatch) -> bool {
        if let Some(description) = &patch.description {
            self.description = Some(description.clone());
        }
        if let Some(zone) = &patch.zone {
            self.zone = Some(zone.clone());
        }
        patch.apply_to_input(&mut self.input)
    }
}

/// 需求修改（未設定的欄位維持原值）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequirementPatch {
    pub quantity: Option<Decimal>,
    pub unit_price: Option<Decimal>,
    pub base_term: Option<u32>,
    pub extra_term: Option<u32>,
    /// `Some(None)` 清除開工日期
    pub start_date: Option<Option<NaiveDate>>,
    /// `Some(None)` 清除驗收日期
    pub reception_date: Option<Option<NaiveDate>>,
    pub description: Option<String>,
    pub zone: Option<String>,
}

impl RequirementPatch {
    /// 記錄驗收日期
    pub fn reception(date: NaiveDate) -> Self {
        Self {
            reception_date: Some(Some(date)),
            ..Self::default()
        }
    }

    /// 清除驗收日期
    pub fn clear_reception() -> Self {
        Self {
            reception_date: Some(None),
            ..Self::default()
        }
    }

    /// 是否包含任何計算輸入
    pub fn touches_calculation(&self) -> bool {
        self.quantity.is_some()
            || self.unit_price.is_some()
            || self.base_term.is_some()
            || self.extra_term.is_some()
            || self.start_date.is_some()
            || self.reception_date.is_some()
    }

    /// 套用到計算輸入，回傳是否有欄位實際改變
    pub fn apply_to_input(&self, input: &mut RequirementInput) -> bool {
        let before = input.clone();

        if let Some(quantity) = self.quantity {
            input.quantity = quantity;
        }
        if let Some(unit_price) = self.unit_price {
            input.unit_price = unit_price;
        }
        if let Some(base_term) = self.base_term {
            input.base_term = base_term;
        }
        if let Some(extra_term) = self.extra_term {
            input.extra_term = extra_term;
        }
        if let Some(start_date) = self.start_date {
            input.start_date = start_date;
        }
        if let Some(reception_date) = self.reception_date {
            input.reception_date = reception_date;
        }

        *input != before
    }
}
