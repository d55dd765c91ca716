//! 需求主計算器
//!
//! 依序串接價格、工期、延遲與罰款計算，產生需求的全部衍生欄位，
//! 並依成員需求重算付款報告金額。

use mant_core::{
    DerivedFields, EngineConfig, MantError, PaymentReport, ReportTotals, Requirement,
    RequirementId, RequirementInput, Result,
};
use rayon::prelude::*;

use crate::penalty::{compute_delay_days, compute_net_payable, compute_penalty_with};
use crate::pricing::compute_total_price_with;
use crate::report::compute_report_totals_with;
use crate::term::{compute_deadline, compute_max_extra_term_with, compute_total_term};

/// 批次重算結果
#[derive(Debug, Clone, Default)]
pub struct RecalcSummary {
    /// 成功重算筆數
    pub recalculated: usize,

    /// 失敗的需求與原因（衍生欄位維持原值）
    pub failures: Vec<(RequirementId, MantError)>,
}

impl RecalcSummary {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// 需求計算器
#[derive(Debug, Clone, Default)]
pub struct RequirementCalculator {
    config: EngineConfig,
}

impl RequirementCalculator {
    /// 創建新的計算器
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// 由計算輸入產生全部衍生欄位
    pub fn derive(&self, input: &RequirementInput) -> Result<DerivedFields> {
        let total_price = compute_total_price_with(&self.config, input.quantity, input.unit_price)?;
        let total_term = compute_total_term(input.base_term, input.extra_term)?;
        let deadline = compute_deadline(input.start_date, total_term)?;
        let delay_days = compute_delay_days(input.reception_date, deadline);
        let penalty = compute_penalty_with(&self.config, total_price, delay_days, total_term)?;
        let net_payable = compute_net_payable(total_price, penalty)?;

        Ok(DerivedFields {
            total_price,
            total_term,
            deadline,
            delay_days,
            penalty,
            net_payable,
        })
    }

    /// 檢查追加工期是否超過上限
    ///
    /// 由呼叫端（新增/修改需求的流程）在寫入前呼叫，[`derive`](Self::derive) 不檢查。
    pub fn check_extra_term(&self, input: &RequirementInput) -> Result<()> {
        let max_extra = compute_max_extra_term_with(&self.config, input.base_term);
        if input.extra_term > max_extra {
            return Err(MantError::validation(
                "extra_term",
                format!(
                    "追加工期 {} 天超過上限 {} 天（基本工期 {} 天）",
                    input.extra_term, max_extra, input.base_term
                ),
            ));
        }
        Ok(())
    }

    /// 重算單筆需求；失敗時不修改任何欄位
    pub fn recalculate(&self, requirement: &mut Requirement) -> Result<()> {
        let derived = self.derive(&requirement.input)?;

        if derived != requirement.derived {
            tracing::debug!(
                "需求 {} 重算：總價 {} → {}，罰款 {} → {}",
                requirement.id,
                requirement.derived.total_price,
                derived.total_price,
                requirement.derived.penalty,
                derived.penalty
            );
        }

        requirement.derived = derived;
        Ok(())
    }

    /// 批次重算（平行），單筆失敗不影響其他需求
    pub fn recalculate_all(&self, requirements: &mut [Requirement]) -> RecalcSummary {
        tracing::info!("開始批次重算：需求 {} 筆", requirements.len());
        let start_time = std::time::Instant::now();

        let failures: Vec<(RequirementId, MantError)> = requirements
            .par_iter_mut()
            .filter_map(|req| self.recalculate(req).err().map(|e| (req.id, e)))
            .collect();

        for (id, error) in &failures {
            tracing::warn!("需求 {} 重算失敗: {}", id, error);
        }

        let summary = RecalcSummary {
            recalculated: requirements.len() - failures.len(),
            failures,
        };

        tracing::info!(
            "批次重算完成，耗時 {:?}，成功 {} 筆，失敗 {} 筆",
            start_time.elapsed(),
            summary.recalculated,
            summary.failures.len()
        );

        summary
    }

    /// 依成員需求計算報告金額
    pub fn report_totals(&self, members: &[&Requirement]) -> Result<ReportTotals> {
        compute_report_totals_with(&self.config, members)
    }

    /// 依目前成員完整重算付款報告
    pub fn recompute_report<'a, F>(&self, report: &mut PaymentReport, lookup: F) -> Result<()>
    where
        F: Fn(RequirementId) -> Option<&'a Requirement>,
    {
        let members = report
            .requirement_ids
            .iter()
            .map(|&id| {
                lookup(id).ok_or_else(|| {
                    MantError::NotFound(format!("付款報告 {} 的需求 {}", report.code, id))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let totals = self.report_totals(&members)?;
        tracing::debug!(
            "付款報告 {} 重算：成員 {} 筆，淨額 {}，總計 {}",
            report.code,
            members.len(),
            totals.net,
            totals.final_total
        );

        report.totals = totals;
        Ok(())
    }
}
