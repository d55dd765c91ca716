//! 衍生欄位重算佇列
//!
//! 需求的計算輸入變更後先標記為髒，[`RecomputeQueue::flush`] 時重算需求，
//! 再完整重算包含這些需求的付款報告。付款報告沒有增量更新路徑。

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use mant_calc::RequirementCalculator;
use mant_core::{
    MantError, PaymentReport, ReportId, Requirement, RequirementId, RequirementPatch, Result,
    WorkOrder,
};

use crate::dirty_tracking::DirtyTracker;

/// 一次 flush 的重算數量
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlushSummary {
    pub requirements: usize,
    pub reports: usize,
}

/// 需求與付款報告的重算佇列
#[derive(Debug, Default)]
pub struct RecomputeQueue {
    calculator: RequirementCalculator,
    requirements: BTreeMap<RequirementId, Requirement>,
    reports: BTreeMap<ReportId, PaymentReport>,
    tracker: DirtyTracker,
}

impl RecomputeQueue {
    /// 創建新的佇列
    pub fn new(calculator: RequirementCalculator) -> Self {
        Self {
            calculator,
            ..Self::default()
        }
    }

    pub fn requirement(&self, id: RequirementId) -> Option<&Requirement> {
        self.requirements.get(&id)
    }

    pub fn report(&self, id: ReportId) -> Option<&PaymentReport> {
        self.reports.get(&id)
    }

    pub fn requirements(&self) -> impl Iterator<Item = &Requirement> {
        self.requirements.values()
    }

    /// 待重算的需求數量
    pub fn pending(&self) -> usize {
        self.tracker.len()
    }

    /// 新增需求，立即計算衍生欄位
    pub fn insert_requirement(&mut self, mut requirement: Requirement) -> Result<()> {
        self.calculator.check_extra_term(&requirement.input)?;
        self.calculator.recalculate(&mut requirement)?;

        tracing::debug!(
            "新增需求 {}：總價 {}，期限 {:?}",
            requirement.id,
            requirement.derived.total_price,
            requirement.derived.deadline
        );

        self.tracker.forget(requirement.id);
        self.requirements.insert(requirement.id, requirement);
        Ok(())
    }

    /// 套用修改；計算輸入有變更時先驗證再標記待重算
    ///
    /// 回傳是否變更了計算輸入。驗證失敗時需求維持原狀。
    pub fn apply_patch(&mut self, id: RequirementId, patch: &RequirementPatch) -> Result<bool> {
        let requirement = self
            .requirements
            .get_mut(&id)
            .ok_or_else(|| MantError::NotFound(format!("需求 {}", id)))?;

        let mut candidate = requirement.input.clone();
        let changed = patch.apply_to_input(&mut candidate);
        if changed {
            self.calculator.check_extra_term(&candidate)?;
            self.calculator.derive(&candidate)?;
        }

        requirement.apply_patch(patch);
        if changed {
            self.tracker.mark_dirty(id);
        }
        Ok(changed)
    }

    /// 記錄驗收日期
    pub fn record_reception(&mut self, id: RequirementId, date: NaiveDate) -> Result<()> {
        self.apply_patch(id, &RequirementPatch::reception(date)).map(|_| ())
    }

    /// 將工單中的需求標記為已派工
    pub fn assign_work_order(&mut self, order: &WorkOrder) -> Result<()> {
        self.ensure_known(&order.requirement_ids)?;
        for id in &order.requirement_ids {
            if let Some(requirement) = self.requirements.get_mut(id) {
                requirement.assign_work_order(order.id);
            }
        }
        tracing::info!(
            "工單 {}：派工需求 {} 筆",
            order.code,
            order.requirement_ids.len()
        );
        Ok(())
    }

    /// 建立付款報告並計算金額
    pub fn create_report(&mut self, report: PaymentReport) -> Result<&PaymentReport> {
        if self.reports.contains_key(&report.id) {
            return Err(MantError::validation(
                "report_id",
                format!("付款報告 {} 已存在", report.id),
            ));
        }

        let id = report.id;
        let members = report.requirement_ids.clone();
        let mut report = report;
        report.requirement_ids.clear();
        self.reports.insert(id, report);

        let linked = self.set_report_members(id, members).map(|_| ());
        if let Err(e) = linked {
            self.reports.remove(&id);
            return Err(e);
        }

        self.report(id)
            .ok_or_else(|| MantError::NotFound(format!("付款報告 {}", id)))
    }

    /// 替換付款報告成員並完整重算
    pub fn set_report_members(
        &mut self,
        report_id: ReportId,
        requirement_ids: Vec<RequirementId>,
    ) -> Result<&PaymentReport> {
        if !self.reports.contains_key(&report_id) {
            return Err(MantError::NotFound(format!("付款報告 {}", report_id)));
        }
        self.ensure_known(&requirement_ids)?;

        let mut seen = BTreeSet::new();
        if let Some(repeated) = requirement_ids.iter().find(|id| !seen.insert(**id)) {
            return Err(MantError::validation(
                "requirement_ids",
                format!("需求 {} 重複", repeated),
            ));
        }

        for id in &requirement_ids {
            if let Some(owner) = self.requirements[id].payment_report_id {
                if owner != report_id {
                    return Err(MantError::validation(
                        "requirement_ids",
                        format!("需求 {} 已在付款報告 {} 中", id, owner),
                    ));
                }
            }
        }

        // 成員的應付淨額必須是最新的
        self.flush()?;

        // 先算金額，失敗時不變更任何連結
        let members: Vec<&Requirement> = requirement_ids
            .iter()
            .filter_map(|id| self.requirements.get(id))
            .collect();
        let totals = self.calculator.report_totals(&members)?;

        let new_members: BTreeSet<RequirementId> = requirement_ids.iter().copied().collect();
        let report = self
            .reports
            .get_mut(&report_id)
            .ok_or_else(|| MantError::NotFound(format!("付款報告 {}", report_id)))?;

        for old in &report.requirement_ids {
            if !new_members.contains(old) {
                if let Some(requirement) = self.requirements.get_mut(old) {
                    requirement.release_payment_report();
                }
            }
        }
        for id in &requirement_ids {
            if let Some(requirement) = self.requirements.get_mut(id) {
                requirement.assign_payment_report(report_id);
            }
        }

        report.requirement_ids = requirement_ids;
        report.totals = totals;

        tracing::info!(
            "付款報告 {}：成員 {} 筆，總計 {}",
            report.code,
            report.requirement_ids.len(),
            report.totals.final_total
        );

        Ok(&*report)
    }

    /// 重算所有髒需求，再重算受影響的付款報告
    ///
    /// 某筆需求重算失敗時，它與其後的需求保持待重算；已重算的需求仍會
    /// 更新所屬報告，然後回傳該錯誤。
    pub fn flush(&mut self) -> Result<FlushSummary> {
        if self.tracker.is_empty() {
            return Ok(FlushSummary::default());
        }

        let dirty = self.tracker.take_dirty();
        tracing::debug!("重算需求 {} 筆", dirty.len());

        let mut recalculated = BTreeSet::new();
        let mut failure = None;
        for (index, id) in dirty.iter().enumerate() {
            let Some(requirement) = self.requirements.get_mut(id) else {
                continue;
            };
            if let Err(e) = self.calculator.recalculate(requirement) {
                tracing::warn!("需求 {} 重算失敗: {}", id, e);
                for pending in &dirty[index..] {
                    self.tracker.mark_dirty(*pending);
                }
                failure = Some(e);
                break;
            }
            recalculated.insert(*id);
        }

        let requirements = &self.requirements;
        let mut reports = 0;
        for report in self.reports.values_mut() {
            if report.requirement_ids.iter().any(|id| recalculated.contains(id)) {
                self.calculator
                    .recompute_report(report, |id| requirements.get(&id))?;
                reports += 1;
            }
        }

        match failure {
            Some(e) => Err(e),
            None => Ok(FlushSummary {
                requirements: recalculated.len(),
                reports,
            }),
        }
    }

    fn ensure_known(&self, ids: &[RequirementId]) -> Result<()> {
        match ids.iter().find(|id| !self.requirements.contains_key(id)) {
            Some(missing) => Err(MantError::NotFound(format!("需求 {}", missing))),
            None => Ok(()),
        }
    }
}
