//! 髒標記追蹤

use std::collections::BTreeSet;

use mant_core::RequirementId;

/// 記錄計算輸入已變更、衍生欄位待重算的需求
#[derive(Debug, Default)]
pub struct DirtyTracker {
    dirty_requirements: BTreeSet<RequirementId>,
}

impl DirtyTracker {
    /// 創建新的追蹤器
    pub fn new() -> Self {
        Self::default()
    }

    /// 標記需求為髒
    pub fn mark_dirty(&mut self, requirement_id: RequirementId) {
        self.dirty_requirements.insert(requirement_id);
    }

    /// 檢查需求是否為髒
    pub fn is_dirty(&self, requirement_id: RequirementId) -> bool {
        self.dirty_requirements.contains(&requirement_id)
    }

    /// 取消單一需求的標記（如需求已刪除）
    pub fn forget(&mut self, requirement_id: RequirementId) {
        self.dirty_requirements.remove(&requirement_id);
    }

    pub fn is_empty(&self) -> bool {
        self.dirty_requirements.is_empty()
    }

    pub fn len(&self) -> usize {
        self.dirty_requirements.len()
    }

    /// 取出所有髒需求（遞增排序）並清除標記
    pub fn take_dirty(&mut self) -> Vec<RequirementId> {
        std::mem::take(&mut self.dirty_requirements).into_iter().collect()
    }
}
