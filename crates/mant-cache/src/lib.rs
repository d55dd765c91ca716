//! # Mant Cache
//!
//! 參考資料快取與衍生欄位增量重算模組

pub mod catalog;
pub mod clock;
pub mod dirty_tracking;
pub mod recompute;

// Re-export 主要類型
pub use catalog::{
    catalog_item_cache, enrich_requirements, zone_cache, CatalogCache, CatalogLoader,
    EnrichedRequirement, DEFAULT_TTL_SECONDS,
};
pub use clock::{Clock, ManualClock, SystemClock};
pub use dirty_tracking::DirtyTracker;
pub use recompute::{FlushSummary, RecomputeQueue};
