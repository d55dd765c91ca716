//! 參考資料快取
//!
//! 每個快取是獨立物件，由邊界層持有；過期判斷使用注入的時鐘。

use chrono::{DateTime, Duration, Utc};
use mant_core::{
    catalog::{sort_catalog_items, sort_zones},
    CatalogItem, Garden, GardenDirectory, Requirement, Result, Zone,
};

use crate::clock::{Clock, SystemClock};

/// 預設有效期（5 分鐘）
pub const DEFAULT_TTL_SECONDS: i64 = 5 * 60;

/// 參考資料來源（通常是持久層的遠端指令）
pub trait CatalogLoader {
    type Item: Clone;

    /// 讀取全部資料
    fn load_all(&self) -> Result<Vec<Self::Item>>;
}

/// 帶有效期的參考資料快取
pub struct CatalogCache<L: CatalogLoader, C: Clock = SystemClock> {
    loader: L,
    clock: C,
    ttl: Duration,
    items: Vec<L::Item>,
    last_fetch: Option<DateTime<Utc>>,
    sorter: Option<fn(&mut [L::Item])>,
}

impl<L: CatalogLoader> CatalogCache<L, SystemClock> {
    /// 使用系統時鐘
    pub fn new(loader: L) -> Self {
        Self::with_clock(loader, SystemClock)
    }
}

impl<L: CatalogLoader, C: Clock> CatalogCache<L, C> {
    /// 使用指定時鐘
    pub fn with_clock(loader: L, clock: C) -> Self {
        Self {
            loader,
            clock,
            ttl: Duration::seconds(DEFAULT_TTL_SECONDS),
            items: Vec::new(),
            last_fetch: None,
            sorter: None,
        }
    }

    /// 建構器模式：設置有效期
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// 建構器模式：載入後排序
    pub fn with_sorter(mut self, sorter: fn(&mut [L::Item])) -> Self {
        self.sorter = Some(sorter);
        self
    }

    /// 資料是否仍在有效期內
    pub fn is_fresh(&self) -> bool {
        match self.last_fetch {
            Some(fetched_at) => self.clock.now() - fetched_at < self.ttl,
            None => false,
        }
    }

    /// 取得資料，過期時重新載入
    pub fn get(&mut self) -> Result<&[L::Item]> {
        if !self.is_fresh() {
            self.refresh()?;
        }
        Ok(&self.items)
    }

    /// 不論是否過期都重新載入
    pub fn force_refresh(&mut self) -> Result<&[L::Item]> {
        self.refresh()?;
        Ok(&self.items)
    }

    /// 標記為過期，下一次 [`get`](Self::get) 會重新載入
    pub fn invalidate(&mut self) {
        self.last_fetch = None;
    }

    /// 目前持有的資料（不觸發載入）
    pub fn snapshot(&self) -> &[L::Item] {
        &self.items
    }

    pub fn last_fetch(&self) -> Option<DateTime<Utc>> {
        self.last_fetch
    }

    fn refresh(&mut self) -> Result<()> {
        // 載入失敗時保留舊資料
        let mut items = self.loader.load_all()?;
        if let Some(sorter) = self.sorter {
            sorter(&mut items);
        }

        tracing::debug!("參考資料重新載入：{} 筆", items.len());
        self.items = items;
        self.last_fetch = Some(self.clock.now());
        Ok(())
    }
}

impl<L, C> CatalogCache<L, C>
where
    L: CatalogLoader<Item = Garden>,
    C: Clock,
{
    /// 目前快取的園所名稱查詢表
    pub fn directory(&self) -> GardenDirectory {
        GardenDirectory::from_gardens(&self.items)
    }
}

/// 價目表快取（依項目代碼自然排序）
pub fn catalog_item_cache<L, C>(loader: L, clock: C) -> CatalogCache<L, C>
where
    L: CatalogLoader<Item = CatalogItem>,
    C: Clock,
{
    CatalogCache::with_clock(loader, clock).with_sorter(sort_catalog_items)
}

/// 區域清單快取（依名稱前導數字排序）
pub fn zone_cache<L, C>(loader: L, clock: C) -> CatalogCache<L, C>
where
    L: CatalogLoader<Item = Zone>,
    C: Clock,
{
    CatalogCache::with_clock(loader, clock).with_sorter(sort_zones)
}

/// 附上園所名稱的需求
#[derive(Debug, Clone, Copy)]
pub struct EnrichedRequirement<'a> {
    pub requirement: &'a Requirement,
    pub garden_name: &'a str,
}

/// 為需求附上園所名稱
pub fn enrich_requirements<'a>(
    requirements: &'a [Requirement],
    directory: &'a GardenDirectory,
) -> Vec<EnrichedRequirement<'a>> {
    requirements
        .iter()
        .map(|requirement| EnrichedRequirement {
            requirement,
            garden_name: directory.name_for(&requirement.garden_code),
        })
        .collect()
}
