//! 參考資料：園所、區域、價目表

use std::cmp::Ordering;
use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 找不到園所時的顯示名稱
pub const UNKNOWN_GARDEN_NAME: &str = "Sin jardín";

/// 區域名稱沒有前導數字時的排序值
const ZONE_FALLBACK_ORDER: u64 = 999;

/// 園所
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Garden {
    pub code: String,
    pub name: String,
}

/// 區域（recinto）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zone {
    pub garden_code: String,
    pub name: String,
}

/// 價目表項目（partida）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItem {
    /// 項目代碼，如 `A12`
    pub item: String,

    pub description: String,

    /// 計量單位
    pub unit: Option<String>,

    pub unit_price: Decimal,
}

/// 依代碼排序價目表：先比字母前綴，再比數字（`A2 < A10 < B1`）
pub fn sort_catalog_items(items: &mut [CatalogItem]) {
    items.sort_by(|a, b| compare_item_codes(&a.item, &b.item));
}

/// 比較項目代碼；任一方不是「大寫字母 + 數字」時按字典序
pub fn compare_item_codes(a: &str, b: &str) -> Ordering {
    match (split_item_code(a), split_item_code(b)) {
        (Some((letters_a, num_a)), Some((letters_b, num_b))) => {
            letters_a.cmp(letters_b).then(num_a.cmp(&num_b))
        }
        _ => a.cmp(b),
    }
}

fn split_item_code(code: &str) -> Option<(&str, u64)> {
    let letters_end = code
        .find(|c: char| !c.is_ascii_uppercase())
        .unwrap_or(code.len());
    if letters_end == 0 {
        return None;
    }

    let rest = &code[letters_end..];
    let digits_end = rest.find(|c: char| !c.is_ascii_digit()).unwrap_or(rest.len());
    if digits_end == 0 {
        return None;
    }

    let number = rest[..digits_end].parse().ok()?;
    Some((&code[..letters_end], number))
}

/// 依名稱前導數字排序區域，沒有數字者排在後面
pub fn sort_zones(zones: &mut [Zone]) {
    zones.sort_by_key(|zone| zone_order(&zone.name));
}

fn zone_order(name: &str) -> u64 {
    let digits_end = name.find(|c: char| !c.is_ascii_digit()).unwrap_or(name.len());
    name[..digits_end].parse().unwrap_or(ZONE_FALLBACK_ORDER)
}

/// 園所代碼 → 名稱查詢表
#[derive(Debug, Clone, Default)]
pub struct GardenDirectory {
    names: HashMap<String, String>,
}

impl GardenDirectory {
    /// 從園所清單建立
    pub fn from_gardens(gardens: &[Garden]) -> Self {
        Self {
            names: gardens
                .iter()
                .map(|g| (g.code.clone(), g.name.clone()))
                .collect(),
        }
    }

    /// 查詢名稱，找不到時回傳 [`UNKNOWN_GARDEN_NAME`]
    pub fn name_for(&self, code: &str) -> &str {
        self.names
            .get(code)
            .map(String::as_str)
            .unwrap_or(UNKNOWN_GARDEN_NAME)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
