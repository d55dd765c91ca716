//! 付款報告計算範例
//!
//! 從價目表建立需求、派工、驗收，最後產生付款報告

use chrono::NaiveDate;
use mant::mant_cache::catalog_item_cache;
use mant::mant_core::format::{format_currency, format_delay_days, format_naive_date};
use mant::mant_core::{CatalogItem, Garden, MantError};
use mant::prelude::*;
use rust_decimal_macros::dec;

/// 記憶體中的價目表
struct PriceList;

impl CatalogLoader for PriceList {
    type Item = CatalogItem;

    fn load_all(&self) -> mant::mant_core::Result<Vec<CatalogItem>> {
        let item = |code: &str, description: &str, unit_price| CatalogItem {
            item: code.to_string(),
            description: description.to_string(),
            unit: Some("m2".to_string()),
            unit_price,
        };
        Ok(vec![
            item("B1", "Poda de arbustos", dec!(3200)),
            item("A10", "Riego manual", dec!(950)),
            item("A2", "Corte de césped", dec!(1800)),
        ])
    }
}

struct Gardens;

impl CatalogLoader for Gardens {
    type Item = Garden;

    fn load_all(&self) -> mant::mant_core::Result<Vec<Garden>> {
        Ok(vec![Garden {
            code: "J101".to_string(),
            name: "Los Aromos".to_string(),
        }])
    }
}

fn date(y: i32, m: u32, d: u32) -> Result<NaiveDate, MantError> {
    NaiveDate::from_ymd_opt(y, m, d)
        .ok_or_else(|| MantError::validation("date", format!("{}-{}-{}", y, m, d)))
}

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    println!("===== Payment Report Example =====\n");

    // 步驟 1: 載入參考資料
    println!("[1] Load Catalogs");
    let mut prices = catalog_item_cache(PriceList, SystemClock);
    let mut gardens = CatalogCache::new(Gardens);
    gardens.get()?;
    let directory = gardens.directory();
    for item in prices.get()? {
        println!("    {} {:<20} {}", item.item, item.description, format_currency(item.unit_price));
    }
    println!();

    // 步驟 2: 登錄需求
    println!("[2] Register Requirements");
    let contract = ContractConfig::default().with_correlative_prefix("A");
    let mut queue = RecomputeQueue::new(RequirementCalculator::default());
    let start = date(2025, 3, 3)?;

    let quantities = [dec!(120), dec!(300), dec!(15)];
    for (index, (item, quantity)) in prices.snapshot().iter().zip(quantities).enumerate() {
        let id = index as i64 + 1;
        let input = RequirementInput::new(quantity, item.unit_price, 10).with_start_date(start);
        queue.insert_requirement(
            Requirement::new(id, "J101".to_string(), item.item.clone(), input)
                .with_description(item.description.clone()),
        )?;
    }
    for req in queue.requirements() {
        println!(
            "    #{} {} x {} = {}",
            req.id,
            req.item,
            req.input.quantity,
            format_currency(req.derived.total_price)
        );
    }
    println!();

    // 步驟 3: 派工
    println!("[3] Work Order");
    let code = next_document_code(DocumentKind::WorkOrder, "J101", &contract.correlative_prefix, std::iter::empty());
    let order = WorkOrder::new(1, code, "J101".to_string(), start, vec![1, 2, 3]);
    queue.assign_work_order(&order)?;
    println!("    {} ({})\n", order.code, directory.name_for(&order.garden_code));

    // 步驟 4: 驗收
    println!("[4] Reception");
    queue.record_reception(1, date(2025, 3, 12)?)?;
    queue.record_reception(2, date(2025, 3, 13)?)?;
    queue.record_reception(3, date(2025, 3, 17)?)?;
    queue.flush()?;
    for req in queue.requirements() {
        println!(
            "    #{} delay {} days, penalty {}, net {}",
            req.id,
            format_delay_days(req.derived.delay_days),
            format_currency(req.derived.penalty),
            format_currency(req.derived.net_payable)
        );
    }
    println!();

    // 步驟 5: 付款報告
    println!("[5] Payment Report");
    let code = next_document_code(DocumentKind::PaymentReport, "J101", &contract.correlative_prefix, std::iter::empty());
    let report = queue.create_report(PaymentReport::new(
        1,
        code,
        "J101".to_string(),
        date(2025, 3, 31)?,
        vec![1, 2, 3],
    ))?;
    println!("    {} {} {}", contract.title, report.code, format_naive_date(report.created_on));
    println!("    Net:    {}", format_currency(report.totals.net));
    println!("    Profit: {}", format_currency(report.totals.profit));
    println!("    VAT:    {}", format_currency(report.totals.tax));
    println!("    Total:  {}", format_currency(report.totals.final_total));

    Ok(())
}
