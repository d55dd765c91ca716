use chrono::{Days, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use mant::prelude::*;
use rust_decimal::Decimal;

fn requirements(count: i64) -> Vec<Requirement> {
    let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap_or_default();
    (0..count)
        .map(|id| {
            let input = RequirementInput::new(Decimal::from(id % 9 + 1), Decimal::new(125_050, 2), 20)
                .with_start_date(start)
                .with_reception_date(start + Days::new((id % 40) as u64));
            Requirement::new(id, "J101".to_string(), format!("A{}", id % 50), input)
        })
        .collect()
}

fn bench_report_totals(c: &mut Criterion) {
    let calc = RequirementCalculator::default();
    let mut group = c.benchmark_group("report_totals");

    for size in [10_i64, 100, 1_000] {
        let mut reqs = requirements(size);
        calc.recalculate_all(&mut reqs);
        let members: Vec<&Requirement> = reqs.iter().collect();

        group.bench_with_input(BenchmarkId::from_parameter(size), &members, |b, members| {
            b.iter(|| compute_report_totals(black_box(members)))
        });
    }
    group.finish();
}

fn bench_recalculate_all(c: &mut Criterion) {
    let calc = RequirementCalculator::default();
    let reqs = requirements(10_000);

    c.bench_function("recalculate_all_10k", |b| {
        b.iter_batched(
            || reqs.clone(),
            |mut batch| calc.recalculate_all(&mut batch),
            criterion::BatchSize::LargeInput,
        )
    });
}

criterion_group!(benches, bench_report_totals, bench_recalculate_all);
criterion_main!(benches);
