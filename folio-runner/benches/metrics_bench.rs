//! Criterion benchmarks for the statistics engine.
//!
//! Run with: `cargo bench -p folio-runner`
//!
//! Sizes cover one trading year up to the full history of the NSE portfolio
//! (about 4,300 sessions since March 2008).

use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use folio_core::{DateTable, PriceTable};
use folio_runner::metrics::{correlation, cumulative_growth, daily_returns, ReturnSummary};

const SYMBOLS: usize = 7;

/// Deterministic price paths without an RNG dependency.
fn generate_prices(rows: usize) -> PriceTable {
    let start = NaiveDate::from_ymd_opt(2008, 3, 17).unwrap();
    let dates = (0..rows)
        .map(|i| start + chrono::Duration::days(i as i64))
        .collect();
    let symbols = (0..SYMBOLS).map(|s| format!("SYM{s}")).collect();
    let columns = (0..SYMBOLS)
        .map(|s| {
            let mut price = 100.0 + s as f64 * 10.0;
            (0..rows)
                .map(|i| {
                    let wiggle = ((i * (s + 3)) % 17) as f64 / 17.0 - 0.5;
                    price *= 1.0 + wiggle * 0.02;
                    price
                })
                .collect()
        })
        .collect();
    PriceTable::new(DateTable::new(dates, symbols, columns).unwrap())
}

fn bench_daily_returns(c: &mut Criterion) {
    let mut group = c.benchmark_group("daily_returns");

    for rows in [252, 1000, 4300].iter() {
        let prices = generate_prices(*rows);
        group.bench_with_input(BenchmarkId::from_parameter(rows), rows, |b, _| {
            b.iter(|| daily_returns(black_box(&prices)));
        });
    }

    group.finish();
}

fn bench_correlation(c: &mut Criterion) {
    let mut group = c.benchmark_group("correlation");

    for rows in [252, 1000, 4300].iter() {
        let returns = daily_returns(&generate_prices(*rows));
        group.bench_with_input(BenchmarkId::from_parameter(rows), rows, |b, _| {
            b.iter(|| correlation(black_box(&returns)));
        });
    }

    group.finish();
}

/// Everything after alignment, as one run computes it.
fn bench_full_statistics(c: &mut Criterion) {
    let prices = generate_prices(4300);
    c.bench_function("full_statistics_4300", |b| {
        b.iter(|| {
            let returns = daily_returns(black_box(&prices));
            let growth = cumulative_growth(&returns);
            let corr = correlation(&returns);
            let summary = ReturnSummary::compute(&returns);
            black_box((growth, corr, summary))
        });
    });
}

criterion_group!(
    benches,
    bench_daily_returns,
    bench_correlation,
    bench_full_statistics
);
criterion_main!(benches);
