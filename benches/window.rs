//! Benchmarks for windowed reductions and calendar grouping.

use chrono::{Duration, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use datewise::core::{CalendarPeriod, OrderedSeries, Table};
use datewise::grouping::{group_by_calendar, mean_of};
use datewise::transform::window_delta;

fn generate_series(n: usize) -> OrderedSeries {
    let start = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
    let dates = (0..n).map(|i| start + Duration::days(i as i64)).collect();
    let values = (0..n)
        .map(|i| 90.0 - 0.01 * i as f64 + (i as f64 * 0.9).sin())
        .collect();
    OrderedSeries::from_values(dates, values).unwrap()
}

fn bench_windows(c: &mut Criterion) {
    let mut group = c.benchmark_group("windows");

    for size in [365, 3650, 36500].iter() {
        let series = generate_series(*size);

        group.bench_with_input(BenchmarkId::new("sma_30", size), size, |b, _| {
            b.iter(|| black_box(&series).sma(30))
        });

        group.bench_with_input(BenchmarkId::new("delta_7", size), size, |b, _| {
            b.iter(|| black_box(&series).select_windows(7, window_delta))
        });

        group.bench_with_input(BenchmarkId::new("amount_change_2", size), size, |b, _| {
            b.iter(|| black_box(&series).amount_change(2))
        });
    }

    group.finish();
}

fn bench_grouping(c: &mut Criterion) {
    let mut group = c.benchmark_group("grouping");

    for size in [365, 3650, 36500].iter() {
        let series = generate_series(*size);
        let change = series.amount_change(1).unwrap();
        let table = Table::from_series("Weight", &series)
            .with_series("AmountChange", &change)
            .unwrap();

        group.bench_with_input(BenchmarkId::new("weekday_mean", size), size, |b, _| {
            b.iter(|| {
                group_by_calendar(black_box(&table), CalendarPeriod::Weekday, |g| {
                    mean_of(g, "AmountChange")
                })
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_windows, bench_grouping);
criterion_main!(benches);
