//! Property-based tests for series operators and grouping.
//!
//! These tests verify invariants that should hold for all valid inputs,
//! using randomly generated date-indexed series with irregular gaps.

use chrono::{Duration, NaiveDate};
use datewise::core::{CalendarPeriod, OrderedSeries, Row, Table};
use datewise::grouping::{group_by_calendar, GroupBy, GroupSummary};
use datewise::transform::window_delta;
use proptest::prelude::*;

/// Build a series whose dates advance by the given gaps (in days).
fn make_series(gaps: &[i64], values: &[f64]) -> OrderedSeries {
    let start = NaiveDate::from_ymd_opt(2017, 12, 31).unwrap();
    let mut date = start;
    let dates: Vec<NaiveDate> = gaps
        .iter()
        .map(|gap| {
            date += Duration::days(*gap);
            date
        })
        .collect();
    OrderedSeries::from_values(dates, values.to_vec()).unwrap()
}

/// Strategy for (gaps, values) pairs of equal length.
fn series_strategy(min_len: usize, max_len: usize) -> impl Strategy<Value = OrderedSeries> {
    (min_len..max_len).prop_flat_map(|len| {
        (
            prop::collection::vec(1i64..4, len),
            prop::collection::vec(50.0..120.0_f64, len),
        )
            .prop_map(|(gaps, values)| make_series(&gaps, &values))
    })
}

fn table_strategy(min_len: usize, max_len: usize) -> impl Strategy<Value = Table> {
    series_strategy(min_len, max_len).prop_map(|series| {
        let change = series.amount_change(1).unwrap();
        Table::from_series("Weight", &series)
            .with_series("AmountChange", &change)
            .unwrap()
    })
}

fn weekday_key(row: &Row<'_>) -> datewise::Result<u32> {
    Ok(CalendarPeriod::Weekday.key(row.date()))
}

fn value(series: &OrderedSeries, i: usize) -> f64 {
    series.values()[i].unwrap()
}

// =============================================================================
// Property: moving averages
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn sma_length_and_alignment(
        (series, window) in series_strategy(1, 60)
            .prop_flat_map(|s| { let n = s.len(); (Just(s), 1..=n) })
    ) {
        let averaged = series.sma(window).unwrap();
        prop_assert_eq!(averaged.len(), series.len() - window + 1);

        for (i, point) in averaged.iter().enumerate() {
            let end = i + window - 1;
            prop_assert_eq!(point.date, series.dates()[end]);
            let expected = (i..=end).map(|j| value(&series, j)).sum::<f64>() / window as f64;
            prop_assert!((point.value.unwrap() - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn window_count_matches_length(
        series in series_strategy(0, 40),
        size in 1usize..50
    ) {
        let expected = (series.len() + 1).saturating_sub(size);
        prop_assert_eq!(series.window(size).unwrap().count(), expected);
        prop_assert_eq!(series.select_windows(size, window_delta).unwrap().len(), expected);
    }
}

// =============================================================================
// Property: lagged changes
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn amount_change_matches_lagged_difference(
        series in series_strategy(1, 60),
        lag in 1usize..10
    ) {
        let change = series.amount_change(lag).unwrap();
        prop_assert_eq!(change.len(), series.len().saturating_sub(lag));

        for (i, point) in change.iter().enumerate() {
            prop_assert_eq!(point.date, series.dates()[i + lag]);
            let expected = value(&series, i + lag) - value(&series, i);
            prop_assert!((point.value.unwrap() - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn percent_change_is_missing_only_on_zero_baseline(
        values in prop::collection::vec(prop_oneof![Just(0.0), -10.0..10.0_f64], 2..40),
        lag in 1usize..5
    ) {
        let gaps = vec![1; values.len()];
        let series = make_series(&gaps, &values);
        let change = series.percent_change(lag).unwrap();

        for (i, point) in change.iter().enumerate() {
            prop_assert_eq!(point.value.is_none(), values[i] == 0.0);
        }
    }
}

// =============================================================================
// Property: positional accessors
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn skip_zero_and_head_are_idempotent(
        series in series_strategy(0, 40),
        n in 0usize..50
    ) {
        prop_assert_eq!(series.skip(0), series.clone());
        let head = series.head(n);
        prop_assert_eq!(head.head(n), head.clone());
        prop_assert_eq!(head.len() + series.skip(n).len(), series.len());
    }

    #[test]
    fn attached_average_aligns_to_table(
        (series, window) in series_strategy(1, 40)
            .prop_flat_map(|s| { let n = s.len(); (Just(s), 1..=n) })
    ) {
        let averaged = series.sma(window).unwrap();
        let table = Table::from_series("Weight", &series)
            .with_series("Average", &averaged)
            .unwrap();
        let column = table.column("Average").unwrap();

        prop_assert!(column[..window - 1].iter().all(Option::is_none));
        prop_assert_eq!(&column[window - 1..], averaged.values());
    }
}

// =============================================================================
// Property: grouping
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    #[test]
    fn regrouping_reproduces_bucket_membership(table in table_strategy(1, 60)) {
        let groups = GroupBy::partition(&table, weekday_key).unwrap();

        // Every row lands in exactly one bucket
        let mut positions: Vec<usize> =
            groups.buckets().iter().flat_map(|b| b.positions().to_vec()).collect();
        positions.sort_unstable();
        prop_assert_eq!(positions, (0..table.len()).collect::<Vec<_>>());

        for bucket in groups.buckets() {
            let regrouped = GroupBy::partition(bucket.table(), weekday_key).unwrap();
            prop_assert_eq!(regrouped.len(), 1);
            prop_assert_eq!(regrouped.buckets()[0].key(), bucket.key());
            prop_assert_eq!(regrouped.buckets()[0].dates(), bucket.dates());
        }

        let summary = groups
            .summarize(|bucket| {
                Ok(GroupSummary::new(*bucket.key(), "", bucket.len() as f64))
            })
            .unwrap();
        let mut summary_keys: Vec<u32> = summary.keys().copied().collect();
        let mut bucket_keys: Vec<u32> = groups.buckets().iter().map(|b| *b.key()).collect();
        summary_keys.sort_unstable();
        bucket_keys.sort_unstable();
        prop_assert_eq!(summary_keys, bucket_keys);
    }

    #[test]
    fn calendar_summary_is_sorted_by_key(table in table_strategy(1, 120)) {
        for period in [CalendarPeriod::Weekday, CalendarPeriod::Month] {
            let summary = group_by_calendar(&table, period, |group| {
                Ok(group.len() as f64)
            })
            .unwrap();

            let keys: Vec<u32> = summary.keys().copied().collect();
            prop_assert!(keys.windows(2).all(|w| w[0] <= w[1]));
            prop_assert!(keys.len() <= period.cardinality());
            prop_assert_eq!(summary.values().sum::<f64>() as usize, table.len());
        }
    }
}
