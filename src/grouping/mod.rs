//! Group-and-summarize over tables.
//!
//! Grouping runs in two phases. [`GroupBy::partition`] walks the rows in
//! index order and appends each to the bucket for its key, creating buckets
//! on first sight; bucket row order is the table's row order.
//! [`GroupBy::summarize`] then reduces every bucket to one [`GroupSummary`].
//! Bucket order follows first occurrence in the data, which is generally not
//! calendar order, so the resulting [`SummaryTable`] is usually finished
//! with [`SummaryTable::sort_by_key`].
//!
//! A failing key function or summarizer aborts the whole grouping with
//! [`FrameError::Grouping`]; no partial summaries are returned.

pub mod aggregate;

use crate::core::{CalendarPeriod, Row, Table};
use crate::error::{FrameError, Result};
use chrono::NaiveDate;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

pub use aggregate::{mean_of, net_change, sum_of, Aggregate};

/// Rows of one group, kept as a sub-table in original row order.
#[derive(Debug, Clone, PartialEq)]
pub struct Bucket<K> {
    key: K,
    positions: Vec<usize>,
    table: Table,
}

impl<K> Bucket<K> {
    pub fn key(&self) -> &K {
        &self.key
    }

    /// Row positions in the source table.
    pub fn positions(&self) -> &[usize] {
        &self.positions
    }

    /// The group's rows as a table.
    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn dates(&self) -> &[NaiveDate] {
        self.table.dates()
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// Partitioned table awaiting reduction.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupBy<K> {
    buckets: Vec<Bucket<K>>,
}

impl<K> GroupBy<K>
where
    K: Eq + Hash + Clone,
{
    /// Split `table` into buckets keyed by `key_fn`.
    pub fn partition<F>(table: &Table, mut key_fn: F) -> Result<Self>
    where
        F: FnMut(&Row<'_>) -> Result<K>,
    {
        let mut slots: HashMap<K, usize> = HashMap::new();
        let mut groups: Vec<(K, Vec<usize>)> = Vec::new();

        for row in table.rows() {
            let key = key_fn(&row).map_err(FrameError::grouping)?;
            let slot = *slots.entry(key.clone()).or_insert_with(|| {
                groups.push((key, Vec::new()));
                groups.len() - 1
            });
            groups[slot].1.push(row.position());
        }

        log::debug!(
            "partitioned {} rows into {} groups",
            table.len(),
            groups.len()
        );

        let buckets = groups
            .into_iter()
            .map(|(key, positions)| Bucket {
                table: table.select_positions(&positions),
                key,
                positions,
            })
            .collect();
        Ok(Self { buckets })
    }

    /// Buckets in order of first occurrence.
    pub fn buckets(&self) -> &[Bucket<K>] {
        &self.buckets
    }

    pub fn get(&self, key: &K) -> Option<&Bucket<K>> {
        self.buckets.iter().find(|b| &b.key == key)
    }

    /// Number of groups.
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Reduce each bucket to one summary record.
    pub fn summarize<F>(&self, mut summarizer: F) -> Result<SummaryTable<K>>
    where
        F: FnMut(&Bucket<K>) -> Result<GroupSummary<K>>,
    {
        let rows = self
            .buckets
            .iter()
            .map(|bucket| summarizer(bucket).map_err(FrameError::grouping))
            .collect::<Result<Vec<_>>>()?;
        Ok(SummaryTable::new(rows))
    }
}

/// One output row of a grouping.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupSummary<K> {
    pub key: K,
    pub label: String,
    pub value: f64,
}

impl<K> GroupSummary<K> {
    pub fn new(key: K, label: impl Into<String>, value: f64) -> Self {
        Self {
            key,
            label: label.into(),
            value,
        }
    }
}

pub const DEFAULT_LABEL_COLUMN: &str = "Label";
pub const DEFAULT_VALUE_COLUMN: &str = "Value";

/// Group summaries collected into a two-column table (label, value).
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryTable<K> {
    label_column: String,
    value_column: String,
    rows: Vec<GroupSummary<K>>,
}

impl<K> SummaryTable<K> {
    pub fn new(rows: Vec<GroupSummary<K>>) -> Self {
        Self {
            label_column: DEFAULT_LABEL_COLUMN.to_string(),
            value_column: DEFAULT_VALUE_COLUMN.to_string(),
            rows,
        }
    }

    /// Rename the label and value columns.
    pub fn with_column_names(
        mut self,
        label_column: impl Into<String>,
        value_column: impl Into<String>,
    ) -> Self {
        self.label_column = label_column.into();
        self.value_column = value_column.into();
        self
    }

    /// Order rows ascending by a key derived from each group key.
    ///
    /// The sort is stable: rows with equal sort keys keep bucket order.
    pub fn sort_by_key<S, F>(mut self, mut sort_key: F) -> Self
    where
        S: Ord,
        F: FnMut(&K) -> S,
    {
        self.rows.sort_by_key(|row| sort_key(&row.key));
        self
    }

    pub fn label_column(&self) -> &str {
        &self.label_column
    }

    pub fn value_column(&self) -> &str {
        &self.value_column
    }

    pub fn rows(&self) -> &[GroupSummary<K>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.rows.iter().map(|r| &r.key)
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().map(|r| r.label.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.rows.iter().map(|r| r.value)
    }

    /// Value recorded under `label`.
    pub fn value_for(&self, label: &str) -> Option<f64> {
        self.rows.iter().find(|r| r.label == label).map(|r| r.value)
    }
}

impl<K> fmt::Display for SummaryTable<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:<12}{:>14}", self.label_column, self.value_column)?;
        for row in &self.rows {
            writeln!(f, "{:<12}{:>14}", row.label, row.value)?;
        }
        Ok(())
    }
}

/// Row order of a calendar summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GroupOrder {
    /// Ascending calendar index (Sunday first, January first).
    #[default]
    CalendarIndex,
    /// Order of first occurrence, which over an ascending index is
    /// chronological: a December-to-July span starts with December.
    FirstSeen,
}

/// Group rows by a calendar period and reduce each group with `aggregate`.
///
/// Each summary is labelled with the period name of the group's first row
/// and the table is sorted by calendar index.
pub fn group_by_calendar<F>(
    table: &Table,
    period: CalendarPeriod,
    aggregate: F,
) -> Result<SummaryTable<u32>>
where
    F: FnMut(&Table) -> Result<f64>,
{
    group_by_calendar_ordered(table, period, GroupOrder::CalendarIndex, aggregate)
}

/// [`group_by_calendar`] with an explicit row order.
pub fn group_by_calendar_ordered<F>(
    table: &Table,
    period: CalendarPeriod,
    order: GroupOrder,
    mut aggregate: F,
) -> Result<SummaryTable<u32>>
where
    F: FnMut(&Table) -> Result<f64>,
{
    let groups = GroupBy::partition(table, |row| Ok(period.key(row.date())))?;
    let summary = groups.summarize(|bucket| {
        let first = bucket.table().first_row()?.date();
        let value = aggregate(bucket.table())?;
        Ok(GroupSummary::new(*bucket.key(), period.label(first), value))
    })?;
    Ok(match order {
        GroupOrder::CalendarIndex => summary.sort_by_key(|key| *key),
        GroupOrder::FirstSeen => summary,
    })
}
