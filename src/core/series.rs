//! Ordered, date-indexed series of optional numeric values.

use crate::error::{FrameError, Result};
use chrono::NaiveDate;
use std::fmt;

/// One observation: a date and a value that may be missing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub date: NaiveDate,
    pub value: Option<f64>,
}

impl Point {
    pub fn new(date: NaiveDate, value: Option<f64>) -> Self {
        Self { date, value }
    }

    pub fn present(date: NaiveDate, value: f64) -> Self {
        Self {
            date,
            value: Some(value),
        }
    }

    pub fn missing(date: NaiveDate) -> Self {
        Self { date, value: None }
    }

    pub fn is_missing(&self) -> bool {
        self.value.is_none()
    }
}

/// An immutable series of (date, value) pairs with a strictly increasing index.
///
/// Gaps between dates are legal and preserved. Every operator returns a new
/// series; nothing mutates in place.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OrderedSeries {
    dates: Vec<NaiveDate>,
    values: Vec<Option<f64>>,
}

/// Check that `dates` is strictly increasing.
pub(crate) fn validate_index(dates: &[NaiveDate]) -> Result<()> {
    for i in 1..dates.len() {
        if dates[i] <= dates[i - 1] {
            return Err(FrameError::UnorderedIndex { position: i });
        }
    }
    Ok(())
}

impl OrderedSeries {
    /// Create a series from parallel date and value vectors.
    pub fn new(dates: Vec<NaiveDate>, values: Vec<Option<f64>>) -> Result<Self> {
        if dates.len() != values.len() {
            return Err(FrameError::IndexMismatch {
                expected: dates.len(),
                got: values.len(),
            });
        }
        validate_index(&dates)?;
        Ok(Self { dates, values })
    }

    /// Create a series where every value is present.
    pub fn from_values(dates: Vec<NaiveDate>, values: Vec<f64>) -> Result<Self> {
        Self::new(dates, values.into_iter().map(Some).collect())
    }

    /// Create a series from points, which must already be in date order.
    pub fn from_points<I>(points: I) -> Result<Self>
    where
        I: IntoIterator<Item = Point>,
    {
        let (dates, values) = points.into_iter().map(|p| (p.date, p.value)).unzip();
        Self::new(dates, values)
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Build from parts that are already known to satisfy the index invariant.
    pub(crate) fn from_parts(dates: Vec<NaiveDate>, values: Vec<Option<f64>>) -> Self {
        debug_assert_eq!(dates.len(), values.len());
        debug_assert!(validate_index(&dates).is_ok());
        Self { dates, values }
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// The index of the series.
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Values in index order; `None` marks a missing value.
    pub fn values(&self) -> &[Option<f64>] {
        &self.values
    }

    /// Point at a position.
    pub fn point(&self, position: usize) -> Option<Point> {
        Some(Point::new(
            *self.dates.get(position)?,
            *self.values.get(position)?,
        ))
    }

    /// Point stored under `date`.
    pub fn get(&self, date: NaiveDate) -> Option<Point> {
        let position = self.dates.binary_search(&date).ok()?;
        self.point(position)
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = Point> + '_ {
        self.dates
            .iter()
            .zip(&self.values)
            .map(|(&date, &value)| Point::new(date, value))
    }

    /// Present values in index order.
    pub fn present_values(&self) -> impl Iterator<Item = f64> + '_ {
        self.values.iter().filter_map(|v| *v)
    }

    pub fn first(&self) -> Result<Point> {
        self.point(0).ok_or(FrameError::EmptyCollection)
    }

    pub fn last(&self) -> Result<Point> {
        self.len()
            .checked_sub(1)
            .and_then(|i| self.point(i))
            .ok_or(FrameError::EmptyCollection)
    }

    /// The first `n` pairs (the whole series when `n >= len`).
    pub fn head(&self, n: usize) -> OrderedSeries {
        let n = n.min(self.len());
        Self::from_parts(self.dates[..n].to_vec(), self.values[..n].to_vec())
    }

    /// Drop the first `n` pairs.
    pub fn skip(&self, n: usize) -> OrderedSeries {
        let n = n.min(self.len());
        Self::from_parts(self.dates[n..].to_vec(), self.values[n..].to_vec())
    }

    /// Keep the pairs satisfying `predicate`, preserving relative order.
    pub fn filter<P>(&self, mut predicate: P) -> OrderedSeries
    where
        P: FnMut(&Point) -> bool,
    {
        let (dates, values) = self
            .iter()
            .filter(|p| predicate(p))
            .map(|p| (p.date, p.value))
            .unzip();
        Self::from_parts(dates, values)
    }

    /// Drop missing values.
    pub fn present(&self) -> OrderedSeries {
        self.filter(|p| !p.is_missing())
    }

    /// Sum of the present values; zero when there are none.
    pub fn sum(&self) -> f64 {
        self.present_values().sum()
    }

    /// Mean of the present values.
    pub fn average(&self) -> Result<f64> {
        let (sum, count) = self
            .present_values()
            .fold((0.0, 0usize), |(s, c), v| (s + v, c + 1));
        if count == 0 {
            return Err(FrameError::EmptyCollection);
        }
        Ok(sum / count as f64)
    }

    /// Whole days between the first and last index entries.
    pub fn span_days(&self) -> Result<i64> {
        let first = self.first()?.date;
        let last = self.last()?.date;
        Ok(last.signed_duration_since(first).num_days())
    }

    /// Last present value minus first present value.
    pub fn net_change(&self) -> Result<f64> {
        let first = self.present_values().next();
        let last = self.values.iter().rev().find_map(|v| *v);
        match (first, last) {
            (Some(first), Some(last)) => Ok(last - first),
            _ => Err(FrameError::EmptyCollection),
        }
    }
}

impl fmt::Display for OrderedSeries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:<12}{:>14}", "__index__", "__value__")?;
        for point in self.iter() {
            match point.value {
                Some(v) => writeln!(f, "{:<12}{:>14}", point.date.to_string(), v)?,
                None => writeln!(f, "{:<12}{:>14}", point.date.to_string(), "")?,
            }
        }
        Ok(())
    }
}
