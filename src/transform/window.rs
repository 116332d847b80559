//! Sliding windows over an ordered series.
//!
//! A [`Window`] is a borrowed view of `size` consecutive points. Windows slide
//! by one position, so a series of length `n` yields `n - size + 1` of them.
//! Reducing every window to one point produces a new series aligned to the
//! windows' last dates.

use crate::core::{OrderedSeries, Point};
use crate::error::{FrameError, Result};
use chrono::NaiveDate;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Read-only view of consecutive points of a series.
#[derive(Debug, Clone, Copy)]
pub struct Window<'a> {
    offset: usize,
    dates: &'a [NaiveDate],
    values: &'a [Option<f64>],
}

impl<'a> Window<'a> {
    fn at(series: &'a OrderedSeries, offset: usize, size: usize) -> Self {
        Self {
            offset,
            dates: &series.dates()[offset..offset + size],
            values: &series.values()[offset..offset + size],
        }
    }

    /// Position of the window's first point in the base series.
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn dates(&self) -> &'a [NaiveDate] {
        self.dates
    }

    pub fn values(&self) -> &'a [Option<f64>] {
        self.values
    }

    pub fn first(&self) -> Result<Point> {
        match (self.dates.first(), self.values.first()) {
            (Some(&date), Some(&value)) => Ok(Point::new(date, value)),
            _ => Err(FrameError::EmptyCollection),
        }
    }

    pub fn last(&self) -> Result<Point> {
        match (self.dates.last(), self.values.last()) {
            (Some(&date), Some(&value)) => Ok(Point::new(date, value)),
            _ => Err(FrameError::EmptyCollection),
        }
    }

    /// Mean of the window, or `None` if any value is missing.
    pub fn mean(&self) -> Option<f64> {
        if self.values.is_empty() {
            return None;
        }
        let sum = self
            .values
            .iter()
            .try_fold(0.0, |acc, v| v.map(|x| acc + x))?;
        Some(sum / self.values.len() as f64)
    }

    /// Copy the window out as a standalone series.
    pub fn to_series(&self) -> OrderedSeries {
        OrderedSeries::from_parts(self.dates.to_vec(), self.values.to_vec())
    }
}

/// Iterator over the windows of a series.
#[derive(Debug, Clone)]
pub struct Windows<'a> {
    series: &'a OrderedSeries,
    size: usize,
    next: usize,
}

fn window_count(len: usize, size: usize) -> usize {
    (len + 1).saturating_sub(size)
}

impl<'a> Iterator for Windows<'a> {
    type Item = Window<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= window_count(self.series.len(), self.size) {
            return None;
        }
        let window = Window::at(self.series, self.next, self.size);
        self.next += 1;
        Some(window)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = window_count(self.series.len(), self.size).saturating_sub(self.next);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Windows<'_> {}

/// Reduce every window of `size` points to one point.
///
/// Each reduction reads only its own window, so the windows are evaluated
/// on the rayon pool and the reducer must be `Sync`. The reduced points must
/// come out in strictly increasing date order.
#[cfg(feature = "parallel")]
pub fn select_windows<F>(series: &OrderedSeries, size: usize, reducer: F) -> Result<OrderedSeries>
where
    F: Fn(&Window<'_>) -> Result<Point> + Sync,
{
    let count = series.window(size)?.len();
    let points = (0..count)
        .into_par_iter()
        .map(|offset| reducer(&Window::at(series, offset, size)))
        .collect::<Result<Vec<_>>>()?;
    OrderedSeries::from_points(points)
}

/// Reduce every window of `size` points to one point.
///
/// The reduced points must come out in strictly increasing date order.
#[cfg(not(feature = "parallel"))]
pub fn select_windows<F>(series: &OrderedSeries, size: usize, reducer: F) -> Result<OrderedSeries>
where
    F: Fn(&Window<'_>) -> Result<Point>,
{
    let points = series
        .window(size)?
        .map(|window| reducer(&window))
        .collect::<Result<Vec<_>>>()?;
    OrderedSeries::from_points(points)
}

/// Net change across a window, dated at the window's last index.
pub fn window_delta(window: &Window<'_>) -> Result<Point> {
    let first = window.first()?;
    let last = window.last()?;
    let delta = match (first.value, last.value) {
        (Some(a), Some(b)) => Some(b - a),
        _ => None,
    };
    Ok(Point::new(last.date, delta))
}

impl OrderedSeries {
    /// Sliding windows of `size` points, one per starting offset.
    ///
    /// Empty when `size` exceeds the series length.
    pub fn window(&self, size: usize) -> Result<Windows<'_>> {
        if size == 0 {
            return Err(FrameError::InvalidArgument(
                "window size must be positive".to_string(),
            ));
        }
        Ok(Windows {
            series: self,
            size,
            next: 0,
        })
    }

    /// See [`select_windows`].
    #[cfg(feature = "parallel")]
    pub fn select_windows<F>(&self, size: usize, reducer: F) -> Result<OrderedSeries>
    where
        F: Fn(&Window<'_>) -> Result<Point> + Sync,
    {
        select_windows(self, size, reducer)
    }

    /// See [`select_windows`].
    #[cfg(not(feature = "parallel"))]
    pub fn select_windows<F>(&self, size: usize, reducer: F) -> Result<OrderedSeries>
    where
        F: Fn(&Window<'_>) -> Result<Point>,
    {
        select_windows(self, size, reducer)
    }

    /// Simple moving average over `window_size` points.
    ///
    /// The first `window_size - 1` positions have no full window and are
    /// dropped. A window containing a missing value averages to missing.
    pub fn sma(&self, window_size: usize) -> Result<OrderedSeries> {
        if window_size == 0 || window_size > self.len() {
            return Err(FrameError::InvalidArgument(format!(
                "window size must be in 1..={}, got {}",
                self.len(),
                window_size
            )));
        }
        select_windows(self, window_size, |window| {
            Ok(Point::new(window.last()?.date, window.mean()))
        })
    }
}
