//! Lagged change operators.
//!
//! Both operators date each output at the later of the two compared points
//! and drop the first `lag` positions, so the output has `len - lag` points.

use crate::core::OrderedSeries;
use crate::error::{FrameError, Result};

fn lagged<F>(series: &OrderedSeries, lag: usize, f: F) -> Result<OrderedSeries>
where
    F: Fn(f64, f64) -> Option<f64>,
{
    if lag == 0 {
        return Err(FrameError::InvalidArgument(
            "lag must be positive".to_string(),
        ));
    }
    if lag >= series.len() {
        return Ok(OrderedSeries::empty());
    }

    let values = series.values();
    let changes = values[lag..]
        .iter()
        .zip(values)
        .map(|(&current, &base)| match (base, current) {
            (Some(base), Some(current)) => f(base, current),
            _ => None,
        })
        .collect();

    Ok(OrderedSeries::from_parts(
        series.dates()[lag..].to_vec(),
        changes,
    ))
}

impl OrderedSeries {
    /// `value[i] - value[i - lag]`, missing when either side is missing.
    pub fn amount_change(&self, lag: usize) -> Result<OrderedSeries> {
        lagged(self, lag, |base, current| Some(current - base))
    }

    /// `(value[i] - value[i - lag]) / value[i - lag] * 100`.
    ///
    /// A zero baseline has no defined percentage and yields a missing value,
    /// as does a missing operand. Drop those with [`OrderedSeries::present`]
    /// before aggregating.
    pub fn percent_change(&self, lag: usize) -> Result<OrderedSeries> {
        lagged(self, lag, |base, current| {
            if base == 0.0 {
                None
            } else {
                Some((current - base) / base * 100.0)
            }
        })
    }
}
