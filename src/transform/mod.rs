//! Series transformations: sliding windows, moving averages and lagged changes.
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use datewise::core::OrderedSeries;
//! use datewise::transform::window_delta;
//!
//! let dates: Vec<NaiveDate> = (1..=4)
//!     .map(|d| NaiveDate::from_ymd_opt(2018, 1, d).unwrap())
//!     .collect();
//! let weight = OrderedSeries::from_values(dates, vec![70.0, 71.0, 69.0, 70.0]).unwrap();
//!
//! // Two-day moving average
//! let average = weight.sma(2).unwrap();
//! assert_eq!(average.len(), 3);
//!
//! // Day-over-day change
//! let change = weight.amount_change(1).unwrap();
//! assert_eq!(change.values()[1], Some(-2.0));
//!
//! // Net change across each three-day window
//! let deltas = weight.select_windows(3, window_delta).unwrap();
//! assert_eq!(deltas.len(), 2);
//! ```

pub mod change;
pub mod window;

pub use window::{select_windows, window_delta, Window, Windows};
