//! # datewise
//!
//! Date-indexed series and table engine.
//!
//! Provides an immutable ordered series keyed by calendar date, a table of
//! named columns sharing one index, sliding-window reductions (moving
//! averages, windowed deltas), lagged amount and percent changes, and
//! calendar group-and-summarize. Rendering stays outside the crate behind
//! the [`chart::Renderer`] trait.

pub mod chart;
pub mod core;
pub mod error;
pub mod grouping;
pub mod report;
pub mod transform;

pub use error::{FrameError, Result};

pub mod prelude {
    pub use crate::chart::{ChartData, ChartSpec, ChartType, Renderer};
    pub use crate::core::{CalendarPeriod, OrderedSeries, Point, Table};
    pub use crate::error::{FrameError, Result};
    pub use crate::grouping::{
        group_by_calendar, group_by_calendar_ordered, Aggregate, GroupBy, GroupOrder, GroupSummary,
        SummaryTable,
    };
    pub use crate::report::{Report, ReportConfig, TrendSummary};
    pub use crate::transform::{window_delta, Window};
}
