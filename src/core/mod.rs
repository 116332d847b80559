//! Core data structures: ordered series, tables and calendar keys.

mod calendar;
mod series;
mod table;

pub use calendar::CalendarPeriod;
pub use series::{OrderedSeries, Point};
pub use table::{Row, Table, TableBuilder};
