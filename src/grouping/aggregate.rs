//! Column aggregates for summarizing a group's sub-table.

use crate::core::Table;
use crate::error::Result;

/// Named column aggregate, for choosing a summarizer from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Aggregate {
    /// Last present value minus first present value.
    NetChange,
    /// Mean of present values.
    #[default]
    Mean,
    /// Sum of present values.
    Sum,
}

impl Aggregate {
    pub fn apply(self, table: &Table, column: &str) -> Result<f64> {
        match self {
            Aggregate::NetChange => net_change(table, column),
            Aggregate::Mean => mean_of(table, column),
            Aggregate::Sum => sum_of(table, column),
        }
    }
}

/// Net change of `column` across the table's date span.
pub fn net_change(table: &Table, column: &str) -> Result<f64> {
    table.series(column)?.net_change()
}

/// Mean of the present values of `column`.
pub fn mean_of(table: &Table, column: &str) -> Result<f64> {
    table.series(column)?.present().average()
}

/// Sum of the present values of `column`.
pub fn sum_of(table: &Table, column: &str) -> Result<f64> {
    Ok(table.series(column)?.sum())
}
