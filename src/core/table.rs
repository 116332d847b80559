//! Named columns sharing one date index.

use crate::core::series::{validate_index, OrderedSeries};
use crate::error::{FrameError, Result};
use chrono::NaiveDate;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
struct Column {
    name: String,
    values: Vec<Option<f64>>,
}

/// A set of named numeric columns over one strictly increasing date index.
///
/// Columns store only values, so every column shares the table's index by
/// construction. Column order is insertion order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    dates: Vec<NaiveDate>,
    columns: Vec<Column>,
}

/// Builder for constructing a Table.
#[derive(Debug, Clone, Default)]
pub struct TableBuilder {
    dates: Vec<NaiveDate>,
    columns: Vec<(String, Vec<Option<f64>>)>,
}

impl TableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dates(mut self, dates: Vec<NaiveDate>) -> Self {
        self.dates = dates;
        self
    }

    /// Add a column that may contain missing values.
    pub fn column(mut self, name: impl Into<String>, values: Vec<Option<f64>>) -> Self {
        self.columns.push((name.into(), values));
        self
    }

    /// Add a column where every value is present.
    pub fn values(self, name: impl Into<String>, values: Vec<f64>) -> Self {
        self.column(name, values.into_iter().map(Some).collect())
    }

    pub fn build(self) -> Result<Table> {
        Table::from_columns(self.dates, self.columns)
    }
}

impl Table {
    /// Create a table with an index and no columns.
    pub fn new(dates: Vec<NaiveDate>) -> Result<Self> {
        validate_index(&dates)?;
        Ok(Self {
            dates,
            columns: Vec::new(),
        })
    }

    pub fn builder() -> TableBuilder {
        TableBuilder::new()
    }

    /// Create a table whose columns must each match the index length exactly.
    pub fn from_columns(
        dates: Vec<NaiveDate>,
        columns: Vec<(String, Vec<Option<f64>>)>,
    ) -> Result<Self> {
        let mut table = Self::new(dates)?;
        for (name, values) in columns {
            if table.has_column(&name) {
                return Err(FrameError::DuplicateColumn(name));
            }
            table.push_column(name, values)?;
        }
        Ok(table)
    }

    /// A single-column table over the series' index.
    pub fn from_series(name: impl Into<String>, series: &OrderedSeries) -> Self {
        Self {
            dates: series.dates().to_vec(),
            columns: vec![Column {
                name: name.into(),
                values: series.values().to_vec(),
            }],
        }
    }

    fn push_column(&mut self, name: String, values: Vec<Option<f64>>) -> Result<()> {
        if values.len() != self.dates.len() {
            return Err(FrameError::IndexMismatch {
                expected: self.dates.len(),
                got: values.len(),
            });
        }
        match self.columns.iter_mut().find(|c| c.name == name) {
            Some(existing) => existing.values = values,
            None => self.columns.push(Column { name, values }),
        }
        Ok(())
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c.name == name)
    }

    /// Raw values of a column.
    pub fn column(&self, name: &str) -> Result<&[Option<f64>]> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.values.as_slice())
            .ok_or_else(|| FrameError::UnknownColumn(name.to_string()))
    }

    /// A column as a standalone series over the table's index.
    pub fn series(&self, name: &str) -> Result<OrderedSeries> {
        let values = self.column(name)?.to_vec();
        Ok(OrderedSeries::from_parts(self.dates.clone(), values))
    }

    /// Attach `series` under `name`, aligned to this table's index.
    ///
    /// Table dates the series does not cover become missing. A series date
    /// outside the table index fails with [`FrameError::IndexNotAligned`].
    /// An existing column with the same name is replaced.
    pub fn with_series(&self, name: impl Into<String>, series: &OrderedSeries) -> Result<Table> {
        let name = name.into();
        let mut aligned = vec![None; self.len()];
        let mut cursor = 0;
        for point in series.iter() {
            while cursor < self.dates.len() && self.dates[cursor] < point.date {
                cursor += 1;
            }
            if cursor == self.dates.len() || self.dates[cursor] != point.date {
                return Err(FrameError::IndexNotAligned(point.date));
            }
            aligned[cursor] = point.value;
            cursor += 1;
        }

        log::debug!(
            "attaching column {name:?}: {} of {} rows covered",
            series.len(),
            self.len()
        );

        let mut table = self.clone();
        table.push_column(name, aligned)?;
        Ok(table)
    }

    /// Attach a column that must match the index length exactly.
    pub fn with_column(&self, name: impl Into<String>, values: Vec<Option<f64>>) -> Result<Table> {
        let mut table = self.clone();
        table.push_column(name.into(), values)?;
        Ok(table)
    }

    /// Table restricted to the given row positions, in the order given.
    pub(crate) fn select_positions(&self, positions: &[usize]) -> Table {
        let dates = positions.iter().map(|&i| self.dates[i]).collect();
        let columns = self
            .columns
            .iter()
            .map(|c| Column {
                name: c.name.clone(),
                values: positions.iter().map(|&i| c.values[i]).collect(),
            })
            .collect();
        Table { dates, columns }
    }

    fn slice(&self, start: usize, end: usize) -> Table {
        Table {
            dates: self.dates[start..end].to_vec(),
            columns: self
                .columns
                .iter()
                .map(|c| Column {
                    name: c.name.clone(),
                    values: c.values[start..end].to_vec(),
                })
                .collect(),
        }
    }

    /// The first `n` rows.
    pub fn head(&self, n: usize) -> Table {
        self.slice(0, n.min(self.len()))
    }

    /// Drop the first `n` rows.
    pub fn skip(&self, n: usize) -> Table {
        self.slice(n.min(self.len()), self.len())
    }

    pub fn row(&self, position: usize) -> Option<Row<'_>> {
        (position < self.len()).then_some(Row {
            table: self,
            position,
        })
    }

    pub fn first_row(&self) -> Result<Row<'_>> {
        self.row(0).ok_or(FrameError::EmptyCollection)
    }

    pub fn last_row(&self) -> Result<Row<'_>> {
        self.len()
            .checked_sub(1)
            .and_then(|i| self.row(i))
            .ok_or(FrameError::EmptyCollection)
    }

    /// Rows in index order.
    pub fn rows(&self) -> impl ExactSizeIterator<Item = Row<'_>> {
        (0..self.len()).map(move |position| Row {
            table: self,
            position,
        })
    }
}

/// Borrowed view of one table row.
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    table: &'a Table,
    position: usize,
}

impl<'a> Row<'a> {
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn date(&self) -> NaiveDate {
        self.table.dates[self.position]
    }

    /// Value of `column` in this row.
    pub fn get(&self, column: &str) -> Result<Option<f64>> {
        Ok(self.table.column(column)?[self.position])
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:<12}", "__index__")?;
        for column in &self.columns {
            write!(f, "{:>14}", column.name)?;
        }
        writeln!(f)?;

        for (i, date) in self.dates.iter().enumerate() {
            write!(f, "{:<12}", date.to_string())?;
            for column in &self.columns {
                match column.values[i] {
                    Some(v) => write!(f, "{v:>14}")?,
                    None => write!(f, "{:>14}", "")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
