//! Declarative chart configuration and the rendering boundary.
//!
//! The library never draws anything. A [`ChartSpec`] names the chart kind
//! and which columns feed each axis; binding it to a series, table or
//! summary yields [`ChartData`], which a [`Renderer`] turns into whatever
//! artefact it produces.

use crate::core::{OrderedSeries, Table};
use crate::error::{FrameError, Result};
use crate::grouping::SummaryTable;
use chrono::NaiveDate;

/// Axis name that addresses a table's or series' date index.
pub const INDEX_AXIS: &str = "Date";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ChartType {
    #[default]
    Line,
    Bar,
}

/// Chart kind plus axis bindings.
///
/// An unset `x` binds the date index (or a summary's label column); an
/// empty `y` binds every value column.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChartSpec {
    pub chart_type: ChartType,
    pub x: Option<String>,
    pub y: Vec<String>,
}

impl ChartSpec {
    pub fn new(chart_type: ChartType) -> Self {
        Self {
            chart_type,
            ..Self::default()
        }
    }

    pub fn line() -> Self {
        Self::new(ChartType::Line)
    }

    pub fn bar() -> Self {
        Self::new(ChartType::Bar)
    }

    pub fn x(mut self, column: impl Into<String>) -> Self {
        self.x = Some(column.into());
        self
    }

    /// Bind a single y column, replacing any previous y bindings.
    pub fn y(mut self, column: impl Into<String>) -> Self {
        self.y = vec![column.into()];
        self
    }

    /// Bind several y columns.
    pub fn ys<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.y = columns.into_iter().map(Into::into).collect();
        self
    }

    /// Resolve the bindings against a table.
    pub fn bind_table(&self, table: &Table) -> Result<ChartData> {
        let x_name = self.x.as_deref().unwrap_or(INDEX_AXIS);
        let x: Vec<AxisValue> = if table.has_column(x_name) {
            table
                .column(x_name)?
                .iter()
                .map(|v| AxisValue::Number(*v))
                .collect()
        } else if x_name == INDEX_AXIS {
            table.dates().iter().map(|d| AxisValue::Date(*d)).collect()
        } else {
            return Err(FrameError::UnknownColumn(x_name.to_string()));
        };

        let names: Vec<String> = if self.y.is_empty() {
            table
                .column_names()
                .filter(|name| *name != x_name)
                .map(str::to_string)
                .collect()
        } else {
            self.y.clone()
        };
        let y = names
            .into_iter()
            .map(|name| -> Result<AxisSeries> {
                let values = table.column(&name)?.to_vec();
                Ok(AxisSeries { name, values })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(ChartData {
            x_name: x_name.to_string(),
            x,
            y,
        })
    }

    /// Resolve the bindings against a single named series.
    pub fn bind_series(&self, name: &str, series: &OrderedSeries) -> Result<ChartData> {
        self.bind_table(&Table::from_series(name, series))
    }

    /// Resolve the bindings against a group summary.
    pub fn bind_summary<K>(&self, summary: &SummaryTable<K>) -> Result<ChartData> {
        let x_name = self.x.as_deref().unwrap_or(summary.label_column());
        if x_name != summary.label_column() {
            return Err(FrameError::UnknownColumn(x_name.to_string()));
        }
        if let Some(unknown) = self.y.iter().find(|y| *y != summary.value_column()) {
            return Err(FrameError::UnknownColumn(unknown.clone()));
        }

        Ok(ChartData {
            x_name: x_name.to_string(),
            x: summary
                .labels()
                .map(|l| AxisValue::Label(l.to_string()))
                .collect(),
            y: vec![AxisSeries {
                name: summary.value_column().to_string(),
                values: summary.values().map(Some).collect(),
            }],
        })
    }
}

/// One x-axis position.
#[derive(Debug, Clone, PartialEq)]
pub enum AxisValue {
    Date(NaiveDate),
    Label(String),
    Number(Option<f64>),
}

/// One plotted y column.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisSeries {
    pub name: String,
    pub values: Vec<Option<f64>>,
}

/// Renderer-neutral chart contents.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartData {
    pub x_name: String,
    pub x: Vec<AxisValue>,
    pub y: Vec<AxisSeries>,
}

impl ChartData {
    /// Number of x positions.
    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn series(&self, name: &str) -> Option<&AxisSeries> {
        self.y.iter().find(|s| s.name == name)
    }
}

/// Consumer of bound chart data (image writer, web exporter, ...).
pub trait Renderer {
    type Error: From<FrameError>;

    /// Render one chart; `title` identifies the artefact.
    fn render(
        &mut self,
        title: &str,
        spec: &ChartSpec,
        data: &ChartData,
    ) -> std::result::Result<(), Self::Error>;
}
