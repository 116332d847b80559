//! Trend report over one measured column of a dated table.
//!
//! Runs the standard sequence of derivations: a moving average attached
//! back onto the table, overall trend figures, weekly and monthly windowed
//! deltas, a month-grouped net change, a percent-change series and a
//! day-of-week summary of lagged changes. Every intermediate result is kept
//! on the [`Report`] and paired with a chart configuration.

use crate::chart::{ChartData, ChartSpec, Renderer, INDEX_AXIS};
use crate::core::{CalendarPeriod, OrderedSeries, Table};
use crate::error::{FrameError, Result};
use crate::grouping::{
    group_by_calendar, group_by_calendar_ordered, net_change, Aggregate, GroupOrder, SummaryTable,
};
use crate::transform::window_delta;

/// Column names, window sizes and lags used by [`Report::build`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReportConfig {
    /// Measured column.
    pub value_column: String,
    /// Name of the attached moving-average column.
    pub average_column: String,
    /// Name of the attached lagged-change column.
    pub change_column: String,
    pub average_window: usize,
    pub weekly_window: usize,
    pub monthly_window: usize,
    pub change_lag: usize,
    /// Reduction applied to each weekday's changes.
    pub weekday_aggregate: Aggregate,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            value_column: "Weight".to_string(),
            average_column: "Average".to_string(),
            change_column: "AmountChange".to_string(),
            average_window: 30,
            weekly_window: 7,
            monthly_window: 30,
            change_lag: 2,
            weekday_aggregate: Aggregate::Mean,
        }
    }
}

impl ReportConfig {
    pub fn builder() -> ReportConfigBuilder {
        ReportConfigBuilder::new()
    }

    fn validate(&self) -> Result<()> {
        for (name, size) in [
            ("average_window", self.average_window),
            ("weekly_window", self.weekly_window),
            ("monthly_window", self.monthly_window),
            ("change_lag", self.change_lag),
        ] {
            if size == 0 {
                return Err(FrameError::InvalidArgument(format!(
                    "{name} must be positive"
                )));
            }
        }
        if self.average_column == self.value_column || self.change_column == self.value_column {
            return Err(FrameError::DuplicateColumn(self.value_column.clone()));
        }
        Ok(())
    }
}

/// Builder for ReportConfig.
#[derive(Debug, Clone, Default)]
pub struct ReportConfigBuilder {
    config: ReportConfig,
}

impl ReportConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value_column(mut self, name: impl Into<String>) -> Self {
        self.config.value_column = name.into();
        self
    }

    pub fn average_column(mut self, name: impl Into<String>) -> Self {
        self.config.average_column = name.into();
        self
    }

    pub fn change_column(mut self, name: impl Into<String>) -> Self {
        self.config.change_column = name.into();
        self
    }

    pub fn average_window(mut self, size: usize) -> Self {
        self.config.average_window = size;
        self
    }

    pub fn weekly_window(mut self, size: usize) -> Self {
        self.config.weekly_window = size;
        self
    }

    pub fn monthly_window(mut self, size: usize) -> Self {
        self.config.monthly_window = size;
        self
    }

    pub fn change_lag(mut self, lag: usize) -> Self {
        self.config.change_lag = lag;
        self
    }

    pub fn weekday_aggregate(mut self, aggregate: Aggregate) -> Self {
        self.config.weekday_aggregate = aggregate;
        self
    }

    pub fn build(self) -> Result<ReportConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

/// Overall movement of a series between its first and last observations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendSummary {
    /// First value minus last value; positive when the series went down.
    pub total_decrease: f64,
    /// `total_decrease` as a percentage of the first value.
    pub percent_of_start: Option<f64>,
    /// Whole days between the first and last dates.
    pub days: i64,
    /// Average decrease per day; `None` over a zero-day span.
    pub daily_rate: Option<f64>,
    /// Average decrease per seven days; `None` over a zero-day span.
    pub weekly_rate: Option<f64>,
}

impl TrendSummary {
    pub fn from_series(series: &OrderedSeries) -> Result<Self> {
        let total_decrease = -series.net_change()?;
        let start = series
            .present_values()
            .next()
            .ok_or(FrameError::EmptyCollection)?;
        let days = series.span_days()?;

        let percent_of_start = (start != 0.0).then(|| total_decrease / start * 100.0);
        let (daily_rate, weekly_rate) = if days > 0 {
            let days = days as f64;
            (
                Some(total_decrease / days),
                Some(total_decrease / (days / 7.0)),
            )
        } else {
            (None, None)
        };

        Ok(Self {
            total_decrease,
            percent_of_start,
            days,
            daily_rate,
            weekly_rate,
        })
    }
}

/// A chart ready to hand to a [`Renderer`].
#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    pub title: &'static str,
    pub spec: ChartSpec,
    pub data: ChartData,
}

/// All derived artefacts of one report run.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub config: ReportConfig,
    /// Input table as given.
    pub source: Table,
    /// Moving average of the measured column.
    pub average: OrderedSeries,
    /// Source plus the average column, minus the first `average_window` rows.
    pub smoothed: Table,
    pub trend: TrendSummary,
    /// Net change over each `weekly_window`-point window.
    pub weekly_change: OrderedSeries,
    /// Net change over each `monthly_window`-point window.
    pub monthly_change: OrderedSeries,
    /// Net change per calendar month, in order of first occurrence.
    pub monthly_summary: SummaryTable<u32>,
    /// Lagged percentage change of the measured column.
    pub percent_change: OrderedSeries,
    /// Source plus the lagged amount-change column.
    pub with_change: Table,
    /// Aggregated lagged change per weekday, Sunday first. Rows without a
    /// change value are left out, so a weekday seen only in the first
    /// `change_lag` rows has no entry.
    pub day_of_week: SummaryTable<u32>,
}

impl Report {
    /// Derive every report artefact from `table`.
    pub fn build(table: &Table, config: &ReportConfig) -> Result<Self> {
        config.validate()?;
        let value = config.value_column.as_str();
        let series = table.series(value)?;

        let average = series.sma(config.average_window)?;
        let smoothed = table
            .with_series(config.average_column.as_str(), &average)?
            .skip(config.average_window);
        log::debug!(
            "moving average over {} points: {} values",
            config.average_window,
            average.len()
        );

        let trend = TrendSummary::from_series(&series)?;

        let weekly_change = series.select_windows(config.weekly_window, window_delta)?;
        let monthly_change = series.select_windows(config.monthly_window, window_delta)?;
        log::debug!(
            "windowed deltas: {} weekly, {} monthly",
            weekly_change.len(),
            monthly_change.len()
        );

        let monthly_summary = group_by_calendar_ordered(
            table,
            CalendarPeriod::Month,
            GroupOrder::FirstSeen,
            |group| net_change(group, value),
        )?
        .with_column_names("Month", format!("{value}Change"));

        let percent_change = series.percent_change(config.change_lag)?;

        let amount_change = series.amount_change(config.change_lag)?;
        let with_change = table.with_series(config.change_column.as_str(), &amount_change)?;
        let change = config.change_column.as_str();
        let changed: Vec<usize> = with_change
            .column(change)?
            .iter()
            .enumerate()
            .filter_map(|(position, delta)| delta.map(|_| position))
            .collect();
        let changed = with_change.select_positions(&changed);
        let day_of_week = group_by_calendar(&changed, CalendarPeriod::Weekday, |group| {
            config.weekday_aggregate.apply(group, change)
        })?
        .with_column_names("Day", change);
        log::debug!(
            "grouped {} months and {} weekdays",
            monthly_summary.len(),
            day_of_week.len()
        );

        Ok(Self {
            config: config.clone(),
            source: table.clone(),
            average,
            smoothed,
            trend,
            weekly_change,
            monthly_change,
            monthly_summary,
            percent_change,
            with_change,
            day_of_week,
        })
    }

    /// Chart configuration and bound data for every plotted artefact.
    pub fn charts(&self) -> Result<Vec<Chart>> {
        let config = &self.config;
        let value = config.value_column.as_str();

        let mut charts = Vec::with_capacity(9);
        let mut push = |title: &'static str, spec: ChartSpec, data: ChartData| {
            charts.push(Chart { title, spec, data });
        };

        let spec = ChartSpec::line().y(value);
        push("complete-chart", spec.clone(), spec.bind_table(&self.source)?);

        let spec = ChartSpec::line();
        push(
            "moving-average",
            spec.clone(),
            spec.bind_series(&config.average_column, &self.average)?,
        );

        let spec = ChartSpec::line()
            .x(INDEX_AXIS)
            .ys([value, config.average_column.as_str()]);
        push(
            "value-and-average",
            spec.clone(),
            spec.bind_table(&self.smoothed)?,
        );

        let spec = ChartSpec::line();
        push(
            "weekly-change-line",
            spec.clone(),
            spec.bind_series(value, &self.weekly_change)?,
        );

        let spec = ChartSpec::bar();
        push(
            "weekly-change",
            spec.clone(),
            spec.bind_series(value, &self.weekly_change)?,
        );
        push(
            "monthly-change",
            spec.clone(),
            spec.bind_series(value, &self.monthly_change)?,
        );

        let spec = ChartSpec::bar()
            .x(self.monthly_summary.label_column())
            .y(self.monthly_summary.value_column());
        push(
            "monthly-summary",
            spec.clone(),
            spec.bind_summary(&self.monthly_summary)?,
        );

        let spec = ChartSpec::bar();
        push(
            "percent-change",
            spec.clone(),
            spec.bind_series(value, &self.percent_change)?,
        );

        let spec = ChartSpec::bar()
            .x(self.day_of_week.label_column())
            .y(self.day_of_week.value_column());
        push(
            "days-of-week",
            spec.clone(),
            spec.bind_summary(&self.day_of_week)?,
        );

        Ok(charts)
    }

    /// Hand every chart to `renderer`, stopping at the first failure.
    pub fn render_all<R: Renderer>(&self, renderer: &mut R) -> std::result::Result<(), R::Error> {
        for chart in self.charts()? {
            log::debug!("rendering {}", chart.title);
            renderer.render(chart.title, &chart.spec, &chart.data)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;

    fn weight_table(values: &[f64]) -> Table {
        let start = NaiveDate::from_ymd_opt(2018, 1, 1).unwrap();
        let dates = (0..values.len())
            .map(|i| start + chrono::Duration::days(i as i64))
            .collect();
        Table::builder()
            .dates(dates)
            .values("Weight", values.to_vec())
            .build()
            .unwrap()
    }

    #[test]
    fn config_defaults_match_standard_report() {
        let config = ReportConfig::default();
        assert_eq!(config.average_window, 30);
        assert_eq!(config.weekly_window, 7);
        assert_eq!(config.monthly_window, 30);
        assert_eq!(config.change_lag, 2);
        assert_eq!(config.weekday_aggregate, Aggregate::Mean);
    }

    #[test]
    fn config_builder_validates() {
        let result = ReportConfig::builder().average_window(0).build();
        assert!(matches!(result, Err(FrameError::InvalidArgument(_))));

        let result = ReportConfig::builder().average_column("Weight").build();
        assert_eq!(
            result,
            Err(FrameError::DuplicateColumn("Weight".to_string()))
        );

        let config = ReportConfig::builder()
            .value_column("Mass")
            .weekly_window(3)
            .build()
            .unwrap();
        assert_eq!(config.value_column, "Mass");
        assert_eq!(config.weekly_window, 3);
    }

    #[test]
    fn trend_summary_reports_decrease_and_rates() {
        let table = weight_table(&[80.0, 79.0, 78.5, 78.0, 77.5, 77.0, 76.8, 76.5]);
        let trend = TrendSummary::from_series(&table.series("Weight").unwrap()).unwrap();

        assert_relative_eq!(trend.total_decrease, 3.5, epsilon = 1e-10);
        assert_relative_eq!(trend.percent_of_start.unwrap(), 4.375, epsilon = 1e-10);
        assert_eq!(trend.days, 7);
        assert_relative_eq!(trend.daily_rate.unwrap(), 0.5, epsilon = 1e-10);
        assert_relative_eq!(trend.weekly_rate.unwrap(), 3.5, epsilon = 1e-10);
    }

    #[test]
    fn trend_summary_single_day_has_no_rate() {
        let table = weight_table(&[80.0]);
        let trend = TrendSummary::from_series(&table.series("Weight").unwrap()).unwrap();
        assert_eq!(trend.days, 0);
        assert_eq!(trend.daily_rate, None);
        assert_eq!(trend.weekly_rate, None);
    }

    #[test]
    fn report_builds_every_artefact() {
        let values: Vec<f64> = (0..14).map(|i| 80.0 - 0.1 * i as f64).collect();
        let table = weight_table(&values);
        let config = ReportConfig::builder()
            .average_window(3)
            .weekly_window(7)
            .monthly_window(10)
            .change_lag(1)
            .build()
            .unwrap();

        let report = Report::build(&table, &config).unwrap();

        assert_eq!(report.average.len(), 12);
        assert_eq!(report.smoothed.len(), 11);
        assert!(report.smoothed.has_column("Average"));
        assert_eq!(report.weekly_change.len(), 8);
        assert_eq!(report.monthly_change.len(), 5);
        assert_eq!(report.monthly_summary.labels().collect::<Vec<_>>(), vec!["January"]);
        assert_eq!(report.percent_change.len(), 13);
        assert_eq!(report.with_change.column("AmountChange").unwrap()[0], None);
        assert_eq!(report.day_of_week.len(), 7);
        for change in report.day_of_week.values() {
            assert_relative_eq!(change, -0.1, epsilon = 1e-9);
        }

        let charts = report.charts().unwrap();
        assert_eq!(charts.len(), 9);
        assert_eq!(charts[0].title, "complete-chart");
    }

    #[test]
    fn weekday_seen_only_before_first_change_is_left_out() {
        // Monday 1 January, then Wednesdays only
        let dates = [1, 3, 10, 17, 24, 31]
            .iter()
            .map(|&d| NaiveDate::from_ymd_opt(2018, 1, d).unwrap())
            .collect();
        let table = Table::builder()
            .dates(dates)
            .values("Weight", vec![80.0, 79.5, 79.0, 78.6, 78.2, 77.9])
            .build()
            .unwrap();
        let config = ReportConfig::builder()
            .average_window(2)
            .weekly_window(3)
            .monthly_window(4)
            .change_lag(2)
            .build()
            .unwrap();

        let report = Report::build(&table, &config).unwrap();

        assert_eq!(report.with_change.len(), 6);
        assert_eq!(report.day_of_week.labels().collect::<Vec<_>>(), vec!["Wednesday"]);
        assert_relative_eq!(
            report.day_of_week.value_for("Wednesday").unwrap(),
            -0.85,
            epsilon = 1e-9
        );
        assert_eq!(report.monthly_summary.labels().collect::<Vec<_>>(), vec!["January"]);
    }

    #[test]
    fn report_requires_enough_rows_for_average() {
        let table = weight_table(&[80.0, 79.0]);
        let result = Report::build(&table, &ReportConfig::default());
        assert!(matches!(result, Err(FrameError::InvalidArgument(_))));
    }

    #[test]
    fn report_requires_value_column() {
        let table = weight_table(&[80.0, 79.0]);
        let config = ReportConfig::builder()
            .value_column("Mass")
            .average_window(1)
            .build()
            .unwrap();
        assert_eq!(
            Report::build(&table, &config),
            Err(FrameError::UnknownColumn("Mass".to_string()))
        );
    }
}
