//! Weight trend report over a synthetic half year of daily measurements.
//!
//! Run with: RUST_LOG=debug cargo run --example weight_report

use chrono::{Duration, NaiveDate};
use datewise::chart::{ChartData, ChartSpec, Renderer};
use datewise::core::Table;
use datewise::report::{Report, ReportConfig};
use datewise::FrameError;

/// Prints a one-line digest of every chart instead of drawing it.
struct ConsoleRenderer;

impl Renderer for ConsoleRenderer {
    type Error = FrameError;

    fn render(&mut self, title: &str, spec: &ChartSpec, data: &ChartData) -> Result<(), FrameError> {
        let columns: Vec<&str> = data.y.iter().map(|s| s.name.as_str()).collect();
        println!(
            "{title:<16} {:?} x={} y={:?} ({} points)",
            spec.chart_type,
            data.x_name,
            columns,
            data.len()
        );
        Ok(())
    }
}

fn main() -> Result<(), FrameError> {
    env_logger::init();

    println!("=== datewise weight report ===\n");

    // 1. Half a year of daily weights
    let start = NaiveDate::from_ymd_opt(2017, 12, 31).unwrap();
    let dates: Vec<NaiveDate> = (0..186).map(|i| start + Duration::days(i)).collect();
    let weights: Vec<f64> = (0..186)
        .map(|i| 95.0 - 0.05 * i as f64 + 0.4 * (i as f64 * 0.9).sin())
        .collect();
    let table = Table::builder()
        .dates(dates)
        .values("Weight", weights)
        .build()?;
    println!("{}", table.head(10));

    // 2. Derive everything
    let report = Report::build(&table, &ReportConfig::default())?;
    println!("{}", report.average.head(10));

    // 3. Overall trend
    let trend = report.trend;
    println!("Total loss:   {:.2} kg", trend.total_decrease);
    if let Some(percent) = trend.percent_of_start {
        println!("              {percent:.2} %");
    }
    println!("Time period:  {} days", trend.days);
    if let (Some(daily), Some(weekly)) = (trend.daily_rate, trend.weekly_rate) {
        println!("Daily loss:   {daily:.3} kg");
        println!("Weekly loss:  {weekly:.3} kg\n");
    }

    // 4. Grouped summaries
    println!("{}", report.monthly_summary);
    println!("{}", report.day_of_week);

    // 5. Hand the charts to a renderer
    report.render_all(&mut ConsoleRenderer)?;

    Ok(())
}
