//! Console rendering of reports
//!
//! Rendering is a pure function of the report, so printing the same report
//! twice prints the same text.

use crate::currency::Currency;
use crate::report::{Comparison, Report};
use chrono::NaiveDate;
use std::fmt;
use std::io::{self, Write};

const RULE_WIDTH: usize = 60;
const NOT_AVAILABLE: &str = "N/A";
const NEAREST_NOTE: &str = "nearest available date";

fn rule() -> String {
    "=".repeat(RULE_WIDTH)
}

fn format_rate(rate: Option<f64>) -> String {
    rate.map_or_else(|| NOT_AVAILABLE.to_string(), |r| format!("{:.4}", r))
}

fn format_gold(price: Option<f64>, currency: Currency) -> String {
    price.map_or_else(
        || NOT_AVAILABLE.to_string(),
        |p| format!("${:.2} {}", p, currency),
    )
}

fn format_change(change: Option<f64>) -> String {
    change.map_or_else(|| NOT_AVAILABLE.to_string(), |c| format!("{:+.2}%", c))
}

/// ` (nearest available date 2023-02-03)` when the data is from another day
fn date_note(requested: NaiveDate, sourced: Option<NaiveDate>) -> String {
    match sourced {
        Some(date) if date != requested => format!(" ({} {})", NEAREST_NOTE, date),
        _ => String::new(),
    }
}

fn header(f: &mut fmt::Formatter<'_>) -> fmt::Result {
    writeln!(f, "{}", rule())?;
    writeln!(f, "FINANCIAL INSIGHTS REPORT")?;
    writeln!(f, "{}", rule())
}

/// Text layout of a single-date report
struct ReportView<'a>(&'a Report);

impl fmt::Display for ReportView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.0;
        let requested = report.date().date();
        let rates = report.exchange_rates();
        let gold = report.gold_price();

        header(f)?;
        writeln!(f, "Date: {}", report.date())?;
        writeln!(f)?;

        writeln!(f, "EXCHANGE RATES ({} Base):", rates.base())?;
        for (currency, rate) in rates.rates() {
            writeln!(f, "  {}: {}", currency, format_rate(rate))?;
        }
        if let Some(sourced) = rates.sourced_date().filter(|d| *d != requested) {
            writeln!(f, "  Data date: {} ({})", sourced, NEAREST_NOTE)?;
        }
        writeln!(f)?;

        writeln!(f, "GOLD PRICE ({}/oz):", gold.currency())?;
        writeln!(
            f,
            "  {}{}",
            format_gold(gold.price_per_ounce(), gold.currency()),
            date_note(requested, gold.sourced_date())
        )?;
        writeln!(f, "{}", rule())
    }
}

/// Text layout of two dates with percentage changes
struct ComparisonView<'a>(&'a Comparison);

impl fmt::Display for ComparisonView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let comparison = self.0;
        let start = comparison.start();
        let end = comparison.end();

        header(f)?;
        writeln!(f, "Dates: {} → {}", start.date(), end.date())?;
        writeln!(f)?;

        writeln!(f, "EXCHANGE RATES ({} Base):", start.exchange_rates().base())?;
        for report in [start, end] {
            let rates = report.exchange_rates();
            let cells: Vec<String> = rates
                .rates()
                .map(|(currency, rate)| format!("{}: {}", currency, format_rate(rate)))
                .collect();
            writeln!(
                f,
                "  Date {}  | {}{}",
                report.date(),
                cells.join("  "),
                date_note(report.date().date(), rates.sourced_date())
            )?;
        }
        let changes: Vec<String> = Currency::REPORTED
            .into_iter()
            .map(|currency| {
                format!(
                    "{}: {}",
                    currency,
                    format_change(comparison.rate_change(currency))
                )
            })
            .collect();
        writeln!(f, "  Change (%)       | {}", changes.join("  "))?;
        writeln!(f)?;

        writeln!(f, "GOLD PRICE ({}/oz):", start.gold_price().currency())?;
        for report in [start, end] {
            let gold = report.gold_price();
            writeln!(
                f,
                "  Date {}: {}{}",
                report.date(),
                format_gold(gold.price_per_ounce(), gold.currency()),
                date_note(report.date().date(), gold.sourced_date())
            )?;
        }
        writeln!(f, "  Change (%): {}", format_change(comparison.gold_change()))?;
        writeln!(f, "{}", rule())
    }
}

/// Render a single-date report
pub fn render_report(report: &Report) -> String {
    ReportView(report).to_string()
}

/// Render two dates with percentage changes
pub fn render_comparison(comparison: &Comparison) -> String {
    ComparisonView(comparison).to_string()
}

/// Write a rendered report to `writer`
pub fn display<W: Write>(report: &Report, writer: &mut W) -> io::Result<()> {
    write!(writer, "{}", ReportView(report))?;
    writer.flush()
}

pub fn display_comparison<W: Write>(comparison: &Comparison, writer: &mut W) -> io::Result<()> {
    write!(writer, "{}", ComparisonView(comparison))?;
    writer.flush()
}
