//! Terminal and JSON rendering of an assembled report.

use analytics::{ImpactAnalysis, ImpactOutcome, UnavailableReason};
use anyhow::Result;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, Color, ContentArrangement, Table};
use core_types::Event;
use events::EventCatalog;
use report::{DashboardReport, InstrumentReport};
use rust_decimal::Decimal;
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

/// Formats a percentage with an explicit sign and two decimals, e.g. `+3.21%`.
pub fn format_percent(value: Decimal) -> String {
    let rounded = value.round_dp(2);
    if rounded.is_sign_negative() && !rounded.is_zero() {
        format!("{rounded:.2}%")
    } else {
        format!("+{:.2}%", rounded.abs())
    }
}

/// Red for a move that still shows as negative after rounding, green otherwise.
fn impact_colour(percent: Decimal) -> Color {
    let shown = percent.round_dp(2);
    if shown.is_sign_negative() && !shown.is_zero() {
        Color::Red
    } else {
        Color::Green
    }
}

fn format_price(value: Decimal) -> String {
    format!("${:.2}", value.round_dp(2))
}

fn new_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);
    table
}

/// The "Statistical Market Impact" table: one row per event, in date order.
pub fn impact_table(analysis: &ImpactAnalysis) -> Table {
    let impact_header = format!("{}-Day Impact", analysis.horizon_days);
    let mut table = new_table(vec!["Date", "Event", "Type", "Price (Event)", impact_header.as_str()]);

    for outcome in analysis.outcomes() {
        let event = outcome.event();
        let (price, impact) = match outcome {
            ImpactOutcome::Measured(r) => (
                Cell::new(format_price(r.price_before)),
                Cell::new(format_percent(r.delta_percent)).fg(impact_colour(r.delta_percent)),
            ),
            ImpactOutcome::Unavailable(u) => {
                let price = match u.reason {
                    UnavailableReason::NoObservationBefore => Cell::new("N/A"),
                    _ => Cell::new("-"),
                };
                (price, Cell::new("N/A"))
            }
        };
        table.add_row(vec![
            Cell::new(event.date()),
            Cell::new(event.label()),
            Cell::new(event.category()),
            price,
            impact,
        ]);
    }

    table
}

/// Period statistics and the latest value of each moving average.
pub fn summary_table(report: &InstrumentReport) -> Table {
    let mut table = new_table(vec!["Metric", "Value"]);

    if let Some(summary) = &report.summary {
        table.add_row(vec![
            Cell::new("Period High"),
            Cell::new(format!("{} ({})", format_price(summary.high.price), summary.high.date)),
        ]);
        table.add_row(vec![
            Cell::new("Period Low"),
            Cell::new(format!("{} ({})", format_price(summary.low.price), summary.low.date)),
        ]);
        table.add_row(vec![
            Cell::new("Period Change"),
            Cell::new(
                summary
                    .change_percent
                    .map(format_percent)
                    .unwrap_or_else(|| "N/A".to_string()),
            ),
        ]);
    }

    for series in &report.moving_averages {
        let latest = series
            .points
            .last()
            .map(|p| format_price(p.value))
            .unwrap_or_else(|| "N/A".to_string());
        table.add_row(vec![Cell::new(format!("{}-Day SMA", series.window)), Cell::new(latest)]);
    }

    table
}

/// Writes the report in the requested format.
pub fn write_report<W: Write>(out: &mut W, report: &DashboardReport, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, report)?;
            writeln!(out)?;
        }
        OutputFormat::Table => {
            for instrument in report.iter() {
                write_instrument(out, instrument)?;
            }
        }
    }
    Ok(())
}

fn write_instrument<W: Write>(out: &mut W, report: &InstrumentReport) -> Result<()> {
    match &report.summary {
        Some(summary) => writeln!(
            out,
            "Currently viewing {} from {} to {}",
            report.instrument.display_name(),
            summary.first.date,
            summary.last.date
        )?,
        None => writeln!(
            out,
            "Currently viewing {}: no prices in the selected timeframe",
            report.instrument.display_name()
        )?,
    }
    writeln!(out, "{}", summary_table(report))?;

    if !report.annotations.is_empty() {
        writeln!(out, "Annotated events:")?;
        for a in &report.annotations {
            writeln!(out, "  {}  {} [{}] at {}", a.date, a.label, a.category, format_price(a.price))?;
        }
    }

    if report.impacts.impacts.is_empty() && report.impacts.unavailable.is_empty() {
        writeln!(out, "No events found within the selected date range.")?;
    } else {
        writeln!(out, "Statistical Market Impact")?;
        writeln!(out, "{}", impact_table(&report.impacts))?;
    }
    writeln!(out)?;
    Ok(())
}

/// Writes the event catalog as a table or JSON array.
pub fn write_catalog<W: Write>(out: &mut W, catalog: &EventCatalog, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let events: Vec<&Event> = catalog.iter().collect();
            serde_json::to_writer_pretty(&mut *out, &events)?;
            writeln!(out)?;
        }
        OutputFormat::Table => {
            let mut table = new_table(vec!["Date", "Event", "Type"]);
            for event in catalog {
                table.add_row(vec![
                    Cell::new(event.date()),
                    Cell::new(event.label()),
                    Cell::new(event.category()),
                ]);
            }
            writeln!(out, "{table}")?;
            let categories: Vec<String> = catalog.categories().iter().map(|c| c.to_string()).collect();
            writeln!(out, "{} events in {}", catalog.len(), categories.join(", "))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use analytics::{EventImpactAnalyzer, MovingAverageEngine};
    use chrono::{Days, NaiveDate};
    use core_types::{Benchmark, EventCategory, Observation};
    use report::ReportAssembler;
    use rust_decimal_macros::dec;
    use timeseries::TimeSeriesStore;

    #[test]
    fn percent_is_signed_with_two_decimals() {
        assert_eq!(format_percent(dec!(10)), "+10.00%");
        assert_eq!(format_percent(dec!(-3.456)), "-3.46%");
        assert_eq!(format_percent(dec!(0)), "+0.00%");
        assert_eq!(format_percent(dec!(-0.001)), "+0.00%");
    }

    #[test]
    fn colour_follows_the_rounded_percentage() {
        assert_eq!(impact_colour(dec!(-0.001)), Color::Green);
        assert_eq!(impact_colour(dec!(-0.006)), Color::Red);
        assert_eq!(impact_colour(dec!(2.5)), Color::Green);
    }

    fn report() -> DashboardReport {
        let start = NaiveDate::from_ymd_opt(2023, 10, 1).unwrap();
        let observations = (0..20)
            .map(|n| Observation::new(start + Days::new(n), dec!(84) + Decimal::from(n)))
            .collect();
        let store = TimeSeriesStore::load(Benchmark::Brent, observations).unwrap();
        let events = vec![
            Event::new(start + Days::new(6), "Israel-Hamas War", EventCategory::Conflict).unwrap(),
            Event::new(start + Days::new(30), "Later", EventCategory::Economic).unwrap(),
        ];
        let mas = MovingAverageEngine::new(vec![5]).unwrap().compute_all(&store).unwrap();
        let impacts = EventImpactAnalyzer::new().analyze(&events, &store);
        ReportAssembler::new().assemble(mas, vec![impacts]).unwrap()
    }

    #[test]
    fn impact_table_lists_measured_and_unavailable_events() {
        let report = report();
        let mut table = impact_table(&report.get(Benchmark::Brent).unwrap().impacts);
        table.set_width(200);
        let rendered = table.to_string();

        assert!(rendered.contains("7-Day Impact"));
        assert!(rendered.contains("Israel-Hamas War"));
        assert!(rendered.contains("$90.00"));
        assert!(rendered.contains("+7.78%"));
        assert!(rendered.contains("N/A"));
    }

    #[test]
    fn table_output_mentions_each_instrument() {
        let mut out = Vec::new();
        write_report(&mut out, &report(), OutputFormat::Table).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("Brent Crude"));
        assert!(text.contains("5-Day SMA"));
        assert!(text.contains("Statistical Market Impact"));
    }

    #[test]
    fn json_output_is_valid() {
        let mut out = Vec::new();
        write_report(&mut out, &report(), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert!(value["instruments"]["Brent"].is_object());
    }

    #[test]
    fn catalog_renders_as_table() {
        let mut out = Vec::new();
        write_catalog(&mut out, &EventCatalog::builtin(), OutputFormat::Table).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("OPEC No-Cut Decision"));
        assert!(text.contains("Policy/OPEC"));
        assert!(text.contains("15 events in Conflict, Economic, Policy/OPEC"));
    }
}
