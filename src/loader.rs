//! Reads exported daily price histories into typed observations.

use anyhow::{Context, Result, anyhow, bail};
use chrono::NaiveDate;
use core_types::Observation;
use rust_decimal::Decimal;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

/// Loads a `date,close` CSV file. See [`read_prices`] for the accepted layout.
pub fn load_prices(path: &Path) -> Result<Vec<Observation>> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("Failed to open price file {}", path.display()))?;
    let observations = read_prices(file)
        .with_context(|| format!("Failed to read price file {}", path.display()))?;
    tracing::info!("Loaded {} prices from {}", observations.len(), path.display());
    Ok(observations)
}

/// Parses price rows from any reader.
///
/// The header must contain a `date` and a `close` column (case-insensitive);
/// other columns are ignored. Dates are `YYYY-MM-DD`, optionally followed by a
/// time. Rows with an empty close are skipped. Ordering is not checked here; the
/// time series store validates it.
pub fn read_prices<R: Read>(reader: R) -> Result<Vec<Observation>> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let column = |name: &str| {
        headers
            .iter()
            .position(|h| h.eq_ignore_ascii_case(name))
            .ok_or_else(|| anyhow!("missing '{name}' column"))
    };
    let date_idx = column("date")?;
    let close_idx = column("close")?;

    let mut observations = Vec::new();
    for result in rdr.records() {
        let record = result?;
        let line = record.position().map_or(0, |p| p.line());

        let close = record.get(close_idx).unwrap_or_default();
        if close.is_empty() {
            tracing::debug!("Skipping line {} with no close", line);
            continue;
        }

        let date = parse_date(record.get(date_idx).unwrap_or_default())
            .with_context(|| format!("line {line}: invalid date"))?;
        let price = Decimal::from_str(close)
            .or_else(|_| Decimal::from_scientific(close))
            .with_context(|| format!("line {line}: invalid close '{close}'"))?;

        observations.push(Observation::new(date, price));
    }

    Ok(observations)
}

fn parse_date(raw: &str) -> Result<NaiveDate> {
    // Accept "2024-01-02", "2024-01-02 00:00:00-05:00" and "2024-01-02T00:00:00Z".
    let day = match raw.get(..10) {
        Some(prefix) if raw.len() == 10 || matches!(raw.as_bytes().get(10), Some(b' ' | b'T')) => {
            prefix
        }
        _ => bail!("expected YYYY-MM-DD, got '{raw}'"),
    };
    Ok(NaiveDate::parse_from_str(day, "%Y-%m-%d")?)
}
