//! CSV export of the plotted series: close price plus one column per moving average.

use anyhow::{Context, Result};
use report::InstrumentReport;
use std::io::Write;
use std::path::{Path, PathBuf};
use timeseries::TimeSeriesStore;

/// Writes `date,close,sma_<w>...` rows. Undefined averages are left empty.
pub fn write_csv<W: Write>(writer: W, series: &TimeSeriesStore, report: &InstrumentReport) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);

    let mut header = vec!["date".to_string(), "close".to_string()];
    header.extend(report.moving_averages.iter().map(|ma| format!("sma_{}", ma.window)));
    csv.write_record(&header)?;

    for obs in series.observations() {
        let mut row = vec![obs.date.to_string(), obs.price.to_string()];
        row.extend(report.moving_averages.iter().map(|ma| {
            ma.value_on(obs.date)
                .map(|v| v.round_dp(4).normalize().to_string())
                .unwrap_or_default()
        }));
        csv.write_record(&row)?;
    }

    csv.flush()?;
    Ok(())
}

/// The file an instrument is exported to. With several instruments, the
/// instrument name is appended to the file stem: `oil.csv` becomes `oil_wti.csv`.
pub fn export_path(base: &Path, instrument: &str, multiple: bool) -> PathBuf {
    if !multiple {
        return base.to_path_buf();
    }
    let stem = base
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "oil_data".to_string());
    let ext = base
        .extension()
        .map(|e| e.to_string_lossy().into_owned())
        .unwrap_or_else(|| "csv".to_string());
    base.with_file_name(format!("{stem}_{}.{ext}", instrument.to_lowercase()))
}

pub fn export_file(path: &Path, series: &TimeSeriesStore, report: &InstrumentReport) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create export file {}", path.display()))?;
    write_csv(file, series, report)?;
    tracing::info!("Exported {} rows to {}", series.len(), path.display());
    Ok(())
}
