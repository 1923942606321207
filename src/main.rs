mod analysis;
mod export;
mod loader;
mod output;

use analysis::{AnalysisRequest, PriceHistory};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use configuration::Config;
use core_types::{Benchmark, EventCategory};
use events::EventCatalog;
use output::OutputFormat;
use std::path::{Path, PathBuf};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// The main entry point for the crude oil explorer.
fn main() -> Result<()> {
    // A missing .env file is fine; variables may come from the shell.
    dotenvy::dotenv().ok();

    let (writer, _guard) = tracing_appender::non_blocking(std::io::stderr());
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(writer)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => configuration::load_config_from(path),
        None => configuration::load_config(),
    }
    .context("Failed to load configuration")?;

    match cli.command {
        Commands::Analyze(args) => handle_analyze(args, &config)?,
        Commands::Events(args) => handle_events(args, &config)?,
    }

    Ok(())
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Explore WTI and Brent price history: moving averages and event impact.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to a TOML configuration file (defaults to ./config.toml if present).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute moving averages and event impacts for one or both benchmarks.
    Analyze(AnalyzeArgs),
    /// List the event catalog.
    Events(EventsArgs),
}

#[derive(Args)]
#[command(group(clap::ArgGroup::new("prices").required(true).multiple(true).args(["wti", "brent"])))]
struct AnalyzeArgs {
    /// CSV file with the WTI daily closes (columns `date,close`).
    #[arg(long)]
    wti: Option<PathBuf>,

    /// CSV file with the Brent daily closes (columns `date,close`).
    #[arg(long)]
    brent: Option<PathBuf>,

    /// Start of the timeframe (format: YYYY-MM-DD).
    #[arg(long)]
    from: Option<NaiveDate>,

    /// End of the timeframe (format: YYYY-MM-DD).
    #[arg(long)]
    to: Option<NaiveDate>,

    /// Moving average window in trading days. Repeat for several windows.
    #[arg(long = "window")]
    windows: Vec<usize>,

    /// Only analyse events of this category. Repeat for several.
    #[arg(long = "category", value_enum)]
    categories: Vec<EventCategory>,

    /// Calendar days between an event and its follow-up price.
    #[arg(long)]
    horizon_days: Option<u32>,

    /// How many days a lookup may fall back to find the prior observation.
    #[arg(long)]
    lookback_days: Option<u32>,

    /// TOML file replacing the built-in event catalog.
    #[arg(long)]
    events: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    /// Write `date,close,sma_<w>` rows to this CSV file.
    #[arg(long)]
    export: Option<PathBuf>,
}

#[derive(Args)]
struct EventsArgs {
    /// Only list events of this category. Repeat for several.
    #[arg(long = "category", value_enum)]
    categories: Vec<EventCategory>,

    /// TOML file replacing the built-in event catalog.
    #[arg(long)]
    events: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,
}

// ==============================================================================
// Command Logic
// ==============================================================================

fn load_catalog(cli_path: Option<&Path>, config: &Config) -> Result<EventCatalog> {
    match cli_path.or(config.events.catalog_path.as_deref()) {
        Some(path) => EventCatalog::from_file(path)
            .with_context(|| format!("Failed to load event catalog {}", path.display())),
        None => Ok(EventCatalog::builtin()),
    }
}

/// Layers the command-line selections on top of the configured defaults.
fn build_request(args: &AnalyzeArgs, config: &Config) -> AnalysisRequest {
    let mut request = AnalysisRequest::from(config);
    if args.from.is_some() {
        request.from = args.from;
    }
    if args.to.is_some() {
        request.to = args.to;
    }
    if !args.windows.is_empty() {
        request.windows = args.windows.clone();
    }
    if let Some(days) = args.horizon_days {
        request.horizon_days = days;
    }
    if let Some(days) = args.lookback_days {
        request.lookback_days = days;
    }
    if !args.categories.is_empty() {
        request.categories = Some(args.categories.clone());
    }
    request
}

fn handle_analyze(args: AnalyzeArgs, config: &Config) -> Result<()> {
    let request = build_request(&args, config);
    let catalog = load_catalog(args.events.as_deref(), config)?;

    let mut histories = Vec::new();
    for (instrument, path) in [(Benchmark::Wti, &args.wti), (Benchmark::Brent, &args.brent)] {
        if let Some(path) = path {
            histories.push(PriceHistory {
                instrument,
                observations: loader::load_prices(path)?,
            });
        }
    }

    let output = request.run(histories, &catalog)?;

    let stdout = std::io::stdout();
    output::write_report(&mut stdout.lock(), &output.report, args.format)?;

    if output.report.has_warnings() {
        tracing::warn!("Some event impacts could not be measured; they are shown as N/A");
    }

    if let Some(base) = &args.export {
        let multiple = output.series.len() > 1;
        for series in &output.series {
            let Some(report) = output.report.get(series.instrument()) else {
                continue;
            };
            let path = export::export_path(base, &series.instrument().to_string(), multiple);
            export::export_file(&path, series, report)?;
        }
    }

    Ok(())
}

fn handle_events(args: EventsArgs, config: &Config) -> Result<()> {
    let mut catalog = load_catalog(args.events.as_deref(), config)?;
    if !args.categories.is_empty() {
        catalog = catalog.filter_categories(&args.categories);
    } else if let Some(categories) = &config.events.categories {
        catalog = catalog.filter_categories(categories);
    }

    let stdout = std::io::stdout();
    output::write_catalog(&mut stdout.lock(), &catalog, args.format)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn flags_override_config() {
        let cli = Cli::try_parse_from([
            "crude-explorer",
            "analyze",
            "--wti",
            "wti.csv",
            "--window",
            "20",
            "--window",
            "100",
            "--category",
            "conflict",
            "--horizon-days",
            "14",
        ])
        .unwrap();
        let Commands::Analyze(args) = cli.command else {
            panic!("expected analyze");
        };

        let request = build_request(&args, &Config::default());
        assert_eq!(request.windows, vec![20, 100]);
        assert_eq!(request.horizon_days, 14);
        assert_eq!(request.lookback_days, 5);
        assert_eq!(request.categories, Some(vec![EventCategory::Conflict]));
    }

    #[test]
    fn analyze_requires_a_price_file() {
        assert!(Cli::try_parse_from(["crude-explorer", "analyze"]).is_err());
    }
}
