use analytics::{
    EventImpactAnalyzer, MovingAverageEngine, PeriodSummary, annotate,
};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use configuration::Config;
use core_types::{Benchmark, EventCategory, Observation};
use events::EventCatalog;
use report::{DashboardReport, InstrumentContext, ReportAssembler};
use timeseries::TimeSeriesStore;

/// The loaded price history of one benchmark, as produced by the loader.
#[derive(Debug, Clone)]
pub struct PriceHistory {
    pub instrument: Benchmark,
    pub observations: Vec<Observation>,
}

/// The dashboard's selections for one run.
///
/// Everything the calculation depends on is in here; nothing is read from
/// process-wide state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisRequest {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub windows: Vec<usize>,
    pub horizon_days: u32,
    pub lookback_days: u32,
    /// `None` keeps every category.
    pub categories: Option<Vec<EventCategory>>,
}

impl From<&Config> for AnalysisRequest {
    fn from(config: &Config) -> Self {
        Self {
            from: config.timeframe.from,
            to: config.timeframe.to,
            windows: config.analysis.moving_average_windows.clone(),
            horizon_days: config.analysis.impact_horizon_days,
            lookback_days: config.analysis.lookback_days,
            categories: config.events.categories.clone(),
        }
    }
}

/// The assembled report plus the filtered price series it was computed from.
#[derive(Debug)]
pub struct AnalysisOutput {
    pub report: DashboardReport,
    pub series: Vec<TimeSeriesStore>,
}

impl AnalysisRequest {
    /// The events to analyse: category-filtered, then limited to the timeframe.
    pub fn select_events(&self, catalog: &EventCatalog) -> EventCatalog {
        let by_category = match &self.categories {
            Some(categories) => catalog.filter_categories(categories),
            None => catalog.clone(),
        };
        by_category.within(self.from, self.to)
    }

    /// Runs the full pipeline for every supplied history.
    ///
    /// Malformed input and inconsistent intermediate results abort the run; events
    /// whose impact cannot be measured are reported in the output instead.
    pub fn run(&self, histories: Vec<PriceHistory>, catalog: &EventCatalog) -> Result<AnalysisOutput> {
        let engine = MovingAverageEngine::new(self.windows.clone())?;
        let analyzer = EventImpactAnalyzer::with_horizon(self.horizon_days)?;
        let selected = self.select_events(catalog);

        tracing::info!(
            "Analysing {} instrument(s) against {} event(s)",
            histories.len(),
            selected.len()
        );

        let mut ma_results = Vec::new();
        let mut impact_results = Vec::new();
        let mut context = Vec::new();
        let mut series = Vec::with_capacity(histories.len());

        for history in histories {
            let instrument = history.instrument;
            let full = TimeSeriesStore::load_with_lookback(
                instrument,
                history.observations,
                self.lookback_days,
            )
            .with_context(|| format!("Invalid {instrument} price history"))?;
            let store = full.between(
                self.from.unwrap_or(NaiveDate::MIN),
                self.to.unwrap_or(NaiveDate::MAX),
            )?;

            if store.is_empty() {
                tracing::warn!("No {} observations within the selected timeframe", instrument);
            }

            ma_results.extend(engine.compute_all(&store)?);
            impact_results.push(analyzer.analyze(selected.events(), &store));
            context.push(InstrumentContext {
                instrument,
                summary: PeriodSummary::from_store(&store),
                annotations: annotate(selected.events(), &store),
            });
            series.push(store);
        }

        let report =
            ReportAssembler::new().assemble_with_context(ma_results, impact_results, context)?;

        Ok(AnalysisOutput { report, series })
    }
}
