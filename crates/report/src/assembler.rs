use crate::error::ConsistencyError;
use crate::model::{DashboardReport, InstrumentReport};
use analytics::{Annotation, ImpactAnalysis, MovingAverageSeries, PeriodSummary};
use core_types::Benchmark;
use std::collections::BTreeMap;

/// Optional per-instrument extras shown next to the chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstrumentContext {
    pub instrument: Benchmark,
    pub summary: Option<PeriodSummary>,
    pub annotations: Vec<Annotation>,
}

/// A stateless merger of analysis outputs into a `DashboardReport`.
#[derive(Debug, Default)]
pub struct ReportAssembler {}

impl ReportAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Groups moving averages and impact analyses by instrument.
    ///
    /// Fails if an instrument has moving averages but no impact analysis (or the
    /// reverse), if an instrument has two impact analyses, or if the same window
    /// appears twice for one instrument.
    pub fn assemble(
        &self,
        ma_results: Vec<MovingAverageSeries>,
        impact_results: Vec<ImpactAnalysis>,
    ) -> Result<DashboardReport, ConsistencyError> {
        self.assemble_with_context(ma_results, impact_results, Vec::new())
    }

    /// Like `assemble`, also attaching period summaries and chart annotations.
    ///
    /// Context is optional per instrument, but every entry must name an
    /// instrument present in the analysis inputs, at most once.
    pub fn assemble_with_context(
        &self,
        ma_results: Vec<MovingAverageSeries>,
        impact_results: Vec<ImpactAnalysis>,
        context: Vec<InstrumentContext>,
    ) -> Result<DashboardReport, ConsistencyError> {
        // 1. Index moving averages by instrument, rejecting repeated windows.
        let mut averages: BTreeMap<Benchmark, Vec<MovingAverageSeries>> = BTreeMap::new();
        for series in ma_results {
            let entry = averages.entry(series.instrument).or_default();
            if entry.iter().any(|s| s.window == series.window) {
                return Err(ConsistencyError::DuplicateWindow(series.instrument, series.window));
            }
            entry.push(series);
        }

        // 2. Index impact analyses, one per instrument.
        let mut impacts: BTreeMap<Benchmark, ImpactAnalysis> = BTreeMap::new();
        for analysis in impact_results {
            let instrument = analysis.instrument;
            if impacts.insert(instrument, analysis).is_some() {
                return Err(ConsistencyError::DuplicateImpacts(instrument));
            }
        }

        // 3. Both inputs must cover the same instruments.
        if let Some(&missing) = averages.keys().find(|k| !impacts.contains_key(k)) {
            return Err(ConsistencyError::MissingImpacts(missing));
        }
        if let Some(&missing) = impacts.keys().find(|k| !averages.contains_key(k)) {
            return Err(ConsistencyError::MissingMovingAverages(missing));
        }

        // 4. Context may only refer to analysed instruments.
        let mut extras: BTreeMap<Benchmark, InstrumentContext> = BTreeMap::new();
        for ctx in context {
            let instrument = ctx.instrument;
            if !impacts.contains_key(&instrument) {
                return Err(ConsistencyError::UnknownContext(instrument));
            }
            if extras.insert(instrument, ctx).is_some() {
                return Err(ConsistencyError::DuplicateContext(instrument));
            }
        }

        // 5. Merge.
        let mut report = DashboardReport::default();
        for (instrument, analysis) in impacts {
            let moving_averages = averages.remove(&instrument).unwrap_or_default();
            let (summary, annotations) = match extras.remove(&instrument) {
                Some(ctx) => (ctx.summary, ctx.annotations),
                None => (None, Vec::new()),
            };
            report.instruments.insert(
                instrument,
                InstrumentReport {
                    instrument,
                    moving_averages,
                    impacts: analysis,
                    summary,
                    annotations,
                },
            );
        }

        tracing::debug!("Assembled report for {} instrument(s)", report.len());
        Ok(report)
    }
}
