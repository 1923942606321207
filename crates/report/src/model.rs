use analytics::{Annotation, ImpactAnalysis, MovingAverageSeries, PeriodSummary};
use core_types::Benchmark;
use serde::Serialize;
use std::collections::BTreeMap;

/// Everything the dashboard shows for one benchmark.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstrumentReport {
    pub instrument: Benchmark,
    /// One series per window, in the order they were computed.
    pub moving_averages: Vec<MovingAverageSeries>,
    pub impacts: ImpactAnalysis,
    pub summary: Option<PeriodSummary>,
    pub annotations: Vec<Annotation>,
}

impl InstrumentReport {
    pub fn moving_average(&self, window: usize) -> Option<&MovingAverageSeries> {
        self.moving_averages.iter().find(|s| s.window == window)
    }
}

/// The assembled output of one analysis run, keyed by instrument.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct DashboardReport {
    pub instruments: BTreeMap<Benchmark, InstrumentReport>,
}

impl DashboardReport {
    pub fn get(&self, instrument: Benchmark) -> Option<&InstrumentReport> {
        self.instruments.get(&instrument)
    }

    pub fn iter(&self) -> impl Iterator<Item = &InstrumentReport> {
        self.instruments.values()
    }

    pub fn len(&self) -> usize {
        self.instruments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instruments.is_empty()
    }

    /// True if any instrument has events whose impact was unavailable.
    pub fn has_warnings(&self) -> bool {
        self.iter().any(|r| r.impacts.has_warnings())
    }
}
