//! # Crude Explorer Analytics
//!
//! The statistical core of the dashboard.
//!
//! ## Architectural Principles
//!
//! - **Pure Logic:** Every calculation is a function of an immutable
//!   `TimeSeriesStore` (and, for impacts, a slice of `Event`s). Nothing here reads
//!   files, holds global state or blocks.
//! - **Partial Results Are Results:** A missing observation around one event never
//!   aborts an impact analysis; the event is reported as unavailable instead.
//!
//! ## Public API
//!
//! - `MovingAverageEngine` / `MovingAverage`: lazy simple moving averages.
//! - `EventImpactAnalyzer`: the forward price delta after each event.
//! - `PeriodSummary`: high/low/change over the analysed period.
//! - `annotate`: events that fall on a trading day, with that day's price.

pub mod annotations;
pub mod error;
pub mod impact;
pub mod moving_average;
pub mod summary;

pub use annotations::{Annotation, annotate};
pub use error::AnalyticsError;
pub use impact::{
    DEFAULT_IMPACT_HORIZON_DAYS, EventImpactAnalyzer, ImpactAnalysis, ImpactOutcome,
    ImpactResult, UnavailableImpact, UnavailableReason,
};
pub use moving_average::{
    DEFAULT_WINDOWS, MovingAverage, MovingAverageEngine, MovingAveragePoint, MovingAverageSeries,
};
pub use summary::PeriodSummary;
