use crate::error::AnalyticsError;
use chrono::{Days, NaiveDate};
use core_types::{Benchmark, Event, Observation};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use timeseries::TimeSeriesStore;

/// Calendar days between the event baseline and the post-event price.
pub const DEFAULT_IMPACT_HORIZON_DAYS: u32 = 7;

/// The measured price move after one event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImpactResult {
    pub event: Event,
    /// Date of the observation used as the baseline (on or before the event).
    pub before_date: NaiveDate,
    pub price_before: Decimal,
    /// Date of the observation used as the post-event price.
    pub after_date: NaiveDate,
    pub price_after: Decimal,
    pub delta_absolute: Decimal,
    pub delta_percent: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnavailableReason {
    /// No observation on or shortly before the event date.
    NoObservationBefore,
    /// No observation on or shortly before the end of the horizon.
    NoObservationAfter,
    /// The baseline price is zero, so no percentage can be formed.
    ZeroBasePrice,
    /// The percentage change does not fit in a `Decimal`.
    Overflow,
}

/// An event whose impact could not be measured.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnavailableImpact {
    pub event: Event,
    pub reason: UnavailableReason,
}

/// The impact of every analysed event on one instrument.
///
/// Events that could not be measured are kept out of `impacts` and listed in
/// `unavailable` instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImpactAnalysis {
    pub instrument: Benchmark,
    pub horizon_days: u32,
    pub impacts: Vec<ImpactResult>,
    pub unavailable: Vec<UnavailableImpact>,
}

/// One row of an impact table, measured or not.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImpactOutcome<'a> {
    Measured(&'a ImpactResult),
    Unavailable(&'a UnavailableImpact),
}

impl ImpactOutcome<'_> {
    pub fn event(&self) -> &Event {
        match self {
            ImpactOutcome::Measured(r) => &r.event,
            ImpactOutcome::Unavailable(u) => &u.event,
        }
    }
}

impl ImpactAnalysis {
    /// True when at least one event could not be measured.
    pub fn has_warnings(&self) -> bool {
        !self.unavailable.is_empty()
    }

    /// Measured and unavailable events interleaved by event date.
    pub fn outcomes(&self) -> Vec<ImpactOutcome<'_>> {
        let mut rows: Vec<_> = self
            .impacts
            .iter()
            .map(ImpactOutcome::Measured)
            .chain(self.unavailable.iter().map(ImpactOutcome::Unavailable))
            .collect();
        rows.sort_by_key(|row| row.event().date());
        rows
    }
}

/// Measures the price move over a fixed forward window after each event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventImpactAnalyzer {
    horizon_days: u32,
}

impl Default for EventImpactAnalyzer {
    fn default() -> Self {
        Self {
            horizon_days: DEFAULT_IMPACT_HORIZON_DAYS,
        }
    }
}

impl EventImpactAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_horizon(horizon_days: u32) -> Result<Self, AnalyticsError> {
        if horizon_days == 0 {
            return Err(AnalyticsError::InvalidHorizon(horizon_days));
        }
        Ok(Self { horizon_days })
    }

    pub fn horizon_days(&self) -> u32 {
        self.horizon_days
    }

    /// Measures every event against `series`.
    ///
    /// The baseline is the observation on or just before the event date; the
    /// post-event price is the observation on or just before `horizon_days` later.
    /// Both fall back at most the store's lookback. Events that cannot be resolved
    /// are logged and reported as unavailable; the analysis itself never fails.
    pub fn analyze(&self, events: &[Event], series: &TimeSeriesStore) -> ImpactAnalysis {
        let mut analysis = ImpactAnalysis {
            instrument: series.instrument(),
            horizon_days: self.horizon_days,
            impacts: Vec::new(),
            unavailable: Vec::new(),
        };

        for event in events {
            match self.measure(event, series) {
                Ok(result) => analysis.impacts.push(result),
                Err(reason) => {
                    tracing::warn!(
                        "Impact of '{}' ({}) on {} unavailable: {:?} (lookback {} days)",
                        event.label(),
                        event.date(),
                        series.instrument(),
                        reason,
                        series.lookback_days()
                    );
                    analysis.unavailable.push(UnavailableImpact {
                        event: event.clone(),
                        reason,
                    });
                }
            }
        }

        tracing::debug!(
            "Measured {} of {} events on {}",
            analysis.impacts.len(),
            events.len(),
            series.instrument()
        );

        analysis
    }

    fn measure(
        &self,
        event: &Event,
        series: &TimeSeriesStore,
    ) -> Result<ImpactResult, UnavailableReason> {
        let before: &Observation = series
            .get(event.date())
            .map_err(|_| UnavailableReason::NoObservationBefore)?;

        let target = event
            .date()
            .checked_add_days(Days::new(u64::from(self.horizon_days)))
            .ok_or(UnavailableReason::NoObservationAfter)?;
        let after = series
            .get(target)
            .map_err(|_| UnavailableReason::NoObservationAfter)?;

        // Past the last observation, or a gap long enough that both lookups land
        // on the same close: there is no post-event price.
        let past_end = series.last().is_none_or(|last| event.date() > last.date);
        if past_end || after.date <= before.date {
            return Err(UnavailableReason::NoObservationAfter);
        }

        if before.price.is_zero() {
            return Err(UnavailableReason::ZeroBasePrice);
        }

        let delta_absolute = after
            .price
            .checked_sub(before.price)
            .ok_or(UnavailableReason::Overflow)?;
        let delta_percent = delta_absolute
            .checked_div(before.price)
            .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
            .ok_or(UnavailableReason::Overflow)?;

        Ok(ImpactResult {
            event: event.clone(),
            before_date: before.date,
            price_before: before.price,
            after_date: after.date,
            price_after: after.price,
            delta_absolute,
            delta_percent,
        })
    }
}
