use crate::error::{DataError, StoreError};
use chrono::NaiveDate;
use core_types::{Benchmark, Observation};
use rust_decimal::Decimal;

/// How many calendar days `get` may fall back when the requested date has no
/// observation (weekends and exchange holidays).
pub const DEFAULT_LOOKBACK_DAYS: u32 = 5;

/// The validated price history of one benchmark.
///
/// Observations are strictly ascending by date, with no duplicates and only
/// positive prices. The store is immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeSeriesStore {
    instrument: Benchmark,
    observations: Vec<Observation>,
    lookback_days: u32,
}

impl TimeSeriesStore {
    /// Validates and loads a series using the default lookback.
    pub fn load(
        instrument: Benchmark,
        observations: Vec<Observation>,
    ) -> Result<Self, StoreError> {
        Self::load_with_lookback(instrument, observations, DEFAULT_LOOKBACK_DAYS)
    }

    /// Validates and loads a series.
    ///
    /// Fails with `StoreError::Data` if dates are unsorted or duplicated, or if
    /// any price is zero or negative.
    pub fn load_with_lookback(
        instrument: Benchmark,
        observations: Vec<Observation>,
        lookback_days: u32,
    ) -> Result<Self, StoreError> {
        validate(&observations).map_err(|source| StoreError::Data { instrument, source })?;

        tracing::debug!(
            "Loaded {} {} observations (lookback {} days)",
            observations.len(),
            instrument,
            lookback_days
        );

        Ok(Self {
            instrument,
            observations,
            lookback_days,
        })
    }

    pub fn instrument(&self) -> Benchmark {
        self.instrument
    }

    pub fn lookback_days(&self) -> u32 {
        self.lookback_days
    }

    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn first(&self) -> Option<&Observation> {
        self.observations.first()
    }

    pub fn last(&self) -> Option<&Observation> {
        self.observations.last()
    }

    pub fn prices(&self) -> impl ExactSizeIterator<Item = Decimal> + '_ {
        self.observations.iter().map(|o| o.price)
    }

    /// Returns the observation on `date`, or the nearest earlier one no more than
    /// `lookback_days` calendar days before it.
    pub fn get(&self, date: NaiveDate) -> Result<&Observation, StoreError> {
        // Index of the first observation strictly after `date`.
        let idx = self.observations.partition_point(|o| o.date <= date);

        idx.checked_sub(1)
            .and_then(|i| self.observations.get(i))
            .filter(|o| (date - o.date).num_days() <= i64::from(self.lookback_days))
            .ok_or(StoreError::NotFound {
                instrument: self.instrument,
                date,
                lookback_days: self.lookback_days,
            })
    }

    /// A new store holding only the observations within `[from, to]`.
    pub fn between(&self, from: NaiveDate, to: NaiveDate) -> Result<Self, StoreError> {
        if from > to {
            return Err(StoreError::Data {
                instrument: self.instrument,
                source: DataError::InvalidRange { from, to },
            });
        }

        let start = self.observations.partition_point(|o| o.date < from);
        let end = self.observations.partition_point(|o| o.date <= to);

        Ok(Self {
            instrument: self.instrument,
            observations: self.observations[start..end.max(start)].to_vec(),
            lookback_days: self.lookback_days,
        })
    }
}

fn validate(observations: &[Observation]) -> Result<(), DataError> {
    for obs in observations {
        if obs.price <= Decimal::ZERO {
            return Err(DataError::NonPositivePrice {
                date: obs.date,
                price: obs.price,
            });
        }
    }

    for pair in observations.windows(2) {
        let (previous, current) = (pair[0].date, pair[1].date);
        if current == previous {
            return Err(DataError::DuplicateDate(current));
        }
        if current < previous {
            return Err(DataError::Unsorted {
                previous,
                date: current,
            });
        }
    }

    Ok(())
}
