use core_types::{Benchmark, Observation};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use timeseries::TimeSeriesStore;

/// Headline statistics for the selected period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodSummary {
    pub instrument: Benchmark,
    pub observations: usize,
    pub first: Observation,
    pub last: Observation,
    /// Highest close; the earliest one on ties.
    pub high: Observation,
    /// Lowest close; the earliest one on ties.
    pub low: Observation,
    /// Change from the first to the last close, in percent. `None` when it does
    /// not fit in a `Decimal`.
    pub change_percent: Option<Decimal>,
}

impl PeriodSummary {
    /// Summarises `series`, or returns `None` when it holds no observations.
    pub fn from_store(series: &TimeSeriesStore) -> Option<Self> {
        let observations = series.observations();
        let first = *observations.first()?;
        let last = *observations.last()?;

        let mut high = first;
        let mut low = first;
        for obs in observations {
            if obs.price > high.price {
                high = *obs;
            }
            if obs.price < low.price {
                low = *obs;
            }
        }

        let change_percent = last
            .price
            .checked_sub(first.price)
            .and_then(|delta| delta.checked_div(first.price))
            .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED));

        Some(Self {
            instrument: series.instrument(),
            observations: observations.len(),
            first,
            last,
            high,
            low,
            change_percent,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    #[test]
    fn summarises_high_low_and_change() {
        let d = |day| NaiveDate::from_ymd_opt(2008, 7, day).unwrap();
        let series = TimeSeriesStore::load(
            Benchmark::Wti,
            vec![
                Observation::new(d(1), dec!(140)),
                Observation::new(d(3), dec!(145.29)),
                Observation::new(d(7), dec!(141)),
                Observation::new(d(11), dec!(145.29)),
                Observation::new(d(14), dec!(126)),
            ],
        )
        .unwrap();

        let summary = PeriodSummary::from_store(&series).unwrap();
        assert_eq!(summary.observations, 5);
        assert_eq!(summary.high, Observation::new(d(3), dec!(145.29)));
        assert_eq!(summary.low.price, dec!(126));
        assert_eq!(summary.change_percent, Some(dec!(-10)));
    }

    #[test]
    fn unrepresentable_change_is_none() {
        let d = |day| NaiveDate::from_ymd_opt(2020, 4, day).unwrap();
        let series = TimeSeriesStore::load(
            Benchmark::Wti,
            vec![
                Observation::new(d(1), dec!(0.00000000000000000000000001)),
                Observation::new(d(2), dec!(100)),
            ],
        )
        .unwrap();

        let summary = PeriodSummary::from_store(&series).unwrap();
        assert_eq!(summary.change_percent, None);
        assert_eq!(summary.high.price, dec!(100));
    }

    #[test]
    fn empty_series_has_no_summary() {
        let series = TimeSeriesStore::load(Benchmark::Brent, Vec::new()).unwrap();
        assert!(PeriodSummary::from_store(&series).is_none());
    }
}
