use crate::error::AnalyticsError;
use chrono::NaiveDate;
use core_types::{Benchmark, Observation};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use timeseries::TimeSeriesStore;

/// The 50-day and 200-day averages plotted on the dashboard.
pub const DEFAULT_WINDOWS: [usize; 2] = [50, 200];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovingAveragePoint {
    pub date: NaiveDate,
    pub value: Decimal,
}

/// A fully evaluated moving average for one instrument and window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovingAverageSeries {
    pub instrument: Benchmark,
    pub window: usize,
    pub points: Vec<MovingAveragePoint>,
}

impl MovingAverageSeries {
    /// The average on `date`, if one is defined there.
    pub fn value_on(&self, date: NaiveDate) -> Option<Decimal> {
        self.points
            .binary_search_by_key(&date, |p| p.date)
            .ok()
            .map(|i| self.points[i].value)
    }
}

/// A lazy simple moving average over a slice of observations.
///
/// Yields one point per observation from the `window`-th onwards, each the
/// arithmetic mean of the trailing `window` prices. Keeps a running sum, so each
/// step costs one addition and one subtraction.
#[derive(Debug, Clone)]
pub struct MovingAverage<'a> {
    observations: &'a [Observation],
    window: usize,
    divisor: Decimal,
    // Index of the observation the next point is dated on.
    cursor: usize,
    // Sum of the `window - 1` prices preceding `cursor`.
    partial_sum: Decimal,
}

impl<'a> MovingAverage<'a> {
    fn new(observations: &'a [Observation], window: usize) -> Self {
        let warm_up = window - 1;
        let partial_sum = observations.iter().take(warm_up).map(|o| o.price).sum();
        Self {
            observations,
            window,
            divisor: Decimal::from(window),
            cursor: warm_up,
            partial_sum,
        }
    }
}

impl Iterator for MovingAverage<'_> {
    type Item = MovingAveragePoint;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.observations.get(self.cursor)?;
        let sum = self.partial_sum + current.price;
        let oldest = self.observations[self.cursor + 1 - self.window].price;

        self.partial_sum = sum - oldest;
        self.cursor += 1;

        Some(MovingAveragePoint {
            date: current.date,
            value: sum / self.divisor,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.observations.len().saturating_sub(self.cursor);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for MovingAverage<'_> {}

/// Computes the configured moving averages over a price series.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovingAverageEngine {
    windows: Vec<usize>,
}

impl Default for MovingAverageEngine {
    fn default() -> Self {
        Self {
            windows: DEFAULT_WINDOWS.to_vec(),
        }
    }
}

impl MovingAverageEngine {
    /// Creates an engine for the given windows, which must be positive and distinct.
    pub fn new(windows: Vec<usize>) -> Result<Self, AnalyticsError> {
        if windows.is_empty() {
            return Err(AnalyticsError::NoWindows);
        }
        if let Some(&bad) = windows.iter().find(|&&w| w == 0) {
            return Err(AnalyticsError::InvalidWindow(bad));
        }
        for (i, w) in windows.iter().enumerate() {
            if windows[..i].contains(w) {
                return Err(AnalyticsError::DuplicateWindow(*w));
            }
        }
        Ok(Self { windows })
    }

    pub fn windows(&self) -> &[usize] {
        &self.windows
    }

    /// A lazy moving average of `window` observations over `series`.
    ///
    /// Any positive window is accepted, including ones longer than the series, in
    /// which case the sequence is empty.
    pub fn compute<'a>(
        &self,
        series: &'a TimeSeriesStore,
        window: usize,
    ) -> Result<MovingAverage<'a>, AnalyticsError> {
        if window == 0 {
            return Err(AnalyticsError::InvalidWindow(window));
        }
        Ok(MovingAverage::new(series.observations(), window))
    }

    /// Evaluates `compute` into a `MovingAverageSeries`.
    pub fn compute_series(
        &self,
        series: &TimeSeriesStore,
        window: usize,
    ) -> Result<MovingAverageSeries, AnalyticsError> {
        let points: Vec<_> = self.compute(series, window)?.collect();
        tracing::debug!(
            "MA({}) over {} {} observations produced {} points",
            window,
            series.len(),
            series.instrument(),
            points.len()
        );
        Ok(MovingAverageSeries {
            instrument: series.instrument(),
            window,
            points,
        })
    }

    /// One series per configured window, in configuration order.
    pub fn compute_all(
        &self,
        series: &TimeSeriesStore,
    ) -> Result<Vec<MovingAverageSeries>, AnalyticsError> {
        self.windows
            .iter()
            .map(|&w| self.compute_series(series, w))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Days;
    use rust_decimal_macros::dec;

    fn store(prices: &[Decimal]) -> TimeSeriesStore {
        let start = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        let observations = prices
            .iter()
            .enumerate()
            .map(|(i, &p)| Observation::new(start + Days::new(i as u64), p))
            .collect();
        TimeSeriesStore::load(Benchmark::Wti, observations).unwrap()
    }

    #[test]
    fn yields_one_point_per_full_window() {
        let series = store(&[dec!(1), dec!(2), dec!(3), dec!(4), dec!(5)]);
        let engine = MovingAverageEngine::default();

        let values: Vec<_> = engine.compute(&series, 3).unwrap().map(|p| p.value).collect();
        assert_eq!(values, vec![dec!(2), dec!(3), dec!(4)]);
    }

    #[test]
    fn first_point_is_dated_on_the_window_th_observation() {
        let series = store(&[dec!(10), dec!(20), dec!(30)]);
        let engine = MovingAverageEngine::default();

        let first = engine.compute(&series, 2).unwrap().next().unwrap();
        assert_eq!(first.date, series.observations()[1].date);
        assert_eq!(first.value, dec!(15));
    }

    #[test]
    fn window_of_one_echoes_prices() {
        let prices = [dec!(80.5), dec!(81.25), dec!(79)];
        let series = store(&prices);
        let engine = MovingAverageEngine::default();

        let values: Vec<_> = engine.compute(&series, 1).unwrap().map(|p| p.value).collect();
        assert_eq!(values, prices.to_vec());
    }

    #[test]
    fn window_longer_than_series_is_empty() {
        let series = store(&[dec!(1), dec!(2)]);
        let engine = MovingAverageEngine::default();

        let ma = engine.compute(&series, 3).unwrap();
        assert_eq!(ma.len(), 0);
        assert_eq!(ma.count(), 0);
    }

    #[test]
    fn empty_series_is_empty() {
        let series = store(&[]);
        let engine = MovingAverageEngine::default();
        assert_eq!(engine.compute(&series, 50).unwrap().count(), 0);
    }

    #[test]
    fn zero_window_is_rejected() {
        let series = store(&[dec!(1)]);
        let engine = MovingAverageEngine::default();
        assert_eq!(
            engine.compute(&series, 0).unwrap_err(),
            AnalyticsError::InvalidWindow(0)
        );
        assert_eq!(
            MovingAverageEngine::new(vec![50, 0]).unwrap_err(),
            AnalyticsError::InvalidWindow(0)
        );
        assert_eq!(
            MovingAverageEngine::new(Vec::new()).unwrap_err(),
            AnalyticsError::NoWindows
        );
        assert_eq!(
            MovingAverageEngine::new(vec![50, 200, 50]).unwrap_err(),
            AnalyticsError::DuplicateWindow(50)
        );
    }

    #[test]
    fn exact_size_matches_output() {
        let series = store(&[dec!(1); 10]);
        let engine = MovingAverageEngine::default();
        let ma = engine.compute(&series, 4).unwrap();
        assert_eq!(ma.len(), 7);
    }

    #[test]
    fn compute_all_follows_configured_windows() {
        let series = store(&[dec!(100); 300]);
        let engine = MovingAverageEngine::default();

        let all = engine.compute_all(&series).unwrap();
        assert_eq!(all.iter().map(|s| s.window).collect::<Vec<_>>(), vec![50, 200]);
        assert_eq!(all[0].points.len(), 251);
        assert_eq!(all[1].points.len(), 101);
        assert!(all.iter().flat_map(|s| &s.points).all(|p| p.value == dec!(100)));
    }

    #[test]
    fn value_on_finds_defined_dates_only() {
        let series = store(&[dec!(2), dec!(4), dec!(6)]);
        let engine = MovingAverageEngine::default();
        let ma = engine.compute_series(&series, 2).unwrap();

        let dates: Vec<_> = series.observations().iter().map(|o| o.date).collect();
        assert_eq!(ma.value_on(dates[0]), None);
        assert_eq!(ma.value_on(dates[2]), Some(dec!(5)));
    }
}
