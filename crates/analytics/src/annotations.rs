use chrono::NaiveDate;
use core_types::{Event, EventCategory};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use timeseries::TimeSeriesStore;

/// A chart marker: an event that fell on a trading day, pinned to that day's close.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    pub date: NaiveDate,
    pub label: String,
    pub category: EventCategory,
    pub price: Decimal,
}

/// Annotations for the events whose date has an exact observation in `series`.
///
/// Unlike impact lookups there is no fall-back to earlier days; an event on a
/// weekend simply has no marker.
pub fn annotate(events: &[Event], series: &TimeSeriesStore) -> Vec<Annotation> {
    let observations = series.observations();
    events
        .iter()
        .filter_map(|event| {
            let idx = observations
                .binary_search_by_key(&event.date(), |o| o.date)
                .ok()?;
            Some(Annotation {
                date: event.date(),
                label: event.label().to_string(),
                category: event.category(),
                price: observations[idx].price,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::{Benchmark, Observation};
    use rust_decimal_macros::dec;

    #[test]
    fn only_events_on_trading_days_are_annotated() {
        let d = |day| NaiveDate::from_ymd_opt(2019, 9, day).unwrap();
        let series = TimeSeriesStore::load(
            Benchmark::Brent,
            vec![
                Observation::new(d(13), dec!(60.22)),
                Observation::new(d(16), dec!(69.02)),
            ],
        )
        .unwrap();
        let events = vec![
            // A Saturday: no marker.
            Event::new(d(14), "Saudi Abqaiq Attack", EventCategory::Conflict).unwrap(),
            Event::new(d(16), "Markets reopen", EventCategory::Economic).unwrap(),
        ];

        let annotations = annotate(&events, &series);
        assert_eq!(annotations.len(), 1);
        assert_eq!(annotations[0].label, "Markets reopen");
        assert_eq!(annotations[0].price, dec!(69.02));
    }
}
