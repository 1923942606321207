use crate::error::CatalogError;
use chrono::NaiveDate;
use core_types::{Event, EventCategory};
use serde::Deserialize;
use std::path::Path;

use EventCategory::{Conflict, Economic, PolicyOpec};

const BUILTIN: &[(i32, u32, u32, &str, EventCategory)] = &[
    (1980, 9, 22, "Start of Iran-Iraq War", Conflict),
    (1990, 8, 2, "Iraq Invades Kuwait", Conflict),
    (1997, 7, 2, "Asian Financial Crisis", Economic),
    (2001, 9, 11, "9/11 Terrorist Attacks", Conflict),
    (2003, 3, 20, "US Invasion of Iraq", Conflict),
    (2008, 7, 11, "2008 Price Peak", Economic),
    (2011, 2, 15, "Arab Spring Begins", Conflict),
    (2014, 11, 27, "OPEC No-Cut Decision", PolicyOpec),
    (2019, 9, 14, "Saudi Abqaiq Attack", Conflict),
    (2020, 4, 20, "WTI Negative Prices", Economic),
    (2022, 2, 24, "Invasion of Ukraine", Conflict),
    (2023, 10, 7, "Israel-Hamas War", Conflict),
    (2024, 4, 13, "Iran-Israel Escalation", Conflict),
    (2025, 6, 13, "Middle East Crisis 2025", Conflict),
    (2025, 12, 9, "OPEC+ Extends Cuts to 2026", PolicyOpec),
];

/// The on-disk shape of a catalog file:
///
/// ```toml
/// [[events]]
/// date = "2022-02-24"
/// label = "Invasion of Ukraine"
/// category = "Conflict"
/// ```
#[derive(Debug, Deserialize)]
struct CatalogFile {
    events: Vec<CatalogEntry>,
}

#[derive(Debug, Deserialize)]
struct CatalogEntry {
    date: NaiveDate,
    label: String,
    category: EventCategory,
}

/// An immutable, date-ordered list of events.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EventCatalog {
    events: Vec<Event>,
}

impl EventCatalog {
    /// Builds a catalog, ordering the events by date. Events sharing a date keep
    /// their relative order.
    pub fn new(mut events: Vec<Event>) -> Self {
        events.sort_by_key(Event::date);
        Self { events }
    }

    /// The catalog shipped with the dashboard.
    pub fn builtin() -> Self {
        let events = BUILTIN
            .iter()
            .filter_map(|&(y, m, d, label, category)| {
                let date = NaiveDate::from_ymd_opt(y, m, d)?;
                Event::new(date, label, category).ok()
            })
            .collect();
        Self::new(events)
    }

    /// Loads a catalog from a TOML file (see `CatalogFile` for the layout).
    pub fn from_file(path: &Path) -> Result<Self, CatalogError> {
        let file = config::Config::builder()
            .add_source(config::File::from(path))
            .build()?
            .try_deserialize::<CatalogFile>()?;

        if file.events.is_empty() {
            return Err(CatalogError::Empty);
        }

        let events = file
            .events
            .into_iter()
            .map(|e| Event::new(e.date, e.label, e.category))
            .collect::<Result<Vec<_>, _>>()?;

        tracing::info!("Loaded {} events from {}", events.len(), path.display());
        Ok(Self::new(events))
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Event> {
        self.events.iter()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Distinct categories present, in order of first appearance.
    pub fn categories(&self) -> Vec<EventCategory> {
        let mut seen = Vec::new();
        for event in &self.events {
            if !seen.contains(&event.category()) {
                seen.push(event.category());
            }
        }
        seen
    }

    /// Keeps only events whose category is in `categories`.
    pub fn filter_categories(&self, categories: &[EventCategory]) -> Self {
        Self {
            events: self
                .events
                .iter()
                .filter(|e| categories.contains(&e.category()))
                .cloned()
                .collect(),
        }
    }

    /// Keeps only events dated within `[from, to]`. An open bound is unbounded.
    pub fn within(&self, from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        Self {
            events: self
                .events
                .iter()
                .filter(|e| from.is_none_or(|f| e.date() >= f) && to.is_none_or(|t| e.date() <= t))
                .cloned()
                .collect(),
        }
    }
}

impl<'a> IntoIterator for &'a EventCatalog {
    type Item = &'a Event;
    type IntoIter = std::slice::Iter<'a, Event>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn builtin_catalog_is_complete_and_sorted() {
        let catalog = EventCatalog::builtin();
        assert_eq!(catalog.len(), 15);
        assert!(catalog.events().windows(2).all(|w| w[0].date() <= w[1].date()));
        assert_eq!(catalog.events()[0].label(), "Start of Iran-Iraq War");
        assert_eq!(
            catalog.categories(),
            vec![Conflict, Economic, PolicyOpec]
        );
    }

    #[test]
    fn filters_by_category() {
        let opec = EventCatalog::builtin().filter_categories(&[PolicyOpec]);
        let labels: Vec<_> = opec.iter().map(|e| e.label()).collect();
        assert_eq!(labels, vec!["OPEC No-Cut Decision", "OPEC+ Extends Cuts to 2026"]);

        assert!(EventCatalog::builtin().filter_categories(&[]).is_empty());
    }

    #[test]
    fn filters_by_date_range() {
        let catalog = EventCatalog::builtin();
        let recent = catalog.within(Some(date(2022, 1, 1)), Some(date(2023, 12, 31)));
        assert_eq!(recent.len(), 2);

        let open_start = catalog.within(None, Some(date(1990, 8, 2)));
        assert_eq!(open_start.len(), 2);
    }

    #[test]
    fn new_sorts_by_date() {
        let late = Event::new(date(2020, 1, 1), "late", Economic).unwrap();
        let early = Event::new(date(2010, 1, 1), "early", Conflict).unwrap();
        let catalog = EventCatalog::new(vec![late, early]);
        assert_eq!(catalog.events()[0].label(), "early");
    }

    #[test]
    fn loads_catalog_from_toml_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        write!(
            file,
            r#"
[[events]]
date = "2022-02-24"
label = "Invasion of Ukraine"
category = "Conflict"

[[events]]
date = "2014-11-27"
label = "OPEC No-Cut Decision"
category = "Policy/OPEC"
"#
        )
        .unwrap();

        let catalog = EventCatalog::from_file(file.path()).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.events()[0].category(), PolicyOpec);
    }

    #[test]
    fn rejects_blank_labels_in_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        write!(
            file,
            r#"
[[events]]
date = "2022-02-24"
label = ""
category = "Conflict"
"#
        )
        .unwrap();

        let err = EventCatalog::from_file(file.path()).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidEvent(_)));
    }
}
