use crate::enums::EventCategory;
use crate::error::CoreError;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single daily closing price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observation {
    pub date: NaiveDate,
    pub price: Decimal,
}

impl Observation {
    pub fn new(date: NaiveDate, price: Decimal) -> Self {
        Self { date, price }
    }
}

/// A dated market event to annotate on the chart and measure the impact of.
///
/// Events are immutable once loaded; fields are private and exposed through accessors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "EventRecord")]
pub struct Event {
    date: NaiveDate,
    label: String,
    category: EventCategory,
}

/// The unvalidated wire shape of an `Event`.
#[derive(Deserialize)]
struct EventRecord {
    date: NaiveDate,
    label: String,
    category: EventCategory,
}

impl TryFrom<EventRecord> for Event {
    type Error = CoreError;

    fn try_from(record: EventRecord) -> Result<Self, Self::Error> {
        Event::new(record.date, record.label, record.category)
    }
}

impl Event {
    /// Creates a new `Event`, rejecting blank labels.
    pub fn new(
        date: NaiveDate,
        label: impl Into<String>,
        category: EventCategory,
    ) -> Result<Self, CoreError> {
        let label = label.into();
        if label.trim().is_empty() {
            return Err(CoreError::InvalidInput(
                format!("event on {date}"),
                "label must not be empty".to_string(),
            ));
        }
        Ok(Self {
            date,
            label,
            category,
        })
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn category(&self) -> EventCategory {
        self.category
    }
}
