use chrono::NaiveDate;
use core_types::Benchmark;
use rust_decimal::Decimal;
use thiserror::Error;

/// The defect found in an input series. Any of these aborts the run.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DataError {
    #[error("observation dated {date} is not after the preceding observation dated {previous}")]
    Unsorted { previous: NaiveDate, date: NaiveDate },

    #[error("duplicate observation for {0}")]
    DuplicateDate(NaiveDate),

    #[error("non-positive price {price} on {date}")]
    NonPositivePrice { date: NaiveDate, price: Decimal },

    #[error("invalid date range: {from} is after {to}")]
    InvalidRange { from: NaiveDate, to: NaiveDate },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Malformed {instrument} series: {source}")]
    Data {
        instrument: Benchmark,
        #[source]
        source: DataError,
    },

    #[error("No {instrument} observation on or within {lookback_days} days before {date}")]
    NotFound {
        instrument: Benchmark,
        date: NaiveDate,
        lookback_days: u32,
    },
}
