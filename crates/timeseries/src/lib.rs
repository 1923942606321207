//! # Crude Explorer Time Series
//!
//! Holds the validated daily price history of a single benchmark and answers
//! "what was the price on this date" with a bounded fall-back to earlier
//! trading days.
//!
//! - `TimeSeriesStore`: the sorted, duplicate-free series.
//! - `StoreError`: `Data` for malformed input (fatal) and `NotFound` for lookups
//!   that fall outside the lookback window (recoverable by the caller).

pub mod error;
pub mod store;

pub use error::{DataError, StoreError};
pub use store::{DEFAULT_LOOKBACK_DAYS, TimeSeriesStore};
