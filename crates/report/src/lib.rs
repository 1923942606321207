//! # Crude Explorer Report
//!
//! Merges moving-average series and event-impact analyses into the single
//! `DashboardReport` the presentation layer renders. The assembler performs no
//! calculation; it only checks that its inputs describe the same instruments and
//! arranges them by instrument.

pub mod assembler;
pub mod error;
pub mod model;

pub use assembler::{InstrumentContext, ReportAssembler};
pub use error::ConsistencyError;
pub use model::{DashboardReport, InstrumentReport};
