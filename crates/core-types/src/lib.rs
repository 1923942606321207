//! # Crude Explorer Core Types
//!
//! Layer 0 of the workspace. Every other crate speaks in terms of the
//! `Observation`, `Event` and `Benchmark` types defined here, so ingestion code
//! only has to produce these once at the boundary.

pub mod enums;
pub mod error;
pub mod structs;

// Re-export the core types to provide a clean public API.
pub use enums::{Benchmark, EventCategory};
pub use error::CoreError;
pub use structs::{Event, Observation};
