//! # Crude Explorer Events
//!
//! The dated geopolitical, economic and OPEC events the dashboard annotates and
//! measures the price impact of.
//!
//! As a Layer 0 crate, it depends only on `core-types`. The built-in catalog can be
//! replaced by a TOML file with the same shape.

// Declare the modules that make up this crate.
pub mod catalog;
pub mod error;

// Re-export the core types to provide a clean public API.
pub use catalog::EventCatalog;
pub use error::CatalogError;
