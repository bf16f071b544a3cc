//! Configuration for ingestion runs
//!
//! `IngestConfig` and its type-safe builder, with validation and defaults
//! from `utils::constants`.

pub mod builder;
pub mod getters;
pub mod methods;
pub mod types;

pub use builder::{IngestConfigBuilder, WithBaseDir};
pub use types::IngestConfig;
