//! sensorline-core — sensor reading normalization stage.
//!
//! This crate holds the stage itself plus the types that cross its boundary.
//!
//! # Architecture
//!
//! ```text
//! Collector ──► RawReading ──► Normalizer ──► CanonicalRecord ──► Export ──► Sink
//!                                  │
//!                                Clock
//! ```
//!
//! The normalizer is a pure function of its config, the reading and (when the
//! reading has no timestamp) one clock read. Feeding it and writing its output
//! is the host's job.

pub mod clock;
pub mod config;
pub mod error;
pub mod export;
pub mod normalizer;
pub mod types;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{AppConfig, OutputFormat, StageConfig, TimestampPolicy};
pub use error::{ConfigError, ExportError, NormalizationError};
pub use normalizer::Normalizer;
pub use types::{CanonicalRecord, Payload, RawReading, Sample, TagSet};
