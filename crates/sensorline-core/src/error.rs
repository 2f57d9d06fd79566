//! Error types for sensorline-core.

use crate::config::TimestampPolicy;
use thiserror::Error;

/// Why a raw reading was rejected by the stage.
///
/// Every variant is an expected outcome for malformed upstream data; the
/// caller decides whether to drop, dead-letter or retry.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NormalizationError {
    #[error("no sample at index {index} (reading has {len} values)")]
    MissingValue { index: usize, len: usize },

    #[error("sample at index {index} is not a finite number: {found}")]
    InvalidValue { index: usize, found: String },

    #[error("reading has no timestamp and policy {policy} requires one")]
    MissingTimestamp { policy: TimestampPolicy },
}

/// Stage configuration that cannot be used to build a normalizer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("measurement_name must not be blank")]
    BlankMeasurement,

    #[error("unit must not be blank")]
    BlankUnit,

    #[error("default_tags contains a blank key")]
    BlankTagKey,

    #[error("allowed_override_keys contains a blank key")]
    BlankOverrideKey,
}

/// A record that cannot be rendered for the sink.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("{field} contains a line break, which line protocol cannot carry")]
    InvalidCharacter { field: String },

    #[error("timestamp {0} cannot be expressed in unix nanoseconds")]
    TimestampOutOfRange(chrono::DateTime<chrono::Utc>),

    #[error("json encoding failed: {0}")]
    Json(#[from] serde_json::Error),
}
