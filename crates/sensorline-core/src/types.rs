//! Core types for sensorline-core.
//!
//! This module defines the two records that cross the stage boundary: the
//! inbound [`RawReading`] handed over by a collector and the outbound
//! [`CanonicalRecord`] handed to the sink. Both are transient values built
//! once per invocation and never mutated afterwards.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Ordered string-to-string label map. Ordered so that two records with the
/// same tags always serialize to the same bytes.
pub type TagSet = BTreeMap<String, String>;

/// One element of [`RawReading::values`].
///
/// Collectors are not trusted to send numbers only, so anything that is not a
/// JSON number is kept as-is and rejected by the normalizer rather than by
/// the decoder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Sample {
    Number(f64),
    Other(serde_json::Value),
}

impl Sample {
    /// The sample as a finite `f64`, or `None` for NaN, infinities and
    /// non-numeric values.
    pub fn as_finite(&self) -> Option<f64> {
        match self {
            Sample::Number(n) if n.is_finite() => Some(*n),
            _ => None,
        }
    }
}

impl From<f64> for Sample {
    fn from(n: f64) -> Self {
        Sample::Number(n)
    }
}

impl std::fmt::Display for Sample {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Sample::Number(n) => write!(f, "{n}"),
            Sample::Other(v) => write!(f, "{v}"),
        }
    }
}

/// An unprocessed reading as delivered by the upstream collector.
///
/// The wire form accepts both the collector's snake_case keys and the
/// camelCase / `payload` shape that flow-runtime messages carry.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RawReading {
    /// Ordered samples, e.g. the holding registers of one Modbus poll.
    #[serde(alias = "payload")]
    pub values: Vec<Sample>,
    /// Metadata attached by the collector (connection, source, ...).
    #[serde(default, alias = "sourceTags", skip_serializing_if = "Option::is_none")]
    pub source_tags: Option<TagSet>,
    /// When the device took the reading, if the collector knows.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl RawReading {
    /// A reading with the given numeric samples and no metadata.
    pub fn from_values(values: impl IntoIterator<Item = f64>) -> Self {
        Self {
            values: values.into_iter().map(Sample::from).collect(),
            ..Self::default()
        }
    }
}

/// Field values of a [`CanonicalRecord`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payload {
    pub value: f64,
    pub unit: String,
}

/// The normalised, storage-ready form of one measurement.
///
/// All four fields are always populated; a sink never has to infer anything.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalRecord {
    pub measurement: String,
    pub payload: Payload,
    pub tags: TagSet,
    pub timestamp: DateTime<Utc>,
}
