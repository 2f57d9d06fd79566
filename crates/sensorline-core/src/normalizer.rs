//! Normalizer — turns one [`RawReading`] into one [`CanonicalRecord`].
//!
//! Steps, in order: pick the sample at `value_index`, reject it unless it is
//! a finite number, build the payload, merge tags (defaults first, then the
//! allow-listed upstream keys), resolve the timestamp under the configured
//! policy. The stage holds no mutable state and performs no I/O, so one
//! instance can be shared across threads behind an `Arc`.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::clock::Clock;
use crate::config::{StageConfig, TimestampPolicy};
use crate::error::{ConfigError, NormalizationError};
use crate::types::{CanonicalRecord, Payload, RawReading, TagSet};

pub struct Normalizer {
    config: StageConfig,
    clock: Arc<dyn Clock>,
}

impl Normalizer {
    /// Build a stage from a validated config and the clock it will consult
    /// when a reading arrives without a timestamp.
    pub fn new(config: StageConfig, clock: Arc<dyn Clock>) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config, clock })
    }

    pub fn normalize(&self, raw: &RawReading) -> Result<CanonicalRecord, NormalizationError> {
        let value = self.extract_value(raw)?;
        let timestamp = self.resolve_timestamp(raw)?;

        Ok(CanonicalRecord {
            measurement: self.config.measurement_name.clone(),
            payload: Payload {
                value,
                unit: self.config.unit.clone(),
            },
            tags: self.merge_tags(raw.source_tags.as_ref()),
            timestamp,
        })
    }

    fn extract_value(&self, raw: &RawReading) -> Result<f64, NormalizationError> {
        let index = self.config.value_index;
        let sample = raw.values.get(index).ok_or(NormalizationError::MissingValue {
            index,
            len: raw.values.len(),
        })?;
        sample.as_finite().ok_or_else(|| NormalizationError::InvalidValue {
            index,
            found: sample.to_string(),
        })
    }

    /// Upstream keys outside the allow-list are dropped, never forwarded.
    fn merge_tags(&self, source_tags: Option<&TagSet>) -> TagSet {
        let mut tags = self.config.default_tags.clone();
        if let Some(source_tags) = source_tags {
            for (key, value) in source_tags {
                if self.config.allowed_override_keys.contains(key) {
                    tags.insert(key.clone(), value.clone());
                }
            }
        }
        tags
    }

    fn resolve_timestamp(&self, raw: &RawReading) -> Result<DateTime<Utc>, NormalizationError> {
        match (raw.timestamp, self.config.timestamp_policy) {
            (Some(ts), _) => Ok(ts),
            (None, TimestampPolicy::StageClockOnMissing) => Ok(self.clock.now()),
            (None, policy @ (TimestampPolicy::Passthrough | TimestampPolicy::RequireUpstream)) => {
                Err(NormalizationError::MissingTimestamp { policy })
            }
        }
    }
}

impl std::fmt::Debug for Normalizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Normalizer")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
