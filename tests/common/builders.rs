//! Test builders — ergonomic constructors for readings, configs and stages.
//!
//! These builders are designed for readability in test assertions, not for
//! production use. They panic on invalid input rather than returning `Result`.

use chrono::{DateTime, TimeZone, Utc};
use sensorline::{FixedClock, Normalizer, RawReading, Sample, StageConfig, TagSet, TimestampPolicy};
use std::sync::Arc;

/// The instant every test clock reports.
pub fn test_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap()
}

/// Build a [`TagSet`] from string pairs.
pub fn tags(pairs: &[(&str, &str)]) -> TagSet {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

// ---------------------------------------------------------------------------
// RawReadingBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for [`RawReading`] fixtures.
///
/// ```rust
/// let raw = RawReadingBuilder::new([12.5])
///     .source_tag("location", "raceway_2")
///     .timestamp(test_now())
///     .build();
/// ```
pub struct RawReadingBuilder {
    values: Vec<Sample>,
    source_tags: Option<TagSet>,
    timestamp: Option<DateTime<Utc>>,
}

impl RawReadingBuilder {
    pub fn new(values: impl IntoIterator<Item = f64>) -> Self {
        Self {
            values: values.into_iter().map(Sample::from).collect(),
            source_tags: None,
            timestamp: None,
        }
    }

    pub fn empty() -> Self {
        Self::new([])
    }

    pub fn sample(mut self, sample: Sample) -> Self {
        self.values.push(sample);
        self
    }

    pub fn source_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.source_tags
            .get_or_insert_with(TagSet::new)
            .insert(key.into(), value.into());
        self
    }

    pub fn timestamp(mut self, ts: DateTime<Utc>) -> Self {
        self.timestamp = Some(ts);
        self
    }

    pub fn build(self) -> RawReading {
        RawReading {
            values: self.values,
            source_tags: self.source_tags,
            timestamp: self.timestamp,
        }
    }
}

// ---------------------------------------------------------------------------
// StageBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for a [`Normalizer`] on a fixed clock. Starts from the TSS
/// stage the defaults describe.
pub struct StageBuilder {
    config: StageConfig,
    now: DateTime<Utc>,
}

impl StageBuilder {
    pub fn tss() -> Self {
        let mut config = StageConfig::new("tss_rs485", "tbd");
        config.default_tags = tags(&[
            ("location", "spirulina"),
            ("sensor", "TSS_1"),
            ("source", "modbus"),
        ]);
        Self { config, now: test_now() }
    }

    pub fn policy(mut self, policy: TimestampPolicy) -> Self {
        self.config.timestamp_policy = policy;
        self
    }

    pub fn value_index(mut self, index: usize) -> Self {
        self.config.value_index = index;
        self
    }

    pub fn allow(mut self, key: impl Into<String>) -> Self {
        self.config.allowed_override_keys.insert(key.into());
        self
    }

    pub fn default_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.default_tags.insert(key.into(), value.into());
        self
    }

    pub fn now(mut self, now: DateTime<Utc>) -> Self {
        self.now = now;
        self
    }

    pub fn build(self) -> Normalizer {
        Normalizer::new(self.config, Arc::new(FixedClock(self.now)))
            .expect("test stage config must be valid")
    }
}
