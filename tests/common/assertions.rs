//! Domain-specific assertion macros for sensorline harnesses.
//!
//! These wrap `pretty_assertions` and add context-rich failure messages that
//! make it clear *which* record invariant was violated.

use sensorline::CanonicalRecord;

/// Assert that a record carries a tag with the expected value.
///
/// ```rust
/// assert_tag!(record, "sensor", "TSS_1");
/// ```
#[macro_export]
macro_rules! assert_tag {
    ($record:expr, $key:expr, $value:expr) => {{
        let record: &sensorline::CanonicalRecord = &$record;
        let key: &str = $key;
        let expected: &str = $value;
        match record.tags.get(key) {
            Some(actual) if actual == expected => {}
            Some(actual) => panic!(
                "assert_tag! failed:\n  record.tags[{:?}]\n  expected: {:?}\n  actual:   {:?}",
                key, expected, actual
            ),
            None => panic!(
                "assert_tag! failed: tag {:?} not found.\n  Available tags: {:?}",
                key,
                record.tags.keys().collect::<Vec<_>>()
            ),
        }
    }};
}

/// Assert that a record does not carry a tag at all.
#[macro_export]
macro_rules! assert_no_tag {
    ($record:expr, $key:expr) => {{
        let record: &sensorline::CanonicalRecord = &$record;
        let key: &str = $key;
        if let Some(value) = record.tags.get(key) {
            panic!(
                "assert_no_tag! failed: tag {:?} present with value {:?}",
                key, value
            );
        }
    }};
}

/// Assert that a normalisation result is the expected error variant.
///
/// ```rust
/// assert_rejected!(stage.normalize(&raw), NormalizationError::MissingValue { .. });
/// ```
#[macro_export]
macro_rules! assert_rejected {
    ($result:expr, $pattern:pat) => {{
        match $result {
            Err($pattern) => {}
            Err(other) => panic!(
                "assert_rejected! failed: wrong error\n  expected: {}\n  actual:   {:?}",
                stringify!($pattern),
                other
            ),
            Ok(record) => panic!(
                "assert_rejected! failed: reading was accepted\n  expected: {}\n  record:   {:?}",
                stringify!($pattern),
                record
            ),
        }
    }};
}

/// Assert the storage-ready invariant: every field populated, payload finite.
pub fn assert_storage_ready(record: &CanonicalRecord) {
    assert!(
        !record.measurement.trim().is_empty(),
        "record must have a measurement: {record:?}"
    );
    assert!(
        record.payload.value.is_finite(),
        "payload value must be finite: {record:?}"
    );
    assert!(
        !record.payload.unit.trim().is_empty(),
        "payload must have a unit: {record:?}"
    );
    assert!(
        record.timestamp.timestamp() > 0,
        "record timestamp should not be the Unix epoch: {record:?}"
    );
}
