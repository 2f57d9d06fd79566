//! sensorline — sensor reading normalization stage.
//!
//! Validates, tags and reshapes raw device readings into canonical
//! time-series records. The stage lives in `sensorline-core`, the input
//! adapters in `sensorline-feeds`; this crate hosts them and re-exports both so
//! that integration tests can import everything from one place.
//!
//! # Architecture
//!
//! ```text
//! Feed ──► Pipeline ──► Normalizer ──► Export ──► stdout
//!              │
//!              └──► dead-letter
//! ```
//!
//! Feeds run on background tasks and talk to the pipeline over a `tokio`
//! channel. The normalizer itself is synchronous and pure.

pub mod pipeline;

pub use sensorline_core::*;
pub use sensorline_feeds as feeds;
