//! Configuration types for sensorline.
//!
//! [`AppConfig::load`] reads `~/.config/sensorline/config.toml` (or an explicit
//! path), seeding the default location with the embedded defaults on first
//! use. [`AppConfig::defaults`] returns the same defaults without touching the
//! filesystem (useful in tests).

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::types::TagSet;

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[stage]
measurement_name      = "tss_rs485"
unit                  = "tbd"
allowed_override_keys = []
value_index           = 0
timestamp_policy      = "STAGE_CLOCK_ON_MISSING"

[stage.default_tags]
location = "spirulina"
sensor   = "TSS_1"
source   = "modbus"

[output]
format = "json"
"#;

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub stage: StageConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// `[stage]` section: everything the normalizer needs, fixed at construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageConfig {
    /// Written verbatim to `CanonicalRecord::measurement`.
    pub measurement_name: String,
    /// Unit label written to every payload.
    pub unit: String,
    /// Baseline tags present on every record. May be empty.
    #[serde(default)]
    pub default_tags: TagSet,
    /// Keys of `source_tags` that may replace a default tag.
    #[serde(default)]
    pub allowed_override_keys: BTreeSet<String>,
    /// Which element of `values` is the measured quantity.
    #[serde(default)]
    pub value_index: usize,
    #[serde(default)]
    pub timestamp_policy: TimestampPolicy,
}

impl StageConfig {
    /// A config with the given measurement and unit, no tags, index 0 and the
    /// default timestamp policy.
    pub fn new(measurement_name: impl Into<String>, unit: impl Into<String>) -> Self {
        Self {
            measurement_name: measurement_name.into(),
            unit: unit.into(),
            default_tags: TagSet::new(),
            allowed_override_keys: BTreeSet::new(),
            value_index: 0,
            timestamp_policy: TimestampPolicy::default(),
        }
    }

    /// Reject configs that would produce records a sink cannot store.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.measurement_name.trim().is_empty() {
            return Err(ConfigError::BlankMeasurement);
        }
        if self.unit.trim().is_empty() {
            return Err(ConfigError::BlankUnit);
        }
        if self.default_tags.keys().any(|k| k.trim().is_empty()) {
            return Err(ConfigError::BlankTagKey);
        }
        if self.allowed_override_keys.iter().any(|k| k.trim().is_empty()) {
            return Err(ConfigError::BlankOverrideKey);
        }
        Ok(())
    }
}

/// How the stage resolves a record's timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TimestampPolicy {
    /// Use the upstream timestamp; fail if there is none.
    Passthrough,
    /// Use the upstream timestamp, or the stage clock when it is missing.
    #[default]
    StageClockOnMissing,
    /// Same behaviour as `Passthrough`, spelled out at the call site.
    RequireUpstream,
}

impl std::fmt::Display for TimestampPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TimestampPolicy::Passthrough => write!(f, "PASSTHROUGH"),
            TimestampPolicy::StageClockOnMissing => write!(f, "STAGE_CLOCK_ON_MISSING"),
            TimestampPolicy::RequireUpstream => write!(f, "REQUIRE_UPSTREAM"),
        }
    }
}

/// `[output]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
}

/// Rendering used when handing records to the sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// One compact JSON object per line.
    #[default]
    Json,
    /// InfluxDB line protocol.
    LineProtocol,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "line" | "line_protocol" | "line-protocol" | "influx" => Ok(OutputFormat::LineProtocol),
            other => Err(format!("unknown output format: {other}")),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::defaults()
    }
}

impl AppConfig {
    /// Load configuration from `path`, or from the default location.
    ///
    /// An explicit `path` must exist and must name `measurement_name` and
    /// `unit` itself; optional keys fall back to their serde defaults. Without a
    /// path, the default location is used and seeded with the built-in
    /// defaults if it does not exist yet.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => {
                let path = config_path();
                if !path.exists() {
                    if let Some(parent) = path.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(&path, DEFAULT_CONFIG.trim_start())?;
                }
                path
            }
        };

        config::Config::builder()
            .add_source(config::File::from(path.as_path()).required(true))
            .build()?
            .try_deserialize()
            .map_err(Into::into)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

fn config_path() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
                .join(".config")
        })
        .join("sensorline")
        .join("config.toml")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
