// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! YAML configuration parser with strict validation.
//!
//! Holds the tunables that govern statistical stability versus total run
//! time. Any invalid field results in a HardValidationError before a single
//! codec is measured.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{HardValidationError, TpcError, TpcResult};
use crate::types::{CodecName, Count};

/// Upper bound on a single warmup phase: 10 minutes.
const MAX_WARMUP_MS: u64 = 600_000;

/// Upper bound on one advisory pause: 10 seconds.
const MAX_PAUSE_MS: u64 = 10_000;

/// Raw measurement settings as parsed from YAML (before validation).
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawMeasurementConfig {
    #[serde(default = "default_iterations")]
    iterations: u32,
    #[serde(default = "default_trials")]
    trials: u32,
    #[serde(default = "default_warmup_ms")]
    warmup_ms: u64,
    #[serde(default = "default_create_multiplier")]
    create_multiplier: u32,
    #[serde(default = "default_pause_ms")]
    pause_ms: u64,
    #[serde(default = "default_serialize_pause_every")]
    serialize_pause_every: u32,
}

fn default_iterations() -> u32 {
    2000
}

fn default_trials() -> u32 {
    20
}

fn default_warmup_ms() -> u64 {
    3000
}

fn default_create_multiplier() -> u32 {
    100 // construction is far cheaper per call
}

fn default_pause_ms() -> u64 {
    100
}

fn default_serialize_pause_every() -> u32 {
    1000
}

impl Default for RawMeasurementConfig {
    fn default() -> Self {
        Self {
            iterations: default_iterations(),
            trials: default_trials(),
            warmup_ms: default_warmup_ms(),
            create_multiplier: default_create_multiplier(),
            pause_ms: default_pause_ms(),
            serialize_pause_every: default_serialize_pause_every(),
        }
    }
}

/// Raw root configuration file.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    #[serde(default)]
    measurement: RawMeasurementConfig,
    #[serde(default)]
    codecs: Option<Vec<String>>,
}

/// Validated measurement settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MeasurementSettings {
    /// Calls per trial for serialize and deserialize.
    pub iterations: Count,
    /// Independent trials per operation; the minimum is reported.
    pub trials: Count,
    /// Wall-clock warmup budget per operation.
    #[serde(with = "duration_ms")]
    pub warmup: Duration,
    /// Construction runs `iterations * create_multiplier` calls per trial.
    pub create_multiplier: Count,
    /// Length of each half of an advisory pause.
    #[serde(with = "duration_ms")]
    pub pause: Duration,
    /// Serialize trials pause every this many calls. 0 disables.
    pub serialize_pause_every: u32,
}

impl MeasurementSettings {
    /// Calls per construction trial.
    pub fn create_iterations(&self) -> u32 {
        self.iterations
            .get()
            .saturating_mul(self.create_multiplier.get())
    }

    /// Set the warmup budget, rejecting values above the 10 minute cap.
    pub fn set_warmup_ms(&mut self, warmup_ms: u64) -> Result<(), HardValidationError> {
        self.warmup = checked_millis("warmup_ms", warmup_ms, MAX_WARMUP_MS)?;
        Ok(())
    }

    /// Set the advisory pause half-length, rejecting values above 10 seconds.
    pub fn set_pause_ms(&mut self, pause_ms: u64) -> Result<(), HardValidationError> {
        self.pause = checked_millis("pause_ms", pause_ms, MAX_PAUSE_MS)?;
        Ok(())
    }
}

fn checked_millis(
    field: &'static str,
    value: u64,
    max: u64,
) -> Result<Duration, HardValidationError> {
    if value > max {
        return Err(HardValidationError::InvalidFieldValue {
            field,
            value: value.to_string(),
            reason: format!("Must not exceed {}ms", max),
        });
    }
    Ok(Duration::from_millis(value))
}

impl Default for MeasurementSettings {
    fn default() -> Self {
        Self {
            iterations: Count::at_least_one(default_iterations()),
            trials: Count::at_least_one(default_trials()),
            warmup: Duration::from_millis(default_warmup_ms()),
            create_multiplier: Count::at_least_one(default_create_multiplier()),
            pause: Duration::from_millis(default_pause_ms()),
            serialize_pause_every: default_serialize_pause_every(),
        }
    }
}

/// Complete validated configuration.
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub measurement: MeasurementSettings,
    /// Codecs to run, in registry order. `None` runs every codec.
    pub codecs: Option<Vec<CodecName>>,
}

/// Configuration loader with strict validation.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load and validate configuration from a YAML file.
    pub fn load_file(path: impl AsRef<Path>) -> TpcResult<Config> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(TpcError::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| TpcError::Io {
            context: "reading config file",
            source: e,
        })?;

        Self::load_string(&content)
    }

    /// Load and validate configuration from a YAML string.
    ///
    /// An empty document yields the defaults.
    pub fn load_string(content: &str) -> TpcResult<Config> {
        let raw: RawConfig = if content.trim().is_empty() {
            RawConfig::default()
        } else {
            serde_yaml::from_str(content).map_err(|e| TpcError::ConfigParse {
                message: format!("YAML parse error: {}", e),
            })?
        };

        Self::validate(raw)
    }

    fn validate(raw: RawConfig) -> TpcResult<Config> {
        let measurement = Self::validate_measurement(raw.measurement)?;

        let codecs = match raw.codecs {
            Some(names) => {
                if names.is_empty() {
                    return Err(HardValidationError::InvalidFieldValue {
                        field: "codecs",
                        value: "[]".to_string(),
                        reason: "Omit the list to run every codec".to_string(),
                    }
                    .into());
                }
                let mut validated: Vec<CodecName> = Vec::with_capacity(names.len());
                for name in names {
                    let name = CodecName::new(name)?;
                    if validated.contains(&name) {
                        return Err(HardValidationError::DuplicateCodecName {
                            name: name.to_string(),
                        }
                        .into());
                    }
                    validated.push(name);
                }
                Some(validated)
            }
            None => None,
        };

        Ok(Config {
            measurement,
            codecs,
        })
    }

    fn validate_measurement(
        raw: RawMeasurementConfig,
    ) -> Result<MeasurementSettings, HardValidationError> {
        let iterations = Count::new("iterations", raw.iterations)?;
        let trials = Count::new("trials", raw.trials)?;
        let create_multiplier = Count::new("create_multiplier", raw.create_multiplier)?;

        let warmup = checked_millis("warmup_ms", raw.warmup_ms, MAX_WARMUP_MS)?;
        let pause = checked_millis("pause_ms", raw.pause_ms, MAX_PAUSE_MS)?;

        Ok(MeasurementSettings {
            iterations,
            trials,
            warmup,
            create_multiplier,
            pause,
            serialize_pause_every: raw.serialize_pause_every,
        })
    }
}

mod duration_ms {
    use std::time::Duration;

    use serde::Serializer;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_millis() as u64)
    }
}
