// Copyright 2026 QubitOS Contributors
// SPDX-License-Identifier: Apache-2.0

//! Configuration management for gate synthesis.
//!
//! Configuration is loaded from multiple sources with the following priority
//! (later sources override earlier ones):
//!
//! 1. Built-in defaults
//! 2. synth.yaml file
//! 3. Environment variables (QUBITOS_SYNTH_*, QUBITOS_LOG_*)
//! 4. CLI arguments

use ndarray::Array2;
use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

use crate::error::{Error, Result};
use crate::synthesis::{SynthesisConfig, TargetConfig};
use crate::validation::validate_synthesis_config;

/// Files tried, in order, when no path is given.
const DEFAULT_CONFIG_PATHS: [&str; 2] = ["synth.yaml", "synth.yml"];

/// Main configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Optimization settings
    #[serde(default)]
    pub synthesis: SynthesisConfig,

    /// Target unitary
    #[serde(default)]
    pub target: TargetConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Report output
    #[serde(default)]
    pub output: OutputConfig,

    /// Validation settings
    #[serde(default)]
    pub validation: ValidationConfig,
}

impl Config {
    /// Load configuration from file and environment.
    ///
    /// An explicit path must exist; otherwise the default locations are
    /// tried and built-in defaults used if none is present.
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let mut config = match config_path {
            Some(path) => {
                if !path.exists() {
                    return Err(Error::Config(format!(
                        "config file {} not found",
                        path.display()
                    )));
                }
                Self::from_file(path)?
            }
            None => DEFAULT_CONFIG_PATHS
                .iter()
                .map(Path::new)
                .find(|path| path.exists())
                .map(Self::from_file)
                .transpose()?
                .unwrap_or_default(),
        };

        config.apply_env_overrides();
        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_yaml::from_str(&content)?)
    }

    /// Apply environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| env::var(key).ok());
    }

    /// Apply overrides from a key lookup. Unparseable values are ignored.
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let synth = &mut self.synthesis;
        if let Some(val) = lookup("QUBITOS_SYNTH_CUTOFF").and_then(|v| v.parse().ok()) {
            synth.cutoff = val;
        }
        if let Some(val) = lookup("QUBITOS_SYNTH_GATE_CUTOFF").and_then(|v| v.parse().ok()) {
            synth.gate_cutoff = val;
        }
        if let Some(val) = lookup("QUBITOS_SYNTH_DEPTH").and_then(|v| v.parse().ok()) {
            synth.depth = val;
        }
        if let Some(val) = lookup("QUBITOS_SYNTH_ITERATIONS").and_then(|v| v.parse().ok()) {
            synth.iterations = val;
        }
        if let Some(val) = lookup("QUBITOS_SYNTH_LEARNING_RATE").and_then(|v| v.parse().ok()) {
            synth.learning_rate = val;
        }
        if let Some(val) = lookup("QUBITOS_SYNTH_SEED").and_then(|v| v.parse().ok()) {
            synth.seed = val;
        }
        if let Some(val) = lookup("QUBITOS_SYNTH_REPORT") {
            self.output.report_path = Some(val);
        }
        if let Some(val) = lookup("QUBITOS_LOG_LEVEL") {
            self.logging.level = val;
        }
        if let Some(val) = lookup("QUBITOS_LOG_FORMAT") {
            self.logging.format = val;
        }
    }

    /// Validate configuration.
    pub fn validate(&self) -> Result<()> {
        validate_synthesis_config(&self.synthesis, &self.validation.limits)?;
        self.target_block()?;

        if !["trace", "debug", "info", "warn", "error"].contains(&self.logging.level.as_str()) {
            return Err(Error::Config(format!(
                "unknown log level '{}'",
                self.logging.level
            )));
        }
        if !["json", "pretty"].contains(&self.logging.format.as_str()) {
            return Err(Error::Config(format!(
                "log format must be 'json' or 'pretty', got '{}'",
                self.logging.format
            )));
        }
        Ok(())
    }

    /// Build the configured `gate_cutoff × gate_cutoff` target.
    pub fn target_block(&self) -> Result<Array2<Complex64>> {
        self.target
            .build(self.synthesis.gate_cutoff, self.synthesis.seed)
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format (json, pretty)
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String {
    "info".into()
}

fn default_log_format() -> String {
    "pretty".into()
}

/// Report output configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Write the JSON report here after a run
    #[serde(default)]
    pub report_path: Option<String>,
}

/// Validation configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Resource limits
    #[serde(default)]
    pub limits: ResourceLimits,
}

/// Resource limits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceLimits {
    /// Maximum Fock truncation dimension
    #[serde(default = "default_max_cutoff")]
    pub max_cutoff: usize,

    /// Maximum ansatz depth
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,

    /// Maximum optimizer iterations
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,
}

impl Default for ResourceLimits {
    fn default() -> Self {
        Self {
            max_cutoff: default_max_cutoff(),
            max_depth: default_max_depth(),
            max_iterations: default_max_iterations(),
        }
    }
}

fn default_max_cutoff() -> usize {
    64
}

fn default_max_depth() -> usize {
    200
}

fn default_max_iterations() -> usize {
    100_000
}
