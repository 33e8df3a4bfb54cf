//! Configuration module

use crate::error::CliError;
use crate::output::OutputFormat;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use sugya_core::Script;
use sugya_engine::ConsensusConfig;

/// CLI configuration structure
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Default)]
pub struct CliConfig {
    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,

    /// Consensus configuration, passed to the engine unchanged
    #[serde(default)]
    pub consensus: ConsensusConfig,

    /// Clause splitting configuration
    #[serde(default)]
    pub split: SplitConfig,
}

/// Output-related configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Format used when `--format` is not given
    pub format: OutputFormat,

    /// Pretty print JSON output
    pub pretty_json: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            pretty_json: true,
        }
    }
}

/// Clause splitting configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SplitConfig {
    /// Splitter used when `--script` is not given
    pub script: Script,

    /// Strip HTML and footnotes before splitting
    pub strip_markup: bool,

    /// Remove Hebrew pointing from split segments
    pub remove_nikud: bool,

    /// Worker threads for multi-file runs (None = all cores)
    pub threads: Option<usize>,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            script: Script::default(),
            strip_markup: true,
            remove_nikud: false,
            threads: None,
        }
    }
}

impl CliConfig {
    /// Load configuration from `path`, or defaults when no path is given
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        if !path.exists() {
            return Err(CliError::FileNotFound(path.display().to_string()).into());
        }

        let source = fs::read_to_string(path)
            .map_err(|e| CliError::ConfigError(format!("{}: {e}", path.display())))?;
        let config = Self::from_toml_str(&source)
            .map_err(|e| CliError::ConfigError(format!("{}: {e}", path.display())))?;

        log::info!("loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Parse and validate TOML configuration
    pub fn from_toml_str(source: &str) -> std::result::Result<Self, String> {
        let config: Self = toml::from_str(source).map_err(|e| e.to_string())?;
        config.consensus.validate().map_err(|e| e.to_string())?;
        if config.split.threads == Some(0) {
            return Err("split.threads must be greater than 0".to_string());
        }
        Ok(config)
    }
}
