//! Consensus configuration

use crate::error::{EngineError, Result};
use crate::executor::ExecutionMode;
use crate::oracle::{Language, TextType};
use serde::{Deserialize, Serialize};

/// Default configuration constants
pub mod defaults {
    /// Passes run by [`super::ConsensusConfig`] when none are specified
    pub const PASSES: usize = 3;

    /// Temperature hints cycled across passes (conservative, moderate, creative)
    pub const PASS_TEMPERATURES: [f64; 3] = [0.1, 0.3, 0.5];
}

/// Settings for [`crate::ConsensusResolver`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsensusConfig {
    /// Language of the texts being segmented
    pub language: Language,
    /// Genre, forwarded to the oracle
    pub text_type: TextType,
    /// Passes used by `segment` (explicit pass counts override this)
    pub passes: usize,
    /// Sequential or rayon fan-out
    pub execution_mode: ExecutionMode,
    /// Worker threads for parallel mode (None = all cores)
    pub threads: Option<usize>,
    /// Temperature hint per pass, cycled by pass index; empty sends none
    pub pass_temperatures: Vec<f64>,
}

impl Default for ConsensusConfig {
    fn default() -> Self {
        Self {
            language: Language::default(),
            text_type: TextType::default(),
            passes: defaults::PASSES,
            execution_mode: ExecutionMode::default(),
            threads: None,
            pass_temperatures: defaults::PASS_TEMPERATURES.to_vec(),
        }
    }
}

impl ConsensusConfig {
    /// Create a configuration builder
    pub fn builder() -> ConsensusConfigBuilder {
        ConsensusConfigBuilder::default()
    }

    /// Parse a `[consensus]`-style TOML table and validate it
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.passes == 0 {
            return Err(EngineError::Config("passes must be greater than 0".into()));
        }

        if self.threads == Some(0) {
            return Err(EngineError::Config("threads must be greater than 0".into()));
        }

        if let Some(t) = self
            .pass_temperatures
            .iter()
            .find(|t| !(0.0..=2.0).contains(*t))
        {
            return Err(EngineError::Config(format!(
                "pass temperature {t} is outside 0.0..=2.0"
            )));
        }

        Ok(())
    }

    /// Temperature hint for a given pass
    pub fn temperature_for(&self, pass_index: usize) -> Option<f64> {
        if self.pass_temperatures.is_empty() {
            None
        } else {
            Some(self.pass_temperatures[pass_index % self.pass_temperatures.len()])
        }
    }
}

/// Fluent builder for [`ConsensusConfig`]
#[derive(Debug, Default)]
pub struct ConsensusConfigBuilder {
    language: Option<Language>,
    text_type: Option<TextType>,
    passes: Option<usize>,
    execution_mode: Option<ExecutionMode>,
    threads: Option<usize>,
    pass_temperatures: Option<Vec<f64>>,
}

impl ConsensusConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn language(mut self, language: Language) -> Self {
        self.language = Some(language);
        self
    }

    pub fn text_type(mut self, text_type: TextType) -> Self {
        self.text_type = Some(text_type);
        self
    }

    pub fn passes(mut self, passes: usize) -> Self {
        self.passes = Some(passes);
        self
    }

    pub fn execution_mode(mut self, mode: ExecutionMode) -> Self {
        self.execution_mode = Some(mode);
        self
    }

    /// Set the number of threads (None = all available)
    pub fn threads(mut self, count: Option<usize>) -> Self {
        self.threads = count;
        self
    }

    pub fn pass_temperatures(mut self, temperatures: Vec<f64>) -> Self {
        self.pass_temperatures = Some(temperatures);
        self
    }

    /// Build and validate the configuration
    pub fn build(self) -> Result<ConsensusConfig> {
        let mut config = ConsensusConfig::default();

        if let Some(language) = self.language {
            config.language = language;
        }
        if let Some(text_type) = self.text_type {
            config.text_type = text_type;
        }
        if let Some(passes) = self.passes {
            config.passes = passes;
        }
        if let Some(mode) = self.execution_mode {
            config.execution_mode = mode;
        }
        if self.threads.is_some() {
            config.threads = self.threads;
        }
        if let Some(temperatures) = self.pass_temperatures {
            config.pass_temperatures = temperatures;
        }

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ConsensusConfig::default();
        assert_eq!(config.passes, 3);
        assert!(config.validate().is_ok());
        assert_eq!(config.temperature_for(0), Some(0.1));
        assert_eq!(config.temperature_for(4), Some(0.3));
    }

    #[test]
    fn test_builder_validates() {
        assert!(ConsensusConfig::builder().passes(0).build().is_err());
        assert!(ConsensusConfig::builder().threads(Some(0)).build().is_err());
        assert!(ConsensusConfig::builder()
            .pass_temperatures(vec![0.2, 3.5])
            .build()
            .is_err());

        let config = ConsensusConfig::builder()
            .language(Language::English)
            .text_type(TextType::Biblical)
            .passes(5)
            .execution_mode(ExecutionMode::Sequential)
            .threads(Some(2))
            .pass_temperatures(Vec::new())
            .build()
            .unwrap();
        assert_eq!(config.passes, 5);
        assert_eq!(config.temperature_for(0), None);
    }

    #[test]
    fn test_from_toml() {
        let config = ConsensusConfig::from_toml_str(
            r#"
            language = "english"
            text_type = "commentary"
            passes = 4
            execution_mode = "sequential"
            "#,
        )
        .unwrap();

        assert_eq!(config.language, Language::English);
        assert_eq!(config.text_type, TextType::Commentary);
        assert_eq!(config.execution_mode, ExecutionMode::Sequential);
        assert_eq!(config.threads, None);
        assert_eq!(config.pass_temperatures.len(), 3);
    }

    #[test]
    fn test_from_toml_rejects_invalid() {
        assert!(matches!(
            ConsensusConfig::from_toml_str("passes = 0"),
            Err(EngineError::Config(_))
        ));
        assert!(matches!(
            ConsensusConfig::from_toml_str("passes = \"many\""),
            Err(EngineError::Config(_))
        ));
    }
}
