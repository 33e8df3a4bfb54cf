//! Error handling for the CLI application

use std::fmt;

/// CLI-specific failures that are not library errors
#[derive(Debug)]
pub enum CliError {
    /// File not found or inaccessible
    FileNotFound(String),
    /// Invalid glob pattern
    InvalidPattern(String),
    /// Configuration file could not be loaded
    ConfigError(String),
    /// Arguments that parse but make no sense together
    InvalidArgument(String),
    /// An oracle answer failed validation; the violations were already printed
    ValidationFailed(usize),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::FileNotFound(path) => write!(f, "File not found: {path}"),
            CliError::InvalidPattern(pattern) => write!(f, "Invalid file pattern: {pattern}"),
            CliError::ConfigError(msg) => write!(f, "Configuration error: {msg}"),
            CliError::InvalidArgument(msg) => write!(f, "Invalid argument: {msg}"),
            CliError::ValidationFailed(count) => {
                write!(f, "Validation failed with {count} violation(s)")
            }
        }
    }
}

impl std::error::Error for CliError {}

/// Result type alias for CLI operations
pub type CliResult<T> = Result<T, anyhow::Error>;
