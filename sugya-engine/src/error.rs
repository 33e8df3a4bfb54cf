//! Layered error types
//!
//! Core validation failures surface as [`EngineError::Segmentation`]; oracle
//! transport failures as [`OracleError`]. A single failed pass is never an
//! engine error on its own, only the loss of every pass is.

use sugya_core::SegmentationError;
use thiserror::Error;

/// Failures reported by a boundary or co-segmentation oracle
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OracleError {
    /// The oracle could not be reached or refused the request
    #[error("oracle unavailable: {0}")]
    Unavailable(String),

    /// The oracle did not answer in time
    #[error("oracle timed out")]
    Timeout,

    /// The request was cancelled before an answer arrived
    #[error("oracle request cancelled")]
    Cancelled,

    /// The oracle answered with something that is not a proposal
    #[error("malformed oracle answer: {0}")]
    Malformed(String),
}

/// Engine-level errors
#[derive(Error, Debug)]
pub enum EngineError {
    /// Deterministic validation error from the core
    #[error("segmentation error: {0}")]
    Segmentation(#[from] SegmentationError),

    /// Every consensus pass was discarded
    #[error("no consensus: all {attempted} passes failed ({})", join_failures(.failures))]
    NoConsensus {
        /// Passes requested
        attempted: usize,
        /// One message per discarded pass
        failures: Vec<String>,
    },

    /// Empty or whitespace-only input
    #[error("input text is empty")]
    EmptyInput,

    /// Invalid configuration
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Oracle failure outside a consensus pass
    #[error("oracle error: {0}")]
    Oracle(#[from] OracleError),

    /// Worker pool could not be built
    #[error("thread pool error: {0}")]
    ThreadPool(String),

    /// JSON encoding or decoding error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<toml::de::Error> for EngineError {
    fn from(err: toml::de::Error) -> Self {
        EngineError::Config(err.to_string())
    }
}

fn join_failures(failures: &[String]) -> String {
    failures.join("; ")
}

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;
