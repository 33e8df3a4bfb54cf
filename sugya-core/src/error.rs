//! Core error types (deterministic only)

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// One structural or cross-check failure found in an oracle answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractViolation {
    /// JSON-pointer-like location of the offending value (e.g. `source_segments[2]`)
    pub path: String,
    /// Human-readable description
    pub message: String,
}

impl ContractViolation {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ContractViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}

/// Segmentation algorithm errors (no I/O, no external failures)
///
/// Every variant that stems from validation carries the complete list of
/// problems found, never just the first one.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SegmentationError {
    /// A boundary references a nonexistent or terminal word
    #[error("boundaries out of range for {word_count} words: {}", join_values(.boundaries))]
    OutOfRange {
        /// Every offending boundary value
        boundaries: Vec<i64>,
        /// Word count of the text the boundaries were checked against
        word_count: usize,
    },

    /// Boundaries collide or are non-monotonic
    #[error("boundary {boundary} overlaps the previous segment (cursor at word {cursor})")]
    Overlap { boundary: usize, cursor: usize },

    /// A range set fails contiguity or coverage
    #[error("invalid word ranges: {}", join_with(.errors, " | "))]
    InvalidRanges { errors: Vec<String> },

    /// Oracle claims disagree with the contract or with recomputed text
    #[error("oracle contract violated: {}", join_values(.violations))]
    OracleContractViolation { violations: Vec<ContractViolation> },

    /// Segments do not reconstruct the original text
    #[error(
        "round-trip integrity failure: expected {expected_len} bytes, got {actual_len} (first divergence at byte {first_divergence})"
    )]
    IntegrityFailure {
        expected_len: usize,
        actual_len: usize,
        first_divergence: usize,
    },
}

impl SegmentationError {
    /// Build a contract violation error from a single failure
    pub fn contract(path: impl Into<String>, message: impl Into<String>) -> Self {
        SegmentationError::OracleContractViolation {
            violations: vec![ContractViolation::new(path, message)],
        }
    }
}

fn join_values<T: fmt::Display>(values: &[T]) -> String {
    join_with(values, ", ")
}

fn join_with<T: fmt::Display>(values: &[T], separator: &str) -> String {
    values
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(separator)
}

/// Result type for core operations
pub type Result<T> = std::result::Result<T, SegmentationError>;
