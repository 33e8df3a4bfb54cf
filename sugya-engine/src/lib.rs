//! Oracle-driven segmentation for sugya
//!
//! This crate wires an external boundary oracle (usually a language model)
//! to the deterministic checks in `sugya-core`:
//!
//! - [`ConsensusResolver`] runs several independent passes over one text and
//!   keeps the boundaries a strict majority agrees on.
//! - [`CoSegmenter`] aligns a source text with its translation in a single
//!   validated oracle call.
//! - [`prompt`] renders the indexed-word prompts both of them rely on.
//!
//! # Example
//!
//! ```rust
//! use sugya_engine::{ConsensusConfig, ConsensusResolver, ExecutionMode, ReplayOracle};
//!
//! let oracle = ReplayOracle::from_boundaries(vec![vec![1, 4], vec![1], vec![1, 4]]);
//! let config = ConsensusConfig::builder()
//!     .execution_mode(ExecutionMode::Sequential)
//!     .build()
//!     .unwrap();
//! let resolver = ConsensusResolver::new(oracle, config).unwrap();
//!
//! let text = "<b>Abaye</b> said: And <i>it</i> provokes Torah scholars.";
//! let result = resolver.segment_with_consensus(text, 3).unwrap();
//!
//! assert_eq!(result.boundaries, vec![1, 4]);
//! assert_eq!(result.final_segmentation[1].text, "And <i>it</i> provokes ");
//! ```

pub mod co_segment;
pub mod config;
pub mod consensus;
pub mod error;
pub mod executor;
pub mod oracle;
pub mod prompt;

pub use co_segment::{
    validate_answer, CoSegmentationOracle, CoSegmentationRequest, CoSegmenter, RecordedAnswer,
};
pub use config::{ConsensusConfig, ConsensusConfigBuilder};
pub use consensus::{BoundaryTally, ConsensusResolver, ConsensusResult};
pub use error::{EngineError, OracleError, Result};
pub use executor::{run_indexed, ExecutionMode};
pub use oracle::{
    BoundaryOracle, BoundaryProposal, FnOracle, Language, OracleRequest, ReplayOracle, TextType,
};

// Re-export from core for convenience
pub use sugya_core::{AlignedSegmentation, Segment, SegmentationError, WordRange};
