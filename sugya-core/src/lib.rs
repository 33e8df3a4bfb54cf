//! Word-index segmentation with exact reconstruction
//!
//! This crate holds the deterministic half of sugya: tokenizing a passage
//! into whitespace-delimited words, turning cut points or word ranges into
//! segments whose concatenation reproduces the passage byte for byte, and
//! validating untrusted oracle answers against that guarantee. It also ships
//! oracle-free clause splitters for pointed Hebrew and English prose.
//!
//! Nothing here performs I/O or talks to an oracle; see `sugya-engine` for
//! consensus and alignment driven by an external boundary oracle.
//!
//! # Example
//!
//! ```rust
//! use sugya_core::{boundaries_to_ranges, build_segments, verify_round_trip, word_count};
//!
//! let text = "And God said, Let there be light: and there was light.";
//! let ranges = boundaries_to_ranges(&[2, 6], word_count(text)).unwrap();
//! let segments = build_segments(text, &ranges).unwrap();
//!
//! assert_eq!(segments[0].text, "And God said, ");
//! assert!(verify_round_trip(text, &segments));
//! ```

pub mod clause;
pub mod contract;
pub mod error;
pub mod integrity;
pub mod markup;
pub mod ranges;
pub mod segment;
pub mod tokenizer;

pub use clause::{
    process_hebrew_verse, remove_nikud, split_english_clauses, split_hebrew_by_cantillation,
    Script,
};
pub use contract::{
    co_segmentation_json_schema, ranges_from_texts, segmentation_json_schema,
    validate_co_segmentation, validate_segmentation_output, AlignedSegmentation,
    CoSegmentationOutput, SegmentationOutput, CO_SEGMENTATION_SCHEMA_NAME,
    SEGMENTATION_SCHEMA_NAME,
};
pub use error::{ContractViolation, Result, SegmentationError};
pub use integrity::{ensure_round_trip, verify_round_trip};
pub use markup::strip_markup_and_footnotes;
pub use ranges::{
    boundaries_to_ranges, ranges_to_boundaries, validate_ranges, RangeValidation, WordRange,
};
pub use segment::{build_segments, build_segments_with_words, Segment};
pub use tokenizer::{char_offset, tokenize, word_count, WordSpan};
