//! Range algebra over word indices
//!
//! A segmentation is described either as a list of cut points ("cut after
//! word N") or as a list of inclusive word ranges. This module converts the
//! former into the latter and validates range sets against a word count.

use crate::error::{Result, SegmentationError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Inclusive range of word indices, serialized as `[start, end]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "(usize, usize)", into = "(usize, usize)")]
pub struct WordRange {
    pub start: usize,
    pub end: usize,
}

impl WordRange {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Number of words covered, zero for an inverted range
    pub fn len(&self) -> usize {
        if self.end < self.start {
            0
        } else {
            (self.end - self.start).saturating_add(1)
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<(usize, usize)> for WordRange {
    fn from((start, end): (usize, usize)) -> Self {
        Self { start, end }
    }
}

impl From<WordRange> for (usize, usize) {
    fn from(range: WordRange) -> Self {
        (range.start, range.end)
    }
}

impl fmt::Display for WordRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.start, self.end)
    }
}

/// Convert cut-after boundaries into contiguous inclusive ranges.
///
/// Boundary `b` places a break between word `b` and word `b + 1`, so the last
/// word can never be a boundary. Duplicates are ignored and order does not
/// matter. Boundaries are signed because they usually come straight from an
/// oracle; negative values are reported like any other out-of-range value.
pub fn boundaries_to_ranges(boundaries: &[i64], word_count: usize) -> Result<Vec<WordRange>> {
    if word_count == 0 {
        return Ok(Vec::new());
    }

    let mut sorted = boundaries.to_vec();
    sorted.sort_unstable();
    sorted.dedup();

    let last_cuttable = word_count as i64 - 1;
    let out_of_range: Vec<i64> = sorted
        .iter()
        .copied()
        .filter(|&b| b < 0 || b >= last_cuttable)
        .collect();
    if !out_of_range.is_empty() {
        return Err(SegmentationError::OutOfRange {
            boundaries: out_of_range,
            word_count,
        });
    }

    let mut ranges = Vec::with_capacity(sorted.len() + 1);
    let mut cursor = 0usize;

    for boundary in sorted {
        let boundary = boundary as usize;
        if boundary < cursor {
            return Err(SegmentationError::Overlap { boundary, cursor });
        }
        ranges.push(WordRange::new(cursor, boundary));
        cursor = boundary + 1;
    }

    ranges.push(WordRange::new(cursor, word_count - 1));
    Ok(ranges)
}

/// Cut-after indices implied by a range list (every range end except the last)
pub fn ranges_to_boundaries(ranges: &[WordRange]) -> Vec<usize> {
    match ranges.split_last() {
        Some((_, init)) => init.iter().map(|r| r.end).collect(),
        None => Vec::new(),
    }
}

/// Outcome of [`validate_ranges`]
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RangeValidation {
    pub valid: bool,
    pub errors: Vec<String>,
}

impl RangeValidation {
    /// Convert into a `Result`, failing with `InvalidRanges` on any error
    pub fn into_result(self) -> Result<()> {
        if self.valid {
            Ok(())
        } else {
            Err(SegmentationError::InvalidRanges {
                errors: self.errors,
            })
        }
    }
}

/// Check that `ranges` exactly cover words `0..word_count` in order.
///
/// All problems are collected; validation never stops at the first one.
pub fn validate_ranges(ranges: &[WordRange], word_count: usize) -> RangeValidation {
    let mut errors = Vec::new();

    if ranges.is_empty() {
        if word_count > 0 {
            errors.push(format!(
                "No ranges provided for {word_count} words; expected coverage of 0..{}.",
                word_count - 1
            ));
        }
        return RangeValidation {
            valid: errors.is_empty(),
            errors,
        };
    }

    for (i, range) in ranges.iter().enumerate() {
        if range.start > range.end {
            errors.push(format!(
                "Range {i} {range} has start greater than end."
            ));
        }
        if range.end >= word_count {
            errors.push(format!(
                "Range {i} {range} exceeds word count {word_count} (max index {}).",
                word_count.saturating_sub(1)
            ));
        }
    }

    if ranges[0].start != 0 {
        errors.push(format!(
            "Range 0 starts at {}, expected 0.",
            ranges[0].start
        ));
    }

    for (i, pair) in ranges.windows(2).enumerate() {
        let Some(expected) = pair[0].end.checked_add(1) else {
            errors.push(format!(
                "Range {} cannot follow range {i}, which ends at the largest index.",
                i + 1
            ));
            continue;
        };
        if pair[1].start != expected {
            let kind = if pair[1].start > expected {
                "gap"
            } else {
                "overlap"
            };
            errors.push(format!(
                "Range {} starts at {}, expected {expected} ({kind} after range {i}).",
                i + 1,
                pair[1].start
            ));
        }
    }

    let last_index = ranges.len() - 1;
    let last = ranges[last_index];
    if word_count == 0 || last.end != word_count - 1 {
        errors.push(format!(
            "Range {last_index} ends at {}, expected {} for full coverage.",
            last.end,
            word_count as i64 - 1
        ));
    }

    RangeValidation {
        valid: errors.is_empty(),
        errors,
    }
}
