//! Segment construction from validated word ranges

use crate::error::Result;
use crate::ranges::{validate_ranges, WordRange};
use crate::tokenizer::{tokenize, WordSpan};
use serde::{Deserialize, Serialize};

/// A contiguous slice of the original text covering one word range
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    /// 1-based position in the segmentation
    pub id: usize,
    /// First word index (inclusive)
    pub word_start: usize,
    /// Last word index (inclusive)
    pub word_end: usize,
    /// Byte offset where the segment begins
    pub start: usize,
    /// Byte offset where the segment ends (exclusive)
    pub end: usize,
    /// `original[start..end]`
    pub text: String,
}

impl Segment {
    /// Word range this segment was built from
    pub fn word_range(&self) -> WordRange {
        WordRange::new(self.word_start, self.word_end)
    }
}

/// Build segments whose concatenation reproduces `text` exactly.
///
/// The ranges are validated first; an invalid set fails with
/// `InvalidRanges` and nothing is built. Whitespace between two segments is
/// owned by the earlier one, and leading whitespace by the first.
pub fn build_segments(text: &str, ranges: &[WordRange]) -> Result<Vec<Segment>> {
    let words = tokenize(text);
    build_segments_with_words(text, &words, ranges)
}

/// Same as [`build_segments`] for callers that already tokenized `text`.
///
/// `words` must be the output of `tokenize(text)`.
pub fn build_segments_with_words(
    text: &str,
    words: &[WordSpan],
    ranges: &[WordRange],
) -> Result<Vec<Segment>> {
    validate_ranges(ranges, words.len()).into_result()?;

    let segments = ranges
        .iter()
        .enumerate()
        .map(|(i, range)| {
            let start = if i == 0 { 0 } else { words[range.start].start };
            let end = ranges
                .get(i + 1)
                .map_or(text.len(), |next| words[next.start].start);

            Segment {
                id: i + 1,
                word_start: range.start,
                word_end: range.end,
                start,
                end,
                text: text[start..end].to_string(),
            }
        })
        .collect();

    Ok(segments)
}
