//! Whitespace tokenizer with exact byte offsets
//!
//! Words are maximal runs of non-whitespace characters. Nothing is normalized:
//! markup such as `<b>` is part of whichever token it touches, so word indices
//! computed here line up with what an oracle sees in an indexed word list.

use serde::{Deserialize, Serialize};

/// A single word and its location in the source text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordSpan {
    /// Zero-based word index
    pub index: usize,
    /// Byte offset of the first character (inclusive)
    pub start: usize,
    /// Byte offset one past the last character (exclusive)
    pub end: usize,
    /// The literal token, equal to `text[start..end]`
    pub token: String,
}

/// Split `text` into word spans.
///
/// Empty or whitespace-only input yields an empty list.
pub fn tokenize(text: &str) -> Vec<WordSpan> {
    let mut spans = Vec::new();
    let mut word_start: Option<usize> = None;

    for (offset, ch) in text.char_indices() {
        match (ch.is_whitespace(), word_start) {
            (true, Some(start)) => {
                push_span(&mut spans, text, start, offset);
                word_start = None;
            }
            (false, None) => word_start = Some(offset),
            _ => {}
        }
    }

    if let Some(start) = word_start {
        push_span(&mut spans, text, start, text.len());
    }

    spans
}

fn push_span(spans: &mut Vec<WordSpan>, text: &str, start: usize, end: usize) {
    spans.push(WordSpan {
        index: spans.len(),
        start,
        end,
        token: text[start..end].to_string(),
    });
}

/// Number of words `tokenize` would produce, without allocating tokens
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Convert a byte offset into a character (code point) offset.
///
/// Offsets past the end of the text clamp to the character length.
pub fn char_offset(text: &str, byte_offset: usize) -> usize {
    let end = byte_offset.min(text.len());
    text.char_indices().take_while(|(i, _)| *i < end).count()
}
