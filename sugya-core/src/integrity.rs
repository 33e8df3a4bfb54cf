//! Round-trip integrity check
//!
//! Any segmentation, deterministic or oracle-derived, must reproduce the
//! original text byte for byte before it is handed to a caller.

use crate::error::{Result, SegmentationError};
use crate::segment::Segment;

/// `true` when the segment texts concatenate to exactly `original`
pub fn verify_round_trip(original: &str, segments: &[Segment]) -> bool {
    let total: usize = segments.iter().map(|s| s.text.len()).sum();
    if total != original.len() {
        return false;
    }

    let mut offset = 0;
    for segment in segments {
        let end = offset + segment.text.len();
        if original.as_bytes()[offset..end] != *segment.text.as_bytes() {
            return false;
        }
        offset = end;
    }
    true
}

/// Like [`verify_round_trip`], but reports where reconstruction diverges
pub fn ensure_round_trip(original: &str, segments: &[Segment]) -> Result<()> {
    if verify_round_trip(original, segments) {
        return Ok(());
    }

    let rebuilt: String = segments.iter().map(|s| s.text.as_str()).collect();
    let first_divergence = original
        .bytes()
        .zip(rebuilt.bytes())
        .position(|(a, b)| a != b)
        .unwrap_or_else(|| original.len().min(rebuilt.len()));

    log::debug!(
        "round trip diverged at byte {first_divergence} ({} vs {} bytes)",
        original.len(),
        rebuilt.len()
    );

    Err(SegmentationError::IntegrityFailure {
        expected_len: original.len(),
        actual_len: rebuilt.len(),
        first_divergence,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seg(id: usize, text: &str) -> Segment {
        Segment {
            id,
            word_start: 0,
            word_end: 0,
            start: 0,
            end: text.len(),
            text: text.to_string(),
        }
    }

    #[test]
    fn test_exact_concatenation_passes() {
        let segments = vec![seg(1, "And God said, "), seg(2, "Let there be light.")];
        assert!(verify_round_trip("And God said, Let there be light.", &segments));
        assert!(ensure_round_trip("And God said, Let there be light.", &segments).is_ok());
    }

    #[test]
    fn test_dropped_whitespace_fails() {
        let segments = vec![seg(1, "And God said,"), seg(2, "Let there be light.")];
        assert!(!verify_round_trip("And God said, Let there be light.", &segments));

        match ensure_round_trip("And God said, Let there be light.", &segments) {
            Err(SegmentationError::IntegrityFailure {
                expected_len,
                actual_len,
                first_divergence,
            }) => {
                assert_eq!(expected_len, 33);
                assert_eq!(actual_len, 32);
                assert_eq!(first_divergence, 13);
            }
            other => panic!("expected IntegrityFailure, got {other:?}"),
        }
    }

    #[test]
    fn test_same_length_different_bytes_fails() {
        let segments = vec![seg(1, "abc "), seg(2, "dex")];
        assert!(!verify_round_trip("abc def", &segments));
    }

    #[test]
    fn test_visually_equal_but_different_code_points_fails() {
        // Precomposed vs decomposed e-acute.
        let segments = vec![seg(1, "caf\u{00E9}")];
        assert!(!verify_round_trip("cafe\u{0301}", &segments));
    }

    #[test]
    fn test_duplicated_text_fails() {
        let segments = vec![seg(1, "a b "), seg(2, "b c")];
        assert!(!verify_round_trip("a b c", &segments));
    }

    #[test]
    fn test_empty() {
        assert!(verify_round_trip("", &[]));
        assert!(!verify_round_trip(" ", &[]));
    }
}
