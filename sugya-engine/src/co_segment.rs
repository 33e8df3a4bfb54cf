//! Single-shot cross-lingual alignment
//!
//! One request, one answer, one validation. A rejected answer is returned
//! as an error with every violation listed; retrying (for example with
//! [`crate::prompt::repair_prompt`]) is left to the caller.

use crate::error::{OracleError, Result};
use crate::oracle::Language;
use crate::prompt::co_segmentation_prompt;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::result::Result as StdResult;
use std::sync::Arc;
use sugya_core::{
    co_segmentation_json_schema, validate_co_segmentation, AlignedSegmentation,
    CoSegmentationOutput,
};

/// Everything an oracle needs to align two texts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoSegmentationRequest {
    pub source_text: String,
    pub target_text: String,
    pub source_language: Language,
    pub target_language: Language,
    /// Ready-to-send instructions listing both texts by word index
    pub prompt: String,
    /// Strict response schema, wrapped with its name
    pub schema: Value,
}

/// Anything that can jointly segment a text and its translation.
///
/// Returns the raw JSON answer; parsing and validation happen in the engine.
pub trait CoSegmentationOracle: Send + Sync {
    fn co_segment(&self, request: &CoSegmentationRequest) -> StdResult<String, OracleError>;

    fn name(&self) -> &str {
        "co-segmentation oracle"
    }
}

impl<T: CoSegmentationOracle + ?Sized> CoSegmentationOracle for Arc<T> {
    fn co_segment(&self, request: &CoSegmentationRequest) -> StdResult<String, OracleError> {
        (**self).co_segment(request)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

/// Oracle that always answers with the same recorded JSON
#[derive(Debug, Clone)]
pub struct RecordedAnswer(pub String);

impl CoSegmentationOracle for RecordedAnswer {
    fn co_segment(&self, _request: &CoSegmentationRequest) -> StdResult<String, OracleError> {
        Ok(self.0.clone())
    }

    fn name(&self) -> &str {
        "recorded"
    }
}

/// Aligns a source text with its translation through an oracle
pub struct CoSegmenter<O> {
    oracle: O,
    source_language: Language,
    target_language: Language,
}

impl<O: CoSegmentationOracle> CoSegmenter<O> {
    /// Hebrew source, English target
    pub fn new(oracle: O) -> Self {
        Self::with_languages(oracle, Language::Hebrew, Language::English)
    }

    pub fn with_languages(oracle: O, source_language: Language, target_language: Language) -> Self {
        Self {
            oracle,
            source_language,
            target_language,
        }
    }

    /// Build the request that [`Self::align`] would send
    pub fn request(&self, source: &str, target: &str) -> CoSegmentationRequest {
        CoSegmentationRequest {
            source_text: source.to_string(),
            target_text: target.to_string(),
            source_language: self.source_language,
            target_language: self.target_language,
            prompt: co_segmentation_prompt(
                source,
                self.source_language,
                target,
                self.target_language,
            ),
            schema: co_segmentation_json_schema(),
        }
    }

    /// Ask the oracle once and validate its answer against both texts
    pub fn align(&self, source: &str, target: &str) -> Result<AlignedSegmentation> {
        let request = self.request(source, target);
        log::info!("requesting co-segmentation from {}", self.oracle.name());

        let raw = self.oracle.co_segment(&request)?;
        let aligned = validate_answer(source, target, &raw)?;

        log::debug!("aligned {} segment pairs", aligned.len());
        Ok(aligned)
    }
}

/// Parse and validate a raw co-segmentation answer
pub fn validate_answer(source: &str, target: &str, raw: &str) -> Result<AlignedSegmentation> {
    let output = CoSegmentationOutput::from_json(raw)?;
    Ok(validate_co_segmentation(source, target, &output)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use sugya_core::SegmentationError;

    const SOURCE: &str = "וַיֹּאמֶר אֱלֹהִים יְהִי אוֹר";
    const TARGET: &str = "And God said, Let there be light.";

    #[test]
    fn test_align_valid_answer() {
        let answer = RecordedAnswer(
            r#"{"source_segments":[[0,1],[2,3]],"target_segments":[[0,2],[3,6]],
                "source_texts":["וַיֹּאמֶר אֱלֹהִים ","יְהִי אוֹר"],
                "target_texts":["And God said, ","Let there be light."]}"#
                .into(),
        );
        let aligned = CoSegmenter::new(answer).align(SOURCE, TARGET).unwrap();
        assert_eq!(aligned.len(), 2);
        assert_eq!(aligned.target[1].text, "Let there be light.");
    }

    #[test]
    fn test_align_rejects_without_retry() {
        let answer = RecordedAnswer(
            r#"{"source_segments":[[0,3]],"target_segments":[[0,2],[3,6]],
                "source_texts":["וַיֹּאמֶר אֱלֹהִים יְהִי אוֹר"],
                "target_texts":["And God said, ","Let there be light."]}"#
                .into(),
        );
        match CoSegmenter::new(answer).align(SOURCE, TARGET) {
            Err(EngineError::Segmentation(SegmentationError::OracleContractViolation {
                violations,
            })) => {
                assert!(violations[0].message.contains("Segment count mismatch"));
            }
            other => panic!("expected contract violation, got {other:?}"),
        }
    }

    #[test]
    fn test_oracle_failure_propagates() {
        struct Down;
        impl CoSegmentationOracle for Down {
            fn co_segment(
                &self,
                _request: &CoSegmentationRequest,
            ) -> StdResult<String, OracleError> {
                Err(OracleError::Timeout)
            }
        }

        assert!(matches!(
            CoSegmenter::new(Down).align(SOURCE, TARGET),
            Err(EngineError::Oracle(OracleError::Timeout))
        ));
    }

    #[test]
    fn test_request_carries_prompt_and_schema() {
        let segmenter = CoSegmenter::new(RecordedAnswer(String::new()));
        let request = segmenter.request(SOURCE, TARGET);
        assert!(request.prompt.contains("[3]אוֹר"));
        assert_eq!(request.schema["name"], "co_segmentation_word_indices");
        assert_eq!(request.target_language, Language::English);
    }
}
