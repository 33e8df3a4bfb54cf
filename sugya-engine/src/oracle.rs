//! Boundary oracle seam
//!
//! The engine never talks to a model directly. A [`BoundaryOracle`] receives
//! an [`OracleRequest`] and returns a [`BoundaryProposal`]; everything it says
//! is treated as untrusted and validated by the core before use.

use crate::error::OracleError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use sugya_core::SegmentationOutput;

/// Language of the text being segmented
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// Hebrew or Aramaic
    #[default]
    Hebrew,
    /// English
    English,
}

impl Language {
    /// Display name used in prompts
    pub fn name(&self) -> &'static str {
        match self {
            Language::Hebrew => "Hebrew",
            Language::English => "English",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "hebrew" | "he" | "aramaic" => Ok(Language::Hebrew),
            "english" | "en" => Ok(Language::English),
            other => Err(format!("unsupported language `{other}`")),
        }
    }
}

/// Genre of the text, which changes how the oracle is instructed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TextType {
    /// Babylonian Talmud
    #[default]
    Talmud,
    /// Hebrew Bible
    Biblical,
    /// Later commentary
    Commentary,
}

impl fmt::Display for TextType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextType::Talmud => f.write_str("talmud"),
            TextType::Biblical => f.write_str("biblical"),
            TextType::Commentary => f.write_str("commentary"),
        }
    }
}

impl FromStr for TextType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "talmud" => Ok(TextType::Talmud),
            "biblical" | "bible" => Ok(TextType::Biblical),
            "commentary" => Ok(TextType::Commentary),
            other => Err(format!("unsupported text type `{other}`")),
        }
    }
}

/// One request for boundaries on a single text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OracleRequest {
    pub text: String,
    pub language: Language,
    pub text_type: TextType,
    /// Zero-based consensus pass this request belongs to
    pub pass_index: usize,
    /// Sampling temperature hint for this pass, if the oracle honors one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
}

/// What an oracle may answer with
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryProposal {
    /// Cut-after word indices, unvalidated and possibly negative
    Boundaries(Vec<i64>),
    /// Word ranges plus the text the oracle claims each range covers
    Ranges(SegmentationOutput),
}

impl BoundaryProposal {
    /// Decode a raw oracle answer.
    ///
    /// Accepts a bare array of boundaries, an object with a `boundaries`
    /// array, or a single-language range answer (`segments` + `texts`).
    pub fn from_json(json: &str) -> Result<Self, OracleError> {
        let value: Value = serde_json::from_str(json)
            .map_err(|e| OracleError::Malformed(format!("not valid JSON: {e}")))?;
        Self::from_value(&value)
    }

    pub fn from_value(value: &Value) -> Result<Self, OracleError> {
        if let Some(boundaries) = value.get("boundaries") {
            return parse_boundaries(boundaries).map(BoundaryProposal::Boundaries);
        }
        if value.is_array() {
            return parse_boundaries(value).map(BoundaryProposal::Boundaries);
        }
        SegmentationOutput::from_value(value)
            .map(BoundaryProposal::Ranges)
            .map_err(|e| OracleError::Malformed(e.to_string()))
    }
}

fn parse_boundaries(value: &Value) -> Result<Vec<i64>, OracleError> {
    let items = value
        .as_array()
        .ok_or_else(|| OracleError::Malformed("boundaries must be an array".into()))?;

    items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            item.as_i64().ok_or_else(|| {
                OracleError::Malformed(format!("boundaries[{i}] is not an integer: {item}"))
            })
        })
        .collect()
}

/// Anything that can propose segment boundaries for a text
pub trait BoundaryOracle: Send + Sync {
    /// Answer one request
    fn propose(&self, request: &OracleRequest) -> Result<BoundaryProposal, OracleError>;

    /// Name used in logs
    fn name(&self) -> &str {
        "oracle"
    }
}

impl<T: BoundaryOracle + ?Sized> BoundaryOracle for Arc<T> {
    fn propose(&self, request: &OracleRequest) -> Result<BoundaryProposal, OracleError> {
        (**self).propose(request)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

impl<T: BoundaryOracle + ?Sized> BoundaryOracle for Box<T> {
    fn propose(&self, request: &OracleRequest) -> Result<BoundaryProposal, OracleError> {
        (**self).propose(request)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

/// Oracle backed by a plain function, mostly for tests and adapters
pub struct FnOracle<F> {
    name: String,
    f: F,
}

impl<F> FnOracle<F>
where
    F: Fn(&OracleRequest) -> Result<BoundaryProposal, OracleError> + Send + Sync,
{
    pub fn new(name: impl Into<String>, f: F) -> Self {
        Self {
            name: name.into(),
            f,
        }
    }
}

impl<F> BoundaryOracle for FnOracle<F>
where
    F: Fn(&OracleRequest) -> Result<BoundaryProposal, OracleError> + Send + Sync,
{
    fn propose(&self, request: &OracleRequest) -> Result<BoundaryProposal, OracleError> {
        (self.f)(request)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Replays recorded answers, one per pass index.
///
/// Requests past the end of the recording fail with `Unavailable`.
#[derive(Debug, Clone, Default)]
pub struct ReplayOracle {
    answers: Vec<Result<BoundaryProposal, OracleError>>,
}

impl ReplayOracle {
    pub fn new(answers: Vec<Result<BoundaryProposal, OracleError>>) -> Self {
        Self { answers }
    }

    /// Replay a list of boundary sets
    pub fn from_boundaries<I>(passes: I) -> Self
    where
        I: IntoIterator<Item = Vec<i64>>,
    {
        Self::new(
            passes
                .into_iter()
                .map(|b| Ok(BoundaryProposal::Boundaries(b)))
                .collect(),
        )
    }

    /// Replay raw JSON answers; undecodable ones replay as `Malformed`
    pub fn from_json_answers<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::new(
            answers
                .into_iter()
                .map(|json| BoundaryProposal::from_json(json.as_ref()))
                .collect(),
        )
    }

    /// Number of recorded answers
    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }
}

impl BoundaryOracle for ReplayOracle {
    fn propose(&self, request: &OracleRequest) -> Result<BoundaryProposal, OracleError> {
        self.answers
            .get(request.pass_index)
            .cloned()
            .unwrap_or_else(|| {
                Err(OracleError::Unavailable(format!(
                    "no recorded answer for pass {}",
                    request.pass_index
                )))
            })
    }

    fn name(&self) -> &str {
        "replay"
    }
}
