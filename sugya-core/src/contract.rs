//! Oracle answer contract
//!
//! An oracle that segments text returns word ranges *and* the literal text it
//! believes each range covers. The ranges are checked structurally first,
//! then every claimed text is compared with the slice this crate builds from
//! the same range. Any disagreement rejects the whole answer; nothing is
//! repaired on the oracle's behalf.
//!
//! JSON field names are `source_*`/`target_*`. The Hebrew/English names used
//! by earlier prompts (`hebrew_segments`, `english_texts`, ...) are accepted as
//! aliases.

use crate::error::{ContractViolation, Result, SegmentationError};
use crate::integrity::ensure_round_trip;
use crate::ranges::{validate_ranges, WordRange};
use crate::segment::{build_segments_with_words, Segment};
use crate::tokenizer::{tokenize, word_count};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::collections::HashMap;

/// Schema name sent alongside [`co_segmentation_json_schema`]
pub const CO_SEGMENTATION_SCHEMA_NAME: &str = "co_segmentation_word_indices";

/// Schema name sent alongside [`segmentation_json_schema`]
pub const SEGMENTATION_SCHEMA_NAME: &str = "segmentation_word_indices";

/// Joint segmentation of a source text and its translation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoSegmentationOutput {
    #[serde(alias = "hebrew_segments")]
    pub source_segments: Vec<WordRange>,
    #[serde(alias = "english_segments")]
    pub target_segments: Vec<WordRange>,
    #[serde(alias = "hebrew_texts")]
    pub source_texts: Vec<String>,
    #[serde(alias = "english_texts")]
    pub target_texts: Vec<String>,
}

/// Single-language segmentation answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentationOutput {
    pub segments: Vec<WordRange>,
    pub texts: Vec<String>,
}

/// Validated, segment-by-segment alignment of two texts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlignedSegmentation {
    pub source: Vec<Segment>,
    pub target: Vec<Segment>,
}

impl AlignedSegmentation {
    /// Aligned `(source, target)` segment pairs in order
    pub fn pairs(&self) -> impl Iterator<Item = (&Segment, &Segment)> {
        self.source.iter().zip(self.target.iter())
    }

    pub fn len(&self) -> usize {
        self.source.len()
    }

    pub fn is_empty(&self) -> bool {
        self.source.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldKind {
    Ranges,
    Texts,
}

#[derive(Debug, Clone, Copy)]
struct Field {
    name: &'static str,
    alias: Option<&'static str>,
    kind: FieldKind,
}

const CO_SEGMENTATION_FIELDS: &[Field] = &[
    Field {
        name: "source_segments",
        alias: Some("hebrew_segments"),
        kind: FieldKind::Ranges,
    },
    Field {
        name: "target_segments",
        alias: Some("english_segments"),
        kind: FieldKind::Ranges,
    },
    Field {
        name: "source_texts",
        alias: Some("hebrew_texts"),
        kind: FieldKind::Texts,
    },
    Field {
        name: "target_texts",
        alias: Some("english_texts"),
        kind: FieldKind::Texts,
    },
];

const SEGMENTATION_FIELDS: &[Field] = &[
    Field {
        name: "segments",
        alias: None,
        kind: FieldKind::Ranges,
    },
    Field {
        name: "texts",
        alias: None,
        kind: FieldKind::Texts,
    },
];

enum FieldValue {
    Ranges(Vec<WordRange>),
    Texts(Vec<String>),
}

/// Walks a JSON object against a field list, recording every violation
struct ShapeReader {
    violations: Vec<ContractViolation>,
    values: HashMap<&'static str, FieldValue>,
}

impl ShapeReader {
    fn read(value: &Value, fields: &[Field]) -> Self {
        let mut reader = Self {
            violations: Vec::new(),
            values: HashMap::new(),
        };

        let Some(object) = value.as_object() else {
            reader.violate("", "expected a JSON object");
            return reader;
        };

        reader.check_keys(object, fields);

        for field in fields {
            let found = object
                .get(field.name)
                .or_else(|| field.alias.and_then(|alias| object.get(alias)));

            match found {
                None => reader.violate(field.name, "missing required field"),
                Some(value) => {
                    if let Some(parsed) = reader.read_field(field, value) {
                        reader.values.insert(field.name, parsed);
                    }
                }
            }
        }

        reader
    }

    fn check_keys(&mut self, object: &Map<String, Value>, fields: &[Field]) {
        for key in object.keys() {
            let known = fields
                .iter()
                .find(|f| f.name == key.as_str() || f.alias == Some(key.as_str()));
            match known {
                None => self.violate(key.clone(), "unknown field"),
                Some(field) => {
                    if let Some(alias) = field.alias {
                        if key == field.name && object.contains_key(alias) {
                            self.violate(
                                key.clone(),
                                format!("given both as `{}` and `{alias}`", field.name),
                            );
                        }
                    }
                }
            }
        }
    }

    fn read_field(&mut self, field: &Field, value: &Value) -> Option<FieldValue> {
        let Some(items) = value.as_array() else {
            self.violate(field.name, "expected an array");
            return None;
        };
        if items.is_empty() {
            self.violate(field.name, "must contain at least one entry");
        }

        let before = self.violations.len();
        let parsed = match field.kind {
            FieldKind::Ranges => FieldValue::Ranges(
                items
                    .iter()
                    .enumerate()
                    .filter_map(|(i, item)| self.read_range(field.name, i, item))
                    .collect(),
            ),
            FieldKind::Texts => FieldValue::Texts(
                items
                    .iter()
                    .enumerate()
                    .filter_map(|(i, item)| match item.as_str() {
                        Some(text) => Some(text.to_string()),
                        None => {
                            self.violate(format!("{}[{i}]", field.name), "expected a string");
                            None
                        }
                    })
                    .collect(),
            ),
        };

        (self.violations.len() == before).then_some(parsed)
    }

    fn read_range(&mut self, name: &str, index: usize, item: &Value) -> Option<WordRange> {
        let path = format!("{name}[{index}]");
        let pair = match item.as_array() {
            Some(pair) if pair.len() == 2 => pair,
            _ => {
                self.violate(path, "expected a [start, end] pair");
                return None;
            }
        };

        let start = self.read_index(&path, &pair[0]);
        let end = self.read_index(&path, &pair[1]);
        Some(WordRange::new(start?, end?))
    }

    fn read_index(&mut self, path: &str, value: &Value) -> Option<usize> {
        match value.as_u64().and_then(|index| usize::try_from(index).ok()) {
            Some(index) => Some(index),
            None => {
                self.violate(
                    path.to_string(),
                    format!("expected a non-negative integer, got {value}"),
                );
                None
            }
        }
    }

    fn violate(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.violations.push(ContractViolation::new(path, message));
    }

    fn finish(self) -> Result<HashMap<&'static str, FieldValue>> {
        if self.violations.is_empty() {
            Ok(self.values)
        } else {
            log::debug!(
                "oracle answer failed structural validation with {} violation(s)",
                self.violations.len()
            );
            Err(SegmentationError::OracleContractViolation {
                violations: self.violations,
            })
        }
    }
}

fn take_ranges(values: &mut HashMap<&'static str, FieldValue>, name: &str) -> Vec<WordRange> {
    match values.remove(name) {
        Some(FieldValue::Ranges(ranges)) => ranges,
        _ => Vec::new(),
    }
}

fn take_texts(values: &mut HashMap<&'static str, FieldValue>, name: &str) -> Vec<String> {
    match values.remove(name) {
        Some(FieldValue::Texts(texts)) => texts,
        _ => Vec::new(),
    }
}

fn parse_json(json: &str) -> Result<Value> {
    serde_json::from_str(json)
        .map_err(|e| SegmentationError::contract("", format!("response is not valid JSON: {e}")))
}

fn check_pair_lengths(
    segments_name: &str,
    segments: &[WordRange],
    texts_name: &str,
    texts: &[String],
    violations: &mut Vec<ContractViolation>,
) {
    if segments.is_empty() {
        violations.push(ContractViolation::new(
            segments_name,
            "must contain at least one entry",
        ));
    }
    if texts.len() != segments.len() {
        violations.push(ContractViolation::new(
            texts_name,
            format!(
                "{texts_name} length ({}) must equal {segments_name} length ({})",
                texts.len(),
                segments.len()
            ),
        ));
    }
}

impl CoSegmentationOutput {
    /// Parse and structurally validate a raw oracle response
    pub fn from_json(json: &str) -> Result<Self> {
        Self::from_value(&parse_json(json)?)
    }

    /// Structurally validate an already-decoded JSON value
    pub fn from_value(value: &Value) -> Result<Self> {
        let mut values = ShapeReader::read(value, CO_SEGMENTATION_FIELDS).finish()?;
        let output = Self {
            source_segments: take_ranges(&mut values, "source_segments"),
            target_segments: take_ranges(&mut values, "target_segments"),
            source_texts: take_texts(&mut values, "source_texts"),
            target_texts: take_texts(&mut values, "target_texts"),
        };

        let violations = output.structural_violations();
        if violations.is_empty() {
            Ok(output)
        } else {
            Err(SegmentationError::OracleContractViolation { violations })
        }
    }

    /// Length and non-emptiness problems, independent of any source text
    pub fn structural_violations(&self) -> Vec<ContractViolation> {
        let mut violations = Vec::new();
        check_pair_lengths(
            "source_segments",
            &self.source_segments,
            "source_texts",
            &self.source_texts,
            &mut violations,
        );
        check_pair_lengths(
            "target_segments",
            &self.target_segments,
            "target_texts",
            &self.target_texts,
            &mut violations,
        );
        violations
    }
}

impl SegmentationOutput {
    /// Parse and structurally validate a raw single-language oracle response
    pub fn from_json(json: &str) -> Result<Self> {
        Self::from_value(&parse_json(json)?)
    }

    pub fn from_value(value: &Value) -> Result<Self> {
        let mut values = ShapeReader::read(value, SEGMENTATION_FIELDS).finish()?;
        let output = Self {
            segments: take_ranges(&mut values, "segments"),
            texts: take_texts(&mut values, "texts"),
        };

        let violations = output.structural_violations();
        if violations.is_empty() {
            Ok(output)
        } else {
            Err(SegmentationError::OracleContractViolation { violations })
        }
    }

    pub fn structural_violations(&self) -> Vec<ContractViolation> {
        let mut violations = Vec::new();
        check_pair_lengths(
            "segments",
            &self.segments,
            "texts",
            &self.texts,
            &mut violations,
        );
        violations
    }
}

/// Validate one side of an answer against its real text.
///
/// Returns the built segments when the ranges are usable; claimed-text
/// mismatches are recorded but do not suppress the segments.
fn validate_side(
    prefix: &str,
    text: &str,
    ranges: &[WordRange],
    claimed_texts: &[String],
    violations: &mut Vec<ContractViolation>,
) -> Option<Vec<Segment>> {
    let segments_path = format!("{prefix}segments");
    let texts_path = format!("{prefix}texts");
    let words = tokenize(text);

    let validation = validate_ranges(ranges, words.len());
    if !validation.valid {
        violations.extend(
            validation
                .errors
                .into_iter()
                .map(|error| ContractViolation::new(segments_path.clone(), error)),
        );
        return None;
    }

    let segments = match build_segments_with_words(text, &words, ranges) {
        Ok(segments) => segments,
        Err(e) => {
            violations.push(ContractViolation::new(segments_path, e.to_string()));
            return None;
        }
    };

    if let Err(e) = ensure_round_trip(text, &segments) {
        violations.push(ContractViolation::new(segments_path, e.to_string()));
        return None;
    }

    for (i, (segment, claimed)) in segments.iter().zip(claimed_texts).enumerate() {
        if segment.text != *claimed {
            violations.push(ContractViolation::new(
                format!("{texts_path}[{i}]"),
                format!(
                    "claimed {claimed:?} but range {} covers {:?}",
                    segment.word_range(),
                    segment.text
                ),
            ));
        }
    }

    Some(segments)
}

/// Cross-validate a co-segmentation answer against both real texts.
///
/// Checks structure, contiguity and coverage of both range lists, equal
/// segment counts, round-trip integrity, and that every claimed text equals
/// the slice built from its range. All violations are reported together.
pub fn validate_co_segmentation(
    source_text: &str,
    target_text: &str,
    output: &CoSegmentationOutput,
) -> Result<AlignedSegmentation> {
    let mut violations = output.structural_violations();

    let source = validate_side(
        "source_",
        source_text,
        &output.source_segments,
        &output.source_texts,
        &mut violations,
    );
    let target = validate_side(
        "target_",
        target_text,
        &output.target_segments,
        &output.target_texts,
        &mut violations,
    );

    if output.source_segments.len() != output.target_segments.len() {
        violations.push(ContractViolation::new(
            "",
            format!(
                "Segment count mismatch: source={}, target={}.",
                output.source_segments.len(),
                output.target_segments.len()
            ),
        ));
    }

    match (source, target) {
        (Some(source), Some(target)) if violations.is_empty() => {
            Ok(AlignedSegmentation { source, target })
        }
        _ => {
            log::debug!(
                "co-segmentation rejected with {} violation(s)",
                violations.len()
            );
            Err(SegmentationError::OracleContractViolation { violations })
        }
    }
}

/// Cross-validate a single-language answer against its real text
pub fn validate_segmentation_output(
    text: &str,
    output: &SegmentationOutput,
) -> Result<Vec<Segment>> {
    let mut violations = output.structural_violations();
    let segments = validate_side("", text, &output.segments, &output.texts, &mut violations);

    match segments {
        Some(segments) if violations.is_empty() => Ok(segments),
        _ => Err(SegmentationError::OracleContractViolation { violations }),
    }
}

/// Derive word ranges from segment texts that partition `text` exactly.
///
/// Returns `None` unless the texts concatenate to `text` byte for byte and
/// each one contains at least one word. This is an explicit helper for
/// callers that only have texts; validation never falls back to it.
pub fn ranges_from_texts(text: &str, texts: &[String]) -> Option<Vec<WordRange>> {
    if texts.is_empty() || texts.concat() != text {
        return None;
    }

    let total_words = word_count(text);
    let mut ranges = Vec::with_capacity(texts.len());
    let mut cursor = 0usize;

    for segment_text in texts {
        let words = word_count(segment_text);
        if words == 0 {
            return None;
        }
        let end = cursor + words - 1;
        if end >= total_words {
            return None;
        }
        ranges.push(WordRange::new(cursor, end));
        cursor = end + 1;
    }

    (cursor == total_words).then_some(ranges)
}

fn ranges_schema() -> Value {
    json!({
        "type": "array",
        "minItems": 1,
        "items": {
            "type": "array",
            "minItems": 2,
            "maxItems": 2,
            "items": { "type": "integer", "minimum": 0 }
        }
    })
}

fn texts_schema() -> Value {
    json!({
        "type": "array",
        "minItems": 1,
        "items": { "type": "string" }
    })
}

/// Strict JSON schema for [`CoSegmentationOutput`], wrapped with its name
pub fn co_segmentation_json_schema() -> Value {
    json!({
        "name": CO_SEGMENTATION_SCHEMA_NAME,
        "strict": true,
        "schema": {
            "type": "object",
            "additionalProperties": false,
            "properties": {
                "source_segments": ranges_schema(),
                "target_segments": ranges_schema(),
                "source_texts": texts_schema(),
                "target_texts": texts_schema(),
            },
            "required": ["source_segments", "target_segments", "source_texts", "target_texts"]
        }
    })
}

/// Strict JSON schema for [`SegmentationOutput`], wrapped with its name
pub fn segmentation_json_schema() -> Value {
    json!({
        "name": SEGMENTATION_SCHEMA_NAME,
        "strict": true,
        "schema": {
            "type": "object",
            "additionalProperties": false,
            "properties": {
                "segments": ranges_schema(),
                "texts": texts_schema(),
            },
            "required": ["segments", "texts"]
        }
    })
}
