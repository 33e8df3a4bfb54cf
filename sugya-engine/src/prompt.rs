//! Prompt text for language-model oracles
//!
//! Oracles only ever see words by index. Every prompt lists the words as
//! `[i]token` so that the answer can be validated against the same
//! tokenization the core uses.

use crate::oracle::{Language, OracleRequest, TextType};
use sugya_core::{tokenize, word_count, CoSegmentationOutput, CO_SEGMENTATION_SCHEMA_NAME};

/// Render `text` as `[0]word [1]word ...`
pub fn indexed_word_list(text: &str) -> String {
    tokenize(text)
        .iter()
        .map(|word| format!("[{}]{}", word.index, word.token))
        .collect::<Vec<_>>()
        .join(" ")
}

fn index_bounds(count: usize) -> String {
    format!(
        "{count} (valid word indices 0..{})",
        count.saturating_sub(1)
    )
}

fn genre_instructions(text_type: TextType) -> &'static str {
    match text_type {
        TextType::Talmud => concat!(
            "The text is Talmud: formulaic, laconic, and full of parallelism.\n",
            "Cut at speech attributions (R' X said), between a question and its answer,\n",
            "before proof texts and objections, and between parallel legal cases.\n"
        ),
        TextType::Biblical => {
            "The text is biblical verse. Cut at the major pauses of the verse.\n"
        }
        TextType::Commentary => {
            "The text is commentary. Cut between the quoted lemma and the comment, and between arguments.\n"
        }
    }
}

/// Prompt asking for cut-after word indices on a single text
pub fn boundary_prompt(request: &OracleRequest) -> String {
    let count = word_count(&request.text);
    let language = request.language.name();

    [
        format!("Segment the following {language} text into phrase units."),
        "Return ONLY JSON of the form {\"boundaries\": [i, j, ...]}.".to_string(),
        String::new(),
        "Rules:".to_string(),
        "1) A boundary i means a cut after word i and before word i+1.".to_string(),
        "2) Never cut after the last word.".to_string(),
        "3) Use word indices only; do not rewrite or repeat the text.".to_string(),
        String::new(),
        genre_instructions(request.text_type).trim_end().to_string(),
        String::new(),
        format!("{language} word count: {}", index_bounds(count)),
        String::new(),
        format!("{language} indexed words:"),
        indexed_word_list(&request.text),
    ]
    .join("\n")
}

/// Prompt asking for an aligned joint segmentation of two texts
pub fn co_segmentation_prompt(
    source: &str,
    source_language: Language,
    target: &str,
    target_language: Language,
) -> String {
    let src = source_language.name();
    let tgt = target_language.name();

    [
        "Segment both texts into aligned phrase units using word-index ranges.".to_string(),
        "Return ONLY JSON.".to_string(),
        String::new(),
        "Rules:".to_string(),
        "1) Preserve the text exactly; do not rewrite it.".to_string(),
        "2) Use contiguous ranges that cover every word exactly once.".to_string(),
        "3) Ranges are inclusive: [startIndex, endIndex].".to_string(),
        format!("4) Return the same number of segments for {src} and {tgt}."),
        "5) Also return source_texts and target_texts with the exact substring of each segment, in order.".to_string(),
        "6) Never split inside a word.".to_string(),
        String::new(),
        format!("{src} (source) word count: {}", index_bounds(word_count(source))),
        format!("{tgt} (target) word count: {}", index_bounds(word_count(target))),
        String::new(),
        format!("{src} indexed words:"),
        indexed_word_list(source),
        String::new(),
        format!("{tgt} indexed words:"),
        indexed_word_list(target),
        String::new(),
        format!("JSON shape ({CO_SEGMENTATION_SCHEMA_NAME}):"),
        r#"{"source_segments":[[0,2],[3,4]],"target_segments":[[0,4],[5,7]],"source_texts":["...","..."],"target_texts":["...","..."]}"#.to_string(),
    ]
    .join("\n")
}

/// Follow-up prompt quoting a rejected answer and the reason it failed
pub fn repair_prompt(
    source: &str,
    target: &str,
    previous: &CoSegmentationOutput,
    error: &str,
) -> String {
    let previous_json = serde_json::to_string(previous).unwrap_or_default();

    [
        "Your previous JSON failed validation.".to_string(),
        format!("Validation error: {error}"),
        String::new(),
        "Fix the segmentation JSON. Keep contiguous full coverage and equal segment counts."
            .to_string(),
        "Return ONLY corrected JSON.".to_string(),
        String::new(),
        "Source indexed words:".to_string(),
        indexed_word_list(source),
        String::new(),
        "Target indexed words:".to_string(),
        indexed_word_list(target),
        String::new(),
        "Previous JSON:".to_string(),
        previous_json,
    ]
    .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use sugya_core::WordRange;

    #[test]
    fn test_indexed_word_list() {
        assert_eq!(
            indexed_word_list("  <b>Abaye</b> said:\nAnd"),
            "[0]<b>Abaye</b> [1]said: [2]And"
        );
        assert_eq!(indexed_word_list(""), "");
    }

    #[test]
    fn test_boundary_prompt_mentions_indices_and_genre() {
        let request = OracleRequest {
            text: "Abaye said: And it provokes".into(),
            language: crate::oracle::Language::English,
            text_type: TextType::Talmud,
            pass_index: 0,
            temperature: Some(0.1),
        };
        let prompt = boundary_prompt(&request);

        assert!(prompt.contains("English word count: 5 (valid word indices 0..4)"));
        assert!(prompt.contains("[4]provokes"));
        assert!(prompt.contains("speech attributions"));
    }

    #[test]
    fn test_co_segmentation_prompt_lists_both_texts() {
        let prompt = co_segmentation_prompt("א ב", Language::Hebrew, "a b c", Language::English);
        assert!(prompt.contains("Hebrew (source) word count: 2"));
        assert!(prompt.contains("English (target) word count: 3 (valid word indices 0..2)"));
        assert!(prompt.contains("[1]ב"));
        assert!(prompt.contains("source_segments"));
    }

    #[test]
    fn test_repair_prompt_embeds_previous_answer() {
        let previous = CoSegmentationOutput {
            source_segments: vec![WordRange::new(0, 0)],
            target_segments: vec![WordRange::new(0, 1)],
            source_texts: vec!["א".into()],
            target_texts: vec!["a".into()],
        };
        let prompt = repair_prompt("א", "a b", &previous, "target_texts[0]: mismatch");

        assert!(prompt.contains("Validation error: target_texts[0]: mismatch"));
        assert!(prompt.contains(r#""target_segments":[[0,1]]"#));
    }
}
