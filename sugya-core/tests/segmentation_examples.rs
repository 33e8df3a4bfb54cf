//! End-to-end examples over the public core API

use sugya_core::{
    boundaries_to_ranges, build_segments, strip_markup_and_footnotes, split_english_clauses,
    split_hebrew_by_cantillation, validate_co_segmentation, validate_ranges, verify_round_trip,
    word_count, CoSegmentationOutput, SegmentationError, WordRange,
};

#[test]
fn test_contiguous_ranges_from_cuts() {
    let ranges = boundaries_to_ranges(&[2, 5], 7).unwrap();
    assert_eq!(
        ranges,
        vec![WordRange::new(0, 2), WordRange::new(3, 5), WordRange::new(6, 6)]
    );
}

#[test]
fn test_gap_is_reported_with_expected_index() {
    let result = validate_ranges(&[WordRange::new(0, 1), WordRange::new(3, 4)], 5);
    assert!(!result.valid);
    assert!(result.errors.iter().any(|e| e.contains("expected 2")));
}

#[test]
fn test_talmud_passage_with_markup() {
    let text = "<b>Abaye</b> said: And <i>it</i> provokes Torah scholars.";
    let ranges = boundaries_to_ranges(&[1, 4], word_count(text)).unwrap();
    let segments = build_segments(text, &ranges).unwrap();

    let texts: Vec<_> = segments.iter().map(|s| s.text.as_str()).collect();
    assert_eq!(
        texts,
        vec!["<b>Abaye</b> said: ", "And <i>it</i> provokes ", "Torah scholars."]
    );
    assert!(verify_round_trip(text, &segments));
}

#[test]
fn test_pointed_hebrew_survives_every_cut_set() {
    let text = "וַיֹּ֥אמֶר אֱלֹהִ֖ים יְהִ֣י א֑וֹר וַֽיְהִי־אֽוֹר׃";
    let n = word_count(text);

    for cut in 0..(n as i64 - 1) {
        let ranges = boundaries_to_ranges(&[cut], n).unwrap();
        let segments = build_segments(text, &ranges).unwrap();
        assert!(verify_round_trip(text, &segments), "cut after word {cut}");
    }
}

#[test]
fn test_co_segmentation_of_verse_and_translation() {
    let hebrew = "וַיֹּאמֶר אֱלֹהִים יְהִי אוֹר וַיְהִי אוֹר";
    let english = "And God said, Let there be light: and there was light.";

    let json = r#"{
        "hebrew_segments": [[0, 1], [2, 3], [4, 5]],
        "english_segments": [[0, 2], [3, 6], [7, 10]],
        "hebrew_texts": ["וַיֹּאמֶר אֱלֹהִים ", "יְהִי אוֹר ", "וַיְהִי אוֹר"],
        "english_texts": ["And God said, ", "Let there be light: ", "and there was light."]
    }"#;

    let output = CoSegmentationOutput::from_json(json).unwrap();
    let aligned = validate_co_segmentation(hebrew, english, &output).unwrap();

    assert_eq!(aligned.len(), 3);
    let (he, en) = aligned.pairs().nth(1).unwrap();
    assert_eq!(he.text, "יְהִי אוֹר ");
    assert_eq!(en.text, "Let there be light: ");
}

#[test]
fn test_co_segmentation_collects_violations_from_both_sides() {
    let output = CoSegmentationOutput {
        source_segments: vec![WordRange::new(0, 0), WordRange::new(2, 2)],
        target_segments: vec![WordRange::new(0, 0)],
        source_texts: vec!["a ".into(), "c".into()],
        target_texts: vec!["x y".into()],
    };

    match validate_co_segmentation("a b c", "x y", &output) {
        Err(SegmentationError::OracleContractViolation { violations }) => {
            let paths: Vec<_> = violations.iter().map(|v| v.path.as_str()).collect();
            assert!(paths.contains(&"source_segments"));
            assert!(paths.contains(&"target_segments"));
            assert!(paths.contains(&""));
        }
        other => panic!("expected OracleContractViolation, got {other:?}"),
    }
}

#[test]
fn test_strip_then_split_english() {
    let raw = r#"And God said<sup class="footnote-marker">*</sup>, Let there be light<i class="footnote">Heb. <i>or</i>.</i>: and there was light."#;
    let clean = strip_markup_and_footnotes(raw);
    assert_eq!(clean, "And God said, Let there be light: and there was light.");
    assert_eq!(
        split_english_clauses(&clean),
        vec!["And God said,", "Let there be light:", "and there was light."]
    );
}

#[test]
fn test_strip_then_split_hebrew() {
    let raw = "<span>וַיֹּאמֶר אֱלֹהִים יְהִי א\u{0591}וֹר</span> וַיְהִי\u{05BE}אוֹר";
    let clean = strip_markup_and_footnotes(raw);
    assert_eq!(
        split_hebrew_by_cantillation(&clean),
        vec!["וַיֹּאמֶר אֱלֹהִים יְהִי א\u{0591}וֹר", "וַיְהִי אוֹר"]
    );
}
