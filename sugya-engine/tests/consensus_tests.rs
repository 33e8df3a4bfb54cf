//! Consensus resolver behavior against scripted oracles

use proptest::prelude::*;
use std::sync::Mutex;
use sugya_core::{verify_round_trip, SegmentationOutput, WordRange};
use sugya_engine::*;

const TEXT: &str = "<b>Abaye</b> said: And <i>it</i> provokes Torah scholars.";

fn sequential() -> ConsensusConfig {
    ConsensusConfig::builder()
        .execution_mode(ExecutionMode::Sequential)
        .build()
        .unwrap()
}

fn resolver<O: BoundaryOracle>(oracle: O) -> ConsensusResolver<O> {
    ConsensusResolver::new(oracle, sequential()).unwrap()
}

#[test]
fn test_identical_passes_reproduce_the_pass() {
    let result = resolver(ReplayOracle::from_boundaries(vec![vec![1, 4]; 3]))
        .segment_with_consensus(TEXT, 3)
        .unwrap();

    let texts: Vec<_> = result
        .final_segmentation
        .iter()
        .map(|s| s.text.as_str())
        .collect();
    assert_eq!(
        texts,
        vec!["<b>Abaye</b> said: ", "And <i>it</i> provokes ", "Torah scholars."]
    );
    assert_eq!(result.agreement_level, 1.0);
    assert!(result.conflicting_boundaries.is_empty());
    assert_eq!(result.passes_survived, 3);
}

#[test]
fn test_single_pass_is_its_own_consensus() {
    let result = resolver(ReplayOracle::from_boundaries(vec![vec![0, 2, 5]]))
        .segment_with_consensus(TEXT, 1)
        .unwrap();
    assert_eq!(result.boundaries, vec![0, 2, 5]);
    assert_eq!(result.agreement_level, 1.0);
}

#[test]
fn test_majority_wins_and_minority_is_conflicting() {
    let oracle = ReplayOracle::from_boundaries(vec![vec![1, 4], vec![1], vec![1, 4, 5]]);
    let result = resolver(oracle).segment_with_consensus(TEXT, 3).unwrap();

    assert_eq!(result.boundaries, vec![1, 4]);
    assert_eq!(result.conflicting_boundaries, vec![4, 5]);
    assert!(result.agreement_level < 1.0);
    assert!(verify_round_trip(TEXT, &result.final_segmentation));
}

#[test]
fn test_exact_tie_is_not_accepted() {
    let oracle = ReplayOracle::from_boundaries(vec![vec![1, 4], vec![1]]);
    let result = resolver(oracle).segment_with_consensus(TEXT, 2).unwrap();

    assert_eq!(result.boundaries, vec![1]);
    assert_eq!(result.conflicting_boundaries, vec![4]);
}

#[test]
fn test_invalid_passes_are_discarded() {
    let oracle = ReplayOracle::new(vec![
        Ok(BoundaryProposal::Boundaries(vec![1, 4])),
        Ok(BoundaryProposal::Boundaries(vec![1, 6])),
        Err(OracleError::Timeout),
        Ok(BoundaryProposal::Boundaries(vec![-1])),
        Ok(BoundaryProposal::Boundaries(vec![4, 1])),
    ]);
    let result = resolver(oracle).segment_with_consensus(TEXT, 5).unwrap();

    assert_eq!(result.passes_attempted, 5);
    assert_eq!(result.passes_survived, 2);
    assert_eq!(result.pass_failures.len(), 3);
    assert!(result.pass_failures[0].starts_with("pass 1:"));
    assert!(result.pass_failures[1].contains("timed out"));
    assert_eq!(result.boundaries, vec![1, 4]);
}

#[test]
fn test_range_claims_are_validated() {
    let honest = SegmentationOutput {
        segments: vec![WordRange::new(0, 1), WordRange::new(2, 6)],
        texts: vec![
            "<b>Abaye</b> said: ".into(),
            "And <i>it</i> provokes Torah scholars.".into(),
        ],
    };
    let hallucinated = SegmentationOutput {
        segments: vec![WordRange::new(0, 1), WordRange::new(2, 6)],
        texts: vec!["Abaye said: ".into(), "And it provokes Torah scholars.".into()],
    };
    let oracle = ReplayOracle::new(vec![
        Ok(BoundaryProposal::Ranges(honest)),
        Ok(BoundaryProposal::Ranges(hallucinated)),
    ]);

    let result = resolver(oracle).segment_with_consensus(TEXT, 2).unwrap();
    assert_eq!(result.passes_survived, 1);
    assert_eq!(result.boundaries, vec![1]);
    assert!(result.pass_failures[0].contains("contract"));
}

#[test]
fn test_range_at_largest_index_discards_only_that_pass() {
    let oracle = ReplayOracle::from_json_answers([
        "[0]",
        r#"{"segments": [[0, 18446744073709551615], [1, 1]], "texts": ["a ", "b"]}"#,
        r#"{"boundaries": [0]}"#,
    ]);

    let result = resolver(oracle).segment_with_consensus("a b", 3).unwrap();
    assert_eq!(result.passes_survived, 2);
    assert_eq!(result.boundaries, vec![0]);
    assert!(result.pass_failures[0].starts_with("pass 1:"));
}

#[test]
fn test_all_passes_failing_is_no_consensus() {
    let oracle = ReplayOracle::new(vec![
        Err(OracleError::Unavailable("quota".into())),
        Ok(BoundaryProposal::Boundaries(vec![6])),
    ]);

    match resolver(oracle).segment_with_consensus(TEXT, 3) {
        Err(EngineError::NoConsensus {
            attempted,
            failures,
        }) => {
            assert_eq!(attempted, 3);
            assert_eq!(failures.len(), 3);
            assert!(failures[2].contains("no recorded answer"));
        }
        other => panic!("expected NoConsensus, got {other:?}"),
    }
}

#[test]
fn test_empty_text_and_zero_passes() {
    let r = resolver(ReplayOracle::from_boundaries(vec![vec![]]));
    assert!(matches!(
        r.segment_with_consensus("  \n", 3),
        Err(EngineError::EmptyInput)
    ));
    assert!(matches!(
        r.segment_with_consensus(TEXT, 0),
        Err(EngineError::Config(_))
    ));
}

#[test]
fn test_no_boundaries_gives_one_segment() {
    let result = resolver(ReplayOracle::from_boundaries(vec![vec![], vec![3]]))
        .segment_with_consensus(TEXT, 2)
        .unwrap();
    assert_eq!(result.final_segmentation.len(), 1);
    assert_eq!(result.final_segmentation[0].text, TEXT);
    assert_eq!(result.conflicting_boundaries, vec![3]);
}

#[test]
fn test_requests_carry_configuration() {
    let seen = Mutex::new(Vec::new());
    let oracle = FnOracle::new("recorder", |request: &OracleRequest| {
        if let Ok(mut seen) = seen.lock() {
            seen.push(request.clone());
        }
        Ok(BoundaryProposal::Boundaries(vec![1]))
    });
    let config = ConsensusConfig::builder()
        .language(Language::English)
        .text_type(TextType::Commentary)
        .execution_mode(ExecutionMode::Sequential)
        .build()
        .unwrap();

    ConsensusResolver::new(oracle, config)
        .unwrap()
        .segment_with_consensus(TEXT, 4)
        .unwrap();

    let seen = seen.into_inner().unwrap();
    assert_eq!(seen.len(), 4);
    assert_eq!(seen[3].pass_index, 3);
    assert_eq!(seen[3].temperature, Some(0.1));
    assert_eq!(seen[1].temperature, Some(0.3));
    assert!(seen
        .iter()
        .all(|r| r.language == Language::English && r.text_type == TextType::Commentary));
}

#[test]
fn test_segment_uses_configured_pass_count() {
    let config = ConsensusConfig::builder()
        .execution_mode(ExecutionMode::Sequential)
        .passes(2)
        .build()
        .unwrap();
    let result = ConsensusResolver::new(ReplayOracle::from_boundaries(vec![vec![2]; 5]), config)
        .unwrap()
        .segment(TEXT)
        .unwrap();
    assert_eq!(result.passes_attempted, 2);
}

#[cfg(feature = "parallel")]
#[test]
fn test_parallel_matches_sequential() {
    let scripted = |request: &OracleRequest| -> std::result::Result<BoundaryProposal, OracleError> {
        match request.pass_index % 4 {
            0 => Ok(BoundaryProposal::Boundaries(vec![1, 4])),
            1 => Ok(BoundaryProposal::Boundaries(vec![1, 2])),
            2 => Err(OracleError::Cancelled),
            _ => Ok(BoundaryProposal::Boundaries(vec![1, 4, 5])),
        }
    };

    let sequential = ConsensusResolver::new(FnOracle::new("seq", scripted), sequential())
        .unwrap()
        .segment_with_consensus(TEXT, 9)
        .unwrap();

    let parallel_config = ConsensusConfig::builder()
        .execution_mode(ExecutionMode::Parallel)
        .threads(Some(4))
        .build()
        .unwrap();
    let parallel = ConsensusResolver::new(FnOracle::new("par", scripted), parallel_config)
        .unwrap()
        .segment_with_consensus(TEXT, 9)
        .unwrap();

    assert_eq!(sequential, parallel);
}

proptest! {
    #[test]
    fn consensus_always_round_trips(
        passes in prop::collection::vec(prop::collection::btree_set(0usize..6, 0..6), 1..7)
    ) {
        let oracle = ReplayOracle::from_boundaries(
            passes.iter().map(|p| p.iter().map(|&b| b as i64).collect::<Vec<_>>()),
        );
        let result = resolver(oracle).segment_with_consensus(TEXT, passes.len()).unwrap();

        prop_assert!(verify_round_trip(TEXT, &result.final_segmentation));
        prop_assert!(result.agreement_level >= 0.0 && result.agreement_level <= 1.0);
        for boundary in &result.boundaries {
            let votes = passes.iter().filter(|p| p.contains(boundary)).count();
            prop_assert!(2 * votes > passes.len());
        }
    }
}
