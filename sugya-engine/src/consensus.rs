//! Multi-pass consensus segmentation
//!
//! The same text is sent to the oracle several times. Each answer that
//! survives validation votes for the inter-word gaps it cuts at; a gap is
//! kept only when a strict majority of surviving passes chose it. The final
//! segmentation is rebuilt from those gaps and checked for exact
//! reconstruction before it is returned.

use crate::config::ConsensusConfig;
use crate::error::{EngineError, Result};
use crate::executor::run_indexed;
use crate::oracle::{BoundaryOracle, BoundaryProposal, OracleRequest};
use serde::{Deserialize, Serialize};
use sugya_core::{
    boundaries_to_ranges, build_segments_with_words, ensure_round_trip, ranges_to_boundaries,
    tokenize, validate_segmentation_output, Segment, WordSpan,
};

/// Outcome of a consensus run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsensusResult {
    /// Segments built from the accepted boundaries
    pub final_segmentation: Vec<Segment>,
    /// Fraction of per-pass gap decisions that match the final decision
    pub agreement_level: f64,
    /// Gaps that some but not all surviving passes cut at
    pub conflicting_boundaries: Vec<usize>,
    pub passes_attempted: usize,
    pub passes_survived: usize,
    /// Accepted cut-after word indices, sorted
    pub boundaries: Vec<usize>,
    /// One message per discarded pass
    #[serde(default)]
    pub pass_failures: Vec<String>,
}

/// Vote counts over the gaps of one text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundaryTally {
    /// `votes[g]` = surviving passes that cut after word `g`
    pub votes: Vec<usize>,
    pub survivors: usize,
}

impl BoundaryTally {
    /// Count votes from each surviving pass's cut-after set
    pub fn from_passes(word_count: usize, passes: &[Vec<usize>]) -> Self {
        let gaps = word_count.saturating_sub(1);
        let mut votes = vec![0usize; gaps];

        for boundaries in passes {
            for &gap in boundaries {
                if let Some(count) = votes.get_mut(gap) {
                    *count += 1;
                }
            }
        }

        Self {
            votes,
            survivors: passes.len(),
        }
    }

    /// Gaps chosen by a strict majority of survivors
    pub fn accepted(&self) -> Vec<usize> {
        self.gaps_where(|votes| 2 * votes > self.survivors)
    }

    /// Gaps with non-unanimous votes, ties included
    pub fn conflicting(&self) -> Vec<usize> {
        self.gaps_where(|votes| votes > 0 && votes < self.survivors)
    }

    /// Fraction of (pass, gap) decisions that agree with the accepted set
    pub fn agreement_level(&self) -> f64 {
        let decisions = self.votes.len() * self.survivors;
        if decisions == 0 {
            return 1.0;
        }

        let agreeing: usize = self
            .votes
            .iter()
            .map(|&votes| {
                if 2 * votes > self.survivors {
                    votes
                } else {
                    self.survivors - votes
                }
            })
            .sum();

        agreeing as f64 / decisions as f64
    }

    fn gaps_where(&self, keep: impl Fn(usize) -> bool) -> Vec<usize> {
        self.votes
            .iter()
            .enumerate()
            .filter(|&(_, &votes)| keep(votes))
            .map(|(gap, _)| gap)
            .collect()
    }
}

/// Reconciles several oracle passes into one segmentation
pub struct ConsensusResolver<O> {
    oracle: O,
    config: ConsensusConfig,
}

impl<O: BoundaryOracle> ConsensusResolver<O> {
    /// Create a resolver, validating the configuration
    pub fn new(oracle: O, config: ConsensusConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { oracle, config })
    }

    pub fn config(&self) -> &ConsensusConfig {
        &self.config
    }

    pub fn oracle(&self) -> &O {
        &self.oracle
    }

    /// Run the configured number of passes
    pub fn segment(&self, text: &str) -> Result<ConsensusResult> {
        self.segment_with_consensus(text, self.config.passes)
    }

    /// Run `pass_count` passes and return the majority segmentation
    pub fn segment_with_consensus(&self, text: &str, pass_count: usize) -> Result<ConsensusResult> {
        if text.trim().is_empty() {
            return Err(EngineError::EmptyInput);
        }
        if pass_count == 0 {
            return Err(EngineError::Config("pass count must be greater than 0".into()));
        }

        let words = tokenize(text);
        log::info!(
            "consensus over {} words with {pass_count} passes via {}",
            words.len(),
            self.oracle.name()
        );

        let outcomes = run_indexed(
            self.config.execution_mode,
            self.config.threads,
            pass_count,
            |pass_index| self.run_pass(text, &words, pass_index),
        )?;

        let mut survivors = Vec::with_capacity(pass_count);
        let mut failures = Vec::new();
        for (pass_index, outcome) in outcomes.into_iter().enumerate() {
            match outcome {
                Ok(boundaries) => survivors.push(boundaries),
                Err(e) => {
                    log::warn!("pass {pass_index} discarded: {e}");
                    failures.push(format!("pass {pass_index}: {e}"));
                }
            }
        }

        if survivors.is_empty() {
            return Err(EngineError::NoConsensus {
                attempted: pass_count,
                failures,
            });
        }

        let tally = BoundaryTally::from_passes(words.len(), &survivors);
        let boundaries = tally.accepted();
        let cuts: Vec<i64> = boundaries.iter().map(|&b| b as i64).collect();

        let ranges = boundaries_to_ranges(&cuts, words.len())?;
        let final_segmentation = build_segments_with_words(text, &words, &ranges)?;
        ensure_round_trip(text, &final_segmentation)?;

        log::debug!(
            "{} of {pass_count} passes survived, {} boundaries accepted",
            survivors.len(),
            boundaries.len()
        );

        Ok(ConsensusResult {
            final_segmentation,
            agreement_level: tally.agreement_level(),
            conflicting_boundaries: tally.conflicting(),
            passes_attempted: pass_count,
            passes_survived: survivors.len(),
            boundaries,
            pass_failures: failures,
        })
    }

    /// One oracle call, validated all the way to a round-tripped segmentation
    fn run_pass(&self, text: &str, words: &[WordSpan], pass_index: usize) -> Result<Vec<usize>> {
        let request = OracleRequest {
            text: text.to_string(),
            language: self.config.language,
            text_type: self.config.text_type,
            pass_index,
            temperature: self.config.temperature_for(pass_index),
        };

        let ranges = match self.oracle.propose(&request)? {
            BoundaryProposal::Boundaries(boundaries) => {
                boundaries_to_ranges(&boundaries, words.len())?
            }
            BoundaryProposal::Ranges(output) => {
                validate_segmentation_output(text, &output)?;
                output.segments
            }
        };

        let segments = build_segments_with_words(text, words, &ranges)?;
        ensure_round_trip(text, &segments)?;
        Ok(ranges_to_boundaries(&ranges))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strict_majority() {
        let tally = BoundaryTally::from_passes(6, &[vec![1, 3], vec![1], vec![1, 3, 4]]);
        assert_eq!(tally.votes, vec![0, 3, 0, 2, 1]);
        assert_eq!(tally.accepted(), vec![1, 3]);
        assert_eq!(tally.conflicting(), vec![3, 4]);
    }

    #[test]
    fn test_tie_is_rejected_and_conflicting() {
        let tally = BoundaryTally::from_passes(4, &[vec![0, 1], vec![1]]);
        assert_eq!(tally.accepted(), vec![1]);
        assert_eq!(tally.conflicting(), vec![0]);
    }

    #[test]
    fn test_agreement_level() {
        // 3 passes, 2 gaps: gap 0 unanimous no, gap 1 two yes one no.
        let tally = BoundaryTally::from_passes(3, &[vec![1], vec![1], vec![]]);
        assert!((tally.agreement_level() - 5.0 / 6.0).abs() < 1e-12);

        let unanimous = BoundaryTally::from_passes(3, &[vec![0], vec![0]]);
        assert_eq!(unanimous.agreement_level(), 1.0);
    }

    #[test]
    fn test_single_word_has_full_agreement() {
        let tally = BoundaryTally::from_passes(1, &[vec![], vec![]]);
        assert!(tally.votes.is_empty());
        assert_eq!(tally.agreement_level(), 1.0);
    }

    #[test]
    fn test_out_of_range_votes_are_ignored() {
        let tally = BoundaryTally::from_passes(2, &[vec![0, 7]]);
        assert_eq!(tally.votes, vec![1]);
    }
}
