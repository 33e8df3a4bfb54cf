//! Consensus command implementation

use super::{AppContext, OutputArgs};
use crate::error::CliError;
use crate::input::FileReader;
use crate::output::SegmentRecord;
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;
use sugya_engine::{
    ConsensusConfig, ConsensusResolver, ExecutionMode, Language, ReplayOracle, TextType,
};

/// Arguments for the consensus command
#[derive(Debug, Args)]
pub struct ConsensusArgs {
    /// Input file
    #[arg(short, long, value_name = "FILE")]
    pub input: PathBuf,

    /// Recorded oracle answer, one file per pass, in pass order
    #[arg(short, long, value_name = "FILE", required = true)]
    pub proposal: Vec<PathBuf>,

    /// Passes to run (default: one per proposal)
    #[arg(long, value_name = "COUNT")]
    pub passes: Option<usize>,

    /// Run passes one at a time
    #[arg(long)]
    pub sequential: bool,

    /// Number of worker threads (default: all cores)
    #[arg(long, value_name = "COUNT")]
    pub threads: Option<usize>,

    /// Language of the text (default: from configuration)
    #[arg(long, value_name = "LANG")]
    pub language: Option<Language>,

    /// Genre of the text (default: from configuration)
    #[arg(long, value_name = "TYPE")]
    pub text_type: Option<TextType>,

    #[command(flatten)]
    pub output: OutputArgs,
}

impl ConsensusArgs {
    pub fn execute(&self, ctx: &AppContext) -> Result<()> {
        let text = FileReader::read_passage(&self.input)?;
        let answers = self
            .proposal
            .iter()
            .map(|path| FileReader::read_text(path))
            .collect::<Result<Vec<_>>>()?;

        let config = self.config(&ctx.config.consensus, answers.len())?;
        let passes = config.passes;
        let resolver = ConsensusResolver::new(ReplayOracle::from_json_answers(&answers), config)?;
        let result = resolver.segment_with_consensus(&text, passes)?;

        let mut formatter = self.output.formatter(&ctx.config.output)?;
        for segment in &result.final_segmentation {
            formatter.format_segment(&SegmentRecord::from(segment))?;
        }
        formatter.annotate("agreement_level", &format!("{:.3}", result.agreement_level))?;
        formatter.annotate("boundaries", &join_indices(&result.boundaries))?;
        formatter.annotate(
            "conflicting_boundaries",
            &join_indices(&result.conflicting_boundaries),
        )?;
        formatter.annotate(
            "passes_survived",
            &format!("{}/{}", result.passes_survived, result.passes_attempted),
        )?;
        for (i, failure) in result.pass_failures.iter().enumerate() {
            formatter.annotate(&format!("discarded_{i}"), failure)?;
        }
        formatter.finish()
    }

    /// Merge command-line overrides into the configured consensus settings
    fn config(&self, base: &ConsensusConfig, proposals: usize) -> Result<ConsensusConfig> {
        let mut builder = ConsensusConfig::builder()
            .language(self.language.unwrap_or(base.language))
            .text_type(self.text_type.unwrap_or(base.text_type))
            .passes(self.passes.unwrap_or(proposals))
            .execution_mode(if self.sequential {
                ExecutionMode::Sequential
            } else {
                base.execution_mode
            })
            .pass_temperatures(base.pass_temperatures.clone());

        if let Some(threads) = self.threads.or(base.threads) {
            builder = builder.threads(Some(threads));
        }

        builder
            .build()
            .map_err(|e| CliError::InvalidArgument(e.to_string()).into())
    }
}

fn join_indices(indices: &[usize]) -> String {
    indices
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",")
}
