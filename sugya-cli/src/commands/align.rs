//! Align command implementation

use super::{AppContext, OutputArgs};
use crate::error::CliError;
use crate::input::FileReader;
use crate::output::SegmentRecord;
use anyhow::{Context, Result};
use clap::Args;
use std::fs;
use std::path::PathBuf;
use sugya_core::{CoSegmentationOutput, SegmentationError};
use sugya_engine::prompt::repair_prompt;
use sugya_engine::{CoSegmenter, EngineError, Language, RecordedAnswer};

/// Arguments for the align command
#[derive(Debug, Args)]
pub struct AlignArgs {
    /// Source text file
    #[arg(short, long, value_name = "FILE")]
    pub source: PathBuf,

    /// Target (translation) text file
    #[arg(short, long, value_name = "FILE")]
    pub target: PathBuf,

    /// JSON answer returned by the co-segmentation oracle
    #[arg(short, long, value_name = "FILE")]
    pub answer: PathBuf,

    /// Language of the source text
    #[arg(long, value_name = "LANG", default_value = "hebrew")]
    pub source_language: Language,

    /// Language of the target text
    #[arg(long, value_name = "LANG", default_value = "english")]
    pub target_language: Language,

    /// On rejection, write a follow-up prompt quoting the answer and its violations
    #[arg(long, value_name = "FILE")]
    pub repair_prompt: Option<PathBuf>,

    #[command(flatten)]
    pub output: OutputArgs,
}

impl AlignArgs {
    pub fn execute(&self, ctx: &AppContext) -> Result<()> {
        let source = FileReader::read_passage(&self.source)?;
        let target = FileReader::read_passage(&self.target)?;
        let raw = FileReader::read_text(&self.answer)?;

        let segmenter = CoSegmenter::with_languages(
            RecordedAnswer(raw.clone()),
            self.source_language,
            self.target_language,
        );

        let aligned = match segmenter.align(&source, &target) {
            Ok(aligned) => aligned,
            Err(EngineError::Segmentation(SegmentationError::OracleContractViolation {
                violations,
            })) => {
                eprintln!("Oracle answer rejected:");
                for violation in &violations {
                    eprintln!("  {violation}");
                }
                let summary = violations
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join("; ");
                self.write_repair_prompt(&source, &target, &raw, &summary)?;
                return Err(CliError::ValidationFailed(violations.len()).into());
            }
            Err(e) => {
                self.write_repair_prompt(&source, &target, &raw, &e.to_string())?;
                return Err(e).context("Alignment failed");
            }
        };

        let mut formatter = self.output.formatter(&ctx.config.output)?;
        for (source_segment, target_segment) in aligned.pairs() {
            formatter.format_pair(
                &SegmentRecord::from(source_segment),
                &SegmentRecord::from(target_segment),
            )?;
        }
        formatter.annotate("pairs", &aligned.len().to_string())?;
        formatter.finish()
    }

    /// Only answers that still decode into the expected shape can be quoted back
    fn write_repair_prompt(&self, source: &str, target: &str, raw: &str, error: &str) -> Result<()> {
        let Some(path) = &self.repair_prompt else {
            return Ok(());
        };

        match serde_json::from_str::<CoSegmentationOutput>(raw) {
            Ok(previous) => {
                fs::write(path, repair_prompt(source, target, &previous, error))
                    .with_context(|| format!("Failed to write to {}", path.display()))?;
                log::info!("repair prompt written to {}", path.display());
            }
            Err(e) => log::warn!("answer is not repairable JSON, no repair prompt written: {e}"),
        }
        Ok(())
    }
}
