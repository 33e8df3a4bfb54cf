//! Segment command implementation

use super::{AppContext, OutputArgs};
use crate::input::FileReader;
use crate::output::SegmentRecord;
use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;
use sugya_core::{boundaries_to_ranges, build_segments_with_words, ensure_round_trip, tokenize};

/// Arguments for the segment command
#[derive(Debug, Args)]
pub struct SegmentArgs {
    /// Input file
    #[arg(short, long, value_name = "FILE")]
    pub input: PathBuf,

    /// Word indices to cut after, comma separated
    #[arg(
        long,
        value_name = "INDEX",
        value_delimiter = ',',
        allow_negative_numbers = true
    )]
    pub cut: Vec<i64>,

    #[command(flatten)]
    pub output: OutputArgs,
}

impl SegmentArgs {
    pub fn execute(&self, ctx: &AppContext) -> Result<()> {
        let text = FileReader::read_passage(&self.input)?;
        let words = tokenize(&text);

        let ranges = boundaries_to_ranges(&self.cut, words.len())
            .with_context(|| format!("Cannot cut {}", self.input.display()))?;
        let segments = build_segments_with_words(&text, &words, &ranges)?;
        ensure_round_trip(&text, &segments)?;

        let mut formatter = self.output.formatter(&ctx.config.output)?;
        for segment in &segments {
            formatter.format_segment(&SegmentRecord::from(segment))?;
        }
        formatter.annotate("words", &words.len().to_string())?;
        formatter.annotate("segments", &segments.len().to_string())?;
        formatter.finish()
    }
}
