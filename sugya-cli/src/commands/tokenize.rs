//! Tokenize command implementation

use super::{AppContext, OutputArgs};
use crate::input::FileReader;
use crate::output::SegmentRecord;
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;
use sugya_core::tokenize;

/// Arguments for the tokenize command
#[derive(Debug, Args)]
pub struct TokenizeArgs {
    /// Input file
    #[arg(short, long, value_name = "FILE")]
    pub input: PathBuf,

    #[command(flatten)]
    pub output: OutputArgs,
}

impl TokenizeArgs {
    pub fn execute(&self, ctx: &AppContext) -> Result<()> {
        let text = FileReader::read_passage(&self.input)?;
        let words = tokenize(&text);
        log::info!("{} words in {}", words.len(), self.input.display());

        let mut formatter = self.output.formatter(&ctx.config.output)?;
        for word in &words {
            formatter.format_segment(&SegmentRecord::from(word))?;
        }
        formatter.annotate("words", &words.len().to_string())?;
        formatter.finish()
    }
}
