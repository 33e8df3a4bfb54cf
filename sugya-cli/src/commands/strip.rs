//! Strip command implementation

use super::{AppContext, OutputArgs};
use crate::input::{resolve_patterns, FileReader};
use crate::output::SegmentRecord;
use anyhow::Result;
use clap::Args;
use sugya_core::strip_markup_and_footnotes;

/// Arguments for the strip command
#[derive(Debug, Args)]
pub struct StripArgs {
    /// Input files or patterns (supports glob)
    #[arg(short, long, value_name = "FILE/PATTERN", required = true)]
    pub input: Vec<String>,

    #[command(flatten)]
    pub output: OutputArgs,
}

impl StripArgs {
    pub fn execute(&self, ctx: &AppContext) -> Result<()> {
        let files = resolve_patterns(&self.input)?;
        let mut formatter = self.output.formatter(&ctx.config.output)?;

        for (i, path) in files.iter().enumerate() {
            let text = FileReader::read_text(path)?;
            let stripped = strip_markup_and_footnotes(&text);
            let record =
                SegmentRecord::plain(i + 1, stripped).with_file(path.display().to_string());
            formatter.format_segment(&record)?;
        }

        formatter.finish()
    }
}
