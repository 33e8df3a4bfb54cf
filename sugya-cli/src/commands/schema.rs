//! Schema command implementation

use anyhow::{Context, Result};
use clap::Args;
use std::fs;
use std::path::PathBuf;
use sugya_core::{co_segmentation_json_schema, segmentation_json_schema};

/// Arguments for the schema command
#[derive(Debug, Args)]
pub struct SchemaArgs {
    /// Print the single-text schema instead of the co-segmentation one
    #[arg(long)]
    pub single: bool,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

impl SchemaArgs {
    pub fn execute(&self) -> Result<()> {
        let schema = if self.single {
            segmentation_json_schema()
        } else {
            co_segmentation_json_schema()
        };
        let rendered = serde_json::to_string_pretty(&schema)?;

        match &self.output {
            Some(path) => fs::write(path, format!("{rendered}\n"))
                .with_context(|| format!("Failed to write to {}", path.display()))?,
            None => println!("{rendered}"),
        }
        Ok(())
    }
}
