//! CLI command implementations

use crate::config::{CliConfig, OutputConfig};
use crate::output::{create_formatter, OutputFormat, OutputFormatter};
use anyhow::Result;
use clap::{Args, Subcommand};
use std::path::PathBuf;

pub mod align;
pub mod consensus;
pub mod generate_config;
pub mod prompt;
pub mod schema;
pub mod segment;
pub mod split;
pub mod strip;
pub mod tokenize;

/// State shared by every command
#[derive(Debug, Default)]
pub struct AppContext {
    pub config: CliConfig,
    /// Suppress progress bars
    pub quiet: bool,
}

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List the indexed words of a passage
    Tokenize(tokenize::TokenizeArgs),

    /// Cut a passage after the given word indices
    Segment(segment::SegmentArgs),

    /// Split files into clauses without an oracle
    Split(split::SplitArgs),

    /// Strip HTML markup and footnotes
    Strip(strip::StripArgs),

    /// Validate an oracle's joint segmentation of a text and its translation
    Align(align::AlignArgs),

    /// Reconcile several recorded oracle passes by majority vote
    Consensus(consensus::ConsensusArgs),

    /// Print the JSON schema oracles must answer with
    Schema(schema::SchemaArgs),

    /// Render the prompt an oracle would receive
    Prompt(prompt::PromptArgs),

    /// Write a configuration file with every default spelled out
    GenerateConfig(generate_config::GenerateConfigArgs),
}

impl Commands {
    /// Execute the selected command
    pub fn execute(&self, ctx: &AppContext) -> Result<()> {
        match self {
            Commands::Tokenize(args) => args.execute(ctx),
            Commands::Segment(args) => args.execute(ctx),
            Commands::Split(args) => args.execute(ctx),
            Commands::Strip(args) => args.execute(ctx),
            Commands::Align(args) => args.execute(ctx),
            Commands::Consensus(args) => args.execute(ctx),
            Commands::Schema(args) => args.execute(),
            Commands::Prompt(args) => args.execute(ctx),
            Commands::GenerateConfig(args) => args.execute(),
        }
    }
}

/// Output destination and format, shared by the commands that emit segments
#[derive(Debug, Clone, Default, Args)]
pub struct OutputArgs {
    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format (default: from configuration, else text)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,
}

impl OutputArgs {
    /// Build the formatter, falling back to configured defaults
    pub fn formatter(&self, config: &OutputConfig) -> Result<Box<dyn OutputFormatter>> {
        let format = self.format.unwrap_or(config.format);
        log::debug!("writing {format:?} output");
        create_formatter(format, self.output.as_deref(), config.pretty_json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Debug, Parser)]
    struct Harness {
        #[command(subcommand)]
        command: Commands,
    }

    #[test]
    fn test_segment_accepts_negative_cuts() {
        let parsed = Harness::try_parse_from(["sugya", "segment", "-i", "a.txt", "--cut=2,-1"])
            .unwrap();
        match parsed.command {
            Commands::Segment(args) => assert_eq!(args.cut, vec![2, -1]),
            other => panic!("expected segment, got {other:?}"),
        }
    }

    #[test]
    fn test_consensus_requires_proposals() {
        assert!(Harness::try_parse_from(["sugya", "consensus", "-i", "a.txt"]).is_err());

        let parsed = Harness::try_parse_from([
            "sugya", "consensus", "-i", "a.txt", "-p", "p1.json", "-p", "p2.json", "--sequential",
        ])
        .unwrap();
        match parsed.command {
            Commands::Consensus(args) => {
                assert_eq!(args.proposal.len(), 2);
                assert!(args.sequential);
            }
            other => panic!("expected consensus, got {other:?}"),
        }
    }

    #[test]
    fn test_format_falls_back_to_config() {
        let args = OutputArgs::default();
        assert_eq!(args.format.unwrap_or(OutputConfig::default().format), OutputFormat::Text);
    }
}
