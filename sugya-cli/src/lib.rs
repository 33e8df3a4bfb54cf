//! Sugya CLI library
//!
//! This library provides the command-line interface for sugya: word-index
//! segmentation, oracle answer validation and recorded-pass consensus.

pub mod commands;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod progress;

pub use error::{CliError, CliResult};

use clap::Parser;
use commands::{AppContext, Commands};
use config::CliConfig;
use std::path::PathBuf;

/// Top-level command line
#[derive(Debug, Parser)]
#[command(name = "sugya", version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file
    #[arg(short, long, value_name = "FILE", env = "SUGYA_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Suppress progress output and warnings
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

impl Cli {
    /// Initialize logging, load configuration and run the command
    pub fn run(&self) -> CliResult<()> {
        self.init_logging();
        log::debug!("Arguments: {:?}", self);

        let ctx = AppContext {
            config: CliConfig::load(self.config.as_deref())?,
            quiet: self.quiet,
        };
        self.command.execute(&ctx)
    }

    /// Log filter for the given flags
    pub fn log_level(&self) -> &'static str {
        if self.quiet {
            return "error";
        }
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }

    fn init_logging(&self) {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(self.log_level()))
            .format_timestamp(None)
            .init();
    }
}
