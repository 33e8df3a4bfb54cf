//! sugya command-line entry point

use clap::Parser;
use std::process::ExitCode;
use sugya_cli::{Cli, CliError};

fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            match e.downcast_ref::<CliError>() {
                Some(CliError::ValidationFailed(_)) => ExitCode::from(2),
                _ => ExitCode::FAILURE,
            }
        }
    }
}
