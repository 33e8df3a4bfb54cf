//! Split command implementation

use super::{AppContext, OutputArgs};
use crate::config::SplitConfig;
use crate::error::CliError;
use crate::input::{resolve_patterns, FileReader};
use crate::output::SegmentRecord;
use crate::progress::ProgressReporter;
use anyhow::Result;
use clap::Args;
use rayon::prelude::*;
use std::path::Path;
use sugya_core::{remove_nikud, strip_markup_and_footnotes, Script};

/// Arguments for the split command
#[derive(Debug, Default, Args)]
pub struct SplitArgs {
    /// Input files or patterns (supports glob)
    #[arg(short, long, value_name = "FILE/PATTERN", required = true)]
    pub input: Vec<String>,

    /// Splitter to use: hebrew (cantillation) or english (punctuation)
    #[arg(long, value_name = "SCRIPT")]
    pub script: Option<Script>,

    /// Keep markup and footnotes instead of stripping them first
    #[arg(long)]
    pub raw: bool,

    /// Remove vowel points and cantillation from Hebrew output
    #[arg(long)]
    pub remove_nikud: bool,

    /// Number of worker threads (default: all cores)
    #[arg(long, value_name = "COUNT")]
    pub threads: Option<usize>,

    #[command(flatten)]
    pub output: OutputArgs,
}

/// Effective splitting options after merging arguments and configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SplitOptions {
    script: Script,
    strip_markup: bool,
    remove_nikud: bool,
}

impl SplitOptions {
    fn split(&self, text: &str) -> Vec<String> {
        let text = if self.strip_markup {
            strip_markup_and_footnotes(text)
        } else {
            text.to_string()
        };

        let clauses = self.script.split(&text);
        if self.remove_nikud && self.script == Script::Hebrew {
            clauses
                .iter()
                .map(|clause| remove_nikud(clause))
                .filter(|clause| !clause.trim().is_empty())
                .collect()
        } else {
            clauses
        }
    }
}

impl SplitArgs {
    pub fn execute(&self, ctx: &AppContext) -> Result<()> {
        let options = self.options(&ctx.config.split);
        let threads = self.threads.or(ctx.config.split.threads);
        if threads == Some(0) {
            return Err(CliError::InvalidArgument("--threads must be greater than 0".into()).into());
        }

        let files = resolve_patterns(&self.input)?;
        log::info!("splitting {} file(s) as {}", files.len(), options.script);

        let mut progress = ProgressReporter::new(ctx.quiet);
        progress.init_files(files.len() as u64);

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads.unwrap_or_else(num_cpus::get).min(files.len().max(1)))
            .thread_name(|i| format!("sugya-split-{i}"))
            .build()
            .map_err(|e| CliError::InvalidArgument(format!("thread pool: {e}")))?;

        let results: Vec<Result<Vec<String>>> = pool.install(|| {
            files
                .par_iter()
                .map(|path| {
                    let clauses = split_file(path, &options);
                    progress.file_completed(&file_name(path));
                    clauses
                })
                .collect()
        });
        progress.finish();

        let mut formatter = self.output.formatter(&ctx.config.output)?;
        let mut total = 0;
        for (path, clauses) in files.iter().zip(results) {
            for clause in clauses? {
                total += 1;
                let mut record = SegmentRecord::plain(total, clause);
                if files.len() > 1 {
                    record = record.with_file(path.display().to_string());
                }
                formatter.format_segment(&record)?;
            }
        }
        formatter.annotate("clauses", &total.to_string())?;
        formatter.finish()
    }

    fn options(&self, config: &SplitConfig) -> SplitOptions {
        SplitOptions {
            script: self.script.unwrap_or(config.script),
            strip_markup: !self.raw && config.strip_markup,
            remove_nikud: self.remove_nikud || config.remove_nikud,
        }
    }
}

fn split_file(path: &Path, options: &SplitOptions) -> Result<Vec<String>> {
    let text = FileReader::read_text(path)?;
    let clauses = options.split(&text);
    log::debug!("{}: {} clauses", path.display(), clauses.len());
    Ok(clauses)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
