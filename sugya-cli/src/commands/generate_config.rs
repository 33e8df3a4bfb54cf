//! Generate config command implementation

use anyhow::{Context, Result};
use clap::Args;
use std::fs;
use std::path::PathBuf;

/// Arguments for the generate-config command
#[derive(Debug, Args)]
pub struct GenerateConfigArgs {
    /// Output file path
    #[arg(short, long, value_name = "FILE", required = true)]
    pub output: PathBuf,
}

impl GenerateConfigArgs {
    /// Execute the generate-config command
    pub fn execute(&self) -> Result<()> {
        fs::write(&self.output, Self::template())
            .with_context(|| format!("Failed to write to {}", self.output.display()))?;

        println!("✓ Configuration written to {}", self.output.display());
        println!();
        println!("Use it with any command:");
        println!("   sugya -c {} split -i 'texts/*.txt'", self.output.display());

        Ok(())
    }

    /// Template content; every value equals the built-in default
    pub fn template() -> String {
        format!(
            r#"# sugya configuration
# Command-line flags override every value below.

[output]
# Format used when --format is not given: "text", "json" or "markdown"
format = "text"
# Indent JSON output
pretty_json = true

[consensus]
# Language of the texts: "hebrew" or "english"
language = "hebrew"
# Genre, forwarded to the oracle: "talmud", "biblical" or "commentary"
text_type = "talmud"
# Passes run when no explicit pass count is given
passes = {passes}
# "parallel" fans passes out over a thread pool, "sequential" runs them in order
execution_mode = "parallel"
# Worker threads for parallel mode; omit to use every core
# threads = 4
# Temperature hint per pass, cycled by pass index
pass_temperatures = [0.1, 0.3, 0.5]

[split]
# Splitter used when --script is not given: "hebrew" or "english"
script = "english"
# Strip HTML and footnotes before splitting
strip_markup = true
# Remove Hebrew vowel points and cantillation from split clauses
remove_nikud = false
# Worker threads for multi-file runs; omit to use every core
# threads = 4
"#,
            passes = sugya_engine::config::defaults::PASSES,
        )
    }
}
