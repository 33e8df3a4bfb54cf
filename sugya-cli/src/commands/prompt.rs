//! Prompt command implementation

use super::AppContext;
use crate::input::FileReader;
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;
use sugya_engine::prompt::{boundary_prompt, co_segmentation_prompt};
use sugya_engine::{Language, OracleRequest, TextType};

/// Arguments for the prompt command
#[derive(Debug, Args)]
pub struct PromptArgs {
    /// Source text file
    #[arg(short, long, value_name = "FILE")]
    pub source: PathBuf,

    /// Target text file; renders the co-segmentation prompt when given
    #[arg(short, long, value_name = "FILE")]
    pub target: Option<PathBuf>,

    /// Language of the source text (default: from configuration)
    #[arg(long, value_name = "LANG")]
    pub language: Option<Language>,

    /// Language of the target text
    #[arg(long, value_name = "LANG", default_value = "english")]
    pub target_language: Language,

    /// Genre of the source text (default: from configuration)
    #[arg(long, value_name = "TYPE")]
    pub text_type: Option<TextType>,
}

impl PromptArgs {
    pub fn execute(&self, ctx: &AppContext) -> Result<()> {
        let consensus = &ctx.config.consensus;
        let source = FileReader::read_passage(&self.source)?;
        let language = self.language.unwrap_or(consensus.language);

        let prompt = match &self.target {
            Some(target_path) => {
                let target = FileReader::read_passage(target_path)?;
                co_segmentation_prompt(&source, language, &target, self.target_language)
            }
            None => boundary_prompt(&OracleRequest {
                text: source,
                language,
                text_type: self.text_type.unwrap_or(consensus.text_type),
                pass_index: 0,
                temperature: consensus.temperature_for(0),
            }),
        };

        println!("{prompt}");
        Ok(())
    }
}
