//! Output formatting module

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use sugya_core::{Segment, WordSpan};

pub mod json;
pub mod markdown;
pub mod text;

pub use json::JsonFormatter;
pub use markdown::MarkdownFormatter;
pub use text::TextFormatter;

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Plain text with one segment per line
    #[default]
    Text,
    /// JSON document with offsets and metadata
    Json,
    /// Markdown numbered list
    Markdown,
}

/// One unit of output: a segment, a word, or a split clause
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentRecord {
    pub index: usize,
    pub text: String,
    /// Inclusive word range, when the record came from word indices
    #[serde(skip_serializing_if = "Option::is_none")]
    pub words: Option<(usize, usize)>,
    /// Byte offset into the input
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<usize>,
    /// Input file, for multi-file commands
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

impl SegmentRecord {
    /// A bare text record without positional data
    pub fn plain(index: usize, text: impl Into<String>) -> Self {
        Self {
            index,
            text: text.into(),
            words: None,
            offset: None,
            file: None,
        }
    }

    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }
}

impl From<&Segment> for SegmentRecord {
    fn from(segment: &Segment) -> Self {
        Self {
            index: segment.id,
            text: segment.text.clone(),
            words: Some((segment.word_start, segment.word_end)),
            offset: Some(segment.start),
            file: None,
        }
    }
}

impl From<&WordSpan> for SegmentRecord {
    fn from(word: &WordSpan) -> Self {
        Self {
            index: word.index,
            text: word.token.clone(),
            words: Some((word.index, word.index)),
            offset: Some(word.start),
            file: None,
        }
    }
}

/// Trait for output formatters
pub trait OutputFormatter: Send {
    /// Write a single segment
    fn format_segment(&mut self, record: &SegmentRecord) -> Result<()>;

    /// Write an aligned source/target pair
    fn format_pair(&mut self, source: &SegmentRecord, target: &SegmentRecord) -> Result<()>;

    /// Attach a key/value summary line (agreement level, counts, ...)
    fn annotate(&mut self, key: &str, value: &str) -> Result<()>;

    /// Finalize output (e.g., write the JSON document)
    fn finish(&mut self) -> Result<()>;
}

/// Build a formatter writing to `output`, or stdout when absent
pub fn create_formatter(
    format: OutputFormat,
    output: Option<&Path>,
    pretty_json: bool,
) -> Result<Box<dyn OutputFormatter>> {
    let writer: Box<dyn Write + Send> = match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            Box::new(BufWriter::new(file))
        }
        None => Box::new(io::stdout()),
    };

    Ok(match format {
        OutputFormat::Text => Box::new(TextFormatter::new(writer)),
        OutputFormat::Json => Box::new(JsonFormatter::new(writer, pretty_json)),
        OutputFormat::Markdown => Box::new(MarkdownFormatter::new(writer)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use sugya_core::{build_segments, tokenize, WordRange};

    #[test]
    fn test_record_from_segment() {
        let segments =
            build_segments("Abaye said: And", &[WordRange::new(0, 1), WordRange::new(2, 2)])
                .unwrap();
        let record = SegmentRecord::from(&segments[1]);
        assert_eq!(record.index, 2);
        assert_eq!(record.words, Some((2, 2)));
        assert_eq!(record.offset, Some(12));
        assert_eq!(record.text, "And");
    }

    #[test]
    fn test_record_from_word() {
        let words = tokenize("  וַיֹּאמֶר אֱלֹהִים");
        let record = SegmentRecord::from(&words[0]);
        assert_eq!(record.offset, Some(2));
        assert_eq!(record.words, Some((0, 0)));
    }

    #[test]
    fn test_create_formatter_writes_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("out.md");

        let mut formatter = create_formatter(OutputFormat::Markdown, Some(&path), true).unwrap();
        formatter
            .format_segment(&SegmentRecord::plain(0, "first"))
            .unwrap();
        formatter.finish().unwrap();
        drop(formatter);

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("1. first"));
    }
}
