//! File reading utilities

use crate::error::CliError;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Reads input passages as UTF-8
pub struct FileReader;

impl FileReader {
    /// Read a file as UTF-8 text
    pub fn read_text(path: &Path) -> Result<String> {
        if !path.exists() {
            return Err(CliError::FileNotFound(path.display().to_string()).into());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path.display()))?;

        log::debug!("read {} bytes from {}", content.len(), path.display());
        Ok(content)
    }

    /// Read a passage and drop a single trailing newline added by editors.
    ///
    /// Everything else, including leading whitespace and inner line breaks,
    /// is kept so that word offsets match what the oracle saw.
    pub fn read_passage(path: &Path) -> Result<String> {
        let mut text = Self::read_text(path)?;
        if text.ends_with("\r\n") {
            text.truncate(text.len() - 2);
        } else if text.ends_with('\n') {
            text.truncate(text.len() - 1);
        }
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_read_text_success() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("verse.txt");
        fs::write(&file_path, "וַיֹּאמֶר אֱלֹהִים\n").unwrap();

        assert_eq!(FileReader::read_text(&file_path).unwrap(), "וַיֹּאמֶר אֱלֹהִים\n");
        assert_eq!(FileReader::read_passage(&file_path).unwrap(), "וַיֹּאמֶר אֱלֹהִים");
    }

    #[test]
    fn test_read_passage_keeps_inner_whitespace() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("daf.txt");
        fs::write(&file_path, "  Abaye said:\nAnd\r\n").unwrap();

        assert_eq!(FileReader::read_passage(&file_path).unwrap(), "  Abaye said:\nAnd");
    }

    #[test]
    fn test_missing_file() {
        let err = FileReader::read_text(Path::new("/nonexistent/daf.txt")).unwrap_err();
        assert!(err.to_string().contains("File not found"));
    }
}
