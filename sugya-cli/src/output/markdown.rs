//! Markdown output formatter

use super::{OutputFormatter, SegmentRecord};
use anyhow::Result;
use std::io::Write;

/// Markdown formatter - outputs segments as a numbered list
pub struct MarkdownFormatter<W: Write> {
    writer: W,
    item_count: usize,
    notes: Vec<(String, String)>,
}

impl<W: Write> MarkdownFormatter<W> {
    /// Create a new markdown formatter
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            item_count: 0,
            notes: Vec::new(),
        }
    }
}

impl<W: Write + Send> OutputFormatter for MarkdownFormatter<W> {
    fn format_segment(&mut self, record: &SegmentRecord) -> Result<()> {
        self.item_count += 1;
        writeln!(self.writer, "{}. {}", self.item_count, record.text.trim())?;
        Ok(())
    }

    fn format_pair(&mut self, source: &SegmentRecord, target: &SegmentRecord) -> Result<()> {
        self.item_count += 1;
        writeln!(self.writer, "{}. {}", self.item_count, source.text.trim())?;
        writeln!(self.writer, "   - {}", target.text.trim())?;
        Ok(())
    }

    fn annotate(&mut self, key: &str, value: &str) -> Result<()> {
        self.notes.push((key.to_string(), value.to_string()));
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        writeln!(self.writer)?;
        writeln!(self.writer, "---")?;
        writeln!(self.writer, "*Total segments: {}*", self.item_count)?;
        for (key, value) in &self.notes {
            writeln!(self.writer, "*{key}: {value}*")?;
        }
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbered_list_with_footer() {
        let mut buffer = Vec::new();
        let mut formatter = MarkdownFormatter::new(&mut buffer);
        formatter
            .format_segment(&SegmentRecord::plain(0, "And God said, "))
            .unwrap();
        formatter
            .format_segment(&SegmentRecord::plain(1, "Let there be light."))
            .unwrap();
        formatter.annotate("passes_survived", "2").unwrap();
        formatter.finish().unwrap();

        let output = String::from_utf8(buffer).unwrap();
        assert!(output.starts_with("1. And God said,\n2. Let there be light.\n"));
        assert!(output.contains("*Total segments: 2*"));
        assert!(output.ends_with("*passes_survived: 2*\n"));
    }

    #[test]
    fn test_pairs_nest_target_under_source() {
        let mut buffer = Vec::new();
        let mut formatter = MarkdownFormatter::new(&mut buffer);
        formatter
            .format_pair(&SegmentRecord::plain(0, "א"), &SegmentRecord::plain(0, "a"))
            .unwrap();
        formatter.finish().unwrap();

        assert!(String::from_utf8(buffer).unwrap().starts_with("1. א\n   - a\n"));
    }
}
