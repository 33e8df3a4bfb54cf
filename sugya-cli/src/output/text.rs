//! Plain text output formatter

use super::{OutputFormatter, SegmentRecord};
use anyhow::Result;
use std::io::Write;

/// Plain text formatter - outputs one segment per line
pub struct TextFormatter<W: Write> {
    writer: W,
}

impl<W: Write> TextFormatter<W> {
    /// Create a new text formatter
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write + Send> OutputFormatter for TextFormatter<W> {
    fn format_segment(&mut self, record: &SegmentRecord) -> Result<()> {
        writeln!(self.writer, "{}", record.text.trim())?;
        Ok(())
    }

    fn format_pair(&mut self, source: &SegmentRecord, target: &SegmentRecord) -> Result<()> {
        writeln!(self.writer, "{}\t{}", source.text.trim(), target.text.trim())?;
        Ok(())
    }

    fn annotate(&mut self, key: &str, value: &str) -> Result<()> {
        writeln!(self.writer, "# {key}: {value}")?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
