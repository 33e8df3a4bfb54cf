//! JSON output formatter

use super::{OutputFormatter, SegmentRecord};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::Write;

/// JSON formatter - collects everything and writes one document on finish
pub struct JsonFormatter<W: Write> {
    writer: W,
    pretty: bool,
    document: JsonDocument,
}

/// Shape of the JSON output
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct JsonDocument {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub segments: Vec<SegmentRecord>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pairs: Vec<PairRecord>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, String>,
}

/// An aligned source/target pair
#[derive(Debug, Serialize, Deserialize)]
pub struct PairRecord {
    pub source: SegmentRecord,
    pub target: SegmentRecord,
}

impl<W: Write> JsonFormatter<W> {
    /// Create a new JSON formatter
    pub fn new(writer: W, pretty: bool) -> Self {
        Self {
            writer,
            pretty,
            document: JsonDocument::default(),
        }
    }
}

impl<W: Write + Send> OutputFormatter for JsonFormatter<W> {
    fn format_segment(&mut self, record: &SegmentRecord) -> Result<()> {
        self.document.segments.push(record.clone());
        Ok(())
    }

    fn format_pair(&mut self, source: &SegmentRecord, target: &SegmentRecord) -> Result<()> {
        self.document.pairs.push(PairRecord {
            source: source.clone(),
            target: target.clone(),
        });
        Ok(())
    }

    fn annotate(&mut self, key: &str, value: &str) -> Result<()> {
        self.document
            .metadata
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        if self.pretty {
            serde_json::to_writer_pretty(&mut self.writer, &self.document)?;
        } else {
            serde_json::to_writer(&mut self.writer, &self.document)?;
        }
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}
