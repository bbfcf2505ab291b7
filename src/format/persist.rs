//! Persistence sink for the hotspot document.
//!
//! The store is the in-memory source of truth; after every mutation the
//! application hands the full serialized document to a sink so state
//! survives a reload. Sink failures are logged, never surfaced: losing a
//! save must not interrupt authoring.

use std::path::PathBuf;

use crate::format::{Document, FormatError};

/// Receives the full current document after each store mutation.
pub trait PersistSink {
    /// Persist a snapshot of the document.
    fn persist(&mut self, document: &Document) -> Result<(), FormatError>;
}

/// File-backed sink writing pretty JSON to a fixed path.
#[derive(Debug, Clone)]
pub struct JsonFileSink {
    path: PathBuf,
}

impl JsonFileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl PersistSink for JsonFileSink {
    fn persist(&mut self, document: &Document) -> Result<(), FormatError> {
        document.save(&self.path)?;
        log::debug!("persisted document to {:?}", self.path);
        Ok(())
    }
}

/// Sink that drops every snapshot. Useful for read-only sessions.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl PersistSink for NullSink {
    fn persist(&mut self, _document: &Document) -> Result<(), FormatError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::PageEntry;
    use std::collections::HashMap;

    #[test]
    fn test_file_sink_round_trips_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hotspots.json");
        let mut sink = JsonFileSink::new(&path);

        let document = Document::new(vec![PageEntry::new("1.png")], HashMap::new());
        sink.persist(&document).unwrap();

        let loaded = Document::load(&path).unwrap();
        assert_eq!(loaded.pages, document.pages);
    }

    #[test]
    fn test_file_sink_error_is_reportable() {
        let mut sink = JsonFileSink::new("/nonexistent-dir/hotspots.json");
        let document = Document::default();
        assert!(sink.persist(&document).is_err());
    }
}
