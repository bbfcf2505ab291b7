//! Hotspot document: the `{pages, hotspots}` structure that is fetched,
//! imported, exported, and persisted.
//!
//! A load or import is always a full replace of the in-memory state, and a
//! failed load leaves prior state untouched; the caller only swaps once a
//! document has parsed successfully.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::format::FormatError;
use crate::model::HotspotCollection;

/// A single page, referencing its image by identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageEntry {
    /// Page-image identifier (usually a bare filename like `1.png`).
    #[serde(rename = "img")]
    pub image: String,
}

impl PageEntry {
    pub fn new(image: impl Into<String>) -> Self {
        Self { image: image.into() }
    }
}

/// Document metadata (epoch-second timestamps).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified_at: Option<u64>,
}

impl DocumentMetadata {
    /// Create metadata stamped with the current time.
    pub fn new() -> Self {
        let now = current_timestamp();
        Self {
            created_at: Some(now),
            modified_at: Some(now),
        }
    }

    /// Update the modified timestamp.
    pub fn touch(&mut self) {
        self.modified_at = Some(current_timestamp());
    }
}

/// Seconds since the Unix epoch, via web-time for cross-platform builds.
fn current_timestamp() -> u64 {
    web_time::SystemTime::now()
        .duration_since(web_time::SystemTime::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

/// The complete hotspot document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Pages in display order.
    #[serde(default)]
    pub pages: Vec<PageEntry>,

    /// Hotspots keyed by page-image identifier.
    #[serde(default)]
    pub hotspots: HotspotCollection,

    /// Creation/modification stamps.
    #[serde(default, skip_serializing_if = "metadata_is_empty")]
    pub metadata: DocumentMetadata,
}

fn metadata_is_empty(metadata: &DocumentMetadata) -> bool {
    *metadata == DocumentMetadata::default()
}

impl Document {
    pub fn new(pages: Vec<PageEntry>, hotspots: HotspotCollection) -> Self {
        Self {
            pages,
            hotspots,
            metadata: DocumentMetadata::new(),
        }
    }

    /// Fallback document referencing images named `1.png..n.png`.
    pub fn with_numbered_pages(n: usize) -> Self {
        let pages = (1..=n).map(|i| PageEntry::new(format!("{i}.png"))).collect();
        Self {
            pages,
            hotspots: HashMap::new(),
            metadata: DocumentMetadata::default(),
        }
    }

    /// Parse a document from JSON.
    ///
    /// Accepts both the full `{pages, hotspots}` structure and a partial
    /// object carrying only one of the two (an exported hotspots-only
    /// file, or a pages-only listing). An object with neither field is
    /// rejected so a stray JSON file cannot silently wipe state.
    pub fn from_json(json: &str) -> Result<Self, FormatError> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        let has_pages = value.get("pages").map_or(false, |p| p.is_array());
        let has_hotspots = value.get("hotspots").is_some();
        if !has_pages && !has_hotspots {
            return Err(FormatError::unrecognized(
                "expected {pages: [...], hotspots: {...}} or an exported file",
            ));
        }
        Ok(serde_json::from_value(value)?)
    }

    /// Serialize for export: a pretty-printed, read-only snapshot.
    pub fn to_json_pretty(&self) -> Result<String, FormatError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load a document from a file.
    pub fn load(path: &Path) -> Result<Self, FormatError> {
        if !path.exists() {
            return Err(FormatError::DocumentNotFound {
                path: path.to_path_buf(),
            });
        }
        let json = std::fs::read_to_string(path)?;
        let document = Self::from_json(&json)?;
        log::info!(
            "loaded document from {:?}: {} pages, {} hotspot lists",
            path,
            document.pages.len(),
            document.hotspots.len()
        );
        Ok(document)
    }

    /// Write the document to a file.
    pub fn save(&self, path: &Path) -> Result<(), FormatError> {
        std::fs::write(path, self.to_json_pretty()?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Hotspot;
    use crate::geometry::UnitRect;

    #[test]
    fn test_numbered_fallback_pages() {
        let document = Document::with_numbered_pages(12);
        assert_eq!(document.pages.len(), 12);
        assert_eq!(document.pages[0].image, "1.png");
        assert_eq!(document.pages[11].image, "12.png");
        assert!(document.hotspots.is_empty());
    }

    #[test]
    fn test_full_document_round_trip() {
        let mut hotspots = HotspotCollection::new();
        hotspots.insert(
            "1.png".to_string(),
            vec![Hotspot::new(UnitRect::new(0.1, 0.2, 0.3, 0.4), "intro")],
        );
        let document = Document::new(vec![PageEntry::new("1.png")], hotspots);

        let json = document.to_json_pretty().unwrap();
        // Pages serialize with the historical "img" key.
        assert!(json.contains("\"img\": \"1.png\""));

        let parsed = Document::from_json(&json).unwrap();
        assert_eq!(parsed.pages, document.pages);
        assert_eq!(parsed.hotspots, document.hotspots);
    }

    #[test]
    fn test_hotspots_only_import_accepted() {
        let json = r#"{"hotspots": {"2.png": [{"x": 0.1, "y": 0.1, "w": 0.5, "h": 0.2, "text": "caption"}]}}"#;
        let document = Document::from_json(json).unwrap();
        assert!(document.pages.is_empty());
        assert_eq!(document.hotspots["2.png"][0].text, "caption");
    }

    #[test]
    fn test_unrecognized_document_rejected() {
        let err = Document::from_json(r#"{"bookmarks": []}"#).unwrap_err();
        assert!(matches!(err, FormatError::UnrecognizedDocument { .. }));
    }

    #[test]
    fn test_malformed_json_rejected() {
        assert!(Document::from_json("{not json").is_err());
    }
}
