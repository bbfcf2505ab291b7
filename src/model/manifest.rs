//! Pre-rendered audio manifest.
//!
//! Maps each page image to the audio clips generated for its hotspots.
//! The `index` field correlates with a hotspot's positional index in the
//! hotspot collection for that image. The manifest is read-only to the
//! core and may be absent entirely; the playback resolver then skips
//! straight to its fallback stage.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// One generated clip for a hotspot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManifestEntry {
    /// Positional index of the hotspot within its page's list.
    pub index: usize,
    /// Recorded path of the generated clip, as written by the generator
    /// (separator style is not guaranteed).
    pub audio: String,
}

/// Mapping from page-image identifier to its generated clips.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AudioManifest {
    entries: HashMap<String, Vec<ManifestEntry>>,
}

impl AudioManifest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a manifest from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Look up the entry for a hotspot by page and positional index.
    pub fn entry_for(&self, image_id: &str, index: usize) -> Option<&ManifestEntry> {
        self.entries
            .get(image_id)?
            .iter()
            .find(|entry| entry.index == index)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
