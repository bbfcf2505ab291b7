//! Hotspot data model and per-page storage.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::geometry::UnitRect;

/// Mapping from page-image identifier to its ordered hotspot list.
pub type HotspotCollection = HashMap<String, Vec<Hotspot>>;

/// A clickable region on one page image.
///
/// Coordinates are unit-square (0..1) relative to the displayed image box,
/// origin top-left. Identity is the positional index within the owning
/// page's list, so lists are append-only and never reordered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hotspot {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    /// Descriptive text, read aloud when no audio clip resolves.
    pub text: String,
}

impl Hotspot {
    /// Create a hotspot from a normalized rectangle and its text.
    pub fn new(rect: UnitRect, text: impl Into<String>) -> Self {
        Self {
            x: rect.x,
            y: rect.y,
            w: rect.w,
            h: rect.h,
            text: text.into(),
        }
    }

    /// The stored geometry as a unit rectangle.
    pub fn rect(&self) -> UnitRect {
        UnitRect::new(self.x, self.y, self.w, self.h)
    }
}

/// In-memory source of truth for all hotspots, keyed by page image.
///
/// Mutations mark the store dirty; the owning application flushes dirty
/// state to the persistence sink and clears the flag.
#[derive(Debug, Clone, Default)]
pub struct HotspotStore {
    hotspots: HotspotCollection,
    dirty: bool,
}

impl HotspotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hotspots for a page, in render order. Empty if none.
    pub fn get(&self, image_id: &str) -> &[Hotspot] {
        self.hotspots.get(image_id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Append a hotspot to a page's list and return its positional index.
    pub fn append(&mut self, image_id: &str, hotspot: Hotspot) -> usize {
        let list = self.hotspots.entry(image_id.to_string()).or_default();
        list.push(hotspot);
        self.dirty = true;
        list.len() - 1
    }

    /// Atomically swap the entire collection.
    ///
    /// Used for document load/import. Always a full replace, never a merge,
    /// so a previous document's entries cannot bleed into the new one.
    pub fn replace_all(&mut self, collection: HotspotCollection) {
        self.hotspots = collection;
        self.dirty = true;
    }

    /// The full collection, for serialization.
    pub fn collection(&self) -> &HotspotCollection {
        &self.hotspots
    }

    /// Total hotspot count across all pages.
    pub fn total(&self) -> usize {
        self.hotspots.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.hotspots.values().all(Vec::is_empty)
    }

    /// Check if the store has unpersisted changes.
    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Clear the dirty flag. Call after a successful persist.
    #[inline]
    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hotspot(text: &str) -> Hotspot {
        Hotspot::new(UnitRect::new(0.1, 0.1, 0.2, 0.2), text)
    }

    #[test]
    fn test_get_missing_page_is_empty() {
        let store = HotspotStore::new();
        assert!(store.get("1.png").is_empty());
    }

    #[test]
    fn test_append_assigns_positional_identity() {
        let mut store = HotspotStore::new();
        assert_eq!(store.append("1.png", hotspot("a")), 0);
        assert_eq!(store.append("1.png", hotspot("b")), 1);
        assert_eq!(store.append("2.png", hotspot("c")), 0);

        assert_eq!(store.get("1.png")[1].text, "b");
        assert_eq!(store.total(), 3);
        assert!(store.is_dirty());
    }

    #[test]
    fn test_replace_all_never_merges() {
        let mut store = HotspotStore::new();
        store.append("1.png", hotspot("old"));
        store.append("2.png", hotspot("stale"));

        let mut replacement = HotspotCollection::new();
        replacement.insert("1.png".to_string(), vec![hotspot("new")]);
        store.replace_all(replacement);

        assert_eq!(store.get("1.png").len(), 1);
        assert_eq!(store.get("1.png")[0].text, "new");
        // Entries from the previous document are gone entirely.
        assert!(store.get("2.png").is_empty());
    }

    #[test]
    fn test_dirty_flag_cleared_after_persist() {
        let mut store = HotspotStore::new();
        store.append("1.png", hotspot("a"));
        assert!(store.is_dirty());
        store.clear_dirty();
        assert!(!store.is_dirty());
    }
}
