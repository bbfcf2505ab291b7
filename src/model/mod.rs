//! Core data model: hotspots, the authoring gesture, and the audio manifest.

mod draw;
mod hotspot;
mod manifest;

pub use draw::{DrawSession, PendingHotspot};
pub use hotspot::{Hotspot, HotspotCollection, HotspotStore};
pub use manifest::{AudioManifest, ManifestEntry};
