//! Global constants for the readalong viewer core.

/// Minimum normalized width/height for a committed hotspot.
///
/// Drawn rectangles below this extent are treated as accidental clicks
/// and discarded without an error.
pub const MIN_HOTSPOT_EXTENT: f32 = 0.01;

/// File extension used for pre-rendered hotspot audio clips.
pub const AUDIO_EXTENSION: &str = "wav";

/// Folder (under the asset root) holding page images.
pub const PAGES_DIR: &str = "pages";

/// Folder (under the asset root) holding pre-rendered hotspot audio.
pub const AUDIO_DIR: &str = "hotspot_audio";

/// Default asset root folder.
pub const DEFAULT_ASSET_ROOT: &str = "public";

/// Number of numbered fallback pages when no document is available.
pub const DEFAULT_PAGE_COUNT: usize = 12;

/// File name of the hotspot document next to the asset root.
pub const DOCUMENT_FILE: &str = "hotspots.json";

/// File name of the audio manifest next to the asset root.
pub const MANIFEST_FILE: &str = "hotspot_audio_manifest.json";
