//! readalong - paginated page-image viewer core with read-aloud hotspots.
//!
//! Hotspots are normalized rectangular regions drawn over page images;
//! clicking one plays a pre-rendered audio clip when a candidate resolves,
//! and falls back to speech synthesis of the region's text otherwise. An
//! authoring mode turns pointer gestures into new hotspots.

pub mod app;
pub mod assets;
pub mod constants;
pub mod format;
pub mod geometry;
pub mod model;
pub mod playback;
pub mod render;
pub mod state;

pub use app::{PointerEvent, TextPrompt, ViewerApp};
pub use format::{Document, FormatError, JsonFileSink, PersistSink};
pub use geometry::{PixelRect, SurfaceSize, UnitRect};
pub use model::{AudioManifest, DrawSession, Hotspot, HotspotStore};
pub use playback::{
    HotspotKey, PlaybackError, PlaybackResolver, Resolution, RodioOutput, SpeechSettings,
};
pub use render::Indicator;
pub use state::{Spread, ViewerState};
