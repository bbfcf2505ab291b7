//! Playback resolution: the ordered audio/speech fallback pipeline and
//! the single active-session slot.

mod audio;
mod error;
mod resolver;
mod speech;

pub use audio::{AudioHandle, AudioOutput, RodioOutput};
pub use error::PlaybackError;
pub use resolver::{HotspotKey, PlaybackResolver, Resolution, SessionKind};
pub use speech::{
    SpeechHandle, SpeechRequest, SpeechSettings, SpeechSynthesizer, parse_level,
};
