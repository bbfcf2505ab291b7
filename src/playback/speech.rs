//! Speech synthesis seam.
//!
//! Synthesis is a runtime capability that may be absent entirely; the
//! resolver holds an `Option` of this seam and reports a capability error
//! when a click falls through every audio candidate with no synthesizer
//! configured.

use serde::{Deserialize, Serialize};

use crate::playback::PlaybackError;

/// Caller-configured synthesis parameters, kept as entered.
///
/// Rate and pitch are free-form strings (they arrive from user-facing
/// controls) and are clamped to 1.0 at request time when unparsable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeechSettings {
    #[serde(default = "default_level")]
    pub rate: String,

    #[serde(default = "default_level")]
    pub pitch: String,

    /// Identity of the preferred voice, if one was selected.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voice: Option<String>,
}

fn default_level() -> String {
    "1".to_string()
}

impl Default for SpeechSettings {
    fn default() -> Self {
        Self {
            rate: default_level(),
            pitch: default_level(),
            voice: None,
        }
    }
}

impl SpeechSettings {
    /// Build a synthesis request for the given text.
    pub fn request_for(&self, text: &str) -> SpeechRequest {
        SpeechRequest {
            text: text.to_string(),
            rate: parse_level(&self.rate),
            pitch: parse_level(&self.pitch),
            voice: self.voice.clone(),
        }
    }
}

/// Parse a rate/pitch control value, falling back to the neutral 1.0 for
/// anything unparsable, non-finite, or zero.
pub fn parse_level(raw: &str) -> f32 {
    raw.trim()
        .parse::<f32>()
        .ok()
        .filter(|v| v.is_finite() && *v != 0.0)
        .unwrap_or(1.0)
}

/// A fully resolved synthesis request.
#[derive(Debug, Clone, PartialEq)]
pub struct SpeechRequest {
    pub text: String,
    pub rate: f32,
    pub pitch: f32,
    pub voice: Option<String>,
}

/// An in-flight utterance.
pub trait SpeechHandle {
    /// Cancel the utterance.
    fn stop(&mut self);

    /// Whether the utterance ran to completion.
    fn is_finished(&self) -> bool;
}

/// Runtime speech capability.
pub trait SpeechSynthesizer {
    /// Speak the request. Fire-and-forget from the resolver's point of
    /// view; completion is observed through the returned handle.
    fn speak(&mut self, request: SpeechRequest) -> Result<Box<dyn SpeechHandle>, PlaybackError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level_accepts_numbers() {
        assert_eq!(parse_level("1.5"), 1.5);
        assert_eq!(parse_level(" 0.8 "), 0.8);
    }

    #[test]
    fn test_parse_level_clamps_garbage_to_one() {
        assert_eq!(parse_level(""), 1.0);
        assert_eq!(parse_level("fast"), 1.0);
        assert_eq!(parse_level("0"), 1.0);
        assert_eq!(parse_level("NaN"), 1.0);
    }

    #[test]
    fn test_request_carries_settings() {
        let settings = SpeechSettings {
            rate: "1.2".to_string(),
            pitch: "bad".to_string(),
            voice: Some("vi-VN-standard".to_string()),
        };
        let request = settings.request_for("intro passage");
        assert_eq!(request.rate, 1.2);
        assert_eq!(request.pitch, 1.0);
        assert_eq!(request.voice.as_deref(), Some("vi-VN-standard"));
        assert_eq!(request.text, "intro passage");
    }
}
