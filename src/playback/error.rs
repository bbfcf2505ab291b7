//! Error types for playback resolution.

use thiserror::Error;

/// Errors that can occur while resolving or starting playback.
///
/// Individual candidate failures are recoverable and stay inside the
/// resolver; only capability problems reach the caller.
#[derive(Error, Debug)]
pub enum PlaybackError {
    /// The runtime has no speech synthesizer configured
    #[error("speech synthesis is not supported in this runtime")]
    SynthesisUnavailable,

    /// A candidate source could not be opened or started
    #[error("cannot play {source}: {message}")]
    Candidate {
        /// The candidate source path
        source: String,
        /// Backend-specific failure description
        message: String,
    },

    /// The synthesizer accepted the request but failed to speak
    #[error("speech synthesis failed: {0}")]
    Synthesis(String),
}

impl PlaybackError {
    /// Create a candidate failure from any displayable backend error.
    pub fn candidate(source: impl Into<String>, message: impl ToString) -> Self {
        Self::Candidate {
            source: source.into(),
            message: message.to_string(),
        }
    }
}
