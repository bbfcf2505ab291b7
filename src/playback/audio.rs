//! Audio output seam and the rodio-backed implementation.
//!
//! The resolver never talks to an audio device directly: it asks an
//! [`AudioOutput`] to open a candidate source, marks the session active,
//! then starts the handle. Splitting open from start keeps the
//! optimistic-mark/attempt/rollback sequence explicit and lets tests
//! script failures at either step.

use std::fs::File;
use std::io::BufReader;

use crate::playback::PlaybackError;

/// A constructed clip that has not necessarily been started yet.
pub trait AudioHandle {
    /// Begin playback. Fallible so the caller can roll back its
    /// optimistic active mark and move on to the next candidate.
    fn start(&mut self) -> Result<(), PlaybackError>;

    /// Stop playback and release the underlying output.
    fn stop(&mut self);

    /// Whether playback ran to completion.
    fn is_finished(&self) -> bool;
}

/// Constructs playable handles from candidate source paths.
pub trait AudioOutput {
    /// Open a candidate. Failure is non-fatal to resolution; the caller
    /// logs it and tries the next candidate.
    fn open(&mut self, source: &str) -> Result<Box<dyn AudioHandle>, PlaybackError>;
}

/// rodio-backed output. Each clip gets its own stream and sink so that
/// dropping a handle releases the device immediately.
#[derive(Debug, Default)]
pub struct RodioOutput;

impl RodioOutput {
    pub fn new() -> Self {
        Self
    }
}

impl AudioOutput for RodioOutput {
    fn open(&mut self, source: &str) -> Result<Box<dyn AudioHandle>, PlaybackError> {
        let file = File::open(source).map_err(|e| PlaybackError::candidate(source, e))?;
        let decoder = rodio::Decoder::new(BufReader::new(file))
            .map_err(|e| PlaybackError::candidate(source, e))?;
        let (stream, handle) = rodio::OutputStream::try_default()
            .map_err(|e| PlaybackError::candidate(source, e))?;
        let sink = rodio::Sink::try_new(&handle).map_err(|e| PlaybackError::candidate(source, e))?;
        // Queue paused; playback begins on start().
        sink.pause();
        sink.append(decoder);
        Ok(Box::new(RodioHandle {
            _stream: stream,
            sink,
        }))
    }
}

struct RodioHandle {
    // Keeps the output device alive for the sink's lifetime.
    _stream: rodio::OutputStream,
    sink: rodio::Sink,
}

impl AudioHandle for RodioHandle {
    fn start(&mut self) -> Result<(), PlaybackError> {
        self.sink.play();
        Ok(())
    }

    fn stop(&mut self) {
        self.sink.stop();
    }

    fn is_finished(&self) -> bool {
        self.sink.empty()
    }
}
