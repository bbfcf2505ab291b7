//! Candidate resolution and the single active playback session.
//!
//! A click on a hotspot resolves, in order: toggle-to-stop, pre-rendered
//! audio from the manifest, conventional fallback audio paths, then speech
//! synthesis of the hotspot text. Candidate attempts are strictly
//! sequential, and at most one session is ever active: starting a new one
//! stops the previous one first, releasing its handle.

use crate::assets;
use crate::model::{AudioManifest, Hotspot};
use crate::playback::audio::{AudioHandle, AudioOutput};
use crate::playback::speech::{SpeechHandle, SpeechSettings, SpeechSynthesizer};
use crate::playback::PlaybackError;

/// Identity of a hotspot indicator: owning page plus positional index.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HotspotKey {
    pub image_id: String,
    pub index: usize,
}

impl HotspotKey {
    pub fn new(image_id: impl Into<String>, index: usize) -> Self {
        Self {
            image_id: image_id.into(),
            index,
        }
    }
}

/// What kind of output the active session produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionKind {
    Audio,
    Speech,
}

/// Outcome of one click's resolution.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// The click toggled an already-active session off.
    Stopped,
    /// A pre-rendered clip started; carries the winning source path.
    Audio { source: String },
    /// Speech synthesis of the hotspot text started.
    Speech,
    /// Every stage was exhausted; nothing is playing. Deliberately quiet.
    Silent,
}

enum SessionHandle {
    Audio(Box<dyn AudioHandle>),
    Speech(Box<dyn SpeechHandle>),
}

impl SessionHandle {
    fn start(&mut self) -> Result<(), PlaybackError> {
        match self {
            SessionHandle::Audio(handle) => handle.start(),
            SessionHandle::Speech(_) => Ok(()),
        }
    }

    fn stop(&mut self) {
        match self {
            SessionHandle::Audio(handle) => handle.stop(),
            SessionHandle::Speech(handle) => handle.stop(),
        }
    }

    fn is_finished(&self) -> bool {
        match self {
            SessionHandle::Audio(handle) => handle.is_finished(),
            SessionHandle::Speech(handle) => handle.is_finished(),
        }
    }
}

struct ActiveSession {
    key: HotspotKey,
    kind: SessionKind,
    /// Winning source path for audio sessions; used by the toggle check.
    source: Option<String>,
    /// Stamp guarding against stale asynchronous completions.
    generation: u64,
    handle: SessionHandle,
}

/// Owns the single active-playback slot. No other component touches it;
/// all writes go through resolve/stop/poll.
#[derive(Default)]
pub struct PlaybackResolver {
    active: Option<ActiveSession>,
    generation: u64,
}

impl PlaybackResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Key of the currently active session, if any.
    pub fn active_key(&self) -> Option<&HotspotKey> {
        self.active.as_ref().map(|session| &session.key)
    }

    /// Whether the given indicator's session is currently playing.
    pub fn is_active(&self, key: &HotspotKey) -> bool {
        self.active_key() == Some(key)
    }

    /// Generation stamp of the active session, for guarded completion
    /// reports from asynchronous callbacks.
    pub fn active_generation(&self) -> Option<u64> {
        self.active.as_ref().map(|session| session.generation)
    }

    /// Stop whatever is active. Idempotent; safe when nothing is playing.
    pub fn stop(&mut self) {
        if let Some(mut session) = self.active.take() {
            log::debug!("playback: stopping {:?} for {:?}", session.kind, session.key);
            session.handle.stop();
        }
    }

    /// Report a completion observed asynchronously. Only clears the
    /// session whose generation matches, so a completion from a session the
    /// user already stopped cannot resurrect playback state.
    ///
    /// Returns the key that finished, so the caller can unmark its
    /// indicator.
    pub fn notify_finished(&mut self, generation: u64) -> Option<HotspotKey> {
        match &self.active {
            Some(session) if session.generation == generation => {
                self.active.take().map(|session| session.key)
            }
            _ => {
                log::debug!("playback: ignoring stale completion (generation {generation})");
                None
            }
        }
    }

    /// Check the active handle for natural completion and clear it.
    pub fn poll(&mut self) -> Option<HotspotKey> {
        if self.active.as_ref().is_some_and(|s| s.handle.is_finished()) {
            self.active.take().map(|session| session.key)
        } else {
            None
        }
    }

    /// Resolve a click on a hotspot.
    ///
    /// `Err` is reserved for reported conditions (missing synthesis
    /// capability); every per-candidate failure is logged and absorbed.
    pub fn resolve(
        &mut self,
        hotspot: &Hotspot,
        key: HotspotKey,
        manifest: &AudioManifest,
        asset_root: &str,
        audio: &mut dyn AudioOutput,
        speech: Option<&mut (dyn SpeechSynthesizer + '_)>,
        settings: &SpeechSettings,
    ) -> Result<Resolution, PlaybackError> {
        let entry = manifest.entry_for(&key.image_id, key.index);
        let manifest_candidates = entry
            .map(|e| assets::manifest_candidates(asset_root, &key.image_id, key.index, e));
        let fallback_candidates =
            assets::fallback_candidates(asset_root, &key.image_id, key.index);

        // A second click on the indicator that owns the active session
        // means "stop". Audio sessions match by source membership in this
        // click's candidate set (exact string compare; manifest and
        // convention paths must agree in formatting for this to hold);
        // speech sessions match by indicator identity alone.
        if let Some(active) = &self.active {
            if active.key == key {
                let current_set = manifest_candidates
                    .as_deref()
                    .unwrap_or(&fallback_candidates);
                let toggles = match active.kind {
                    SessionKind::Audio => active
                        .source
                        .as_deref()
                        .is_some_and(|src| current_set.iter().any(|c| c == src)),
                    SessionKind::Speech => true,
                };
                if toggles {
                    log::debug!("playback: toggle stop for {:?}", key);
                    self.stop();
                    return Ok(Resolution::Stopped);
                }
            }
        }

        // Single-active invariant: whatever was playing stops before any
        // new attempt, including a same-indicator session the toggle
        // check did not recognize (it then restarts from candidate 1).
        self.stop();

        if let Some(candidates) = &manifest_candidates {
            if let Some(source) = self.try_candidates(&key, candidates, audio) {
                return Ok(Resolution::Audio { source });
            }
        }

        if let Some(source) = self.try_candidates(&key, &fallback_candidates, audio) {
            return Ok(Resolution::Audio { source });
        }

        let Some(synth) = speech else {
            return Err(PlaybackError::SynthesisUnavailable);
        };

        let request = settings.request_for(&hotspot.text);
        match synth.speak(request) {
            Ok(handle) => {
                self.generation += 1;
                log::info!("playback: speaking text for {:?}", key);
                self.active = Some(ActiveSession {
                    key,
                    kind: SessionKind::Speech,
                    source: None,
                    generation: self.generation,
                    handle: SessionHandle::Speech(handle),
                });
                Ok(Resolution::Speech)
            }
            Err(err) => {
                log::warn!("playback: synthesis failed for {:?}: {}", key, err);
                Ok(Resolution::Silent)
            }
        }
    }

    /// Attempt candidates strictly in order. Each one is opened, marked
    /// as the active session, then started; a failed start rolls the mark
    /// back before the next candidate is touched.
    fn try_candidates(
        &mut self,
        key: &HotspotKey,
        candidates: &[String],
        audio: &mut dyn AudioOutput,
    ) -> Option<String> {
        for source in candidates {
            let handle = match audio.open(source) {
                Ok(handle) => handle,
                Err(err) => {
                    log::warn!("playback: candidate {source} unavailable: {err}");
                    continue;
                }
            };

            self.generation += 1;
            self.active = Some(ActiveSession {
                key: key.clone(),
                kind: SessionKind::Audio,
                source: Some(source.clone()),
                generation: self.generation,
                handle: SessionHandle::Audio(handle),
            });

            let started = match self.active.as_mut() {
                Some(session) => session.handle.start(),
                None => Err(PlaybackError::candidate(source, "session cleared before start")),
            };

            match started {
                Ok(()) => {
                    log::info!("playback: started {source} for {:?}", key);
                    return Some(source.clone());
                }
                Err(err) => {
                    log::warn!("playback: candidate {source} failed to start: {err}");
                    self.active = None;
                }
            }
        }
        None
    }
}
