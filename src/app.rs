//! Viewer application glue.
//!
//! `ViewerApp` owns the store, the draw session, the playback resolver,
//! and the view state, and wires them to the collaborators the embedding
//! shell provides: an audio output, an optional speech synthesizer, a
//! text prompt, and a persistence sink. Pointer events are routed to the
//! draw session while authoring mode is on, and to playback resolution
//! otherwise.

use crate::format::{Document, FormatError, PersistSink};
use crate::geometry::{PixelRect, SurfaceSize, UnitRect};
use crate::model::{AudioManifest, DrawSession, Hotspot, HotspotStore, PendingHotspot};
use crate::playback::{
    AudioOutput, HotspotKey, PlaybackError, PlaybackResolver, Resolution, SpeechSettings,
    SpeechSynthesizer,
};
use crate::render::{self, Indicator, ProjectionOptions};
use crate::state::{Spread, ViewerState};

/// Pointer events forwarded by the embedding shell, in surface pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down { x: f32, y: f32 },
    Moved { x: f32, y: f32 },
    Up,
}

/// Requests descriptive text for a freshly drawn rectangle.
///
/// `None` (cancelled) and empty strings both abort the commit; the drawn
/// rectangle is discarded as "user changed their mind".
pub trait TextPrompt {
    fn request_text(&mut self, rect: &UnitRect) -> Option<String>;
}

/// The viewer core, one instance per session.
pub struct ViewerApp {
    store: HotspotStore,
    draw: DrawSession,
    resolver: PlaybackResolver,
    view: ViewerState,
    manifest: AudioManifest,
    asset_root: String,
    audio: Box<dyn AudioOutput>,
    speech: Option<Box<dyn SpeechSynthesizer>>,
    prompt: Box<dyn TextPrompt>,
    sink: Box<dyn PersistSink>,
    needs_render: bool,
}

impl ViewerApp {
    pub fn new(
        asset_root: impl Into<String>,
        audio: Box<dyn AudioOutput>,
        prompt: Box<dyn TextPrompt>,
        sink: Box<dyn PersistSink>,
    ) -> Self {
        Self {
            store: HotspotStore::new(),
            draw: DrawSession::new(),
            resolver: PlaybackResolver::new(),
            view: ViewerState::default(),
            manifest: AudioManifest::new(),
            asset_root: asset_root.into(),
            audio,
            speech: None,
            prompt,
            sink,
            needs_render: true,
        }
    }

    /// Attach a speech synthesizer. Without one, clicks that exhaust all
    /// audio candidates report a capability error.
    pub fn with_speech(mut self, speech: Box<dyn SpeechSynthesizer>) -> Self {
        self.speech = Some(speech);
        self
    }

    // ------------------------------------------------------------------
    // Document and manifest boundaries
    // ------------------------------------------------------------------

    /// Install a loaded document: full replace of pages and hotspots.
    ///
    /// Loading does not re-persist, since the document just came from storage.
    pub fn load_document(&mut self, document: Document) {
        self.view.set_pages(document.pages);
        self.store.replace_all(document.hotspots);
        self.store.clear_dirty();
        self.needs_render = true;
    }

    /// Import a document from JSON (user-supplied file).
    ///
    /// Parse errors leave prior in-memory state untouched; a successful
    /// import replaces everything and is persisted immediately.
    pub fn import_document(&mut self, json: &str) -> Result<(), FormatError> {
        let document = Document::from_json(json)?;
        if !document.pages.is_empty() {
            self.view.set_pages(document.pages);
        }
        self.store.replace_all(document.hotspots);
        self.flush_store();
        self.needs_render = true;
        Ok(())
    }

    /// Read-only export snapshot of the current `{pages, hotspots}`.
    pub fn export_json(&self) -> Result<String, FormatError> {
        let document = Document::new(self.view.pages().to_vec(), self.store.collection().clone());
        document.to_json_pretty()
    }

    /// Install the audio manifest; absence simply skips the manifest
    /// stage of resolution.
    pub fn set_manifest(&mut self, manifest: AudioManifest) {
        self.manifest = manifest;
    }

    // ------------------------------------------------------------------
    // Rendering
    // ------------------------------------------------------------------

    /// Project a page's hotspots for the current surface.
    pub fn indicators(&self, image_id: &str, surface: SurfaceSize) -> Vec<Indicator> {
        render::project(
            &self.store,
            image_id,
            surface,
            ProjectionOptions {
                show_outlines: self.view.show_outlines(),
                authoring: self.view.authoring(),
            },
        )
    }

    /// Transient rectangle of an in-progress gesture, for visual feedback.
    pub fn draw_preview(&self) -> Option<PixelRect> {
        self.draw.preview()
    }

    /// The surface was resized; stored unit coordinates are re-projected
    /// on the next render pass.
    pub fn surface_resized(&mut self) {
        self.needs_render = true;
    }

    /// Whether the shell should re-render, clearing the flag.
    pub fn take_needs_render(&mut self) -> bool {
        std::mem::take(&mut self.needs_render)
    }

    // ------------------------------------------------------------------
    // Pointer routing
    // ------------------------------------------------------------------

    /// Route a pointer event on a page surface.
    ///
    /// Returns a resolution when the event was a click that reached the
    /// playback resolver.
    pub fn on_pointer(
        &mut self,
        image_id: &str,
        surface: SurfaceSize,
        event: PointerEvent,
    ) -> Result<Option<Resolution>, PlaybackError> {
        if self.view.authoring() {
            match event {
                PointerEvent::Down { x, y } => self.draw.begin(image_id, surface, x, y),
                PointerEvent::Moved { x, y } => self.draw.update(x, y),
                PointerEvent::Up => {
                    if let Some(pending) = self.draw.finish() {
                        self.commit_pending(pending);
                    }
                }
            }
            return Ok(None);
        }

        if let PointerEvent::Down { x, y } = event {
            let indicators = self.indicators(image_id, surface);
            if let Some(indicator) = render::hit_test(&indicators, x, y) {
                let key = indicator.key.clone();
                return self.click(&key.image_id, key.index).map(Some);
            }
        }
        Ok(None)
    }

    /// Resolve a click on a hotspot by page and positional index.
    pub fn click(&mut self, image_id: &str, index: usize) -> Result<Resolution, PlaybackError> {
        let Some(hotspot) = self.store.get(image_id).get(index).cloned() else {
            log::warn!("click on unknown hotspot {image_id}[{index}]");
            return Ok(Resolution::Silent);
        };
        let resolution = self.resolver.resolve(
            &hotspot,
            HotspotKey::new(image_id, index),
            &self.manifest,
            &self.asset_root,
            self.audio.as_mut(),
            self.speech.as_deref_mut(),
            &self.view.speech,
        )?;
        // Active-indicator styling changed either way.
        self.needs_render = true;
        Ok(resolution)
    }

    fn commit_pending(&mut self, pending: PendingHotspot) {
        let Some(text) = self.prompt.request_text(&pending.rect) else {
            log::debug!("hotspot commit cancelled");
            return;
        };
        if text.is_empty() {
            log::debug!("hotspot commit aborted: empty text");
            return;
        }
        let index = self
            .store
            .append(&pending.image_id, Hotspot::new(pending.rect, text));
        log::info!("committed hotspot {}[{index}]", pending.image_id);
        self.flush_store();
        self.needs_render = true;
    }

    // ------------------------------------------------------------------
    // Playback control
    // ------------------------------------------------------------------

    /// Stop any active playback. Safe when nothing is playing.
    pub fn stop_playback(&mut self) {
        self.resolver.stop();
        self.needs_render = true;
    }

    /// Whether this indicator's session is currently playing, for the
    /// "reading" visual state.
    pub fn is_reading(&self, key: &HotspotKey) -> bool {
        self.resolver.is_active(key)
    }

    /// Observe natural completion of the active session, unmarking its
    /// indicator. Call from the shell's idle loop.
    pub fn poll_playback(&mut self) -> Option<HotspotKey> {
        let finished = self.resolver.poll();
        if finished.is_some() {
            self.needs_render = true;
        }
        finished
    }

    // ------------------------------------------------------------------
    // View state
    // ------------------------------------------------------------------

    pub fn view(&self) -> &ViewerState {
        &self.view
    }

    pub fn current_spread(&self) -> Spread {
        self.view.current_spread()
    }

    /// Toggle authoring mode. Turning it off discards any gesture in
    /// progress so no transient rectangle is left dangling.
    pub fn toggle_authoring(&mut self) -> bool {
        let authoring = self.view.toggle_authoring();
        if !authoring {
            self.draw.cancel();
        }
        self.needs_render = true;
        authoring
    }

    pub fn set_show_outlines(&mut self, show: bool) {
        self.view.set_show_outlines(show);
        self.needs_render = true;
    }

    pub fn set_speech_settings(&mut self, settings: SpeechSettings) {
        self.view.speech = settings;
    }

    /// Step to the next spread, stopping playback on navigation.
    pub fn next_page(&mut self) -> bool {
        let moved = self.view.next_page();
        if moved {
            self.stop_playback();
        }
        moved
    }

    /// Step to the previous spread, stopping playback on navigation.
    pub fn prev_page(&mut self) -> bool {
        let moved = self.view.prev_page();
        if moved {
            self.stop_playback();
        }
        moved
    }

    // ------------------------------------------------------------------
    // Persistence
    // ------------------------------------------------------------------

    /// Hand the full current document to the persistence sink.
    ///
    /// Failures are logged and the store stays dirty so the next mutation
    /// retries; a lost save never interrupts the session.
    fn flush_store(&mut self) {
        if !self.store.is_dirty() {
            return;
        }
        let document = Document::new(self.view.pages().to_vec(), self.store.collection().clone());
        match self.sink.persist(&document) {
            Ok(()) => self.store.clear_dirty(),
            Err(err) => log::warn!("failed to persist hotspots: {err}"),
        }
    }
}
