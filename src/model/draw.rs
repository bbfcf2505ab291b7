//! Authoring gesture state machine.
//!
//! Tracks a single in-progress pointer gesture (down, move, up) while
//! authoring mode is on. On a successful finish the caller prompts for
//! descriptive text and commits the result to the hotspot store; the
//! session itself never touches the store.

use crate::constants::MIN_HOTSPOT_EXTENT;
use crate::geometry::{PixelRect, SurfaceSize, UnitRect, normalize_rect};

/// A finished gesture awaiting text and commit.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingHotspot {
    /// Page image the gesture was drawn on.
    pub image_id: String,
    /// Normalized geometry of the drawn rectangle.
    pub rect: UnitRect,
}

/// At most one draw session is live at a time; it is owned by the
/// application state rather than living in an ambient global.
#[derive(Debug, Clone, Default)]
pub enum DrawSession {
    /// No gesture active.
    #[default]
    Idle,
    /// Pointer is down and dragging.
    Drawing {
        image_id: String,
        surface: SurfaceSize,
        anchor: (f32, f32),
        current: (f32, f32),
    },
}

impl DrawSession {
    pub fn new() -> Self {
        Self::Idle
    }

    /// Check if a gesture is in progress.
    pub fn is_drawing(&self) -> bool {
        !matches!(self, DrawSession::Idle)
    }

    /// Start a gesture at a pointer-down position (surface pixel space).
    ///
    /// The caller routes pointer events here only while authoring mode is
    /// enabled. Starting while already drawing restarts the gesture.
    pub fn begin(&mut self, image_id: impl Into<String>, surface: SurfaceSize, x: f32, y: f32) {
        let anchor = surface.clamp_point(x, y);
        log::debug!("draw: begin at ({:.1}, {:.1})", anchor.0, anchor.1);
        *self = DrawSession::Drawing {
            image_id: image_id.into(),
            surface,
            anchor,
            current: anchor,
        };
    }

    /// Update the gesture with the latest pointer position.
    pub fn update(&mut self, x: f32, y: f32) {
        if let DrawSession::Drawing { surface, current, .. } = self {
            *current = surface.clamp_point(x, y);
        }
    }

    /// Transient preview rectangle for visual feedback, in pixels.
    pub fn preview(&self) -> Option<PixelRect> {
        match self {
            DrawSession::Idle => None,
            DrawSession::Drawing { anchor, current, .. } => Some(PixelRect::from_corners(
                anchor.0, anchor.1, current.0, current.1,
            )),
        }
    }

    /// Page the gesture belongs to, if one is active.
    pub fn image_id(&self) -> Option<&str> {
        match self {
            DrawSession::Idle => None,
            DrawSession::Drawing { image_id, .. } => Some(image_id),
        }
    }

    /// Finish the gesture on pointer-up, returning the normalized result.
    ///
    /// Rectangles below [`MIN_HOTSPOT_EXTENT`] in either normalized
    /// dimension are discarded silently (accidental clicks). Either way
    /// the session returns to idle.
    pub fn finish(&mut self) -> Option<PendingHotspot> {
        let session = std::mem::take(self);
        let DrawSession::Drawing { image_id, surface, anchor, current } = session else {
            return None;
        };

        let rect = normalize_rect(
            PixelRect::from_corners(anchor.0, anchor.1, current.0, current.1),
            surface,
        );

        if rect.w < MIN_HOTSPOT_EXTENT || rect.h < MIN_HOTSPOT_EXTENT {
            log::debug!("draw: discarded sub-minimum rect {:?}", rect);
            return None;
        }

        Some(PendingHotspot { image_id, rect })
    }

    /// Abandon the gesture, removing any transient rectangle.
    ///
    /// Must be called when authoring mode is toggled off mid-gesture so
    /// the preview is never left dangling.
    pub fn cancel(&mut self) {
        if self.is_drawing() {
            log::debug!("draw: cancelled mid-gesture");
        }
        *self = DrawSession::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 0.001;

    fn surface() -> SurfaceSize {
        SurfaceSize::new(800.0, 600.0)
    }

    #[test]
    fn test_idle_has_no_preview() {
        let session = DrawSession::new();
        assert!(!session.is_drawing());
        assert!(session.preview().is_none());
    }

    #[test]
    fn test_gesture_produces_normalized_rect() {
        let mut session = DrawSession::new();
        session.begin("1.png", surface(), 100.0, 100.0);
        session.update(300.0, 250.0);

        let pending = session.finish().expect("gesture should commit");
        assert_eq!(pending.image_id, "1.png");
        assert!((pending.rect.x - 0.125).abs() < EPSILON);
        assert!((pending.rect.y - 0.1667).abs() < EPSILON);
        assert!((pending.rect.w - 0.25).abs() < EPSILON);
        assert!((pending.rect.h - 0.25).abs() < EPSILON);
        assert!(!session.is_drawing());
    }

    #[test]
    fn test_reversed_drag_matches_forward_drag() {
        let mut forward = DrawSession::new();
        forward.begin("1.png", surface(), 100.0, 100.0);
        forward.update(300.0, 250.0);

        let mut reversed = DrawSession::new();
        reversed.begin("1.png", surface(), 300.0, 250.0);
        reversed.update(100.0, 100.0);

        assert_eq!(forward.finish(), reversed.finish());
    }

    #[test]
    fn test_tiny_rect_discarded() {
        let mut session = DrawSession::new();
        session.begin("1.png", surface(), 100.0, 100.0);
        session.update(103.0, 103.0);
        assert!(session.finish().is_none());
    }

    #[test]
    fn test_zero_area_click_discarded() {
        let mut session = DrawSession::new();
        session.begin("1.png", surface(), 100.0, 100.0);
        assert!(session.finish().is_none());
    }

    #[test]
    fn test_pointer_clamped_to_surface() {
        let mut session = DrawSession::new();
        session.begin("1.png", surface(), 700.0, 500.0);
        session.update(900.0, 700.0);

        let preview = session.preview().unwrap();
        assert_eq!(preview.x + preview.w, 800.0);
        assert_eq!(preview.y + preview.h, 600.0);
    }

    #[test]
    fn test_cancel_returns_to_idle() {
        let mut session = DrawSession::new();
        session.begin("1.png", surface(), 100.0, 100.0);
        session.cancel();
        assert!(!session.is_drawing());
        assert!(session.finish().is_none());
    }
}
