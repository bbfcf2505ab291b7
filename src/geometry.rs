//! Coordinate normalization between surface pixels and the unit square.
//!
//! Hotspots are stored in resolution-independent unit coordinates (0..1
//! relative to the displayed image box) so the same document renders
//! correctly at any viewport size or zoom. This module contains the pure
//! conversion math, extracted for testability.

use serde::{Deserialize, Serialize};

/// Pixel dimensions of a display surface (the displayed image box).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceSize {
    pub width: f32,
    pub height: f32,
}

impl SurfaceSize {
    /// Create a new surface size.
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Clamp a pixel point to the surface bounds.
    pub fn clamp_point(&self, x: f32, y: f32) -> (f32, f32) {
        (x.clamp(0.0, self.width.max(0.0)), y.clamp(0.0, self.height.max(0.0)))
    }
}

/// An axis-aligned rectangle in surface pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PixelRect {
    /// Top-left corner X coordinate
    pub x: f32,
    /// Top-left corner Y coordinate
    pub y: f32,
    /// Width of the rectangle
    pub w: f32,
    /// Height of the rectangle
    pub h: f32,
}

impl PixelRect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Create a rectangle from two corner points.
    pub fn from_corners(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self {
            x: x1.min(x2),
            y: y1.min(y2),
            w: (x1 - x2).abs(),
            h: (y1 - y2).abs(),
        }
    }

    /// Check if a pixel point is inside the rectangle.
    pub fn contains(&self, px: f32, py: f32) -> bool {
        px >= self.x && px <= self.x + self.w && py >= self.y && py <= self.y + self.h
    }
}

/// An axis-aligned rectangle in unit-square coordinates, origin top-left.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct UnitRect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl UnitRect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }
}

/// Convert a pixel point to unit coordinates, clamping to the surface
/// bounds before dividing. Always succeeds; degenerate surfaces map to 0.
pub fn to_unit(px: f32, py: f32, surface: SurfaceSize) -> (f32, f32) {
    let (cx, cy) = surface.clamp_point(px, py);
    let x = if surface.width > 0.0 { cx / surface.width } else { 0.0 };
    let y = if surface.height > 0.0 { cy / surface.height } else { 0.0 };
    (x, y)
}

/// Normalize a pixel rectangle against the surface dimensions.
pub fn normalize_rect(rect: PixelRect, surface: SurfaceSize) -> UnitRect {
    let (x, y) = to_unit(rect.x, rect.y, surface);
    let w = if surface.width > 0.0 { rect.w / surface.width } else { 0.0 };
    let h = if surface.height > 0.0 { rect.h / surface.height } else { 0.0 };
    UnitRect::new(x, y, w, h)
}

/// Map a stored unit rectangle back to surface pixels.
pub fn to_pixel(rect: UnitRect, surface: SurfaceSize) -> PixelRect {
    PixelRect::new(
        rect.x * surface.width,
        rect.y * surface.height,
        rect.w * surface.width,
        rect.h * surface.height,
    )
}
