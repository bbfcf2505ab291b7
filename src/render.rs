//! Render projection: maps stored unit geometry to pixel indicators for a
//! displayed page.
//!
//! Indicators are plain data. The embedding shell positions real widgets
//! from them. Outline visibility is cosmetic only; the clickable region
//! always matches the stored geometry, visible or not.

use crate::geometry::{PixelRect, SurfaceSize, to_pixel};
use crate::model::HotspotStore;
use crate::playback::HotspotKey;

/// A positioned, clickable hotspot indicator.
#[derive(Debug, Clone, PartialEq)]
pub struct Indicator {
    /// Identity used for playback resolution and active-state marking.
    pub key: HotspotKey,
    /// Position on the surface, recomputed from unit coordinates.
    pub rect: PixelRect,
    /// Descriptive text (tooltip / speech source).
    pub text: String,
    /// Whether the rectangle outline should be drawn.
    pub outline_visible: bool,
}

/// Flags governing projection.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProjectionOptions {
    /// Caller-configurable "show outlines" flag.
    pub show_outlines: bool,
    /// Authoring mode also reveals outlines so regions can be reviewed.
    pub authoring: bool,
}

/// Project a page's hotspots onto a surface.
///
/// Call again whenever the surface is resized: unit coordinates are the
/// source of truth, pixel rectangles are derived.
pub fn project(
    store: &HotspotStore,
    image_id: &str,
    surface: SurfaceSize,
    options: ProjectionOptions,
) -> Vec<Indicator> {
    let outline_visible = options.show_outlines || options.authoring;
    store
        .get(image_id)
        .iter()
        .enumerate()
        .map(|(index, hotspot)| Indicator {
            key: HotspotKey::new(image_id, index),
            rect: to_pixel(hotspot.rect(), surface),
            text: hotspot.text.clone(),
            outline_visible,
        })
        .collect()
}

/// Find the indicator under a pointer position, preferring the one drawn
/// last (topmost).
pub fn hit_test(indicators: &[Indicator], x: f32, y: f32) -> Option<&Indicator> {
    indicators.iter().rev().find(|ind| ind.rect.contains(x, y))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::UnitRect;
    use crate::model::Hotspot;

    fn store_with_two() -> HotspotStore {
        let mut store = HotspotStore::new();
        store.append("1.png", Hotspot::new(UnitRect::new(0.0, 0.0, 0.5, 0.5), "a"));
        store.append("1.png", Hotspot::new(UnitRect::new(0.25, 0.25, 0.5, 0.5), "b"));
        store
    }

    #[test]
    fn test_projection_scales_with_surface() {
        let store = store_with_two();
        let indicators = project(
            &store,
            "1.png",
            SurfaceSize::new(800.0, 600.0),
            ProjectionOptions::default(),
        );
        assert_eq!(indicators.len(), 2);
        assert_eq!(indicators[0].rect, PixelRect::new(0.0, 0.0, 400.0, 300.0));
        assert_eq!(indicators[1].key, HotspotKey::new("1.png", 1));

        // Resize: same store, different surface, proportional rects.
        let resized = project(
            &store,
            "1.png",
            SurfaceSize::new(400.0, 300.0),
            ProjectionOptions::default(),
        );
        assert_eq!(resized[0].rect, PixelRect::new(0.0, 0.0, 200.0, 150.0));
    }

    #[test]
    fn test_outlines_follow_flags_not_clickability() {
        let store = store_with_two();
        let surface = SurfaceSize::new(800.0, 600.0);

        let hidden = project(&store, "1.png", surface, ProjectionOptions::default());
        assert!(!hidden[0].outline_visible);

        let shown = project(
            &store,
            "1.png",
            surface,
            ProjectionOptions {
                show_outlines: true,
                authoring: false,
            },
        );
        assert!(shown[0].outline_visible);

        let authoring = project(
            &store,
            "1.png",
            surface,
            ProjectionOptions {
                show_outlines: false,
                authoring: true,
            },
        );
        assert!(authoring[0].outline_visible);

        // Geometry is identical in all three projections.
        assert_eq!(hidden[0].rect, shown[0].rect);
        assert_eq!(hidden[0].rect, authoring[0].rect);
    }

    #[test]
    fn test_hit_test_prefers_topmost() {
        let store = store_with_two();
        let indicators = project(
            &store,
            "1.png",
            SurfaceSize::new(100.0, 100.0),
            ProjectionOptions::default(),
        );
        // (30,30) lies inside both; the later indicator wins.
        let hit = hit_test(&indicators, 30.0, 30.0).unwrap();
        assert_eq!(hit.key.index, 1);
        // (10,10) lies only inside the first.
        let hit = hit_test(&indicators, 10.0, 10.0).unwrap();
        assert_eq!(hit.key.index, 0);
        assert!(hit_test(&indicators, 99.0, 5.0).is_none());
    }

    #[test]
    fn test_unknown_page_projects_nothing() {
        let store = store_with_two();
        let indicators = project(
            &store,
            "2.png",
            SurfaceSize::new(800.0, 600.0),
            ProjectionOptions::default(),
        );
        assert!(indicators.is_empty());
    }
}
