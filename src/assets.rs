//! Asset path conventions.
//!
//! Page images live under `<assetRoot>/pages/` and generated hotspot audio
//! under `<assetRoot>/hotspot_audio/`, keyed by `<imageBaseName>_<index>`.
//! Manifest-declared paths take precedence when present. Everything here is
//! best-effort string construction; whether a candidate actually resolves
//! is decided by attempting it, not by validating it.

use std::path::Path;

use crate::constants::{AUDIO_DIR, AUDIO_EXTENSION, PAGES_DIR};
use crate::model::ManifestEntry;

/// Resolve a page-image identifier to a displayable source path.
///
/// Bare filenames resolve under `<asset_root>/pages/`; absolute paths and
/// `data:` references are used verbatim; a legacy bare `pages/` prefix is
/// migrated under the asset root.
pub fn resolve_page_source(asset_root: &str, image_id: &str) -> String {
    if image_id.is_empty() || image_id.starts_with("data:") || image_id.starts_with('/') {
        return image_id.to_string();
    }
    if let Some(rest) = image_id.strip_prefix(&format!("{PAGES_DIR}/")) {
        return format!("{asset_root}/{PAGES_DIR}/{rest}");
    }
    if image_id.starts_with(&format!("{asset_root}/")) {
        return image_id.to_string();
    }
    if !image_id.contains('/') {
        return format!("{asset_root}/{PAGES_DIR}/{image_id}");
    }
    image_id.to_string()
}

/// The image identifier's file stem, tolerant of both slash styles.
///
/// Falls back to the whole identifier when stripping the extension leaves
/// nothing (hidden files, extension-only names).
pub fn image_base_name(image_id: &str) -> String {
    let file = image_id
        .rsplit('/')
        .next()
        .and_then(|s| s.rsplit('\\').next())
        .unwrap_or(image_id);
    let stem = match file.rfind('.') {
        Some(dot) => &file[..dot],
        None => file,
    };
    if stem.is_empty() {
        image_id.to_string()
    } else {
        stem.to_string()
    }
}

/// Ordered audio candidates for a hotspot with a manifest entry.
///
/// The conventional `<base>_<index>` locations are preferred over the
/// manifest's recorded path because that is where pre-generated clips
/// actually live; the recorded path (slash-normalized, then verbatim
/// filename) covers manifests produced elsewhere.
pub fn manifest_candidates(
    asset_root: &str,
    image_id: &str,
    index: usize,
    entry: &ManifestEntry,
) -> Vec<String> {
    let rel = entry.audio.replace('\\', "/");
    let base = image_base_name(image_id);
    let recorded_file = rel.rsplit('/').next().unwrap_or(&rel);
    vec![
        format!("{asset_root}/{AUDIO_DIR}/{base}_{index}.{AUDIO_EXTENSION}"),
        format!("{AUDIO_DIR}/{base}_{index}.{AUDIO_EXTENSION}"),
        format!("{asset_root}/{AUDIO_DIR}/{recorded_file}"),
        rel.clone(),
    ]
}

/// Conventional candidates attempted when no manifest entry exists (or all
/// of its candidates failed). Smaller set: just the two asset folders.
pub fn fallback_candidates(asset_root: &str, image_id: &str, index: usize) -> Vec<String> {
    let base = image_base_name(image_id);
    vec![
        format!("{asset_root}/{AUDIO_DIR}/{base}_{index}.{AUDIO_EXTENSION}"),
        format!("{AUDIO_DIR}/{base}_{index}.{AUDIO_EXTENSION}"),
    ]
}

/// Probe a page image's pixel dimensions from its header.
///
/// Non-fatal: a missing or unreadable image yields `None` and the caller
/// proceeds with a default surface.
pub fn page_dimensions(path: &Path) -> Option<(u32, u32)> {
    match image::image_dimensions(path) {
        Ok(dims) => Some(dims),
        Err(err) => {
            log::warn!("could not read dimensions of {:?}: {}", path, err);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_filename_resolves_under_pages() {
        assert_eq!(resolve_page_source("public", "1.png"), "public/pages/1.png");
    }

    #[test]
    fn test_absolute_and_data_refs_kept() {
        assert_eq!(resolve_page_source("public", "/srv/img/1.png"), "/srv/img/1.png");
        assert_eq!(
            resolve_page_source("public", "data:image/png;base64,AAAA"),
            "data:image/png;base64,AAAA"
        );
    }

    #[test]
    fn test_legacy_pages_prefix_migrated() {
        assert_eq!(resolve_page_source("public", "pages/1.png"), "public/pages/1.png");
        assert_eq!(
            resolve_page_source("public", "public/pages/1.png"),
            "public/pages/1.png"
        );
    }

    #[test]
    fn test_image_base_name_strips_extension() {
        assert_eq!(image_base_name("3.png"), "3");
        assert_eq!(image_base_name("public/pages/cover.v2.png"), "cover.v2");
        assert_eq!(image_base_name("pages\\7.png"), "7");
        // No usable stem: fall back to the identifier itself.
        assert_eq!(image_base_name(".png"), ".png");
    }

    #[test]
    fn test_manifest_candidate_order() {
        let entry = ManifestEntry {
            index: 2,
            audio: "generated\\3_2.wav".to_string(),
        };
        let candidates = manifest_candidates("public", "3.png", 2, &entry);
        assert_eq!(
            candidates,
            vec![
                "public/hotspot_audio/3_2.wav",
                "hotspot_audio/3_2.wav",
                "public/hotspot_audio/3_2.wav",
                "generated/3_2.wav",
            ]
        );
    }

    #[test]
    fn test_fallback_candidates() {
        let candidates = fallback_candidates("public", "5.png", 1);
        assert_eq!(
            candidates,
            vec!["public/hotspot_audio/5_1.wav", "hotspot_audio/5_1.wav"]
        );
    }
}
