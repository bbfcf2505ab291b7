//! Headless driver for the readalong viewer core.
//!
//! Loads a hotspot document and audio manifest from a folder, then takes
//! line commands on stdin to page through the document, click hotspots
//! (playing audio through rodio), and author new hotspots. Useful for
//! exercising a document without an embedding shell.

use std::io::{BufRead, Write as _};
use std::path::{Path, PathBuf};

use readalong::constants::{DEFAULT_ASSET_ROOT, DEFAULT_PAGE_COUNT, DOCUMENT_FILE, MANIFEST_FILE};
use readalong::geometry::SurfaceSize;
use readalong::model::AudioManifest;
use readalong::state::Spread;
use readalong::{
    assets, Document, JsonFileSink, PlaybackError, PointerEvent, RodioOutput, TextPrompt,
    UnitRect, ViewerApp,
};

/// Prompts for hotspot text on stdin.
struct StdinPrompt;

impl TextPrompt for StdinPrompt {
    fn request_text(&mut self, _rect: &UnitRect) -> Option<String> {
        print!("Enter passage text for this hotspot: ");
        let _ = std::io::stdout().flush();
        let mut line = String::new();
        match std::io::stdin().lock().read_line(&mut line) {
            Ok(_) => {
                let text = line.trim().to_string();
                if text.is_empty() { None } else { Some(text) }
            }
            Err(_) => None,
        }
    }
}

fn main() {
    env_logger::init();

    let folder = std::env::args().nth(1).unwrap_or_else(|| ".".to_string());
    let folder = PathBuf::from(folder);

    let document_path = folder.join(DOCUMENT_FILE);
    let document = match Document::load(&document_path) {
        Ok(document) => document,
        Err(err) => {
            log::warn!("no usable document at {document_path:?} ({err}); using numbered pages");
            Document::with_numbered_pages(DEFAULT_PAGE_COUNT)
        }
    };

    let manifest_path = folder.join(MANIFEST_FILE);
    let manifest = match std::fs::read_to_string(&manifest_path) {
        Ok(json) => AudioManifest::from_json(&json).unwrap_or_else(|err| {
            log::warn!("ignoring malformed manifest {manifest_path:?}: {err}");
            AudioManifest::new()
        }),
        Err(err) => {
            log::info!("no audio manifest at {manifest_path:?} ({err})");
            AudioManifest::new()
        }
    };

    let asset_root = if folder == Path::new(".") {
        DEFAULT_ASSET_ROOT.to_string()
    } else {
        format!("{}/{DEFAULT_ASSET_ROOT}", folder.display())
    };

    let mut app = ViewerApp::new(
        asset_root.clone(),
        Box::new(RodioOutput::new()),
        Box::new(StdinPrompt),
        Box::new(JsonFileSink::new(document_path)),
    );
    app.load_document(document);
    app.set_manifest(manifest);

    println!("readalong - {} pages loaded. Type 'help' for commands.", app.view().pages().len());
    print_spread(&app, &asset_root);
    app.take_needs_render();

    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let Ok(line) = line else { break };
        let mut words = line.split_whitespace();
        match words.next() {
            Some("help") => print_help(),
            Some("pages") => {
                for page in app.view().pages() {
                    println!("  {}", page.image);
                }
            }
            Some("next") => {
                app.next_page();
            }
            Some("prev") => {
                app.prev_page();
            }
            Some("edit") => {
                let on = app.toggle_authoring();
                println!("authoring mode {}", if on { "on" } else { "off" });
            }
            Some("outlines") => {
                let show = !app.view().show_outlines();
                app.set_show_outlines(show);
                println!("outlines {}", if show { "shown" } else { "hidden" });
            }
            Some("rate") => {
                if let Some(value) = words.next() {
                    let mut settings = app.view().speech.clone();
                    settings.rate = value.to_string();
                    app.set_speech_settings(settings);
                }
            }
            Some("pitch") => {
                if let Some(value) = words.next() {
                    let mut settings = app.view().speech.clone();
                    settings.pitch = value.to_string();
                    app.set_speech_settings(settings);
                }
            }
            Some("click") => {
                let page = words.next().map(str::to_string);
                let index = words.next().and_then(|w| w.parse::<usize>().ok());
                match (page, index) {
                    (Some(page), Some(index)) => match app.click(&page, index) {
                        Ok(resolution) => println!("-> {resolution:?}"),
                        Err(PlaybackError::SynthesisUnavailable) => {
                            println!("Speech synthesis not supported in this runtime.")
                        }
                        Err(err) => println!("playback error: {err}"),
                    },
                    _ => println!("usage: click <image> <index>"),
                }
            }
            Some("draw") => {
                let page = words.next().map(str::to_string);
                let coords: Vec<f32> = words.filter_map(|w| w.parse().ok()).collect();
                match (page, coords.as_slice()) {
                    (Some(page), [x0, y0, x1, y1]) => {
                        let surface = surface_for(&asset_root, &page);
                        let _ = app.on_pointer(&page, surface, PointerEvent::Down { x: *x0, y: *y0 });
                        let _ = app.on_pointer(&page, surface, PointerEvent::Moved { x: *x1, y: *y1 });
                        let _ = app.on_pointer(&page, surface, PointerEvent::Up);
                    }
                    _ => println!("usage: draw <image> <x0> <y0> <x1> <y1> (authoring mode only)"),
                }
            }
            Some("stop") => app.stop_playback(),
            Some("export") => match app.export_json() {
                Ok(json) => println!("{json}"),
                Err(err) => println!("export failed: {err}"),
            },
            Some("quit") | Some("exit") => break,
            Some(other) => println!("unknown command '{other}' (try 'help')"),
            None => {}
        }

        if let Some(key) = app.poll_playback() {
            println!("finished reading {}[{}]", key.image_id, key.index);
        }
        if app.take_needs_render() {
            print_spread(&app, &asset_root);
        }
    }

    app.stop_playback();
}

/// Pixel dimensions for a page image, from its header when readable.
fn surface_for(asset_root: &str, image_id: &str) -> SurfaceSize {
    let source = assets::resolve_page_source(asset_root, image_id);
    assets::page_dimensions(Path::new(&source))
        .map(|(w, h)| SurfaceSize::new(w as f32, h as f32))
        .unwrap_or_else(|| SurfaceSize::new(800.0, 600.0))
}

fn print_spread(app: &ViewerApp, asset_root: &str) {
    let images = match app.current_spread() {
        Spread::Empty => {
            println!("(no pages)");
            return;
        }
        Spread::Cover(image) => vec![image],
        Spread::Pair { left, right } => {
            let mut images = vec![left];
            images.extend(right);
            images
        }
    };

    let total = app.view().pages().len();
    println!("Page {} / {total}", app.view().current_index() + 1);
    for image in images {
        let surface = surface_for(asset_root, &image);
        let indicators = app.indicators(&image, surface);
        println!("  {image} ({}x{})", surface.width, surface.height);
        for indicator in indicators {
            let reading = if app.is_reading(&indicator.key) { " [reading]" } else { "" };
            println!(
                "    [{}] ({:.0},{:.0} {:.0}x{:.0}) {:?}{reading}",
                indicator.key.index,
                indicator.rect.x,
                indicator.rect.y,
                indicator.rect.w,
                indicator.rect.h,
                indicator.text,
            );
        }
    }
}

fn print_help() {
    println!("commands:");
    println!("  pages                      list page images");
    println!("  next / prev                page through spreads");
    println!("  click <image> <index>      play a hotspot");
    println!("  stop                       stop playback");
    println!("  edit                       toggle authoring mode");
    println!("  draw <image> x0 y0 x1 y1   draw a hotspot (authoring mode)");
    println!("  outlines                   toggle outline visibility");
    println!("  rate <v> / pitch <v>       speech settings");
    println!("  export                     print the current document");
    println!("  quit");
}
