//! Owned view state: current spread, authoring mode, outline visibility,
//! and the reader's speech settings.
//!
//! Everything here is an explicit state object held by the application;
//! there are no ambient globals to reach for.

use crate::format::PageEntry;
use crate::playback::SpeechSettings;

/// Which page images the current position displays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Spread {
    /// Nothing to show (empty document).
    Empty,
    /// The cover is shown alone.
    Cover(String),
    /// A left page with an optional right neighbour.
    Pair {
        left: String,
        right: Option<String>,
    },
}

/// Session-scoped view state.
#[derive(Debug, Clone, Default)]
pub struct ViewerState {
    pages: Vec<PageEntry>,
    current: usize,
    authoring: bool,
    show_outlines: bool,
    pub speech: SpeechSettings,
}

impl ViewerState {
    pub fn new(pages: Vec<PageEntry>) -> Self {
        Self {
            pages,
            ..Self::default()
        }
    }

    pub fn pages(&self) -> &[PageEntry] {
        &self.pages
    }

    /// Replace the page list (document load) and reset to the cover.
    pub fn set_pages(&mut self, pages: Vec<PageEntry>) {
        self.pages = pages;
        self.current = 0;
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    /// The spread at the current position: cover alone, then pairs.
    pub fn current_spread(&self) -> Spread {
        if self.pages.is_empty() {
            return Spread::Empty;
        }
        if self.current == 0 {
            return Spread::Cover(self.pages[0].image.clone());
        }
        Spread::Pair {
            left: self.pages[self.current].image.clone(),
            right: self.pages.get(self.current + 1).map(|p| p.image.clone()),
        }
    }

    /// Step backward one spread. Returns true if the position changed.
    pub fn prev_page(&mut self) -> bool {
        if self.current == 0 {
            return false;
        }
        self.current = if self.current == 1 {
            0
        } else {
            (self.current - 2).max(1)
        };
        true
    }

    /// Step forward one spread. Returns true if the position changed.
    pub fn next_page(&mut self) -> bool {
        if self.pages.is_empty() || self.current >= self.pages.len() - 1 {
            return false;
        }
        self.current = if self.current == 0 {
            1
        } else {
            (self.current + 2).min(self.pages.len() - 1)
        };
        true
    }

    /// Jump to a page index, clamped into range.
    pub fn go_to(&mut self, index: usize) {
        if self.pages.is_empty() {
            self.current = 0;
        } else {
            self.current = index.min(self.pages.len() - 1);
        }
    }

    pub fn authoring(&self) -> bool {
        self.authoring
    }

    /// Toggle authoring mode, returning the new value.
    pub fn toggle_authoring(&mut self) -> bool {
        self.authoring = !self.authoring;
        log::debug!("authoring mode: {}", self.authoring);
        self.authoring
    }

    pub fn show_outlines(&self) -> bool {
        self.show_outlines
    }

    pub fn set_show_outlines(&mut self, show: bool) {
        self.show_outlines = show;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pages(n: usize) -> Vec<PageEntry> {
        (1..=n).map(|i| PageEntry::new(format!("{i}.png"))).collect()
    }

    #[test]
    fn test_cover_shown_alone() {
        let state = ViewerState::new(pages(12));
        assert_eq!(state.current_spread(), Spread::Cover("1.png".to_string()));
    }

    #[test]
    fn test_spread_stepping_matches_reading_order() {
        let mut state = ViewerState::new(pages(12));
        assert!(state.next_page());
        assert_eq!(state.current_index(), 1);
        assert!(state.next_page());
        assert_eq!(state.current_index(), 3);
        assert!(state.prev_page());
        assert_eq!(state.current_index(), 1);
        assert!(state.prev_page());
        assert_eq!(state.current_index(), 0);
        assert!(!state.prev_page());
    }

    #[test]
    fn test_last_spread_may_lack_right_page() {
        let mut state = ViewerState::new(pages(4));
        state.go_to(3);
        assert_eq!(
            state.current_spread(),
            Spread::Pair {
                left: "4.png".to_string(),
                right: None,
            }
        );
        assert!(!state.next_page());
    }

    #[test]
    fn test_empty_document() {
        let mut state = ViewerState::new(Vec::new());
        assert_eq!(state.current_spread(), Spread::Empty);
        assert!(!state.next_page());
        assert!(!state.prev_page());
    }

    #[test]
    fn test_set_pages_resets_position() {
        let mut state = ViewerState::new(pages(12));
        state.go_to(5);
        state.set_pages(pages(3));
        assert_eq!(state.current_index(), 0);
    }
}
