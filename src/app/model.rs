//! UI-side application model: cursor and display labels.

use crate::library::Track;

/// The main application model.
pub struct App {
    pub tracks: Vec<Track>,
    /// Cursor position in the track list.
    pub selected: usize,
    pub current_dir: Option<String>,
}

impl App {
    /// Create a new `App` with the provided list of `tracks`.
    pub fn new(tracks: Vec<Track>) -> Self {
        Self {
            tracks,
            selected: 0,
            current_dir: None,
        }
    }

    /// Record the scanned directory in the app state.
    pub fn set_current_dir(&mut self, dir: String) {
        self.current_dir = Some(dir);
    }

    /// Return true if the playlist contains any tracks.
    pub fn has_tracks(&self) -> bool {
        !self.tracks.is_empty()
    }

    /// Move the cursor down one row, stopping at the last track.
    pub fn select_next(&mut self) {
        if self.selected + 1 < self.tracks.len() {
            self.selected += 1;
        }
    }

    /// Move the cursor up one row, stopping at the first track.
    pub fn select_prev(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        }
    }

    pub fn select_first(&mut self) {
        self.selected = 0;
    }

    pub fn select_last(&mut self) {
        self.selected = self.tracks.len().saturating_sub(1);
    }

    /// Snap the cursor to `idx` when it is in range.
    pub fn set_selected(&mut self, idx: usize) {
        if idx < self.tracks.len() {
            self.selected = idx;
        }
    }
}
