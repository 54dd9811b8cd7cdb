//! Title/artist extraction from file names.
//!
//! Tracks carry their metadata in the file name itself:
//! `Some_Title - Some_Artist.mp3`, with a filename-safe placeholder standing
//! in for spaces. A stem that does not fit the pattern degrades to a
//! placeholder title; it never fails the scan.

use crate::config::LibrarySettings;

/// Display title used when a file stem yields nothing usable.
pub const UNKNOWN_TITLE: &str = "Unknown Song";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedName {
    pub title: String,
    pub artist: Option<String>,
}

/// Split a file stem into title and optional artist.
///
/// The placeholder is substituted with a space first, then the stem is split
/// once on the configured separator; the part before it is the title, the
/// part after it the artist.
pub fn parse_stem(stem: &str, settings: &LibrarySettings) -> ParsedName {
    let cleaned = if settings.space_placeholder.is_empty() {
        stem.to_string()
    } else {
        stem.replace(&settings.space_placeholder, " ")
    };

    let mut halves = cleaned.splitn(2, settings.title_artist_separator.as_str());
    let title = halves.next().map(str::trim).unwrap_or("");
    let artist = halves
        .next()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string);

    ParsedName {
        title: if title.is_empty() {
            UNKNOWN_TITLE.to_string()
        } else {
            title.to_string()
        },
        artist,
    }
}

/// Build a track's display string: `Artist - Title`, or just the title when
/// no artist is known.
pub fn make_display(title: &str, artist: Option<&str>) -> String {
    match artist {
        Some(a) if !a.trim().is_empty() => format!("{} - {}", a.trim(), title),
        _ => title.to_string(),
    }
}
