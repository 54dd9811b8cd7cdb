use std::path::Path;
use std::time::Duration;

use lofty::prelude::*;
use walkdir::WalkDir;

use crate::config::LibrarySettings;

use super::model::Track;
use super::parse::{make_display, parse_stem};

fn is_audio_file(path: &Path, settings: &LibrarySettings) -> bool {
    let exts: Vec<String> = settings
        .extensions
        .iter()
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|e| !e.is_empty())
        .collect();

    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            exts.iter().any(|e| e == &ext)
        })
        .unwrap_or(false)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

/// Scan `dir` into an ordered playlist.
///
/// Title and artist come from the file stem (see [`parse_stem`]); duration is
/// probed with `lofty` when the file is readable. A file whose name or tags
/// cannot be read still lands in the playlist with fallback metadata.
pub fn scan(dir: &Path, settings: &LibrarySettings) -> Vec<Track> {
    let mut tracks: Vec<Track> = Vec::new();

    let mut walker = WalkDir::new(dir).follow_links(settings.follow_links);

    // Non-recursive = only the root directory.
    let depth_cap = if settings.recursive {
        settings.max_depth
    } else {
        Some(1)
    };
    if let Some(d) = depth_cap {
        walker = walker.max_depth(d);
    }

    for entry in walker
        .into_iter()
        .filter_entry(|e| settings.include_hidden || e.depth() == 0 || !is_hidden(e.path()))
        .filter_map(Result::ok)
    {
        let path = entry.path();
        if !path.is_file()
            || !(settings.include_hidden || !is_hidden(path))
            || !is_audio_file(path, settings)
        {
            continue;
        }

        let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("");
        let parsed = parse_stem(stem, settings);

        let duration: Option<Duration> = lofty::read_from_path(path)
            .ok()
            .map(|tagged| tagged.properties().duration());

        let display = make_display(&parsed.title, parsed.artist.as_deref());

        tracks.push(Track {
            path: path.to_path_buf(),
            title: parsed.title,
            artist: parsed.artist,
            duration,
            display,
        });
    }

    tracks.sort_by(|a, b| a.display.to_lowercase().cmp(&b.display.to_lowercase()));
    tracks
}
