use crate::config;
use crate::library::Track;
use crate::transport::{MediaSink, TransportController};

/// Apply configured playback defaults and hand the scanned playlist to the
/// transport. Leaves the first track loaded but paused.
pub fn apply_playback_defaults<S: MediaSink>(
    controller: &mut TransportController<S>,
    settings: &config::Settings,
    tracks: Vec<Track>,
) {
    controller.set_volume(settings.playback.initial_volume);
    controller.load_playlist(tracks);
}
