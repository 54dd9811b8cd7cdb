//! Transport snapshot types shared with the UI and the MPRIS mirror.

use std::time::Duration;

/// Coarse lifecycle phase of the transport.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TransportPhase {
    /// No playlist loaded (or an empty one); every operation is a no-op.
    Empty,
    /// A track is loaded but not playing.
    Paused,
    /// A track is loaded and playing.
    Playing,
}

impl Default for TransportPhase {
    fn default() -> Self {
        Self::Empty
    }
}

/// Snapshot of the transport state, emitted to the listener after every
/// mutation.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackState {
    /// Index of the current track. `None` only when no playlist is loaded.
    pub current: Option<usize>,
    /// Whether playback is currently active.
    pub playing: bool,
    /// Playback volume in `[0.0, 1.0]`.
    pub volume: f32,
    /// Elapsed time within the current track.
    pub position: Duration,
    /// Total duration of the current track (zero when unknown).
    pub duration: Duration,
}

impl PlaybackState {
    pub fn phase(&self) -> TransportPhase {
        match (self.current, self.playing) {
            (None, _) => TransportPhase::Empty,
            (Some(_), true) => TransportPhase::Playing,
            (Some(_), false) => TransportPhase::Paused,
        }
    }

    /// Fractional position in `[0.0, 1.0]`, for the seek bar.
    pub fn fraction(&self) -> f64 {
        let total = self.duration.as_secs_f64();
        if total <= 0.0 {
            return 0.0;
        }
        (self.position.as_secs_f64() / total).clamp(0.0, 1.0)
    }
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self {
            current: None,
            playing: false,
            volume: 1.0,
            position: Duration::ZERO,
            duration: Duration::ZERO,
        }
    }
}
