use std::time::{Duration, Instant};

use crate::config::PlaybackSettings;
use crate::library::Track;

use super::sink::MediaSink;
use super::state::PlaybackState;

type ChangeListener = Box<dyn FnMut(&PlaybackState)>;

/// The transport controller: one playlist, one current index, one media
/// handle.
///
/// All operations run on the caller's thread and complete before returning;
/// out-of-range requests and operations in the empty state are silent no-ops
/// rather than errors. Each mutation ends with exactly one listener
/// notification.
pub struct TransportController<S: MediaSink> {
    tracks: Vec<Track>,
    current: Option<usize>,
    playing: bool,
    volume: f32,
    // Elapsed bookkeeping: `accumulated` is play time banked up to the most
    // recent pause/seek, `started_at` marks the most recent resume.
    started_at: Option<Instant>,
    accumulated: Duration,
    unmute_volume: f32,
    sink: S,
    on_change: Option<ChangeListener>,
}

impl<S: MediaSink> TransportController<S> {
    pub fn new(sink: S, playback: PlaybackSettings) -> Self {
        Self {
            tracks: Vec::new(),
            current: None,
            playing: false,
            volume: 1.0,
            started_at: None,
            accumulated: Duration::ZERO,
            unmute_volume: playback.unmute_volume,
            sink,
            on_change: None,
        }
    }

    /// Register the listener notified after every state mutation.
    pub fn on_state_change(&mut self, listener: impl FnMut(&PlaybackState) + 'static) {
        self.on_change = Some(Box::new(listener));
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Current state snapshot.
    pub fn state(&self) -> PlaybackState {
        PlaybackState {
            current: self.current,
            playing: self.playing,
            volume: self.volume,
            position: self.position(),
            duration: self.duration(),
        }
    }

    fn duration(&self) -> Duration {
        self.current
            .and_then(|i| self.tracks.get(i))
            .and_then(|t| t.duration)
            .unwrap_or(Duration::ZERO)
    }

    fn position(&self) -> Duration {
        let raw = self.accumulated + self.started_at.map_or(Duration::ZERO, |st| st.elapsed());
        let total = self.duration();
        if total > Duration::ZERO { raw.min(total) } else { raw }
    }

    fn notify(&mut self) {
        let snapshot = self.state();
        if let Some(cb) = self.on_change.as_mut() {
            cb(&snapshot);
        }
    }

    /// Replace the playlist wholesale.
    ///
    /// Stops any active playback and leaves the first track (if any) loaded
    /// but paused. An empty list puts the transport in the empty state, where
    /// every other operation is a no-op.
    pub fn load_playlist(&mut self, tracks: Vec<Track>) {
        self.sink.stop();
        self.tracks = tracks;
        self.playing = false;
        self.started_at = None;
        self.accumulated = Duration::ZERO;
        if self.tracks.is_empty() {
            self.current = None;
        } else {
            self.current = Some(0);
            self.sink.load(&self.tracks[0], Duration::ZERO);
        }
        self.notify();
    }

    /// Load and start the track at `i`. Out-of-range indices are no-ops.
    pub fn play_index(&mut self, i: usize) {
        if i >= self.tracks.len() {
            return;
        }
        self.current = Some(i);
        self.accumulated = Duration::ZERO;
        self.started_at = Some(Instant::now());
        self.playing = true;
        self.sink.load(&self.tracks[i], Duration::ZERO);
        self.sink.play();
        self.notify();
    }

    /// Toggle playback for the track at `i`.
    ///
    /// When `i` is already the current track, this flips play/pause on the
    /// existing sink without reloading the source, so an already-playing
    /// track does not restart from zero. Any other in-range index behaves
    /// like [`play_index`](Self::play_index).
    pub fn toggle_at(&mut self, i: usize) {
        if self.current == Some(i) {
            self.toggle_playing();
        } else {
            self.play_index(i);
        }
    }

    /// Flip play/pause of the current track, if any.
    pub fn toggle_playing(&mut self) {
        if self.current.is_none() {
            return;
        }
        if self.playing {
            self.sink.pause();
            if let Some(st) = self.started_at.take() {
                self.accumulated += st.elapsed();
            }
            self.playing = false;
        } else {
            self.sink.play();
            self.started_at = Some(Instant::now());
            self.playing = true;
        }
        self.notify();
    }

    /// Advance to the next track. No-op at the end of the playlist.
    pub fn next(&mut self) {
        if let Some(i) = self.current {
            self.play_index(i + 1);
        }
    }

    /// Go back to the previous track. No-op at the start of the playlist.
    pub fn previous(&mut self) {
        match self.current {
            Some(i) if i > 0 => self.play_index(i - 1),
            _ => {}
        }
    }

    /// End-of-track policy: advance, or stop back at the first track when
    /// the last one finishes. The playlist does not wrap.
    pub fn on_track_ended(&mut self) {
        let Some(i) = self.current else {
            return;
        };
        if i + 1 < self.tracks.len() {
            self.play_index(i + 1);
        } else {
            self.current = Some(0);
            self.playing = false;
            self.started_at = None;
            self.accumulated = Duration::ZERO;
            self.sink.stop();
            self.sink.load(&self.tracks[0], Duration::ZERO);
            self.notify();
        }
    }

    /// Seek to a fractional position within the current track.
    ///
    /// The fraction is clamped to `[0.0, 1.0]`; non-finite input seeks to the
    /// start. No-op when empty or when the duration is unknown.
    pub fn seek_to_fraction(&mut self, fraction: f64) {
        let Some(i) = self.current else {
            return;
        };
        let total = self.duration();
        if total == Duration::ZERO {
            return;
        }

        let f = if fraction.is_finite() {
            fraction.clamp(0.0, 1.0)
        } else {
            0.0
        };
        let target = total.mul_f64(f);

        // Seeking reloads the source at the new offset, preserving the
        // play/pause state.
        self.sink.load(&self.tracks[i], target);
        if self.playing {
            self.sink.play();
            self.started_at = Some(Instant::now());
        } else {
            self.started_at = None;
        }
        self.accumulated = target;
        self.notify();
    }

    /// Set the playback volume, clamped to `[0.0, 1.0]`.
    ///
    /// Externally-driven volume changes (MPRIS `Volume` writes from media
    /// keys) arrive here too, so the mirrored state keeps any displayed
    /// volume indicator in sync.
    pub fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
        self.sink.set_volume(self.volume);
        self.notify();
    }

    /// Muting drops the volume to zero; unmuting restores the configured
    /// fixed `unmute_volume`, not the pre-mute level.
    pub fn set_muted(&mut self, muted: bool) {
        if muted {
            self.set_volume(0.0);
        } else {
            self.set_volume(self.unmute_volume);
        }
    }

    /// Periodic progress tick driven by the event loop.
    ///
    /// Refreshes the mirrored position while playing and routes sink
    /// exhaustion to [`on_track_ended`](Self::on_track_ended).
    pub fn tick(&mut self) {
        if !self.playing {
            return;
        }
        if self.sink.finished() {
            self.on_track_ended();
            return;
        }
        self.notify();
    }
}
