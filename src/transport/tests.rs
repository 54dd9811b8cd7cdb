use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Duration;

use super::controller::TransportController;
use super::format::{format_duration_mmss, format_mmss};
use super::sink::MediaSink;
use super::state::{PlaybackState, TransportPhase};
use crate::config::PlaybackSettings;
use crate::library::Track;

#[derive(Debug, Clone, PartialEq)]
enum SinkCall {
    Load { title: String, start_at: Duration },
    Play,
    Pause,
    Stop,
    SetVolume(f32),
}

#[derive(Default)]
struct FakeSink {
    calls: Rc<RefCell<Vec<SinkCall>>>,
    finished: Rc<RefCell<bool>>,
}

impl MediaSink for FakeSink {
    fn load(&mut self, track: &Track, start_at: Duration) {
        self.calls.borrow_mut().push(SinkCall::Load {
            title: track.title.clone(),
            start_at,
        });
        *self.finished.borrow_mut() = false;
    }

    fn play(&mut self) {
        self.calls.borrow_mut().push(SinkCall::Play);
    }

    fn pause(&mut self) {
        self.calls.borrow_mut().push(SinkCall::Pause);
    }

    fn stop(&mut self) {
        self.calls.borrow_mut().push(SinkCall::Stop);
    }

    fn set_volume(&mut self, volume: f32) {
        self.calls.borrow_mut().push(SinkCall::SetVolume(volume));
    }

    fn finished(&self) -> bool {
        *self.finished.borrow()
    }
}

fn t(title: &str, secs: u64) -> Track {
    Track {
        path: PathBuf::from(format!("/tmp/{title}.mp3")),
        title: title.into(),
        artist: None,
        duration: Some(Duration::from_secs(secs)),
        display: title.into(),
    }
}

struct Harness {
    controller: TransportController<FakeSink>,
    calls: Rc<RefCell<Vec<SinkCall>>>,
    finished: Rc<RefCell<bool>>,
    notifications: Rc<RefCell<Vec<PlaybackState>>>,
}

impl Harness {
    fn new(tracks: Vec<Track>) -> Self {
        let sink = FakeSink::default();
        let calls = sink.calls.clone();
        let finished = sink.finished.clone();
        let mut controller = TransportController::new(sink, PlaybackSettings::default());

        let notifications: Rc<RefCell<Vec<PlaybackState>>> = Rc::new(RefCell::new(Vec::new()));
        let log = notifications.clone();
        controller.on_state_change(move |s| log.borrow_mut().push(s.clone()));

        controller.load_playlist(tracks);
        Self {
            controller,
            calls,
            finished,
            notifications,
        }
    }

    fn clear(&mut self) {
        self.calls.borrow_mut().clear();
        self.notifications.borrow_mut().clear();
    }
}

#[test]
fn load_playlist_loads_first_track_paused() {
    let h = Harness::new(vec![t("a", 10), t("b", 10)]);
    let state = h.controller.state();
    assert_eq!(state.current, Some(0));
    assert!(!state.playing);
    assert_eq!(state.phase(), TransportPhase::Paused);
    assert_eq!(
        *h.calls.borrow(),
        vec![
            SinkCall::Stop,
            SinkCall::Load {
                title: "a".into(),
                start_at: Duration::ZERO,
            },
        ]
    );
    assert_eq!(h.notifications.borrow().len(), 1);
}

#[test]
fn empty_playlist_enters_empty_state_and_all_ops_are_noops() {
    let mut h = Harness::new(Vec::new());
    assert_eq!(h.controller.state().phase(), TransportPhase::Empty);
    h.clear();

    h.controller.play_index(0);
    h.controller.toggle_at(0);
    h.controller.toggle_playing();
    h.controller.next();
    h.controller.previous();
    h.controller.on_track_ended();
    h.controller.seek_to_fraction(0.5);
    h.controller.tick();

    assert!(h.calls.borrow().is_empty());
    assert!(h.notifications.borrow().is_empty());
    assert_eq!(h.controller.state().current, None);
}

#[test]
fn play_index_out_of_range_leaves_state_unchanged() {
    let mut h = Harness::new(vec![t("a", 10), t("b", 10)]);
    let before = h.controller.state();
    h.clear();

    h.controller.play_index(2);
    h.controller.play_index(usize::MAX);

    assert_eq!(h.controller.state(), before);
    assert!(h.calls.borrow().is_empty());
    assert!(h.notifications.borrow().is_empty());
}

#[test]
fn toggle_at_current_index_flips_without_reloading() {
    let mut h = Harness::new(vec![t("a", 10)]);
    h.controller.play_index(0);
    h.clear();

    h.controller.toggle_at(0);
    assert!(!h.controller.state().playing);
    h.controller.toggle_at(0);
    assert!(h.controller.state().playing);

    // Flips only; never a reload.
    assert_eq!(*h.calls.borrow(), vec![SinkCall::Pause, SinkCall::Play]);
    assert_eq!(h.notifications.borrow().len(), 2);
}

#[test]
fn toggle_at_current_index_preserves_position() {
    let mut h = Harness::new(vec![t("a", 200)]);
    // Park the paused transport at 100s, then resume via toggle.
    h.controller.seek_to_fraction(0.5);
    h.controller.toggle_at(0);

    let state = h.controller.state();
    assert!(state.playing);
    assert!(state.position >= Duration::from_secs(100));
}

#[test]
fn toggle_at_other_index_restarts_from_zero() {
    let mut h = Harness::new(vec![t("a", 200), t("b", 200)]);
    h.controller.play_index(0);
    h.controller.seek_to_fraction(0.5);
    h.clear();

    h.controller.toggle_at(1);

    let state = h.controller.state();
    assert_eq!(state.current, Some(1));
    assert!(state.playing);
    assert!(state.position < Duration::from_secs(1));
    assert_eq!(
        h.calls.borrow().first(),
        Some(&SinkCall::Load {
            title: "b".into(),
            start_at: Duration::ZERO,
        })
    );
}

#[test]
fn next_at_last_index_is_a_noop() {
    let mut h = Harness::new(vec![t("a", 10), t("b", 10)]);
    h.controller.play_index(1);
    let before = h.controller.state();
    h.clear();

    h.controller.next();

    assert_eq!(h.controller.state().current, before.current);
    assert!(h.calls.borrow().is_empty());
    assert!(h.notifications.borrow().is_empty());
}

#[test]
fn previous_at_first_index_is_a_noop() {
    let mut h = Harness::new(vec![t("a", 10), t("b", 10)]);
    h.clear();

    h.controller.previous();

    assert_eq!(h.controller.state().current, Some(0));
    assert!(h.calls.borrow().is_empty());
}

#[test]
fn track_ended_at_last_index_resets_to_first_and_pauses() {
    let mut h = Harness::new(vec![t("a", 10), t("b", 10)]);
    h.controller.play_index(1);
    h.clear();

    h.controller.on_track_ended();

    let state = h.controller.state();
    assert_eq!(state.current, Some(0));
    assert!(!state.playing);
    assert_eq!(state.position, Duration::ZERO);
    // The first track is reloaded but not started.
    assert_eq!(
        *h.calls.borrow(),
        vec![
            SinkCall::Stop,
            SinkCall::Load {
                title: "a".into(),
                start_at: Duration::ZERO,
            },
        ]
    );
    assert_eq!(h.notifications.borrow().len(), 1);
}

#[test]
fn track_ended_before_last_index_advances() {
    let mut h = Harness::new(vec![t("a", 10), t("b", 10), t("c", 10)]);
    h.controller.play_index(0);
    h.controller.on_track_ended();

    let state = h.controller.state();
    assert_eq!(state.current, Some(1));
    assert!(state.playing);
}

#[test]
fn three_track_scenario_ends_paused_at_first() {
    let mut h = Harness::new(vec![t("a", 10), t("b", 10), t("c", 10)]);
    h.controller.next();
    h.controller.next();
    h.controller.on_track_ended();

    let state = h.controller.state();
    assert_eq!(state.current, Some(0));
    assert!(!state.playing);
}

#[test]
fn seek_to_half_of_200s_lands_at_100s() {
    let mut h = Harness::new(vec![t("a", 200)]);
    h.clear();

    h.controller.seek_to_fraction(0.5);

    let state = h.controller.state();
    assert_eq!(state.position, Duration::from_secs(100));
    assert!(!state.playing);
    assert_eq!(
        h.calls.borrow().last(),
        Some(&SinkCall::Load {
            title: "a".into(),
            start_at: Duration::from_secs(100),
        })
    );
    assert_eq!(h.notifications.borrow().len(), 1);
}

#[test]
fn seek_clamps_fraction_and_rejects_non_finite() {
    let mut h = Harness::new(vec![t("a", 100)]);

    h.controller.seek_to_fraction(2.0);
    assert_eq!(h.controller.state().position, Duration::from_secs(100));

    h.controller.seek_to_fraction(f64::NAN);
    assert_eq!(h.controller.state().position, Duration::ZERO);

    h.controller.seek_to_fraction(-1.0);
    assert_eq!(h.controller.state().position, Duration::ZERO);
}

#[test]
fn set_volume_clamps_and_notifies() {
    let mut h = Harness::new(vec![t("a", 10)]);
    h.clear();

    h.controller.set_volume(1.5);
    assert_eq!(h.controller.state().volume, 1.0);
    h.controller.set_volume(-0.5);
    assert_eq!(h.controller.state().volume, 0.0);

    assert_eq!(
        *h.calls.borrow(),
        vec![SinkCall::SetVolume(1.0), SinkCall::SetVolume(0.0)]
    );
    assert_eq!(h.notifications.borrow().len(), 2);
}

#[test]
fn unmute_restores_fixed_default_regardless_of_prior_volume() {
    let mut h = Harness::new(vec![t("a", 10)]);
    h.controller.set_volume(0.8);

    h.controller.set_muted(true);
    assert_eq!(h.controller.state().volume, 0.0);

    h.controller.set_muted(false);
    assert_eq!(h.controller.state().volume, 0.2);
}

#[test]
fn tick_routes_sink_exhaustion_to_track_ended() {
    let mut h = Harness::new(vec![t("a", 10), t("b", 10)]);
    h.controller.play_index(0);
    *h.finished.borrow_mut() = true;

    h.controller.tick();

    let state = h.controller.state();
    assert_eq!(state.current, Some(1));
    assert!(state.playing);
}

#[test]
fn tick_is_silent_while_paused() {
    let mut h = Harness::new(vec![t("a", 10)]);
    h.clear();

    h.controller.tick();

    assert!(h.notifications.borrow().is_empty());
}

#[test]
fn load_playlist_replaces_prior_list_atomically() {
    let mut h = Harness::new(vec![t("a", 10), t("b", 10)]);
    h.controller.play_index(1);
    h.clear();

    h.controller.load_playlist(vec![t("x", 10)]);

    let state = h.controller.state();
    assert_eq!(state.current, Some(0));
    assert!(!state.playing);
    assert_eq!(h.controller.tracks().len(), 1);
    assert_eq!(h.notifications.borrow().len(), 1);
}

#[test]
fn format_mmss_pads_and_guards_bad_input() {
    assert_eq!(format_mmss(65.0), "01:05");
    assert_eq!(format_mmss(0.0), "00:00");
    assert_eq!(format_mmss(600.0), "10:00");
    assert_eq!(format_mmss(-3.0), "00:00");
    assert_eq!(format_mmss(f64::NAN), "00:00");
    assert_eq!(format_mmss(f64::INFINITY), "00:00");
    assert_eq!(format_duration_mmss(Duration::from_secs(125)), "02:05");
}
