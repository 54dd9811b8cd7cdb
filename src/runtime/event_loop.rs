use std::sync::mpsc;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::App;
use crate::config;
use crate::mpris::{ControlCmd, MprisHandle};
use crate::runtime::PlaybackHandle;
use crate::runtime::mpris_sync::update_mpris;
use crate::transport::{MediaSink, TransportController, TransportPhase};
use crate::ui;

/// State tracked by the runtime event loop across iterations.
pub struct EventLoopState {
    /// Internal two-key prefix state used for `gg` handling.
    pub pending_gg: bool,
    /// Last-known phase as emitted to MPRIS.
    pub last_mpris_phase: TransportPhase,
    /// Last-known current index as emitted to MPRIS.
    pub last_mpris_index: Option<usize>,
    /// Last-known volume as emitted to MPRIS.
    pub last_mpris_volume: f32,
}

impl EventLoopState {
    pub fn new() -> Self {
        Self {
            pending_gg: false,
            last_mpris_phase: TransportPhase::Empty,
            last_mpris_index: None,
            last_mpris_volume: -1.0,
        }
    }
}

/// Main terminal event loop: input handling, UI drawing, progress ticks and
/// the MPRIS mirror. Returns `Ok(())` when shutdown is requested.
pub fn run<S: MediaSink>(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    app: &mut App,
    controller: &mut TransportController<S>,
    playback: &PlaybackHandle,
    mpris: &MprisHandle,
    control_rx: &mpsc::Receiver<ControlCmd>,
    state: &mut EventLoopState,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        // Periodic time-progress tick; also detects end-of-track.
        controller.tick();

        let snapshot = playback
            .lock()
            .map(|s| s.clone())
            .unwrap_or_default();

        // Keep MPRIS in sync even when changes come from auto-advance or
        // media keys rather than our own key handling.
        if snapshot.phase() != state.last_mpris_phase
            || snapshot.current != state.last_mpris_index
            || snapshot.volume != state.last_mpris_volume
        {
            update_mpris(mpris, app, &snapshot);
            state.last_mpris_phase = snapshot.phase();
            state.last_mpris_index = snapshot.current;
            state.last_mpris_volume = snapshot.volume;
        }

        terminal.draw(|f| ui::draw(f, app, &snapshot, &settings.ui, &settings.controls))?;

        while let Ok(cmd) = control_rx.try_recv() {
            if handle_control_cmd(cmd, app, controller) {
                return Ok(());
            }
        }

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if handle_key_event(key, settings, app, controller, state) {
                    break;
                }
            }
        }
    }

    Ok(())
}

/// Snap the cursor to the transport's current track after an index change.
fn follow_current<S: MediaSink>(app: &mut App, controller: &TransportController<S>) {
    if let Some(i) = controller.state().current {
        app.set_selected(i);
    }
}

/// Handle one external control command. Returns true on shutdown.
fn handle_control_cmd<S: MediaSink>(
    cmd: ControlCmd,
    app: &mut App,
    controller: &mut TransportController<S>,
) -> bool {
    match cmd {
        ControlCmd::Quit => return true,
        ControlCmd::Play => {
            if !controller.state().playing {
                controller.toggle_playing();
            }
        }
        ControlCmd::Pause => {
            if controller.state().playing {
                controller.toggle_playing();
            }
        }
        ControlCmd::PlayPause => {
            controller.toggle_playing();
        }
        ControlCmd::Stop => {
            // No dedicated stop operation: pause and rewind.
            if controller.state().playing {
                controller.toggle_playing();
            }
            controller.seek_to_fraction(0.0);
        }
        ControlCmd::Next => {
            controller.next();
            follow_current(app, controller);
        }
        ControlCmd::Prev => {
            controller.previous();
            follow_current(app, controller);
        }
        ControlCmd::SetVolume(v) => {
            // Hardware media keys and `playerctl volume` land here; the
            // controller clamps and mirrors it back to the UI indicator.
            controller.set_volume(v as f32);
        }
    }

    false
}

/// Handle one key press. Returns true on shutdown.
fn handle_key_event<S: MediaSink>(
    key: KeyEvent,
    settings: &config::Settings,
    app: &mut App,
    controller: &mut TransportController<S>,
    state: &mut EventLoopState,
) -> bool {
    match key.code {
        KeyCode::Char('q') => {
            state.pending_gg = false;
            return true;
        }
        KeyCode::Char('j') | KeyCode::Down => {
            state.pending_gg = false;
            app.select_next();
        }
        KeyCode::Char('k') | KeyCode::Up => {
            state.pending_gg = false;
            app.select_prev();
        }
        KeyCode::Char('g') => {
            if state.pending_gg {
                state.pending_gg = false;
                app.select_first();
            } else {
                state.pending_gg = true;
            }
        }
        KeyCode::Char('G') => {
            state.pending_gg = false;
            app.select_last();
        }
        KeyCode::Enter => {
            state.pending_gg = false;
            // Index-based dual path: a second press on the current track
            // toggles pause instead of restarting it from zero.
            if app.has_tracks() {
                controller.toggle_at(app.selected);
            }
        }
        KeyCode::Char('p') | KeyCode::Char(' ') => {
            state.pending_gg = false;
            controller.toggle_playing();
        }
        KeyCode::Char('l') => {
            state.pending_gg = false;
            controller.next();
            follow_current(app, controller);
        }
        KeyCode::Char('h') => {
            state.pending_gg = false;
            controller.previous();
            follow_current(app, controller);
        }
        KeyCode::Char('L') => {
            state.pending_gg = false;
            scrub(controller, settings.controls.scrub_seconds as i64);
        }
        KeyCode::Char('H') => {
            state.pending_gg = false;
            scrub(controller, -(settings.controls.scrub_seconds as i64));
        }
        KeyCode::Char(c @ '0'..='9') => {
            state.pending_gg = false;
            // Jump straight to a tenth of the track, seek-bar style.
            let digit = c.to_digit(10).unwrap_or(0);
            controller.seek_to_fraction(f64::from(digit) / 10.0);
        }
        KeyCode::Char('+') | KeyCode::Char('=') => {
            state.pending_gg = false;
            let v = controller.state().volume + settings.playback.volume_step;
            controller.set_volume(v);
        }
        KeyCode::Char('-') => {
            state.pending_gg = false;
            let v = controller.state().volume - settings.playback.volume_step;
            controller.set_volume(v);
        }
        KeyCode::Char('m') => {
            state.pending_gg = false;
            let muted = controller.state().volume > 0.0;
            controller.set_muted(muted);
        }
        KeyCode::Char(_) => {
            // g pending should clear on any other printable char.
            state.pending_gg = false;
        }
        _ => {}
    }

    false
}

/// Translate a relative scrub in seconds into a fractional seek.
fn scrub<S: MediaSink>(controller: &mut TransportController<S>, delta_secs: i64) {
    let snapshot = controller.state();
    let total = snapshot.duration.as_secs_f64();
    if total <= 0.0 {
        return;
    }
    let target = (snapshot.position.as_secs_f64() + delta_secs as f64).max(0.0);
    controller.seek_to_fraction(target / total);
}
