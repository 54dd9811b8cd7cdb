use std::env;
use std::path::Path;
use std::sync::mpsc;
use std::sync::{Arc, Mutex};

use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::App;
use crate::library::scan;
use crate::mpris::ControlCmd;
use crate::transport::{PlaybackState, RodioSink, TransportController};

mod event_loop;
mod mpris_sync;
mod settings;
mod startup;

/// Shared snapshot written by the transport's change listener and read by
/// the draw loop and the MPRIS mirror.
pub type PlaybackHandle = Arc<Mutex<PlaybackState>>;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let settings = settings::load_settings();

    let dir = env::args().nth(1).unwrap_or_else(|| {
        std::env::current_dir()
            .ok()
            .and_then(|p| p.to_str().map(|s| s.to_string()))
            .unwrap_or_else(|| "Music".to_string())
    });

    let tracks = scan(Path::new(&dir), &settings.library);
    let mut app = App::new(tracks.clone());
    app.set_current_dir(dir.clone());

    let mut controller = TransportController::new(RodioSink::new(), settings.playback.clone());

    // Mirror every state change into the shared snapshot.
    let playback: PlaybackHandle = Arc::new(Mutex::new(PlaybackState::default()));
    let playback_for_listener = playback.clone();
    controller.on_state_change(move |s| {
        if let Ok(mut snap) = playback_for_listener.lock() {
            *snap = s.clone();
        }
    });

    startup::apply_playback_defaults(&mut controller, &settings, tracks);

    let (control_tx, control_rx) = mpsc::channel::<ControlCmd>();
    let mpris = crate::mpris::spawn_mpris(control_tx.clone());

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result: Result<(), Box<dyn std::error::Error>> = (|| {
        let mut state = event_loop::EventLoopState::new();
        event_loop::run(
            &mut terminal,
            &settings,
            &mut app,
            &mut controller,
            &playback,
            &mpris,
            &control_rx,
            &mut state,
        )
    })();

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    run_result
}
