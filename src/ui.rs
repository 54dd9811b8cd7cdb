//! UI rendering for the terminal interface.
//!
//! Pure view layer: it consumes the `App` model plus the latest transport
//! snapshot and never mutates either.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Modifier, Style},
    widgets::{Block, Borders, Gauge, List, ListItem, Padding, Paragraph, Wrap},
};

use crate::app::App;
use crate::config::{ControlsSettings, UiSettings};
use crate::transport::{PlaybackState, TransportPhase, format_duration_mmss};

/// Render the controls help text, incorporating scrub seconds.
fn controls_text(scrub_seconds: u64) -> String {
    let entries = [
        "[j/k] up/down".to_string(),
        "[enter] play selected".to_string(),
        "[space/p] play/pause".to_string(),
        "[h/l] prev/next".to_string(),
        format!("[H/L] scrub -/+{}s", scrub_seconds),
        "[0-9] seek".to_string(),
        "[-/+] volume".to_string(),
        "[m] mute".to_string(),
        "[gg/G] top/bottom".to_string(),
        "[q] quit".to_string(),
    ];
    entries.join(" | ")
}

/// Build the status line from the transport snapshot.
fn status_text(app: &App, snapshot: &PlaybackState) -> String {
    let mut parts: Vec<String> = Vec::new();

    match snapshot.phase() {
        TransportPhase::Empty => parts.push("No tracks loaded".to_string()),
        phase => {
            if let Some(track) = snapshot.current.and_then(|i| app.tracks.get(i)) {
                parts.push(format!("Song: {}", track.display));
            }
            parts.push(format!(
                "{} / {}",
                format_duration_mmss(snapshot.position),
                format_duration_mmss(snapshot.duration)
            ));
            parts.push(
                match phase {
                    TransportPhase::Playing => "Playing",
                    _ => "Paused",
                }
                .to_string(),
            );
        }
    }

    if snapshot.volume <= 0.0 {
        parts.push("Volume: muted".to_string());
    } else {
        parts.push(format!("Volume: {:.0}%", snapshot.volume * 100.0));
    }

    if let Some(dir) = &app.current_dir {
        parts.push(format!("Dir: {}", dir));
    }

    parts.join(" • ")
}

/// Render the entire UI into the provided `frame`.
pub fn draw(
    frame: &mut Frame,
    app: &App,
    snapshot: &PlaybackState,
    ui_settings: &UiSettings,
    controls_settings: &ControlsSettings,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(4),
        ])
        .split(frame.area());

    // Header
    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" attacca ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    // Status box
    let status = Paragraph::new(status_text(app, snapshot))
        .block(
            Block::bordered()
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                })
                .title(" status "),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(status, chunks[1]);

    // Seek bar
    let seek_label = format!(
        "{} / {}",
        format_duration_mmss(snapshot.position),
        format_duration_mmss(snapshot.duration)
    );
    let seek = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title(" position "))
        .ratio(snapshot.fraction())
        .label(seek_label);
    frame.render_widget(seek, chunks[2]);

    // Track list: cursor highlight plus a now-playing marker on the current
    // index.
    let items: Vec<ListItem> = app
        .tracks
        .iter()
        .enumerate()
        .map(|(i, track)| {
            let marker = if snapshot.current == Some(i) {
                if snapshot.playing { "▶ " } else { "⏸ " }
            } else {
                "  "
            };
            ListItem::new(format!("{marker}{}", track.display))
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(" tracks "))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    let mut list_state = ratatui::widgets::ListState::default();
    if app.has_tracks() {
        list_state.select(Some(app.selected));
    }
    frame.render_stateful_widget(list, chunks[3], &mut list_state);

    // Footer
    let footer = Paragraph::new(controls_text(controls_settings.scrub_seconds))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" controls ")
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                }),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, chunks[4]);
}
