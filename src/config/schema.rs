use serde::Deserialize;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/attacca/config.toml` or `~/.config/attacca/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `ATTACCA__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub playback: PlaybackSettings,
    pub controls: ControlsSettings,
    pub library: LibrarySettings,
    pub ui: UiSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            playback: PlaybackSettings::default(),
            controls: ControlsSettings::default(),
            library: LibrarySettings::default(),
            ui: UiSettings::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlaybackSettings {
    /// Volume applied at startup.
    pub initial_volume: f32,
    /// Volume restored by unmute. Unmuting does not remember the pre-mute
    /// level; it always lands here.
    pub unmute_volume: f32,
    /// Step applied by the volume-up/volume-down keys.
    pub volume_step: f32,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            initial_volume: 1.0,
            unmute_volume: 0.2,
            volume_step: 0.05,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ControlsSettings {
    /// Number of seconds to scrub when pressing `H` / `L`.
    pub scrub_seconds: u64,
}

impl Default for ControlsSettings {
    fn default() -> Self {
        Self { scrub_seconds: 5 }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LibrarySettings {
    /// File extensions to treat as audio (case-insensitive, without dot).
    pub extensions: Vec<String>,
    /// Whether to follow symlinks during scanning.
    pub follow_links: bool,
    /// Whether to include hidden files/directories (dotfiles).
    pub include_hidden: bool,
    /// Whether to recurse into subdirectories.
    pub recursive: bool,
    /// Optional cap on directory recursion depth.
    pub max_depth: Option<usize>,

    /// Separator between the title and artist halves of a file stem.
    ///
    /// Example: `"Hello_World - Adele.mp3"` -> title `Hello World`, artist `Adele`.
    pub title_artist_separator: String,
    /// Filename-safe stand-in for spaces in track file names.
    pub space_placeholder: String,
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            extensions: vec!["mp3".into(), "flac".into(), "wav".into(), "ogg".into()],
            follow_links: true,
            include_hidden: true,
            recursive: true,
            max_depth: None,
            title_artist_separator: " - ".to_string(),
            space_placeholder: "_".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// The text rendered inside the top header box.
    pub header_text: String,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            header_text: " ~ attacca: straight on to the next ~ ".to_string(),
        }
    }
}
