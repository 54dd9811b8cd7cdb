use std::{env, path::PathBuf};

use super::schema::Settings;

/// Configuration loading helpers.
///
/// `Settings::load` tries environment variables first (prefix `ATTACCA__`),
/// then an optional config file and falls back to struct defaults.
impl Settings {
    /// Load settings from environment and optional config file.
    pub fn load() -> Result<Self, ::config::ConfigError> {
        let config_path = resolve_config_path();

        let mut builder = ::config::Config::builder();

        if let Some(path) = &config_path {
            builder = builder.add_source(::config::File::from(path.as_path()).required(false));
        }

        builder = builder.add_source(
            ::config::Environment::with_prefix("ATTACCA")
                .separator("__")
                .try_parsing(true),
        );

        let cfg = builder.build()?;
        let settings: Settings = cfg.try_deserialize()?;
        Ok(settings)
    }

    /// Perform basic validation checks on loaded settings.
    pub fn validate(&self) -> Result<(), String> {
        for (name, v) in [
            ("playback.initial_volume", self.playback.initial_volume),
            ("playback.unmute_volume", self.playback.unmute_volume),
        ] {
            if !(0.0..=1.0).contains(&v) {
                return Err(format!("{name} must be within 0.0..=1.0"));
            }
        }
        if self.playback.volume_step <= 0.0 || self.playback.volume_step > 1.0 {
            return Err("playback.volume_step must be within (0.0, 1.0]".to_string());
        }
        if self.library.title_artist_separator.is_empty() {
            return Err("library.title_artist_separator must not be empty".to_string());
        }
        Ok(())
    }
}

/// Resolve the config path from `ATTACCA_CONFIG_PATH` or XDG defaults.
pub fn resolve_config_path() -> Option<PathBuf> {
    if let Some(p) = env::var_os("ATTACCA_CONFIG_PATH") {
        let p = PathBuf::from(p);
        return Some(p);
    }
    default_config_path()
}

/// Compute the default config path under `$XDG_CONFIG_HOME/attacca/config.toml`
/// or `~/.config/attacca/config.toml` when `XDG_CONFIG_HOME` is not set.
pub fn default_config_path() -> Option<PathBuf> {
    let config_home = if let Some(xdg) = env::var_os("XDG_CONFIG_HOME") {
        Some(PathBuf::from(xdg))
    } else if let Some(home) = env::var_os("HOME") {
        Some(PathBuf::from(home).join(".config"))
    } else {
        None
    };

    config_home.map(|d| d.join("attacca").join("config.toml"))
}
