//! Application settings management

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// General settings
    #[serde(default)]
    pub general: GeneralSettings,

    /// Backend API settings
    #[serde(default)]
    pub api: ApiSettings,

    /// Recording session settings
    #[serde(default)]
    pub session: SessionSettings,

    /// TUI settings
    #[serde(default)]
    pub tui: TuiSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralSettings {
    /// Data directory for the local history cache
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiSettings {
    /// Base URL of the fitness backend
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Auth token (normally cached in the token file, not here)
    #[serde(default)]
    pub token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSettings {
    /// Ring the terminal bell when a countdown expires
    #[serde(default = "default_true")]
    pub sound_enabled: bool,

    /// Seconds of remaining countdown at which the gauge turns red
    #[serde(default = "default_warn_threshold")]
    pub countdown_warn_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TuiSettings {
    /// Show the elapsed session clock in the recorder screen
    #[serde(default = "default_true")]
    pub show_elapsed: bool,

    /// Number of recent sessions to show on the dashboard
    #[serde(default = "default_recent_count")]
    pub recent_count: usize,

    /// Color theme (dark, light)
    #[serde(default = "default_theme")]
    pub theme: String,
}

// Default value functions

fn default_data_dir() -> PathBuf {
    ProjectDirs::from("com", "reps", "reps")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("~/.local/share/reps"))
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_base_url() -> String {
    "http://localhost:8000/api".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_true() -> bool {
    true
}

fn default_warn_threshold() -> u64 {
    5
}

fn default_recent_count() -> usize {
    5
}

fn default_theme() -> String {
    "dark".to_string()
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
        }
    }
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            token: String::new(),
        }
    }
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            sound_enabled: true,
            countdown_warn_secs: default_warn_threshold(),
        }
    }
}

impl Default for TuiSettings {
    fn default() -> Self {
        Self {
            show_elapsed: true,
            recent_count: default_recent_count(),
            theme: default_theme(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            general: GeneralSettings::default(),
            api: ApiSettings::default(),
            session: SessionSettings::default(),
            tui: TuiSettings::default(),
        }
    }
}

impl Settings {
    /// Load settings from the configuration file
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            tracing::info!("No config file found, using defaults");
            let mut settings = Self::default();
            settings.apply_env_overrides();
            return Ok(settings);
        }

        let content = std::fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;

        let mut settings: Settings = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", config_path.display()))?;

        settings.apply_env_overrides();

        Ok(settings)
    }

    /// Load settings from the configuration file without env overrides.
    /// `config set` edits this view so env values never leak into the file.
    pub fn load_file() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", config_path.display()))
    }

    /// Persist these settings to the configuration file.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        let content = toml::to_string_pretty(self)?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(&path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        Ok(())
    }

    /// Apply a `section.key` assignment from `config set`.
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "general.data_dir" => self.general.data_dir = PathBuf::from(value),
            "general.log_level" => {
                let level = value.to_lowercase();
                if !["trace", "debug", "info", "warn", "error"].contains(&level.as_str()) {
                    anyhow::bail!("Invalid log level: {}", value);
                }
                self.general.log_level = level;
            }
            "api.base_url" => self.api.base_url = value.trim_end_matches('/').to_string(),
            "api.timeout_secs" => self.api.timeout_secs = parse_value(key, value)?,
            "api.token" => self.api.token = value.to_string(),
            "session.sound_enabled" => self.session.sound_enabled = parse_value(key, value)?,
            "session.countdown_warn_secs" => {
                self.session.countdown_warn_secs = parse_value(key, value)?
            }
            "tui.show_elapsed" => self.tui.show_elapsed = parse_value(key, value)?,
            "tui.recent_count" => self.tui.recent_count = parse_value(key, value)?,
            "tui.theme" => {
                if value != "dark" && value != "light" {
                    anyhow::bail!("Invalid theme: {} (expected dark or light)", value);
                }
                self.tui.theme = value.to_string();
            }
            _ => anyhow::bail!("Unknown config key: {}", key),
        }
        Ok(())
    }

    /// Apply environment variable overrides.
    fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("REPS_API_URL") {
            if !url.trim().is_empty() {
                self.api.base_url = url.trim().trim_end_matches('/').to_string();
            }
        }
        if self.api.token.trim().is_empty() {
            if let Ok(token) = std::env::var("REPS_API_TOKEN") {
                if !token.trim().is_empty() {
                    self.api.token = token;
                }
            }
        }
    }

    /// Get the path to the configuration file
    pub fn config_path() -> Result<PathBuf> {
        let dirs =
            ProjectDirs::from("com", "reps", "reps").context("Could not determine config directory")?;

        let config_dir = dirs.config_dir();
        Ok(config_dir.join("config.toml"))
    }

    /// Write default configuration to a file
    pub fn write_default(path: &PathBuf) -> Result<()> {
        let settings = Self::default();
        let content = toml::to_string_pretty(&settings)?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the local history database path
    pub fn database_path(&self) -> PathBuf {
        self.general.data_dir.join("reps.db")
    }

    /// Get the cached auth token file path
    pub fn token_path(&self) -> PathBuf {
        self.general.data_dir.join("token")
    }

    /// Ensure all required directories exist
    pub fn ensure_dirs(&self) -> Result<()> {
        std::fs::create_dir_all(&self.general.data_dir)?;
        Ok(())
    }

    /// Resolve the auth token: config/env first, then the cached token file.
    pub fn resolve_token(&self) -> Option<String> {
        let configured = self.api.token.trim();
        if !configured.is_empty() {
            return Some(configured.to_string());
        }

        std::fs::read_to_string(self.token_path())
            .ok()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
    }

    /// Cache the auth token on disk after a successful login.
    pub fn store_token(&self, token: &str) -> Result<()> {
        self.ensure_dirs()?;
        std::fs::write(self.token_path(), token)?;
        Ok(())
    }

    /// Remove the cached auth token on logout.
    pub fn clear_token(&self) -> Result<()> {
        let path = self.token_path();
        if path.exists() {
            std::fs::remove_file(path)?;
        }
        Ok(())
    }

    /// WebSocket URL for the chat assistant, derived from the API base URL.
    pub fn chat_ws_url(&self, session_id: &str) -> String {
        let base = self.api.base_url.trim_end_matches('/');
        let ws_base = if let Some(rest) = base.strip_prefix("https://") {
            format!("wss://{}", rest)
        } else if let Some(rest) = base.strip_prefix("http://") {
            format!("ws://{}", rest)
        } else {
            format!("ws://{}", base)
        };
        format!("{}/chat/sessions/{}/ws/", ws_base, session_id)
    }
}

fn parse_value<T>(key: &str, value: &str) -> Result<T>
where
    T: std::str::FromStr,
{
    value
        .parse()
        .map_err(|_| anyhow::anyhow!("Invalid value for {}: {}", key, value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_value_updates_known_keys() {
        let mut settings = Settings::default();

        settings
            .set_value("api.base_url", "https://fit.example.com/api/")
            .unwrap();
        assert_eq!(settings.api.base_url, "https://fit.example.com/api");

        settings.set_value("session.sound_enabled", "false").unwrap();
        assert!(!settings.session.sound_enabled);

        settings.set_value("tui.recent_count", "12").unwrap();
        assert_eq!(settings.tui.recent_count, 12);
    }

    #[test]
    fn set_value_rejects_unknown_key() {
        let mut settings = Settings::default();
        let err = settings.set_value("api.bogus", "x").unwrap_err();
        assert!(err.to_string().contains("Unknown config key"));
    }

    #[test]
    fn set_value_rejects_bad_values() {
        let mut settings = Settings::default();
        assert!(settings.set_value("api.timeout_secs", "soon").is_err());
        assert!(settings.set_value("session.sound_enabled", "loud").is_err());
        assert!(settings.set_value("tui.theme", "plaid").is_err());
        assert!(settings.set_value("general.log_level", "shout").is_err());
    }

    #[test]
    fn defaults_point_at_local_backend() {
        let settings = Settings::default();
        assert_eq!(settings.api.base_url, "http://localhost:8000/api");
        assert_eq!(settings.api.timeout_secs, 30);
    }

    #[test]
    fn chat_ws_url_swaps_scheme() {
        let mut settings = Settings::default();
        settings.api.base_url = "https://fit.example.com/api".to_string();
        assert_eq!(
            settings.chat_ws_url("abc"),
            "wss://fit.example.com/api/chat/sessions/abc/ws/"
        );

        settings.api.base_url = "http://localhost:8000/api/".to_string();
        assert_eq!(
            settings.chat_ws_url("abc"),
            "ws://localhost:8000/api/chat/sessions/abc/ws/"
        );
    }
}
