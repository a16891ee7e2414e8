//! Configuration settings for pomodo.
//!
//! Settings are loaded from `~/.pomodo/config.yaml`.

use serde::{Deserialize, Serialize};

use crate::config::Paths;
use crate::core::SessionConfig;
use crate::error::PomodoError;

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Session cycle settings.
    pub session: SessionSettings,
    /// Terminal display settings.
    pub ui: UiSettings,
}

/// Session cycle settings as stored on disk.
///
/// Values are not validated at load time; `to_session_config` validates
/// them before a session starts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionSettings {
    /// Focus phase length in minutes.
    #[serde(default = "default_focus_minutes")]
    pub focus_minutes: u32,
    /// Short break length in minutes.
    #[serde(default = "default_short_break_minutes")]
    pub short_break_minutes: u32,
    /// Long break length in minutes.
    #[serde(default = "default_long_break_minutes")]
    pub long_break_minutes: u32,
    /// Completed focus phases before a long break.
    #[serde(default = "default_cycles_before_long_break")]
    pub cycles_before_long_break: u32,
}

/// Terminal display settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// Ring the terminal bell when a phase completes.
    #[serde(default = "default_true")]
    pub sound: bool,
}

// Default value functions for serde
const fn default_focus_minutes() -> u32 {
    25
}

const fn default_short_break_minutes() -> u32 {
    5
}

const fn default_long_break_minutes() -> u32 {
    15
}

const fn default_cycles_before_long_break() -> u32 {
    4
}

const fn default_true() -> bool {
    true
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            focus_minutes: default_focus_minutes(),
            short_break_minutes: default_short_break_minutes(),
            long_break_minutes: default_long_break_minutes(),
            cycles_before_long_break: default_cycles_before_long_break(),
        }
    }
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            sound: default_true(),
        }
    }
}

impl SessionSettings {
    /// Validated cycle policy for the session core.
    ///
    /// # Errors
    ///
    /// Returns `PomodoError::InvalidArgument` if any field is zero.
    pub fn to_session_config(&self) -> Result<SessionConfig, PomodoError> {
        SessionConfig::new(
            self.focus_minutes,
            self.short_break_minutes,
            self.long_break_minutes,
            self.cycles_before_long_break,
        )
    }
}

impl Config {
    /// Load configuration from the default path.
    ///
    /// If the config file doesn't exist, returns default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load() -> Result<Self, PomodoError> {
        let paths = Paths::new()?;
        Self::load_from_path(&paths.config_file)
    }

    /// Load configuration from a specific path.
    ///
    /// If the config file doesn't exist, returns default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load_from_path(path: &std::path::Path) -> Result<Self, PomodoError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(|e| {
            PomodoError::Config(format!(
                "Failed to read config file {}: {e}",
                path.display()
            ))
        })?;

        serde_yaml::from_str(&contents).map_err(|e| {
            PomodoError::Config(format!(
                "Failed to parse config file {}: {e}",
                path.display()
            ))
        })
    }

    /// Save configuration to the default path.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be written.
    pub fn save(&self) -> Result<(), PomodoError> {
        let paths = Paths::new()?;
        paths.ensure_dirs()?;
        self.save_to_path(&paths.config_file)
    }

    /// Save configuration to a specific path.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be written.
    pub fn save_to_path(&self, path: &std::path::Path) -> Result<(), PomodoError> {
        let contents = serde_yaml::to_string(self)
            .map_err(|e| PomodoError::Config(format!("Failed to serialize config: {e}")))?;

        std::fs::write(path, contents).map_err(|e| {
            PomodoError::Config(format!(
                "Failed to write config file {}: {e}",
                path.display()
            ))
        })
    }
}
