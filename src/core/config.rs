//! Cycle policy configuration for a session.

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::error::PomodoError;

/// Phase durations and the long-break cadence for a session.
///
/// Immutable once constructed; every field is validated to be positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Focus phase length in minutes.
    pub focus_minutes: u32,
    /// Short break length in minutes.
    pub short_break_minutes: u32,
    /// Long break length in minutes.
    pub long_break_minutes: u32,
    /// Completed focus phases before a long break.
    pub cycles_before_long_break: u32,
}

impl SessionConfig {
    /// Create a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns `PomodoError::InvalidArgument` if any field is zero.
    pub fn new(
        focus_minutes: u32,
        short_break_minutes: u32,
        long_break_minutes: u32,
        cycles_before_long_break: u32,
    ) -> Result<Self, PomodoError> {
        let fields = [
            ("focus_minutes", focus_minutes),
            ("short_break_minutes", short_break_minutes),
            ("long_break_minutes", long_break_minutes),
            ("cycles_before_long_break", cycles_before_long_break),
        ];

        for (name, value) in fields {
            if value == 0 {
                return Err(PomodoError::InvalidArgument(format!(
                    "{name} must be positive"
                )));
            }
        }

        Ok(Self {
            focus_minutes,
            short_break_minutes,
            long_break_minutes,
            cycles_before_long_break,
        })
    }

    /// Focus phase length.
    #[must_use]
    pub fn focus_duration(&self) -> Duration {
        Duration::minutes(i64::from(self.focus_minutes))
    }

    /// Short break length.
    #[must_use]
    pub fn short_break_duration(&self) -> Duration {
        Duration::minutes(i64::from(self.short_break_minutes))
    }

    /// Long break length.
    #[must_use]
    pub fn long_break_duration(&self) -> Duration {
        Duration::minutes(i64::from(self.long_break_minutes))
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            focus_minutes: 25,
            short_break_minutes: 5,
            long_break_minutes: 15,
            cycles_before_long_break: 4,
        }
    }
}
