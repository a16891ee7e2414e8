//! Terminal layer for pomodo.
//!
//! Implements the session core's display and acknowledgement contract on
//! top of crossterm, plus the raw-mode lifecycle and key handling for the
//! interactive session loop.

mod event;
mod screen;

pub use event::{handle_events, Action};
pub use screen::{AckResponder, ConsoleUi};

use std::io;

use crossterm::{
    cursor::{Hide, Show},
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};

use crate::error::PomodoError;

/// RAII guard for raw mode and the alternate screen.
///
/// The terminal is restored on drop, including on early returns from the
/// session loop.
pub struct TerminalGuard;

impl TerminalGuard {
    /// Enter raw mode on a cleared alternate screen with the cursor hidden.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be configured.
    pub fn enter() -> Result<Self, PomodoError> {
        enable_raw_mode()
            .map_err(|e| PomodoError::Terminal(format!("Failed to enable raw mode: {e}")))?;

        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, Hide, Clear(ClearType::All))
            .map_err(|e| PomodoError::Terminal(format!("Failed to setup terminal: {e}")))?;

        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let mut stdout = io::stdout();
        execute!(stdout, LeaveAlternateScreen, Show).ok();
        disable_raw_mode().ok();
    }
}
