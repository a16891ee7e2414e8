//! Event handling for the interactive session.

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyModifiers};

use crate::core::Ack;
use crate::error::PomodoError;
use crate::tui::screen::AckResponder;

/// Action to take after handling an event.
pub enum Action {
    /// Quit the session.
    Quit,
    /// Pause or resume the timer.
    TogglePause,
    /// Reset the session to a fresh focus phase.
    Reset,
}

/// Poll for a key event and translate it into a session action.
///
/// While a phase-completion acknowledgement is pending, keys are routed
/// to the responder instead; this keeps the terminal's single event
/// reader here.
///
/// # Errors
///
/// Returns an error if event polling fails.
pub fn handle_events(responder: &AckResponder) -> Result<Option<Action>, PomodoError> {
    // Poll for events with a small timeout
    if event::poll(Duration::from_millis(100))
        .map_err(|e| PomodoError::Terminal(format!("Event poll failed: {e}")))?
    {
        if let Event::Key(key) = event::read()
            .map_err(|e| PomodoError::Terminal(format!("Event read failed: {e}")))?
        {
            // Handle Ctrl+C
            if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
                if responder.is_waiting() {
                    responder.respond(Ack::UserExit);
                    return Ok(None);
                }
                return Ok(Some(Action::Quit));
            }

            if responder.is_waiting() {
                match key.code {
                    KeyCode::Char(' ') => responder.respond(Ack::Continue),
                    KeyCode::Char('q' | 'Q') | KeyCode::Esc => responder.respond(Ack::UserExit),
                    _ => {}
                }
                return Ok(None);
            }

            match key.code {
                // Quit
                KeyCode::Char('q' | 'Q') | KeyCode::Esc => {
                    return Ok(Some(Action::Quit));
                }

                // Pause/resume
                KeyCode::Char('p' | 'P') => {
                    return Ok(Some(Action::TogglePause));
                }

                // Reset
                KeyCode::Char('r' | 'R') => {
                    return Ok(Some(Action::Reset));
                }

                _ => {}
            }
        }
    }

    Ok(None)
}
