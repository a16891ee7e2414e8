//! Collaborator contracts consumed by the session core.

use chrono::Duration;

#[cfg(test)]
use mockall::automock;

use crate::core::session::SessionPhase;

/// Outcome of the blocking phase-completion acknowledgement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ack {
    /// Proceed into the next phase.
    Continue,
    /// The user asked to end the session instead.
    UserExit,
}

/// Display and alert capability implemented by the terminal layer.
///
/// Implementations are invoked from the timer's tick thread and must be
/// safe to share across threads. All methods except
/// `show_completion_message` are side-effect only and non-blocking.
#[cfg_attr(test, automock)]
pub trait UserInterface: Send + Sync {
    /// Show the time remaining in the current phase.
    fn display_timer(&self, remaining: Duration);

    /// Show the phase the session is in.
    fn display_phase(&self, phase: SessionPhase);

    /// Announce the end of a phase and block until the user acknowledges
    /// it, or until the acknowledgement channel is torn down.
    fn show_completion_message(&self) -> Ack;

    /// Show the completed cycle count and accumulated focus time.
    fn display_session_stats(&self, completed_cycles: u32, total_focus_time: Duration);
}
