//! Console implementation of the session display contract.
//!
//! Draws a fixed-row layout: phase, timer, progress bar, session stats,
//! and a message area used for phase-completion prompts. The blocking
//! acknowledgement is implemented over a channel so the input loop stays
//! the terminal's single event reader.

use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread;
use std::time::Duration as StdDuration;

use chrono::Duration;
use colored::Colorize;
use crossterm::{
    cursor::MoveTo,
    queue,
    style::Print,
    terminal::{Clear, ClearType},
};

use crate::core::{
    format_duration_hms, format_duration_mmss, render_progress_bar, Ack, SessionConfig,
    SessionPhase, UserInterface,
};

const PHASE_ROW: u16 = 1;
const TIMER_ROW: u16 = 2;
const PROGRESS_ROW: u16 = 3;
const STATS_ROW: u16 = 4;
const MESSAGE_ROW: u16 = 6;
const PROMPT_ROW: u16 = 7;
const HELP_ROW: u16 = 9;

const PROGRESS_WIDTH: usize = 30;

/// Drawing state; the mutex also serializes writes from the tick thread
/// and the input loop.
struct Screen {
    current_phase: SessionPhase,
}

/// Fixed-row console display for a session.
pub struct ConsoleUi {
    config: SessionConfig,
    sound: bool,
    screen: Mutex<Screen>,
    ack_pending: Arc<AtomicBool>,
    ack_rx: Mutex<Receiver<Ack>>,
}

/// Foreground half of the acknowledgement channel.
///
/// Dropping the responder resolves any outstanding acknowledgement wait
/// as `UserExit`, so teardown never deadlocks on a blocked prompt.
pub struct AckResponder {
    tx: Sender<Ack>,
    pending: Arc<AtomicBool>,
}

impl AckResponder {
    /// Whether the display is currently blocked waiting for an
    /// acknowledgement key.
    #[must_use]
    pub fn is_waiting(&self) -> bool {
        self.pending.load(Ordering::SeqCst)
    }

    /// Deliver the user's acknowledgement.
    pub fn respond(&self, ack: Ack) {
        let _ = self.tx.send(ack);
    }
}

impl ConsoleUi {
    /// Create the display and the responder handle for the input loop.
    #[must_use]
    pub fn new(config: SessionConfig, sound: bool) -> (Self, AckResponder) {
        let (tx, rx) = mpsc::channel();
        let pending = Arc::new(AtomicBool::new(false));

        let ui = Self {
            config,
            sound,
            screen: Mutex::new(Screen {
                current_phase: SessionPhase::Focus,
            }),
            ack_pending: Arc::clone(&pending),
            ack_rx: Mutex::new(rx),
        };

        (ui, AckResponder { tx, pending })
    }

    fn lock_screen(&self) -> MutexGuard<'_, Screen> {
        self.screen.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Terminal writes are best effort; a failed draw should not take the
    /// session down.
    fn write_row(row: u16, text: &str) {
        let mut stdout = io::stdout();
        let _ = queue!(
            stdout,
            MoveTo(0, row),
            Clear(ClearType::CurrentLine),
            Print(text)
        );
        let _ = stdout.flush();
    }

    fn ring_bell() {
        let mut stdout = io::stdout();
        for _ in 0..3 {
            let _ = stdout.write_all(b"\x07");
            let _ = stdout.flush();
            thread::sleep(StdDuration::from_millis(100));
        }
    }

    fn phase_duration(&self, phase: SessionPhase) -> Duration {
        match phase {
            SessionPhase::Focus => self.config.focus_duration(),
            SessionPhase::ShortBreak => self.config.short_break_duration(),
            SessionPhase::LongBreak => self.config.long_break_duration(),
            SessionPhase::Completed => Duration::zero(),
        }
    }

    /// Show a notice in the message area.
    pub fn display_message(&self, message: &str) {
        let _screen = self.lock_screen();
        Self::write_row(MESSAGE_ROW, message);
    }

    /// Clear the message area.
    pub fn clear_message(&self) {
        let _screen = self.lock_screen();
        Self::write_row(MESSAGE_ROW, "");
        Self::write_row(PROMPT_ROW, "");
    }

    /// Show the key help line.
    pub fn display_help(&self, help: &str) {
        let _screen = self.lock_screen();
        Self::write_row(HELP_ROW, &help.dimmed().to_string());
    }

    /// Show the welcome banner.
    pub fn display_welcome(&self) {
        let _screen = self.lock_screen();
        Self::write_row(PHASE_ROW, &"🍅 pomodo".bold().to_string());
        Self::write_row(TIMER_ROW, "Press ENTER to start, Q to quit");
    }

    /// Clear the whole screen.
    pub fn clear_screen(&self) {
        let _screen = self.lock_screen();
        let mut stdout = io::stdout();
        let _ = queue!(stdout, Clear(ClearType::All));
        let _ = stdout.flush();
    }
}

impl UserInterface for ConsoleUi {
    #[allow(clippy::cast_precision_loss)]
    fn display_timer(&self, remaining: Duration) {
        let screen = self.lock_screen();

        let seconds = remaining.num_seconds().max(0);
        let text = format!("⏱  {}", format_duration_mmss(remaining));
        let styled = if seconds > 300 {
            text.green()
        } else if seconds > 120 {
            text.yellow()
        } else {
            text.red()
        };
        Self::write_row(TIMER_ROW, &styled.to_string());

        let total = self.phase_duration(screen.current_phase).num_seconds();
        let progress = if total <= 0 {
            1.0
        } else {
            (total - seconds) as f64 / total as f64
        };
        Self::write_row(
            PROGRESS_ROW,
            &format!(
                "{} {:>3.0}%",
                render_progress_bar(progress, PROGRESS_WIDTH),
                progress * 100.0
            ),
        );
    }

    fn display_phase(&self, phase: SessionPhase) {
        let mut screen = self.lock_screen();
        screen.current_phase = phase;

        let line = match phase {
            SessionPhase::Focus => "🍅 FOCUS TIME".red().bold(),
            SessionPhase::ShortBreak => "☕ SHORT BREAK".blue().bold(),
            SessionPhase::LongBreak => "🌟 LONG BREAK".magenta().bold(),
            SessionPhase::Completed => "✔ SESSION COMPLETE".green().bold(),
        };
        Self::write_row(PHASE_ROW, &line.to_string());
    }

    fn show_completion_message(&self) -> Ack {
        {
            let _screen = self.lock_screen();
            Self::write_row(MESSAGE_ROW, &"⏰ Phase complete!".green().bold().to_string());
            if self.sound {
                Self::ring_bell();
            }
            Self::write_row(PROMPT_ROW, "Press SPACE to continue, Q to quit");
        }

        self.ack_pending.store(true, Ordering::SeqCst);
        let ack = {
            let rx = self.ack_rx.lock().unwrap_or_else(PoisonError::into_inner);
            rx.recv().unwrap_or(Ack::UserExit)
        };
        self.ack_pending.store(false, Ordering::SeqCst);

        if ack == Ack::Continue {
            self.clear_message();
        }

        ack
    }

    fn display_session_stats(&self, completed_cycles: u32, total_focus_time: Duration) {
        let _screen = self.lock_screen();
        Self::write_row(
            STATS_ROW,
            &format!(
                "Completed cycles: {completed_cycles} | Total focus: {}",
                format_duration_hms(total_focus_time)
            ),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_responder_not_waiting_initially() {
        let (_ui, responder) = ConsoleUi::new(SessionConfig::default(), false);

        assert!(!responder.is_waiting());
    }

    #[test]
    fn test_dropped_responder_resolves_as_user_exit() {
        let (ui, responder) = ConsoleUi::new(SessionConfig::default(), false);
        drop(responder);

        assert_eq!(ui.show_completion_message(), Ack::UserExit);
        assert!(!ui.ack_pending.load(Ordering::SeqCst));
    }

    #[test]
    fn test_acknowledgement_roundtrip() {
        let (ui, responder) = ConsoleUi::new(SessionConfig::default(), false);
        let ui = Arc::new(ui);

        let waiter = Arc::clone(&ui);
        let handle = thread::spawn(move || waiter.show_completion_message());

        // Wait for the prompt to block, then answer it.
        for _ in 0..100 {
            if responder.is_waiting() {
                break;
            }
            thread::sleep(StdDuration::from_millis(10));
        }
        assert!(responder.is_waiting());
        responder.respond(Ack::Continue);

        assert_eq!(handle.join().unwrap(), Ack::Continue);
        assert!(!responder.is_waiting());
    }

    #[test]
    fn test_phase_duration_follows_config() {
        let config = SessionConfig::new(50, 10, 30, 4).unwrap();
        let (ui, _responder) = ConsoleUi::new(config, false);

        assert_eq!(
            ui.phase_duration(SessionPhase::Focus).num_minutes(),
            50
        );
        assert_eq!(
            ui.phase_duration(SessionPhase::ShortBreak).num_minutes(),
            10
        );
        assert_eq!(
            ui.phase_duration(SessionPhase::LongBreak).num_minutes(),
            30
        );
        assert_eq!(
            ui.phase_duration(SessionPhase::Completed).num_seconds(),
            0
        );
    }
}
