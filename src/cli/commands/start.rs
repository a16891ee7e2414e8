//! Interactive session command.
//!
//! Builds the session from configuration and flags, then runs the input
//! loop that feeds Start/Stop/Reset calls and acknowledgement responses
//! into the session core.

use std::sync::Arc;

use crossterm::event::{self, Event, KeyCode, KeyModifiers};

use crate::cli::args::StartArgs;
use crate::config::{Config, SessionSettings};
use crate::core::{
    CountdownTimer, SessionConfig, SessionController, SessionPhase, UserInterface,
};
use crate::error::PomodoError;
use crate::tui::{handle_events, AckResponder, Action, ConsoleUi, TerminalGuard};

/// Run an interactive timer session.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or the terminal
/// cannot be driven.
pub fn start(args: StartArgs) -> Result<String, PomodoError> {
    let file_config = Config::load()?;
    let config = effective_config(&args, &file_config.session)?;
    let sound = file_config.ui.sound && !args.no_sound;

    let guard = TerminalGuard::enter()?;

    let (ui, responder) = ConsoleUi::new(config, sound);
    let ui = Arc::new(ui);

    ui.display_welcome();
    if !wait_for_start()? {
        drop(guard);
        return Ok("Goodbye! 🍅".to_string());
    }
    ui.clear_screen();

    let timer = CountdownTimer::new(config.focus_duration())?;
    let controller =
        SessionController::new(timer, Arc::clone(&ui) as Arc<dyn UserInterface>, config);

    ui.display_phase(SessionPhase::Focus);
    ui.display_timer(config.focus_duration());
    ui.display_help("Q quit · P pause/resume · R reset");
    controller.start();

    let outcome = run_loop(&controller, &ui, &responder);

    controller.stop();
    // Resolve any outstanding acknowledgement wait before the controller
    // joins the tick thread.
    drop(responder);
    drop(controller);
    drop(guard);

    outcome?;
    Ok("Goodbye! 🍅".to_string())
}

/// Merge start flags over the configured session settings.
fn effective_config(
    args: &StartArgs,
    settings: &SessionSettings,
) -> Result<SessionConfig, PomodoError> {
    SessionConfig::new(
        args.focus.unwrap_or(settings.focus_minutes),
        args.short_break.unwrap_or(settings.short_break_minutes),
        args.long_break.unwrap_or(settings.long_break_minutes),
        args.cycles.unwrap_or(settings.cycles_before_long_break),
    )
}

/// Block on the welcome screen until the user starts or declines.
fn wait_for_start() -> Result<bool, PomodoError> {
    loop {
        let event = event::read()
            .map_err(|e| PomodoError::Terminal(format!("Event read failed: {e}")))?;

        if let Event::Key(key) = event {
            if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
                return Ok(false);
            }
            match key.code {
                KeyCode::Enter => return Ok(true),
                KeyCode::Char('q' | 'Q') | KeyCode::Esc => return Ok(false),
                _ => {}
            }
        }
    }
}

/// Foreground control loop: routes keys to session commands until the
/// user quits or the acknowledgement step reports an exit.
fn run_loop(
    controller: &SessionController,
    ui: &ConsoleUi,
    responder: &AckResponder,
) -> Result<(), PomodoError> {
    loop {
        if let Some(action) = handle_events(responder)? {
            match action {
                Action::Quit => {
                    controller.stop();
                    break;
                }
                Action::TogglePause => {
                    if controller.is_running() {
                        controller.stop();
                        ui.display_message("⏸  Paused. Press P to resume.");
                    } else if !controller.exit_requested() {
                        controller.start();
                        ui.clear_message();
                    }
                }
                Action::Reset => {
                    controller.reset();
                    let state = controller.current_state();
                    ui.display_phase(state.current_phase);
                    ui.display_timer(state.remaining_time);
                    ui.display_message("Timer reset. Press P to start.");
                }
            }
        }

        if controller.exit_requested() {
            break;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_overrides() -> StartArgs {
        StartArgs {
            focus: None,
            short_break: None,
            long_break: None,
            cycles: None,
            no_sound: false,
        }
    }

    #[test]
    fn test_effective_config_uses_settings() {
        let config = effective_config(&no_overrides(), &SessionSettings::default()).unwrap();

        assert_eq!(config.focus_minutes, 25);
        assert_eq!(config.short_break_minutes, 5);
        assert_eq!(config.long_break_minutes, 15);
        assert_eq!(config.cycles_before_long_break, 4);
    }

    #[test]
    fn test_effective_config_flags_override() {
        let args = StartArgs {
            focus: Some(50),
            cycles: Some(2),
            ..no_overrides()
        };
        let config = effective_config(&args, &SessionSettings::default()).unwrap();

        assert_eq!(config.focus_minutes, 50);
        assert_eq!(config.short_break_minutes, 5);
        assert_eq!(config.cycles_before_long_break, 2);
    }

    #[test]
    fn test_effective_config_rejects_zero_override() {
        let args = StartArgs {
            focus: Some(0),
            ..no_overrides()
        };

        assert!(effective_config(&args, &SessionSettings::default()).is_err());
    }
}
