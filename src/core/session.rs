//! Phase state machine driving the pomodoro cycle.
//!
//! `SessionController` owns one `CountdownTimer` and one `SessionState`.
//! It subscribes to the timer's tick notification, projects the remaining
//! time into its state on every tick, and applies the transition table
//! when a countdown reaches zero.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::core::config::SessionConfig;
use crate::core::timer::{CountdownTimer, TimerHandle};
use crate::core::traits::{Ack, UserInterface};

/// One named segment of the session cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionPhase {
    /// Work interval.
    Focus,
    /// Break between focus intervals.
    ShortBreak,
    /// Longer break after a full round of cycles.
    LongBreak,
    /// Terminal marker reserved for a future session-length cap; the
    /// transition policy never enters it.
    Completed,
}

impl SessionPhase {
    /// Get display name.
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Focus => "Focus",
            Self::ShortBreak => "Short Break",
            Self::LongBreak => "Long Break",
            Self::Completed => "Completed",
        }
    }

    /// Check if this is a break phase.
    #[must_use]
    pub const fn is_break(&self) -> bool {
        matches!(self, Self::ShortBreak | Self::LongBreak)
    }
}

impl std::fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Snapshot of the live session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    /// Phase the session is currently in.
    pub current_phase: SessionPhase,
    /// Completed focus phases; incremented exactly once per finished Focus.
    pub completed_cycles: u32,
    /// Remaining time as projected from the owned timer at the last tick.
    pub remaining_time: Duration,
    /// When the current phase began.
    pub phase_start_time: DateTime<Utc>,
    /// Accumulated focus time across completed focus phases.
    pub total_focus_time: Duration,
}

impl SessionState {
    fn fresh(config: &SessionConfig) -> Self {
        Self {
            current_phase: SessionPhase::Focus,
            completed_cycles: 0,
            remaining_time: config.focus_duration(),
            phase_start_time: Utc::now(),
            total_focus_time: Duration::zero(),
        }
    }
}

/// State shared with the tick handler closure.
struct SessionInner {
    config: SessionConfig,
    ui: Arc<dyn UserInterface>,
    state: Mutex<SessionState>,
    exit_requested: AtomicBool,
}

/// Owns the phase sequence and cycle count for one session.
pub struct SessionController {
    timer: CountdownTimer,
    inner: Arc<SessionInner>,
}

impl SessionController {
    /// Wire a controller to its timer and display collaborator.
    ///
    /// The timer should be constructed with the focus duration; `reset`
    /// and phase transitions reconfigure it in place from then on, so the
    /// tick subscription registered here stays valid for the controller's
    /// lifetime.
    #[must_use]
    pub fn new(timer: CountdownTimer, ui: Arc<dyn UserInterface>, config: SessionConfig) -> Self {
        let inner = Arc::new(SessionInner {
            state: Mutex::new(SessionState::fresh(&config)),
            config,
            ui,
            exit_requested: AtomicBool::new(false),
        });

        let handle = timer.handle();
        let tick_inner = Arc::clone(&inner);
        timer.set_tick_handler(move || tick_inner.handle_tick(&handle));

        Self { timer, inner }
    }

    /// Begin (or resume) ticking the current phase.
    pub fn start(&self) {
        self.timer.start();
    }

    /// Pause ticking. The phase and cycle count are unaffected.
    pub fn stop(&self) {
        self.timer.stop();
    }

    /// Reinitialize to a fresh focus phase with zero completed cycles.
    /// Does not restart the timer.
    pub fn reset(&self) {
        self.timer.reset(Some(self.inner.config.focus_duration()));

        let mut state = self.inner.lock_state();
        *state = SessionState::fresh(&self.inner.config);
        drop(state);

        self.inner.exit_requested.store(false, Ordering::SeqCst);
    }

    /// Consistent snapshot of the live session state.
    #[must_use]
    pub fn current_state(&self) -> SessionState {
        self.inner.lock_state().clone()
    }

    /// Whether the owned timer is currently ticking.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.timer.is_running()
    }

    /// True once the acknowledgement step reported a user exit. No further
    /// phase transitions occur after this, until `reset`.
    #[must_use]
    pub fn exit_requested(&self) -> bool {
        self.inner.exit_requested.load(Ordering::SeqCst)
    }
}

impl Drop for SessionController {
    fn drop(&mut self) {
        self.timer.clear_tick_handler();
        self.timer.stop();
    }
}

impl SessionInner {
    fn lock_state(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Tick reaction: project the timer's remaining time into the state,
    /// refresh the display, and complete the phase at exhaustion.
    fn handle_tick(&self, timer: &TimerHandle) {
        if self.exit_requested.load(Ordering::SeqCst) {
            return;
        }

        let remaining = timer.remaining();
        let phase = {
            let mut state = self.lock_state();
            state.remaining_time = remaining;
            state.current_phase
        };

        self.ui.display_timer(remaining);
        self.ui.display_phase(phase);

        if remaining <= Duration::zero() {
            self.complete_phase(timer);
        }
    }

    /// Blocking acknowledgement, then the transition table.
    ///
    /// The timer has already stopped itself by the time this runs, so the
    /// acknowledgement wait cannot lose ticks. The restart at the end is
    /// unconditional: the session never idles between phases.
    fn complete_phase(&self, timer: &TimerHandle) {
        if matches!(self.ui.show_completion_message(), Ack::UserExit) {
            timer.stop();
            self.exit_requested.store(true, Ordering::SeqCst);
            return;
        }

        let (next_phase, completed_cycles, total_focus_time) = {
            let mut state = self.lock_state();

            if state.current_phase == SessionPhase::Focus {
                state.completed_cycles += 1;
                state.total_focus_time = state.total_focus_time + self.config.focus_duration();
            }

            let next = match state.current_phase {
                SessionPhase::Focus => {
                    if state.completed_cycles % self.config.cycles_before_long_break == 0 {
                        Some((SessionPhase::LongBreak, self.config.long_break_duration()))
                    } else {
                        Some((SessionPhase::ShortBreak, self.config.short_break_duration()))
                    }
                }
                SessionPhase::ShortBreak | SessionPhase::LongBreak => {
                    Some((SessionPhase::Focus, self.config.focus_duration()))
                }
                // Reserved terminal marker; nothing to transition into.
                SessionPhase::Completed => None,
            };

            let Some((next_phase, next_duration)) = next else {
                return;
            };

            timer.stop();
            timer.reset(Some(next_duration));

            state.current_phase = next_phase;
            state.remaining_time = next_duration;
            state.phase_start_time = Utc::now();

            (next_phase, state.completed_cycles, state.total_focus_time)
        };

        self.ui.display_phase(next_phase);
        self.ui
            .display_session_stats(completed_cycles, total_focus_time);

        timer.start();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::traits::MockUserInterface;
    use std::collections::VecDeque;
    use std::time::Duration as StdDuration;

    /// Test double that records display calls and serves scripted
    /// acknowledgements, defaulting to `Continue`.
    #[derive(Default)]
    struct ScriptedUi {
        acks: Mutex<VecDeque<Ack>>,
        timers: Mutex<Vec<i64>>,
        stats: Mutex<Vec<(u32, i64)>>,
    }

    impl ScriptedUi {
        fn with_acks(acks: Vec<Ack>) -> Self {
            Self {
                acks: Mutex::new(acks.into()),
                ..Self::default()
            }
        }

        fn stat_cycles(&self) -> Vec<u32> {
            self.stats.lock().unwrap().iter().map(|s| s.0).collect()
        }
    }

    impl UserInterface for ScriptedUi {
        fn display_timer(&self, remaining: Duration) {
            self.timers.lock().unwrap().push(remaining.num_seconds());
        }

        fn display_phase(&self, _phase: SessionPhase) {}

        fn show_completion_message(&self) -> Ack {
            self.acks
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Ack::Continue)
        }

        fn display_session_stats(&self, completed_cycles: u32, total_focus_time: Duration) {
            self.stats
                .lock()
                .unwrap()
                .push((completed_cycles, total_focus_time.num_minutes()));
        }
    }

    /// A controller whose timer never ticks on its own; tests drive ticks
    /// through `deliver_tick`.
    fn manual_controller(
        timer_seconds: i64,
        config: SessionConfig,
        ui: Arc<dyn UserInterface>,
    ) -> SessionController {
        let timer = CountdownTimer::with_interval(
            Duration::seconds(timer_seconds),
            StdDuration::from_secs(3600),
        )
        .unwrap();
        SessionController::new(timer, ui, config)
    }

    /// Tick the current phase all the way to its transition.
    fn run_phase_to_completion(controller: &SessionController) {
        let remaining = controller.timer.remaining().num_seconds();
        for _ in 0..remaining {
            controller.timer.deliver_tick();
        }
    }

    #[test]
    fn test_fresh_controller_state() {
        let ui = Arc::new(ScriptedUi::default());
        let controller = manual_controller(25 * 60, SessionConfig::default(), ui);

        let state = controller.current_state();
        assert_eq!(state.current_phase, SessionPhase::Focus);
        assert_eq!(state.completed_cycles, 0);
        assert_eq!(state.remaining_time.num_minutes(), 25);
        assert_eq!(state.total_focus_time, Duration::zero());
        assert!(!controller.is_running());
        assert!(!controller.exit_requested());
    }

    #[test]
    fn test_start_stop_idempotent() {
        let mut mock = MockUserInterface::new();
        mock.expect_display_timer().never();
        let controller = manual_controller(25 * 60, SessionConfig::default(), Arc::new(mock));

        controller.start();
        controller.start();
        assert!(controller.is_running());

        controller.stop();
        controller.stop();
        assert!(!controller.is_running());
        assert_eq!(controller.current_state().remaining_time.num_minutes(), 25);
    }

    #[test]
    fn test_tick_projects_remaining_into_state() {
        let ui = Arc::new(ScriptedUi::default());
        let controller = manual_controller(10, SessionConfig::default(), Arc::clone(&ui) as _);

        controller.start();
        for _ in 0..3 {
            controller.timer.deliver_tick();
        }

        assert_eq!(controller.current_state().remaining_time.num_seconds(), 7);
        assert_eq!(*ui.timers.lock().unwrap(), vec![9, 8, 7]);
    }

    #[test]
    fn test_focus_completion_yields_short_break() {
        let ui = Arc::new(ScriptedUi::default());
        let config = SessionConfig::default();
        let controller = manual_controller(2, config, Arc::clone(&ui) as _);

        controller.start();
        run_phase_to_completion(&controller);

        let state = controller.current_state();
        assert_eq!(state.current_phase, SessionPhase::ShortBreak);
        assert_eq!(state.completed_cycles, 1);
        assert_eq!(state.remaining_time, config.short_break_duration());
        assert_eq!(state.total_focus_time.num_minutes(), 25);
        assert!(controller.is_running());
    }

    #[test]
    fn test_fourth_focus_completion_yields_long_break() {
        let ui = Arc::new(ScriptedUi::default());
        let config = SessionConfig::default();
        let controller = manual_controller(2, config, ui);

        controller.inner.lock_state().completed_cycles = 3;
        controller.start();
        run_phase_to_completion(&controller);

        let state = controller.current_state();
        assert_eq!(state.completed_cycles, 4);
        assert_eq!(state.current_phase, SessionPhase::LongBreak);
        assert_eq!(state.remaining_time, config.long_break_duration());
    }

    #[test]
    fn test_break_always_returns_to_focus() {
        for break_phase in [SessionPhase::ShortBreak, SessionPhase::LongBreak] {
            let ui = Arc::new(ScriptedUi::default());
            let config = SessionConfig::default();
            let controller = manual_controller(2, config, ui);

            {
                let mut state = controller.inner.lock_state();
                state.current_phase = break_phase;
                state.completed_cycles = 2;
            }
            controller.start();
            run_phase_to_completion(&controller);

            let state = controller.current_state();
            assert_eq!(state.current_phase, SessionPhase::Focus);
            assert_eq!(state.completed_cycles, 2);
            assert_eq!(state.remaining_time, config.focus_duration());
        }
    }

    #[test]
    fn test_four_cycle_sequence() {
        let ui = Arc::new(ScriptedUi::default());
        let config = SessionConfig::default();
        let controller = manual_controller(25 * 60, config, Arc::clone(&ui) as _);

        controller.start();

        let expected_phases = [
            SessionPhase::ShortBreak,
            SessionPhase::Focus,
            SessionPhase::ShortBreak,
            SessionPhase::Focus,
            SessionPhase::ShortBreak,
            SessionPhase::Focus,
            SessionPhase::LongBreak,
            SessionPhase::Focus,
        ];

        for expected in expected_phases {
            run_phase_to_completion(&controller);
            assert_eq!(controller.current_state().current_phase, expected);
        }

        assert_eq!(ui.stat_cycles(), vec![1, 1, 2, 2, 3, 3, 4, 4]);
        assert_eq!(controller.current_state().total_focus_time.num_minutes(), 100);
    }

    #[test]
    fn test_user_exit_applies_no_transition() {
        let ui = Arc::new(ScriptedUi::with_acks(vec![Ack::UserExit]));
        let controller = manual_controller(2, SessionConfig::default(), ui);

        controller.start();
        run_phase_to_completion(&controller);

        let state = controller.current_state();
        assert!(controller.exit_requested());
        assert!(!controller.is_running());
        assert_eq!(state.current_phase, SessionPhase::Focus);
        assert_eq!(state.completed_cycles, 0);

        // Ticks after the exit request are ignored.
        controller.timer.deliver_tick();
        assert_eq!(controller.current_state().current_phase, SessionPhase::Focus);
    }

    #[test]
    fn test_reset_restores_fresh_state() {
        let ui = Arc::new(ScriptedUi::default());
        let config = SessionConfig::default();
        let controller = manual_controller(25 * 60, config, ui);

        controller.start();
        // Run one full focus phase, then partway into the break.
        run_phase_to_completion(&controller);
        for _ in 0..30 {
            controller.timer.deliver_tick();
        }

        controller.reset();

        let state = controller.current_state();
        assert_eq!(state.current_phase, SessionPhase::Focus);
        assert_eq!(state.completed_cycles, 0);
        assert_eq!(state.remaining_time.num_minutes(), 25);
        assert_eq!(state.total_focus_time, Duration::zero());
        assert!(!controller.is_running());
    }

    #[test]
    fn test_reset_mid_focus_restores_full_duration() {
        let ui = Arc::new(ScriptedUi::default());
        let controller = manual_controller(25 * 60, SessionConfig::default(), ui);

        controller.start();
        // Run 15 minutes in, leaving 10:00 on the clock.
        for _ in 0..(15 * 60) {
            controller.timer.deliver_tick();
        }
        assert_eq!(controller.current_state().remaining_time.num_minutes(), 10);

        controller.reset();

        let state = controller.current_state();
        assert_eq!(state.current_phase, SessionPhase::Focus);
        assert_eq!(state.completed_cycles, 0);
        assert_eq!(state.remaining_time.num_minutes(), 25);
    }

    #[test]
    fn test_reset_clears_exit_request() {
        let ui = Arc::new(ScriptedUi::with_acks(vec![Ack::UserExit]));
        let controller = manual_controller(1, SessionConfig::default(), ui);

        controller.start();
        run_phase_to_completion(&controller);
        assert!(controller.exit_requested());

        controller.reset();
        assert!(!controller.exit_requested());
    }

    #[test]
    fn test_completed_phase_never_transitions() {
        let ui = Arc::new(ScriptedUi::default());
        let controller = manual_controller(1, SessionConfig::default(), ui);

        controller.inner.lock_state().current_phase = SessionPhase::Completed;
        controller.start();
        run_phase_to_completion(&controller);

        let state = controller.current_state();
        assert_eq!(state.current_phase, SessionPhase::Completed);
        assert_eq!(state.completed_cycles, 0);
        assert!(!controller.is_running());
    }

    #[test]
    fn test_phase_display_names() {
        assert_eq!(SessionPhase::Focus.to_string(), "Focus");
        assert_eq!(SessionPhase::ShortBreak.to_string(), "Short Break");
        assert_eq!(SessionPhase::LongBreak.to_string(), "Long Break");

        assert!(!SessionPhase::Focus.is_break());
        assert!(SessionPhase::ShortBreak.is_break());
        assert!(SessionPhase::LongBreak.is_break());
        assert!(!SessionPhase::Completed.is_break());
    }
}
