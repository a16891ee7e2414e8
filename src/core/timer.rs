//! Tick-driven countdown primitive.
//!
//! `CountdownTimer` owns a single duration and a background thread that
//! decrements it once per second while running, notifying a single
//! subscriber on every tick. Also provides duration formatting helpers.

use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Duration as StdDuration;

use chrono::Duration;

use crate::error::PomodoError;

/// Tick notification callback. The tick carries no payload; subscribers
/// read `remaining()` themselves.
pub type TickHandler = Box<dyn Fn() + Send + 'static>;

/// Countdown state shared between the owner and the tick thread.
#[derive(Debug)]
struct Countdown {
    total_seconds: i64,
    remaining_seconds: i64,
    running: bool,
    shutdown: bool,
}

impl Countdown {
    /// Decrement by one second, stopping at exhaustion.
    ///
    /// The stop happens in the same critical section as the decrement, so
    /// a subscriber that observes the zero tick already sees a stopped
    /// timer, and no tick can follow the exhaustion tick.
    fn tick(&mut self) {
        if self.remaining_seconds > 0 {
            self.remaining_seconds -= 1;
        }
        if self.remaining_seconds <= 0 {
            self.running = false;
        }
    }
}

/// State shared with the tick thread.
struct TimerShared {
    countdown: Mutex<Countdown>,
    wake: Condvar,
    handler: Mutex<Option<TickHandler>>,
}

impl TimerShared {
    fn lock_countdown(&self) -> MutexGuard<'_, Countdown> {
        self.countdown
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn start(&self) {
        let mut countdown = self.lock_countdown();
        if !countdown.running && countdown.remaining_seconds > 0 {
            countdown.running = true;
        }
    }

    fn stop(&self) {
        self.lock_countdown().running = false;
    }

    fn reset(&self, new_duration: Option<Duration>) {
        let mut countdown = self.lock_countdown();
        countdown.running = false;
        if let Some(duration) = new_duration {
            countdown.total_seconds = duration.num_seconds();
        }
        countdown.remaining_seconds = countdown.total_seconds;
    }

    fn remaining(&self) -> Duration {
        Duration::seconds(self.lock_countdown().remaining_seconds)
    }

    fn is_running(&self) -> bool {
        self.lock_countdown().running
    }

    /// One tick delivery: decrement while running, then notify the
    /// subscriber. The countdown lock is released before the handler runs,
    /// so a handler that blocks never holds up `remaining()` or `stop()`.
    fn run_tick(&self) {
        let fired = {
            let mut countdown = self.lock_countdown();
            if countdown.running {
                countdown.tick();
                true
            } else {
                false
            }
        };

        if fired {
            let handler = self.handler.lock().unwrap_or_else(PoisonError::into_inner);
            if let Some(handler) = handler.as_ref() {
                handler();
            }
        }
    }
}

/// A countdown timer with a one-second tick cadence.
///
/// The tick thread is spawned at construction and stays parked until
/// `start`. Dropping the timer stops the countdown and joins the thread.
pub struct CountdownTimer {
    shared: Arc<TimerShared>,
    worker: Option<JoinHandle<()>>,
}

impl CountdownTimer {
    /// Create a timer for `duration`, truncated to whole seconds.
    ///
    /// # Errors
    ///
    /// Returns `PomodoError::InvalidArgument` if `duration` is not positive.
    pub fn new(duration: Duration) -> Result<Self, PomodoError> {
        Self::with_interval(duration, StdDuration::from_secs(1))
    }

    /// `interval` is how often the tick thread wakes. Production code
    /// always uses one second; tests shorten or stretch it.
    pub(crate) fn with_interval(
        duration: Duration,
        interval: StdDuration,
    ) -> Result<Self, PomodoError> {
        let seconds = duration.num_seconds();
        if seconds <= 0 {
            return Err(PomodoError::InvalidArgument(
                "timer duration must be positive".to_string(),
            ));
        }

        let shared = Arc::new(TimerShared {
            countdown: Mutex::new(Countdown {
                total_seconds: seconds,
                remaining_seconds: seconds,
                running: false,
                shutdown: false,
            }),
            wake: Condvar::new(),
            handler: Mutex::new(None),
        });

        let worker_shared = Arc::clone(&shared);
        let worker = thread::Builder::new()
            .name("countdown-tick".to_string())
            .spawn(move || tick_loop(&worker_shared, interval))
            .map_err(PomodoError::Io)?;

        Ok(Self {
            shared,
            worker: Some(worker),
        })
    }

    /// Begin ticking. No-op if already running or already exhausted.
    pub fn start(&self) {
        self.shared.start();
    }

    /// Halt ticking. No-op if already stopped.
    pub fn stop(&self) {
        self.shared.stop();
    }

    /// Stop and restore the full duration, optionally replacing it.
    /// Does not restart the timer.
    pub fn reset(&self, new_duration: Option<Duration>) {
        self.shared.reset(new_duration);
    }

    /// Current remaining time.
    #[must_use]
    pub fn remaining(&self) -> Duration {
        self.shared.remaining()
    }

    /// Whether the timer is currently ticking.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.shared.is_running()
    }

    /// Register the tick subscriber, replacing any previous one.
    pub fn set_tick_handler(&self, handler: impl Fn() + Send + 'static) {
        *self
            .shared
            .handler
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(Box::new(handler));
    }

    /// Deregister the tick subscriber.
    pub fn clear_tick_handler(&self) {
        *self
            .shared
            .handler
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = None;
    }

    /// Lightweight handle for use inside the tick handler.
    pub(crate) fn handle(&self) -> TimerHandle {
        TimerHandle {
            shared: Arc::clone(&self.shared),
        }
    }

    /// Perform one tick synchronously, exactly as the tick thread would.
    #[cfg(test)]
    pub(crate) fn deliver_tick(&self) {
        self.shared.run_tick();
    }
}

impl Drop for CountdownTimer {
    fn drop(&mut self) {
        {
            let mut countdown = self.shared.lock_countdown();
            countdown.running = false;
            countdown.shutdown = true;
        }
        self.shared.wake.notify_all();

        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

/// Control handle shared with the tick handler closure.
///
/// Carries no thread ownership; operations mirror the owning timer's.
#[derive(Clone)]
pub(crate) struct TimerHandle {
    shared: Arc<TimerShared>,
}

impl TimerHandle {
    pub(crate) fn start(&self) {
        self.shared.start();
    }

    pub(crate) fn stop(&self) {
        self.shared.stop();
    }

    pub(crate) fn reset(&self, new_duration: Option<Duration>) {
        self.shared.reset(new_duration);
    }

    pub(crate) fn remaining(&self) -> Duration {
        self.shared.remaining()
    }
}

/// Body of the tick thread: park on the condvar for one interval, then
/// deliver a tick. The condvar is only ever notified at shutdown.
fn tick_loop(shared: &TimerShared, interval: StdDuration) {
    let mut countdown = shared.lock_countdown();
    loop {
        let (guard, timeout) = shared
            .wake
            .wait_timeout(countdown, interval)
            .unwrap_or_else(PoisonError::into_inner);
        countdown = guard;

        if countdown.shutdown {
            break;
        }
        if !timeout.timed_out() {
            continue;
        }

        drop(countdown);
        shared.run_tick();
        countdown = shared.lock_countdown();
    }
}

/// Format a duration as MM:SS.
#[must_use]
pub fn format_duration_mmss(d: Duration) -> String {
    let total_seconds = d.num_seconds().max(0);
    let minutes = total_seconds / 60;
    let seconds = total_seconds % 60;
    format!("{minutes:02}:{seconds:02}")
}

/// Format a duration as HH:MM:SS.
#[must_use]
pub fn format_duration_hms(d: Duration) -> String {
    let total_seconds = d.num_seconds().max(0);
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}

/// Render a progress bar.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn render_progress_bar(progress: f64, width: usize) -> String {
    let progress = progress.clamp(0.0, 1.0);
    let filled = (progress * width as f64) as usize;
    let empty = width.saturating_sub(filled);

    format!("[{}{}]", "█".repeat(filled), "░".repeat(empty))
}
