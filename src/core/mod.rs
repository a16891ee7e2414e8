//! Timer and session core.
//!
//! `CountdownTimer` is the tick-driven countdown primitive;
//! `SessionController` owns the phase state machine it drives. The
//! terminal layer plugs in through the `UserInterface` contract.

mod config;
mod session;
mod timer;
mod traits;

pub use config::SessionConfig;
pub use session::{SessionController, SessionPhase, SessionState};
pub use timer::{
    format_duration_hms, format_duration_mmss, render_progress_bar, CountdownTimer,
};
pub use traits::{Ack, UserInterface};
