//! pomodo - a terminal Pomodoro interval timer
//!
//! This crate alternates focus and break phases on a fixed cycle policy,
//! driving a live terminal display from one-second ticks.

#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod tui;

pub use cli::args::{Cli, Commands, OutputFormat};
pub use crate::core::{
    Ack, CountdownTimer, SessionConfig, SessionController, SessionPhase, SessionState,
    UserInterface,
};
pub use error::PomodoError;
