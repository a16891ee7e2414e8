//! Command implementations for pomodo.
//!
//! This module contains the implementation of all CLI commands.

mod completions;
mod config;
mod start;

pub use completions::completions;
pub use config::config;
pub use start::start;
