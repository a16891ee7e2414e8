//! Configuration management for pomodo.
//!
//! This module handles loading and saving configuration from `~/.pomodo/`.

mod paths;
mod settings;

pub use paths::Paths;
pub use settings::{Config, SessionSettings, UiSettings};
