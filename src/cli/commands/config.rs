//! Configuration command implementation.

use colored::Colorize;

use crate::cli::args::{ConfigCommands, OutputFormat};
use crate::config::{Config, Paths};
use crate::error::PomodoError;

/// Execute config subcommands.
///
/// # Errors
///
/// Returns an error if the config file cannot be read or written.
pub fn config(cmd: ConfigCommands, format: OutputFormat) -> Result<String, PomodoError> {
    match cmd {
        ConfigCommands::Show => show(format),
        ConfigCommands::Init { force } => init(force),
        ConfigCommands::Path => path(),
    }
}

/// Show the effective configuration.
fn show(format: OutputFormat) -> Result<String, PomodoError> {
    let paths = Paths::new()?;
    let config = Config::load_from_path(&paths.config_file)?;

    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&config)?),
        OutputFormat::Pretty => {
            let source = if paths.config_file.exists() {
                paths.config_file.display().to_string()
            } else {
                format!("{} (defaults)", paths.config_file.display())
            };

            let mut output = Vec::new();
            output.push("Session".bold().to_string());
            output.push(format!("  focus:                   {} min", config.session.focus_minutes));
            output.push(format!("  short break:             {} min", config.session.short_break_minutes));
            output.push(format!("  long break:              {} min", config.session.long_break_minutes));
            output.push(format!("  cycles before long break: {}", config.session.cycles_before_long_break));
            output.push(String::new());
            output.push("UI".bold().to_string());
            output.push(format!("  sound: {}", config.ui.sound));
            output.push(String::new());
            output.push(format!("Config file: {source}").dimmed().to_string());

            Ok(output.join("\n"))
        }
    }
}

/// Write a default config file.
fn init(force: bool) -> Result<String, PomodoError> {
    let paths = Paths::new()?;

    if paths.config_file.exists() && !force {
        return Err(PomodoError::Config(format!(
            "Config file already exists: {}\nUse --force to overwrite.",
            paths.config_file.display()
        )));
    }

    paths.ensure_dirs()?;
    Config::default().save_to_path(&paths.config_file)?;

    Ok(format!(
        "Wrote default configuration to {}",
        paths.config_file.display()
    ))
}

/// Print the config file path.
fn path() -> Result<String, PomodoError> {
    let paths = Paths::new()?;
    Ok(paths.config_file.display().to_string())
}
