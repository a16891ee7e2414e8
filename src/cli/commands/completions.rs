//! Shell completions generation.
//!
//! Generates shell completion scripts for bash, zsh, fish, and PowerShell.

use clap::CommandFactory;
use clap_complete::Shell;

use crate::cli::args::Cli;
use crate::error::PomodoError;

/// Execute the completions command.
///
/// # Errors
///
/// Returns `PomodoError::InvalidArgument` if the shell name is unknown.
pub fn completions(shell: &str) -> Result<String, PomodoError> {
    let shell = shell_from_str(shell)
        .ok_or_else(|| PomodoError::InvalidArgument(format!("unknown shell: {shell}")))?;
    generate_completions(shell)
}

/// Generate shell completions for the specified shell.
///
/// # Errors
///
/// Returns an error if the generated script is not valid UTF-8.
pub fn generate_completions(shell: Shell) -> Result<String, PomodoError> {
    let mut cmd = Cli::command();
    let mut buf = Vec::new();
    clap_complete::generate(shell, &mut cmd, "pomodo", &mut buf);
    String::from_utf8(buf).map_err(|e| PomodoError::Config(format!("UTF-8 error: {e}")))
}

/// Get shell from string name.
#[must_use]
pub fn shell_from_str(s: &str) -> Option<Shell> {
    match s.to_lowercase().as_str() {
        "bash" => Some(Shell::Bash),
        "zsh" => Some(Shell::Zsh),
        "fish" => Some(Shell::Fish),
        "powershell" | "ps" | "pwsh" => Some(Shell::PowerShell),
        "elvish" => Some(Shell::Elvish),
        _ => None,
    }
}
