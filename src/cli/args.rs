use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[command(name = "pomodo")]
#[command(about = "A terminal Pomodoro interval timer")]
#[command(long_about = "pomodo - a terminal Pomodoro timer

Alternates focus and break phases on a fixed cycle policy and drives a
live terminal display from one-second ticks. After a configurable number
of focus phases, the short break is replaced by a long one.

QUICK START:
  pomodo start                Run a session with your configured durations
  pomodo start --focus 50     Override the focus length for this run
  pomodo config init          Write a default config file to ~/.pomodo/
  pomodo config show          Show the effective configuration

SESSION KEYS:
  ENTER  start the session        P  pause/resume
  R      reset to a fresh focus   Q  quit
  SPACE  acknowledge a completed phase

For more information on a specific command, run:
  pomodo <command> --help")]
#[command(version, propagate_version = true)]
pub struct Cli {
    /// Output format for command results
    ///
    /// Use 'pretty' for human-readable colored output (default),
    /// or 'json' for machine-readable output suitable for scripting.
    #[arg(short, long, value_enum, default_value = "pretty", global = true)]
    pub output: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for command results.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable colored output.
    #[default]
    Pretty,
    /// Machine-readable JSON output.
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start an interactive timer session
    ///
    /// Runs the focus/break cycle in the terminal until you quit.
    /// Durations come from ~/.pomodo/config.yaml; any flag given here
    /// overrides the configured value for this run only.
    ///
    /// # Examples
    ///
    ///   pomodo start
    ///   pomodo start --focus 50 --short-break 10
    ///   pomodo start --cycles 2
    ///   pomodo start --no-sound
    ///
    /// # Keys
    ///
    ///   ENTER starts, P pauses/resumes, R resets, Q quits.
    ///   When a phase completes, SPACE continues and Q quits.
    #[command(alias = "s")]
    Start(StartArgs),

    /// Manage configuration
    ///
    /// Shows, initializes, or locates the pomodo configuration file.
    ///
    /// # Examples
    ///
    ///   pomodo config show
    ///   pomodo config show -o json
    ///   pomodo config init
    ///   pomodo config path
    #[command(alias = "cfg")]
    Config(ConfigArgs),

    /// Generate shell completions
    ///
    /// Generates a completion script for the given shell.
    ///
    /// # Examples
    ///
    ///   pomodo completions zsh
    ///   pomodo completions bash > /usr/local/etc/bash_completion.d/pomodo
    Completions {
        /// Shell to generate completions for (bash, zsh, fish, powershell, elvish)
        shell: String,
    },
}

/// Arguments for the start command.
#[derive(Args)]
pub struct StartArgs {
    /// Focus phase length in minutes
    #[arg(long, short = 'f')]
    pub focus: Option<u32>,

    /// Short break length in minutes
    #[arg(long)]
    pub short_break: Option<u32>,

    /// Long break length in minutes
    #[arg(long)]
    pub long_break: Option<u32>,

    /// Completed focus phases before a long break
    #[arg(long, short = 'c')]
    pub cycles: Option<u32>,

    /// Disable the completion bell
    #[arg(long)]
    pub no_sound: bool,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

/// Configuration subcommands.
#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the effective configuration
    Show,

    /// Write a default config file
    Init {
        /// Overwrite an existing config file
        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Print the config file path
    Path,
}
