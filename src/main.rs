use anyhow::Result;
use clap::Parser;
use colored::Colorize;

use pomodo::cli::args::{Cli, Commands};
use pomodo::cli::commands;
use pomodo::error::PomodoError;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), PomodoError> {
    let cli = Cli::parse();
    let format = cli.output;

    let output = match cli.command {
        Commands::Start(args) => commands::start(args)?,
        Commands::Config(args) => commands::config(args.command, format)?,
        Commands::Completions { shell } => commands::completions(&shell)?,
    };

    if !output.is_empty() {
        println!("{}", output);
    }
    Ok(())
}
