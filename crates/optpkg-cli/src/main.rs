//! optpkg CLI
//!
//! Inspect optional package extensions declared in jar manifests, check
//! them against requirements, resolve archives and write library manifests.

mod cli;
mod commands;
mod error;

use clap::Parser;
use colored::Colorize;
use tracing::Level;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use cli::{Cli, Commands};
use error::{CliError, Result};

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;
    execute_command(cli.command)
}

fn init_tracing(verbose: bool) -> Result<()> {
    let builder = FmtSubscriber::builder().with_writer(std::io::stderr);
    let installed = if verbose {
        let subscriber = builder
            .with_max_level(Level::DEBUG)
            .with_target(true)
            .finish();
        tracing::subscriber::set_global_default(subscriber)
    } else {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
        let subscriber = builder.with_env_filter(filter).finish();
        tracing::subscriber::set_global_default(subscriber)
    };
    installed.map_err(|e| CliError::user(format!("failed to set tracing subscriber: {e}")))?;
    tracing::debug!("Verbose mode enabled");
    Ok(())
}

fn execute_command(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Display { files, json } => commands::run_display(&files, json),
        Commands::Available { file, requirement } => {
            commands::run_available(&file, &requirement)
        }
        Commands::Resolve { config } => commands::run_resolve(&config),
        Commands::Manifest {
            out,
            extension,
            depends,
            optional,
            created_by,
        } => commands::run_manifest(&out, &extension, &depends, &optional, created_by.as_deref()),
    }
}
