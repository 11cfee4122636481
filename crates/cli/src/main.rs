//! Multiroot CLI - inspect and validate multi-root CA configuration.
//!
//! Responsibilities:
//! - Parse command-line arguments and environment variables.
//! - Initialize logging to stderr.
//! - Map command failures to structured exit codes.
//!
//! Does NOT handle:
//! - Parsing config files or loading roots (see `multiroot-config`).
//!
//! Invariants:
//! - Logs go to stderr; stdout carries only command output.

mod args;
mod commands;
mod dispatch;
mod error;
mod formatters;

use args::{Cli, LogFormat};
use clap::Parser;
use dispatch::run_command;
use error::{ExitCode, ExitCodeExt};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    match cli.log_format {
        LogFormat::Text => tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_writer(std::io::stderr))
            .init(),
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init(),
    }

    let exit_code = match run_command(cli) {
        Ok(()) => ExitCode::Success,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            e.exit_code()
        }
    };

    std::process::exit(exit_code.as_i32());
}
