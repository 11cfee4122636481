//! Command dispatch logic.
//!
//! Responsibilities:
//! - Route parsed CLI arguments to the matching command handler.
//!
//! Does NOT handle:
//! - CLI structure definitions (see `args` module).
//! - Exit code selection (see `error` module).

use anyhow::Result;

use crate::args::{Cli, Commands};
use crate::commands;

/// Dispatch CLI commands to their respective handlers.
pub(crate) fn run_command(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Check {
            file,
            base_dir,
            skip_key_match,
        } => commands::check::run(file, base_dir, skip_key_match, cli.output),
        Commands::Sections { file } => commands::sections::run(&file, cli.output),
        Commands::Normalize { input, destination } => {
            commands::normalize::run(&input, &destination)
        }
    }
}
