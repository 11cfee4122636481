//! CLI argument definitions and parsing.
//!
//! Responsibilities:
//! - Define the CLI structure using clap derive macros.
//! - Bind environment variables to their flags.
//!
//! Non-responsibilities:
//! - Does not execute commands (see `dispatch` module).

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "multiroot-cli")]
#[command(about = "Inspect and validate multi-root CA configuration", long_about = None)]
#[command(version)]
#[command(
    after_help = "Examples:\n  multiroot-cli check /etc/multiroot/roots.conf\n  multiroot-cli check --base-dir /etc/multiroot --output json roots.conf\n  multiroot-cli sections roots.conf\n  multiroot-cli normalize roots.conf roots.normalized.conf\n"
)]
pub struct Cli {
    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    pub output: OutputFormat,

    /// Log line format on stderr (filter with RUST_LOG)
    #[arg(
        long,
        global = true,
        value_enum,
        env = "MULTIROOT_LOG_FORMAT",
        default_value_t = LogFormat::Text
    )]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Load a roots file and summarize every root it declares
    Check {
        /// Roots file (defaults to the platform config directory)
        #[arg(env = "MULTIROOT_ROOTS", value_name = "FILE")]
        file: Option<PathBuf>,

        /// Resolve relative key and certificate paths against this directory
        #[arg(long, value_name = "DIR")]
        base_dir: Option<PathBuf>,

        /// Do not require each private key to match its certificate
        #[arg(long)]
        skip_key_match: bool,
    },

    /// List the sections of a config file with their key counts
    Sections {
        /// Config file to read
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Parse a config file and write it back in canonical form
    Normalize {
        /// Config file to read
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Destination file (overwritten)
        #[arg(value_name = "OUTPUT")]
        destination: PathBuf,
    },
}

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}
