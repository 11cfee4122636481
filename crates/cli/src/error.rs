//! CLI exit codes for scripting and automation.
//!
//! Responsibilities:
//! - Define structured exit codes that scripts can use to distinguish error types.
//! - Map configuration library errors to exit codes.
//!
//! Does NOT handle:
//! - Error message formatting (handled by anyhow Display).
//!
//! Invariants:
//! - A parse failure reached through root loading exits with the parse code,
//!   not the root validation code.

use multiroot_config::{LoadError, ParseError, WriteError};

/// Structured exit codes for multiroot-cli.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Success - command completed successfully.
    Success = 0,

    /// General error - unhandled or generic failure.
    GeneralError = 1,

    /// The config file could not be read or is not valid syntax.
    ParseError = 2,

    /// A section is not a loadable root (bad spec, key or certificate).
    RootValidationError = 3,

    /// The output file could not be written.
    WriteError = 4,
}

impl ExitCode {
    /// Convert the exit code to an i32 for use with std::process::exit().
    pub const fn as_i32(self) -> i32 {
        self as u8 as i32
    }
}

impl From<&LoadError> for ExitCode {
    fn from(err: &LoadError) -> Self {
        match err {
            LoadError::Parse(_) => ExitCode::ParseError,
            _ => ExitCode::RootValidationError,
        }
    }
}

/// Extension trait for anyhow::Error to extract exit codes.
pub trait ExitCodeExt {
    /// Returns ExitCode::GeneralError if no library error is in the chain.
    fn exit_code(&self) -> ExitCode;
}

impl ExitCodeExt for anyhow::Error {
    fn exit_code(&self) -> ExitCode {
        for cause in self.chain() {
            if let Some(err) = cause.downcast_ref::<LoadError>() {
                return ExitCode::from(err);
            }
            if cause.is::<ParseError>() {
                return ExitCode::ParseError;
            }
            if cause.is::<WriteError>() {
                return ExitCode::WriteError;
            }
        }
        ExitCode::GeneralError
    }
}
