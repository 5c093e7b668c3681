//! Error types for version checks.
//!
//! This module defines [`VersionCheckError`], the error type returned by every
//! stage of a check, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Each pipeline stage (validate, fetch, extract, compare) has its own variants
//! - Errors that wrap a lower stage keep it as `source` so the chain is printable
//! - Use `anyhow::Error` (via `VersionCheckError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

use crate::shell::CommandError;

/// Core error type for version checks.
#[derive(Debug, Error)]
pub enum VersionCheckError {
    /// A required request field was left empty.
    #[error("set {field} in params")]
    MissingField { field: &'static str },

    /// A version string is not dotted-numeric.
    #[error("invalid version format found for {role}: {value:?}")]
    InvalidFormat { role: &'static str, value: String },

    /// Binary name is not one of the supported kinds.
    #[error("unsupported binary for checking versions: {name}")]
    UnsupportedBinary { name: String },

    /// Running the binary failed.
    #[error("failed to run shell command for binary {binary} with version arg {arg}: {source}")]
    ExecutionFailed {
        binary: String,
        arg: String,
        #[source]
        source: CommandError,
    },

    /// No dotted-numeric run in the given text.
    #[error("failed to find version using regex matcher")]
    NoVersionFound,

    /// The binary ran but its output carried no version.
    #[error("failed to extract version from shell command output {output:?}: {source}")]
    ExtractionFailed {
        output: String,
        #[source]
        source: Box<VersionCheckError>,
    },

    /// Installed version is below the required floor.
    #[error("found version mismatch: actual version {actual} is lower than minimum version {minimum}")]
    VersionTooLow { actual: String, minimum: String },

    /// Checks file not found at expected location.
    #[error("Checks file not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Checks file exists but could not be read.
    #[error("Failed to read checks file at {path}: {source}")]
    ConfigReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse checks file.
    #[error("Failed to parse checks file at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl VersionCheckError {
    /// Whether this error means the caller broke the closed set of binaries.
    ///
    /// Everything else is recoverable through the checked entry point.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::UnsupportedBinary { .. })
    }

    /// Process exit code the CLI uses when a check stops with this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::MissingField { .. }
            | Self::InvalidFormat { .. }
            | Self::UnsupportedBinary { .. }
            | Self::ConfigNotFound { .. }
            | Self::ConfigReadError { .. }
            | Self::ConfigParseError { .. } => 2,
            _ => 1,
        }
    }
}

/// Result type alias for version checks.
pub type Result<T> = std::result::Result<T, VersionCheckError>;
