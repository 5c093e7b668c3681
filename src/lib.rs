//! version-checker - Minimum-version checks for infrastructure tooling.
//!
//! Runs a binary such as `terraform` or `docker` with `--version`, pulls the
//! first dotted version out of its output and fails when it is older than a
//! required minimum. Meant to be called from infrastructure tests.
//!
//! # Modules
//!
//! - [`binary`] - Supported binaries and their version flags
//! - [`checker`] - The validate, fetch, extract and compare pipeline
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Checks file loading
//! - [`error`] - Error types and result aliases
//! - [`reporter`] - Failing the enclosing test
//! - [`shell`] - Running executables
//! - [`ui`] - Terminal output
//! - [`version`] - Version extraction and comparison
//!
//! # Example
//!
//! ```
//! use version_checker::version::check_minimum_version;
//!
//! assert!(check_minimum_version("1.0.27", "1.0.10").is_ok());
//! assert!(check_minimum_version("1.0", "1.0.10").is_err());
//! ```
//!
//! In a test, the unchecked form fails the test directly:
//!
//! ```no_run
//! use version_checker::{check_version, BinaryKind, CheckVersionParams, PanicReporter, SystemRunner};
//!
//! let params = CheckVersionParams::new(BinaryKind::Docker, "20.10", ".");
//! check_version(&PanicReporter, &SystemRunner::new(), &params);
//! ```

pub mod binary;
pub mod checker;
pub mod cli;
pub mod config;
pub mod error;
pub mod reporter;
pub mod shell;
pub mod ui;
pub mod version;

pub use binary::BinaryKind;
pub use checker::{
    check_installed_version, check_version, check_version_e, fetch_version, validate_params,
    CheckVersionParams, ValidatedCheck,
};
pub use error::{Result, VersionCheckError};
pub use reporter::{FailureReporter, PanicReporter, RecordingReporter};
pub use shell::{CommandRunner, ShellCommand, SystemRunner};
pub use version::{check_minimum_version, extract_version, Version};
