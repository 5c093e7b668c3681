//! The validate → fetch → extract → compare pipeline.
//!
//! [`check_version_e`] is the checked entry point: it returns the installed
//! version or the first error. [`check_version`] wraps it and fails the
//! enclosing test through a [`FailureReporter`].
//!
//! # Example
//!
//! ```no_run
//! use version_checker::{check_version_e, BinaryKind, CheckVersionParams, SystemRunner};
//!
//! let params = CheckVersionParams::new(BinaryKind::Terraform, "1.5.0", ".");
//! match check_version_e(&SystemRunner::new(), &params) {
//!     Ok(found) => println!("terraform {found} is new enough"),
//!     Err(e) => eprintln!("{e}"),
//! }
//! ```

use std::path::PathBuf;

use crate::binary::BinaryKind;
use crate::error::{Result, VersionCheckError};
use crate::reporter::FailureReporter;
use crate::shell::{CommandRunner, ShellCommand, SystemRunner};
use crate::version::{check_minimum_version, extract_version, Version};

/// What to check: which binary, the lowest acceptable version, and where to run it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckVersionParams {
    /// Binary to check. `None` means the caller never set one.
    pub binary: Option<BinaryKind>,

    /// Lowest acceptable version, dotted numeric.
    pub minimum_version: String,

    /// Directory the binary is run in.
    pub working_dir: PathBuf,
}

impl CheckVersionParams {
    /// Build a fully populated request.
    pub fn new(
        binary: BinaryKind,
        minimum_version: impl Into<String>,
        working_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            binary: Some(binary),
            minimum_version: minimum_version.into(),
            working_dir: working_dir.into(),
        }
    }
}

/// A request that passed [`validate_params`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedCheck {
    pub binary: BinaryKind,
    pub minimum_version: String,
    pub working_dir: PathBuf,
}

/// Check that every field is set and the minimum version is well formed.
pub fn validate_params(params: &CheckVersionParams) -> Result<ValidatedCheck> {
    if params.minimum_version.is_empty() {
        return Err(VersionCheckError::MissingField {
            field: "minimum_version",
        });
    }
    if params.working_dir.as_os_str().is_empty() {
        return Err(VersionCheckError::MissingField {
            field: "working_dir",
        });
    }
    let binary = params
        .binary
        .ok_or(VersionCheckError::MissingField { field: "binary" })?;

    if params.minimum_version.parse::<Version>().is_err() {
        return Err(VersionCheckError::InvalidFormat {
            role: "minimum version",
            value: params.minimum_version.clone(),
        });
    }

    Ok(ValidatedCheck {
        binary,
        minimum_version: params.minimum_version.clone(),
        working_dir: params.working_dir.clone(),
    })
}

/// Run the binary with its version flag and extract the version it reports.
pub fn fetch_version<R: CommandRunner + ?Sized>(
    runner: &R,
    check: &ValidatedCheck,
) -> Result<String> {
    let binary = check.binary.executable();
    let arg = check.binary.version_arg();

    let command = ShellCommand::new(binary)
        .arg(arg)
        .working_dir(&check.working_dir);

    tracing::debug!(
        "Running '{}' in {}",
        command.display(),
        check.working_dir.display()
    );

    let output = runner
        .run(&command)
        .map_err(|source| VersionCheckError::ExecutionFailed {
            binary: binary.to_string(),
            arg: arg.to_string(),
            source,
        })?;

    match extract_version(&output) {
        Ok(version) => Ok(version.to_string()),
        Err(e) => Err(VersionCheckError::ExtractionFailed {
            output,
            source: Box::new(e),
        }),
    }
}

/// Check that the installed binary is at least the requested version.
///
/// Returns the version the binary reported.
pub fn check_version_e<R: CommandRunner + ?Sized>(
    runner: &R,
    params: &CheckVersionParams,
) -> Result<String> {
    let check = validate_params(params)?;
    let actual = fetch_version(runner, &check)?;

    tracing::debug!(
        "{} reports {}, minimum {}",
        check.binary,
        actual,
        check.minimum_version
    );

    if let Err(e) = check_minimum_version(&actual, &check.minimum_version) {
        tracing::warn!("{} version check failed: {}", check.binary, e);
        return Err(e);
    }

    Ok(actual)
}

/// Like [`check_version_e`], but fails the test instead of returning an error.
pub fn check_version<F, R>(reporter: &F, runner: &R, params: &CheckVersionParams)
where
    F: FailureReporter + ?Sized,
    R: CommandRunner + ?Sized,
{
    if let Err(e) = check_version_e(runner, params) {
        reporter.fail_now(&e.to_string());
    }
}

/// Check the binary installed on this machine.
pub fn check_installed_version(params: &CheckVersionParams) -> Result<String> {
    check_version_e(&SystemRunner::new(), params)
}
