//! Check command implementation.
//!
//! `version-checker check` runs one check given on the command line, or every
//! check in the project's checks file.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Serialize;

use crate::binary::BinaryKind;
use crate::checker::{check_version_e, CheckVersionParams};
use crate::cli::args::CheckArgs;
use crate::config::loader::CHECKS_FILE_NAMES;
use crate::config::{find_checks_file, load_checks};
use crate::error::{Result, VersionCheckError};
use crate::shell::{CommandRunner, SystemRunner};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// Outcome of one check, as reported with `--json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckReport {
    pub binary: Option<BinaryKind>,
    pub minimum_version: String,
    pub working_dir: PathBuf,
    pub passed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CheckReport {
    fn new(params: &CheckVersionParams, outcome: &Result<String>) -> Self {
        let (actual_version, error) = match outcome {
            Ok(actual) => (Some(actual.clone()), None),
            Err(e @ VersionCheckError::VersionTooLow { actual, .. }) => {
                (Some(actual.clone()), Some(e.to_string()))
            }
            Err(e) => (None, Some(e.to_string())),
        };

        Self {
            binary: params.binary,
            minimum_version: params.minimum_version.clone(),
            working_dir: params.working_dir.clone(),
            passed: outcome.is_ok(),
            actual_version,
            error,
        }
    }
}

/// The check command implementation.
pub struct CheckCommand {
    project_root: PathBuf,
    args: CheckArgs,
}

impl CheckCommand {
    /// Create a new check command.
    pub fn new(project_root: &Path, args: CheckArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            args,
        }
    }

    /// Collect the requests to run and the timeout to run them with.
    ///
    /// A `--timeout` flag wins over the checks file. A relative `--dir` is
    /// taken relative to the project root.
    pub fn requests(&self) -> Result<(Vec<CheckVersionParams>, Option<Duration>)> {
        let flag_timeout = self.args.timeout.map(Duration::from_secs);

        if let Some(binary) = self.args.binary {
            let params = CheckVersionParams {
                binary: Some(binary),
                minimum_version: self.args.minimum.clone().unwrap_or_default(),
                working_dir: match &self.args.dir {
                    Some(dir) => self.project_root.join(dir),
                    None => self.project_root.clone(),
                },
            };
            return Ok((vec![params], flag_timeout));
        }

        let path = self
            .args
            .config
            .clone()
            .or_else(|| find_checks_file(&self.project_root))
            .ok_or_else(|| VersionCheckError::ConfigNotFound {
                path: self.project_root.join(CHECKS_FILE_NAMES[0]),
            })?;

        tracing::debug!("Loading checks from {}", path.display());
        let config = load_checks(&path)?;
        Ok((config.checks, flag_timeout.or(config.timeout)))
    }

    /// Run `checks` in order, reporting each one.
    pub fn run_checks<R: CommandRunner + ?Sized>(
        &self,
        runner: &R,
        checks: &[CheckVersionParams],
        ui: &mut dyn UserInterface,
    ) -> Result<CommandResult> {
        let mut reports = Vec::with_capacity(checks.len());
        let mut exit_code = 0;

        for params in checks {
            let label = params
                .binary
                .map(|b| b.to_string())
                .unwrap_or_else(|| "binary".to_string());
            let outcome = check_version_e(runner, params);

            if !self.args.json {
                match &outcome {
                    Ok(actual) => ui.success(&format!(
                        "{} {} satisfies minimum {}",
                        label, actual, params.minimum_version
                    )),
                    Err(e) => ui.error(&format!("{}: {}", label, e)),
                }
            }
            if let Err(e) = &outcome {
                exit_code = exit_code.max(e.exit_code());
            }

            reports.push(CheckReport::new(params, &outcome));
        }

        if self.args.json {
            let json = serde_json::to_string_pretty(&reports)
                .map_err(|e| VersionCheckError::Other(e.into()))?;
            ui.output(&json);
        }

        if exit_code == 0 {
            Ok(CommandResult::success())
        } else {
            Ok(CommandResult::failure(exit_code))
        }
    }
}

impl Command for CheckCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let (checks, timeout) = match self.requests() {
            Ok(found) => found,
            Err(e) if e.exit_code() == 2 => {
                ui.error(&e.to_string());
                return Ok(CommandResult::failure(2));
            }
            Err(e) => return Err(e),
        };

        if checks.is_empty() {
            ui.warning("No checks defined.");
            return Ok(CommandResult::success());
        }

        let runner = SystemRunner::new().with_timeout(timeout);
        self.run_checks(&runner, &checks, ui)
    }
}
