//! Checks file discovery and loading.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::binary::BinaryKind;
use crate::checker::CheckVersionParams;
use crate::config::schema::ChecksFile;
use crate::error::{Result, VersionCheckError};

/// File names looked for in the project directory, in priority order.
pub const CHECKS_FILE_NAMES: &[&str] = &[".version-checks.yml", ".version-checks.yaml"];

/// A checks file resolved into runnable requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChecksConfig {
    /// Timeout for each version command.
    pub timeout: Option<Duration>,

    /// Requests with working directories made absolute.
    pub checks: Vec<CheckVersionParams>,
}

/// Find the checks file in `project_root`.
pub fn find_checks_file(project_root: &Path) -> Option<PathBuf> {
    CHECKS_FILE_NAMES
        .iter()
        .map(|name| project_root.join(name))
        .find(|path| path.is_file())
}

/// Load a checks file and resolve it.
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigReadError` if it exists but can't be read.
/// Returns `ConfigParseError` if the YAML is invalid.
/// Returns `UnsupportedBinary` if a check names an unknown binary.
pub fn load_checks(path: &Path) -> Result<ChecksConfig> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            VersionCheckError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            VersionCheckError::ConfigReadError {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;

    let file = parse_checks(&content, path)?;
    let base = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    resolve_checks(file, base)
}

/// Parse YAML content into a [`ChecksFile`].
///
/// `source_path` is only used for error reporting.
pub fn parse_checks(content: &str, source_path: &Path) -> Result<ChecksFile> {
    serde_yaml::from_str(content).map_err(|e| VersionCheckError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Turn a parsed file into requests, resolving relative directories against `base`.
pub fn resolve_checks(file: ChecksFile, base: &Path) -> Result<ChecksConfig> {
    let default_dir = file.working_dir.clone().unwrap_or_default();

    let checks = file
        .checks
        .into_iter()
        .map(|entry| -> Result<CheckVersionParams> {
            let binary: BinaryKind = entry.binary.parse()?;
            let dir = entry.working_dir.unwrap_or_else(|| default_dir.clone());
            Ok(CheckVersionParams {
                binary: Some(binary),
                minimum_version: entry.minimum_version,
                working_dir: base.join(dir),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    tracing::debug!("Resolved {} checks relative to {}", checks.len(), base.display());

    Ok(ChecksConfig {
        timeout: file.timeout_secs.map(Duration::from_secs),
        checks,
    })
}
