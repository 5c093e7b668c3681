//! Checks file schema.
//!
//! These structs map directly to the YAML checks file. Binary names stay as
//! strings here so the loader can report unsupported ones by name.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root of a checks file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChecksFile {
    /// Default working directory for every check.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub working_dir: Option<PathBuf>,

    /// Seconds before a version command is killed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,

    /// Checks to run, in order.
    pub checks: Vec<CheckEntry>,
}

/// A single check in the file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CheckEntry {
    /// Binary name (`docker`, `terraform`, `packer`).
    pub binary: String,

    /// Lowest acceptable version.
    pub minimum_version: String,

    /// Overrides the file-level working directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub working_dir: Option<PathBuf>,
}
