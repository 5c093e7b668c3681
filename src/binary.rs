//! Supported binaries and how to ask them for their version.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::VersionCheckError;

/// Argument passed to every binary to make it print its version.
pub const DEFAULT_VERSION_ARG: &str = "--version";

/// A binary whose installed version can be checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum BinaryKind {
    Docker,
    Terraform,
    Packer,
}

impl BinaryKind {
    /// Every supported binary.
    pub const ALL: [BinaryKind; 3] = [Self::Docker, Self::Terraform, Self::Packer];

    /// Executable name looked up on PATH.
    pub fn executable(self) -> &'static str {
        match self {
            Self::Docker => "docker",
            Self::Terraform => "terraform",
            Self::Packer => "packer",
        }
    }

    /// Argument that makes the executable print its version.
    pub fn version_arg(self) -> &'static str {
        DEFAULT_VERSION_ARG
    }
}

impl fmt::Display for BinaryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.executable())
    }
}

impl FromStr for BinaryKind {
    type Err = VersionCheckError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.executable() == name)
            .ok_or_else(|| VersionCheckError::UnsupportedBinary {
                name: s.to_string(),
            })
    }
}
