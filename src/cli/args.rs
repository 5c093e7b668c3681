//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::binary::BinaryKind;

/// version-checker - Minimum-version checks for infrastructure tooling.
#[derive(Debug, Parser)]
#[command(name = "version-checker")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Directory to run in and look for a checks file (overrides current directory)
    #[arg(short, long, global = true)]
    pub project: Option<PathBuf>,

    /// Only print errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Check installed binaries against minimum versions
    Check(CheckArgs),

    /// Print the first version found in some text
    Extract(ExtractArgs),

    /// Compare two versions
    Compare(CompareArgs),
}

/// Arguments for the `check` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct CheckArgs {
    /// Binary to check (instead of a checks file)
    #[arg(short, long, value_enum, requires = "minimum", conflicts_with = "config")]
    pub binary: Option<BinaryKind>,

    /// Lowest acceptable version
    #[arg(short, long, requires = "binary")]
    pub minimum: Option<String>,

    /// Directory to run the binary in (defaults to the project directory)
    #[arg(short, long, requires = "binary")]
    pub dir: Option<PathBuf>,

    /// Checks file (defaults to .version-checks.yml in the project directory)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Seconds before a version command is killed
    #[arg(long, value_name = "SECS", env = "VERSION_CHECKER_TIMEOUT")]
    pub timeout: Option<u64>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `extract` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ExtractArgs {
    /// Text to search (reads stdin when omitted)
    pub text: Option<String>,
}

/// Arguments for the `compare` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct CompareArgs {
    /// Version that was found
    pub actual: String,

    /// Lowest acceptable version
    pub minimum: String,
}
