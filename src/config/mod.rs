//! Checks file loading.
//!
//! A checks file lists several binaries to verify in one run:
//!
//! ```yaml
//! working_dir: .
//! timeout_secs: 30
//! checks:
//!   - binary: terraform
//!     minimum_version: "1.5.0"
//!   - binary: docker
//!     minimum_version: "20.10"
//!     working_dir: ./docker
//! ```
//!
//! - Schema definitions in [`schema`]
//! - File discovery and loading in [`loader`]
//!
//! # Example
//!
//! ```
//! use version_checker::config::load_checks;
//! use version_checker::BinaryKind;
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! let path = temp.path().join(".version-checks.yml");
//! fs::write(&path, "checks:\n  - binary: packer\n    minimum_version: \"1.9\"\n").unwrap();
//!
//! let config = load_checks(&path).unwrap();
//! assert_eq!(config.checks[0].binary, Some(BinaryKind::Packer));
//! ```

pub mod loader;
pub mod schema;

pub use loader::{find_checks_file, load_checks, parse_checks, resolve_checks, ChecksConfig};
pub use schema::{CheckEntry, ChecksFile};
