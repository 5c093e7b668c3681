//! Version extraction and minimum-version comparison.
//!
//! Versions are dotted sequences of non-negative integers (`1`, `1.2`,
//! `1.2.3`). They are compared component by component; when one version is
//! a strict prefix of the other, the shorter one sorts first, so `1.0` is
//! lower than `1.0.10` and `1.2.4` satisfies a minimum of `1.2`.
//!
//! # Example
//!
//! ```
//! use version_checker::version::{check_minimum_version, extract_version};
//!
//! let found = extract_version("Terraform v1.5.7\non linux_amd64").unwrap();
//! assert_eq!(found, "1.5.7");
//! assert!(check_minimum_version(found, "1.5").is_ok());
//! assert!(check_minimum_version(found, "1.6.0").is_err());
//! ```

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{Result, VersionCheckError};

/// Matches a version inside free-form command output: at least two numeric
/// components. ASCII digits only.
static VERSION_IN_OUTPUT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+(\.[0-9]+)+").unwrap());

/// A parsed dotted-numeric version.
///
/// Ordering is lexicographic over the components: a strict prefix sorts
/// before any of its extensions.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    segments: Vec<u64>,
}

/// Returned when a string is not a dotted-numeric version.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("not a dotted numeric version: {0:?}")]
pub struct ParseVersionError(pub String);

impl Version {
    /// Numeric components in order.
    pub fn segments(&self) -> &[u64] {
        &self.segments
    }
}

impl FromStr for Version {
    type Err = ParseVersionError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let segments = s
            .split('.')
            .map(|segment| {
                // u64::from_str also accepts a leading '+'
                if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
                    return None;
                }
                segment.parse::<u64>().ok()
            })
            .collect::<Option<Vec<_>>>()
            .ok_or_else(|| ParseVersionError(s.to_string()))?;

        Ok(Self { segments })
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for segment in &self.segments {
            if !first {
                f.write_str(".")?;
            }
            write!(f, "{}", segment)?;
            first = false;
        }
        Ok(())
    }
}

/// Extract the first dotted-numeric version from command output.
///
/// The match is returned verbatim; prefixes such as `v` are not part of it.
pub fn extract_version(output: &str) -> Result<&str> {
    VERSION_IN_OUTPUT
        .find(output)
        .map(|m| m.as_str())
        .ok_or(VersionCheckError::NoVersionFound)
}

/// Check that `actual` is greater than or equal to `minimum`.
///
/// Returns [`VersionCheckError::InvalidFormat`] when either side does not
/// parse and [`VersionCheckError::VersionTooLow`] when the floor is not met.
///
/// ```text
/// check_minimum_version("1.0.31", "1.0.27")  // ok
/// check_minimum_version("1.0.10", "1.0.27")  // too low
/// check_minimum_version("1.0", "1.0.10")     // too low
/// ```
pub fn check_minimum_version(actual: &str, minimum: &str) -> Result<()> {
    let actual_version: Version = actual.parse().map_err(|_| VersionCheckError::InvalidFormat {
        role: "actual version",
        value: actual.to_string(),
    })?;
    let minimum_version: Version = minimum.parse().map_err(|_| VersionCheckError::InvalidFormat {
        role: "minimum version",
        value: minimum.to_string(),
    })?;

    if actual_version < minimum_version {
        return Err(VersionCheckError::VersionTooLow {
            actual: actual.to_string(),
            minimum: minimum.to_string(),
        });
    }

    Ok(())
}
