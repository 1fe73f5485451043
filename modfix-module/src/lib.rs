//! Module path and version validation.
//!
//! A `module@version` token pulled out of free text is only trusted once
//! [`check`] accepts it: the path must be a valid module path, the version a
//! valid semantic version, and the two must agree on the major version.

mod error;
mod path;
pub mod semver;

pub use error::{InvalidPathError, InvalidVersionError, ModuleError};
pub use path::{check_path, check_path_major, split_path_version};

use serde::{Deserialize, Serialize};
use std::fmt;

/// A module path paired with a version.
///
/// The zero value (both fields empty) means "no module".
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ModuleVersion {
    pub path: String,

    /// Empty for an unversioned reference (e.g. a local replacement).
    pub version: String,
}

impl ModuleVersion {
    pub fn new(path: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            version: version.into(),
        }
    }

    pub fn is_zero(&self) -> bool {
        self.path.is_empty() && self.version.is_empty()
    }
}

impl fmt::Display for ModuleVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.version.is_empty() {
            f.write_str(&self.path)
        } else {
            write!(f, "{}@{}", self.path, self.version)
        }
    }
}

/// Check that `path` is a valid module path and `version` a valid version for it.
pub fn check(path: &str, version: &str) -> Result<(), ModuleError> {
    check_path(path).map_err(|err| ModuleError::path(path, err))?;

    if !semver::is_valid(version) {
        return Err(ModuleError::version(
            path,
            InvalidVersionError::new(version, "not a semantic version"),
        ));
    }

    let (_, path_major) = split_path_version(path).unwrap_or((path, ""));
    check_path_major(version, path_major).map_err(|err| ModuleError::version(path, err))
}
