//! Error types for module validation.

use thiserror::Error;

/// A module path or version failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModuleError {
    #[error("malformed module path {path:?}: {source}")]
    Path {
        path: String,
        #[source]
        source: InvalidPathError,
    },

    #[error("{path}@{}: {source}", .source.version)]
    Version {
        path: String,
        #[source]
        source: InvalidVersionError,
    },
}

impl ModuleError {
    pub(crate) fn path(path: &str, source: InvalidPathError) -> Self {
        Self::Path {
            path: path.to_string(),
            source,
        }
    }

    pub(crate) fn version(path: &str, source: InvalidVersionError) -> Self {
        Self::Version {
            path: path.to_string(),
            source,
        }
    }
}

/// Reason a module path is not acceptable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{reason}")]
pub struct InvalidPathError {
    pub reason: String,
}

impl InvalidPathError {
    pub(crate) fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Reason a version is not acceptable for a module.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid version: {reason}")]
pub struct InvalidVersionError {
    pub version: String,
    pub reason: String,
}

impl InvalidVersionError {
    pub(crate) fn new(version: &str, reason: impl Into<String>) -> Self {
        Self {
            version: version.to_string(),
            reason: reason.into(),
        }
    }
}
