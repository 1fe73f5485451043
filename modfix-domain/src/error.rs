//! Error types for modfix-domain.
//!
//! Operations have three outcomes that must stay distinct:
//! - Inapplicable (no manifest, tidy unsupported): an empty `Ok`, never an error.
//! - No derivable result (exit code 2): the locator found nothing to anchor to.
//! - Hard failures (exit code 1): file resolution, analysis, parsing or
//!   position mapping failed.

use modfix_manifest::PositionError;
use thiserror::Error;
use url::Url;

#[derive(Debug, Error)]
pub enum ModError {
    /// No manifest statement matches the error. Callers fall back to an
    /// unanchored diagnostic.
    #[error("no diagnostics for {message}")]
    NoDiagnostic { message: String },

    #[error("resolve file {uri}: {source}")]
    ResolveFile {
        uri: Url,
        #[source]
        source: anyhow::Error,
    },

    #[error("tidy analysis failed: {0}")]
    Analysis(#[source] anyhow::Error),

    #[error("parse manifest {uri}: {source}")]
    Parse {
        uri: Url,
        #[source]
        source: anyhow::Error,
    },

    #[error("map position: {0}")]
    Position(#[from] PositionError),
}

impl ModError {
    /// Returns true for the expected "nothing to anchor to" outcome.
    pub fn is_no_diagnostic(&self) -> bool {
        matches!(self, ModError::NoDiagnostic { .. })
    }

    /// Returns the recommended exit code for this error.
    pub fn exit_code(&self) -> u8 {
        if self.is_no_diagnostic() { 2 } else { 1 }
    }
}

pub type ModResult<T> = Result<T, ModError>;
