use modfix_manifest::ParsedManifest;
use modfix_types::{FileHandle, TidyRun};
use std::sync::Arc;
use thiserror::Error;
use url::Url;

/// Point-in-time view of a workspace.
///
/// Everything the domain reads comes through this trait so it can be tested
/// against an in-memory implementation. Implementations own caching; the
/// domain never holds on to what it gets back beyond one call.
pub trait Snapshot {
    /// The manifest of the workspace, if one is configured.
    fn manifest_uri(&self) -> Option<Url>;

    fn get_file(&self, uri: &Url) -> anyhow::Result<FileHandle>;

    /// Memoized tidy analysis of `manifest`. May block on an in-flight run.
    fn mod_tidy(&self, manifest: &FileHandle) -> Result<Arc<TidyRun>, TidyError>;

    /// Parsed syntax and position mapper for `file`.
    fn parse_manifest(&self, file: &FileHandle) -> anyhow::Result<Arc<ParsedManifest>>;
}

/// Failure to obtain a tidy run.
#[derive(Debug, Error)]
pub enum TidyError {
    /// The toolchain cannot run tidy analysis against a temporary manifest.
    /// Not a defect: callers treat the analysis as inapplicable.
    #[error("tidy analysis is not supported by this toolchain")]
    Unsupported,

    #[error(transparent)]
    Failed(#[from] anyhow::Error),
}

impl TidyError {
    pub fn is_unsupported(&self) -> bool {
        matches!(self, TidyError::Unsupported)
    }
}
