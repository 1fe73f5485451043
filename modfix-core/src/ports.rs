//! Port traits for what the core does not do itself.

use modfix_domain::TidyError;
use modfix_types::{FileHandle, TidyRun};

/// Produces a tidy analysis for one version of a manifest.
///
/// Called at most once per distinct manifest content when wrapped in
/// [`MemoizedTidy`](crate::tidy::MemoizedTidy).
pub trait TidySource: Send + Sync {
    fn tidy(&self, manifest: &FileHandle, content: &str) -> Result<TidyRun, TidyError>;
}
