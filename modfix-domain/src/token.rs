//! Pulling a `module@version` token out of go command error text.
//!
//! go command errors have no structured position, but most name the module
//! they are about, e.g.
//!
//! ```text
//! go: example.com@v1.2.2: reading example.com/@v/v1.2.2.mod: no such file or directory
//! go: github.com/cockroachdb/apd/v2@v2.0.72: reading github.com/cockroachdb/apd/go.mod at revision v2.0.72: unknown revision v2.0.72
//! ```
//!
//! Extraction is a small pipeline: split the text into colon segments, offer
//! each segment to the matchers in order, and accept the first candidate that
//! passes module validation.

use modfix_module::{ModuleVersion, check};
use regex::Regex;
use std::sync::LazyLock;
use tracing::trace;

static MODULE_AT_VERSION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?P<module>.*)@(?P<version>.*)").expect("module@version pattern compiles")
});

/// Proposes a module version for one segment of error text.
pub trait SegmentMatcher: Send + Sync {
    fn candidate(&self, segment: &str) -> Option<ModuleVersion>;
}

/// `<module>@<version>`, split at the last `@` of the segment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ModuleAtVersion;

impl SegmentMatcher for ModuleAtVersion {
    fn candidate(&self, segment: &str) -> Option<ModuleVersion> {
        let caps = MODULE_AT_VERSION.captures(segment)?;
        Some(ModuleVersion::new(&caps["module"], &caps["version"]))
    }
}

/// Ordered matchers plus validation.
pub struct TokenExtractor {
    matchers: Vec<Box<dyn SegmentMatcher>>,
}

impl Default for TokenExtractor {
    fn default() -> Self {
        Self::new(vec![Box::new(ModuleAtVersion)])
    }
}

impl TokenExtractor {
    pub fn new(matchers: Vec<Box<dyn SegmentMatcher>>) -> Self {
        Self { matchers }
    }

    /// First valid module version in `text`, or the zero value.
    ///
    /// Later segments are ignored once one yields a valid candidate.
    pub fn extract(&self, text: &str) -> ModuleVersion {
        for segment in colon_segments(text) {
            for matcher in &self.matchers {
                let Some(candidate) = matcher.candidate(segment) else {
                    continue;
                };
                match check(&candidate.path, &candidate.version) {
                    Ok(()) => return candidate,
                    Err(err) => trace!(segment, %err, "rejected module version candidate"),
                }
            }
        }
        ModuleVersion::default()
    }
}

/// Colon-separated segments of `text`, trimmed.
pub fn colon_segments(text: &str) -> impl Iterator<Item = &str> {
    text.split(':').map(str::trim)
}

/// [`TokenExtractor::extract`] with the default matchers.
pub fn extract_module_version(text: &str) -> ModuleVersion {
    TokenExtractor::default().extract(text)
}
