//! Entry points shared by the CLI and embedders.
//!
//! These wrap the domain operations with the output shapes a transport layer
//! wants and the locate fallback policy.

use modfix_domain::{
    ModError, ModResult, Snapshot, compute_diagnostics, compute_quick_fixes, locate_tool_error,
};
use modfix_types::{
    CodeAction, Diagnostic, DiagnosticSeverity, FileHandle, PublishDiagnosticsParams, Range,
};
use tracing::warn;

/// Diagnostics to publish, one entry per file in identity order.
///
/// The manifest's entry is present (possibly empty) whenever tidy analysis ran.
pub fn run_diagnostics(snapshot: &dyn Snapshot) -> ModResult<Vec<PublishDiagnosticsParams>> {
    let reports = compute_diagnostics(snapshot)?;
    Ok(reports
        .into_iter()
        .map(|(identity, diagnostics)| {
            PublishDiagnosticsParams::new(identity.uri, diagnostics, None)
        })
        .collect())
}

pub fn run_quick_fixes(
    snapshot: &dyn Snapshot,
    diagnostics: &[Diagnostic],
) -> ModResult<Vec<CodeAction>> {
    compute_quick_fixes(snapshot, diagnostics)
}

/// Result of locating a go command error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Located {
    /// Anchored at a manifest statement.
    Anchored(Diagnostic),
    /// No statement matched; the diagnostic has the default range.
    Unanchored(Diagnostic),
}

impl Located {
    pub fn into_diagnostic(self) -> Diagnostic {
        match self {
            Located::Anchored(d) | Located::Unanchored(d) => d,
        }
    }

    pub fn is_anchored(&self) -> bool {
        matches!(self, Located::Anchored(_))
    }
}

/// Locate `raw_error` in `manifest`.
///
/// With `fallback_unanchored`, a [`ModError::NoDiagnostic`] outcome becomes an
/// unanchored error diagnostic carrying the raw text. Hard failures are
/// returned either way.
pub fn run_locate(
    snapshot: &dyn Snapshot,
    manifest: &FileHandle,
    raw_error: &str,
    fallback_unanchored: bool,
) -> ModResult<Located> {
    match locate_tool_error(snapshot, manifest, raw_error) {
        Ok(diagnostic) => Ok(Located::Anchored(diagnostic)),
        Err(err @ ModError::NoDiagnostic { .. }) if fallback_unanchored => {
            warn!(uri = %manifest.uri, "{err}; reporting without a position");
            Ok(Located::Unanchored(unanchored(raw_error)))
        }
        Err(err) => Err(err),
    }
}

/// Error diagnostic with the default range.
pub fn unanchored(raw_error: &str) -> Diagnostic {
    Diagnostic {
        severity: Some(DiagnosticSeverity::ERROR),
        ..Diagnostic::new_simple(Range::default(), raw_error.to_string())
    }
}
