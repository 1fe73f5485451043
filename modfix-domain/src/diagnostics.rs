use crate::error::{ModError, ModResult};
use crate::ports::{Snapshot, TidyError};
use modfix_types::{AnalysisError, Diagnostic, DiagnosticSeverity, FileHandle, FileIdentity};
use std::collections::BTreeMap;
use tracing::{debug, debug_span};
use url::Url;

/// Diagnostics grouped by the file they are reported against.
///
/// Keyed by identity so a stale set for an older version of a file never
/// overwrites a newer one. Lists keep analysis order.
pub type DiagnosticSet = BTreeMap<FileIdentity, Vec<Diagnostic>>;

/// Convert the manifest's tidy analysis into per-file diagnostics.
///
/// The manifest's own identity is always present (possibly with an empty list)
/// so callers can clear what they published before. No manifest, or a
/// toolchain that cannot run tidy, yields an empty set.
pub fn compute_diagnostics(snapshot: &dyn Snapshot) -> ModResult<DiagnosticSet> {
    let Some(uri) = snapshot.manifest_uri() else {
        debug!("no manifest configured");
        return Ok(DiagnosticSet::new());
    };
    let _span = debug_span!("mod.diagnostics", uri = %uri).entered();

    let manifest = resolve(snapshot, &uri)?;
    let run = match snapshot.mod_tidy(&manifest) {
        Ok(run) => run,
        Err(TidyError::Unsupported) => {
            debug!("tidy unsupported; skipping manifest diagnostics");
            return Ok(DiagnosticSet::new());
        }
        Err(TidyError::Failed(err)) => return Err(ModError::Analysis(err)),
    };

    let mut reports = DiagnosticSet::new();
    reports.insert(manifest.identity(), Vec::new());
    for e in run.errors() {
        let fh = resolve(snapshot, &e.uri)?;
        reports
            .entry(fh.identity())
            .or_default()
            .push(to_diagnostic(e));
    }

    debug!(
        files = reports.len(),
        errors = run.errors().len(),
        "computed manifest diagnostics"
    );
    Ok(reports)
}

/// Diagnostic for one analysis error. Only syntax errors are errors.
pub fn to_diagnostic(e: &AnalysisError) -> Diagnostic {
    let severity = if e.is_syntax() {
        DiagnosticSeverity::ERROR
    } else {
        DiagnosticSeverity::WARNING
    };
    Diagnostic {
        severity: Some(severity),
        source: Some(e.category.clone()),
        ..Diagnostic::new_simple(e.range, e.message.clone())
    }
}

pub(crate) fn resolve(snapshot: &dyn Snapshot, uri: &Url) -> ModResult<FileHandle> {
    snapshot
        .get_file(uri)
        .map_err(|source| ModError::ResolveFile {
            uri: uri.clone(),
            source,
        })
}
