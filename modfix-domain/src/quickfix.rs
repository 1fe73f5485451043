use crate::diagnostics::resolve;
use crate::error::{ModError, ModResult};
use crate::ports::{Snapshot, TidyError};
use modfix_types::{
    AnalysisError, CodeAction, Diagnostic, SuggestedFix, TextDocumentEdit, document_edit,
    quick_fix,
};
use std::collections::HashMap;
use tracing::{debug, debug_span};

/// Code actions for the tidy fixes attached to `diags`.
///
/// Each diagnostic is joined to analysis errors by message, then confirmed
/// with [`same_diagnostic`]. Any client diagnostic is accepted; ones that were
/// not published from this analysis simply match nothing. Every suggested fix of every matched error becomes
/// one action, in diagnostic, error, fix order. Nothing is deduplicated.
///
/// A fix touching a file that cannot be resolved fails the whole call.
pub fn compute_quick_fixes(
    snapshot: &dyn Snapshot,
    diags: &[Diagnostic],
) -> ModResult<Vec<CodeAction>> {
    let Some(uri) = snapshot.manifest_uri() else {
        debug!("no manifest configured");
        return Ok(Vec::new());
    };
    let _span = debug_span!("mod.quick_fixes", uri = %uri, diagnostics = diags.len()).entered();

    let manifest = resolve(snapshot, &uri)?;
    let run = match snapshot.mod_tidy(&manifest) {
        Ok(run) => run,
        Err(TidyError::Unsupported) => {
            debug!("tidy unsupported; no quick fixes");
            return Ok(Vec::new());
        }
        Err(TidyError::Failed(err)) => return Err(ModError::Analysis(err)),
    };

    // Messages are not unique; the range and category check below disambiguates.
    let mut by_message: HashMap<&str, Vec<&AnalysisError>> = HashMap::new();
    for e in run.errors() {
        by_message.entry(e.message.as_str()).or_default().push(e);
    }

    let mut actions = Vec::new();
    for diag in diags {
        let Some(candidates) = by_message.get(diag.message.as_str()) else {
            continue;
        };
        for e in candidates.iter().filter(|e| same_diagnostic(diag, e)) {
            for fix in &e.suggested_fixes {
                let changes = document_changes(snapshot, fix)?;
                actions.push(quick_fix(&fix.title, diag.clone(), changes));
            }
        }
    }

    debug!(actions = actions.len(), "computed quick fixes");
    Ok(actions)
}

/// Whether `d` is the client's copy of the diagnostic published for `e`.
///
/// Severity is not compared. A missing source only matches an empty category.
pub fn same_diagnostic(d: &Diagnostic, e: &AnalysisError) -> bool {
    d.message == e.message
        && d.range == e.range
        && d.source.as_deref().unwrap_or("") == e.category
}

fn document_changes(
    snapshot: &dyn Snapshot,
    fix: &SuggestedFix,
) -> ModResult<Vec<TextDocumentEdit>> {
    fix.edits
        .iter()
        .map(|(uri, edits)| {
            let fh = resolve(snapshot, uri)?;
            Ok(document_edit(fh.uri, fh.version, edits))
        })
        .collect()
}
