use crate::error::{ModError, ModResult};
use crate::ports::Snapshot;
use crate::range::range_from_span;
use crate::token::extract_module_version;
use modfix_manifest::{ModFile, Statement};
use modfix_module::ModuleVersion;
use modfix_types::{Diagnostic, DiagnosticSeverity, FileHandle};
use tracing::{debug, debug_span};

/// Anchor a go command error at the manifest statement it is about.
///
/// The error text is scanned for a valid `module@version` token, which is then
/// looked up among `require`, `exclude` and `replace` statements, in that order.
/// The diagnostic carries the raw error text, no source, and spans the whole
/// statement.
///
/// Returns [`ModError::NoDiagnostic`] when nothing matches; parse and position
/// failures are hard errors.
pub fn locate_tool_error(
    snapshot: &dyn Snapshot,
    manifest: &FileHandle,
    raw_error: &str,
) -> ModResult<Diagnostic> {
    let _span = debug_span!("mod.locate_tool_error", uri = %manifest.uri).entered();

    let token = extract_module_version(raw_error);
    let parsed = snapshot
        .parse_manifest(manifest)
        .map_err(|source| ModError::Parse {
            uri: manifest.uri.clone(),
            source,
        })?;

    if token.is_zero() {
        debug!("no module version in error text");
        return Err(no_diagnostic(raw_error));
    }
    debug!(token = %token, "extracted module version");

    let Some(statement) = find_statement(&parsed.file, &token) else {
        debug!(token = %token, "no manifest statement references module version");
        return Err(no_diagnostic(raw_error));
    };
    debug!(kind = statement.kind(), "matched manifest statement");

    let range = range_from_span(parsed.mapper.as_ref(), statement.syntax())?;
    Ok(Diagnostic {
        severity: Some(DiagnosticSeverity::ERROR),
        ..Diagnostic::new_simple(range, raw_error.to_string())
    })
}

/// First statement referencing exactly `token`: requires, then excludes, then
/// replacements on either side.
fn find_statement<'a>(file: &'a ModFile, token: &ModuleVersion) -> Option<Statement<'a>> {
    file.require
        .iter()
        .find(|r| r.module == *token)
        .map(Statement::Require)
        .or_else(|| {
            file.exclude
                .iter()
                .find(|e| e.module == *token)
                .map(Statement::Exclude)
        })
        .or_else(|| {
            file.replace
                .iter()
                .find(|r| r.new == *token || r.old == *token)
                .map(Statement::Replace)
        })
}

fn no_diagnostic(raw_error: &str) -> ModError {
    ModError::NoDiagnostic {
        message: raw_error.to_string(),
    }
}
