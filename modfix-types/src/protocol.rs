//! LSP protocol types, plus the few shapes modfix builds out of them.

pub use lsp_types::{
    CodeAction, CodeActionKind, Diagnostic, DiagnosticSeverity, DocumentChanges, OneOf,
    OptionalVersionedTextDocumentIdentifier, Position, PublishDiagnosticsParams, Range,
    TextDocumentEdit, TextEdit, Url, WorkspaceEdit,
};

/// Display label for a diagnostic severity. An absent severity reads as an error.
pub fn severity_label(severity: Option<DiagnosticSeverity>) -> &'static str {
    match severity {
        Some(s) if s == DiagnosticSeverity::WARNING => "warning",
        Some(s) if s == DiagnosticSeverity::INFORMATION => "info",
        Some(s) if s == DiagnosticSeverity::HINT => "hint",
        _ => "error",
    }
}

/// Edits for one file, pinned to `version`.
pub fn document_edit(uri: Url, version: i32, edits: &[TextEdit]) -> TextDocumentEdit {
    TextDocumentEdit {
        text_document: OptionalVersionedTextDocumentIdentifier {
            uri,
            version: Some(version),
        },
        edits: edits.iter().cloned().map(OneOf::Left).collect(),
    }
}

/// A quick fix for `diagnostic` applying `changes` as one workspace edit.
pub fn quick_fix(title: &str, diagnostic: Diagnostic, changes: Vec<TextDocumentEdit>) -> CodeAction {
    CodeAction {
        title: title.to_string(),
        kind: Some(CodeActionKind::QUICKFIX),
        diagnostics: Some(vec![diagnostic]),
        edit: Some(WorkspaceEdit {
            document_changes: Some(DocumentChanges::Edits(changes)),
            ..WorkspaceEdit::default()
        }),
        ..CodeAction::default()
    }
}

/// Document changes of an action's edit, in order. Empty when it has none.
pub fn document_changes(action: &CodeAction) -> &[TextDocumentEdit] {
    match action.edit.as_ref().and_then(|e| e.document_changes.as_ref()) {
        Some(DocumentChanges::Edits(edits)) => edits,
        _ => &[],
    }
}
