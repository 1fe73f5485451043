//! Shared DTOs (schemas-as-code) for the modfix workspace.
//!
//! # Design constraints
//! - Protocol types are `lsp_types`; clients exchange them unchanged.
//! - Tidy reports are read from disk; be tolerant of missing optional fields.
//! - Prefer adding optional fields over changing semantics.

pub mod file;
pub mod protocol;
pub mod tidy;

/// Schema identifiers.
pub mod schema {
    pub const MODFIX_TIDY_REPORT_V1: &str = "modfix.tidy.v1";
}

pub use file::{FileHandle, FileIdentity};
pub use protocol::{
    CodeAction, CodeActionKind, Diagnostic, DiagnosticSeverity, DocumentChanges, OneOf,
    OptionalVersionedTextDocumentIdentifier, Position, PublishDiagnosticsParams, Range,
    TextDocumentEdit, TextEdit, Url, WorkspaceEdit, document_changes, document_edit, quick_fix,
    severity_label,
};
pub use tidy::{AnalysisError, SuggestedFix, TidyReport, TidyRun};
