use lsp_types::{Range, TextEdit, Url};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A fix proposed by tidy analysis. May touch several files at once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestedFix {
    pub title: String,

    /// Edits per file. Iteration order (by URI) is the document-change order.
    #[serde(default)]
    pub edits: BTreeMap<Url, Vec<TextEdit>>,
}

/// One error reported by a tidy analysis run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisError {
    pub message: String,
    pub range: Range,

    /// Error class, e.g. "syntax" or "go mod tidy".
    pub category: String,

    /// File the error is reported against.
    pub uri: Url,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub suggested_fixes: Vec<SuggestedFix>,
}

impl AnalysisError {
    /// Category of errors that make the manifest unreadable.
    pub const SYNTAX: &'static str = "syntax";

    pub fn is_syntax(&self) -> bool {
        self.category == Self::SYNTAX
    }
}

/// Result of one tidy analysis of a manifest. Immutable once produced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TidyRun {
    errors: Vec<AnalysisError>,
}

impl TidyRun {
    pub fn new(errors: Vec<AnalysisError>) -> Self {
        Self { errors }
    }

    /// Errors in the order the analysis reported them.
    pub fn errors(&self) -> &[AnalysisError] {
        &self.errors
    }
}

/// On-disk tidy report envelope.
///
/// Read tolerantly: unknown fields are ignored, everything but `errors` is optional.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TidyReport {
    #[serde(default = "default_schema")]
    pub schema: String,

    /// Set when the toolchain that produced the report cannot run tidy analysis.
    #[serde(default)]
    pub unsupported: bool,

    #[serde(default)]
    pub errors: Vec<AnalysisError>,
}

fn default_schema() -> String {
    crate::schema::MODFIX_TIDY_REPORT_V1.to_string()
}

impl TidyReport {
    pub fn into_run(self) -> TidyRun {
        TidyRun::new(self.errors)
    }
}
