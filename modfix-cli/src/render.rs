//! Text and JSON rendering of command results.

use anyhow::Context;
use modfix_types::{
    CodeAction, Diagnostic, PublishDiagnosticsParams, document_changes, severity_label,
};
use serde::Deserialize;
use std::fmt::Write as _;
use url::Url;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

pub fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> anyhow::Result<String> {
    let mut s = serde_json::to_string_pretty(value).context("serialize json")?;
    s.push('\n');
    Ok(s)
}

/// `path:line:col: severity: [source] message`, 1-based for display.
pub fn diagnostic_line(uri: &Url, d: &Diagnostic) -> String {
    let mut out = format!(
        "{}:{}:{}: {}: ",
        display_path(uri),
        d.range.start.line + 1,
        d.range.start.character + 1,
        severity_label(d.severity)
    );
    if let Some(source) = d.source.as_deref().filter(|s| !s.is_empty()) {
        let _ = write!(out, "[{source}] ");
    }
    out.push_str(&d.message);
    out
}

pub fn render_diagnostics(published: &[PublishDiagnosticsParams]) -> String {
    let mut out = String::new();
    let mut total = 0;
    for p in published {
        for d in &p.diagnostics {
            out.push_str(&diagnostic_line(&p.uri, d));
            out.push('\n');
            total += 1;
        }
    }
    let _ = writeln!(
        out,
        "{total} diagnostic(s) in {} file(s)",
        published.len()
    );
    out
}

pub fn render_actions(actions: &[CodeAction]) -> String {
    let mut out = String::new();
    for action in actions {
        let _ = writeln!(out, "{}", action.title);
        for change in document_changes(action) {
            let version = change
                .text_document
                .version
                .map_or_else(|| "unversioned".to_string(), |v| format!("version {v}"));
            let _ = writeln!(
                out,
                "  {} ({version}): {} edit(s)",
                display_path(&change.text_document.uri),
                change.edits.len()
            );
        }
    }
    if actions.is_empty() {
        out.push_str("no quick fixes\n");
    }
    out
}

/// Local path for `file:` URIs, the URI itself otherwise.
pub fn display_path(uri: &Url) -> String {
    match uri.to_file_path() {
        Ok(path) => path.display().to_string(),
        Err(()) => uri.to_string(),
    }
}
