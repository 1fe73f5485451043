use camino::Utf8PathBuf;
use fs_err as fs;
use modfix_core::adapters::MemorySnapshot;
use modfix_core::pipeline::{Located, run_diagnostics, run_locate, run_quick_fixes};
use modfix_core::settings::Settings;
use modfix_core::{ModError, Snapshot};
use modfix_types::{DiagnosticSeverity, Position, Range, document_changes};
use pretty_assertions::assert_eq;
use tempfile::TempDir;
use url::Url;

const GO_MOD: &str = "module example.com/m

go 1.21

require (
	example.com v1.2.2
	golang.org/x/mod v0.4.0 // indirect
)

replace example.com v1.2.2 => ../example
";

struct Workspace {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl Workspace {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let root = Utf8PathBuf::from_path_buf(dir.path().canonicalize().unwrap()).unwrap();
        fs::write(root.join("go.mod"), GO_MOD).unwrap();
        fs::write(root.join("main.go"), "package main\n").unwrap();
        Self { _dir: dir, root }
    }

    fn uri(&self, name: &str) -> Url {
        Url::from_file_path(self.root.join(name)).unwrap()
    }

    fn write_report(&self, report: serde_json::Value) -> Utf8PathBuf {
        let path = self.root.join("tidy.json");
        fs::write(&path, serde_json::to_string_pretty(&report).unwrap()).unwrap();
        path
    }

    fn settings(&self, report: Option<Utf8PathBuf>) -> Settings {
        Settings {
            manifest: self.root.join("go.mod"),
            tidy_report: report,
            default_version: 4,
            ..Settings::default()
        }
    }
}

fn unused_error(ws: &Workspace) -> serde_json::Value {
    serde_json::json!({
        "message": "golang.org/x/mod is not used in this module",
        "range": { "start": { "line": 6, "character": 1 }, "end": { "line": 6, "character": 24 } },
        "category": "go mod tidy",
        "uri": ws.uri("go.mod"),
        "suggestedFixes": [{
            "title": "Remove dependency: golang.org/x/mod",
            "edits": {
                ws.uri("go.mod").as_str(): [{
                    "range": { "start": { "line": 6, "character": 0 }, "end": { "line": 7, "character": 0 } },
                    "newText": ""
                }],
                ws.uri("main.go").as_str(): [{
                    "range": { "start": { "line": 0, "character": 0 }, "end": { "line": 0, "character": 0 } },
                    "newText": "// tidy\n"
                }]
            }
        }]
    })
}

#[test]
fn diagnostics_from_report() {
    let ws = Workspace::new();
    let report = ws.write_report(serde_json::json!({
        "schema": "modfix.tidy.v1",
        "errors": [
            unused_error(&ws),
            {
                "message": "missing go.sum entry",
                "range": { "start": { "line": 0, "character": 0 }, "end": { "line": 0, "character": 12 } },
                "category": "go mod tidy",
                "uri": ws.uri("main.go")
            }
        ]
    }));
    let snapshot = MemorySnapshot::from_disk(&ws.settings(Some(report))).unwrap();

    let published = run_diagnostics(&snapshot).unwrap();

    let uris: Vec<_> = published.iter().map(|p| p.uri.clone()).collect();
    let mut want = vec![ws.uri("go.mod"), ws.uri("main.go")];
    want.sort();
    assert_eq!(uris, want);
    let manifest = published.iter().find(|p| p.uri == ws.uri("go.mod")).unwrap();
    assert_eq!(manifest.diagnostics.len(), 1);
    assert_eq!(manifest.diagnostics[0].severity, Some(DiagnosticSeverity::WARNING));
    assert_eq!(manifest.diagnostics[0].source.as_deref(), Some("go mod tidy"));
}

#[test]
fn no_report_means_clean_manifest_entry() {
    let ws = Workspace::new();
    let snapshot = MemorySnapshot::from_disk(&ws.settings(None)).unwrap();
    let published = run_diagnostics(&snapshot).unwrap();
    assert_eq!(published.len(), 1);
    assert_eq!(published[0].uri, ws.uri("go.mod"));
    assert!(published[0].diagnostics.is_empty());
}

#[test]
fn unsupported_report_is_empty() {
    let ws = Workspace::new();
    let report = ws.write_report(serde_json::json!({ "unsupported": true }));
    let snapshot = MemorySnapshot::from_disk(&ws.settings(Some(report))).unwrap();
    assert!(run_diagnostics(&snapshot).unwrap().is_empty());
}

#[test]
fn quick_fixes_round_trip_through_published_diagnostics() {
    let ws = Workspace::new();
    let report = ws.write_report(serde_json::json!({ "errors": [unused_error(&ws)] }));
    let snapshot = MemorySnapshot::from_disk(&ws.settings(Some(report))).unwrap();

    let published = run_diagnostics(&snapshot).unwrap();
    let held: Vec<_> = published
        .into_iter()
        .flat_map(|p| p.diagnostics)
        .collect();
    let actions = run_quick_fixes(&snapshot, &held).unwrap();

    assert_eq!(actions.len(), 1);
    assert_eq!(actions[0].title, "Remove dependency: golang.org/x/mod");
    let versions: Vec<_> = document_changes(&actions[0])
        .iter()
        .map(|c| c.text_document.version)
        .collect();
    assert_eq!(versions, vec![Some(4), Some(4)]);
}

#[test]
fn report_is_read_once_at_load() {
    let ws = Workspace::new();
    let report = ws.write_report(serde_json::json!({ "errors": [unused_error(&ws)] }));
    let snapshot = MemorySnapshot::from_disk(&ws.settings(Some(report.clone()))).unwrap();

    fs::remove_file(&report).unwrap();

    let published = run_diagnostics(&snapshot).unwrap();
    let manifest = published.iter().find(|p| p.uri == ws.uri("go.mod")).unwrap();
    assert_eq!(manifest.diagnostics.len(), 1);
    let actions = run_quick_fixes(&snapshot, &manifest.diagnostics).unwrap();
    assert_eq!(actions.len(), 1);
}

#[test]
fn unreadable_report_fails_to_load() {
    let ws = Workspace::new();
    fs::write(ws.root.join("tidy.json"), "{ not json").unwrap();
    let err = MemorySnapshot::from_disk(&ws.settings(Some(ws.root.join("tidy.json")))).unwrap_err();
    assert!(err.to_string().contains("tidy.json"), "{err:#}");
}

#[test]
fn locate_anchors_at_require() {
    let ws = Workspace::new();
    let snapshot = MemorySnapshot::from_disk(&ws.settings(None)).unwrap();
    let manifest = snapshot.get_file(&ws.uri("go.mod")).unwrap();

    let raw = "go: example.com@v1.2.2: reading example.com/@v/v1.2.2.mod: no such file or directory";
    let located = run_locate(&snapshot, &manifest, raw, true).unwrap();

    assert!(located.is_anchored());
    let diag = located.into_diagnostic();
    assert_eq!(
        diag.range,
        Range::new(Position::new(5, 1), Position::new(5, 19))
    );
    assert_eq!(diag.message, raw);
}

#[test]
fn locate_falls_back_or_fails_when_unmatched() {
    let ws = Workspace::new();
    let snapshot = MemorySnapshot::from_disk(&ws.settings(None)).unwrap();
    let manifest = snapshot.get_file(&ws.uri("go.mod")).unwrap();
    let raw = "go: example.com/other@v0.1.0: unknown revision";

    match run_locate(&snapshot, &manifest, raw, true).unwrap() {
        Located::Unanchored(d) => {
            assert_eq!(d.range, Range::default());
            assert_eq!(d.severity, Some(DiagnosticSeverity::ERROR));
            assert_eq!(d.source, None);
            assert_eq!(d.message, raw);
        }
        other => panic!("expected fallback, got {other:?}"),
    }

    let err = run_locate(&snapshot, &manifest, raw, false).unwrap_err();
    assert!(err.is_no_diagnostic());
}

#[test]
fn locate_parse_failure_is_not_softened() {
    let ws = Workspace::new();
    fs::write(ws.root.join("go.mod"), "module m\nrequire (\n").unwrap();
    let snapshot = MemorySnapshot::from_disk(&ws.settings(None)).unwrap();
    let manifest = snapshot.get_file(&ws.uri("go.mod")).unwrap();

    let err = run_locate(&snapshot, &manifest, "go: a.com/b@v1.0.0: bad", true).unwrap_err();
    assert!(matches!(err, ModError::Parse { .. }), "{err}");
    assert!(err.to_string().contains("unterminated require block"));
}

#[test]
fn missing_manifest_fails_to_load() {
    let ws = Workspace::new();
    let mut settings = ws.settings(None);
    settings.manifest = ws.root.join("nope/go.mod");
    let err = MemorySnapshot::from_disk(&settings).unwrap_err();
    assert!(err.to_string().contains("nope"), "{err:#}");
}
