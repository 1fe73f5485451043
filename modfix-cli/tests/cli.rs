//! End-to-end tests of the `modfix` binary against the go.mod fixtures.

#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use url::Url;

const MISSING_MOD: &str =
    "go: example.com@v1.2.2: reading example.com/@v/v1.2.2.mod: no such file or directory";

fn modfix() -> Command {
    Command::cargo_bin("modfix").expect("modfix binary")
}

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../tests/fixtures/gomod")
        .join(name)
}

/// Temp workspace with `go.mod` copied from `manifest` and `main.go`.
fn workspace(manifest: &str) -> TempDir {
    let td = tempfile::tempdir().expect("tempdir");
    fs::copy(fixture(manifest), td.path().join("go.mod")).unwrap();
    fs::copy(fixture("main.go"), td.path().join("main.go")).unwrap();
    td
}

fn uri(td: &TempDir, name: &str) -> Url {
    Url::from_file_path(td.path().canonicalize().unwrap().join(name)).unwrap()
}

fn write_report(td: &TempDir) {
    let report = serde_json::json!({
        "schema": "modfix.tidy.v1",
        "errors": [
            {
                "message": "golang.org/x/mod is not used in this module",
                "range": { "start": { "line": 7, "character": 1 }, "end": { "line": 7, "character": 24 } },
                "category": "go mod tidy",
                "uri": uri(td, "go.mod"),
                "suggestedFixes": [{
                    "title": "Remove dependency: golang.org/x/mod",
                    "edits": {
                        uri(td, "go.mod").as_str(): [{
                            "range": { "start": { "line": 7, "character": 0 }, "end": { "line": 8, "character": 0 } },
                            "newText": ""
                        }]
                    }
                }]
            },
            {
                "message": "golang.org/x/tools is not in your go.mod file",
                "range": { "start": { "line": 2, "character": 1 }, "end": { "line": 2, "character": 30 } },
                "category": "go mod tidy",
                "uri": uri(td, "main.go")
            }
        ]
    });
    fs::write(
        td.path().join("tidy.json"),
        serde_json::to_string_pretty(&report).unwrap(),
    )
    .unwrap();
}

#[test]
fn diagnostics_text_lists_every_error() {
    let td = workspace("basic.go.mod");
    write_report(&td);

    modfix()
        .current_dir(td.path())
        .args(["diagnostics", "--tidy-report", "tidy.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "go.mod:8:2: warning: [go mod tidy] golang.org/x/mod is not used in this module",
        ))
        .stdout(predicate::str::contains(
            "main.go:3:2: warning: [go mod tidy] golang.org/x/tools is not in your go.mod file",
        ))
        .stdout(predicate::str::contains("2 diagnostic(s) in 2 file(s)"));
}

#[test]
fn diagnostics_json_keeps_empty_manifest_entry() {
    let td = workspace("basic.go.mod");

    let output = modfix()
        .current_dir(td.path())
        .args(["diagnostics", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let published: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let published = published.as_array().unwrap();
    assert_eq!(published.len(), 1);
    assert_eq!(published[0]["uri"], uri(&td, "go.mod").as_str());
    assert_eq!(published[0]["diagnostics"], serde_json::json!([]));
}

#[test]
fn unsupported_report_prints_nothing_to_fix() {
    let td = workspace("basic.go.mod");
    fs::write(td.path().join("tidy.json"), r#"{ "unsupported": true }"#).unwrap();

    modfix()
        .current_dir(td.path())
        .args(["diagnostics", "--tidy-report", "tidy.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0 diagnostic(s) in 0 file(s)"));
}

#[test]
fn fixes_accept_published_diagnostics() {
    let td = workspace("basic.go.mod");
    write_report(&td);

    let output = modfix()
        .current_dir(td.path())
        .args(["diagnostics", "--tidy-report", "tidy.json", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    fs::write(td.path().join("held.json"), &output.stdout).unwrap();

    let output = modfix()
        .current_dir(td.path())
        .args([
            "fixes",
            "--tidy-report",
            "tidy.json",
            "--diagnostics",
            "held.json",
            "--default-version",
            "3",
            "--format",
            "json",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let actions: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let actions = actions.as_array().unwrap();
    assert_eq!(actions.len(), 1);
    assert_eq!(actions[0]["title"], "Remove dependency: golang.org/x/mod");
    assert_eq!(actions[0]["kind"], "quickfix");
    let change = &actions[0]["edit"]["documentChanges"][0];
    assert_eq!(change["textDocument"]["version"], 3);
    assert_eq!(change["textDocument"]["uri"], uri(&td, "go.mod").as_str());
}

#[test]
fn fixes_skip_client_diagnostics_of_other_severities() {
    let td = workspace("basic.go.mod");
    write_report(&td);
    let range = serde_json::json!({
        "start": { "line": 7, "character": 1 },
        "end": { "line": 7, "character": 24 }
    });
    let held = serde_json::json!([
        { "range": range, "severity": 3, "source": "gopls", "message": "golang.org/x/mod is not used in this module" },
        { "range": range, "severity": 4, "code": "U1000", "message": "unused" },
        { "range": range, "message": "no severity at all" },
        { "range": range, "severity": 2, "source": "go mod tidy", "message": "golang.org/x/mod is not used in this module" }
    ]);
    fs::write(td.path().join("held.json"), held.to_string()).unwrap();

    let output = modfix()
        .current_dir(td.path())
        .args([
            "fixes",
            "--tidy-report",
            "tidy.json",
            "--diagnostics",
            "held.json",
            "--format",
            "json",
        ])
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let actions: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let actions = actions.as_array().unwrap();
    assert_eq!(actions.len(), 1);
    assert_eq!(actions[0]["title"], "Remove dependency: golang.org/x/mod");
    assert_eq!(actions[0]["diagnostics"][0]["source"], "go mod tidy");
}

#[test]
fn fixes_for_unknown_diagnostics_are_empty() {
    let td = workspace("basic.go.mod");
    write_report(&td);
    fs::write(
        td.path().join("held.json"),
        r#"[{ "range": { "start": { "line": 0, "character": 0 }, "end": { "line": 0, "character": 1 } },
             "severity": 2, "source": "go mod tidy", "message": "something else" }]"#,
    )
    .unwrap();

    modfix()
        .current_dir(td.path())
        .args(["fixes", "--tidy-report", "tidy.json", "--diagnostics", "held.json"])
        .assert()
        .success()
        .stdout(predicate::str::diff("no quick fixes\n"));
}

#[test]
fn locate_anchors_at_require_line() {
    let td = workspace("basic.go.mod");

    modfix()
        .current_dir(td.path())
        .args(["locate", "--error", MISSING_MOD])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("go.mod:6:2: error: {MISSING_MOD}")));
}

#[test]
fn locate_json_range() {
    let td = workspace("basic.go.mod");

    let output = modfix()
        .current_dir(td.path())
        .args(["locate", "--format", "json", "--error"])
        .arg("go: golang.org/x/text@v0.3.0: invalid version")
        .output()
        .unwrap();
    assert!(output.status.success());

    let located: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let diag = &located["diagnostics"][0];
    assert_eq!(
        diag["range"],
        serde_json::json!({
            "start": { "line": 10, "character": 0 },
            "end": { "line": 10, "character": 32 }
        })
    );
    assert_eq!(diag["severity"], 1);
}

#[test]
fn locate_falls_back_to_unanchored() {
    let td = workspace("basic.go.mod");

    modfix()
        .current_dir(td.path())
        .args(["locate", "--error", "exit status 1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("go.mod:1:1: error: exit status 1"));
}

#[test]
fn locate_strict_exits_2() {
    let td = workspace("basic.go.mod");

    modfix()
        .current_dir(td.path())
        .args(["locate", "--strict", "--error", "exit status 1"])
        .assert()
        .code(2)
        .stdout(predicate::str::is_empty());
}

#[test]
fn locate_config_can_disable_fallback() {
    let td = workspace("basic.go.mod");
    fs::write(
        td.path().join("modfix.toml"),
        "[locate]\nfallback_unanchored = false\n",
    )
    .unwrap();

    modfix()
        .current_dir(td.path())
        .args(["locate", "--error", "go: example.com/nope@v1.0.0: not found"])
        .assert()
        .code(2);
}

#[test]
fn locate_parse_error_exits_1() {
    let td = workspace("broken.go.mod");

    modfix()
        .current_dir(td.path())
        .args(["locate", "--error", MISSING_MOD])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("unterminated require block"));
}

#[test]
fn config_file_supplies_report_and_format() {
    let td = workspace("basic.go.mod");
    write_report(&td);
    fs::write(
        td.path().join("modfix.toml"),
        "[tidy]\nreport = \"tidy.json\"\n\n[output]\nformat = \"json\"\n",
    )
    .unwrap();

    let output = modfix()
        .current_dir(td.path())
        .arg("diagnostics")
        .output()
        .unwrap();
    assert!(output.status.success());
    let published: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(published.as_array().unwrap().len(), 2);
}

#[test]
fn missing_manifest_exits_1() {
    let td = tempfile::tempdir().unwrap();

    modfix()
        .current_dir(td.path())
        .arg("diagnostics")
        .assert()
        .code(1);
}
