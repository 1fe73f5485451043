mod config;
mod render;

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand};
use config::{ConfigMerger, MergedConfig};
use fs_err as fs;
use modfix_core::adapters::MemorySnapshot;
use modfix_core::pipeline::{run_diagnostics, run_locate, run_quick_fixes};
use modfix_core::settings::Settings;
use modfix_core::{ModError, Snapshot};
use modfix_types::{Diagnostic, PublishDiagnosticsParams};
use render::OutputFormat;
use serde::Deserialize;
use std::io::Write as _;
use std::process::ExitCode;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "modfix",
    version,
    about = "Diagnostics and quick fixes for go.mod manifests."
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the diagnostics of a tidy analysis, grouped by file.
    Diagnostics(DiagnosticsArgs),
    /// Print the quick fixes for diagnostics a client holds.
    Fixes(FixesArgs),
    /// Anchor a go command error at the manifest statement it names.
    Locate(LocateArgs),
}

#[derive(Debug, clap::Args)]
struct ManifestArgs {
    /// The go.mod file.
    #[arg(long, default_value = "go.mod")]
    manifest: Utf8PathBuf,

    /// Document version given to files read from disk.
    #[arg(long)]
    default_version: Option<i32>,

    /// Output format (text, json).
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,
}

#[derive(Debug, Parser)]
struct DiagnosticsArgs {
    #[command(flatten)]
    common: ManifestArgs,

    /// Tidy report (JSON) for the manifest.
    #[arg(long, env = "MODFIX_TIDY_REPORT")]
    tidy_report: Option<Utf8PathBuf>,
}

#[derive(Debug, Parser)]
struct FixesArgs {
    #[command(flatten)]
    common: ManifestArgs,

    /// Tidy report (JSON) for the manifest.
    #[arg(long, env = "MODFIX_TIDY_REPORT")]
    tidy_report: Option<Utf8PathBuf>,

    /// Diagnostics to fix: a JSON array of diagnostics, or the JSON output of
    /// `modfix diagnostics`.
    #[arg(long)]
    diagnostics: Utf8PathBuf,
}

#[derive(Debug, Parser)]
struct LocateArgs {
    #[command(flatten)]
    common: ManifestArgs,

    /// Raw error text from the go command.
    #[arg(long = "error")]
    error_text: String,

    /// Fail (exit 2) instead of printing an unanchored diagnostic when
    /// nothing in the manifest matches.
    #[arg(long, default_value_t = false)]
    strict: bool,
}

fn main() -> ExitCode {
    match real_main() {
        Ok(()) => ExitCode::from(0),
        Err(e) => {
            error!("{:?}", e);
            ExitCode::from(exit_code(&e))
        }
    }
}

/// 2 when no diagnostic could be derived, 1 for everything else.
fn exit_code(e: &anyhow::Error) -> u8 {
    e.downcast_ref::<ModError>()
        .map(ModError::exit_code)
        .unwrap_or(1)
}

fn real_main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Diagnostics(args) => cmd_diagnostics(args),
        Command::Fixes(args) => cmd_fixes(args),
        Command::Locate(args) => cmd_locate(args),
    }
}

fn cmd_diagnostics(args: DiagnosticsArgs) -> anyhow::Result<()> {
    let merged = merge_config(&args.common, args.tidy_report, false)?;
    let snapshot = load_snapshot(&settings_for(&args.common.manifest, &merged))?;

    let published = run_diagnostics(&snapshot)?;
    let out = match merged.format {
        OutputFormat::Text => render::render_diagnostics(&published),
        OutputFormat::Json => render::to_json(&published)?,
    };
    print(&out)
}

fn cmd_fixes(args: FixesArgs) -> anyhow::Result<()> {
    let merged = merge_config(&args.common, args.tidy_report, false)?;
    let snapshot = load_snapshot(&settings_for(&args.common.manifest, &merged))?;
    let held = read_diagnostics(&args.diagnostics)?;
    debug!(diagnostics = held.len(), "read held diagnostics");

    let actions = run_quick_fixes(&snapshot, &held)?;
    let out = match merged.format {
        OutputFormat::Text => render::render_actions(&actions),
        OutputFormat::Json => render::to_json(&actions)?,
    };
    print(&out)
}

fn cmd_locate(args: LocateArgs) -> anyhow::Result<()> {
    let merged = merge_config(&args.common, None, args.strict)?;
    // The tidy report plays no part in locating.
    let settings = Settings {
        tidy_report: None,
        ..settings_for(&args.common.manifest, &merged)
    };
    let snapshot = load_snapshot(&settings)?;
    let manifest_uri = snapshot
        .manifest_uri()
        .context("snapshot has no manifest")?;
    let manifest = snapshot.get_file(&manifest_uri)?;

    let located = run_locate(
        &snapshot,
        &manifest,
        &args.error_text,
        settings.fallback_unanchored,
    )?;
    debug!(anchored = located.is_anchored(), "located go command error");

    let diagnostic = located.into_diagnostic();
    let out = match merged.format {
        OutputFormat::Text => format!("{}\n", render::diagnostic_line(&manifest.uri, &diagnostic)),
        OutputFormat::Json => render::to_json(&PublishDiagnosticsParams::new(
            manifest.uri,
            vec![diagnostic],
            None,
        ))?,
    };
    print(&out)
}

fn merge_config(
    common: &ManifestArgs,
    tidy_report: Option<Utf8PathBuf>,
    strict: bool,
) -> anyhow::Result<MergedConfig> {
    let dir = match common.manifest.parent() {
        Some(p) if !p.as_str().is_empty() => p,
        _ => Utf8Path::new("."),
    };
    let file_config = config::load_or_default(dir).context("load modfix.toml config")?;
    let merged = ConfigMerger::new(file_config).merge(
        tidy_report,
        common.default_version,
        common.format,
        strict,
    );
    debug!(
        "merged config: tidy_report={:?}, default_version={}, fallback_unanchored={}, format={:?}",
        merged.tidy_report, merged.default_version, merged.fallback_unanchored, merged.format
    );
    Ok(merged)
}

fn settings_for(manifest: &Utf8Path, merged: &MergedConfig) -> Settings {
    Settings {
        manifest: manifest.to_path_buf(),
        tidy_report: merged.tidy_report.clone(),
        default_version: merged.default_version,
        fallback_unanchored: merged.fallback_unanchored,
    }
}

fn load_snapshot(settings: &Settings) -> anyhow::Result<MemorySnapshot> {
    MemorySnapshot::from_disk(settings).with_context(|| format!("load {}", settings.manifest))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum HeldDiagnostics {
    Flat(Vec<Diagnostic>),
    Published(Vec<PublishDiagnosticsParams>),
}

fn read_diagnostics(path: &Utf8Path) -> anyhow::Result<Vec<Diagnostic>> {
    let data = fs::read_to_string(path).with_context(|| format!("read {}", path))?;
    let held: HeldDiagnostics =
        serde_json::from_str(&data).with_context(|| format!("parse diagnostics {}", path))?;
    Ok(match held {
        HeldDiagnostics::Flat(diagnostics) => diagnostics,
        HeldDiagnostics::Published(published) => published
            .into_iter()
            .flat_map(|p| p.diagnostics)
            .collect(),
    })
}

fn print(out: &str) -> anyhow::Result<()> {
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(out.as_bytes()).context("write stdout")?;
    stdout.flush().context("flush stdout")
}
