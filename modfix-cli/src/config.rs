//! Configuration file loading for modfix.
//!
//! Discovers and loads `modfix.toml` from the directory holding the manifest.
//! Merges config file settings with CLI arguments (CLI takes precedence).

use crate::render::OutputFormat;
use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use serde::Deserialize;
use tracing::debug;

/// The config file name to search for.
pub const CONFIG_FILE_NAME: &str = "modfix.toml";

/// Top-level configuration from modfix.toml.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ModfixConfig {
    pub tidy: TidyConfig,
    pub files: FilesConfig,
    pub locate: LocateConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TidyConfig {
    /// Tidy report to read. Relative paths are relative to the config file.
    pub report: Option<Utf8PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FilesConfig {
    /// Document version given to files read from disk.
    pub default_version: i32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LocateConfig {
    /// Print an unanchored diagnostic when nothing in the manifest matches.
    pub fallback_unanchored: bool,
}

impl Default for LocateConfig {
    fn default() -> Self {
        Self {
            fallback_unanchored: true,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
}

/// Discover the modfix.toml config file in `dir`.
pub fn discover_config(dir: &Utf8Path) -> Option<Utf8PathBuf> {
    let config_path = dir.join(CONFIG_FILE_NAME);
    if config_path.exists() {
        debug!("found config file at {}", config_path);
        Some(config_path)
    } else {
        debug!("no config file found at {}", config_path);
        None
    }
}

/// Load and parse a modfix.toml config file.
///
/// A relative `[tidy] report` is resolved against the file's directory.
pub fn load_config(path: &Utf8Path) -> anyhow::Result<ModfixConfig> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read config file {}", path))?;
    let mut config =
        parse_config(&contents).with_context(|| format!("parse config file {}", path))?;
    let base = path.parent().unwrap_or(Utf8Path::new("."));
    config.tidy.report = config
        .tidy
        .report
        .map(|report| if report.is_relative() { base.join(report) } else { report });
    Ok(config)
}

/// Parse a config file from a string.
pub fn parse_config(contents: &str) -> anyhow::Result<ModfixConfig> {
    let config: ModfixConfig = toml::from_str(contents).context("invalid TOML")?;
    Ok(config)
}

/// Load config from `dir`, or return default if not found.
pub fn load_or_default(dir: &Utf8Path) -> anyhow::Result<ModfixConfig> {
    match discover_config(dir) {
        Some(path) => load_config(&path),
        None => Ok(ModfixConfig::default()),
    }
}

/// Configuration after applying CLI arguments.
#[derive(Debug, Clone)]
pub struct MergedConfig {
    pub tidy_report: Option<Utf8PathBuf>,
    pub default_version: i32,
    pub fallback_unanchored: bool,
    pub format: OutputFormat,
}

/// Builder for merging config file with CLI arguments.
pub struct ConfigMerger {
    config: ModfixConfig,
}

impl ConfigMerger {
    pub fn new(config: ModfixConfig) -> Self {
        Self { config }
    }

    /// Values given on the command line replace the config file's.
    /// `strict` turns the locate fallback off regardless of the config.
    pub fn merge(
        self,
        cli_tidy_report: Option<Utf8PathBuf>,
        cli_default_version: Option<i32>,
        cli_format: Option<OutputFormat>,
        strict: bool,
    ) -> MergedConfig {
        MergedConfig {
            tidy_report: cli_tidy_report.or(self.config.tidy.report),
            default_version: cli_default_version.unwrap_or(self.config.files.default_version),
            fallback_unanchored: !strict && self.config.locate.fallback_unanchored,
            format: cli_format.unwrap_or(self.config.output.format),
        }
    }
}
