//! Clap-free settings for the pipelines.

use camino::Utf8PathBuf;

#[derive(Debug, Clone)]
pub struct Settings {
    pub manifest: Utf8PathBuf,

    /// Tidy report produced by an external tidy run. Without one the
    /// analysis is treated as clean.
    pub tidy_report: Option<Utf8PathBuf>,

    /// Document version given to files loaded from disk.
    pub default_version: i32,

    /// Fall back to an unanchored diagnostic when a go command error
    /// matches no manifest statement.
    pub fallback_unanchored: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            manifest: Utf8PathBuf::from("go.mod"),
            tidy_report: None,
            default_version: 0,
            fallback_unanchored: true,
        }
    }
}
