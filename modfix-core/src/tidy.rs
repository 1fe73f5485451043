//! Memoized tidy analysis and the bundled tidy sources.

use crate::hash::sha256_hex;
use crate::ports::TidySource;
use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use modfix_domain::TidyError;
use modfix_types::{FileHandle, TidyReport, TidyRun};
use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::debug;
use url::Url;

/// An answer worth keeping for unchanged content.
#[derive(Debug, Clone)]
enum Cached {
    Run(Arc<TidyRun>),
    Unsupported,
}

impl Cached {
    fn to_result(&self) -> Result<Arc<TidyRun>, TidyError> {
        match self {
            Cached::Run(run) => Ok(run.clone()),
            Cached::Unsupported => Err(TidyError::Unsupported),
        }
    }
}

type Slot = Arc<Mutex<Option<Cached>>>;

/// Tidy handle that runs its source once per distinct manifest content.
///
/// Concurrent callers asking for the same content wait on the first caller's
/// run instead of starting their own. Runs and `Unsupported` are cached;
/// failures are not, so the next caller for that content tries again.
pub struct MemoizedTidy {
    source: Box<dyn TidySource>,
    entries: Mutex<HashMap<String, Slot>>,
}

impl MemoizedTidy {
    pub fn new(source: impl TidySource + 'static) -> Self {
        Self {
            source: Box::new(source),
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn get(&self, manifest: &FileHandle, content: &str) -> Result<Arc<TidyRun>, TidyError> {
        let key = sha256_hex(content.as_bytes());
        let slot = {
            let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
            entries.entry(key.clone()).or_default().clone()
        };

        // Held across the run: waiters for this content block here.
        let mut cached = slot.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(answer) = cached.as_ref() {
            return answer.to_result();
        }

        debug!(uri = %manifest.uri, hash = %key, "running tidy analysis");
        let answer = match self.source.tidy(manifest, content) {
            Ok(run) => Cached::Run(Arc::new(run)),
            Err(TidyError::Unsupported) => Cached::Unsupported,
            Err(err) => {
                debug!(uri = %manifest.uri, hash = %key, "tidy analysis failed: {err:#}");
                return Err(err);
            }
        };
        *cached = Some(answer.clone());
        answer.to_result()
    }

    /// Number of distinct contents seen so far.
    fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl std::fmt::Debug for MemoizedTidy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoizedTidy")
            .field("entries", &self.len())
            .finish_non_exhaustive()
    }
}

/// Read a tidy report file.
pub fn load_tidy_report(path: &Utf8Path) -> anyhow::Result<TidyReport> {
    let data = fs::read_to_string(path).with_context(|| format!("read {path}"))?;
    serde_json::from_str(&data).with_context(|| format!("parse tidy report {path}"))
}

/// Tidy source answering from a report written by an external tidy run.
///
/// The report is read once, by [`ReportTidySource::load`].
#[derive(Debug, Clone)]
pub struct ReportTidySource {
    path: Utf8PathBuf,
    report: TidyReport,
}

impl ReportTidySource {
    pub fn load(path: &Utf8Path) -> anyhow::Result<Self> {
        Ok(Self {
            path: path.to_path_buf(),
            report: load_tidy_report(path)?,
        })
    }

    /// Every file an analysis error or its fixes touch.
    pub fn referenced_files(&self) -> BTreeSet<Url> {
        self.report
            .errors
            .iter()
            .flat_map(|e| {
                std::iter::once(e.uri.clone()).chain(
                    e.suggested_fixes
                        .iter()
                        .flat_map(|fix| fix.edits.keys().cloned()),
                )
            })
            .collect()
    }
}

impl TidySource for ReportTidySource {
    fn tidy(&self, manifest: &FileHandle, _content: &str) -> Result<TidyRun, TidyError> {
        debug!(uri = %manifest.uri, report = %self.path, "answering tidy from report");
        if self.report.unsupported {
            return Err(TidyError::Unsupported);
        }
        Ok(TidyRun::new(self.report.errors.clone()))
    }
}

/// Fixed tidy answer, for embedding and tests.
#[derive(Debug, Clone)]
pub struct StaticTidySource {
    run: Option<TidyRun>,
}

impl StaticTidySource {
    pub fn run(run: TidyRun) -> Self {
        Self { run: Some(run) }
    }

    pub fn unsupported() -> Self {
        Self { run: None }
    }

    /// A clean run with no errors.
    pub fn clean() -> Self {
        Self::run(TidyRun::default())
    }
}

impl TidySource for StaticTidySource {
    fn tidy(&self, _manifest: &FileHandle, _content: &str) -> Result<TidyRun, TidyError> {
        self.run.clone().ok_or(TidyError::Unsupported)
    }
}
