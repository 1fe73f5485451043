//! Default in-memory `Snapshot` implementation.

use crate::hash::sha256_hex;
use crate::settings::Settings;
use crate::tidy::{MemoizedTidy, ReportTidySource, StaticTidySource};
use anyhow::{Context, anyhow};
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use modfix_domain::{Snapshot, TidyError};
use modfix_manifest::{ParsedManifest, parse_manifest};
use modfix_types::{FileHandle, TidyRun};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::debug;
use url::Url;

#[derive(Debug, Clone)]
struct StoredFile {
    content: String,
    version: i32,
    hash: String,
}

/// Snapshot over files held in memory.
///
/// Each file's identity is the SHA-256 of its content. Parses are cached per
/// content, tidy runs through the [`MemoizedTidy`] handle.
#[derive(Debug)]
pub struct MemorySnapshot {
    manifest: Option<Url>,
    files: BTreeMap<Url, StoredFile>,
    tidy: MemoizedTidy,
    parses: Mutex<HashMap<String, Arc<ParsedManifest>>>,
}

impl MemorySnapshot {
    pub fn new(tidy: MemoizedTidy) -> Self {
        Self {
            manifest: None,
            files: BTreeMap::new(),
            tidy,
            parses: Mutex::new(HashMap::new()),
        }
    }

    pub fn set_manifest(&mut self, uri: Url) {
        self.manifest = Some(uri);
    }

    /// Add or replace a file. Returns its handle.
    pub fn insert_file(&mut self, uri: Url, version: i32, content: impl Into<String>) -> FileHandle {
        let content = content.into();
        let hash = sha256_hex(content.as_bytes());
        let handle = FileHandle::new(uri.clone(), version, hash.clone());
        self.files.insert(
            uri,
            StoredFile {
                content,
                version,
                hash,
            },
        );
        handle
    }

    /// Load the manifest named in `settings` and every file the tidy report
    /// refers to. Referenced files that do not exist are left out; resolving
    /// them later fails.
    pub fn from_disk(settings: &Settings) -> anyhow::Result<Self> {
        let manifest_path = absolute(&settings.manifest)?;
        let manifest_uri = file_uri(&manifest_path)?;

        let (tidy, referenced) = match &settings.tidy_report {
            Some(report_path) => {
                let source = ReportTidySource::load(report_path)?;
                let referenced = source.referenced_files();
                (MemoizedTidy::new(source), referenced)
            }
            None => (MemoizedTidy::new(StaticTidySource::clean()), BTreeSet::new()),
        };

        let mut snapshot = Self::new(tidy);
        let content =
            fs::read_to_string(&manifest_path).with_context(|| format!("read {manifest_path}"))?;
        snapshot.insert_file(manifest_uri.clone(), settings.default_version, content);
        snapshot.set_manifest(manifest_uri);

        for uri in referenced {
            if snapshot.files.contains_key(&uri) {
                continue;
            }
            let Ok(path) = uri.to_file_path() else {
                debug!(uri = %uri, "skipping non-file uri");
                continue;
            };
            match fs::read_to_string(&path) {
                Ok(content) => {
                    snapshot.insert_file(uri, settings.default_version, content);
                }
                Err(err) => debug!(uri = %uri, "skipping unreadable file: {}", err),
            }
        }

        debug!(files = snapshot.files.len(), "loaded snapshot from disk");
        Ok(snapshot)
    }

    fn stored(&self, uri: &Url) -> anyhow::Result<&StoredFile> {
        self.files
            .get(uri)
            .ok_or_else(|| anyhow!("file not in snapshot: {uri}"))
    }
}

impl Snapshot for MemorySnapshot {
    fn manifest_uri(&self) -> Option<Url> {
        self.manifest.clone()
    }

    fn get_file(&self, uri: &Url) -> anyhow::Result<FileHandle> {
        let file = self.stored(uri)?;
        Ok(FileHandle::new(uri.clone(), file.version, file.hash.clone()))
    }

    fn mod_tidy(&self, manifest: &FileHandle) -> Result<Arc<TidyRun>, TidyError> {
        let file = self.stored(&manifest.uri)?;
        self.tidy.get(manifest, &file.content)
    }

    fn parse_manifest(&self, file: &FileHandle) -> anyhow::Result<Arc<ParsedManifest>> {
        let stored = self.stored(&file.uri)?;
        if let Some(parsed) = self
            .parses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&stored.hash)
        {
            return Ok(parsed.clone());
        }

        let parsed = Arc::new(parse_manifest(file.uri.path(), &stored.content)?);
        self.parses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(stored.hash.clone(), parsed.clone());
        Ok(parsed)
    }
}

fn absolute(path: &Utf8Path) -> anyhow::Result<Utf8PathBuf> {
    let abs = fs::canonicalize(path).with_context(|| format!("resolve {path}"))?;
    Utf8PathBuf::from_path_buf(abs).map_err(|p| anyhow!("non-utf8 path: {}", p.display()))
}

fn file_uri(path: &Utf8Path) -> anyhow::Result<Url> {
    Url::from_file_path(path).map_err(|()| anyhow!("cannot express {path} as a file uri"))
}
