//! In-memory `Snapshot` for domain tests.

#![allow(dead_code)]

use anyhow::anyhow;
use modfix_domain::{Snapshot, TidyError};
use modfix_manifest::{ModFile, ParsedManifest, PositionError, PositionMapper};
use modfix_types::{AnalysisError, FileHandle, Position, Range, SuggestedFix, TextEdit, TidyRun};
use std::collections::BTreeMap;
use std::sync::Arc;
use url::Url;

pub fn uri(name: &str) -> Url {
    Url::parse(&format!("file:///work/{name}")).unwrap()
}

pub fn range(sl: u32, sc: u32, el: u32, ec: u32) -> Range {
    Range::new(Position::new(sl, sc), Position::new(el, ec))
}

pub fn analysis_error(message: &str, category: &str, file: &str, range: Range) -> AnalysisError {
    AnalysisError {
        message: message.to_string(),
        range,
        category: category.to_string(),
        uri: uri(file),
        suggested_fixes: vec![],
    }
}

pub fn fix(title: &str, files: &[&str]) -> SuggestedFix {
    SuggestedFix {
        title: title.to_string(),
        edits: files
            .iter()
            .map(|f| {
                (
                    uri(f),
                    vec![TextEdit {
                        range: range(0, 0, 0, 0),
                        new_text: format!("// {title}\n"),
                    }],
                )
            })
            .collect(),
    }
}

/// Fixed offset table. Offsets not in the table are out of range.
#[derive(Debug, Clone, Default)]
pub struct OffsetTable(pub BTreeMap<usize, Position>);

impl OffsetTable {
    pub fn with(mut self, offset: usize, line: u32, character: u32) -> Self {
        self.0.insert(offset, Position::new(line, character));
        self
    }
}

impl PositionMapper for OffsetTable {
    fn position(&self, offset: usize) -> Result<Position, PositionError> {
        self.0
            .get(&offset)
            .copied()
            .ok_or(PositionError::OutOfRange { offset, len: 0 })
    }
}

pub enum FakeTidy {
    Run(Arc<TidyRun>),
    Unsupported,
    Fail(&'static str),
}

pub enum FakeParse {
    Parsed(Arc<ParsedManifest>),
    Fail(&'static str),
}

pub struct FakeSnapshot {
    pub manifest: Option<Url>,
    pub files: BTreeMap<Url, FileHandle>,
    pub tidy: FakeTidy,
    pub parse: FakeParse,
}

impl FakeSnapshot {
    /// Workspace with `go.mod` (version 1) and a clean tidy run.
    pub fn new() -> Self {
        let mut snapshot = Self {
            manifest: Some(uri("go.mod")),
            files: BTreeMap::new(),
            tidy: FakeTidy::Run(Arc::new(TidyRun::default())),
            parse: FakeParse::Parsed(Arc::new(ParsedManifest {
                file: ModFile::default(),
                mapper: Arc::new(OffsetTable::default()),
            })),
        };
        snapshot.add_file("go.mod", 1);
        snapshot
    }

    pub fn add_file(&mut self, name: &str, version: i32) -> &mut Self {
        let u = uri(name);
        self.files.insert(
            u.clone(),
            FileHandle::new(u, version, format!("hash-{name}-{version}")),
        );
        self
    }

    pub fn with_errors(mut self, errors: Vec<AnalysisError>) -> Self {
        self.tidy = FakeTidy::Run(Arc::new(TidyRun::new(errors)));
        self
    }

    pub fn with_manifest(mut self, file: ModFile, mapper: impl PositionMapper + 'static) -> Self {
        self.parse = FakeParse::Parsed(Arc::new(ParsedManifest {
            file,
            mapper: Arc::new(mapper),
        }));
        self
    }

    pub fn manifest_handle(&self) -> FileHandle {
        self.files[&uri("go.mod")].clone()
    }
}

impl Snapshot for FakeSnapshot {
    fn manifest_uri(&self) -> Option<Url> {
        self.manifest.clone()
    }

    fn get_file(&self, uri: &Url) -> anyhow::Result<FileHandle> {
        self.files
            .get(uri)
            .cloned()
            .ok_or_else(|| anyhow!("file not in snapshot: {uri}"))
    }

    fn mod_tidy(&self, _manifest: &FileHandle) -> Result<Arc<TidyRun>, TidyError> {
        match &self.tidy {
            FakeTidy::Run(run) => Ok(run.clone()),
            FakeTidy::Unsupported => Err(TidyError::Unsupported),
            FakeTidy::Fail(msg) => Err(TidyError::Failed(anyhow!(*msg))),
        }
    }

    fn parse_manifest(&self, _file: &FileHandle) -> anyhow::Result<Arc<ParsedManifest>> {
        match &self.parse {
            FakeParse::Parsed(parsed) => Ok(parsed.clone()),
            FakeParse::Fail(msg) => Err(anyhow!(*msg)),
        }
    }
}
