//! Manifest (`go.mod`) syntax.
//!
//! This crate owns the read-only view of a manifest the rest of the workspace
//! needs: the `require`/`exclude`/`replace` statements with the byte spans they
//! occupy, and a [`PositionMapper`] that turns those byte offsets into
//! protocol positions.

mod error;
mod parse;
mod position;
mod syntax;

pub use error::{ParseError, PositionError};
pub use parse::parse;
pub use position::{LineIndex, PositionMapper};
pub use syntax::{Exclude, ModFile, Replace, Require, Span, Statement};

use std::sync::Arc;

/// A parsed manifest together with the mapper for its text.
#[derive(Clone)]
pub struct ParsedManifest {
    pub file: ModFile,
    pub mapper: Arc<dyn PositionMapper>,
}

impl std::fmt::Debug for ParsedManifest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParsedManifest")
            .field("file", &self.file)
            .finish_non_exhaustive()
    }
}

/// Parse `content` and index it for position mapping.
pub fn parse_manifest(name: &str, content: &str) -> Result<ParsedManifest, ParseError> {
    let file = parse(name, content)?;
    Ok(ParsedManifest {
        file,
        mapper: Arc::new(LineIndex::new(content)),
    })
}
