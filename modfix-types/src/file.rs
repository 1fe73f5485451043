use serde::{Deserialize, Serialize};
use lsp_types::Url;

/// Identity of a file's content at a point in time.
///
/// Two handles for the same URI with different content have different identities.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FileIdentity {
    pub uri: Url,

    /// Content hash (hex sha256 in the bundled adapters).
    pub hash: String,
}

/// A versioned reference to a file, as handed out by a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileHandle {
    pub uri: Url,

    /// Client-side document version; used to pin edits.
    pub version: i32,

    pub hash: String,
}

impl FileHandle {
    pub fn new(uri: Url, version: i32, hash: impl Into<String>) -> Self {
        Self {
            uri,
            version,
            hash: hash.into(),
        }
    }

    pub fn identity(&self) -> FileIdentity {
        FileIdentity {
            uri: self.uri.clone(),
            hash: self.hash.clone(),
        }
    }
}
