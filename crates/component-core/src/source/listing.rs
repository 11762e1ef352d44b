//! Contents-API directory listings

use serde::{Deserialize, Serialize};

/// Entry type as reported by the contents API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    File,
    Dir,
    Symlink,
    Submodule,
    #[serde(other)]
    Other,
}

/// One item of a directory listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteEntry {
    pub name: String,

    #[serde(rename = "type")]
    pub kind: EntryKind,

    #[serde(default)]
    pub download_url: Option<String>,
}

/// What the contents API returned for a path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Listing {
    Directory(Vec<RemoteEntry>),
    /// The path names a single file, not a directory
    SingleEntry,
}

impl Listing {
    pub fn from_slice(bytes: &[u8]) -> serde_json::Result<Self> {
        let value: serde_json::Value = serde_json::from_slice(bytes)?;
        if value.is_object() {
            return Ok(Listing::SingleEntry);
        }
        serde_json::from_value(value).map(Listing::Directory)
    }
}
