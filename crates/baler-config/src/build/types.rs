use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Entry point specification.
///
/// Accepts either a single path (named `main`) or a table of named entries:
///
/// ```toml
/// entry = "src/index.js"
/// # or
/// [entry]
/// main = "src/index.js"
/// admin = "src/admin.js"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntryOptions {
    Single(PathBuf),
    Named(IndexMap<String, PathBuf>),
}

impl EntryOptions {
    /// Normalize to a name -> path table; a single entry is named `main`.
    pub fn named(&self) -> IndexMap<String, PathBuf> {
        match self {
            EntryOptions::Single(path) => {
                let mut map = IndexMap::new();
                map.insert("main".to_string(), path.clone());
                map
            }
            EntryOptions::Named(map) => map.clone(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            EntryOptions::Single(path) => path.as_os_str().is_empty(),
            EntryOptions::Named(map) => map.is_empty(),
        }
    }
}

impl Default for EntryOptions {
    fn default() -> Self {
        EntryOptions::Named(IndexMap::new())
    }
}

/// Policy for assets that match no rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DefaultPolicy {
    /// Emit the asset verbatim with a content-addressed name.
    #[default]
    Copy,
    /// Abort the build naming the unmatched asset.
    Reject,
}
