//! The build manifest: logical keys to emitted paths.
//!
//! Append-only during a build and replaced wholesale on the next one. The
//! collision check lives here because the manifest is the single authority
//! on which output paths are claimed.

use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::error::{Error, Result};

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ManifestEntry {
    pub path: String,
    pub hash: String,
}

#[derive(Debug, Default, Serialize)]
#[serde(transparent)]
pub struct Manifest {
    entries: IndexMap<String, ManifestEntry>,

    /// Reverse index of claimed output paths.
    #[serde(skip)]
    by_path: FxHashMap<String, String>,
}

impl Manifest {
    /// Claim `path` for `key`.
    ///
    /// Two logical keys may share a path only when their content hashes
    /// agree (the content-addressed dedup case); anything else is a fatal
    /// collision rather than a silent overwrite.
    pub fn record(
        &mut self,
        key: impl Into<String>,
        path: impl Into<String>,
        hash: impl Into<String>,
    ) -> Result<()> {
        let (key, path, hash) = (key.into(), path.into(), hash.into());

        if let Some(first) = self.by_path.get(&path) {
            let existing = self.entries.get(first).expect("indexed entry");
            if existing.hash != hash {
                return Err(Error::OutputCollision {
                    path,
                    first: first.clone(),
                    second: key,
                });
            }
        } else {
            self.by_path.insert(path.clone(), key.clone());
        }

        self.entries.insert(key, ManifestEntry { path, hash });
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&ManifestEntry> {
        self.entries.get(key)
    }

    /// Entries in record order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &ManifestEntry)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_and_looks_up() {
        let mut manifest = Manifest::default();
        manifest.record("main", "main.abc.js", "abc").unwrap();
        assert_eq!(manifest.get("main").unwrap().path, "main.abc.js");
        assert_eq!(manifest.len(), 1);
    }

    #[test]
    fn distinct_content_on_same_path_collides() {
        let mut manifest = Manifest::default();
        manifest.record("main", "main.js", "aaa").unwrap();
        let err = manifest.record("admin", "main.js", "bbb").unwrap_err();
        match err {
            Error::OutputCollision {
                path,
                first,
                second,
            } => {
                assert_eq!(path, "main.js");
                assert_eq!(first, "main");
                assert_eq!(second, "admin");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn identical_content_on_same_path_dedups() {
        let mut manifest = Manifest::default();
        manifest.record("a", "assets/x.abc.png", "abc").unwrap();
        manifest.record("b", "assets/x.abc.png", "abc").unwrap();
        assert_eq!(manifest.len(), 2);
        assert_eq!(manifest.get("a").unwrap(), manifest.get("b").unwrap());
    }

    #[test]
    fn serializes_without_reverse_index() {
        let mut manifest = Manifest::default();
        manifest.record("main", "main.abc.js", "abc").unwrap();
        let json = manifest.to_json().unwrap();
        assert!(json.contains("\"main\""));
        assert!(json.contains("main.abc.js"));
        assert!(!json.contains("by_path"));
    }
}
