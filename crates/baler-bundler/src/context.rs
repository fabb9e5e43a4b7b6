//! Per-invocation build state shared with hooks and workers.

use std::path::{Path, PathBuf};

use baler_config::BuildMode;
use parking_lot::Mutex;
use rustc_hash::FxHashMap;

use crate::error::{Error, Result};
use crate::manifest::Manifest;

/// Process-wide state for one build invocation.
///
/// Hooks receive `&mut BuildContext` and run serially; transform workers
/// only touch the manifest, which serializes mutation behind its mutex.
/// Discarded when the invocation completes.
pub struct BuildContext {
    pub mode: BuildMode,

    /// Project root all source paths are relative to.
    pub root: PathBuf,

    /// Output root artifacts are emitted under.
    pub out_dir: PathBuf,

    /// Entry names, in configuration order.
    pub entry_names: Vec<String>,

    pub manifest: Mutex<Manifest>,

    definitions: FxHashMap<String, String>,
    definitions_frozen: bool,
}

impl BuildContext {
    pub fn new(
        mode: BuildMode,
        root: impl Into<PathBuf>,
        out_dir: impl Into<PathBuf>,
        entry_names: Vec<String>,
    ) -> Self {
        Self {
            mode,
            root: root.into(),
            out_dir: out_dir.into(),
            entry_names,
            manifest: Mutex::new(Manifest::default()),
            definitions: FxHashMap::default(),
            definitions_frozen: false,
        }
    }

    /// Register a compile-time constant for script sources.
    ///
    /// Only legal while beforeBuild hooks run; afterwards the table is
    /// frozen so every stage sees the same literal values.
    pub fn define(&mut self, key: impl Into<String>, value: impl Into<String>) -> Result<()> {
        let key = key.into();
        if self.definitions_frozen {
            return Err(Error::DefinitionsFrozen { key });
        }
        self.definitions.insert(key, value.into());
        Ok(())
    }

    pub(crate) fn freeze_definitions(&mut self) {
        self.definitions_frozen = true;
    }

    pub fn definitions(&self) -> &FxHashMap<String, String> {
        &self.definitions
    }

    /// Absolute path of a root-relative source path.
    pub fn source_path(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.root.join(relative)
    }
}
