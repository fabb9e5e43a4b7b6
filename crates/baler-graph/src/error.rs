//! Errors surfaced while building the asset graph.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GraphError {
    #[error("failed to read '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A reference that resolved to nothing. Names both the referencing
    /// asset and the literal specifier, per the build's error contract.
    #[error("cannot resolve '{specifier}' referenced from '{}'", from.display())]
    UnresolvedDependency { from: PathBuf, specifier: String },

    #[error("entry path not found: {0}")]
    EntryNotFound(PathBuf),
}
