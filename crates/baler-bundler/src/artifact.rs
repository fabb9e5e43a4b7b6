//! Artifacts: transformed content awaiting naming and emission.

use baler_graph::AssetKind;

/// How the emitter derives the final relative path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Naming {
    /// Render through the configured output template (entry artifacts).
    Template,
    /// `<dir>/[<name>.]<hash>.<ext>` under the output root.
    Hashed { dir: String, include_name: bool },
    /// Fixed relative path; overwrites between builds.
    Static { path: String },
}

/// One piece of output: primary result of a node's pipeline, an auxiliary
/// side-file a stage registered, or a hook-injected standalone asset.
#[derive(Debug, Clone)]
pub struct Artifact {
    /// Logical key recorded in the manifest (entry name, root-relative
    /// source path, or `parent:suffix` for auxiliaries).
    pub key: String,

    /// `[name]` for naming templates.
    pub name: String,

    /// Emitted extension without the dot.
    pub ext: String,

    pub kind: AssetKind,

    /// Final bytes; the optimizer may rewrite these before hashing.
    pub content: Vec<u8>,

    pub naming: Naming,
}
