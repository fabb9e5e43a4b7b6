//! Transform pipelines: the ordered stage chain a rule applies to an asset.
//!
//! Stages are pure functions from payload to payload; the pipeline threads
//! content and placement through them in declared order and aborts on the
//! first failure, surfacing the originating stage name. Stage option
//! structs are parsed and validated at construction, before any asset is
//! read.

mod stages;

pub use stages::build_stage;

use baler_config::BuildMode;
use baler_graph::{AssetKind, AssetNode};

use crate::error::Result;

/// Immutable per-asset inputs a stage can observe.
pub struct StageContext<'a> {
    pub mode: BuildMode,
    /// Root-relative path of the asset being transformed.
    pub relative: &'a str,
}

/// Content plus emission placement, threaded through the chain.
#[derive(Debug, Clone)]
pub struct StagePayload {
    pub content: Vec<u8>,
    pub kind: AssetKind,

    /// Output extension without the dot.
    pub ext: String,

    /// Subdirectory for hashed placement of non-entry artifacts; empty
    /// means the output root.
    pub dir: String,

    /// Whether hashed names keep the source stem.
    pub include_name: bool,

    /// Exact output path overriding template and hashed naming; overwrites
    /// between builds and can collide, which the manifest treats as fatal.
    pub fixed_path: Option<String>,

    /// Auxiliary side-files registered by stages, emitted under their own
    /// logical keys.
    pub aux: Vec<AuxArtifact>,
}

/// A side-file a stage wants emitted alongside the primary artifact.
#[derive(Debug, Clone)]
pub struct AuxArtifact {
    /// Appended to the parent's logical key as `parent:suffix`.
    pub suffix: String,
    pub content: Vec<u8>,
    pub kind: AssetKind,
    pub ext: String,
    pub dir: String,
    pub include_name: bool,
}

impl StagePayload {
    pub fn from_node(node: &AssetNode) -> Self {
        Self {
            content: node.content.clone(),
            kind: node.kind,
            ext: node.extension().to_string(),
            dir: "assets".to_string(),
            include_name: true,
            fixed_path: None,
            aux: Vec::new(),
        }
    }
}

/// One transformation step. Implementations must be stateless across
/// invocations so independent assets can transform concurrently.
pub trait PipelineStage: Send + Sync + std::fmt::Debug {
    fn name(&self) -> &'static str;

    fn apply(&self, ctx: &StageContext<'_>, payload: StagePayload) -> anyhow::Result<StagePayload>;
}

#[derive(Debug)]
pub struct TransformPipeline {
    stages: Vec<Box<dyn PipelineStage>>,
}

impl TransformPipeline {
    /// Build a pipeline from configured stage names.
    ///
    /// `options` is the rule's stage option table, keyed by stage name.
    /// Unknown stages or invalid option shapes fail here, before the first
    /// asset is processed.
    pub fn from_names(names: &[String], options: &serde_json::Value) -> Result<Self> {
        let mut stages = Vec::with_capacity(names.len());
        for name in names {
            let stage_options = options.get(name).cloned().unwrap_or(serde_json::Value::Null);
            stages.push(build_stage(name, &stage_options)?);
        }
        Ok(Self { stages })
    }

    #[cfg(test)]
    pub(crate) fn from_stages(stages: Vec<Box<dyn PipelineStage>>) -> Self {
        Self { stages }
    }

    /// Run every stage in declared order.
    ///
    /// The error carries (stage name, message); the caller owns turning it
    /// into a `TransformError` with the asset path attached.
    pub fn run(
        &self,
        ctx: &StageContext<'_>,
        mut payload: StagePayload,
    ) -> std::result::Result<StagePayload, (String, String)> {
        for stage in &self.stages {
            payload = stage
                .apply(ctx, payload)
                .map_err(|e| (stage.name().to_string(), e.to_string()))?;
        }
        Ok(payload)
    }
}
