//! The build executor: one invocation, end to end.
//!
//! Order of operations: validate configuration, fire beforeBuild hooks and
//! freeze definitions, resolve the asset graph, fire afterGraphResolved,
//! transform every node on the worker pool, optimize, fire beforeEmit,
//! assign names and emit, fire afterEmit, finalize the manifest, fire
//! buildComplete. Optimization runs before hashing so content-addressed
//! names are computed from the bytes that actually land on disk.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use baler_config::{BalerConfig, BuildMode, ConfigValidator, DefaultPolicy, SchemaValidator};
use baler_graph::{AssetGraph, AssetNode, GraphWalker, Resolver};
use crossbeam_channel::{Receiver, RecvTimeoutError};
use rayon::prelude::*;

use crate::artifact::{Artifact, Naming};
use crate::context::BuildContext;
use crate::error::{Error, Result};
use crate::hooks::HookRegistry;
use crate::naming::{self, FilenameTemplate};
use crate::optimize::Optimizer;
use crate::output::Emitter;
use crate::pipeline::{StageContext, StagePayload};
use crate::rules::RuleSet;

/// One file written during the build.
#[derive(Debug, Clone)]
pub struct EmittedFile {
    pub key: String,
    pub path: String,
    pub size: u64,
    pub hash: String,
}

#[derive(Debug)]
pub struct BuildReport {
    pub mode: BuildMode,
    /// Nodes in the resolved asset graph.
    pub assets: usize,
    /// Pipeline artifacts written, in deterministic graph order.
    pub emitted: Vec<EmittedFile>,
    pub duration: Duration,
}

/// Run a full build for `config` with sources under `root`.
pub fn build(config: &BalerConfig, root: &Path) -> Result<BuildReport> {
    let started = Instant::now();
    let options = &config.build;

    // Everything that can be rejected without touching an asset is
    // rejected here: schema, rule patterns, stage options, naming
    // template, hook options.
    SchemaValidator.validate(options)?;
    let rules = Arc::new(RuleSet::compile(&options.rules, options.default_policy)?);
    let template = FilenameTemplate::parse(&options.output.filename)?;
    let hooks = HookRegistry::from_options(&options.plugins)?;

    let entries: Vec<(String, PathBuf)> = options.entry.named().into_iter().collect();
    let entry_names: Vec<String> = entries.iter().map(|(name, _)| name.clone()).collect();

    let out_dir = root.join(&options.output.dir);
    let mut ctx = BuildContext::new(config.mode, root, &out_dir, entry_names);

    tracing::info!(mode = %config.mode, entries = entries.len(), "build started");

    hooks.before_build(&mut ctx)?;
    ctx.freeze_definitions();

    let aliases = options
        .resolve
        .alias
        .iter()
        .map(|(alias, target)| (alias.clone(), target.clone()))
        .collect();
    let resolver = Resolver::new(root, aliases, options.resolve.extensions.clone());
    let mut graph = GraphWalker::new(root, resolver).walk(&entries)?;

    hooks.after_graph_resolved(&mut ctx, &mut graph)?;

    let mut artifacts = transform_all(
        &graph,
        Arc::clone(&rules),
        config.mode,
        options.transform_timeout_ms,
    )?;

    let optimizer = Optimizer::new(options.optimization.clone());
    if optimizer.enabled() {
        artifacts.par_iter_mut().for_each(|artifact| {
            if let Some(content) = optimizer.optimize(artifact.kind, &artifact.key, &artifact.content)
            {
                artifact.content = content;
            }
        });
    }

    hooks.before_emit(&mut ctx, &mut artifacts)?;

    let emitter = Emitter::new(&ctx.out_dir)?;
    let mut emitted = Vec::with_capacity(artifacts.len());
    for artifact in &artifacts {
        let hash = naming::content_hash(&artifact.content);
        let relative = match &artifact.naming {
            Naming::Template => template.render(&artifact.name, &hash, &artifact.ext),
            Naming::Hashed { dir, include_name } => naming::hashed_path(
                dir,
                include_name.then_some(artifact.name.as_str()),
                &hash,
                &artifact.ext,
            ),
            Naming::Static { path } => path.clone(),
        };
        ctx.manifest
            .lock()
            .record(artifact.key.clone(), relative.clone(), hash.clone())?;
        emitter.emit(&relative, &artifact.content)?;
        emitted.push(EmittedFile {
            key: artifact.key.clone(),
            path: relative,
            size: artifact.content.len() as u64,
            hash,
        });
    }

    hooks.after_emit(&mut ctx, &emitter)?;

    if options.output.manifest {
        let json = ctx
            .manifest
            .lock()
            .to_json()
            .map_err(|e| Error::WriteFailure(format!("manifest serialization failed: {e}")))?;
        emitter.emit("manifest.json", json.as_bytes())?;
    }

    hooks.build_complete(&mut ctx)?;

    let report = BuildReport {
        mode: config.mode,
        assets: graph.len(),
        emitted,
        duration: started.elapsed(),
    };
    tracing::info!(
        assets = report.assets,
        files = report.emitted.len(),
        elapsed_ms = report.duration.as_millis() as u64,
        "build complete"
    );
    Ok(report)
}

/// Transform every graph node on the worker pool.
///
/// Sibling nodes transform concurrently; results come back over a channel
/// and are reassembled in graph order. A node that blows its budget turns
/// into `TransformTimeoutError`; the abandoned worker finishes (or dies)
/// on the pool without anyone reading its result.
fn transform_all(
    graph: &AssetGraph,
    rules: Arc<RuleSet>,
    mode: BuildMode,
    timeout_ms: u64,
) -> Result<Vec<Artifact>> {
    let nodes: Vec<AssetNode> = graph.iter().cloned().collect();
    let labels: Vec<String> = nodes.iter().map(|node| node.relative.clone()).collect();
    let total = nodes.len();

    let (tx, rx) = crossbeam_channel::unbounded();
    for (index, node) in nodes.into_iter().enumerate() {
        let tx = tx.clone();
        let rules = Arc::clone(&rules);
        rayon::spawn(move || {
            let result = transform_node(&node, &rules, mode);
            // The receiver may have given up on us; that is fine.
            let _ = tx.send((index, result));
        });
    }
    drop(tx);

    drain_results(rx, total, &labels, timeout_ms)
}

fn drain_results(
    rx: Receiver<(usize, Result<Vec<Artifact>>)>,
    total: usize,
    labels: &[String],
    timeout_ms: u64,
) -> Result<Vec<Artifact>> {
    let timeout = Duration::from_millis(timeout_ms);
    let mut slots: Vec<Option<Vec<Artifact>>> = (0..total).map(|_| None).collect();
    let mut remaining = total;

    while remaining > 0 {
        match rx.recv_timeout(timeout) {
            Ok((index, result)) => {
                slots[index] = Some(result?);
                remaining -= 1;
            }
            Err(RecvTimeoutError::Timeout) => {
                let stuck = slots
                    .iter()
                    .position(|slot| slot.is_none())
                    .map(|index| labels[index].clone())
                    .unwrap_or_default();
                return Err(Error::TransformTimeout {
                    asset: stuck,
                    timeout_ms,
                });
            }
            Err(RecvTimeoutError::Disconnected) => {
                let lost = slots
                    .iter()
                    .position(|slot| slot.is_none())
                    .map(|index| labels[index].clone())
                    .unwrap_or_default();
                return Err(Error::Transform {
                    stage: "pipeline".to_string(),
                    asset: lost,
                    message: "worker terminated unexpectedly".to_string(),
                });
            }
        }
    }

    Ok(slots.into_iter().flatten().flatten().collect())
}

/// Match, run the pipeline, and shape the node's artifacts.
fn transform_node(node: &AssetNode, rules: &RuleSet, mode: BuildMode) -> Result<Vec<Artifact>> {
    let ctx = StageContext {
        mode,
        relative: &node.relative,
    };

    let payload = match rules.matched(&node.relative) {
        Some(rule) => rule
            .pipeline
            .run(&ctx, StagePayload::from_node(node))
            .map_err(|(stage, message)| Error::Transform {
                stage,
                asset: node.relative.clone(),
                message,
            })?,
        None => match rules.default_policy {
            DefaultPolicy::Copy => StagePayload::from_node(node),
            DefaultPolicy::Reject => return Err(Error::NoRuleMatched(node.relative.clone())),
        },
    };

    let StagePayload {
        content,
        kind,
        ext,
        dir,
        include_name,
        fixed_path,
        aux,
    } = payload;

    let key = node
        .entry
        .clone()
        .unwrap_or_else(|| node.relative.clone());
    let name = node
        .entry
        .clone()
        .unwrap_or_else(|| node.stem().to_string());
    let naming = if let Some(path) = fixed_path {
        Naming::Static { path }
    } else if node.entry.is_some() {
        Naming::Template
    } else {
        Naming::Hashed { dir, include_name }
    };

    let mut artifacts = Vec::with_capacity(1 + aux.len());
    artifacts.push(Artifact {
        key: key.clone(),
        name,
        ext,
        kind,
        content,
        naming,
    });
    for side in aux {
        artifacts.push(Artifact {
            key: format!("{key}:{}", side.suffix),
            name: node.stem().to_string(),
            ext: side.ext,
            kind: side.kind,
            content: side.content,
            naming: Naming::Hashed {
                dir: side.dir,
                include_name: side.include_name,
            },
        });
    }
    Ok(artifacts)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drain_times_out_naming_the_stuck_asset() {
        let (_tx, rx) = crossbeam_channel::unbounded::<(usize, Result<Vec<Artifact>>)>();
        let labels = vec!["src/slow.js".to_string()];
        let err = drain_results(rx, 1, &labels, 10).unwrap_err();
        match err {
            Error::TransformTimeout { asset, timeout_ms } => {
                assert_eq!(asset, "src/slow.js");
                assert_eq!(timeout_ms, 10);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn drain_reassembles_in_graph_order() {
        let (tx, rx) = crossbeam_channel::unbounded();
        let labels = vec!["a".to_string(), "b".to_string()];
        let artifact = |key: &str| Artifact {
            key: key.to_string(),
            name: key.to_string(),
            ext: "js".to_string(),
            kind: baler_graph::AssetKind::Script,
            content: vec![],
            naming: Naming::Template,
        };
        // results arrive out of order
        tx.send((1, Ok(vec![artifact("b")]))).unwrap();
        tx.send((0, Ok(vec![artifact("a")]))).unwrap();
        drop(tx);

        let artifacts = drain_results(rx, 2, &labels, 1_000).unwrap();
        let keys: Vec<_> = artifacts.iter().map(|a| a.key.as_str()).collect();
        assert_eq!(keys, vec!["a", "b"]);
    }
}
