//! Graph walker: BFS traversal from entry points.
//!
//! Each unique resolved path is visited exactly once; the visited set is
//! what makes cyclic references terminate. Discovery for a node completes
//! before its children are enqueued, so the resulting order is safe for
//! schedulers that want to process parents first.

use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};

use path_clean::PathClean;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::asset::{AssetKind, AssetNode};
use crate::error::GraphError;
use crate::graph::AssetGraph;
use crate::resolve::Resolver;
use crate::scan::scan_references;

pub struct GraphWalker {
    root: PathBuf,
    resolver: Resolver,
}

impl GraphWalker {
    pub fn new(root: impl Into<PathBuf>, resolver: Resolver) -> Self {
        Self {
            root: root.into(),
            resolver,
        }
    }

    /// Build the asset graph reachable from `entries` (name, root-relative
    /// path pairs).
    pub fn walk(&self, entries: &[(String, PathBuf)]) -> Result<AssetGraph, GraphError> {
        let mut graph = AssetGraph::default();
        let mut queue = VecDeque::new();
        let mut visited = FxHashSet::default();
        let mut entry_names: FxHashMap<PathBuf, String> = FxHashMap::default();

        for (name, path) in entries {
            let abs = self.root.join(path).clean();
            if !abs.is_file() {
                return Err(GraphError::EntryNotFound(path.clone()));
            }
            entry_names.insert(abs.clone(), name.clone());
            graph.record_entry(name.clone(), abs.clone());
            if visited.insert(abs.clone()) {
                queue.push_back(abs);
            }
        }

        while let Some(path) = queue.pop_front() {
            let node = self.load_node(&path, entry_names.get(&path).cloned())?;
            for dep in &node.dependencies {
                if visited.insert(dep.clone()) {
                    queue.push_back(dep.clone());
                }
            }
            graph.insert(node);
        }

        tracing::debug!(assets = graph.len(), "asset graph resolved");
        Ok(graph)
    }

    fn load_node(&self, path: &Path, entry: Option<String>) -> Result<AssetNode, GraphError> {
        let content = fs::read(path).map_err(|source| GraphError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        let kind = AssetKind::from_path(path);
        let relative = self.relative_of(path);

        let (references, dependencies) = if kind.is_text() {
            let text = String::from_utf8_lossy(&content);
            let references = scan_references(kind, &text);
            let mut dependencies = Vec::with_capacity(references.len());
            for reference in &references {
                dependencies.push(self.resolver.resolve(reference, path)?);
            }
            (references, dependencies)
        } else {
            (Vec::new(), Vec::new())
        };

        tracing::trace!(
            path = %relative,
            kind = %kind,
            dependencies = dependencies.len(),
            "visited asset"
        );

        Ok(AssetNode {
            path: path.to_path_buf(),
            relative,
            kind,
            content,
            references,
            dependencies,
            entry,
        })
    }

    /// Root-relative, forward-slashed path for matching and naming.
    fn relative_of(&self, path: &Path) -> String {
        let rel = path.strip_prefix(&self.root).unwrap_or(path);
        let s = rel.to_string_lossy();
        if std::path::MAIN_SEPARATOR == '/' {
            s.into_owned()
        } else {
            s.replace(std::path::MAIN_SEPARATOR, "/")
        }
    }
}
