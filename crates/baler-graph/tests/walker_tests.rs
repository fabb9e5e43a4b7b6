//! Integration tests for graph traversal.

use std::fs;
use std::path::PathBuf;

use baler_graph::{GraphError, GraphWalker, Resolver};
use tempfile::TempDir;

fn write(dir: &TempDir, rel: &str, content: &str) -> PathBuf {
    let path = dir.path().join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, content).unwrap();
    path
}

fn walker(dir: &TempDir) -> GraphWalker {
    let resolver = Resolver::new(dir.path(), vec![], vec![".js".to_string()]);
    GraphWalker::new(dir.path(), resolver)
}

fn entries(paths: &[(&str, &str)]) -> Vec<(String, PathBuf)> {
    paths
        .iter()
        .map(|(name, path)| (name.to_string(), PathBuf::from(path)))
        .collect()
}

#[test]
fn walks_transitive_dependencies() {
    let dir = TempDir::new().unwrap();
    write(&dir, "src/index.js", "import './a.js';");
    write(&dir, "src/a.js", "import './b.js';");
    write(&dir, "src/b.js", "export const b = 1;");

    let graph = walker(&dir)
        .walk(&entries(&[("main", "src/index.js")]))
        .unwrap();

    assert_eq!(graph.len(), 3);
    let order: Vec<_> = graph.iter().map(|n| n.relative.clone()).collect();
    assert_eq!(order, vec!["src/index.js", "src/a.js", "src/b.js"]);
}

#[test]
fn cycles_terminate_without_duplicates() {
    let dir = TempDir::new().unwrap();
    write(&dir, "src/a.js", "import './b.js'; export const a = 1;");
    write(&dir, "src/b.js", "import './a.js'; export const b = 2;");

    let graph = walker(&dir).walk(&entries(&[("main", "src/a.js")])).unwrap();

    // A and B each appear exactly once despite referencing each other.
    assert_eq!(graph.len(), 2);
}

#[test]
fn shared_dependency_is_one_node() {
    let dir = TempDir::new().unwrap();
    write(&dir, "src/index.js", "import './a.js'; import './b.js';");
    write(&dir, "src/a.js", "import './shared.js';");
    write(&dir, "src/b.js", "import './shared.js';");
    write(&dir, "src/shared.js", "export default 42;");

    let graph = walker(&dir)
        .walk(&entries(&[("main", "src/index.js")]))
        .unwrap();

    assert_eq!(graph.len(), 4);
}

#[test]
fn binary_assets_are_leaves() {
    let dir = TempDir::new().unwrap();
    write(&dir, "src/index.js", "import './logo.png';");
    write(&dir, "src/logo.png", "not-really-a-png");

    let graph = walker(&dir)
        .walk(&entries(&[("main", "src/index.js")]))
        .unwrap();

    let logo = graph
        .iter()
        .find(|n| n.relative == "src/logo.png")
        .unwrap();
    assert!(logo.references.is_empty());
    assert!(logo.dependencies.is_empty());
}

#[test]
fn unresolved_reference_is_fatal() {
    let dir = TempDir::new().unwrap();
    let index = write(&dir, "src/index.js", "import '@missing/foo.js';");

    let err = walker(&dir)
        .walk(&entries(&[("main", "src/index.js")]))
        .unwrap_err();

    match err {
        GraphError::UnresolvedDependency { from, specifier } => {
            assert_eq!(from, index);
            assert_eq!(specifier, "@missing/foo.js");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn missing_entry_is_fatal() {
    let dir = TempDir::new().unwrap();
    let err = walker(&dir)
        .walk(&entries(&[("main", "src/nope.js")]))
        .unwrap_err();
    assert!(matches!(err, GraphError::EntryNotFound(_)));
}

#[test]
fn stylesheet_references_reach_images() {
    let dir = TempDir::new().unwrap();
    write(&dir, "src/index.js", "import './styles.css';");
    write(&dir, "src/styles.css", ".hero { background: url(./bg.png); }");
    write(&dir, "src/bg.png", "png-bytes");

    let graph = walker(&dir)
        .walk(&entries(&[("main", "src/index.js")]))
        .unwrap();

    assert_eq!(graph.len(), 3);
    assert!(graph.iter().any(|n| n.relative == "src/bg.png"));
}
