//! Shared scaffolding for bundler integration tests.
#![allow(dead_code)]

use std::fs;
use std::path::Path;

use baler_config::BalerConfig;
use regex::Regex;
use tempfile::TempDir;

/// Hex digits of the content hash embedded in filenames.
pub const HASH: &str = "[0-9a-f]{16}";

/// Create a temp project from (relative path, content) pairs.
pub fn project(files: &[(&str, &str)]) -> TempDir {
    let dir = TempDir::new().unwrap();
    for (relative, content) in files {
        write(dir.path(), relative, content);
    }
    dir
}

pub fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// Parse an inline TOML config the way the CLI would.
pub fn config(source: &str) -> BalerConfig {
    let toml_val: toml::Value = toml::from_str(source).unwrap();
    let value = serde_json::to_value(toml_val).unwrap();
    BalerConfig::from_value(value)
        .unwrap()
        .materialize_mode(None)
        .unwrap()
}

/// All files under `dir`, as forward-slashed paths relative to it.
pub fn list_files(dir: &Path) -> Vec<String> {
    let mut files = Vec::new();
    collect(dir, dir, &mut files);
    files.sort();
    files
}

fn collect(root: &Path, dir: &Path, out: &mut Vec<String>) {
    for entry in fs::read_dir(dir).unwrap() {
        let entry = entry.unwrap();
        let path = entry.path();
        if path.is_dir() {
            collect(root, &path, out);
        } else {
            let relative = path
                .strip_prefix(root)
                .unwrap()
                .to_string_lossy()
                .replace(std::path::MAIN_SEPARATOR, "/");
            out.push(relative);
        }
    }
}

/// First file whose relative path matches the anchored `pattern`.
pub fn find_matching<'a>(files: &'a [String], pattern: &str) -> &'a String {
    let regex = Regex::new(&format!("^{pattern}$")).unwrap();
    files
        .iter()
        .find(|f| regex.is_match(f))
        .unwrap_or_else(|| panic!("no file matching '{pattern}' in {files:?}"))
}
