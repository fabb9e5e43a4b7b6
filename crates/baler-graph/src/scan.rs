//! Reference extraction from text assets.
//!
//! Scanning is syntactic: a handful of compiled-once regexes per asset
//! kind. Script assets are scanned pre-transform, so a pipeline stage can
//! never hide a dependency from the walker.

use std::sync::LazyLock;

use regex::Regex;
use rustc_hash::FxHashSet;

use crate::asset::AssetKind;

// Script syntaxes: static import/export-from, bare import, require() and
// dynamic import().
static IMPORT_FROM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?:import|export)\s+[^'";]*?from\s*["']([^"']+)["']"#).unwrap()
});
static BARE_IMPORT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"import\s*["']([^"']+)["']"#).unwrap());
static REQUIRE_CALL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?:require|import)\s*\(\s*["']([^"']+)["']\s*\)"#).unwrap());

// Stylesheet syntaxes: @import (with or without url()) and url().
static CSS_IMPORT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"@import\s+(?:url\(\s*)?["']?([^"'()\s;]+)["']?"#).unwrap());
static CSS_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"url\(\s*["']?([^"'()]+)["']?\s*\)"#).unwrap());

// Markup: src/href attributes.
static HTML_ATTR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?:src|href)\s*=\s*["']([^"']+)["']"#).unwrap());

/// Extract raw reference strings from `source`, deduplicated in document
/// order. External URLs, data URIs, and fragments are skipped.
pub fn scan_references(kind: AssetKind, source: &str) -> Vec<String> {
    let patterns: &[&Regex] = match kind {
        AssetKind::Script => &[&IMPORT_FROM, &BARE_IMPORT, &REQUIRE_CALL],
        AssetKind::Stylesheet => &[&CSS_IMPORT, &CSS_URL],
        AssetKind::Markup => &[&HTML_ATTR],
        _ => return Vec::new(),
    };

    let mut seen = FxHashSet::default();
    let mut references = Vec::new();
    for pattern in patterns {
        for capture in pattern.captures_iter(source) {
            let raw = capture[1].trim();
            if is_external(raw) {
                continue;
            }
            if seen.insert(raw.to_string()) {
                references.push(raw.to_string());
            }
        }
    }
    references
}

fn is_external(reference: &str) -> bool {
    reference.is_empty()
        || reference.starts_with("http://")
        || reference.starts_with("https://")
        || reference.starts_with("//")
        || reference.starts_with("data:")
        || reference.starts_with("mailto:")
        || reference.starts_with('#')
}
