use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One transformation rule: a pattern pair plus an ordered pipeline.
///
/// ```toml
/// [[rules]]
/// test = "\\.m?js$"
/// exclude = "node_modules"
/// pipeline = ["script"]
/// ```
///
/// Patterns are regexes matched against the asset path relative to the
/// project root (forward slashes on every platform). Rules are scanned in
/// declaration order and the first match wins.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleOptions {
    /// Include pattern.
    pub test: String,

    /// Optional exclude pattern; a match here rejects the rule.
    #[serde(default)]
    pub exclude: Option<String>,

    /// Stage names executed in order.
    pub pipeline: Vec<String>,

    /// Stage-specific options, keyed by stage name.
    ///
    /// Parsed into explicit option structs at pipeline construction time,
    /// so invalid combinations fail before any asset is read.
    #[serde(default)]
    pub options: Value,
}
