use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::build::helpers::default_true;

/// One hook registration.
///
/// Plugins are plain data records; the bundler instantiates the built-in
/// hook named by `kind` with `options` at build start. Registration order
/// within an event is declaration order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PluginOptions {
    /// Built-in hook kind: `clean`, `copy-static`, `html`, `define-env`.
    pub kind: String,

    /// Optional friendly name used in logs and errors.
    #[serde(default)]
    pub name: Option<String>,

    /// Hook-specific configuration, validated at instantiation.
    #[serde(default)]
    pub options: Value,

    /// Execution order within an event (lower runs earlier; ties keep
    /// declaration order).
    #[serde(default)]
    pub order: i32,

    /// Whether the hook is registered at all.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Best-effort hooks log failures instead of aborting the build.
    #[serde(default)]
    pub best_effort: bool,
}

impl PluginOptions {
    /// Display name: explicit `name` or the `kind`.
    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.kind)
    }
}
