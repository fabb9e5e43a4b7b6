use serde::{Deserialize, Serialize};

use crate::build::helpers::default_true;

/// Post-transform optimization pass.
///
/// Runs on final content before hash computation and name assignment, so
/// content-addressed filenames never go stale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizationOptions {
    /// Master switch; off by default outside production overrides.
    #[serde(default)]
    pub enabled: bool,

    /// Minify script outputs.
    #[serde(default = "default_true")]
    pub scripts: bool,

    /// Minify stylesheet outputs.
    #[serde(default = "default_true")]
    pub styles: bool,

    /// Collapse whitespace in markup outputs.
    #[serde(default = "default_true")]
    pub markup: bool,
}

impl Default for OptimizationOptions {
    fn default() -> Self {
        Self {
            enabled: false,
            scripts: true,
            styles: true,
            markup: true,
        }
    }
}
