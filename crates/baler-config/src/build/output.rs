use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::build::helpers::{default_filename, default_output_dir, default_true};

/// Output directory and naming options.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputOptions {
    /// Output root; created if missing, cleared by the `clean` hook.
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,

    /// Naming template for entry artifacts.
    ///
    /// Supported placeholders: `[name]`, `[contenthash]`, `[ext]`, `[query]`.
    /// A template without `[contenthash]` produces static names that
    /// overwrite between builds.
    #[serde(default = "default_filename")]
    pub filename: String,

    /// Whether to write `manifest.json` into the output root.
    #[serde(default = "default_true")]
    pub manifest: bool,
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
            filename: default_filename(),
            manifest: true,
        }
    }
}
