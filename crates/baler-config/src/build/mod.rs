//! Core build configuration types shared across Baler crates.

mod helpers;
mod optimize;
mod output;
mod plugin;
mod resolve;
mod rules;
mod types;

use serde::{Deserialize, Serialize};

pub use optimize::OptimizationOptions;
pub use output::OutputOptions;
pub use plugin::PluginOptions;
pub use resolve::ResolveOptions;
pub use rules::RuleOptions;
pub use types::{DefaultPolicy, EntryOptions};

use helpers::default_transform_timeout_ms;

/// Main build configuration.
///
/// Flattened into the top level of `baler.toml`; every field has a serde
/// default so a minimal config only needs an entry point.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildOptions {
    /// Entry points: a single path or a table of named entries.
    #[serde(default)]
    pub entry: EntryOptions,

    /// Output directory and naming template.
    #[serde(default)]
    pub output: OutputOptions,

    /// Reference resolution: extension candidates and alias table.
    #[serde(default)]
    pub resolve: ResolveOptions,

    /// Ordered transformation rules; the first match wins.
    #[serde(default)]
    pub rules: Vec<RuleOptions>,

    /// Lifecycle hook registrations, in registration order.
    #[serde(default)]
    pub plugins: Vec<PluginOptions>,

    /// Post-transform optimization pass.
    #[serde(default)]
    pub optimization: OptimizationOptions,

    /// What to do with an asset no rule matches.
    #[serde(default)]
    pub default_policy: DefaultPolicy,

    /// Per-asset transform budget in milliseconds.
    #[serde(default = "default_transform_timeout_ms")]
    pub transform_timeout_ms: u64,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            entry: EntryOptions::default(),
            output: OutputOptions::default(),
            resolve: ResolveOptions::default(),
            rules: Vec::new(),
            plugins: Vec::new(),
            optimization: OptimizationOptions::default(),
            default_policy: DefaultPolicy::default(),
            transform_timeout_ms: default_transform_timeout_ms(),
        }
    }
}
