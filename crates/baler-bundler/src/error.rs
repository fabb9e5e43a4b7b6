//! Error types for the build orchestrator.
//!
//! Every fatal category names the offending asset, stage, or hook so the
//! CLI can print an actionable message. Failures are deterministic given
//! fixed inputs; nothing here is retried.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    // Pre-build configuration failures
    #[error(transparent)]
    Config(#[from] baler_config::ConfigError),

    #[error("unknown pipeline stage '{stage}'")]
    UnknownStage { stage: String },

    #[error("invalid options for stage '{stage}': {message}")]
    InvalidStageOptions { stage: String, message: String },

    #[error("unknown plugin kind '{kind}'")]
    UnknownPluginKind { kind: String },

    #[error("invalid options for plugin '{plugin}': {message}")]
    InvalidPluginOptions { plugin: String, message: String },

    #[error("invalid filename template '{template}': {message}")]
    InvalidTemplate { template: String, message: String },

    // Graph construction failures (unresolved references, unreadable files)
    #[error(transparent)]
    Graph(#[from] baler_graph::GraphError),

    // Transform failures
    #[error("stage '{stage}' failed for '{asset}': {message}")]
    Transform {
        stage: String,
        asset: String,
        message: String,
    },

    #[error("transform of '{asset}' exceeded its {timeout_ms} ms budget")]
    TransformTimeout { asset: String, timeout_ms: u64 },

    #[error("no rule matches '{0}' and the default policy is reject")]
    NoRuleMatched(String),

    // Emission failures
    #[error("output collision: '{path}' claimed by both '{first}' and '{second}'")]
    OutputCollision {
        path: String,
        first: String,
        second: String,
    },

    #[error("invalid output path: {0}")]
    InvalidOutputPath(String),

    #[error("write failed: {0}")]
    WriteFailure(String),

    // Hook failures
    #[error("hook '{hook}' failed: {message}")]
    Plugin { hook: String, message: String },

    #[error("definitions are frozen; '{key}' must be set by a beforeBuild hook")]
    DefinitionsFrozen { key: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
