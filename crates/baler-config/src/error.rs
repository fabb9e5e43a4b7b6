//! Error types for configuration validation and loading.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    // Config parsing/loading errors
    #[error("config not found")]
    NotFound,

    #[error("invalid TOML syntax: {0}")]
    InvalidToml(String),

    #[error("invalid config value for '{field}': {message}")]
    InvalidValue { field: String, message: String },

    #[error("invalid mode override: {0}")]
    InvalidModeOverride(String),

    // Schema validation errors (no filesystem checks)
    #[error("no entry points specified")]
    NoEntries,

    #[error("invalid rule pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    #[error("rule '{0}' declares an empty pipeline")]
    EmptyPipeline(String),

    #[error("unknown filename placeholder '[{0}]' (expected: name, contenthash, ext, query)")]
    UnknownPlaceholder(String),

    #[error("plugin kind cannot be empty")]
    EmptyPluginKind,

    // Filesystem validation errors (for CLI use)
    #[error("entry path not found: {0}")]
    EntryNotFound(PathBuf),

    #[error("alias '{alias}' does not point at a directory: {target}")]
    AliasTargetMissing { alias: String, target: PathBuf },

    // I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
