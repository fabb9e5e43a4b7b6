//! CLI error types.
//!
//! Domain errors convert in via `#[from]`; everything renders through
//! miette at the binary boundary with a non-zero exit.

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    #[error("configuration error: {0}")]
    #[diagnostic(code(baler::config))]
    Config(#[from] baler_config::ConfigError),

    #[error("config file not found: {}", .0.display())]
    #[diagnostic(
        code(baler::config::not_found),
        help("create a baler.toml in the project root or pass --config <path>")
    )]
    ConfigNotFound(PathBuf),

    #[error("build failed: {0}")]
    #[diagnostic(code(baler::build))]
    Build(#[from] baler_bundler::Error),

    #[error("invalid argument: {0}")]
    #[diagnostic(code(baler::usage))]
    InvalidArgument(String),

    #[error("I/O error: {0}")]
    #[diagnostic(code(baler::io))]
    Io(#[from] std::io::Error),
}
