//! Command-line interface definition.
//!
//! Defined with clap v4 derive macros: one `build` subcommand plus global
//! verbosity and color flags.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Baler - an asset-pipeline build orchestrator
#[derive(Parser, Debug)]
#[command(
    name = "baler",
    version,
    about = "An asset-pipeline build orchestrator",
    long_about = "Baler walks an asset graph from configured entry points, runs each asset\n\
                  through the first matching rule's transform pipeline, and emits\n\
                  content-addressed output plus a manifest, with lifecycle hooks for\n\
                  cleaning, static copying, HTML shells, and environment injection."
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a build
    ///
    /// Loads `baler.toml` from the current directory (or `--config`),
    /// applies the selected mode's overrides, and writes the output tree.
    Build(BuildArgs),
}

#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Path to the config file (defaults to ./baler.toml)
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Build mode: development or production
    ///
    /// Overrides the `mode` key in the config file and selects the
    /// matching `[modes.<mode>]` override table.
    #[arg(short, long, value_name = "MODE")]
    pub mode: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_build_with_flags() {
        let cli = Cli::parse_from([
            "baler",
            "build",
            "--config",
            "custom.toml",
            "--mode",
            "production",
            "--verbose",
        ]);
        assert!(cli.verbose);
        let Command::Build(args) = cli.command;
        assert_eq!(args.config.as_deref(), Some(std::path::Path::new("custom.toml")));
        assert_eq!(args.mode.as_deref(), Some("production"));
    }

    #[test]
    fn verbose_conflicts_with_quiet() {
        assert!(Cli::try_parse_from(["baler", "build", "-v", "-q"]).is_err());
    }
}
