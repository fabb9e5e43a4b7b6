//! Baler CLI - asset-pipeline build orchestrator.
//!
//! Handles argument parsing, logging initialization, and command dispatch.

use clap::Parser;

use baler_cli::{cli, commands, logger};
use miette::Result;

fn main() -> Result<()> {
    let args = cli::Cli::parse();

    logger::init_logger(args.verbose, args.quiet, args.no_color);
    if args.no_color {
        owo_colors::set_override(false);
    }

    let result = match args.command {
        cli::Command::Build(build_args) => commands::build_execute(build_args),
    };

    // Render CLI errors through miette for readable diagnostics.
    result.map_err(miette::Report::new)
}
