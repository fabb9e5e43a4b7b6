//! The `baler build` command.

use owo_colors::OwoColorize;

use baler_config::{
    discovery, BuildMode, ConfigDiscovery, ConfigError, ConfigValidator, FsValidator,
};

use crate::cli::BuildArgs;
use crate::error::{CliError, Result};
use crate::ui::format::{human_duration, human_size};

pub fn build_execute(args: BuildArgs) -> Result<()> {
    let root = std::env::current_dir()?;

    let mode = args
        .mode
        .as_deref()
        .map(str::parse::<BuildMode>)
        .transpose()
        .map_err(CliError::InvalidArgument)?;

    let config = match &args.config {
        Some(path) => {
            if !path.is_file() {
                return Err(CliError::ConfigNotFound(path.clone()));
            }
            discovery::load_path(path)?
        }
        None => ConfigDiscovery::new(&root).load().map_err(|err| match err {
            ConfigError::NotFound => CliError::ConfigNotFound(root.join(discovery::CONFIG_FILE)),
            other => CliError::Config(other),
        })?,
    };
    let config = config.materialize_mode(mode)?;
    tracing::debug!(mode = %config.mode, "configuration loaded");

    // Filesystem checks up front so a bad entry path fails before the
    // clean hook can empty the output root.
    FsValidator::new(&root).validate(&config.build)?;

    let report = baler_bundler::build(&config, &root)?;

    for file in &report.emitted {
        println!(
            "  {:>9}  {}",
            human_size(file.size).dimmed(),
            file.path
        );
    }
    println!(
        "{} built {} assets in {} ({} mode)",
        "✓".green().bold(),
        report.assets,
        human_duration(report.duration),
        report.mode
    );

    Ok(())
}
