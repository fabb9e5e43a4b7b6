//! Logging setup for the Baler CLI.
//!
//! The library crates only emit `tracing` events; the subscriber is
//! installed here, once, before any command runs. Verbosity comes from
//! `--verbose` / `--quiet`, with `RUST_LOG` as the escape hatch.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the tracing subscriber.
///
/// Level resolution order: `--verbose` (debug for baler crates), then
/// `--quiet` (errors only), then `RUST_LOG`, then info.
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool) {
    let filter = if verbose {
        EnvFilter::new("baler_cli=debug,baler_bundler=debug,baler_config=debug,baler_graph=debug")
    } else if quiet {
        EnvFilter::new("baler_cli=error,baler_bundler=error")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new("baler_cli=info,baler_bundler=info,baler_config=info")
        })
    };

    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_ansi(!no_color)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}
