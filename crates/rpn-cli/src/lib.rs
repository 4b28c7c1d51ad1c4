//! rpn CLI library
//!
//! Argument parsing, configuration and the key runner behind the `rpn`
//! binary.

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

mod commands;
mod config;
mod error;
mod runner;

pub use commands::Cli;
pub use config::{CliConfig, Verbosity};
pub use error::{CliError, CliResult};
pub use runner::Runner;

use rpn_engine::prelude::Seed;

/// Builds the effective configuration: the `--config` file (if any), then
/// command-line flags on top
pub fn build_config(cli: &Cli) -> CliResult<CliConfig> {
    let mut config = match &cli.config {
        Some(path) => CliConfig::load(path)?,
        None => CliConfig::default(),
    };

    if let Some(verbosity) = Verbosity::from_flags(cli.verbose, cli.quiet) {
        config = config.with_verbosity(verbosity);
    }
    if let Some(json) = &cli.seed {
        let seed = Seed::from_json(json).map_err(|e| CliError::seed(e.to_string()))?;
        config = config.with_seed(seed);
    }
    if cli.stack {
        config = config.with_show_stack(true);
    }
    if cli.fail_fast {
        config = config.with_fail_fast(true);
    }
    Ok(config)
}
