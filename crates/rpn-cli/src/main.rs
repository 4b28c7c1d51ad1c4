//! rpn: reverse-Polish-notation calculator
//!
//! ## Usage
//!
//! ```bash
//! rpn 1 enter 2 +                  # prints 3
//! rpn --seed '[0, 1]' /            # rejected, prints 0
//! rpn --stack 1.5 enter 2 eex 3    # prints ["2E3",1.5]
//! echo "6 enter 7 *" | rpn         # reads lines from stdin
//! ```

use std::io::{self, IsTerminal};
use std::process::ExitCode;

use clap::Parser;
use rpn_cli::{build_config, Cli, CliResult, Runner, Verbosity};
use rpn_engine::prelude::Keypad;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();
    let config = build_config(&cli)?;
    init_tracing(config.verbosity);

    if cli.list_keys {
        println!("{}", Keypad::new().render());
        return Ok(());
    }

    let quiet = config.verbosity.is_quiet();
    let mut runner = Runner::new(config, io::stdout().lock());
    if cli.keys.is_empty() {
        let stdin = io::stdin();
        if stdin.is_terminal() && !quiet {
            eprintln!("Reading keys from stdin, one line at a time (Ctrl-D to exit)");
        }
        runner.run_reader(stdin.lock())
    } else {
        runner.run_tokens(&cli.keys)
    }
}

/// Logs to stderr; `RUST_LOG` applies only at the default verbosity
fn init_tracing(verbosity: Verbosity) {
    let filter = match verbosity {
        Verbosity::Normal => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(verbosity.filter_directive())),
        _ => EnvFilter::new(verbosity.filter_directive()),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}
