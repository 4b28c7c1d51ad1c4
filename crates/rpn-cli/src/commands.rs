//! CLI command definitions using clap

use clap::Parser;
use std::path::PathBuf;

/// rpn: a reverse-Polish-notation calculator
///
/// Each KEY is a keypad name (enter, changeSign, drop), an alias
/// (chs, eex, del, dup, + - * /) or a number. Consecutive numbers type into
/// the same entry unless separated by `enter`. Without KEYS, lines are read
/// from stdin and the display is printed after each one. Put `--` before a
/// negative literal.
#[derive(Parser, Debug)]
#[command(name = "rpn")]
#[command(author, version)]
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (only errors are logged)
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Initial stack as JSON, e.g. '["1.2E-3", 456]'
    #[arg(long, value_name = "JSON")]
    pub seed: Option<String>,

    /// YAML configuration file
    #[arg(short, long, value_name = "PATH", env = "RPN_CONFIG")]
    pub config: Option<PathBuf>,

    /// Print the whole stack as JSON instead of the display value
    #[arg(short, long)]
    pub stack: bool,

    /// Exit with an error at the first rejected operation
    #[arg(long)]
    pub fail_fast: bool,

    /// Print the keypad layout and exit
    #[arg(long)]
    pub list_keys: bool,

    /// Key tokens to press in order
    #[arg(value_name = "KEYS")]
    pub keys: Vec<String>,
}
