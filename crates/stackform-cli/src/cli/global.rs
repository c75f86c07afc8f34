//! Logging and configuration flags.
//!
//! None of these change what gets rendered; they only control diagnostics
//! on stderr and where settings are read from.

use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// Log level: `-v` info, `-vv` debug, `-vvv` trace. `RUST_LOG` wins.
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "More diagnostics on stderr (-v, -vv, -vvv)"
    )]
    pub verbose: u8,

    /// Errors only; the template is still printed.
    #[arg(
        short = 'q',
        long = "quiet",
        conflicts_with = "verbose",
        help = "Only report errors on stderr"
    )]
    pub quiet: bool,

    /// Honours `NO_COLOR` (<https://no-color.org>).
    #[arg(
        long = "no-color",
        env = "NO_COLOR",
        value_parser = clap::builder::FalseyValueParser::new(),
        help = "Plain stderr without ANSI colors"
    )]
    pub no_color: bool,

    /// TOML file with an `[output]` table. Without it, the platform config
    /// directory is tried.
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help = "Read settings from FILE"
    )]
    pub config: Option<PathBuf>,
}
