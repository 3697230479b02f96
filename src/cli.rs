//! CLI argument parsing and command dispatch

use anyhow::Result;
use clap::Parser;

use crate::commands;
use gh_mirror::output::OutputConfig;

/// Mirror every repository of a GitHub account into a local directory
#[derive(Parser, Debug)]
#[command(name = "gh-mirror")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    mirror: commands::mirror::MirrorArgs,

    /// Colorize output (always, never, auto)
    #[arg(
        long,
        value_name = "WHEN",
        default_value = "auto",
        value_parser = ["always", "never", "auto"]
    )]
    color: String,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(
        long,
        value_name = "LEVEL",
        default_value = "warn",
        value_parser = ["error", "warn", "info", "debug", "trace"]
    )]
    log_level: String,
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        init_logging(&self.log_level);
        let output = OutputConfig::from_env_and_flag(&self.color);

        commands::mirror::execute(self.mirror, &output)
    }
}

/// Log to stderr at `level`; `RUST_LOG`, when set, refines the filter.
fn init_logging(level: &str) {
    let mut builder = env_logger::Builder::new();
    builder.parse_filters(level);
    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }
    builder.format_timestamp(None);

    // Only fails if a logger is already installed
    let _ = builder.try_init();
}
