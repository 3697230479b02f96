//! # GitHub Account Mirror CLI
//!
//! This is the binary entry point for the `gh-mirror` command-line tool.
//!
//! Its primary responsibilities are:
//! - Parsing command-line arguments using `clap`.
//! - Running the mirror command with the parsed settings.
//! - Handling top-level application errors and translating them into a
//!   non-zero exit status.
//!
//! The mirroring logic lives in the `gh_mirror` library crate; the binary is
//! a thin wrapper around it.

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli.execute()
}
