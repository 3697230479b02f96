//! # CLI Command Implementations
//!
//! `gh-mirror` has a single command, defined in [`mirror`]. It follows the
//! usual layout:
//! - An `Args` struct that defines the command's arguments and options,
//!   derived using `clap`.
//! - An `execute` function that takes the parsed `Args`, drives the
//!   `gh_mirror` library and prints progress.

pub mod mirror;
