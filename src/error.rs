//! # Error Handling
//!
//! This module defines the centralized error type for `gh-mirror`. It uses
//! `thiserror` to describe every failure the mirroring pipeline can hit, from
//! a malformed profile URL to a `git` process exiting non-zero.
//!
//! ## Key Components
//!
//! - **`Error`**: One variant per failure mode. Each variant carries the
//!   context a user needs to act on it (the offending input, the URL that
//!   was requested, the repository that failed).
//!
//! - **`Result<T>`**: A type alias for `std::result::Result<T, Error>`, used
//!   throughout the library.
//!
//! None of these errors are recovered from inside the library. They are
//! propagated with `?` to the command layer, which reports them and exits
//! non-zero.

use thiserror::Error;

/// Main error type for gh-mirror operations
#[derive(Error, Debug)]
pub enum Error {
    /// The profile URL did not have the expected shape.
    #[error("Invalid GitHub URL '{input}': {message}")]
    InvalidInput { input: String, message: String },

    /// A run setting (flag or environment variable) is unusable.
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// The listing endpoint answered with a non-success status code.
    #[error("Unable to fetch repositories from {url} (Status Code: {status})")]
    ListingFetch { url: String, status: u16 },

    /// A listing page could not be decoded into repository descriptors.
    #[error("Unable to decode repository listing from {url}: {message}")]
    ListingDecode { url: String, message: String },

    /// A transport-level failure while talking to the listing endpoint.
    #[error("Network operation error: {url} - {message}")]
    Network { url: String, message: String },

    /// The version-control client ran but exited with a failure status.
    #[error("git {operation} failed for {repository} ({}){}", status_text(*code), stderr_suffix(stderr))]
    SyncTool {
        operation: String,
        repository: String,
        /// Exit code, `None` when the process was killed by a signal.
        code: Option<i32>,
        /// Captured stderr, empty when output was streamed to the terminal.
        stderr: String,
    },

    /// The version-control client could not be started.
    #[error("Failed to run '{program}': {message}")]
    GitSpawn { program: String, message: String },

    /// The worker pool for parallel synchronization could not be built.
    #[error("Failed to start worker pool: {message}")]
    WorkerPool { message: String },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A URL parsing error, wrapped from `url::ParseError`.
    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),
}

fn status_text(code: Option<i32>) -> String {
    match code {
        Some(code) => format!("exit status {}", code),
        None => "terminated by signal".to_string(),
    }
}

fn stderr_suffix(stderr: &str) -> String {
    let trimmed = stderr.trim();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!(": {}", trimmed)
    }
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
