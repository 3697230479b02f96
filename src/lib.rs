//! # GitHub Account Mirror Library
//!
//! This library keeps a local mirror of every repository owned by a GitHub
//! account. It is designed to be used by the `gh-mirror` command-line tool
//! but can also be embedded in other automation.
//!
//! ## Quick Example
//!
//! ```no_run
//! use gh_mirror::handle::extract_handle;
//! use gh_mirror::listing::{list_all_repositories, HttpPageSource};
//! use gh_mirror::mirror::{SyncOptions, Synchronizer};
//! use gh_mirror::repository::DefaultGitOperations;
//! use std::path::Path;
//!
//! let handle = extract_handle("https://github.com/octocat").unwrap();
//! let source = HttpPageSource::new("https://api.github.com");
//! let repos = list_all_repositories(&source, &handle).unwrap();
//!
//! let sync = Synchronizer::new(Box::new(DefaultGitOperations::default()), SyncOptions::default());
//! let report = sync
//!     .synchronize(&repos, &handle, Path::new("."), |action| println!("{}", action))
//!     .unwrap();
//! assert!(report.is_success());
//! ```
//!
//! ## Core Concepts
//!
//! - **Handles (`handle`)**: Extracts the account name from a profile URL.
//! - **Listing (`listing`)**: Pages through the repository listing API and
//!   collects every repository's name and clone URL.
//! - **Mirroring (`mirror`)**: Computes the `github_repos_of_<handle>` root
//!   and clones missing repositories or pulls existing ones.
//! - **Git (`repository`, `git`)**: The trait seam to, and subprocess
//!   implementation of, the external `git` client.
//! - **Configuration (`config`)** and **output (`output`)**: Run settings
//!   and terminal presentation used by the CLI.
//!
//! ## Execution Flow
//!
//! 1.  **Extract**: Turn the profile URL into an account handle.
//! 2.  **List**: Fetch all repository descriptors, 100 per page.
//! 3.  **Synchronize**: Clone or pull each repository under the mirror root.

pub mod config;
pub mod error;
pub mod git;
pub mod handle;
pub mod listing;
pub mod mirror;
pub mod output;
pub mod repository;

#[cfg(test)]
mod handle_proptest;
