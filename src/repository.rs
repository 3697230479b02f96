//! # Version-Control Operations
//!
//! This module defines the seam between the mirror synchronizer and the
//! external `git` client.
//!
//! ## Design
//!
//! - **`GitOperations`**: the two operations the synchronizer depends on,
//!   clone and pull.
//! - **`DefaultGitOperations`**: the implementation used by the CLI, which
//!   runs the configured `git` program as a subprocess.
//!
//! Tests replace `DefaultGitOperations` with mock implementations to
//! observe which repositories get cloned or pulled, and to simulate
//! failures, without spawning any processes.

use std::path::Path;

use crate::error::Result;

/// Trait for git operations - allows mocking in tests
pub trait GitOperations: Send + Sync {
    /// Clone `clone_url` as a new subdirectory of `mirror_root`.
    fn clone_repository(&self, name: &str, clone_url: &str, mirror_root: &Path) -> Result<()>;

    /// Fast-forward the existing working copy at `repo_path`.
    fn pull_repository(&self, name: &str, repo_path: &Path) -> Result<()>;
}

/// The default implementation of `GitOperations`, which runs a real `git`
/// program.
#[derive(Debug, Clone)]
pub struct DefaultGitOperations {
    program: String,
    capture_output: bool,
}

impl DefaultGitOperations {
    /// Run `program` with its output streamed to the terminal.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            capture_output: false,
        }
    }

    /// Collect git's output instead of streaming it. Used when several
    /// repositories are synchronized at once.
    pub fn capture_output(mut self, capture: bool) -> Self {
        self.capture_output = capture;
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

impl Default for DefaultGitOperations {
    fn default() -> Self {
        Self::new("git")
    }
}

impl GitOperations for DefaultGitOperations {
    fn clone_repository(&self, name: &str, clone_url: &str, mirror_root: &Path) -> Result<()> {
        crate::git::clone(
            &self.program,
            clone_url,
            mirror_root,
            name,
            self.capture_output,
        )
    }

    fn pull_repository(&self, name: &str, repo_path: &Path) -> Result<()> {
        crate::git::pull(&self.program, repo_path, name, self.capture_output)
    }
}
