//! # Run Configuration
//!
//! `MirrorConfig` collects every setting a mirroring run depends on. The CLI
//! builds it from command-line flags and their environment fallbacks; the
//! defaults reproduce the plain interactive behaviour (GitHub's public API,
//! the current directory, `git` from `PATH`, one repository at a time,
//! stop at the first failure).

use std::path::PathBuf;

use url::Url;

use crate::error::{Error, Result};
use crate::mirror::SyncOptions;

/// Default base URL of the repository listing API.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Default version-control program.
pub const DEFAULT_GIT_PROGRAM: &str = "git";

/// Settings for one mirroring run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MirrorConfig {
    /// Base URL of the listing API.
    pub api_url: String,
    /// Directory that receives the `github_repos_of_<handle>` folder.
    pub output_dir: PathBuf,
    /// Program invoked for clone and pull.
    pub git_program: String,
    /// Concurrency and failure policy of the synchronizer.
    pub sync: SyncOptions,
}

impl Default for MirrorConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            output_dir: PathBuf::from("."),
            git_program: DEFAULT_GIT_PROGRAM.to_string(),
            sync: SyncOptions::default(),
        }
    }
}

impl MirrorConfig {
    /// Check the settings before anything touches the network or disk.
    ///
    /// The API URL must be an absolute `http` or `https` URL and at least
    /// one job is required.
    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.api_url)?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::Config {
                message: format!("The API URL '{}' must use http or https", self.api_url),
            });
        }

        if self.sync.jobs == 0 {
            return Err(Error::Config {
                message: "--jobs must be at least 1".to_string(),
            });
        }

        if self.git_program.trim().is_empty() {
            return Err(Error::Config {
                message: "The git program must not be empty".to_string(),
            });
        }

        Ok(())
    }

    /// Whether git output has to be captured instead of streamed.
    pub fn captures_git_output(&self) -> bool {
        self.sync.jobs > 1
    }
}
