//! # Mirror Synchronization
//!
//! Brings the local mirror of an account in line with its repository
//! listing. Every repository ends up as a working copy under the mirror
//! root:
//!
//! - repositories with no local directory yet are cloned,
//! - repositories that already have one are pulled.
//!
//! Nothing is ever deleted, so repositories removed upstream stay mirrored.
//!
//! ## Failure policy
//!
//! By default the first failing `git` invocation aborts the run and the
//! remaining repositories are not attempted. Repositories synchronized
//! before the failure keep their new state. [`SyncOptions::keep_going`]
//! records failures and continues instead.
//!
//! ## Parallelism
//!
//! With [`SyncOptions::jobs`] greater than one, actions run on a bounded
//! rayon thread pool. Repeated names in the listing are held back until
//! the pool has finished, then handled one at a time.
//!
//! Routing (clone vs. pull) is decided as each repository is reached, so a
//! name listed twice is cloned once and then pulled.

use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use log::{info, warn};
use rayon::prelude::*;

use crate::error::{Error, Result};
use crate::handle::AccountHandle;
use crate::listing::RepositoryDescriptor;
use crate::repository::GitOperations;

/// Prefix of the mirror root directory name.
pub const MIRROR_ROOT_PREFIX: &str = "github_repos";

/// Directory name of the mirror root for `handle`: `github_repos_of_<handle>`.
pub fn mirror_root_name(handle: &AccountHandle) -> String {
    format!("{}_of_{}", MIRROR_ROOT_PREFIX, handle)
}

/// Full path of the mirror root for `handle` inside `base_dir`.
pub fn mirror_root(base_dir: &Path, handle: &AccountHandle) -> PathBuf {
    base_dir.join(mirror_root_name(handle))
}

/// What to do with a single repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncAction {
    /// No local copy yet: `git clone` inside the mirror root.
    Clone { name: String, clone_url: String },
    /// A local copy exists at `path`: `git pull` inside it.
    Pull { name: String, path: PathBuf },
}

impl SyncAction {
    pub fn name(&self) -> &str {
        match self {
            SyncAction::Clone { name, .. } | SyncAction::Pull { name, .. } => name,
        }
    }

    pub fn is_clone(&self) -> bool {
        matches!(self, SyncAction::Clone { .. })
    }
}

impl fmt::Display for SyncAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncAction::Clone { name, .. } => write!(f, "Cloning repository: {}", name),
            SyncAction::Pull { name, .. } => write!(f, "Updating repository: {}", name),
        }
    }
}

/// Decide whether `repo` is cloned or pulled, from what is on disk now.
///
/// A repository is pulled when `mirror_root/<name>` already exists.
pub fn route(repo: &RepositoryDescriptor, mirror_root: &Path) -> SyncAction {
    let path = mirror_root.join(&repo.name);
    if path.exists() {
        SyncAction::Pull {
            name: repo.name.clone(),
            path,
        }
    } else {
        SyncAction::Clone {
            name: repo.name.clone(),
            clone_url: repo.clone_url.clone(),
        }
    }
}

/// Split `repos` into first occurrences and repeats of an earlier name,
/// both in listing order.
fn split_repeated(
    repos: &[RepositoryDescriptor],
) -> (Vec<&RepositoryDescriptor>, Vec<&RepositoryDescriptor>) {
    let mut seen = HashSet::new();
    repos
        .iter()
        .partition(|repo| seen.insert(repo.name.clone()))
}

/// Tuning knobs for [`Synchronizer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncOptions {
    /// Number of repositories synchronized at once. `1` is fully sequential.
    pub jobs: usize,
    /// Record failures and continue with the remaining repositories.
    pub keep_going: bool,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            jobs: 1,
            keep_going: false,
        }
    }
}

/// A repository that failed while running with `keep_going`.
#[derive(Debug)]
pub struct SyncFailure {
    pub name: String,
    pub error: Error,
}

/// Outcome of a synchronization run.
#[derive(Debug, Default)]
pub struct SyncReport {
    pub mirror_root: PathBuf,
    pub cloned: usize,
    pub updated: usize,
    pub failures: Vec<SyncFailure>,
}

impl SyncReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Clones or updates every repository of an account under its mirror root.
pub struct Synchronizer {
    git_ops: Box<dyn GitOperations>,
    options: SyncOptions,
}

impl Synchronizer {
    pub fn new(git_ops: Box<dyn GitOperations>, options: SyncOptions) -> Self {
        Self { git_ops, options }
    }

    /// Synchronize `repos` into `base_dir/github_repos_of_<handle>`.
    ///
    /// The mirror root is created first, along with missing parents.
    /// `on_action` is called right before each action runs.
    pub fn synchronize<F>(
        &self,
        repos: &[RepositoryDescriptor],
        handle: &AccountHandle,
        base_dir: &Path,
        on_action: F,
    ) -> Result<SyncReport>
    where
        F: Fn(&SyncAction) + Sync,
    {
        let root = mirror_root(base_dir, handle);
        std::fs::create_dir_all(&root)?;
        info!("Mirroring {} repositories into {}", repos.len(), root.display());

        let mut report = SyncReport {
            mirror_root: root.clone(),
            ..SyncReport::default()
        };

        let outcomes = if self.options.jobs > 1 {
            let (first, repeated) = split_repeated(repos);
            let mut outcomes = self.run_parallel(&first, &root, &on_action)?;
            outcomes.extend(self.run_sequential(&repeated, &root, &on_action)?);
            outcomes
        } else {
            let all: Vec<&RepositoryDescriptor> = repos.iter().collect();
            self.run_sequential(&all, &root, &on_action)?
        };

        for (action, outcome) in outcomes {
            match outcome {
                Ok(()) if action.is_clone() => report.cloned += 1,
                Ok(()) => report.updated += 1,
                Err(error) => report.failures.push(SyncFailure {
                    name: action.name().to_string(),
                    error,
                }),
            }
        }

        Ok(report)
    }

    fn run_sequential<F>(
        &self,
        repos: &[&RepositoryDescriptor],
        root: &Path,
        on_action: &F,
    ) -> Result<Vec<(SyncAction, Result<()>)>>
    where
        F: Fn(&SyncAction) + Sync,
    {
        let mut outcomes = Vec::with_capacity(repos.len());
        for repo in repos {
            let action = route(repo, root);
            on_action(&action);
            let outcome = self.apply(&action, root);
            let outcome = self.settle(&action, outcome)?;
            outcomes.push((action, outcome));
        }
        Ok(outcomes)
    }

    /// `repos` must not repeat a name: routing happens on the worker, so two
    /// workers could both decide to clone the same directory.
    fn run_parallel<F>(
        &self,
        repos: &[&RepositoryDescriptor],
        root: &Path,
        on_action: &F,
    ) -> Result<Vec<(SyncAction, Result<()>)>>
    where
        F: Fn(&SyncAction) + Sync,
    {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.options.jobs)
            .build()
            .map_err(|e| Error::WorkerPool {
                message: e.to_string(),
            })?;

        if self.options.keep_going {
            let outcomes: Vec<(SyncAction, Result<()>)> = pool.install(|| {
                repos
                    .par_iter()
                    .map(|repo| {
                        let action = route(repo, root);
                        on_action(&action);
                        let outcome = self.apply(&action, root);
                        if let Err(e) = &outcome {
                            warn!("Failed to synchronize {}: {}", action.name(), e);
                        }
                        (action, outcome)
                    })
                    .collect()
            });
            return Ok(outcomes);
        }

        // Stop scheduling new work after the first failure; in-flight
        // actions still finish.
        let completed = Mutex::new(Vec::with_capacity(repos.len()));
        pool.install(|| {
            repos.par_iter().try_for_each(|repo| {
                let action = route(repo, root);
                on_action(&action);
                self.apply(&action, root)?;
                if let Ok(mut done) = completed.lock() {
                    done.push(action);
                }
                Ok::<(), Error>(())
            })
        })?;

        let completed = completed.into_inner().unwrap_or_else(|e| e.into_inner());
        Ok(completed.into_iter().map(|action| (action, Ok(()))).collect())
    }

    /// In fail-fast mode a failure becomes the run's error; with
    /// `keep_going` it is kept as the action's outcome.
    fn settle(&self, action: &SyncAction, outcome: Result<()>) -> Result<Result<()>> {
        match outcome {
            Err(e) if self.options.keep_going => {
                warn!("Failed to synchronize {}: {}", action.name(), e);
                Ok(Err(e))
            }
            Err(e) => Err(e),
            Ok(()) => Ok(Ok(())),
        }
    }

    fn apply(&self, action: &SyncAction, root: &Path) -> Result<()> {
        match action {
            SyncAction::Clone { name, clone_url } => {
                self.git_ops.clone_repository(name, clone_url, root)
            }
            SyncAction::Pull { name, path } => self.git_ops.pull_repository(name, path),
        }
    }
}
