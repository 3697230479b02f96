use std::path::Path;
use std::process::{Command, Output, Stdio};

use log::debug;

use crate::error::Error;

/// Clone `clone_url` into a new subdirectory of `parent_dir`
///
/// This uses the system git command, so any SSH keys, credential helpers or
/// tokens configured for git apply. `git` picks the directory name from the
/// URL, which for GitHub matches the repository name.
///
/// When `capture` is false git inherits the terminal and its progress output
/// is shown to the user; otherwise stdout and stderr are collected and
/// stderr is attached to the error on failure.
pub fn clone(
    program: &str,
    clone_url: &str,
    parent_dir: &Path,
    repository: &str,
    capture: bool,
) -> Result<(), Error> {
    let mut command = Command::new(program);
    command.arg("clone").arg(clone_url).current_dir(parent_dir);

    debug!(
        "Running {} clone {} in {}",
        program,
        clone_url,
        parent_dir.display()
    );
    run(command, program, "clone", repository, capture)
}

/// Pull the latest changes into the working copy at `repo_dir`
///
/// Local modifications and diverged history are left to git, whose own
/// error is surfaced unchanged.
pub fn pull(program: &str, repo_dir: &Path, repository: &str, capture: bool) -> Result<(), Error> {
    let mut command = Command::new(program);
    command.arg("pull").current_dir(repo_dir);

    debug!("Running {} pull in {}", program, repo_dir.display());
    run(command, program, "pull", repository, capture)
}

fn run(
    mut command: Command,
    program: &str,
    operation: &str,
    repository: &str,
    capture: bool,
) -> Result<(), Error> {
    let spawn_error = |e: std::io::Error| Error::GitSpawn {
        program: program.to_string(),
        message: e.to_string(),
    };

    let (status, stderr) = if capture {
        let Output { status, stderr, .. } = command
            .stdin(Stdio::null())
            .output()
            .map_err(spawn_error)?;
        (status, String::from_utf8_lossy(&stderr).into_owned())
    } else {
        let status = command.status().map_err(spawn_error)?;
        (status, String::new())
    };

    if !status.success() {
        return Err(Error::SyncTool {
            operation: operation.to_string(),
            repository: repository.to_string(),
            code: status.code(),
            stderr,
        });
    }

    Ok(())
}
