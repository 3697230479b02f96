//! Shared test utilities for the CLI end-to-end tests.
//!
//! ## Usage
//!
//! Add `mod common;` to your test file, then use the helpers:
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     let server = FakeListingServer::with_repos(&["hello-world"]);
//!     let fixture = TestFixture::new();
//!     fixture.command_for(&server).arg("https://github.com/octocat");
//! }
//! ```

use assert_fs::prelude::*;
use serde_json::{json, Value};
use std::io::{BufRead, BufReader, Write};
use std::net::{TcpListener, TcpStream};
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::{Arc, Mutex};
use std::thread;

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    pub use assert_cmd::cargo::cargo_bin_cmd;
    #[allow(unused_imports)]
    pub use assert_fs::prelude::*;
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::{git_available, FakeListingServer, TestFixture, PROFILE_URL};
}

/// Profile URL used by most tests.
pub const PROFILE_URL: &str = "https://github.com/octocat";

/// Whether a working `git` is on `PATH`.
///
/// Tests that drive the real client return early when it is missing.
#[allow(dead_code)]
pub fn git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

/// A minimal HTTP server standing in for the repository listing endpoint.
///
/// Each request is answered with the JSON array for the requested `page`
/// (1-based), or `[]` past the last page. Connections are served one at a
/// time on a background thread that lives as long as the test process.
pub struct FakeListingServer {
    base_url: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl FakeListingServer {
    /// Serve `pages` as consecutive listing pages.
    pub fn start(pages: Vec<Vec<Value>>) -> Self {
        Self::spawn(pages, None)
    }

    /// Serve one page holding a repository per name.
    pub fn with_repos(names: &[&str]) -> Self {
        let page = names
            .iter()
            .map(|name| repo_json(name, &format!("https://github.com/octocat/{}.git", name)))
            .collect();
        Self::start(vec![page])
    }

    /// Serve `count` repositories split into pages of 100.
    #[allow(dead_code)]
    pub fn with_repo_count(count: usize) -> Self {
        let repos: Vec<Value> = (0..count)
            .map(|i| {
                let name = format!("repo-{:03}", i);
                let url = format!("https://github.com/octocat/{}.git", name);
                repo_json(&name, &url)
            })
            .collect();
        Self::start(repos.chunks(100).map(|c| c.to_vec()).collect())
    }

    /// Answer every request with `status` and an error body.
    #[allow(dead_code)]
    pub fn failing(status: u16) -> Self {
        Self::spawn(Vec::new(), Some(status))
    }

    fn spawn(pages: Vec<Vec<Value>>, status: Option<u16>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind listener");
        let addr = listener.local_addr().expect("Failed to read local address");
        let requests = Arc::new(Mutex::new(Vec::new()));
        let log = requests.clone();

        thread::spawn(move || {
            for stream in listener.incoming().flatten() {
                let _ = serve(stream, &pages, status, &log);
            }
        });

        Self {
            base_url: format!("http://{}", addr),
            requests,
        }
    }

    /// Base URL to pass as `--api-url`.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Request targets (path and query) received so far.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

/// JSON for one repository, shaped like the GitHub API response.
pub fn repo_json(name: &str, clone_url: &str) -> Value {
    json!({
        "id": 1,
        "name": name,
        "full_name": format!("octocat/{}", name),
        "private": false,
        "clone_url": clone_url,
    })
}

fn serve(
    stream: TcpStream,
    pages: &[Vec<Value>],
    status: Option<u16>,
    log: &Mutex<Vec<String>>,
) -> std::io::Result<()> {
    let mut reader = BufReader::new(stream.try_clone()?);
    let mut request_line = String::new();
    reader.read_line(&mut request_line)?;

    // Drain the headers
    loop {
        let mut header = String::new();
        if reader.read_line(&mut header)? == 0 || header == "\r\n" || header == "\n" {
            break;
        }
    }

    let target = request_line
        .split_whitespace()
        .nth(1)
        .unwrap_or_default()
        .to_string();
    log.lock().unwrap().push(target.clone());

    let (code, reason, body) = match status {
        Some(code) => (code, "Error", r#"{"message":"Not Found"}"#.to_string()),
        None => {
            let page = query_param(&target, "page").unwrap_or(1);
            let items = page
                .checked_sub(1)
                .and_then(|i| pages.get(i))
                .cloned()
                .unwrap_or_default();
            (200, "OK", Value::Array(items).to_string())
        }
    };

    let mut stream = stream;
    write!(
        stream,
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        code,
        reason,
        body.len(),
        body
    )?;
    stream.flush()
}

fn query_param(target: &str, key: &str) -> Option<usize> {
    let query = target.split_once('?')?.1;
    query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(k, _)| *k == key)
        .and_then(|(_, v)| v.parse().ok())
}

/// A test fixture that provides a temporary working directory.
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
}

impl TestFixture {
    /// Create a new test fixture with an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: assert_fs::TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Create an (empty) directory at `path` inside the fixture.
    #[allow(dead_code)]
    pub fn with_dir(self, path: &str) -> Self {
        self.temp_dir
            .child(path)
            .create_dir_all()
            .expect("Failed to create directory");
        self
    }

    /// Get the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Path of the mirror root `gh-mirror` creates for `octocat`.
    #[allow(dead_code)]
    pub fn mirror_root(&self) -> PathBuf {
        self.path().join("github_repos_of_octocat")
    }

    /// Create a command running in this fixture's directory, with plain
    /// output.
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("gh-mirror");
        cmd.current_dir(self.path())
            .env_remove("GH_MIRROR_API_URL")
            .env_remove("GH_MIRROR_OUTPUT_DIR")
            .env_remove("GH_MIRROR_GIT")
            .arg("--color=never");
        cmd
    }

    /// Create a command whose listing requests go to `server`.
    pub fn command_for(&self, server: &FakeListingServer) -> assert_cmd::Command {
        let mut cmd = self.command();
        cmd.arg("--api-url").arg(server.base_url());
        cmd
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_param() {
        assert_eq!(
            query_param("/users/octocat/repos?page=2&per_page=100", "page"),
            Some(2)
        );
        assert_eq!(
            query_param("/users/octocat/repos?page=2&per_page=100", "per_page"),
            Some(100)
        );
        assert_eq!(query_param("/users/octocat/repos", "page"), None);
    }

    #[test]
    fn test_fixture_creates_temp_dir() {
        let fixture = TestFixture::new().with_dir("nested/dir");
        assert!(fixture.path().join("nested/dir").is_dir());
    }
}
