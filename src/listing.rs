//! # Repository Listing
//!
//! Enumerates every repository owned by an account by paging through the
//! GitHub "list repositories for a user" endpoint.
//!
//! The endpoint itself sits behind the [`PageSource`] trait so that the
//! pagination logic can be exercised without a network. [`HttpPageSource`]
//! is the implementation used by the CLI.

use std::time::Duration;

use log::debug;
use serde::Deserialize;

use crate::error::{Error, Result};
use crate::handle::AccountHandle;

/// Largest page size the listing endpoint accepts.
pub const PER_PAGE: u32 = 100;

/// One remote repository, as decoded from a listing page.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RepositoryDescriptor {
    /// Repository name, also used as the local directory name.
    pub name: String,
    /// URL handed to `git clone`.
    pub clone_url: String,
}

impl RepositoryDescriptor {
    pub fn new(name: impl Into<String>, clone_url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            clone_url: clone_url.into(),
        }
    }
}

/// Source of listing pages - allows mocking in tests
pub trait PageSource {
    /// Fetch one page (1-based) of at most `per_page` repositories.
    fn fetch_page(
        &self,
        handle: &AccountHandle,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<RepositoryDescriptor>>;
}

/// Fetch every repository owned by `handle`, in the order the endpoint
/// returns them.
///
/// Pagination ends at the first empty page, or right after a page holding
/// fewer than [`PER_PAGE`] entries since no page can follow it. Any failure
/// aborts the whole listing; no partial result is returned.
pub fn list_all_repositories(
    source: &dyn PageSource,
    handle: &AccountHandle,
) -> Result<Vec<RepositoryDescriptor>> {
    let mut repos = Vec::new();
    let mut page = 1;

    loop {
        let page_repos = source.fetch_page(handle, page, PER_PAGE)?;
        let count = page_repos.len();
        debug!("Page {} for {} returned {} repositories", page, handle, count);

        if page_repos.is_empty() {
            break;
        }
        repos.extend(page_repos);

        if count < PER_PAGE as usize {
            break;
        }
        page += 1;
    }

    Ok(repos)
}

/// Upper bound on establishing a connection to the listing API. Reads are
/// not bounded.
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

/// Blocking HTTP client for the GitHub REST API.
pub struct HttpPageSource {
    api_base: String,
    agent: ureq::Agent,
}

impl HttpPageSource {
    /// Create a page source rooted at `api_base`, e.g. `https://api.github.com`.
    pub fn new(api_base: &str) -> Self {
        let agent = ureq::AgentBuilder::new()
            .user_agent(concat!("gh-mirror/", env!("CARGO_PKG_VERSION")))
            .timeout_connect(CONNECT_TIMEOUT)
            .build();

        Self {
            api_base: api_base.trim_end_matches('/').to_string(),
            agent,
        }
    }

    /// The listing URL for `handle`, without query parameters.
    pub fn repos_url(&self, handle: &AccountHandle) -> String {
        format!("{}/users/{}/repos", self.api_base, handle)
    }
}

impl PageSource for HttpPageSource {
    fn fetch_page(
        &self,
        handle: &AccountHandle,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<RepositoryDescriptor>> {
        let url = self.repos_url(handle);
        debug!("GET {}?page={}&per_page={}", url, page, per_page);

        let response = self
            .agent
            .get(&url)
            .query("page", &page.to_string())
            .query("per_page", &per_page.to_string())
            .set("Accept", "application/vnd.github+json")
            .call();

        let response = match response {
            Ok(response) => response,
            Err(ureq::Error::Status(status, _)) => {
                return Err(Error::ListingFetch { url, status });
            }
            Err(ureq::Error::Transport(transport)) => {
                return Err(Error::Network {
                    url,
                    message: transport.to_string(),
                });
            }
        };

        let body = response.into_string().map_err(|e| Error::Network {
            url: url.clone(),
            message: e.to_string(),
        })?;

        serde_json::from_str(&body).map_err(|e| Error::ListingDecode {
            url,
            message: e.to_string(),
        })
    }
}
