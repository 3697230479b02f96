//! Extraction of the account handle from a GitHub profile URL.

use std::fmt;

use crate::error::{Error, Result};

/// The only profile URL prefix that is accepted.
pub const GITHUB_PROFILE_PREFIX: &str = "https://github.com/";

/// A non-empty GitHub account name, e.g. `octocat`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AccountHandle(String);

impl AccountHandle {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for AccountHandle {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Extract the account handle from a profile URL.
///
/// The URL must start with [`GITHUB_PROFILE_PREFIX`]. The handle is the path
/// segment right after the prefix, ending at the next `/`, `?` or `#`.
///
/// ```
/// use gh_mirror::handle::extract_handle;
///
/// let handle = extract_handle("https://github.com/octocat/Hello-World").unwrap();
/// assert_eq!(handle.as_str(), "octocat");
///
/// assert!(extract_handle("http://notgithub.com/foo").is_err());
/// ```
pub fn extract_handle(profile_url: &str) -> Result<AccountHandle> {
    let input = profile_url.trim();

    let rest = input
        .strip_prefix(GITHUB_PROFILE_PREFIX)
        .ok_or_else(|| Error::InvalidInput {
            input: input.to_string(),
            message: format!("It should start with '{}'", GITHUB_PROFILE_PREFIX),
        })?;

    let handle = rest
        .split(['/', '?', '#'])
        .next()
        .unwrap_or_default();

    if handle.is_empty() {
        return Err(Error::InvalidInput {
            input: input.to_string(),
            message: "No username found after the host".to_string(),
        });
    }

    Ok(AccountHandle(handle.to_string()))
}
