//! Normalization of repository URLs.
//!
//! Users declare repositories by the URL they see in their browser, e.g.
//! `https://github.com/pacstall/pacstall-programs`. Pacstall needs the root
//! under which the files of the repository can be fetched directly. This
//! module maps the web URLs of the officially supported git providers to their
//! raw-content roots:
//!
//! | Provider  | Web URL                           | Raw-content root                                |
//! |-----------|-----------------------------------|-------------------------------------------------|
//! | GitHub    | `https://github.com/acct/repo`    | `https://raw.githubusercontent.com/acct/repo`   |
//! | GitLab    | `https://gitlab.com/acct/repo`    | `https://gitlab.com/acct/repo/-/raw`            |
//! | Bitbucket | `https://bitbucket.org/acct/repo` | `https://bitbucket.org/acct/repo/raw`           |
//!
//! URLs of any other host are trusted to already be raw-content roots and are
//! returned unchanged apart from trailing slashes.
//!
//! Only the `account/repository` shape is accepted for supported providers.
//! A URL that already carries a branch path, such as
//! `https://github.com/acct/repo/tree/main`, is rejected; the branch belongs in
//! the `branch` attribute of the repository entry.

use tracing::{debug, error};

use crate::errors::{ConfigError, ConfigResult};

#[cfg(test)]
#[path = "git_provider_tests.rs"]
mod tests;

/// Root of the raw-content host used by GitHub.
pub const GITHUB_RAW_URL: &str = "https://raw.githubusercontent.com";

/// The officially supported git hosting providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GitProvider {
    GitHub,
    GitLab,
    Bitbucket,
}

impl GitProvider {
    /// All supported providers, in detection order.
    pub const ALL: [GitProvider; 3] = [GitProvider::GitHub, GitProvider::GitLab, GitProvider::Bitbucket];

    /// Returns the canonical web root of the provider.
    pub fn web_root(self) -> &'static str {
        match self {
            GitProvider::GitHub => "https://github.com",
            GitProvider::GitLab => "https://gitlab.com",
            GitProvider::Bitbucket => "https://bitbucket.org",
        }
    }

    /// Finds the provider hosting `url`, if it is a supported one.
    ///
    /// The web root must be followed by the end of the URL or a `/`, so
    /// `https://github.community/...` is not mistaken for GitHub.
    pub fn detect(url: &str) -> Option<GitProvider> {
        Self::ALL.into_iter().find(|provider| {
            url.strip_prefix(provider.web_root())
                .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
        })
    }

    /// Builds the raw-content root for a validated `/account/repository` path.
    fn raw_root(self, url: &str, repository_path: &str) -> String {
        match self {
            GitProvider::GitHub => format!("{GITHUB_RAW_URL}{repository_path}"),
            GitProvider::GitLab => format!("{url}/-/raw"),
            GitProvider::Bitbucket => format!("{url}/raw"),
        }
    }
}

/// Transforms a repository URL into the root URL of its raw files.
///
/// Trailing slashes are removed first. URLs of unsupported hosts are returned
/// as they are.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidRepositoryUrl`] when the URL belongs to a
/// supported provider but is not exactly `https://<provider>/<account>/<repository>`.
///
/// # Examples
///
/// ```
/// use pacstall_config::normalize_repository_url;
///
/// let url = normalize_repository_url("https://github.com/pacstall/pacstall-programs/").unwrap();
/// assert_eq!(url, "https://raw.githubusercontent.com/pacstall/pacstall-programs");
/// ```
pub fn normalize_repository_url(url: &str) -> ConfigResult<String> {
    let trimmed = url.trim_end_matches('/');

    let Some(provider) = GitProvider::detect(trimmed) else {
        debug!(message = "Unrecognized git provider, keeping url as-is", url = trimmed);
        return Ok(trimmed.to_string());
    };

    let repository_path = &trimmed[provider.web_root().len()..];
    if !has_account_and_repository(repository_path) {
        error!("Repository url '{}' is not valid.", url);
        return Err(ConfigError::InvalidRepositoryUrl {
            url: url.to_string(),
        });
    }

    let normalized = provider.raw_root(trimmed, repository_path);
    debug!(
        message = "Normalized repository url",
        provider = ?provider,
        url = url,
        normalized = normalized.as_str()
    );
    Ok(normalized)
}

/// Checks that `path` is exactly `/<account>/<repository>`.
fn has_account_and_repository(path: &str) -> bool {
    let Some(rest) = path.strip_prefix('/') else {
        return false;
    };

    let segments: Vec<&str> = rest.split('/').collect();
    segments.len() == 2 && segments.iter().all(|segment| !segment.is_empty())
}
