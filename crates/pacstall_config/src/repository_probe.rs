//! Existence checks for repository manifests.
//!
//! A repository is only trusted once its `packagelist` can be fetched. The
//! [`RepositoryProbe`] trait abstracts the check so the facade can be driven by
//! a real HTTP client in production and by a stub in tests.

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, error, warn};

use crate::errors::{ConfigError, ConfigResult};

#[cfg(test)]
#[path = "repository_probe_tests.rs"]
mod tests;

/// Time allowed for a single probe before the repository is declared invalid.
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(10);

/// Checks whether a URL can be retrieved.
///
/// Implementations must be `Send + Sync`; probes of different repositories
/// run concurrently.
#[async_trait]
pub trait RepositoryProbe: Send + Sync {
    /// Returns `true` when `url` answers with a success status.
    ///
    /// Transport errors, timeouts and non-success statuses are all reported
    /// as `false`. No retry is attempted.
    async fn exists(&self, url: &str) -> bool;
}

/// [`RepositoryProbe`] backed by an HTTP `GET`.
#[derive(Debug, Clone)]
pub struct HttpRepositoryProbe {
    client: reqwest::Client,
}

impl HttpRepositoryProbe {
    /// Creates a probe using [`DEFAULT_PROBE_TIMEOUT`].
    pub fn new() -> ConfigResult<Self> {
        Self::with_timeout(DEFAULT_PROBE_TIMEOUT)
    }

    /// Creates a probe whose requests give up after `timeout`.
    pub fn with_timeout(timeout: Duration) -> ConfigResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("pacstall/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(client_build_error)?;

        Ok(Self { client })
    }

    /// Wraps an existing client, e.g. one shared with the download command.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl RepositoryProbe for HttpRepositoryProbe {
    async fn exists(&self, url: &str) -> bool {
        debug!(message = "Probing repository", url = url);

        match self.client.get(url).send().await {
            Ok(response) if response.status().is_success() => true,
            Ok(response) => {
                warn!(
                    message = "Repository probe returned a non-success status",
                    url = url,
                    status = response.status().as_u16()
                );
                false
            }
            Err(e) => {
                warn!(message = "Repository probe failed", url = url, error = %e);
                false
            }
        }
    }
}

fn client_build_error(e: reqwest::Error) -> ConfigError {
    error!("Failed to build the HTTP client: {}", e);
    ConfigError::Software {
        reason: format!("Failed to build the HTTP client: {e}"),
    }
}
