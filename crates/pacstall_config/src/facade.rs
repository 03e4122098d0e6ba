//! Single entry point for reading `config.toml`.
//!
//! [`ConfigFacade::read_config`] either returns a fully validated
//! [`PacstallConfig`] or exactly one [`ConfigError`]. Errors are detected in
//! this order:
//!
//! 1. the document cannot be read ([`ConfigError::NoInput`]);
//! 2. the document or one of its entries is malformed ([`ConfigError::Parse`],
//!    [`ConfigError::InvalidAttribute`], [`ConfigError::InvalidRepositoryUrl`]);
//! 3. a repository does not serve a `packagelist` ([`ConfigError::NoHost`]);
//! 4. a probe task failed unexpectedly ([`ConfigError::Software`]).
//!
//! Every step is read-only, so an aborted read leaves nothing behind.

use std::fs;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use futures::stream::{self, StreamExt};
use tokio::task::{JoinError, JoinHandle};
use toml::Table;
use tracing::{debug, error, instrument};

use crate::errors::{ConfigError, ConfigResult};
use crate::parser::{parse_document, parse_repositories, parse_settings};
use crate::repository_probe::{HttpRepositoryProbe, RepositoryProbe};
use crate::types::{PacstallConfig, RepositoryConfig, SettingsConfig};
use crate::PACSTALL_CONFIG_PATH;

#[cfg(test)]
#[path = "facade_tests.rs"]
mod tests;

/// Upper bound on repository probes in flight at the same time.
pub const MAX_CONCURRENT_PROBES: usize = 8;

/// Reads and validates the configuration document.
#[derive(Clone)]
pub struct ConfigFacade {
    path: PathBuf,
    probe: Arc<dyn RepositoryProbe>,
}

impl std::fmt::Debug for ConfigFacade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigFacade")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

impl ConfigFacade {
    /// Creates a facade for the document at `path`, probing repositories over HTTP.
    pub fn new(path: impl Into<PathBuf>) -> ConfigResult<Self> {
        let probe = HttpRepositoryProbe::new()?;
        Ok(Self::with_probe(path, Arc::new(probe)))
    }

    /// Creates a facade that validates repositories with `probe`.
    pub fn with_probe(path: impl Into<PathBuf>, probe: Arc<dyn RepositoryProbe>) -> Self {
        Self {
            path: path.into(),
            probe,
        }
    }

    /// Path of the configuration document.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads, parses and validates the whole configuration.
    ///
    /// Every repository is checked structurally before any of them is probed.
    /// Probing stops at the first repository, in document order, whose
    /// `packagelist` cannot be fetched.
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub async fn read_config(&self) -> ConfigResult<PacstallConfig> {
        let document = self.read_document()?;
        let candidates = parse_repositories(&document)?;
        let settings = parse_settings(&document)?;

        let repositories = self.validate_repositories(candidates).await?;
        debug!(
            message = "Configuration validated",
            repositories = repositories.len()
        );

        Ok(PacstallConfig {
            repositories,
            settings,
        })
    }

    /// Reads only the `settings` table, without probing any repository.
    pub fn read_settings(&self) -> ConfigResult<SettingsConfig> {
        let document = self.read_document()?;
        parse_settings(&document)
    }

    /// Reads the document as a raw, not yet validated, TOML table.
    pub fn read_document(&self) -> ConfigResult<Table> {
        debug!(message = "Reading configuration", path = ?self.path);

        let content = fs::read_to_string(&self.path).map_err(|e| {
            error!(
                "Could not read repositories from file '{}'. {}",
                self.path.display(),
                e
            );
            ConfigError::NoInput {
                path: self.path.display().to_string(),
                reason: e.to_string(),
            }
        })?;

        parse_document(&content)
    }

    /// Probes every candidate with at most [`MAX_CONCURRENT_PROBES`] in flight.
    ///
    /// Results are consumed in document order. Returning early drops the
    /// stream, which aborts the probes already in flight and never starts the
    /// rest.
    async fn validate_repositories(
        &self,
        candidates: Vec<RepositoryConfig>,
    ) -> ConfigResult<Vec<RepositoryConfig>> {
        let urls: Vec<String> = candidates.iter().map(RepositoryConfig::packagelist_url).collect();
        let mut probes = stream::iter(urls.into_iter().map(|url| {
            let probe = Arc::clone(&self.probe);
            AbortOnDrop(tokio::spawn(async move { probe.exists(&url).await }))
        }))
        .buffered(MAX_CONCURRENT_PROBES);

        let mut index = 0;
        while let Some(outcome) = probes.next().await {
            let repo = &candidates[index];
            index += 1;

            match outcome {
                Ok(true) => {
                    debug!(message = "Repository is valid", name = repo.name.as_str());
                }
                Ok(false) => {
                    error!(
                        "Repository '{}' does not have a packagelist at '{}'",
                        repo.name,
                        repo.packagelist_url()
                    );
                    return Err(ConfigError::NoHost {
                        name: repo.name.clone(),
                        url: repo.packagelist_url(),
                    });
                }
                Err(e) => {
                    error!("Unknown error has occurred. {}", e);
                    return Err(ConfigError::Software {
                        reason: format!("Validation of repository '{}' failed: {e}", repo.name),
                    });
                }
            }
        }

        Ok(candidates)
    }
}

/// A spawned task that is aborted when its handle is dropped.
struct AbortOnDrop<T>(JoinHandle<T>);

impl<T> Future for AbortOnDrop<T> {
    type Output = Result<T, JoinError>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.0).poll(cx)
    }
}

impl<T> Drop for AbortOnDrop<T> {
    fn drop(&mut self) {
        self.0.abort();
    }
}

/// Reads the configuration at [`PACSTALL_CONFIG_PATH`] using the HTTP probe.
pub async fn read_config() -> ConfigResult<PacstallConfig> {
    ConfigFacade::new(PACSTALL_CONFIG_PATH)?.read_config().await
}
