//! Configuration handling for Pacstall.
//!
//! This crate turns the `config.toml` document into a validated
//! [`PacstallConfig`]. Every repository declared in the document is
//! normalized into a raw-content root URL and probed for its `packagelist`
//! before the configuration is handed to a caller, so a caller either receives
//! a fully validated configuration or a single typed [`ConfigError`].
//!
//! The pipeline is:
//!
//! 1. [`ConfigFacade`] reads the document from disk.
//! 2. [`parser`] checks the structure and types of every entry.
//! 3. [`git_provider`] rewrites provider web URLs into raw-content roots.
//! 4. A [`RepositoryProbe`] confirms each root serves a `packagelist`.

pub mod error_codes;
pub mod errors;
pub mod facade;
pub mod git_provider;
pub mod parser;
pub mod repository_probe;
pub mod types;

pub use error_codes::ErrorCode;
pub use errors::{ConfigError, ConfigResult};
pub use facade::{read_config, ConfigFacade, MAX_CONCURRENT_PROBES};
pub use git_provider::{normalize_repository_url, GitProvider};
pub use repository_probe::{HttpRepositoryProbe, RepositoryProbe, DEFAULT_PROBE_TIMEOUT};
pub use types::{ConfigDocument, PacstallConfig, RepositoryConfig, SettingsConfig};

/// Location of the configuration document on a standard installation.
pub const PACSTALL_CONFIG_PATH: &str = "/etc/pacstall/config.toml";
