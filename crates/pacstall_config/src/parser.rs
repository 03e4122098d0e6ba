//! Structural validation of the configuration document.
//!
//! The parser works on the raw TOML table and checks every attribute by hand,
//! rather than through `serde`, so that each violation can be reported with
//! the exact attribute path the user has to fix:
//!
//! ```toml
//! [repository.main]
//! url = "https://github.com/pacstall/pacstall-programs"
//! branch = "master"
//!
//! [settings]
//! preferred_editor = "vim"
//! ```
//!
//! Nothing in this module touches the network.

use toml::{Table, Value};
use tracing::{debug, error};

use crate::errors::{ConfigError, ConfigResult};
use crate::git_provider::normalize_repository_url;
use crate::types::{RepositoryConfig, SettingsConfig};

#[cfg(test)]
#[path = "parser_tests.rs"]
mod tests;

/// Key of the table holding the repositories.
pub const REPOSITORY_KEY: &str = "repository";

/// Key of the table holding the settings.
pub const SETTINGS_KEY: &str = "settings";

/// Settings key naming the editor.
pub const PREFERRED_EDITOR_KEY: &str = "preferred_editor";

/// Older name of [`PREFERRED_EDITOR_KEY`], still honoured when the new key is absent.
pub const LEGACY_EDITOR_KEY: &str = "editor";

/// Parses the raw document text into a TOML table.
pub fn parse_document(content: &str) -> ConfigResult<Table> {
    toml::from_str::<Table>(content).map_err(|e| {
        error!("Failed to parse configuration file: {}", e);
        ConfigError::Parse {
            reason: e.to_string(),
        }
    })
}

/// Extracts the repository entries, in document order, and normalizes their URLs.
///
/// The returned entries have not been probed yet.
///
/// # Errors
///
/// - [`ConfigError::InvalidAttribute`] if the `repository` table is missing or
///   an entry lacks a string `url` or `branch`. Both attributes of the first
///   faulty entry are checked before failing; later entries are not examined.
/// - [`ConfigError::InvalidRepositoryUrl`] if a supported provider URL has the
///   wrong shape.
pub fn parse_repositories(document: &Table) -> ConfigResult<Vec<RepositoryConfig>> {
    let repositories = match document.get(REPOSITORY_KEY) {
        None => return Err(violation(format!("Config attribute '{REPOSITORY_KEY}' is required"))),
        Some(Value::Table(table)) => table,
        Some(_) => {
            return Err(violation(format!(
                "Config attribute '{REPOSITORY_KEY}' must be a table"
            )))
        }
    };

    let mut parsed = Vec::with_capacity(repositories.len());
    for (name, entry) in repositories {
        let Value::Table(entry) = entry else {
            return Err(violation(format!("Config attribute '{name}' must be a table")));
        };

        let mut violations = Vec::new();
        let url = required_string(entry, name, "url", &mut violations);
        let branch = required_string(entry, name, "branch", &mut violations);

        let (Some(url), Some(branch)) = (url, branch) else {
            return Err(ConfigError::InvalidAttribute { violations });
        };

        let normalized = normalize_repository_url(url)?;
        debug!(
            message = "Parsed repository entry",
            name = name.as_str(),
            url = normalized.as_str(),
            branch = branch
        );

        parsed.push(RepositoryConfig {
            name: name.clone(),
            url: normalized,
            branch: branch.to_string(),
            original_url: url.to_string(),
        });
    }

    Ok(parsed)
}

/// Extracts the `settings` table.
///
/// # Errors
///
/// [`ConfigError::InvalidAttribute`] if the table is missing or the editor is
/// not a string.
pub fn parse_settings(document: &Table) -> ConfigResult<SettingsConfig> {
    let settings = match document.get(SETTINGS_KEY) {
        None => return Err(violation(format!("Config attribute '{SETTINGS_KEY}' is required"))),
        Some(Value::Table(table)) => table,
        Some(_) => {
            return Err(violation(format!(
                "Config attribute '{SETTINGS_KEY}' must be a table"
            )))
        }
    };

    let key = if settings.contains_key(PREFERRED_EDITOR_KEY) {
        PREFERRED_EDITOR_KEY
    } else {
        LEGACY_EDITOR_KEY
    };

    let preferred_editor = match settings.get(key) {
        None => None,
        Some(Value::String(editor)) => Some(editor.clone()),
        Some(_) => {
            return Err(violation(format!(
                "Config attribute '{SETTINGS_KEY}.{key}' must be a string"
            )))
        }
    };

    Ok(SettingsConfig { preferred_editor })
}

/// Reads a required string attribute of a repository entry, recording any violation.
fn required_string<'a>(
    entry: &'a Table,
    repository: &str,
    attribute: &str,
    violations: &mut Vec<String>,
) -> Option<&'a str> {
    match entry.get(attribute) {
        Some(Value::String(value)) => Some(value.as_str()),
        Some(_) => {
            let message = format!("Config attribute '{repository}.{attribute}' must be a string");
            error!("{}", message);
            violations.push(message);
            None
        }
        None => {
            let message = format!("Config attribute '{repository}.{attribute}' is required");
            error!("{}", message);
            violations.push(message);
            None
        }
    }
}

fn violation(message: String) -> ConfigError {
    error!("{}", message);
    ConfigError::invalid_attribute(message)
}
