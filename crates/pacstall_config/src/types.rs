//! Typed representation of `config.toml`.

use std::collections::BTreeMap;

use serde::Serialize;

#[cfg(test)]
#[path = "types_tests.rs"]
mod tests;

/// Name of the manifest file every repository must serve.
pub const PACKAGELIST_FILE: &str = "packagelist";

/// A repository entry from `config.toml`.
///
/// Values of this type returned by [`crate::ConfigFacade::read_config`] have
/// been probed: `{url}/{branch}/packagelist` answered with a success status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryConfig {
    /// The key the repository was declared under.
    pub name: String,

    /// Raw-content root URL derived from `original_url`.
    pub url: String,

    /// Branch or ref the files are fetched from.
    pub branch: String,

    /// The URL exactly as written in the document.
    pub original_url: String,
}

impl RepositoryConfig {
    /// Root under which the files of the configured branch live.
    pub fn branch_root(&self) -> String {
        format!("{}/{}", self.url, self.branch)
    }

    /// URL of the `packagelist` manifest of this repository.
    pub fn packagelist_url(&self) -> String {
        format!("{}/{}", self.branch_root(), PACKAGELIST_FILE)
    }

    /// URL of the pacscript of `package` in this repository.
    pub fn pacscript_url(&self, package: &str) -> String {
        format!("{}/packages/{package}/{package}.pacscript", self.branch_root())
    }
}

/// The `settings` table of `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsConfig {
    /// Editor used by `pacstall config`. `None` means the environment decides.
    pub preferred_editor: Option<String>,
}

/// A fully validated configuration.
///
/// Each read produces a fresh value owned by the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PacstallConfig {
    /// Repositories in document order.
    pub repositories: Vec<RepositoryConfig>,
    pub settings: SettingsConfig,
}

impl PacstallConfig {
    /// Looks up a repository by the name it was declared under.
    pub fn repository(&self, name: &str) -> Option<&RepositoryConfig> {
        self.repositories.iter().find(|repo| repo.name == name)
    }
}

/// Serializable shape of `config.toml`, used to write a fresh document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigDocument {
    pub repository: BTreeMap<String, RepositoryEntry>,
    pub settings: SettingsEntry,
}

/// A `[repository.<name>]` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepositoryEntry {
    pub url: String,
    pub branch: String,
}

/// The `[settings]` table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SettingsEntry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_editor: Option<String>,
}

impl Default for ConfigDocument {
    /// The document shipped with a new installation: the official
    /// `pacstall-programs` repository and no settings.
    fn default() -> Self {
        let mut repository = BTreeMap::new();
        repository.insert(
            "pacstall".to_string(),
            RepositoryEntry {
                url: "https://github.com/pacstall/pacstall-programs".to_string(),
                branch: "master".to_string(),
            },
        );

        Self {
            repository,
            settings: SettingsEntry::default(),
        }
    }
}

impl ConfigDocument {
    /// Renders the document as pretty TOML.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}
