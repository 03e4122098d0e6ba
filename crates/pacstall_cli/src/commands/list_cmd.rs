use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use tracing::{debug, instrument};

use crate::errors::Error;

#[cfg(test)]
#[path = "list_cmd_tests.rs"]
mod tests;

/// Directory with one metadata file per installed package.
pub const METADATA_DIR: &str = "/var/log/pacstall/metadata";

/// An installed package and the version recorded in its metadata.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct InstalledPackage {
    pub name: String,
    pub version: Option<String>,
}

/// Execute the list command
#[instrument]
pub fn execute() -> Result<(), Error> {
    for package in list_installed(Path::new(METADATA_DIR))? {
        println!(
            "{}, {}",
            package.name,
            package.version.as_deref().unwrap_or("unknown")
        );
    }
    Ok(())
}

/// Reads the installed packages from `dir`, sorted by name.
///
/// A missing directory means nothing is installed.
pub fn list_installed(dir: &Path) -> Result<Vec<InstalledPackage>, Error> {
    let read_error = |path: &Path, e: std::io::Error| Error::ReadFailed {
        path: path.display().to_string(),
        reason: e.to_string(),
    };

    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(message = "No metadata directory", path = ?dir);
            return Ok(Vec::new());
        }
        Err(e) => return Err(read_error(dir, e)),
    };

    let mut packages = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| read_error(dir, e))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        let content = fs::read_to_string(&path).map_err(|e| read_error(&path, e))?;
        packages.push(InstalledPackage {
            name: entry.file_name().to_string_lossy().into_owned(),
            version: parse_version(&content),
        });
    }

    packages.sort();
    Ok(packages)
}

/// Extracts the value of the `_version="..."` line of a metadata file.
pub fn parse_version(metadata: &str) -> Option<String> {
    metadata
        .lines()
        .find_map(|line| line.strip_prefix("_version="))
        .map(|value| value.trim().trim_matches(|c| c == '"' || c == '\'').to_string())
}
