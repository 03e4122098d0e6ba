//! Download pacscripts by name or by URL.
//!
//! A name is looked up in every configured repository, in the order the
//! repositories appear in `config.toml`, and the first repository that serves
//! `packages/<name>/<name>.pacscript` wins. Everything is fetched before the
//! first file is written, so a failed download leaves no partial results.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use pacstall_config::RepositoryConfig;
use reqwest::{Client, StatusCode};
use tracing::{debug, info, instrument};

use super::CommandContext;
use crate::args::DownloadArgs;
use crate::errors::Error;

#[cfg(test)]
#[path = "download_cmd_tests.rs"]
mod tests;

/// Time allowed for a single download.
pub const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(30);

const HTTP_ERROR: &str = "A HTTP error occurred while connecting to the URL";
const CONNECTION_ERROR: &str = "No internet connection detected";
const TIMEOUT_ERROR: &str = "Connection timed out. Check your internet connection";
const REDIRECT_ERROR: &str = "Too many redirections. Possibly bad URL";
const UNKNOWN_ERROR: &str = "Unknown exception occurred";

/// A fetched pacscript waiting to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    pub file_name: String,
    pub content: Vec<u8>,
}

/// Execute the download command
#[instrument(skip(ctx))]
pub async fn execute(args: &DownloadArgs, ctx: &CommandContext) -> Result<(), Error> {
    let client = Client::builder()
        .timeout(DOWNLOAD_TIMEOUT)
        .build()
        .map_err(|e| Error::Software(e.to_string()))?;

    for pacscript in &args.pacscripts {
        if is_url(pacscript) {
            url_file_name(pacscript)?;
        } else {
            validate_name(pacscript)?;
        }
    }

    let repositories = if args.pacscripts.iter().all(|p| is_url(p)) {
        Vec::new()
    } else {
        let config = ctx.facade()?.read_config().await?;
        select_repositories(config.repositories, args.repo.as_deref())?
    };

    let mut downloads = Vec::with_capacity(args.pacscripts.len());
    for pacscript in &args.pacscripts {
        let download = if is_url(pacscript) {
            fetch_url(&client, pacscript).await?
        } else {
            fetch_by_name(&client, &repositories, pacscript).await?
        };
        downloads.push(download);
    }

    for path in write_all(&args.output_dir, &downloads)? {
        info!("Downloaded {}", path.display());
    }
    Ok(())
}

/// Whether `pacscript` names a remote file rather than a package.
pub fn is_url(pacscript: &str) -> bool {
    pacscript.starts_with("https://") || pacscript.starts_with("http://")
}

/// Returns the last path segment of `url`, which names the saved file.
pub fn file_name_from_url(url: &str) -> Option<&str> {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    path.rsplit('/').next().filter(|name| is_plain_file_name(name))
}

fn url_file_name(url: &str) -> Result<&str, Error> {
    file_name_from_url(url)
        .ok_or_else(|| Error::Usage(format!("Cannot tell the file name of '{}'", url)))
}

/// Rejects pacscript names that could not be a single file name.
pub fn validate_name(name: &str) -> Result<(), Error> {
    if is_plain_file_name(name) {
        return Ok(());
    }
    Err(Error::Usage(format!("'{}' is not a valid pacscript name", name)))
}

/// Whether `name` is one non-empty path component other than `.` or `..`.
fn is_plain_file_name(name: &str) -> bool {
    !name.is_empty() && name != "." && name != ".." && !name.contains(['/', '\\', '\0'])
}

/// Keeps only the repository called `only`, when given.
pub fn select_repositories(
    repositories: Vec<RepositoryConfig>,
    only: Option<&str>,
) -> Result<Vec<RepositoryConfig>, Error> {
    match only {
        None => Ok(repositories),
        Some(name) => {
            let selected: Vec<_> = repositories.into_iter().filter(|r| r.name == name).collect();
            if selected.is_empty() {
                return Err(Error::Usage(format!("Repository '{}' is not configured", name)));
            }
            Ok(selected)
        }
    }
}

/// Fetches a pacscript from a full URL.
pub async fn fetch_url(client: &Client, url: &str) -> Result<Download, Error> {
    let file_name = url_file_name(url)?.to_string();

    let response = client
        .get(url)
        .send()
        .await
        .and_then(|r| r.error_for_status())
        .map_err(|e| transport_error(url, &e))?;
    let content = response.bytes().await.map_err(|e| transport_error(url, &e))?;

    Ok(Download {
        file_name,
        content: content.to_vec(),
    })
}

/// Fetches `<name>.pacscript` from the first repository that has it.
pub async fn fetch_by_name(
    client: &Client,
    repositories: &[RepositoryConfig],
    name: &str,
) -> Result<Download, Error> {
    for repository in repositories {
        let url = repository.pacscript_url(name);
        debug!(message = "Looking up pacscript", repository = %repository.name, url = %url);

        let response = client
            .get(&url)
            .send()
            .await
            .map_err(|e| transport_error(&url, &e))?;

        match response.status() {
            status if status.is_success() => {
                let content = response.bytes().await.map_err(|e| transport_error(&url, &e))?;
                return Ok(Download {
                    file_name: format!("{}.pacscript", name),
                    content: content.to_vec(),
                });
            }
            status if status == StatusCode::NOT_FOUND => continue,
            status => {
                debug!(message = "Unexpected status", url = %url, status = %status);
                return Err(Error::Unavailable(HTTP_ERROR.to_string()));
            }
        }
    }

    Err(Error::Unavailable(format!(
        "Package '{}' was not found in any repository",
        name
    )))
}

/// Writes every download into `dir`, creating it when needed.
pub fn write_all(dir: &Path, downloads: &[Download]) -> Result<Vec<PathBuf>, Error> {
    let write_error = |path: &Path, e: std::io::Error| {
        debug!(message = "Write failed", path = ?path, error = %e);
        Error::WriteFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        }
    };

    fs::create_dir_all(dir).map_err(|e| write_error(dir, e))?;

    let mut written = Vec::with_capacity(downloads.len());
    for download in downloads {
        if !is_plain_file_name(&download.file_name) {
            return Err(Error::Usage(format!(
                "'{}' is not a valid file name",
                download.file_name
            )));
        }
        let path = dir.join(&download.file_name);
        fs::write(&path, &download.content).map_err(|e| write_error(&path, e))?;
        written.push(path);
    }
    Ok(written)
}

fn transport_error(url: &str, e: &reqwest::Error) -> Error {
    let message = if e.is_status() {
        HTTP_ERROR
    } else if e.is_timeout() {
        TIMEOUT_ERROR
    } else if e.is_redirect() {
        REDIRECT_ERROR
    } else if e.is_connect() {
        CONNECTION_ERROR
    } else {
        UNKNOWN_ERROR
    };
    debug!(message = "Download failed", url = url, error = %e);
    Error::Unavailable(message.to_string())
}
