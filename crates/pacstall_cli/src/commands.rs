//! Command modules for the Pacstall CLI.
//!
//! Each submodule handles one command:
//!
//! - `install_cmd`, `remove_cmd`, `upgrade_cmd`: package operations that need
//!   root and the instance lock
//! - `download_cmd`: fetches pacscripts by name or URL
//! - `list_cmd`: lists installed packages
//! - `repo_cmd`: inspects the configured repositories
//! - `config_cmd`: edits or creates the configuration file

use std::path::PathBuf;

use pacstall_config::{ConfigFacade, PACSTALL_CONFIG_PATH};

use crate::args::Commands;
use crate::errors::Error;
use crate::instance_lock::{InstanceLock, LockOptions, LOCK_PATH};
use crate::privileges::{ensure_root, running_as_root};

pub mod config_cmd;
pub mod download_cmd;
pub mod install_cmd;
pub mod list_cmd;
pub mod remove_cmd;
pub mod repo_cmd;
pub mod upgrade_cmd;

/// Process-level state shared by all commands.
#[derive(Debug, Clone)]
pub struct CommandContext {
    pub config_path: PathBuf,
    pub is_root: bool,
    pub lock_path: PathBuf,
    pub lock_options: LockOptions,
    /// Arguments passed after the program name.
    pub args: Vec<String>,
}

impl Default for CommandContext {
    fn default() -> Self {
        Self {
            config_path: PathBuf::from(PACSTALL_CONFIG_PATH),
            is_root: running_as_root(),
            lock_path: PathBuf::from(LOCK_PATH),
            lock_options: LockOptions::default(),
            args: std::env::args().skip(1).collect(),
        }
    }
}

impl CommandContext {
    /// Opens the configuration file of this context.
    pub fn facade(&self) -> Result<ConfigFacade, Error> {
        Ok(ConfigFacade::new(&self.config_path)?)
    }

    /// Checks for root and takes the instance lock for `command`.
    pub async fn lock_for(&self, command: &str) -> Result<InstanceLock, Error> {
        ensure_root(command, &self.args, self.is_root)?;
        InstanceLock::acquire(&self.lock_path, &self.lock_options).await
    }
}

/// Runs `command`.
pub async fn execute(command: Commands, ctx: &CommandContext) -> Result<(), Error> {
    match command {
        Commands::Install(args) => install_cmd::execute(&args, ctx).await,
        Commands::Remove(args) => remove_cmd::execute(&args, ctx).await,
        Commands::Upgrade(args) => upgrade_cmd::execute(&args, ctx).await,
        Commands::Download(args) => download_cmd::execute(&args, ctx).await,
        Commands::List => list_cmd::execute(),
        Commands::Repo(cmd) => repo_cmd::execute(cmd, ctx).await,
        Commands::Config(args) => config_cmd::execute(args, ctx).await,
    }
}

#[cfg(test)]
impl CommandContext {
    /// A context whose config and lock files live in `dir`.
    pub(crate) fn in_dir(dir: &std::path::Path, is_root: bool) -> Self {
        Self {
            config_path: dir.join("config.toml"),
            is_root,
            lock_path: dir.join("pacstall.lock"),
            lock_options: LockOptions {
                poll_interval: std::time::Duration::from_millis(10),
                max_attempts: 3,
            },
            args: vec![],
        }
    }
}
