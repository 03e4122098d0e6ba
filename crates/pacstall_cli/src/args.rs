//! Command line surface.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use pacstall_config::PACSTALL_CONFIG_PATH;

#[cfg(test)]
#[path = "args_tests.rs"]
mod tests;

/// Version shown by `pacstall --version`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Code name of this release.
pub const CODE_NAME: &str = "Kournikova";

/// An AUR inspired package manager for Ubuntu
#[derive(Parser, Debug)]
#[command(name = "pacstall", disable_version_flag = true, arg_required_else_help = true)]
pub struct Cli {
    /// Print pacstall version
    #[arg(short = 'v', long = "version")]
    pub version: bool,

    /// Print debug output
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Path to the configuration file
    #[arg(
        short,
        long,
        global = true,
        env = "PACSTALL_CONFIG",
        default_value = PACSTALL_CONFIG_PATH,
        value_name = "PATH"
    )]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Install packages
    Install(InstallArgs),

    /// Remove packages
    Remove(RemoveArgs),

    /// Upgrade packages
    Upgrade(UpgradeArgs),

    /// Download pacscripts
    Download(DownloadArgs),

    /// List installed packages
    List,

    /// Modify package sources
    #[command(subcommand)]
    Repo(RepoCommands),

    /// Edit or create the configuration file
    Config(ConfigArgs),
}

#[derive(Args, Debug, PartialEq, Eq)]
pub struct InstallArgs {
    /// Packages/pacscripts to install
    #[arg(required = true)]
    pub packages: Vec<String>,

    /// Disable prompts for unattended installation
    #[arg(short = 'p', long)]
    pub disable_prompts: bool,

    /// Retain the build directory after installation
    #[arg(short, long)]
    pub keep: bool,

    /// Install from the specified repository
    #[arg(short, long, value_name = "REPOSITORY")]
    pub repo: Option<String>,

    /// It's always good to be polite
    #[arg(long)]
    pub please: bool,
}

#[derive(Args, Debug, PartialEq, Eq)]
pub struct RemoveArgs {
    /// Packages to remove
    #[arg(required = true)]
    pub packages: Vec<String>,

    /// Disable prompts for unattended removal
    #[arg(short = 'p', long)]
    pub disable_prompts: bool,
}

#[derive(Args, Debug, PartialEq, Eq)]
pub struct UpgradeArgs {
    /// Packages to upgrade. Optional when --all is used
    pub packages: Vec<String>,

    /// Disable prompts for unattended upgrades
    #[arg(short = 'p', long)]
    pub disable_prompts: bool,

    /// Retain the build directory after upgrades
    #[arg(short, long)]
    pub keep: bool,

    /// Upgrade all packages interactively
    #[arg(short, long)]
    pub all: bool,
}

#[derive(Args, Debug, PartialEq, Eq)]
pub struct DownloadArgs {
    /// Pacscript names or URLs to download
    #[arg(required = true)]
    pub pacscripts: Vec<String>,

    /// Directory to save the pacscripts in
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// Only look up names in the specified repository
    #[arg(short, long, value_name = "REPOSITORY")]
    pub repo: Option<String>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum RepoCommands {
    /// List the configured package sources
    List,
}

#[derive(Args, Debug, PartialEq, Eq)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: Option<ConfigCommands>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum ConfigCommands {
    /// Open the configuration file in an editor and validate it
    Edit,

    /// Write the default configuration file
    Init {
        /// Overwrite an existing configuration file
        #[arg(long)]
        force: bool,
    },
}

/// Returns the colored version banner.
pub fn version_banner() -> String {
    format!(
        "{} {} {}",
        "Pacstall".bright_blue().bold(),
        VERSION.bright_white().bold(),
        CODE_NAME.bright_yellow().bold()
    )
}
