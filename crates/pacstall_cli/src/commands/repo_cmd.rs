use colored::Colorize;
use pacstall_config::RepositoryConfig;
use tracing::instrument;

use super::CommandContext;
use crate::args::RepoCommands;
use crate::errors::Error;

#[cfg(test)]
#[path = "repo_cmd_tests.rs"]
mod tests;

/// Execute the repo command
#[instrument(skip(ctx))]
pub async fn execute(cmd: RepoCommands, ctx: &CommandContext) -> Result<(), Error> {
    match cmd {
        RepoCommands::List => {
            for line in list_repositories(ctx).await? {
                println!("{}", line);
            }
            Ok(())
        }
    }
}

/// Validates the configuration and renders one line per repository.
pub async fn list_repositories(ctx: &CommandContext) -> Result<Vec<String>, Error> {
    let config = ctx.facade()?.read_config().await?;
    Ok(config.repositories.iter().map(format_repository).collect())
}

/// Renders `name (branch) - original_url` with the name in green.
pub fn format_repository(repository: &RepositoryConfig) -> String {
    format!(
        "{} ({}) - {}",
        repository.name.green(),
        repository.branch,
        repository.original_url
    )
}
