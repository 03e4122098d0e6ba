use tracing::{debug, info, instrument};

use super::CommandContext;
use crate::args::UpgradeArgs;
use crate::errors::Error;
use crate::prompt::confirm;

#[cfg(test)]
#[path = "upgrade_cmd_tests.rs"]
mod tests;

/// Execute the upgrade command
#[instrument(skip(ctx))]
pub async fn execute(args: &UpgradeArgs, ctx: &CommandContext) -> Result<(), Error> {
    validate(args)?;

    debug!(
        message = "Upgrade requested",
        packages = ?args.packages,
        disable_prompts = args.disable_prompts,
        keep = args.keep,
        all = args.all
    );

    let _lock = ctx.lock_for("upgrade").await?;

    let question = if args.all {
        "Do you want to upgrade all packages?".to_string()
    } else {
        format!("Do you want to upgrade {}?", args.packages.join(", "))
    };
    if !confirm(&question, true, args.disable_prompts)? {
        info!("Upgrade cancelled");
        return Ok(());
    }

    Err(Error::NotImplemented(
        "upgrading packages is not supported by this build".to_string(),
    ))
}

/// `--all` and an explicit package list are mutually exclusive, and one of
/// them is required.
fn validate(args: &UpgradeArgs) -> Result<(), Error> {
    let problem = match (args.all, args.packages.is_empty()) {
        (true, false) => "Cannot use --all and specify packages at the same time",
        (false, true) => "No packages specified",
        _ => return Ok(()),
    };
    Err(Error::Usage(problem.to_string()))
}
