use tracing::{debug, info, instrument};

use super::CommandContext;
use crate::args::RemoveArgs;
use crate::errors::Error;
use crate::prompt::confirm;

#[cfg(test)]
#[path = "remove_cmd_tests.rs"]
mod tests;

/// Execute the remove command
#[instrument(skip(ctx))]
pub async fn execute(args: &RemoveArgs, ctx: &CommandContext) -> Result<(), Error> {
    debug!(
        message = "Removal requested",
        packages = ?args.packages,
        disable_prompts = args.disable_prompts
    );

    let _lock = ctx.lock_for("remove").await?;

    let question = format!("Do you want to remove {}?", args.packages.join(", "));
    if !confirm(&question, true, args.disable_prompts)? {
        info!("Removal cancelled");
        return Ok(());
    }

    Err(Error::NotImplemented(
        "removing packages is not supported by this build".to_string(),
    ))
}
