use colored::Colorize;
use tracing::{debug, info, instrument};

use super::CommandContext;
use crate::args::InstallArgs;
use crate::errors::Error;
use crate::prompt::confirm;

#[cfg(test)]
#[path = "install_cmd_tests.rs"]
mod tests;

/// Execute the install command
#[instrument(skip(ctx))]
pub async fn execute(args: &InstallArgs, ctx: &CommandContext) -> Result<(), Error> {
    check_makedeb(&args.packages, args.please)?;

    debug!(
        message = "Install requested",
        packages = ?args.packages,
        disable_prompts = args.disable_prompts,
        keep = args.keep,
        repo = ?args.repo
    );

    let _lock = ctx.lock_for("install").await?;

    if let Some(name) = &args.repo {
        let config = ctx.facade()?.read_config().await?;
        if config.repository(name).is_none() {
            return Err(Error::Usage(format!(
                "Repository '{}' is not configured",
                name
            )));
        }
    }

    let question = format!("Do you want to install {}?", args.packages.join(", "));
    if !confirm(&question, true, args.disable_prompts)? {
        info!("Installation cancelled");
        return Ok(());
    }

    Err(Error::NotImplemented(
        "building packages is not supported by this build".to_string(),
    ))
}

/// Refuses to install makedeb unless asked nicely.
fn check_makedeb(packages: &[String], please: bool) -> Result<(), Error> {
    if please || !packages.iter().any(|p| p == "makedeb") {
        return Ok(());
    }

    println!("{}", makedeb_banner());
    Err(Error::Usage(
        "if you really want to install makedeb, say --please".to_string(),
    ))
}

fn makedeb_banner() -> String {
    format!(
        r#"╭───────────────────────────────────────────────────────────╮
│ Oh, you thought it was {} but it was me, {}!1! │
╰───────────────────────────────────────────────────────────╯
       \   ∩~-~∩
        \ ξ {}×{} ξ
          ξ　~　ξ
          ξ　　 ξ
          ξ　　 “～～～〇
          ξ　　 　　　 ξ
          ξ  ξ  ξ~～~ξ ξ
          ξ_ξ ξ_ξ ξ_ξξ_ξ"#,
        "Makedeb".bold(),
        "Pacstall".bold(),
        "•".bright_red(),
        "•".bright_red()
    )
}
