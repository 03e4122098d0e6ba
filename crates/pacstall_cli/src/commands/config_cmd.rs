use std::env;
use std::fs;
use std::path::Path;
use std::process::Command;

use pacstall_config::{ConfigDocument, ErrorCode};
use tracing::{debug, info, instrument, warn};

use super::CommandContext;
use crate::args::{ConfigArgs, ConfigCommands};
use crate::errors::Error;

#[cfg(test)]
#[path = "config_cmd_tests.rs"]
mod tests;

/// Editor used when nothing else is configured.
pub const FALLBACK_EDITOR: &str = "sensible-editor";

/// Environment variable that overrides every other editor setting.
pub const PACSTALL_EDITOR_ENV: &str = "PACSTALL_EDITOR";

/// The user's general editor preference.
pub const EDITOR_ENV: &str = "EDITOR";

/// Execute the config command
#[instrument(skip(ctx))]
pub async fn execute(args: ConfigArgs, ctx: &CommandContext) -> Result<(), Error> {
    match args.command.unwrap_or(ConfigCommands::Edit) {
        ConfigCommands::Edit => edit_config(ctx).await,
        ConfigCommands::Init { force } => init_config(&ctx.config_path, force),
    }
}

/// Opens the configuration in an editor, then validates the result.
///
/// A non-zero exit status of the editor becomes the exit status of Pacstall.
#[instrument(skip(ctx))]
async fn edit_config(ctx: &CommandContext) -> Result<(), Error> {
    let facade = ctx.facade()?;

    let pacstall_editor = env_value(PACSTALL_EDITOR_ENV);
    let preferred = if pacstall_editor.is_some() {
        None
    } else {
        match facade.read_settings() {
            Ok(settings) => settings.preferred_editor,
            Err(e) => {
                warn!("Ignoring the editor setting of the configuration: {}", e);
                None
            }
        }
    };
    let editor = resolve_editor(pacstall_editor, preferred, env_value(EDITOR_ENV));

    run_editor(&editor, &ctx.config_path)?;

    facade.read_config().await?;
    info!("Configuration is valid");
    Ok(())
}

/// Picks the editor: `PACSTALL_EDITOR`, then the `preferred_editor` setting,
/// then `EDITOR`, then [`FALLBACK_EDITOR`].
pub fn resolve_editor(
    pacstall_editor: Option<String>,
    preferred_editor: Option<String>,
    editor: Option<String>,
) -> String {
    [pacstall_editor, preferred_editor, editor]
        .into_iter()
        .flatten()
        .find(|candidate| !candidate.trim().is_empty())
        .unwrap_or_else(|| FALLBACK_EDITOR.to_string())
}

/// Runs `editor` on `path` and waits for it.
///
/// `editor` may carry arguments, as in `code --wait`.
pub fn run_editor(editor: &str, path: &Path) -> Result<(), Error> {
    let mut words = editor.split_whitespace();
    let program = words.next().unwrap_or(FALLBACK_EDITOR);
    debug!(message = "Launching editor", editor = editor, path = ?path);

    let status = Command::new(program)
        .args(words)
        .arg(path)
        .status()
        .map_err(|e| Error::EditorLaunch {
            editor: editor.to_string(),
            reason: e.to_string(),
        })?;

    if status.success() {
        return Ok(());
    }
    Err(Error::Editor {
        editor: editor.to_string(),
        code: status.code().unwrap_or(ErrorCode::Software.as_i32()),
    })
}

/// Writes the default configuration to `path`.
///
/// An existing file is only replaced when `force` is set.
#[instrument]
pub fn init_config(path: &Path, force: bool) -> Result<(), Error> {
    let cant_create = |reason: String| Error::CantCreate {
        path: path.display().to_string(),
        reason,
    };

    if path.exists() && !force {
        return Err(cant_create(
            "the file already exists, use --force to overwrite it".to_string(),
        ));
    }

    let content = ConfigDocument::default()
        .to_toml()
        .map_err(|e| Error::Software(e.to_string()))?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| cant_create(e.to_string()))?;
    }
    fs::write(path, content).map_err(|e| cant_create(e.to_string()))?;

    info!("Wrote the default configuration to {}", path.display());
    Ok(())
}

fn env_value(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}
