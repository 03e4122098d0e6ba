//! Root privilege checks.

use nix::unistd::Uid;
use tracing::debug;

use crate::errors::Error;
use crate::message::{fancy, MessageKind};

#[cfg(test)]
#[path = "privileges_tests.rs"]
mod tests;

/// Whether the process runs with an effective UID of root.
pub fn running_as_root() -> bool {
    Uid::effective().is_root()
}

/// Fails with [`Error::NotRoot`] unless `is_root` holds.
///
/// `args` are the arguments the user passed after `pacstall`, used to suggest
/// the command to run again with `sudo`.
pub fn ensure_root(command: &str, args: &[String], is_root: bool) -> Result<(), Error> {
    if is_root {
        debug!(message = "Running with root privileges", command = command);
        return Ok(());
    }

    let error = Error::NotRoot {
        command: command.to_string(),
    };
    fancy(MessageKind::Error, &error.to_string());
    fancy(MessageKind::Info, &sudo_hint(args));
    Err(error)
}

/// Suggests running the same command line again through `sudo`.
pub fn sudo_hint(args: &[String]) -> String {
    if args.is_empty() {
        "Try running sudo pacstall instead".to_string()
    } else {
        format!("Try running sudo pacstall {} instead", args.join(" "))
    }
}
