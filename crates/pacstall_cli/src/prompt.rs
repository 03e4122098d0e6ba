//! Yes/no confirmation prompts.

use std::env;
use std::io::{self, BufRead, Write};

use colored::Colorize;
use tracing::debug;

use crate::errors::Error;

#[cfg(test)]
#[path = "prompt_tests.rs"]
mod tests;

/// Environment variable that, when set to a non-empty value, disables all prompts.
pub const DISABLE_PROMPTS_ENV: &str = "PACSTALL_DISABLE_PROMPTS";

/// Whether prompts are disabled by `flag` or by [`DISABLE_PROMPTS_ENV`].
pub fn prompts_disabled(flag: bool) -> bool {
    flag || env::var_os(DISABLE_PROMPTS_ENV).is_some_and(|value| !value.is_empty())
}

/// Asks the user to confirm `question` on the terminal.
///
/// Returns `default` without asking when prompts are disabled.
pub fn confirm(question: &str, default: bool, disable_prompts: bool) -> Result<bool, Error> {
    if prompts_disabled(disable_prompts) {
        debug!(message = "Prompts disabled, using default answer", question = question, default = default);
        return Ok(default);
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    confirm_with(&mut stdin.lock(), &mut stdout.lock(), question, default)
}

/// Asks `question` on `writer` and reads the answer from `reader`.
///
/// An empty answer, or the end of the input, selects `default`. Answers other
/// than yes or no repeat the question.
pub fn confirm_with<R: BufRead, W: Write>(
    reader: &mut R,
    writer: &mut W,
    question: &str,
    default: bool,
) -> Result<bool, Error> {
    let choices = if default {
        format!("[{}/{}]", "Y".bright_green().bold(), "n".red())
    } else {
        format!("[{}/{}]", "y".green(), "N".bright_red().bold())
    };

    loop {
        write!(
            writer,
            "[{}] {}: {} {} ",
            "?".bright_blue().bold(),
            "CONFIRM".bold(),
            question.italic(),
            choices
        )
        .map_err(|_| Error::StdOutFlushFailed)?;
        writer.flush().map_err(|_| Error::StdOutFlushFailed)?;

        let mut answer = String::new();
        if reader.read_line(&mut answer).map_err(Error::ReadInput)? == 0 {
            writeln!(writer).map_err(|_| Error::StdOutFlushFailed)?;
            return Ok(default);
        }

        match answer.trim().to_uppercase().as_str() {
            "" => return Ok(default),
            "Y" | "YES" => return Ok(true),
            "N" | "NO" => return Ok(false),
            _ => continue,
        }
    }
}
