//! Colored terminal messages.
//!
//! Every line Pacstall shows to a user starts with a short tag naming its
//! kind:
//!
//! ```text
//! [+] INFO: Downloading neofetch
//! [*] WARNING: Pacstall is already running another instance (4242)
//! [!] ERROR: Config attribute 'main.url' is required
//! ```

use std::fmt;

use colored::Colorize;
use tracing::Level;

#[cfg(test)]
#[path = "message_tests.rs"]
mod tests;

/// The kind of a message, which selects its tag and output stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Warn,
    Error,
    /// An indented item under a previous message.
    Sub,
    Debug,
    Unknown,
}

impl MessageKind {
    /// Returns the colored tag printed in front of the message.
    pub fn prefix(self) -> String {
        match self {
            MessageKind::Info => format!("[{}] {}:", "+".bright_green().bold(), "INFO".bold()),
            MessageKind::Warn => format!("[{}] {}:", "*".bright_yellow().bold(), "WARNING".bold()),
            MessageKind::Error => format!("[{}] {}:", "!".bright_red().bold(), "ERROR".bold()),
            MessageKind::Sub => format!("\t[{}]", ">".blue()),
            MessageKind::Debug => "[#] DEBUG:".dimmed().to_string(),
            MessageKind::Unknown => format!("[{}] {}:", "?".bold(), "UNKNOWN".bold()),
        }
    }

    /// Whether messages of this kind belong on standard error.
    pub fn is_diagnostic(self) -> bool {
        matches!(
            self,
            MessageKind::Warn | MessageKind::Error | MessageKind::Unknown
        )
    }
}

impl From<&str> for MessageKind {
    fn from(kind: &str) -> Self {
        match kind {
            "info" => MessageKind::Info,
            "warn" => MessageKind::Warn,
            "error" => MessageKind::Error,
            "sub" => MessageKind::Sub,
            "debug" => MessageKind::Debug,
            _ => MessageKind::Unknown,
        }
    }
}

impl From<Level> for MessageKind {
    fn from(level: Level) -> Self {
        match level {
            Level::ERROR => MessageKind::Error,
            Level::WARN => MessageKind::Warn,
            Level::INFO => MessageKind::Info,
            _ => MessageKind::Debug,
        }
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.prefix())
    }
}

/// Renders `message` with the tag of `kind`.
pub fn format_fancy(kind: MessageKind, message: &str) -> String {
    format!("{} {}", kind.prefix(), message)
}

/// Prints `message` with the tag of `kind` on the stream matching its kind.
pub fn fancy(kind: MessageKind, message: &str) {
    let line = format_fancy(kind, message);
    if kind.is_diagnostic() {
        eprintln!("{line}");
    } else {
        println!("{line}");
    }
}
