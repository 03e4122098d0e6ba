use std::io;

use pacstall_config::{ConfigError, ErrorCode};
use thiserror::Error;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Errors that can occur in the Pacstall CLI application.
///
/// Every variant resolves to one process exit status through
/// [`Error::exit_code`], following the `sysexits.h` numbering of
/// [`ErrorCode`].
#[derive(Error, Debug)]
pub enum Error {
    /// Reading or validating `config.toml` failed.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The command was used incorrectly.
    #[error("Invalid arguments: {0}")]
    Usage(String),

    /// The command needs root privileges.
    #[error("Pacstall needs root privileges to run the {command} command")]
    NotRoot { command: String },

    /// A remote resource or helper program could not be used.
    #[error("{0}")]
    Unavailable(String),

    /// Downloaded content could not be written to disk.
    #[error("Could not write downloaded contents to file '{path}': {reason}")]
    WriteFailed { path: String, reason: String },

    /// A local file or directory could not be read.
    #[error("Could not read '{path}': {reason}")]
    ReadFailed { path: String, reason: String },

    /// Failed to flush the standard output buffer.
    #[error("Failed to flush the std out buffer.")]
    StdOutFlushFailed,

    /// Reading the answer of a prompt failed.
    #[error("Failed to read from standard input: {0}")]
    ReadInput(io::Error),

    /// Another instance kept the lock for longer than we were willing to wait.
    #[error("Timed out waiting for the lock on '{path}'")]
    LockTimeout { path: String },

    /// The lock file could not be created or locked.
    #[error("Failed to lock '{path}': {reason}")]
    Lock { path: String, reason: String },

    /// The editor exited with a non-zero status.
    #[error("Editor '{editor}' closed with a non-zero exit code")]
    Editor { editor: String, code: i32 },

    /// The editor could not be started.
    #[error("Failed to launch editor '{editor}': {reason}")]
    EditorLaunch { editor: String, reason: String },

    /// A file that should have been created already exists or could not be written.
    #[error("Cannot create '{path}': {reason}")]
    CantCreate { path: String, reason: String },

    /// An unexpected internal failure.
    #[error("Unknown error has occurred. {0}")]
    Software(String),

    /// The command exists but the backend it drives is not part of this build.
    #[error("Not implemented: {0}")]
    NotImplemented(String),
}

impl Error {
    /// Returns the process exit status for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Config(e) => e.code().as_i32(),
            Error::Usage(_) | Error::NotRoot { .. } => ErrorCode::Usage.as_i32(),
            Error::Unavailable(_) | Error::EditorLaunch { .. } | Error::NotImplemented(_) => {
                ErrorCode::Unavailable.as_i32()
            }
            Error::WriteFailed { .. } | Error::StdOutFlushFailed | Error::ReadInput(_) => {
                ErrorCode::Io.as_i32()
            }
            Error::ReadFailed { .. } => ErrorCode::NoInput.as_i32(),
            Error::LockTimeout { .. } => ErrorCode::TempFail.as_i32(),
            Error::Lock { .. } => ErrorCode::Os.as_i32(),
            Error::Editor { code, .. } => *code,
            Error::CantCreate { .. } => ErrorCode::CantCreate.as_i32(),
            Error::Software(_) => ErrorCode::Software.as_i32(),
        }
    }

    /// Whether the failure was already shown to the user where it happened.
    ///
    /// Configuration errors are reported by the configuration parser and root
    /// errors by [`crate::privileges::ensure_root`].
    pub fn is_reported(&self) -> bool {
        matches!(self, Error::Config(_) | Error::NotRoot { .. })
    }
}
