//! Process exit codes used by Pacstall.
//!
//! The values follow the `sysexits.h` convention. External scripts check these
//! numbers, so they must never change.

use std::fmt;

#[cfg(test)]
#[path = "error_codes_tests.rs"]
mod tests;

/// Exit codes based on the `sysexits.h` standard header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum ErrorCode {
    /// The command was used incorrectly, e.g. with the wrong number of
    /// arguments, a bad flag or a bad syntax in a parameter.
    Usage = 64,

    /// The input data was incorrect in some way. Only used for user data.
    Data = 65,

    /// An input file did not exist or was not readable.
    NoInput = 66,

    /// The user specified did not exist.
    NoUser = 67,

    /// The host specified did not exist or did not answer as expected.
    NoHost = 68,

    /// A service is unavailable. Also the catch-all when something that was
    /// asked for does not work and the reason is unknown.
    Unavailable = 69,

    /// An internal software error has been detected.
    Software = 70,

    /// An operating system error, such as failing to take a file lock.
    Os = 71,

    /// Some system file does not exist, cannot be opened, or is malformed.
    OsFile = 72,

    /// A user specified output file cannot be created.
    CantCreate = 73,

    /// An error occurred while doing I/O on some file.
    Io = 74,

    /// Temporary failure; the user is invited to retry.
    TempFail = 75,

    /// The remote system returned something impossible during a protocol exchange.
    Protocol = 76,

    /// Insufficient permission for a higher level operation.
    NoPerm = 77,

    /// Something was found in an unconfigured or misconfigured state.
    Config = 78,
}

impl ErrorCode {
    /// Returns the numeric process exit status for this code.
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} ({})", self, self.as_i32())
    }
}

impl From<ErrorCode> for i32 {
    fn from(code: ErrorCode) -> Self {
        code.as_i32()
    }
}
