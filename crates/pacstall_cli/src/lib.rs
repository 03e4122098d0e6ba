//! Pacstall CLI library exports for integration testing.
//!
//! This module exposes the argument parser and command implementations of the
//! `pacstall` binary.

pub mod args;
pub mod commands;
pub mod errors;
pub mod instance_lock;
pub mod logging;
pub mod message;
pub mod privileges;
pub mod prompt;
