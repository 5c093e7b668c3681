//! Executable invocation.

pub mod command;

pub use command::{CommandError, CommandRunner, ShellCommand, SystemRunner};
