//! Blocking execution of external commands.

pub mod errors;
mod runner;

pub use errors::ProcessError;
pub use runner::{CommandOutput, CommandRunner, RunOptions, SystemRunner, trim_ending_newline};
