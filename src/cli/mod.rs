//! CLI module for livefeed
//!
//! Provides command-line interface for:
//! - tail: Follow the live feeds and print every notification

mod args;
mod commands;
mod errors;

pub use args::{ChannelChoice, Cli, Command};
pub use commands::{run, run_command, tail};
pub use errors::{CliError, CliResult};
