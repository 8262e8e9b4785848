//! Command-line interface.
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`commands`] - Command implementations

pub mod args;
pub mod commands;

pub use args::{Cli, Commands, CompletionsArgs, ListArgs, MigrateArgs, ShowArgs};
pub use commands::{Command, CommandContext, CommandDispatcher, CommandResult};
