//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait and is routed by
//! [`CommandDispatcher`]. Commands that read or write remote servers also
//! expose a `run_with` method taking the endpoints directly, which is how
//! they are tested against in-memory fakes.

pub mod completions;
pub mod context;
pub mod dispatcher;
pub mod list;
pub mod migrate;
pub mod show;

pub use context::CommandContext;
pub use dispatcher::{Command, CommandDispatcher, CommandResult};
