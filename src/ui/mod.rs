//! Terminal output for commands.
//!
//! This module provides:
//! - [`UserInterface`] trait for UI abstraction
//! - [`TerminalUI`] for real terminal output
//! - [`MockUI`] for capturing output in tests
//! - [`Table`] for listings
//!
//! # Example
//!
//! ```
//! use octomigrate::ui::{create_ui, OutputMode};
//!
//! let mut ui = create_ui(OutputMode::Quiet, true);
//! ui.message("hidden in quiet mode");
//! ui.success("Variable group 12 updated");
//! ```

pub mod mock;
pub mod output;
pub mod table;
pub mod terminal;
pub mod theme;

pub use mock::MockUI;
pub use output::OutputMode;
pub use table::Table;
pub use terminal::TerminalUI;
pub use theme::{should_use_colors, Theme};

/// Trait for user interface interactions.
///
/// This trait allows mocking the UI in tests.
pub trait UserInterface {
    /// Get the current output mode.
    fn output_mode(&self) -> OutputMode;

    /// Print command results (tables, JSON). Shown in every mode.
    fn output(&mut self, text: &str);

    /// Display a status message.
    fn message(&mut self, msg: &str);

    /// Display a line only in verbose mode.
    fn detail(&mut self, msg: &str);

    /// Display a success message.
    fn success(&mut self, msg: &str);

    /// Display a warning message.
    fn warning(&mut self, msg: &str);

    /// Display an error message. Shown in every mode.
    fn error(&mut self, msg: &str);

    /// Show a header above a listing.
    fn show_header(&mut self, title: &str);

    /// Show a hint after a result or error.
    fn show_hint(&mut self, hint: &str);
}

/// Create the terminal UI for the given mode.
pub fn create_ui(mode: OutputMode, no_color: bool) -> Box<dyn UserInterface> {
    Box::new(TerminalUI::new(mode, should_use_colors(no_color)))
}
