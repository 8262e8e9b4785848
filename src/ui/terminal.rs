//! Terminal UI writing to stdout and stderr.

use super::theme::Theme;
use super::{OutputMode, UserInterface};

/// UI implementation for terminal output.
///
/// Results go to stdout; warnings and errors go to stderr so that
/// `--json` output stays machine-readable.
pub struct TerminalUI {
    mode: OutputMode,
    theme: Theme,
}

impl TerminalUI {
    /// Create a console UI.
    pub fn new(mode: OutputMode, colors: bool) -> Self {
        Self {
            mode,
            theme: Theme::for_colors(colors),
        }
    }
}

impl UserInterface for TerminalUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn output(&mut self, text: &str) {
        println!("{}", text);
    }

    fn message(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("{}", msg);
        }
    }

    fn detail(&mut self, msg: &str) {
        if self.mode.shows_details() {
            println!("{}", self.theme.dim.apply_to(msg));
        }
    }

    fn success(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("{}", self.theme.format_success(msg));
        }
    }

    fn warning(&mut self, msg: &str) {
        if self.mode.shows_status() {
            eprintln!("{}", self.theme.format_warning(msg));
        }
    }

    fn error(&mut self, msg: &str) {
        eprintln!("{}", self.theme.format_error(msg));
    }

    fn show_header(&mut self, title: &str) {
        if self.mode.shows_status() {
            println!("\n{}\n", self.theme.format_header(title));
        }
    }

    fn show_hint(&mut self, hint: &str) {
        if self.mode.shows_status() {
            println!("{}", self.theme.format_hint(hint));
        }
    }
}
