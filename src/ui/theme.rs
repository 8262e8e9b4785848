//! Visual theme and styling.

use console::Style;

/// Terminal styles for command output.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Success messages (green).
    pub success: Style,
    /// Warning messages (yellow).
    pub warning: Style,
    /// Error messages (red bold).
    pub error: Style,
    /// Secondary text such as hints (dim).
    pub dim: Style,
    /// Headers (bold cyan).
    pub header: Style,
    /// Masked values in listings (dim italic).
    pub secret: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self::new()
    }
}

impl Theme {
    /// Create the colored theme.
    pub fn new() -> Self {
        Self {
            success: Style::new().green(),
            warning: Style::new().yellow(),
            error: Style::new().red().bold(),
            dim: Style::new().dim(),
            header: Style::new().bold().cyan(),
            secret: Style::new().dim().italic(),
        }
    }

    /// Create a theme without colors (for non-TTY or --no-color).
    pub fn plain() -> Self {
        Self {
            success: Style::new(),
            warning: Style::new(),
            error: Style::new(),
            dim: Style::new(),
            header: Style::new(),
            secret: Style::new(),
        }
    }

    /// Pick a theme based on whether colors are wanted.
    pub fn for_colors(colors: bool) -> Self {
        if colors {
            Self::new()
        } else {
            Self::plain()
        }
    }

    pub fn format_success(&self, msg: &str) -> String {
        format!("{}", self.success.apply_to(format!("✓ {}", msg)))
    }

    pub fn format_warning(&self, msg: &str) -> String {
        format!("{}", self.warning.apply_to(format!("⚠ {}", msg)))
    }

    pub fn format_error(&self, msg: &str) -> String {
        format!("{}", self.error.apply_to(format!("✗ {}", msg)))
    }

    pub fn format_header(&self, title: &str) -> String {
        format!("{}", self.header.apply_to(title))
    }

    pub fn format_hint(&self, hint: &str) -> String {
        format!("{}", self.dim.apply_to(format!("  {}", hint)))
    }
}

/// Check if colors should be enabled.
pub fn should_use_colors(no_color: bool) -> bool {
    if no_color {
        return false;
    }

    // https://no-color.org/
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }

    console::Term::stdout().is_term()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_theme_formats_with_icons() {
        let theme = Theme::plain();
        assert_eq!(theme.format_success("Done"), "✓ Done");
        assert_eq!(theme.format_warning("Careful"), "⚠ Careful");
        assert_eq!(theme.format_error("Failed"), "✗ Failed");
        assert_eq!(theme.format_header("Variables"), "Variables");
    }

    #[test]
    fn hint_is_indented() {
        assert_eq!(Theme::plain().format_hint("try --dry-run"), "  try --dry-run");
    }

    #[test]
    fn no_color_flag_disables_colors() {
        assert!(!should_use_colors(true));
    }

    #[test]
    fn colored_theme_still_contains_text() {
        let msg = Theme::new().format_success("written");
        assert!(msg.contains("written"));
    }
}
