//! Terminal styling helpers
//!
//! Colors are applied through `owo-colors` and only when the stream
//! supports them.

use owo_colors::{OwoColorize, Stream, Style};
use std::fmt::Display;

/// Check mark
pub const CHECK: &str = "✓";
/// Cross mark
pub const CROSS: &str = "✗";

/// Semantic styles for terminal output
pub trait Stylize: Display + Sized {
    /// Apply `style` if stderr supports color
    fn styled(&self, style: Style) -> String {
        format!(
            "{}",
            self.if_supports_color(Stream::Stderr, |text| text.style(style))
        )
    }

    /// Success (green)
    fn success(&self) -> String {
        self.styled(Style::new().green())
    }

    /// Error (bold red)
    fn error(&self) -> String {
        self.styled(Style::new().red().bold())
    }

    /// Warning (yellow)
    fn warn(&self) -> String {
        self.styled(Style::new().yellow())
    }

    /// Highlighted value (cyan)
    fn accent(&self) -> String {
        self.styled(Style::new().cyan())
    }

    /// De-emphasized text (dimmed)
    fn muted(&self) -> String {
        self.styled(Style::new().dimmed())
    }
}

impl<T: Display> Stylize for T {}

/// Styled check mark
pub fn check() -> String {
    CHECK.success()
}

/// Styled cross mark
pub fn cross() -> String {
    CROSS.error()
}
