//! Input highlighting for the shell.
//!
//! Only what the user types is coloured; command output is printed as-is.

use rustyline::highlight::{CmdKind, Highlighter};
use std::borrow::Cow;
use std::sync::Arc;

use crate::shell::command::CommandRegistry;

/// ANSI color codes for highlighting.
pub mod colors {
    /// Reset all formatting.
    pub const RESET: &str = "\x1b[0m";
    /// Bold text.
    pub const BOLD: &str = "\x1b[1m";
    /// Dim text.
    pub const DIM: &str = "\x1b[2m";
    /// Red foreground.
    pub const RED: &str = "\x1b[31m";
    /// Cyan foreground.
    pub const CYAN: &str = "\x1b[36m";
    /// Bright green foreground.
    pub const BRIGHT_GREEN: &str = "\x1b[92m";
    /// Bright cyan foreground.
    pub const BRIGHT_CYAN: &str = "\x1b[96m";
}

/// Highlighter that marks the command token as known or unknown.
pub struct ShellHighlighter {
    /// Registry to check for valid commands.
    registry: Arc<CommandRegistry>,
}

impl ShellHighlighter {
    /// Creates a new highlighter.
    pub fn new(registry: Arc<CommandRegistry>) -> Self {
        Self { registry }
    }

    /// Highlights a line of input.
    fn highlight_line(&self, line: &str) -> String {
        let trimmed = line.trim_start();
        let Some(command) = trimmed.split_whitespace().next() else {
            return line.to_string();
        };

        let leading_ws = &line[..line.len() - trimmed.len()];
        let rest = &trimmed[command.len()..];

        let style = if self.registry.contains(command) {
            format!("{}{}", colors::BOLD, colors::CYAN)
        } else {
            colors::RED.to_string()
        };

        format!("{}{}{}{}{}", leading_ws, style, command, colors::RESET, rest)
    }
}

impl Highlighter for ShellHighlighter {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        Cow::Owned(self.highlight_line(line))
    }

    fn highlight_prompt<'b, 's: 'b, 'p: 'b>(
        &'s self,
        prompt: &'p str,
        _default: bool,
    ) -> Cow<'b, str> {
        Cow::Owned(format!(
            "{}{}{}{}",
            colors::BOLD,
            colors::BRIGHT_GREEN,
            prompt,
            colors::RESET
        ))
    }

    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        Cow::Owned(format!("{}{}{}", colors::DIM, hint, colors::RESET))
    }

    fn highlight_candidate<'c>(
        &self,
        candidate: &'c str,
        _completion: rustyline::CompletionType,
    ) -> Cow<'c, str> {
        Cow::Owned(format!(
            "{}{}{}",
            colors::BRIGHT_CYAN,
            candidate,
            colors::RESET
        ))
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _kind: CmdKind) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::commands::register_all;

    fn setup_highlighter() -> ShellHighlighter {
        let mut registry = CommandRegistry::new();
        register_all(&mut registry);
        ShellHighlighter::new(Arc::new(registry))
    }

    #[test]
    fn test_highlight_valid_command() {
        let highlighter = setup_highlighter();
        let result = highlighter.highlight_line("leave");

        assert_eq!(result, "\x1b[1m\x1b[36mleave\x1b[0m");
    }

    #[test]
    fn test_highlight_invalid_command() {
        let highlighter = setup_highlighter();
        let result = highlighter.highlight_line("invalid");

        assert!(result.contains(colors::RED));
        assert!(result.contains("invalid"));
    }

    #[test]
    fn test_highlight_keeps_arguments_plain() {
        let highlighter = setup_highlighter();
        let result = highlighter.highlight_line("  commands leave  foo");

        assert_eq!(result, "  \x1b[1m\x1b[36mcommands\x1b[0m leave  foo");
    }

    #[test]
    fn test_empty_line() {
        let highlighter = setup_highlighter();
        assert_eq!(highlighter.highlight_line(""), "");
        assert_eq!(highlighter.highlight_line("   "), "   ");
    }
}
