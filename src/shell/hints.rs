//! Inline completion hints for command names.

use rustyline::Context;
use rustyline::hint::Hinter;
use std::sync::Arc;

use crate::shell::command::CommandRegistry;

/// Hinter that suggests the rest of a command name.
pub struct ShellHinter {
    /// Registry of available commands.
    registry: Arc<CommandRegistry>,
}

impl ShellHinter {
    /// Creates a new hinter.
    pub fn new(registry: Arc<CommandRegistry>) -> Self {
        Self { registry }
    }

    /// Returns the missing suffix when exactly one command matches the token
    /// being typed.
    fn get_hint(&self, line: &str) -> Option<String> {
        let token = line.trim_start();
        if token.is_empty() || token.contains(char::is_whitespace) {
            return None;
        }

        match self.registry.completions(token).as_slice() {
            [only] if only != token => Some(only[token.len()..].to_string()),
            _ => None,
        }
    }
}

impl Hinter for ShellHinter {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<Self::Hint> {
        // Only hint if cursor is at end of line
        if pos < line.len() {
            return None;
        }

        self.get_hint(line)
    }
}
