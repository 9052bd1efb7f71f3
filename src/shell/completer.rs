//! Tab completion for command names.

use rustyline::Context;
use rustyline::completion::{Completer, Pair};
use std::sync::Arc;

use crate::shell::command::CommandRegistry;

/// Commands whose arguments are themselves command names.
const NAME_ARGUMENT_COMMANDS: &[&str] = &["commands"];

/// Completer for the command token and for command-name arguments.
pub struct ShellCompleter {
    /// Registry of available commands.
    registry: Arc<CommandRegistry>,
}

impl ShellCompleter {
    /// Creates a new completer.
    pub fn new(registry: Arc<CommandRegistry>) -> Self {
        Self { registry }
    }

    /// Gets completions for a command name.
    fn complete_command(&self, partial: &str) -> Vec<Pair> {
        self.registry
            .completions(partial)
            .into_iter()
            .map(|s| Pair {
                display: s.clone(),
                replacement: s,
            })
            .collect()
    }

    /// Parses the input line to determine completion context.
    fn parse_context<'a>(&self, line: &'a str, pos: usize) -> CompletionContext<'a> {
        let line_to_pos = &line[..pos];
        let parts: Vec<&str> = line_to_pos.split_whitespace().collect();
        let ends_with_space = line_to_pos.ends_with(char::is_whitespace);

        match parts.as_slice() {
            [] => CompletionContext::Command { partial: "" },
            [partial] if !ends_with_space => CompletionContext::Command { partial: *partial },
            [command, ..] => CompletionContext::Argument {
                command: *command,
                partial: if ends_with_space {
                    ""
                } else {
                    parts.last().copied().unwrap_or_default()
                },
            },
        }
    }
}

/// Context for completion - are we completing a command or an argument?
enum CompletionContext<'a> {
    Command { partial: &'a str },
    Argument { command: &'a str, partial: &'a str },
}

impl Completer for ShellCompleter {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let (partial, completions) = match self.parse_context(line, pos) {
            CompletionContext::Command { partial } => (partial, self.complete_command(partial)),
            CompletionContext::Argument { command, partial } => {
                if NAME_ARGUMENT_COMMANDS.contains(&command) {
                    (partial, self.complete_command(partial))
                } else {
                    (partial, vec![])
                }
            }
        };

        Ok((pos - partial.len(), completions))
    }
}
