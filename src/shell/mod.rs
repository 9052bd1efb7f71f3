//! Shell module - the dispatch loop and its rustyline front end.
//!
//! This module provides:
//! - The read-parse-dispatch-print loop over any [`LineReader`]
//! - Command name completion, hints and highlighting for the terminal
//! - In-session command history

pub mod command;
pub mod commands;
pub mod completer;
pub mod highlighter;
pub mod hints;
pub mod history;
pub mod parse;

use anyhow::{Context as _, Result};
use rustyline::completion::Completer;
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::MemHistory;
use rustyline::validate::Validator;
use rustyline::{Config, Context, Editor, Helper};
use std::borrow::Cow;
use std::io::{self, Write};
use std::sync::Arc;

use crate::input::{LineReader, ReadOutcome};

use command::{CommandRegistry, CommandResult, ShellContext, not_found};
use commands::register_all;
use completer::ShellCompleter;
use highlighter::ShellHighlighter;
use hints::ShellHinter;
use history::HistoryConfig;
use parse::ParsedInput;

/// The prompt displayed to the user.
pub const PROMPT: &str = "Enter command: ";

/// Combined helper for rustyline that provides all shell features.
pub struct ShellHelper {
    completer: ShellCompleter,
    highlighter: ShellHighlighter,
    hinter: ShellHinter,
}

impl ShellHelper {
    /// Creates a new helper with all shell features.
    pub fn new(registry: Arc<CommandRegistry>) -> Self {
        Self {
            completer: ShellCompleter::new(Arc::clone(&registry)),
            highlighter: ShellHighlighter::new(Arc::clone(&registry)),
            hinter: ShellHinter::new(registry),
        }
    }
}

impl Completer for ShellHelper {
    type Candidate = rustyline::completion::Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Self::Candidate>)> {
        self.completer.complete(line, pos, ctx)
    }
}

impl Highlighter for ShellHelper {
    fn highlight<'l>(&self, line: &'l str, pos: usize) -> Cow<'l, str> {
        self.highlighter.highlight(line, pos)
    }

    fn highlight_prompt<'b, 's: 'b, 'p: 'b>(
        &'s self,
        prompt: &'p str,
        default: bool,
    ) -> Cow<'b, str> {
        self.highlighter.highlight_prompt(prompt, default)
    }

    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        self.highlighter.highlight_hint(hint)
    }

    fn highlight_candidate<'c>(
        &self,
        candidate: &'c str,
        completion: rustyline::CompletionType,
    ) -> Cow<'c, str> {
        self.highlighter.highlight_candidate(candidate, completion)
    }

    fn highlight_char(&self, line: &str, pos: usize, kind: rustyline::highlight::CmdKind) -> bool {
        self.highlighter.highlight_char(line, pos, kind)
    }
}

impl Hinter for ShellHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, ctx: &Context<'_>) -> Option<Self::Hint> {
        self.hinter.hint(line, pos, ctx)
    }
}

impl Validator for ShellHelper {}

impl Helper for ShellHelper {}

/// Terminal line source backed by a rustyline editor.
pub struct EditorReader {
    editor: Editor<ShellHelper, MemHistory>,
}

impl EditorReader {
    /// Creates an editor wired to the given registry.
    pub fn new(registry: Arc<CommandRegistry>, history: &HistoryConfig) -> Result<Self> {
        let mut editor = Editor::with_history(Config::default(), MemHistory::new())?;
        editor.set_helper(Some(ShellHelper::new(registry)));
        history.apply(&mut editor)?;
        Ok(Self { editor })
    }
}

impl LineReader for EditorReader {
    fn read_line(&mut self, prompt: &str) -> Result<ReadOutcome> {
        match self.editor.readline(prompt) {
            Ok(line) => Ok(ReadOutcome::Line(line)),
            Err(ReadlineError::Interrupted) => Ok(ReadOutcome::Interrupted),
            Err(ReadlineError::Eof) => Ok(ReadOutcome::Eof),
            Err(err) => {
                log::error!("Readline error: {}", err);
                Err(err.into())
            }
        }
    }

    fn add_history(&mut self, line: &str) {
        if let Err(e) = self.editor.add_history_entry(line) {
            log::warn!("Could not record history entry: {}", e);
        }
    }
}

/// Configuration for the shell.
#[derive(Debug, Clone)]
pub struct ShellConfig {
    /// Prompt shown before each read.
    pub prompt: String,
    /// History configuration.
    pub history: HistoryConfig,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            prompt: PROMPT.to_string(),
            history: HistoryConfig::default(),
        }
    }
}

/// The interactive shell.
pub struct Shell {
    /// Command registry, read-only once the shell exists.
    registry: Arc<CommandRegistry>,
    /// Shell configuration.
    config: ShellConfig,
}

impl Shell {
    /// Creates a shell with the built-in commands and default configuration.
    pub fn new() -> Self {
        Self::with_config(ShellConfig::default())
    }

    /// Creates a shell with the built-in commands and custom configuration.
    pub fn with_config(config: ShellConfig) -> Self {
        let mut registry = CommandRegistry::new();
        register_all(&mut registry);
        Self::with_registry(registry, config)
    }

    /// Creates a shell over a caller-populated registry.
    pub fn with_registry(registry: CommandRegistry, config: ShellConfig) -> Self {
        log::debug!("Registered commands: {:?}", registry.names());
        Self {
            registry: Arc::new(registry),
            config,
        }
    }

    /// The registry commands are resolved from.
    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    /// Runs the loop against the terminal and stdout.
    pub fn run_interactive(&self) -> Result<()> {
        let mut reader = EditorReader::new(Arc::clone(&self.registry), &self.config.history)?;
        let stdout = io::stdout();
        let mut out = stdout.lock();
        self.run(&mut reader, &mut out)
    }

    /// Runs the read-parse-dispatch-print loop until a command asks to stop
    /// or the input ends.
    ///
    /// A command fault is not caught: it ends the loop and is returned.
    pub fn run<R, W>(&self, reader: &mut R, out: &mut W) -> Result<()>
    where
        R: LineReader,
        W: Write,
    {
        log::info!("Shell started");

        loop {
            let line = match reader.read_line(&self.config.prompt)? {
                ReadOutcome::Line(line) => line,
                ReadOutcome::Interrupted => {
                    log::info!("Interrupted (Ctrl-C)");
                    break;
                }
                ReadOutcome::Eof => {
                    log::info!("EOF received");
                    break;
                }
            };

            if line.trim().is_empty() {
                continue;
            }
            reader.add_history(&line);

            match self.execute_line(&line)? {
                CommandResult::Exit => break,
                result => {
                    if let Some(response) = result.response() {
                        writeln!(out, "{}", response)?;
                        out.flush()?;
                    }
                }
            }
        }

        log::info!("Shell exited");
        Ok(())
    }

    /// Parses and executes a single line.
    ///
    /// A blank line executes nothing and yields an empty success.
    pub fn execute_line(&self, line: &str) -> Result<CommandResult> {
        match ParsedInput::parse(line) {
            Some(input) => self.dispatch(&input),
            None => Ok(CommandResult::ok()),
        }
    }

    /// Resolves the token and invokes its command.
    fn dispatch(&self, input: &ParsedInput) -> Result<CommandResult> {
        let Some(cmd) = self.registry.get(input.token) else {
            log::debug!("Unknown command: {}", input.token);
            return Ok(CommandResult::success(not_found(input.token)));
        };

        log::debug!(
            "Executing command: {} with args: {:?}",
            input.token,
            input.arguments
        );

        let mut ctx = ShellContext::new(&self.registry);
        let start = std::time::Instant::now();
        let result = cmd.execute(&input.arguments, &mut ctx);
        log::debug!("Command '{}' completed in {:?}", input.token, start.elapsed());

        result.with_context(|| format!("Command '{}' failed", input.token))
    }
}

impl Default for Shell {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::ScriptedReader;
    use super::command::FnCommand;

    /// Scripted input that also records what was handed to history.
    struct RecordingReader {
        inner: ScriptedReader,
        history: Vec<String>,
    }

    impl LineReader for RecordingReader {
        fn read_line(&mut self, prompt: &str) -> Result<ReadOutcome> {
            self.inner.read_line(prompt)
        }

        fn add_history(&mut self, line: &str) {
            self.history.push(line.to_string());
        }
    }

    fn run_script(shell: &Shell, lines: &[&str]) -> (Result<()>, String, ScriptedReader) {
        let mut reader = ScriptedReader::new(lines.iter().copied());
        let mut out = Vec::new();
        let result = shell.run(&mut reader, &mut out);
        (result, String::from_utf8(out).unwrap(), reader)
    }

    #[test]
    fn test_shell_creation() {
        let shell = Shell::new();
        assert_eq!(shell.registry().names(), vec!["commands", "leave"]);
    }

    #[test]
    fn test_execute_line_unknown_command() {
        let shell = Shell::new();

        let result = shell.execute_line("unknown_cmd with args").unwrap();
        assert_eq!(
            result,
            CommandResult::success("Command 'unknown_cmd' does not exist.")
        );
    }

    #[test]
    fn test_execute_line_blank() {
        let shell = Shell::new();
        assert_eq!(shell.execute_line("   ").unwrap(), CommandResult::ok());
    }

    #[test]
    fn test_execute_line_leave() {
        let shell = Shell::new();
        assert_eq!(shell.execute_line("leave").unwrap(), CommandResult::Exit);
    }

    #[test]
    fn test_execute_line_passes_arguments_in_order() {
        let mut registry = CommandRegistry::new();
        registry.register_arc(FnCommand::new("join", "Joins its arguments.", |args| {
            Ok(CommandResult::success(args.join("+")))
        }));
        let shell = Shell::with_registry(registry, ShellConfig::default());

        let result = shell.execute_line("join  a b\tc").unwrap();
        assert_eq!(result, CommandResult::success("a+b+c"));
    }

    #[test]
    fn test_run_prints_nothing_before_first_command() {
        let shell = Shell::new();
        let (result, out, _) = run_script(&shell, &["leave"]);

        assert!(result.is_ok());
        assert!(out.is_empty());
    }

    #[test]
    fn test_run_records_raw_lines_in_history() {
        let shell = Shell::new();
        let mut reader = RecordingReader {
            inner: ScriptedReader::new(["  commands leave", "   ", "leave"]),
            history: Vec::new(),
        };
        let mut out = Vec::new();

        shell.run(&mut reader, &mut out).unwrap();

        assert_eq!(reader.history, vec!["  commands leave", "leave"]);
    }

    #[test]
    fn test_run_stops_on_leave() {
        let shell = Shell::new();
        let (result, out, reader) = run_script(&shell, &["leave", "commands", "bogus"]);

        assert!(result.is_ok());
        assert!(out.is_empty());
        assert_eq!(reader.remaining(), 2);
        assert_eq!(reader.prompts(), 1);
    }

    #[test]
    fn test_run_ignores_blank_lines() {
        let shell = Shell::new();
        let (result, out, reader) = run_script(&shell, &["", "   ", "\t"]);

        assert!(result.is_ok());
        assert!(out.is_empty());
        // three lines plus the read that hit end of input
        assert_eq!(reader.prompts(), 4);
    }

    #[test]
    fn test_run_stops_at_end_of_input() {
        let shell = Shell::new();
        let (result, out, _) = run_script(&shell, &["nope"]);

        assert!(result.is_ok());
        assert_eq!(out, "Command 'nope' does not exist.\n");
    }
}
