//! Command trait and registry for the shell.
//!
//! Commands are registered explicitly at startup; once the shell is built the
//! registry is only ever read.

use anyhow::Result;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::trie::Trie;

/// Marker that reserves a name for internal use; such names are never commands.
pub const RESERVED_MARKER: &str = "__";

/// Result of executing a command.
///
/// A handler fault is not a variant: it is the `Err` side of
/// [`Command::execute`] and ends the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandResult {
    /// Command ran; the response is printed unless absent or empty.
    Success(Option<String>),
    /// Signal to stop the dispatch loop.
    Exit,
}

impl CommandResult {
    /// Creates a success result with a response.
    pub fn success(msg: impl Into<String>) -> Self {
        CommandResult::Success(Some(msg.into()))
    }

    /// Creates a success result without a response.
    pub fn ok() -> Self {
        CommandResult::Success(None)
    }

    /// The text the loop should print, if any.
    pub fn response(&self) -> Option<&str> {
        match self {
            CommandResult::Success(Some(msg)) if !msg.is_empty() => Some(msg.as_str()),
            _ => None,
        }
    }
}

/// Context available to commands during execution.
pub struct ShellContext<'a> {
    /// The registry the command was resolved from.
    pub registry: &'a CommandRegistry,
}

impl<'a> ShellContext<'a> {
    /// Creates a new shell context.
    pub fn new(registry: &'a CommandRegistry) -> Self {
        Self { registry }
    }
}

/// A command that can be executed in the shell.
pub trait Command: Send + Sync {
    /// Returns the name the command is registered and invoked under.
    fn name(&self) -> &str;

    /// Returns a short description of the command.
    fn description(&self) -> &str;

    /// Returns the documentation printed by `commands`.
    fn help(&self) -> &str {
        self.description()
    }

    /// Executes the command with the given arguments.
    ///
    /// Arguments are passed through unvalidated; their count and meaning are
    /// up to the command.
    fn execute(&self, args: &[&str], ctx: &mut ShellContext) -> Result<CommandResult>;
}

impl fmt::Debug for dyn Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name())
            .field("description", &self.description())
            .finish()
    }
}

type Handler = dyn Fn(&[&str]) -> Result<CommandResult> + Send + Sync;

/// A command backed by a closure.
///
/// ```
/// use interp::shell::command::{CommandRegistry, CommandResult, FnCommand};
///
/// let mut registry = CommandRegistry::new();
/// registry.register_arc(FnCommand::new("echo", "Prints its arguments.", |args| {
///     Ok(CommandResult::success(args.join(" ")))
/// }));
/// assert!(registry.get("echo").is_some());
/// ```
pub struct FnCommand {
    name: String,
    doc: String,
    handler: Box<Handler>,
}

impl FnCommand {
    /// Wraps `handler` as a command documented by `doc`.
    pub fn new<F>(name: impl Into<String>, doc: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&[&str]) -> Result<CommandResult> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            doc: doc.into(),
            handler: Box::new(handler),
        }
    }
}

impl Command for FnCommand {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        self.doc.lines().next().unwrap_or_default().trim()
    }

    fn help(&self) -> &str {
        &self.doc
    }

    fn execute(&self, args: &[&str], _ctx: &mut ShellContext) -> Result<CommandResult> {
        (self.handler)(args)
    }
}

/// Registry of all available commands.
///
/// Iteration is in lexical name order.
pub struct CommandRegistry {
    /// Commands indexed by name.
    commands: BTreeMap<String, Arc<dyn Command>>,
    /// Trie for command name completion.
    command_trie: Trie,
}

impl CommandRegistry {
    /// Creates a new empty registry.
    pub fn new() -> Self {
        Self {
            commands: BTreeMap::new(),
            command_trie: Trie::new(),
        }
    }

    /// Returns true if `name` may be registered as a command.
    ///
    /// Empty names and names containing whitespace could never be typed as a
    /// token; names containing [`RESERVED_MARKER`] are internal.
    pub fn is_eligible(name: &str) -> bool {
        !name.is_empty()
            && !name.contains(char::is_whitespace)
            && !name.contains(RESERVED_MARKER)
    }

    /// Registers a command under its own name.
    ///
    /// A later registration under the same name replaces the earlier one.
    /// Ineligible names are skipped; returns whether the command was stored.
    pub fn register(&mut self, command: Arc<dyn Command>) -> bool {
        let name = command.name().to_string();

        if !Self::is_eligible(&name) {
            log::warn!("Skipping ineligible command name: {:?}", name);
            return false;
        }

        self.command_trie.insert(&name);
        if self.commands.insert(name.clone(), command).is_some() {
            log::debug!("Replaced command: {}", name);
        }
        true
    }

    /// Registers an owned command.
    pub fn register_arc<C: Command + 'static>(&mut self, command: C) -> bool {
        self.register(Arc::new(command))
    }

    /// Looks up a command by name.
    pub fn get(&self, name: &str) -> Option<Arc<dyn Command>> {
        self.commands.get(name).map(Arc::clone)
    }

    /// Returns true if a command is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    /// Returns all registered commands, ordered by name.
    pub fn commands(&self) -> impl Iterator<Item = &Arc<dyn Command>> {
        self.commands.values()
    }

    /// Returns all command names, ordered.
    pub fn names(&self) -> Vec<&str> {
        self.commands.keys().map(|s| s.as_str()).collect()
    }

    /// Returns command name completions for the given prefix.
    pub fn completions(&self, prefix: &str) -> Vec<String> {
        self.command_trie.completions(prefix)
    }

    /// Returns the number of registered commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Returns true if no commands are registered.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Renders help for the named commands, or for every command if `names`
    /// is empty.
    ///
    /// Each known command contributes its name on one line followed by its
    /// documentation. An unknown name contributes a not-found line and the
    /// listing carries on.
    pub fn describe(&self, names: &[&str]) -> String {
        let targets: Vec<&str> = if names.is_empty() {
            self.names()
        } else {
            names.to_vec()
        };

        targets
            .iter()
            .map(|name| match self.commands.get(*name) {
                Some(cmd) => format!("{}\n{}", cmd.name(), cmd.help()),
                None => not_found(name),
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// The message printed for a name with no registered command.
pub fn not_found(name: &str) -> String {
    format!("Command '{}' does not exist.", name)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestCommand;

    impl Command for TestCommand {
        fn name(&self) -> &str {
            "test"
        }

        fn description(&self) -> &str {
            "A test command"
        }

        fn execute(&self, args: &[&str], _ctx: &mut ShellContext) -> Result<CommandResult> {
            if args.is_empty() {
                Ok(CommandResult::ok())
            } else {
                Ok(CommandResult::success(format!("Args: {:?}", args)))
            }
        }
    }

    fn doc_command(name: &str, doc: &str) -> FnCommand {
        FnCommand::new(name, doc, |_| Ok(CommandResult::ok()))
    }

    #[test]
    fn test_registry_register_and_get() {
        let mut registry = CommandRegistry::new();
        assert!(registry.register(Arc::new(TestCommand)));

        assert!(registry.get("test").is_some());
        assert!(registry.get("tes").is_none());
        assert!(registry.get("unknown").is_none());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_registry_skips_ineligible_names() {
        let mut registry = CommandRegistry::new();

        assert!(!registry.register_arc(doc_command("__populate", "internal")));
        assert!(!registry.register_arc(doc_command("parse__input", "internal")));
        assert!(!registry.register_arc(doc_command("", "nameless")));
        assert!(!registry.register_arc(doc_command("two words", "spaced")));
        assert!(registry.register_arc(doc_command("_single", "one underscore is fine")));

        assert_eq!(registry.names(), vec!["_single"]);
    }

    #[test]
    fn test_registry_last_registration_wins() {
        let mut registry = CommandRegistry::new();
        registry.register_arc(doc_command("dup", "first"));
        registry.register_arc(doc_command("dup", "second"));

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("dup").unwrap().help(), "second");
    }

    #[test]
    fn test_registry_names_are_lexical() {
        let mut registry = CommandRegistry::new();
        registry.register_arc(doc_command("zeta", "z"));
        registry.register_arc(doc_command("alpha", "a"));
        registry.register_arc(doc_command("mid", "m"));

        assert_eq!(registry.names(), vec!["alpha", "mid", "zeta"]);
        let order: Vec<&str> = registry.commands().map(|c| c.name()).collect();
        assert_eq!(order, vec!["alpha", "mid", "zeta"]);
    }

    #[test]
    fn test_registry_completions() {
        let mut registry = CommandRegistry::new();
        registry.register(Arc::new(TestCommand));
        registry.register_arc(doc_command("tell", "t"));

        assert_eq!(registry.completions("te"), vec!["tell", "test"]);
        assert_eq!(registry.completions("tes"), vec!["test"]);
    }

    #[test]
    fn test_describe_named_and_missing() {
        let mut registry = CommandRegistry::new();
        registry.register_arc(doc_command("greet", "Says hello.\nSyntax: greet"));

        let text = registry.describe(&["greet", "nope"]);
        assert_eq!(
            text,
            "greet\nSays hello.\nSyntax: greet\nCommand 'nope' does not exist."
        );
    }

    #[test]
    fn test_describe_all() {
        let mut registry = CommandRegistry::new();
        registry.register_arc(doc_command("b", "doc b"));
        registry.register_arc(doc_command("a", "doc a"));

        assert_eq!(registry.describe(&[]), "a\ndoc a\nb\ndoc b");
    }

    #[test]
    fn test_describe_empty_registry() {
        let registry = CommandRegistry::new();
        assert_eq!(registry.describe(&[]), "");
    }

    #[test]
    fn test_fn_command_description_is_first_line() {
        let cmd = doc_command("x", "  First line.  \nMore detail.");
        assert_eq!(cmd.description(), "First line.");
        assert_eq!(cmd.help(), "  First line.  \nMore detail.");
    }

    #[test]
    fn test_command_result_response() {
        assert_eq!(CommandResult::success("done").response(), Some("done"));
        assert_eq!(CommandResult::success("").response(), None);
        assert_eq!(CommandResult::ok().response(), None);
        assert_eq!(CommandResult::Exit.response(), None);
    }
}
