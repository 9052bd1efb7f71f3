//! `commands` - help on registered commands.

use anyhow::Result;

use crate::shell::command::{Command, CommandResult, ShellContext};

/// Command that prints the documentation of other commands.
pub struct CommandsCommand;

impl Command for CommandsCommand {
    fn name(&self) -> &str {
        "commands"
    }

    fn description(&self) -> &str {
        "Print help on commands"
    }

    fn help(&self) -> &str {
        "Syntax: commands\n\
         \x20       commands cmd\n\
         \x20       commands cmd0 cmd1 cmd2 ... cmdn\n\n\
         Prints help on a particular command cmd. Multiple cmds can be given,\n\
         separated by a space, and each of them will be printed.\n\
         If cmd is not given, then all commands are printed."
    }

    fn execute(&self, args: &[&str], ctx: &mut ShellContext) -> Result<CommandResult> {
        log::debug!("Describing commands: {:?}", args);
        Ok(CommandResult::success(ctx.registry.describe(args)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::command::CommandRegistry;
    use crate::shell::commands::register_all;

    fn setup_registry() -> CommandRegistry {
        let mut registry = CommandRegistry::new();
        register_all(&mut registry);
        registry
    }

    fn run(registry: &CommandRegistry, args: &[&str]) -> String {
        let mut ctx = ShellContext::new(registry);
        match CommandsCommand.execute(args, &mut ctx).unwrap() {
            CommandResult::Success(Some(msg)) => msg,
            other => panic!("Expected a listing, got {:?}", other),
        }
    }

    #[test]
    fn test_commands_lists_all() {
        let registry = setup_registry();
        let msg = run(&registry, &[]);

        assert!(msg.starts_with("commands\nSyntax: commands"));
        assert!(msg.contains("leave\nExits the interpreter."));
    }

    #[test]
    fn test_commands_specific() {
        let registry = setup_registry();
        let msg = run(&registry, &["leave"]);

        assert_eq!(msg, "leave\nExits the interpreter.");
    }

    #[test]
    fn test_commands_unknown() {
        let registry = setup_registry();
        let msg = run(&registry, &["foo"]);

        assert_eq!(msg, "Command 'foo' does not exist.");
    }

    #[test]
    fn test_commands_unknown_does_not_abort_listing() {
        let registry = setup_registry();
        let msg = run(&registry, &["foo", "leave"]);

        assert_eq!(
            msg,
            "Command 'foo' does not exist.\nleave\nExits the interpreter."
        );
    }
}
