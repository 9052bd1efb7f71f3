//! `leave` - stop the interpreter.

use anyhow::Result;

use crate::shell::command::{Command, CommandResult, ShellContext};

/// Command that ends the session.
pub struct LeaveCommand;

impl Command for LeaveCommand {
    fn name(&self) -> &str {
        "leave"
    }

    fn description(&self) -> &str {
        "Exits the interpreter."
    }

    fn execute(&self, _args: &[&str], _ctx: &mut ShellContext) -> Result<CommandResult> {
        log::info!("User requested exit");
        Ok(CommandResult::Exit)
    }
}
