//! Built-in commands.

mod describe;
mod leave;

pub use describe::CommandsCommand;
pub use leave::LeaveCommand;

use std::sync::Arc;

use super::command::CommandRegistry;

/// Registers all built-in commands with the registry.
pub fn register_all(registry: &mut CommandRegistry) {
    registry.register(Arc::new(CommandsCommand));
    registry.register(Arc::new(LeaveCommand));
}
