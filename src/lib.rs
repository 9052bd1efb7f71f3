//! Interp - a minimal read-eval-print command dispatcher.
//!
//! This library provides the command registry, the dispatch loop, and the
//! line-editing shell that drives it from a terminal.

pub mod config;
pub mod input;
pub mod logging;
pub mod shell;
pub mod trie;

// Re-export commonly used types
pub use config::AppConfig;
pub use input::{LineReader, ReadOutcome, ScriptedReader};
pub use logging::{LogConfig, init_logging};
pub use shell::{Shell, ShellConfig};
pub use trie::Trie;
