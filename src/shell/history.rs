//! In-session command history.
//!
//! History lives only in the line editor's memory and is dropped when the
//! session ends.

use anyhow::Result;
use rustyline::config::Configurer;

/// Configuration for command history.
#[derive(Debug, Clone)]
pub struct HistoryConfig {
    /// Maximum number of entries to keep.
    pub max_entries: usize,
    /// Whether to ignore duplicate consecutive entries.
    pub ignore_dups: bool,
    /// Whether to ignore entries starting with whitespace.
    pub ignore_space: bool,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_entries: 1000,
            ignore_dups: true,
            ignore_space: true,
        }
    }
}

impl HistoryConfig {
    /// Sets the maximum number of entries.
    pub fn with_max_entries(mut self, max: usize) -> Self {
        self.max_entries = max;
        self
    }

    /// Sets whether to ignore duplicate consecutive entries.
    pub fn with_ignore_dups(mut self, ignore: bool) -> Self {
        self.ignore_dups = ignore;
        self
    }

    /// Sets whether to ignore entries starting with whitespace.
    pub fn with_ignore_space(mut self, ignore: bool) -> Self {
        self.ignore_space = ignore;
        self
    }

    /// Applies this configuration to a rustyline editor.
    pub fn apply<C: Configurer>(&self, editor: &mut C) -> Result<()> {
        editor.set_max_history_size(self.max_entries)?;
        editor.set_history_ignore_dups(self.ignore_dups)?;
        editor.set_history_ignore_space(self.ignore_space);
        Ok(())
    }
}
