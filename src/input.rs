//! Line sources for the dispatch loop.
//!
//! The loop only needs a blocking "prompt and read one line" primitive. The
//! terminal implementation lives in the shell module (it needs the rustyline
//! helper); [`ScriptedReader`] replays a fixed list of lines.

use anyhow::Result;
use std::collections::VecDeque;

/// What a single read produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadOutcome {
    /// A line of text, without the trailing newline.
    Line(String),
    /// The user interrupted the read (Ctrl-C).
    Interrupted,
    /// The input is exhausted (Ctrl-D or end of a piped stream).
    Eof,
}

/// A blocking source of input lines.
pub trait LineReader {
    /// Shows `prompt` and blocks until a line is available.
    fn read_line(&mut self, prompt: &str) -> Result<ReadOutcome>;

    /// Records a dispatched line in the source's history, if it keeps one.
    fn add_history(&mut self, _line: &str) {}
}

/// Replays a fixed sequence of lines, then reports end of input.
#[derive(Debug, Default)]
pub struct ScriptedReader {
    lines: VecDeque<String>,
    prompts: usize,
}

impl ScriptedReader {
    /// Creates a reader over the given lines.
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
            prompts: 0,
        }
    }

    /// Number of lines not yet read.
    pub fn remaining(&self) -> usize {
        self.lines.len()
    }

    /// Number of times a line was requested.
    pub fn prompts(&self) -> usize {
        self.prompts
    }
}

impl LineReader for ScriptedReader {
    fn read_line(&mut self, _prompt: &str) -> Result<ReadOutcome> {
        self.prompts += 1;
        Ok(match self.lines.pop_front() {
            Some(line) => ReadOutcome::Line(line),
            None => ReadOutcome::Eof,
        })
    }
}
