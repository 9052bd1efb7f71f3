//! Splitting an input line into a command token and its arguments.

/// A line split into its command token and positional arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedInput<'a> {
    /// The first whitespace-delimited piece.
    pub token: &'a str,
    /// The remaining pieces, in order.
    pub arguments: Vec<&'a str>,
}

impl<'a> ParsedInput<'a> {
    /// Splits `line` on whitespace. Returns `None` for a blank line.
    pub fn parse(line: &'a str) -> Option<Self> {
        let mut parts = line.split_whitespace();
        let token = parts.next()?;
        Some(Self {
            token,
            arguments: parts.collect(),
        })
    }
}
