//! Command line tokenizer
//!
//! Splits on ASCII whitespace: one command word plus up to `MAX_ARGS`
//! arguments. Extra words are reported, not silently dropped.

/// Arguments kept per command.
pub const MAX_ARGS: usize = 2;

/// Tokenized command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommand<'a> {
    /// The command name (first token), empty for a blank line
    pub command: &'a str,
    pub args: [Option<&'a str>; MAX_ARGS],
    /// True if the line had more than `MAX_ARGS` arguments
    pub overflow: bool,
}

impl<'a> ParsedCommand<'a> {
    /// Get argument by index (0-based)
    pub fn arg(&self, idx: usize) -> Option<&'a str> {
        self.args.get(idx).copied().flatten()
    }

    pub fn arg_count(&self) -> usize {
        self.args.iter().flatten().count()
    }

    pub fn is_blank(&self) -> bool {
        self.command.is_empty()
    }
}

/// Parse a command line into command and arguments
pub fn parse_line(line: &str) -> ParsedCommand<'_> {
    let mut parts = line.split_ascii_whitespace();

    let command = parts.next().unwrap_or("");

    let mut args = [None; MAX_ARGS];
    for slot in args.iter_mut() {
        *slot = parts.next();
    }

    ParsedCommand {
        command,
        args,
        overflow: parts.next().is_some(),
    }
}
