//! Single-slot command history
//!
//! Depth is exactly one: each finalized line overwrites the previous one.

use super::line_buffer::LineBuffer;

/// Last finalized command line.
pub struct History {
    last: LineBuffer,
}

impl History {
    /// Create empty history
    pub const fn new() -> Self {
        Self {
            last: LineBuffer::new(),
        }
    }

    /// Remember `line`, replacing whatever was stored.
    pub fn record(&mut self, line: &[u8]) {
        self.last.set(line);
    }

    /// The last finalized line (empty until the first Enter).
    pub fn last(&self) -> &[u8] {
        self.last.as_bytes()
    }

    pub fn is_empty(&self) -> bool {
        self.last.is_empty()
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}
