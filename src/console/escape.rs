//! Escape sequence accumulator
//!
//! Collects bytes after ESC. Once `MIN_ESCAPE_SIZE` bytes are in, the
//! sequence is compared case-insensitively against the recall patterns and
//! the accumulator resets, matched or not. `MIN_ESCAPE_SIZE <= ESCAPE_SIZE`
//! is checked at compile time, so the buffer never fills.

use crate::config::{ESCAPE_SIZE, MIN_ESCAPE_SIZE};

/// Result of feeding one byte to the accumulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EscapeOutcome {
    /// Need more bytes.
    Pending,
    /// Sequence matched a recall pattern.
    Recall,
    /// Sequence evaluated and not recognized; silently discarded.
    Unrecognized,
}

/// Bounded escape byte accumulator.
pub struct EscapeAccumulator {
    buf: [u8; ESCAPE_SIZE],
    len: usize,
}

impl EscapeAccumulator {
    pub const fn new() -> Self {
        Self {
            buf: [0u8; ESCAPE_SIZE],
            len: 0,
        }
    }

    pub fn reset(&mut self) {
        self.len = 0;
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Append `byte` and evaluate. Any outcome other than `Pending` leaves
    /// the accumulator empty.
    pub fn feed(&mut self, byte: u8, patterns: &[[u8; MIN_ESCAPE_SIZE]]) -> EscapeOutcome {
        self.buf[self.len] = byte;
        self.len += 1;

        if self.len >= MIN_ESCAPE_SIZE {
            let seq = &self.buf[..self.len];
            let matched = patterns.iter().any(|p| seq.eq_ignore_ascii_case(p));
            self.reset();
            return if matched {
                EscapeOutcome::Recall
            } else {
                EscapeOutcome::Unrecognized
            };
        }

        EscapeOutcome::Pending
    }
}

impl Default for EscapeAccumulator {
    fn default() -> Self {
        Self::new()
    }
}
