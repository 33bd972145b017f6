//! Bounded input line buffer
//!
//! Holds at most `LINE_SIZE - 1` bytes; the last slot is reserved so a
//! finalized line always fits a terminator-sized buffer elsewhere.

use crate::config::LINE_SIZE;

/// Maximum number of bytes a line may hold.
pub const LINE_CAPACITY: usize = LINE_SIZE - 1;

/// Line input buffer
#[derive(Clone)]
pub struct LineBuffer {
    buf: [u8; LINE_SIZE],
    len: usize,
}

impl LineBuffer {
    /// Create empty buffer
    pub const fn new() -> Self {
        Self {
            buf: [0u8; LINE_SIZE],
            len: 0,
        }
    }

    /// Append a byte. Returns `false` (byte dropped) when full.
    pub fn push(&mut self, c: u8) -> bool {
        if self.len < LINE_CAPACITY {
            self.buf[self.len] = c;
            self.len += 1;
            true
        } else {
            false
        }
    }

    /// Remove the last byte, clearing its slot. Returns `false` on an
    /// empty line.
    pub fn backspace(&mut self) -> bool {
        if self.len > 0 {
            self.len -= 1;
            self.buf[self.len] = 0;
            true
        } else {
            false
        }
    }

    /// Clear buffer
    pub fn clear(&mut self) {
        self.buf[..self.len].fill(0);
        self.len = 0;
    }

    /// Replace contents, truncating to `LINE_CAPACITY`.
    pub fn set(&mut self, bytes: &[u8]) {
        self.clear();
        let copy_len = bytes.len().min(LINE_CAPACITY);
        self.buf[..copy_len].copy_from_slice(&bytes[..copy_len]);
        self.len = copy_len;
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_full(&self) -> bool {
        self.len == LINE_CAPACITY
    }

    /// Get raw bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }
}

impl Default for LineBuffer {
    fn default() -> Self {
        Self::new()
    }
}
