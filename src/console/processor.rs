//! Command processor capability
//!
//! The line editor hands each finalized line to anything implementing
//! [`CommandProcessor`] and relays the returned chunks verbatim.

use core::fmt;

use crate::config::OUTPUT_CHUNK_SIZE;

/// Whether the processor has more output for the current line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// Call again with the same line for the next chunk.
    More,
    /// Output for this line is complete.
    Done,
}

/// A finalized command line, borrowed for the duration of one dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandLine<'a> {
    bytes: &'a [u8],
}

impl<'a> CommandLine<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes }
    }

    pub fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }

    /// The line as text, `None` if it is not valid UTF-8.
    pub fn as_str(&self) -> Option<&'a str> {
        core::str::from_utf8(self.bytes).ok()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Fixed-capacity output buffer for one processor call.
///
/// Writes past capacity are truncated and flagged; they never fail.
pub struct OutputChunk {
    buf: [u8; OUTPUT_CHUNK_SIZE],
    len: usize,
    truncated: bool,
}

impl OutputChunk {
    pub const fn new() -> Self {
        Self {
            buf: [0u8; OUTPUT_CHUNK_SIZE],
            len: 0,
            truncated: false,
        }
    }

    pub fn clear(&mut self) {
        self.len = 0;
        self.truncated = false;
    }

    pub fn push_bytes(&mut self, bytes: &[u8]) {
        let available = OUTPUT_CHUNK_SIZE - self.len;
        let to_copy = bytes.len().min(available);
        self.buf[self.len..self.len + to_copy].copy_from_slice(&bytes[..to_copy]);
        self.len += to_copy;
        if to_copy < bytes.len() {
            self.truncated = true;
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub const fn capacity(&self) -> usize {
        OUTPUT_CHUNK_SIZE
    }

    /// True if a write did not fit.
    pub fn truncated(&self) -> bool {
        self.truncated
    }
}

impl Default for OutputChunk {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Write for OutputChunk {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.push_bytes(s.as_bytes());
        Ok(())
    }
}

/// Turns a command line into zero or more output chunks.
///
/// The console calls `process` with the same line until it returns
/// [`Dispatch::Done`], writing `out` to the serial port after every call.
/// `out` is cleared before each call. The line must not be retained past
/// the call.
pub trait CommandProcessor {
    fn process(&mut self, line: CommandLine<'_>, out: &mut OutputChunk) -> Dispatch;
}

impl<T: CommandProcessor + ?Sized> CommandProcessor for &mut T {
    fn process(&mut self, line: CommandLine<'_>, out: &mut OutputChunk) -> Dispatch {
        (**self).process(line, out)
    }
}
