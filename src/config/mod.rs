//! Module: config
//!
//! Purpose: Static sizing and runtime behavior of the serial console.
//!
//! Architecture:
//! - Buffer sizes are compile-time constants (static allocation, no heap)
//! - `ConsoleConfig` selects terminator, prompt, banner, recall sequences
//!   and the TX overflow policy (RX always drops the newest byte, TX waits
//!   for space unless configured otherwise)
//! - Version string comes from build.rs (`VERSION_STRING`)

use crate::ring::OverflowPolicy;

/// RX ring capacity in bytes.
pub const RX_BUFFER_SIZE: usize = 512;

/// TX ring capacity in bytes.
pub const TX_BUFFER_SIZE: usize = 512;

/// Input line buffer size L. At most `LINE_SIZE - 1` bytes are accepted.
pub const LINE_SIZE: usize = 64;

/// Escape accumulator size E.
pub const ESCAPE_SIZE: usize = 4;

/// Accumulated escape length at which the sequence is evaluated.
pub const MIN_ESCAPE_SIZE: usize = 2;

/// Capacity of one command-processor output chunk.
pub const OUTPUT_CHUNK_SIZE: usize = 128;

const _: () = assert!(LINE_SIZE >= 2, "LINE_SIZE must hold at least one byte");
const _: () = assert!(
    MIN_ESCAPE_SIZE > 0 && MIN_ESCAPE_SIZE <= ESCAPE_SIZE,
    "MIN_ESCAPE_SIZE must be within 1..=ESCAPE_SIZE"
);

/// Version string (set by build.rs, includes git hash).
pub const VERSION: &str = env!("VERSION_STRING");

/// ASCII control bytes recognized by the line editor.
pub mod ascii {
    pub const BACKSPACE: u8 = 0x08;
    pub const LF: u8 = b'\n';
    pub const CR: u8 = b'\r';
    pub const ESC: u8 = 0x1B;
    pub const DELETE: u8 = 0x7F;
}

/// The single byte that finalizes a line. The other newline byte is ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineTerminator {
    /// Carriage return (what a terminal sends for Enter).
    Cr,
    /// Line feed (cooked-mode terminals, pipes).
    Lf,
}

impl LineTerminator {
    /// The byte that finalizes a line.
    pub const fn byte(self) -> u8 {
        match self {
            LineTerminator::Cr => ascii::CR,
            LineTerminator::Lf => ascii::LF,
        }
    }

    /// The newline byte that is treated as a no-op.
    pub const fn ignored(self) -> u8 {
        match self {
            LineTerminator::Cr => ascii::LF,
            LineTerminator::Lf => ascii::CR,
        }
    }
}

/// Cursor-up sequences (after ESC) that recall the last command.
pub const DEFAULT_RECALL_SEQUENCES: &[[u8; MIN_ESCAPE_SIZE]] = &[*b"[A", *b"OA"];

/// Console behavior.
#[derive(Clone, Copy, Debug)]
pub struct ConsoleConfig {
    pub terminator: LineTerminator,
    /// Printed after the banner and after every dispatched line.
    pub prompt: &'static str,
    /// Printed once when the console task starts.
    pub banner: &'static str,
    /// Escape sequences (without ESC) recognized as cursor-up, compared
    /// case-insensitively.
    pub recall_sequences: &'static [[u8; MIN_ESCAPE_SIZE]],
    /// Full-ring policy for output bytes. `Block` (default) waits for the
    /// transmitter; the others never wait and may lose output.
    pub tx_policy: OverflowPolicy,
}

impl ConsoleConfig {
    pub const DEFAULT: Self = Self {
        terminator: LineTerminator::Cr,
        prompt: "> ",
        banner: "Serial CLI.\r\nType help to view a list of registered commands.\r\n",
        recall_sequences: DEFAULT_RECALL_SEQUENCES,
        tx_policy: OverflowPolicy::Block,
    };

    pub const fn with_terminator(mut self, terminator: LineTerminator) -> Self {
        self.terminator = terminator;
        self
    }

    pub const fn with_prompt(mut self, prompt: &'static str) -> Self {
        self.prompt = prompt;
        self
    }

    pub const fn with_banner(mut self, banner: &'static str) -> Self {
        self.banner = banner;
        self
    }

    pub const fn with_recall_sequences(
        mut self,
        sequences: &'static [[u8; MIN_ESCAPE_SIZE]],
    ) -> Self {
        self.recall_sequences = sequences;
        self
    }

    pub const fn with_tx_policy(mut self, policy: OverflowPolicy) -> Self {
        self.tx_policy = policy;
        self
    }
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
