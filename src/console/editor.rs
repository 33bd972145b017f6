//! Line editor state machine
//!
//! Consumes one byte at a time, echoes edits, recalls the last command on
//! cursor-up and dispatches a finalized line to a [`CommandProcessor`].
//!
//! ```text
//!            ESC                       MIN_ESCAPE_SIZE bytes
//!  NORMAL ─────────▶ ESCAPE ─────────────────────────────────▶ NORMAL
//!    │ ▲                     (recall on match, discard otherwise)
//!    └─┘ printable / backspace / terminator
//! ```

use crate::config::{ascii, ConsoleConfig};
use crate::fault::{FaultCode, FaultCounters};
use crate::logging::timestamp_us;
use crate::writer::ConsoleOutput;
use crate::{rt_debug, LOG_STREAM};

use super::escape::{EscapeAccumulator, EscapeOutcome};
use super::history::History;
use super::line_buffer::LineBuffer;
use super::processor::{CommandLine, CommandProcessor, Dispatch, OutputChunk};

/// Visual erase of one character: back, space, back.
const ERASE: &[u8] = b"\x08 \x08";

/// Erase the whole terminal line and return to column 0.
const CLEAR_LINE: &[u8] = b"\x1b[2K\r";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditorState {
    Normal,
    /// Got ESC, accumulating the sequence.
    Escape,
}

/// What a single byte did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditOutcome {
    /// Line still being edited (includes ignored bytes).
    Editing,
    /// The last command was copied into the line.
    Recalled,
    /// A line was finalized and fully dispatched.
    Dispatched,
}

/// Editable input line plus single-slot history. Task context only.
pub struct LineEditor<'a> {
    config: ConsoleConfig,
    state: EditorState,
    line: LineBuffer,
    history: History,
    escape: EscapeAccumulator,
    chunk: OutputChunk,
    faults: &'a FaultCounters,
}

impl<'a> LineEditor<'a> {
    pub const fn new(config: ConsoleConfig, faults: &'a FaultCounters) -> Self {
        Self {
            config,
            state: EditorState::Normal,
            line: LineBuffer::new(),
            history: History::new(),
            escape: EscapeAccumulator::new(),
            chunk: OutputChunk::new(),
            faults,
        }
    }

    /// Process a single input byte.
    pub fn process_byte<C>(
        &mut self,
        byte: u8,
        out: &mut dyn ConsoleOutput,
        processor: &mut C,
    ) -> EditOutcome
    where
        C: CommandProcessor + ?Sized,
    {
        match self.state {
            EditorState::Normal => self.process_normal(byte, out, processor),
            EditorState::Escape => self.process_escape(byte, out),
        }
    }

    fn process_normal<C>(
        &mut self,
        byte: u8,
        out: &mut dyn ConsoleOutput,
        processor: &mut C,
    ) -> EditOutcome
    where
        C: CommandProcessor + ?Sized,
    {
        match byte {
            b if b == self.config.terminator.byte() => {
                self.finalize(out, processor);
                return EditOutcome::Dispatched;
            }

            ascii::ESC => {
                self.state = EditorState::Escape;
                self.escape.reset();
            }

            // The non-canonical newline byte (CR of a CR+LF pair, or vice versa)
            b if b == self.config.terminator.ignored() => {}

            ascii::BACKSPACE | ascii::DELETE => {
                if self.line.backspace() {
                    out.write_bytes(ERASE);
                }
            }

            _ => {
                if self.line.push(byte) {
                    out.write_bytes(&[byte]);
                } else {
                    self.faults.record(FaultCode::InputOverflow);
                    rt_debug!(LOG_STREAM, timestamp_us(), "input full: dropped {:#04x}", byte);
                }
            }
        }
        EditOutcome::Editing
    }

    fn process_escape(&mut self, byte: u8, out: &mut dyn ConsoleOutput) -> EditOutcome {
        match self.escape.feed(byte, self.config.recall_sequences) {
            EscapeOutcome::Pending => EditOutcome::Editing,
            EscapeOutcome::Recall => {
                self.state = EditorState::Normal;
                self.recall(out);
                EditOutcome::Recalled
            }
            EscapeOutcome::Unrecognized => {
                self.state = EditorState::Normal;
                EditOutcome::Editing
            }
        }
    }

    /// Echo a line break, remember the line, drain the processor, reset.
    fn finalize<C>(&mut self, out: &mut dyn ConsoleOutput, processor: &mut C)
    where
        C: CommandProcessor + ?Sized,
    {
        out.write_bytes(b"\r\n");
        self.history.record(self.line.as_bytes());

        loop {
            self.chunk.clear();
            let more = processor.process(CommandLine::new(self.line.as_bytes()), &mut self.chunk);
            out.write_bytes(self.chunk.as_bytes());
            if more == Dispatch::Done {
                break;
            }
        }

        self.line.clear();
        self.print_prompt(out);
    }

    /// Replace the line with the last command and redraw it.
    fn recall(&mut self, out: &mut dyn ConsoleOutput) {
        out.write_bytes(CLEAR_LINE);
        self.print_prompt(out);

        self.line.set(self.history.last());
        out.write_bytes(self.line.as_bytes());
    }

    /// Print the prompt
    pub fn print_prompt(&self, out: &mut dyn ConsoleOutput) {
        out.write_text(self.config.prompt);
    }

    /// Print welcome banner followed by the prompt
    pub fn print_banner(&self, out: &mut dyn ConsoleOutput) {
        out.write_text(self.config.banner);
        self.print_prompt(out);
    }

    pub fn state(&self) -> EditorState {
        self.state
    }

    /// Bytes typed so far on the current line.
    pub fn line(&self) -> &[u8] {
        self.line.as_bytes()
    }

    /// Insertion index into the line.
    pub fn cursor(&self) -> usize {
        self.line.len()
    }

    /// The single remembered command.
    pub fn last_command(&self) -> &[u8] {
        self.history.last()
    }

    pub fn config(&self) -> &ConsoleConfig {
        &self.config
    }
}
