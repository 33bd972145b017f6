//! Serial console line editing and command dispatch
//!
//! Task context only. Zero heap allocation - all fixed buffers.

pub mod commands;
pub mod editor;
pub mod error;
pub mod escape;
pub mod history;
pub mod line_buffer;
pub mod parser;
pub mod processor;
pub mod task;

pub use commands::{command_names, find_command, CommandTable, SystemHooks, COMMANDS};
pub use editor::{EditOutcome, EditorState, LineEditor};
pub use error::ConsoleError;
pub use escape::{EscapeAccumulator, EscapeOutcome};
pub use history::History;
pub use line_buffer::{LineBuffer, LINE_CAPACITY};
pub use parser::{parse_line, ParsedCommand};
pub use processor::{CommandLine, CommandProcessor, Dispatch, OutputChunk};
pub use task::ConsoleTask;
