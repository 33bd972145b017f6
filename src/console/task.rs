//! Console task loop: read → edit → dispatch → write, forever.

use crate::log_sink::drain_logs;
use crate::logging::LogStream;
use crate::port::SerialPort;
use crate::signal::Signal;
use crate::source::BlockingByteSource;
use crate::writer::ConsoleWriter;

use super::editor::{EditOutcome, LineEditor};
use super::processor::CommandProcessor;

/// Everything the console task owns.
///
/// `S` is the signal type for both the RX wake and the TX space wait.
pub struct ConsoleTask<'a, S, P, C, const RX: usize, const TX: usize, const L: usize>
where
    S: Signal,
    P: SerialPort,
    C: CommandProcessor,
{
    source: BlockingByteSource<'a, S, RX>,
    writer: ConsoleWriter<'a, P, S, RX, TX>,
    editor: LineEditor<'a>,
    processor: C,
    logs: &'a LogStream<L>,
}

impl<'a, S, P, C, const RX: usize, const TX: usize, const L: usize> ConsoleTask<'a, S, P, C, RX, TX, L>
where
    S: Signal,
    P: SerialPort,
    C: CommandProcessor,
{
    pub fn new(
        source: BlockingByteSource<'a, S, RX>,
        writer: ConsoleWriter<'a, P, S, RX, TX>,
        editor: LineEditor<'a>,
        processor: C,
        logs: &'a LogStream<L>,
    ) -> Self {
        Self {
            source,
            writer,
            editor,
            processor,
            logs,
        }
    }

    /// Print the banner and prompt.
    pub fn start(&mut self) {
        self.editor.print_banner(&mut self.writer);
    }

    /// Block for one byte and feed it to the editor.
    ///
    /// Pending log entries are flushed before blocking and after a line is
    /// dispatched, so they never split a command's output.
    pub fn step(&mut self) -> EditOutcome {
        drain_logs(self.logs, &mut self.writer);

        let byte = self.source.read();
        let outcome = self.editor.process_byte(byte, &mut self.writer, &mut self.processor);

        if outcome == EditOutcome::Dispatched {
            drain_logs(self.logs, &mut self.writer);
        }
        outcome
    }

    /// Task entry point. Never returns.
    pub fn run(mut self) -> ! {
        self.start();
        loop {
            self.step();
        }
    }

    pub fn editor(&self) -> &LineEditor<'a> {
        &self.editor
    }
}
