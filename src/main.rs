//! SerialCliConsole - firmware entry point
//!
//! 1. Bring up the board UART and the wake signals
//! 2. Start the receive / transmit "interrupt" contexts
//! 3. Arm the receiver
//! 4. Run the console task forever

mod board;

use serial_cli_console::{
    BlockingByteSource, CommandTable, ConsoleTask, ConsoleWriter, InboundBridge, LineEditor,
    OutboundPump, SerialConsole, FAULTS, LOG_STREAM,
};

/// Console task stack, bytes.
const CONSOLE_STACK_SIZE: usize = 8 * 1024;

// Static ring storage (RX/TX), shared by interrupt and task context.
static CONSOLE: SerialConsole = SerialConsole::new(board::CONFIG.tx_policy);

fn main() {
    board::init();

    let rx_wake = board::wake_signal();
    let tx_space = board::wake_signal();
    let slot = board::TxSlot::leak();
    let (rx_line, tx_line) = match board::uart() {
        Ok(lines) => lines,
        Err(e) => board::fatal(e),
    };

    let port = board::ThreadPort::new(slot);
    board::spawn_transmitter(tx_line, slot, OutboundPump::new(&CONSOLE, port, tx_space));
    board::spawn_receiver(rx_line, InboundBridge::new(&CONSOLE, rx_wake, port, &FAULTS));

    CONSOLE.start(&port);

    let console = std::thread::Builder::new()
        .name("console".into())
        .stack_size(CONSOLE_STACK_SIZE)
        .spawn(move || {
            let task = ConsoleTask::new(
                BlockingByteSource::new(CONSOLE.rx(), rx_wake),
                ConsoleWriter::new(&CONSOLE, port, tx_space, &FAULTS),
                LineEditor::new(board::CONFIG, &FAULTS),
                CommandTable::new(board::HOOKS, &FAULTS),
                &LOG_STREAM,
            );
            task.run();
        });

    match console {
        Ok(handle) => {
            let _ = handle.join();
        }
        Err(e) => board::fatal(e),
    }
}
