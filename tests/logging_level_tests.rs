//! Global log level filter and the `loglevel` command.
//!
//! Kept in its own test binary: the level is process-wide state.

use serial_cli_console::console::{CommandLine, CommandProcessor, CommandTable, OutputChunk, SystemHooks};
use serial_cli_console::log_sink::drain_logs;
use serial_cli_console::logging::{enabled, log_level, set_log_level, LogLevel, LogStream};
use serial_cli_console::{rt_debug, rt_info, rt_warn, ConsoleOutput, FaultCounters};

struct Screen(Vec<u8>);

impl ConsoleOutput for Screen {
    fn write_bytes(&mut self, bytes: &[u8]) {
        self.0.extend_from_slice(bytes);
    }
}

fn zero() -> u32 {
    0
}

fn nothing() {}

fn loglevel(table: &mut CommandTable<'_>, line: &str) -> String {
    let mut out = OutputChunk::new();
    table.process(CommandLine::new(line.as_bytes()), &mut out);
    String::from_utf8_lossy(out.as_bytes()).into_owned()
}

#[test]
fn test_level_filter_and_command() {
    let stream = LogStream::<8>::new();
    let faults = FaultCounters::new();
    let mut table = CommandTable::new(
        SystemHooks {
            ticks: zero,
            reset: nothing,
        },
        &faults,
    );

    // Default: info and above.
    assert_eq!(log_level(), Some(LogLevel::Info));
    rt_info!(stream, 1, "kept {}", 1);
    rt_debug!(stream, 2, "filtered");
    assert_eq!(stream.pending(), 1);

    assert_eq!(loglevel(&mut table, "loglevel"), "Log level: INFO\r\n");
    assert_eq!(loglevel(&mut table, "loglevel DeBuG"), "Log level: DEBUG\r\n");
    assert!(enabled(LogLevel::Debug));
    rt_debug!(stream, 3, "now kept");
    assert_eq!(stream.pending(), 2);

    assert_eq!(loglevel(&mut table, "loglevel off"), "Log level: OFF\r\n");
    rt_warn!(stream, 4, "silenced");
    assert_eq!(stream.pending(), 2);

    assert_eq!(loglevel(&mut table, "loglevel loud"), "E02: invalid value\r\n");
    assert_eq!(log_level(), None, "bad value leaves the level alone");

    let mut screen = Screen(Vec::new());
    assert_eq!(drain_logs(&stream, &mut screen), 2);
    let text = String::from_utf8_lossy(&screen.0).into_owned();
    assert!(text.contains("INFO: kept 1\r\n"));
    assert!(text.contains("DEBUG: now kept\r\n"));

    set_log_level(Some(LogLevel::Info));
}
