//! Single-slot history tests

use serial_cli_console::console::history::History;
use serial_cli_console::console::line_buffer::LINE_CAPACITY;

#[test]
fn test_history_starts_empty() {
    let history = History::new();
    assert!(history.is_empty());
    assert_eq!(history.last(), b"");
}

#[test]
fn test_history_keeps_only_last() {
    let mut history = History::new();

    history.record(b"help");
    history.record(b"ticks");

    assert_eq!(history.last(), b"ticks");
}

#[test]
fn test_empty_line_overwrites_history() {
    let mut history = History::new();

    history.record(b"version");
    history.record(b"");

    assert!(history.is_empty());
}

#[test]
fn test_history_truncates_to_line_capacity() {
    let mut history = History::new();
    let long = [b'x'; LINE_CAPACITY + 10];

    history.record(&long);

    assert_eq!(history.last().len(), LINE_CAPACITY);
}
