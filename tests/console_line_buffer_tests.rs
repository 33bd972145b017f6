//! Line buffer tests

use serial_cli_console::config::LINE_SIZE;
use serial_cli_console::console::line_buffer::{LineBuffer, LINE_CAPACITY};

#[test]
fn test_capacity_leaves_room_for_terminator() {
    assert_eq!(LINE_CAPACITY, LINE_SIZE - 1);
}

#[test]
fn test_push_and_read_back() {
    let mut line = LineBuffer::new();
    for &c in b"ticks" {
        assert!(line.push(c));
    }
    assert_eq!(line.as_bytes(), b"ticks");
    assert_eq!(line.len(), 5);
}

#[test]
fn test_push_rejects_when_full() {
    let mut line = LineBuffer::new();
    for _ in 0..LINE_CAPACITY {
        assert!(line.push(b'a'));
    }
    assert!(line.is_full());
    assert!(!line.push(b'b'));
    assert_eq!(line.len(), LINE_CAPACITY);
}

#[test]
fn test_backspace() {
    let mut line = LineBuffer::new();
    line.push(b'a');
    line.push(b'b');

    assert!(line.backspace());
    assert_eq!(line.as_bytes(), b"a");
    assert!(line.backspace());
    assert!(!line.backspace(), "nothing left to delete");
    assert!(line.is_empty());
}

#[test]
fn test_set_replaces_contents() {
    let mut line = LineBuffer::new();
    line.set(b"version");
    line.set(b"cls");
    assert_eq!(line.as_bytes(), b"cls");

    line.clear();
    assert!(line.is_empty());
}
