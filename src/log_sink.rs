//! Log output on the serial console.
//!
//! Drains a [`LogStream`] through the console's own TX path. Runs only in
//! the console task, which is the TX ring's single producer.

use core::fmt::Write;

use crate::logging::{LogEntry, LogStream, SliceWriter};
use crate::writer::ConsoleOutput;

/// Formatted line buffer: timestamp, level, 120-byte message, framing.
const LINE_BUF_SIZE: usize = 160;

/// Format log entry to bytes.
///
/// Format: `[timestamp_us] LEVEL: message\r\n`
pub fn format_log_entry(entry: &LogEntry, buf: &mut [u8]) -> usize {
    let mut writer = SliceWriter::new(buf);
    let _ = write!(
        writer,
        "[{:10}] {}: {}\r\n",
        entry.timestamp_us,
        entry.level.as_str(),
        entry.message()
    );
    writer.len()
}

/// Write every pending entry, then a drop report if any were lost.
///
/// Returns the number of entries written.
pub fn drain_logs<const N: usize>(stream: &LogStream<N>, out: &mut dyn ConsoleOutput) -> usize {
    let mut line = [0u8; LINE_BUF_SIZE];
    let mut written = 0;

    while let Some(entry) = stream.drain() {
        let len = format_log_entry(&entry, &mut line);
        out.write_bytes(&line[..len]);
        written += 1;
    }

    let dropped = stream.dropped();
    if dropped > 0 {
        let mut w = SliceWriter::new(&mut line);
        let _ = write!(w, "[WARN] log dropped: {}\r\n", dropped);
        out.write_bytes(w.as_bytes());
        stream.reset_dropped();
    }

    written
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::{LogLevel, MAX_MSG_LEN};

    struct Capture(Vec<u8>);

    impl ConsoleOutput for Capture {
        fn write_bytes(&mut self, bytes: &[u8]) {
            self.0.extend_from_slice(bytes);
        }
    }

    #[test]
    fn test_format_log_entry() {
        let entry = LogEntry {
            timestamp_us: 1234567,
            level: LogLevel::Info,
            len: 11,
            msg: {
                let mut msg = [0u8; MAX_MSG_LEN];
                msg[..11].copy_from_slice(b"Hello world");
                msg
            },
        };

        let mut buf = [0u8; LINE_BUF_SIZE];
        let len = format_log_entry(&entry, &mut buf);

        let formatted = core::str::from_utf8(&buf[..len]).unwrap();
        assert!(formatted.contains("1234567"));
        assert!(formatted.contains("INFO: Hello world"));
        assert!(formatted.ends_with("\r\n"));
    }

    #[test]
    fn test_drain_writes_entries_and_drop_report() {
        let stream = LogStream::<2>::new();
        stream.push(1, LogLevel::Warn, b"rx overrun");
        stream.push(2, LogLevel::Error, b"second");
        stream.push(3, LogLevel::Error, b"lost");

        let mut out = Capture(Vec::new());
        assert_eq!(drain_logs(&stream, &mut out), 2);

        let text = String::from_utf8(out.0).unwrap();
        assert!(text.contains("WARN: rx overrun\r\n"));
        assert!(text.contains("ERROR: second\r\n"));
        assert!(!text.contains("lost"));
        assert!(text.contains("log dropped: 1"));
        assert_eq!(stream.dropped(), 0);
    }

    #[test]
    fn test_drain_empty_stream_writes_nothing() {
        let stream = LogStream::<4>::new();
        let mut out = Capture(Vec::new());

        assert_eq!(drain_logs(&stream, &mut out), 0);
        assert!(out.0.is_empty());
    }
}
