//! Process-wide console statics.
//!
//! Producers in interrupt context and the console task share these; each
//! is lock-free and safe from either context.

use crate::fault::FaultCounters;
use crate::logging::LogStream;

/// Log stream drained by the console task onto the serial output.
///
/// Producers: UART interrupts and the console task.
/// Consumer: the console task (`log_sink::drain_logs`).
pub static LOG_STREAM: LogStream = LogStream::new();

/// Fault counters for the board's console instance.
pub static FAULTS: FaultCounters = FaultCounters::new();
