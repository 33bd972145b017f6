//! # SerialCliConsole
//!
//! Interrupt-driven UART command line console with line editing.
//!
//! ## Architecture
//!
//! ```text
//! UART ─▶ InboundBridge (ISR) ─▶ RX ByteRing ─▶ BlockingByteSource ─▶ LineEditor
//!                                                                        │
//! UART ◀─ OutboundPump (ISR) ◀─ TX ByteRing ◀─ ConsoleWriter ◀─ CommandProcessor
//! ```
//!
//! - Interrupt handlers never block, allocate or lock
//! - One producer and one consumer per ring
//! - The console task blocks only while waiting for the next byte

#![cfg_attr(not(test), no_std)]

pub mod bridge;
pub mod config;
pub mod console;
pub mod fault;
pub mod globals;
pub mod log_sink;
pub mod logging;
pub mod port;
pub mod ring;
pub mod signal;
pub mod source;
pub mod writer;

pub use bridge::{InboundBridge, OutboundPump, SerialConsole};
pub use config::{ConsoleConfig, LineTerminator};
pub use console::{CommandProcessor, CommandTable, ConsoleTask, LineEditor};
pub use fault::{FaultCode, FaultCounters};
pub use globals::{FAULTS, LOG_STREAM};
pub use port::SerialPort;
pub use ring::{ByteRing, OverflowPolicy};
pub use signal::{AtomicSignal, Signal};
pub use source::BlockingByteSource;
pub use writer::{ConsoleOutput, ConsoleWriter};
