//! Host simulator: stdin is the receive line, stdout the transmit line.
//!
//! Run with a pipe or a cooked-mode terminal; lines end in LF.

use std::io::{self, Read, Write};
use std::process;
use std::sync::{Condvar, Mutex, OnceLock};
use std::thread;
use std::time::{Duration, Instant};

use serial_cli_console::console::SystemHooks;
use serial_cli_console::logging::timestamp_us;
use serial_cli_console::{rt_info, ConsoleConfig, LineTerminator, Signal, LOG_STREAM};

use super::{RxLine, TxLine};

pub const CONFIG: ConsoleConfig = ConsoleConfig::DEFAULT.with_terminator(LineTerminator::Lf);

pub const HOOKS: SystemHooks = SystemHooks {
    ticks: ticks_ms,
    reset,
};

static BOOT: OnceLock<Instant> = OnceLock::new();

pub fn init() {
    BOOT.get_or_init(Instant::now);
    rt_info!(LOG_STREAM, timestamp_us(), "host simulator started");
}

/// A fresh signal for the life of the program.
pub fn wake_signal() -> &'static WakeSignal {
    Box::leak(Box::new(WakeSignal::new()))
}

pub fn uart() -> io::Result<(StdinLine, StdoutLine)> {
    Ok((StdinLine(io::stdin()), StdoutLine(io::stdout())))
}

pub fn fatal(e: impl std::fmt::Display) -> ! {
    eprintln!("console: {e}");
    process::exit(1);
}

/// Stdin hit EOF: let the console consume what arrived and the
/// transmitter finish, then leave.
pub fn line_closed() {
    let mut quiet = 0;
    while quiet < 3 {
        thread::sleep(Duration::from_millis(20));
        let console = &crate::CONSOLE;
        let idle = console.rx().is_empty() && console.tx().is_empty() && !console.is_transmitting();
        quiet = if idle { quiet + 1 } else { 0 };
    }
    process::exit(0);
}

fn ticks_ms() -> u32 {
    BOOT.get_or_init(Instant::now).elapsed().as_millis() as u32
}

fn reset() {
    let _ = io::stdout().flush();
    process::exit(0);
}

/// Condvar-backed binary signal, so the console thread sleeps while idle.
pub struct WakeSignal {
    pending: Mutex<bool>,
    ready: Condvar,
}

impl WakeSignal {
    fn new() -> Self {
        Self {
            pending: Mutex::new(false),
            ready: Condvar::new(),
        }
    }
}

impl Signal for WakeSignal {
    fn give_from_isr(&self) -> bool {
        let mut pending = self.pending.lock().unwrap_or_else(|e| e.into_inner());
        *pending = true;
        self.ready.notify_one();
        false
    }

    fn take(&self) {
        let mut pending = self.pending.lock().unwrap_or_else(|e| e.into_inner());
        while !*pending {
            pending = self.ready.wait(pending).unwrap_or_else(|e| e.into_inner());
        }
        *pending = false;
    }

    fn try_take(&self) -> bool {
        let mut pending = self.pending.lock().unwrap_or_else(|e| e.into_inner());
        std::mem::replace(&mut *pending, false)
    }
}

pub struct StdinLine(io::Stdin);

impl RxLine for StdinLine {
    fn read_byte(&mut self) -> Option<u8> {
        let mut byte = [0u8; 1];
        match self.0.lock().read(&mut byte) {
            Ok(1) => Some(byte[0]),
            _ => None,
        }
    }
}

pub struct StdoutLine(io::Stdout);

impl TxLine for StdoutLine {
    fn write_byte(&mut self, byte: u8) {
        let mut out = self.0.lock();
        let _ = out.write_all(&[byte]);
        let _ = out.flush();
    }
}
