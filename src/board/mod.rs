//! Board wiring for the console binary.
//!
//! The UART drivers available here deliver bytes to threads, not to raw
//! interrupt vectors. A receive thread and a transmit thread stand in for
//! the "byte received" and "transmit complete" interrupts; they run the
//! bridge callbacks inside `critical_section::with`, so the task-side
//! critical sections mask them exactly as they would mask a real IRQ.

use std::sync::atomic::{AtomicU16, Ordering};
use std::thread;

use serial_cli_console::{InboundBridge, OutboundPump, SerialPort, Signal};

#[cfg(target_os = "espidf")]
mod esp;
#[cfg(target_os = "espidf")]
pub use esp::{fatal, init, uart, wake_signal, WakeSignal, CONFIG, HOOKS};

#[cfg(not(target_os = "espidf"))]
mod host;
#[cfg(not(target_os = "espidf"))]
pub use host::{fatal, init, uart, wake_signal, WakeSignal, CONFIG, HOOKS};

/// Blocking byte input from the physical line. `None` when the line closed.
pub trait RxLine: Send + 'static {
    fn read_byte(&mut self) -> Option<u8>;
}

/// Blocking single-byte output to the physical line.
pub trait TxLine: Send + 'static {
    fn write_byte(&mut self, byte: u8);
}

/// Set above the data bits while a byte waits in [`TxSlot`].
const SLOT_PENDING: u16 = 0x100;

/// Single-byte mailbox between the pump and the transmitter thread.
///
/// The pump keeps at most one byte in flight, so one slot is enough and
/// handing over a job never allocates or blocks.
pub struct TxSlot {
    byte: AtomicU16,
    ready: &'static WakeSignal,
}

impl TxSlot {
    /// Allocate the slot for the life of the program.
    pub fn leak() -> &'static Self {
        Box::leak(Box::new(Self {
            byte: AtomicU16::new(0),
            ready: wake_signal(),
        }))
    }

    fn put(&self, byte: u8) {
        self.byte.store(SLOT_PENDING | u16::from(byte), Ordering::Release);
        self.ready.give_from_isr();
    }

    /// Wait for the next job.
    fn take(&self) -> u8 {
        loop {
            let job = self.byte.swap(0, Ordering::Acquire);
            if job & SLOT_PENDING != 0 {
                return job as u8;
            }
            self.ready.take();
        }
    }
}

/// [`SerialPort`] that hands transmit jobs to the transmitter thread.
///
/// The receiver thread reads continuously, so re-arming is a no-op.
#[derive(Clone, Copy)]
pub struct ThreadPort {
    slot: &'static TxSlot,
}

impl ThreadPort {
    pub fn new(slot: &'static TxSlot) -> Self {
        Self { slot }
    }
}

impl SerialPort for ThreadPort {
    fn start_receive(&self) {}

    fn start_transmit(&self, byte: u8) {
        self.slot.put(byte);
    }
}

/// Run the "transmit complete" context: one byte out, then the pump.
pub fn spawn_transmitter<T: TxLine>(
    mut line: T,
    slot: &'static TxSlot,
    pump: OutboundPump<'static, ThreadPort, WakeSignal>,
) {
    let spawned = thread::Builder::new()
        .name("uart-tx".into())
        .spawn(move || loop {
            let byte = slot.take();
            line.write_byte(byte);
            critical_section::with(|_| {
                pump.on_transmit_complete();
            });
        });
    if let Err(e) = spawned {
        fatal(e);
    }
}

/// Run the "byte received" context.
pub fn spawn_receiver<R: RxLine, S: Signal + Sync>(
    mut line: R,
    bridge: InboundBridge<'static, S, ThreadPort>,
) {
    let spawned = thread::Builder::new()
        .name("uart-rx".into())
        .spawn(move || {
            while let Some(byte) = line.read_byte() {
                critical_section::with(|_| bridge.on_byte_received(byte));
            }
            line_closed();
        });
    if let Err(e) = spawned {
        fatal(e);
    }
}

#[cfg(not(target_os = "espidf"))]
fn line_closed() {
    host::line_closed();
}

#[cfg(target_os = "espidf")]
fn line_closed() {}
