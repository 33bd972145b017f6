//! Task-context console output.

use core::sync::atomic::{fence, Ordering};

use crate::bridge::{OutboundPump, SerialConsole};
use crate::config::{RX_BUFFER_SIZE, TX_BUFFER_SIZE};
use crate::fault::{FaultCode, FaultCounters};
use crate::port::SerialPort;
use crate::ring::{ByteRing, OverflowPolicy};
use crate::signal::Signal;

/// Byte sink the line editor and log drain write through.
pub trait ConsoleOutput {
    fn write_bytes(&mut self, bytes: &[u8]);

    fn write_text(&mut self, s: &str) {
        self.write_bytes(s.as_bytes());
    }
}

/// Enqueues output on the TX ring and restarts the pump when idle.
///
/// Task context only. On a full ring the TX policy decides:
/// - [`OverflowPolicy::Block`]: wait on `space` until the pump frees a slot
///   (nothing is lost)
/// - [`OverflowPolicy::Reject`] / [`OverflowPolicy::OverwriteOldest`]: never
///   wait; each lost byte counts as a TX overrun
pub struct ConsoleWriter<'a, P: SerialPort, W: Signal, const RX: usize = RX_BUFFER_SIZE, const TX: usize = TX_BUFFER_SIZE> {
    console: &'a SerialConsole<RX, TX>,
    pump: OutboundPump<'a, P, W, RX, TX>,
    tx: &'a ByteRing<TX>,
    space: &'a W,
    faults: &'a FaultCounters,
}

impl<'a, P: SerialPort, W: Signal, const RX: usize, const TX: usize> ConsoleWriter<'a, P, W, RX, TX> {
    /// `space` must be the signal the interrupt-side pump gives.
    pub fn new(
        console: &'a SerialConsole<RX, TX>,
        port: P,
        space: &'a W,
        faults: &'a FaultCounters,
    ) -> Self {
        Self {
            console,
            pump: OutboundPump::new(console, port, space),
            tx: console.tx(),
            space,
            faults,
        }
    }

    /// Enqueue `bytes` and kick the transmitter.
    pub fn write(&self, bytes: &[u8]) {
        if bytes.is_empty() {
            return;
        }

        let before = self.tx.overruns();
        for &b in bytes {
            if self.tx.is_full() {
                // An idle transmitter takes one byte and frees a slot.
                self.pump.kick();
                if self.tx.policy() == OverflowPolicy::Block {
                    self.wait_for_space();
                }
            }
            self.tx.push_guarded(b);
        }
        let lost = self.tx.overruns().wrapping_sub(before);
        for _ in 0..lost {
            self.faults.record(FaultCode::TxOverrun);
        }

        self.pump.kick();
    }

    /// Block until the TX ring has a free slot.
    ///
    /// The waiting flag is raised before the re-check, so a slot freed in
    /// between either shows up in the re-check or gives the signal.
    fn wait_for_space(&self) {
        loop {
            self.console.set_tx_waiting(true);
            fence(Ordering::SeqCst);
            if !self.tx.is_full() {
                self.console.set_tx_waiting(false);
                return;
            }
            // A stale give only costs one more pass.
            self.space.take();
        }
    }
}

impl<P: SerialPort, W: Signal, const RX: usize, const TX: usize> ConsoleOutput for ConsoleWriter<'_, P, W, RX, TX> {
    fn write_bytes(&mut self, bytes: &[u8]) {
        self.write(bytes);
    }
}

impl<P: SerialPort, W: Signal, const RX: usize, const TX: usize> core::fmt::Write for ConsoleWriter<'_, P, W, RX, TX> {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        self.write(s.as_bytes());
        Ok(())
    }
}
