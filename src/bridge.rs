//! Interrupt-context halves of the console transport.
//!
//! # Architecture
//!
//! ```text
//! "byte received" IRQ ──▶ InboundBridge ──push──▶ RX ring ──▶ give(Signal)
//! "tx complete"   IRQ ──▶ OutboundPump  ◀──pop─── TX ring ──▶ give(space Signal)
//! ```
//!
//! # Rules
//!
//! - No blocking, no allocation, no locks in these handlers.
//! - The receiver is re-armed before any bookkeeping so no byte window is
//!   missed.
//! - A full RX ring drops the new byte and records an RX overrun.
//! - The pump is self-sustaining: every "transmit complete" starts the next
//!   byte until the TX ring drains, then marks the transmitter idle.
//! - A writer blocked on a full TX ring is woken through the space signal
//!   once the pump frees a slot.

use core::sync::atomic::{fence, AtomicBool, Ordering};

use crate::config::{RX_BUFFER_SIZE, TX_BUFFER_SIZE};
use crate::fault::{FaultCode, FaultCounters};
use crate::logging::timestamp_us;
use crate::port::SerialPort;
use crate::ring::{ByteRing, OverflowPolicy};
use crate::signal::Signal;
use crate::{rt_trace, rt_warn, LOG_STREAM};

/// Shared state between the UART interrupts and the console task.
///
/// Intended to live in a `static`; every field is safe to touch from
/// either context through the types in this crate.
pub struct SerialConsole<const RX: usize = RX_BUFFER_SIZE, const TX: usize = TX_BUFFER_SIZE> {
    rx: ByteRing<RX>,
    tx: ByteRing<TX>,
    /// True while a single-byte transmit job is in flight.
    tx_busy: AtomicBool,
    /// True while the task waits for room in the TX ring.
    tx_waiting: AtomicBool,
}

impl<const RX: usize, const TX: usize> SerialConsole<RX, TX> {
    /// Create the console rings. RX always rejects when full.
    pub const fn new(tx_policy: OverflowPolicy) -> Self {
        Self {
            rx: ByteRing::new(OverflowPolicy::Reject),
            tx: ByteRing::new(tx_policy),
            tx_busy: AtomicBool::new(false),
            tx_waiting: AtomicBool::new(false),
        }
    }

    #[inline]
    pub fn rx(&self) -> &ByteRing<RX> {
        &self.rx
    }

    #[inline]
    pub fn tx(&self) -> &ByteRing<TX> {
        &self.tx
    }

    /// True while the transmitter is draining the TX ring.
    #[inline]
    pub fn is_transmitting(&self) -> bool {
        self.tx_busy.load(Ordering::Acquire)
    }

    /// Arm the receiver for the first byte. Call once after the UART is
    /// configured and its callbacks are registered.
    pub fn start<P: SerialPort>(&self, port: &P) {
        port.start_receive();
    }

    /// Drop buffered bytes in both directions and mark the transmitter idle.
    ///
    /// Interrupts for this UART must be disabled (console teardown).
    pub fn reset(&self) {
        self.rx.clear();
        self.tx.clear();
        self.tx_busy.store(false, Ordering::Release);
        self.tx_waiting.store(false, Ordering::Release);
    }

    /// Announce (or withdraw) a task waiting for TX space.
    pub(crate) fn set_tx_waiting(&self, waiting: bool) {
        self.tx_waiting.store(waiting, Ordering::SeqCst);
    }
}

/// RX interrupt handler: UART byte → RX ring → wake console task.
pub struct InboundBridge<'a, S: Signal, P: SerialPort, const RX: usize = RX_BUFFER_SIZE, const TX: usize = TX_BUFFER_SIZE> {
    console: &'a SerialConsole<RX, TX>,
    signal: &'a S,
    port: P,
    faults: &'a FaultCounters,
}

impl<'a, S: Signal, P: SerialPort, const RX: usize, const TX: usize> InboundBridge<'a, S, P, RX, TX> {
    pub fn new(
        console: &'a SerialConsole<RX, TX>,
        signal: &'a S,
        port: P,
        faults: &'a FaultCounters,
    ) -> Self {
        Self {
            console,
            signal,
            port,
            faults,
        }
    }

    /// "Byte received" callback (interrupt context).
    ///
    /// Returns `true` if the caller should yield on interrupt exit.
    pub fn on_byte_received(&self, byte: u8) -> bool {
        self.port.start_receive();

        if !self.console.rx.push(byte) {
            self.faults.record(FaultCode::RxOverrun);
            rt_warn!(LOG_STREAM, timestamp_us(), "rx overrun: dropped {:#04x}", byte);
        }

        self.signal.give_from_isr()
    }
}

/// TX interrupt handler: TX ring → UART, one byte per completion.
///
/// `space` is given whenever a byte leaves the ring while the console task
/// waits for room.
pub struct OutboundPump<'a, P: SerialPort, W: Signal, const RX: usize = RX_BUFFER_SIZE, const TX: usize = TX_BUFFER_SIZE> {
    console: &'a SerialConsole<RX, TX>,
    port: P,
    space: &'a W,
}

impl<'a, P: SerialPort, W: Signal, const RX: usize, const TX: usize> OutboundPump<'a, P, W, RX, TX> {
    pub fn new(console: &'a SerialConsole<RX, TX>, port: P, space: &'a W) -> Self {
        Self { console, port, space }
    }

    /// "Transmit complete" callback (interrupt context).
    ///
    /// Returns `true` if the caller should yield on interrupt exit.
    pub fn on_transmit_complete(&self) -> bool {
        match self.console.tx.pop() {
            Some(byte) => {
                self.port.start_transmit(byte);
                // Pairs with the fence in `ConsoleWriter::wait_for_space`.
                fence(Ordering::SeqCst);
                if self.console.tx_waiting.swap(false, Ordering::SeqCst) {
                    return self.space.give_from_isr();
                }
            }
            None => {
                self.console.tx_busy.store(false, Ordering::Release);
                rt_trace!(LOG_STREAM, timestamp_us(), "tx idle");
            }
        }
        false
    }

    /// Start the pump if the transmitter is idle (task context).
    ///
    /// Runs in a critical section so the "transmit complete" interrupt
    /// cannot observe a half-made idle→busy transition.
    pub fn kick(&self) {
        critical_section::with(|_| {
            if self.console.tx_busy.load(Ordering::Acquire) {
                return;
            }
            if let Some(byte) = self.console.tx.pop() {
                self.console.tx_busy.store(true, Ordering::Release);
                self.port.start_transmit(byte);
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signal::AtomicSignal;
    use core::cell::RefCell;

    /// Records transmit jobs; receive arms are counted.
    struct FakePort {
        sent: RefCell<Vec<u8>>,
        armed: core::cell::Cell<u32>,
    }

    impl FakePort {
        fn new() -> Self {
            Self {
                sent: RefCell::new(Vec::new()),
                armed: core::cell::Cell::new(0),
            }
        }
    }

    impl SerialPort for FakePort {
        fn start_receive(&self) {
            self.armed.set(self.armed.get() + 1);
        }

        fn start_transmit(&self, byte: u8) {
            self.sent.borrow_mut().push(byte);
        }
    }

    #[test]
    fn test_inbound_rearms_and_signals() {
        let console = SerialConsole::<8, 8>::new(OverflowPolicy::Reject);
        let signal = AtomicSignal::new();
        let faults = FaultCounters::new();
        let port = FakePort::new();
        let bridge = InboundBridge::new(&console, &signal, &port, &faults);

        bridge.on_byte_received(b'a');

        assert_eq!(port.armed.get(), 1);
        assert!(signal.is_pending());
        assert_eq!(console.rx().pop(), Some(b'a'));
    }

    #[test]
    fn test_inbound_overrun_drops_newest() {
        let console = SerialConsole::<2, 8>::new(OverflowPolicy::Reject);
        let signal = AtomicSignal::new();
        let faults = FaultCounters::new();
        let port = FakePort::new();
        let bridge = InboundBridge::new(&console, &signal, &port, &faults);

        for b in b"xyz" {
            bridge.on_byte_received(*b);
        }

        assert_eq!(port.armed.get(), 3, "receiver re-armed even on overrun");
        assert_eq!(faults.count(FaultCode::RxOverrun), 1);
        assert_eq!(console.rx().pop(), Some(b'x'));
        assert_eq!(console.rx().pop(), Some(b'y'));
        assert_eq!(console.rx().pop(), None);
    }

    #[test]
    fn test_pump_drains_then_goes_idle() {
        let console = SerialConsole::<8, 8>::new(OverflowPolicy::Reject);
        let port = FakePort::new();
        let space = AtomicSignal::new();
        let pump = OutboundPump::new(&console, &port, &space);

        for b in b"ok!" {
            console.tx().push_guarded(*b);
        }
        pump.kick();
        assert!(console.is_transmitting());

        // Simulate the hardware completing each byte.
        while console.is_transmitting() {
            pump.on_transmit_complete();
        }

        assert_eq!(&*port.sent.borrow(), b"ok!");
        assert!(console.tx().is_empty());
    }

    #[test]
    fn test_kick_is_noop_while_busy() {
        let console = SerialConsole::<8, 8>::new(OverflowPolicy::Reject);
        let port = FakePort::new();
        let space = AtomicSignal::new();
        let pump = OutboundPump::new(&console, &port, &space);

        console.tx().push_guarded(b'1');
        console.tx().push_guarded(b'2');
        pump.kick();
        pump.kick();

        assert_eq!(&*port.sent.borrow(), b"1");
        assert_eq!(console.tx().len(), 1);
    }

    #[test]
    fn test_pump_wakes_waiting_writer_only() {
        let console = SerialConsole::<8, 8>::new(OverflowPolicy::Block);
        let port = FakePort::new();
        let space = AtomicSignal::new();
        let pump = OutboundPump::new(&console, &port, &space);

        for b in b"abc" {
            console.tx().push_guarded(*b);
        }
        pump.kick();

        pump.on_transmit_complete();
        assert!(!space.is_pending(), "nobody waiting");

        console.set_tx_waiting(true);
        pump.on_transmit_complete();
        assert!(space.try_take());
        assert!(!console.tx_waiting.load(Ordering::SeqCst));
    }
}
