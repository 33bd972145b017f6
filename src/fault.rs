//! Non-fatal fault accounting for the serial console.
//!
//! Nothing in the console core is fatal. Lost bytes and discarded input are
//! counted here and reported through the log stream; the console keeps
//! running.

use core::sync::atomic::{AtomicU32, AtomicU8, Ordering};

/// Why bytes were lost or input was discarded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum FaultCode {
    /// No fault recorded yet.
    None = 0,

    /// RX ring full: received byte dropped (drop-newest).
    RxOverrun = 1,

    /// TX ring full: output byte dropped or oldest byte overwritten.
    TxOverrun = 2,

    /// Input line full: typed byte dropped.
    InputOverflow = 3,
}

impl FaultCode {
    /// Convert from raw u8 value.
    pub fn from_u8(value: u8) -> Self {
        match value {
            1 => FaultCode::RxOverrun,
            2 => FaultCode::TxOverrun,
            3 => FaultCode::InputOverflow,
            _ => FaultCode::None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FaultCode::None => "none",
            FaultCode::RxOverrun => "rx overrun",
            FaultCode::TxOverrun => "tx overrun",
            FaultCode::InputOverflow => "input overflow",
        }
    }
}

/// Per-code fault counters, safe to bump from interrupt context.
///
/// # Usage
///
/// ```ignore
/// static FAULTS: FaultCounters = FaultCounters::new();
///
/// // In the RX interrupt:
/// if !rx_ring.push(byte) {
///     FAULTS.record(FaultCode::RxOverrun);
/// }
///
/// // In the `stats` command:
/// let snap = FAULTS.snapshot();
/// ```
pub struct FaultCounters {
    rx_overruns: AtomicU32,
    tx_overruns: AtomicU32,
    input_overflows: AtomicU32,

    /// Most recent fault code.
    last: AtomicU8,
}

impl FaultCounters {
    pub const fn new() -> Self {
        Self {
            rx_overruns: AtomicU32::new(0),
            tx_overruns: AtomicU32::new(0),
            input_overflows: AtomicU32::new(0),
            last: AtomicU8::new(FaultCode::None as u8),
        }
    }

    fn counter(&self, code: FaultCode) -> Option<&AtomicU32> {
        match code {
            FaultCode::None => None,
            FaultCode::RxOverrun => Some(&self.rx_overruns),
            FaultCode::TxOverrun => Some(&self.tx_overruns),
            FaultCode::InputOverflow => Some(&self.input_overflows),
        }
    }

    /// Count one occurrence of `code`.
    #[inline]
    pub fn record(&self, code: FaultCode) {
        if let Some(c) = self.counter(code) {
            c.fetch_add(1, Ordering::Relaxed);
            self.last.store(code as u8, Ordering::Release);
        }
    }

    /// Occurrences of `code` since boot (or last reset).
    #[inline]
    pub fn count(&self, code: FaultCode) -> u32 {
        self.counter(code)
            .map(|c| c.load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    #[inline]
    pub fn last(&self) -> FaultCode {
        FaultCode::from_u8(self.last.load(Ordering::Acquire))
    }

    /// Sum of all counters.
    pub fn total(&self) -> u32 {
        self.rx_overruns
            .load(Ordering::Relaxed)
            .wrapping_add(self.tx_overruns.load(Ordering::Relaxed))
            .wrapping_add(self.input_overflows.load(Ordering::Relaxed))
    }

    /// Zero every counter.
    pub fn reset(&self) {
        self.rx_overruns.store(0, Ordering::Relaxed);
        self.tx_overruns.store(0, Ordering::Relaxed);
        self.input_overflows.store(0, Ordering::Relaxed);
        self.last.store(FaultCode::None as u8, Ordering::Release);
    }

    /// Get a snapshot of all counters at a point in time.
    pub fn snapshot(&self) -> FaultSnapshot {
        FaultSnapshot {
            rx_overruns: self.count(FaultCode::RxOverrun),
            tx_overruns: self.count(FaultCode::TxOverrun),
            input_overflows: self.count(FaultCode::InputOverflow),
            last: self.last(),
        }
    }
}

impl Default for FaultCounters {
    fn default() -> Self {
        Self::new()
    }
}

/// Snapshot of fault counters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FaultSnapshot {
    pub rx_overruns: u32,
    pub tx_overruns: u32,
    pub input_overflows: u32,
    pub last: FaultCode,
}
