//! Binary wake signal from interrupt context to the console task.
//!
//! At most one "available" state is remembered between a give and a take.
//! Gives while already signaled coalesce. Readers must therefore not assume
//! one wake per byte; [`crate::source::BlockingByteSource`] re-checks the
//! ring before every wait.

use core::sync::atomic::{AtomicBool, Ordering};

/// At-most-one-pending wake primitive.
pub trait Signal {
    /// Mark the signal available (interrupt-safe, never blocks).
    ///
    /// Returns `true` if a higher-priority task was woken and the caller
    /// should yield on interrupt exit.
    fn give_from_isr(&self) -> bool;

    /// Block the calling task until the signal is available, then consume it.
    /// No timeout.
    fn take(&self);

    /// Consume the signal if available, without blocking.
    fn try_take(&self) -> bool;
}

/// Busy-waiting binary signal backed by a single atomic flag.
///
/// Suitable for bare-metal loops and host tests. On an RTOS prefer a
/// primitive that suspends the task (see `BinarySemaphore`).
pub struct AtomicSignal {
    pending: AtomicBool,
}

impl AtomicSignal {
    pub const fn new() -> Self {
        Self {
            pending: AtomicBool::new(false),
        }
    }

    /// True if a give is pending.
    #[inline]
    pub fn is_pending(&self) -> bool {
        self.pending.load(Ordering::Acquire)
    }
}

impl Default for AtomicSignal {
    fn default() -> Self {
        Self::new()
    }
}

impl Signal for AtomicSignal {
    #[inline]
    fn give_from_isr(&self) -> bool {
        self.pending.store(true, Ordering::Release);
        false
    }

    fn take(&self) {
        while !self.try_take() {
            core::hint::spin_loop();
        }
    }

    #[inline]
    fn try_take(&self) -> bool {
        self.pending.swap(false, Ordering::AcqRel)
    }
}

#[cfg(target_os = "espidf")]
pub use self::freertos::BinarySemaphore;

#[cfg(target_os = "espidf")]
mod freertos {
    use super::Signal;
    use esp_idf_svc::sys;

    /// `queueQUEUE_TYPE_BINARY_SEMAPHORE`
    const QUEUE_TYPE_BINARY_SEMAPHORE: u8 = 3;
    /// `portMAX_DELAY`
    const MAX_DELAY: sys::TickType_t = sys::TickType_t::MAX;

    /// FreeRTOS binary semaphore (`xSemaphoreCreateBinary`).
    pub struct BinarySemaphore {
        handle: sys::QueueHandle_t,
    }

    // SAFETY: FreeRTOS queue handles are safe to use from any task or ISR
    // through the *FromISR API.
    unsafe impl Send for BinarySemaphore {}
    unsafe impl Sync for BinarySemaphore {}

    impl BinarySemaphore {
        /// Create the semaphore in the "taken" state.
        ///
        /// Returns `None` if the FreeRTOS heap is exhausted.
        pub fn new() -> Option<Self> {
            // SAFETY: Plain FreeRTOS allocation call.
            let handle =
                unsafe { sys::xQueueGenericCreate(1, 0, QUEUE_TYPE_BINARY_SEMAPHORE) };
            if handle.is_null() {
                None
            } else {
                Some(Self { handle })
            }
        }
    }

    impl Signal for BinarySemaphore {
        fn give_from_isr(&self) -> bool {
            let mut woken: sys::BaseType_t = 0;
            // SAFETY: Valid handle; ISR-safe variant.
            unsafe {
                sys::xQueueGiveFromISR(self.handle, &mut woken);
            }
            woken != 0
        }

        fn take(&self) {
            // SAFETY: Valid handle; called from task context.
            while unsafe { sys::xQueueSemaphoreTake(self.handle, MAX_DELAY) } == 0 {}
        }

        fn try_take(&self) -> bool {
            // SAFETY: Valid handle; zero timeout never blocks.
            unsafe { sys::xQueueSemaphoreTake(self.handle, 0) != 0 }
        }
    }

    impl Drop for BinarySemaphore {
        fn drop(&mut self) {
            // SAFETY: Handle created by xQueueGenericCreate, not used after drop.
            unsafe { sys::vQueueDelete(self.handle) }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_atomic_signal_coalesces_gives() {
        let signal = AtomicSignal::new();

        signal.give_from_isr();
        signal.give_from_isr();
        signal.give_from_isr();

        assert!(signal.try_take());
        assert!(!signal.try_take(), "extra gives must not be queued");
    }

    #[test]
    fn test_atomic_signal_take_returns_after_give() {
        use std::sync::Arc;
        use std::thread;

        let signal = Arc::new(AtomicSignal::new());
        let giver = Arc::clone(&signal);

        let handle = thread::spawn(move || {
            giver.give_from_isr();
        });

        signal.take();
        handle.join().unwrap();
        assert!(!signal.is_pending());
    }
}
