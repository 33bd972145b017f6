//! Fixed-capacity SPSC byte ring shared between interrupt and task context.
//!
//! # Architecture
//!
//! ```text
//! RX:  UART ISR ──push()──▶ [ByteRing] ──pop_guarded()──▶ console task
//! TX:  console task ──push_guarded()──▶ [ByteRing] ──pop()──▶ UART ISR
//! ```
//!
//! # Rules
//!
//! - Exactly one producer and one consumer per ring.
//! - `head` is written only by the producer, `tail` only by the consumer.
//! - `count` is the only field both sides modify; updates are atomic RMW.
//! - Interrupt-side operations (`push`, `pop`) never take a lock.
//! - Task-side operations (`push_guarded`, `pop_guarded`) copy the byte
//!   outside the critical section and mask interrupts only for the
//!   index/count update.

use core::cell::UnsafeCell;
use core::sync::atomic::{AtomicU32, AtomicUsize, Ordering};

/// What `push` does when the ring is full.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OverflowPolicy {
    /// Drop the new byte and report failure. Already-buffered bytes survive.
    Reject,
    /// Discard the oldest byte to make room. Only valid when the producer
    /// runs in task context (see [`ByteRing::push_guarded`]).
    OverwriteOldest,
    /// The producer waits for room. The ring cannot wait itself: a full
    /// `push_guarded` returns `false` without counting an overrun and the
    /// caller retries once the consumer frees a slot
    /// (see [`crate::writer::ConsoleWriter`]).
    Block,
}

/// Single-producer / single-consumer circular byte buffer.
///
/// `N` is the capacity C and may be any positive integer.
pub struct ByteRing<const N: usize> {
    /// Backing storage.
    slots: UnsafeCell<[u8; N]>,
    /// Next slot to write (producer-owned).
    head: AtomicUsize,
    /// Next slot to read (consumer-owned).
    tail: AtomicUsize,
    /// Bytes currently stored, `0..=N`.
    count: AtomicUsize,
    /// Bytes lost to a full ring since creation.
    overruns: AtomicU32,
    policy: OverflowPolicy,
}

// SAFETY: Single producer writes slots[head] before publishing via `count`
// (Release); single consumer reads slots[tail] only after observing `count`
// (Acquire). The two sides never touch the same slot concurrently.
unsafe impl<const N: usize> Sync for ByteRing<N> {}
unsafe impl<const N: usize> Send for ByteRing<N> {}

impl<const N: usize> ByteRing<N> {
    /// Create an empty ring with the given overflow policy.
    ///
    /// # Panics
    ///
    /// Panics at compile time (const context) if `N == 0`.
    pub const fn new(policy: OverflowPolicy) -> Self {
        assert!(N > 0, "ByteRing capacity must be positive");

        Self {
            slots: UnsafeCell::new([0u8; N]),
            head: AtomicUsize::new(0),
            tail: AtomicUsize::new(0),
            count: AtomicUsize::new(0),
            overruns: AtomicU32::new(0),
            policy,
        }
    }

    #[inline]
    const fn next(idx: usize) -> usize {
        if idx + 1 == N {
            0
        } else {
            idx + 1
        }
    }

    /// Append one byte (interrupt-safe, lock-free, wait-free).
    ///
    /// Always rejects when full, regardless of policy: the interrupt-side
    /// producer must never touch the consumer's `tail`.
    ///
    /// Returns `false` if the byte was dropped.
    #[inline]
    pub fn push(&self, byte: u8) -> bool {
        if self.count.load(Ordering::Acquire) >= N {
            self.overruns.fetch_add(1, Ordering::Relaxed);
            return false;
        }

        let head = self.head.load(Ordering::Relaxed);

        // SAFETY: Single producer; slot at `head` is not visible to the
        // consumer until `count` is incremented below.
        unsafe {
            (*self.slots.get())[head] = byte;
        }

        self.head.store(Self::next(head), Ordering::Relaxed);
        self.count.fetch_add(1, Ordering::Release);
        true
    }

    /// Remove the oldest byte (interrupt-safe, lock-free).
    ///
    /// Returns `None` when empty (underrun is not a fault).
    #[inline]
    pub fn pop(&self) -> Option<u8> {
        if self.count.load(Ordering::Acquire) == 0 {
            return None;
        }

        let tail = self.tail.load(Ordering::Relaxed);

        // SAFETY: Single consumer; `count > 0` (Acquire) guarantees the
        // producer finished writing this slot.
        let byte = unsafe { (*self.slots.get())[tail] };

        self.tail.store(Self::next(tail), Ordering::Relaxed);
        self.count.fetch_sub(1, Ordering::Release);
        Some(byte)
    }

    /// Append one byte from task context, applying the overflow policy.
    ///
    /// The byte copy happens before the critical section; only the
    /// index/count bookkeeping runs with interrupts masked.
    ///
    /// Returns `false` if the new byte was not stored. With
    /// [`OverflowPolicy::OverwriteOldest`] a full ring loses its oldest byte
    /// instead and this returns `true` (the loss is still counted). With
    /// [`OverflowPolicy::Block`] nothing is lost or counted; retry later.
    pub fn push_guarded(&self, byte: u8) -> bool {
        if self.count.load(Ordering::Acquire) >= N {
            match self.policy {
                OverflowPolicy::Reject => {
                    self.overruns.fetch_add(1, Ordering::Relaxed);
                    return false;
                }
                OverflowPolicy::Block => return false,
                OverflowPolicy::OverwriteOldest => {
                    critical_section::with(|_| {
                        // Re-check: the interrupt-side consumer may have
                        // drained a byte before we masked interrupts.
                        if self.count.load(Ordering::Acquire) >= N {
                            let tail = self.tail.load(Ordering::Relaxed);
                            self.tail.store(Self::next(tail), Ordering::Relaxed);
                            self.count.fetch_sub(1, Ordering::Release);
                            self.overruns.fetch_add(1, Ordering::Relaxed);
                        }
                    });
                }
            }
        }

        let head = self.head.load(Ordering::Relaxed);

        // SAFETY: Single producer; slot is unpublished until `count` moves.
        unsafe {
            (*self.slots.get())[head] = byte;
        }

        critical_section::with(|_| {
            self.head.store(Self::next(head), Ordering::Relaxed);
            self.count.fetch_add(1, Ordering::Release);
        });
        true
    }

    /// Remove the oldest byte from task context.
    ///
    /// Same contract as [`pop`](Self::pop); the tail/count update runs in
    /// a critical section.
    pub fn pop_guarded(&self) -> Option<u8> {
        if self.count.load(Ordering::Acquire) == 0 {
            return None;
        }

        let tail = self.tail.load(Ordering::Relaxed);

        // SAFETY: Single consumer, slot published (count > 0).
        let byte = unsafe { (*self.slots.get())[tail] };

        critical_section::with(|_| {
            self.tail.store(Self::next(tail), Ordering::Relaxed);
            self.count.fetch_sub(1, Ordering::Release);
        });
        Some(byte)
    }

    /// Number of bytes currently stored.
    #[inline]
    pub fn len(&self) -> usize {
        self.count.load(Ordering::Acquire)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.len() >= N
    }

    /// Free space in bytes.
    #[inline]
    pub fn available(&self) -> usize {
        N - self.len()
    }

    #[inline]
    pub const fn capacity(&self) -> usize {
        N
    }

    #[inline]
    pub fn policy(&self) -> OverflowPolicy {
        self.policy
    }

    /// Bytes lost to a full ring since creation (or the last [`clear`](Self::clear)).
    #[inline]
    pub fn overruns(&self) -> u32 {
        self.overruns.load(Ordering::Relaxed)
    }

    /// Drop all stored bytes and reset counters.
    ///
    /// Both sides must be quiescent (console teardown / re-init).
    pub fn clear(&self) {
        critical_section::with(|_| {
            self.head.store(0, Ordering::Relaxed);
            self.tail.store(0, Ordering::Relaxed);
            self.count.store(0, Ordering::Release);
            self.overruns.store(0, Ordering::Relaxed);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ring_non_power_of_two_wraps() {
        let ring = ByteRing::<3>::new(OverflowPolicy::Reject);

        for round in 0..10u8 {
            assert!(ring.push(round));
            assert!(ring.push(round + 100));
            assert_eq!(ring.pop(), Some(round));
            assert_eq!(ring.pop(), Some(round + 100));
        }
        assert!(ring.is_empty());
    }

    #[test]
    fn test_ring_isr_push_rejects_even_with_overwrite_policy() {
        let ring = ByteRing::<2>::new(OverflowPolicy::OverwriteOldest);

        assert!(ring.push(1));
        assert!(ring.push(2));
        assert!(!ring.push(3));
        assert_eq!(ring.overruns(), 1);
        assert_eq!(ring.pop(), Some(1));
    }

    #[test]
    fn test_ring_block_policy_refuses_without_loss() {
        let ring = ByteRing::<2>::new(OverflowPolicy::Block);

        assert!(ring.push_guarded(1));
        assert!(ring.push_guarded(2));
        assert!(!ring.push_guarded(3));
        assert_eq!(ring.overruns(), 0);

        assert_eq!(ring.pop(), Some(1));
        assert!(ring.push_guarded(3));
        assert_eq!(ring.pop(), Some(2));
        assert_eq!(ring.pop(), Some(3));
    }

    #[test]
    fn test_ring_clear_resets_counters() {
        let ring = ByteRing::<2>::new(OverflowPolicy::Reject);

        ring.push(1);
        ring.push(2);
        ring.push(3);
        ring.clear();

        assert!(ring.is_empty());
        assert_eq!(ring.overruns(), 0);
        assert_eq!(ring.available(), 2);
    }
}
