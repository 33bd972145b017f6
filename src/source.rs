//! Task-context blocking byte reader.

use crate::ring::ByteRing;
use crate::signal::Signal;

/// Suspends the console task until a received byte is available.
///
/// The signal is binary, so several bytes may arrive behind a single give.
/// `read` therefore drains the ring first and only waits when it is empty;
/// a byte pushed between the empty check and the wait leaves the signal
/// set, so the wait returns immediately.
pub struct BlockingByteSource<'a, S: Signal, const N: usize> {
    ring: &'a ByteRing<N>,
    signal: &'a S,
}

impl<'a, S: Signal, const N: usize> BlockingByteSource<'a, S, N> {
    pub fn new(ring: &'a ByteRing<N>, signal: &'a S) -> Self {
        Self { ring, signal }
    }

    /// Return exactly one byte, waiting indefinitely.
    pub fn read(&self) -> u8 {
        loop {
            if let Some(byte) = self.ring.pop_guarded() {
                return byte;
            }
            // Empty after a wake is "no byte yet", not an error.
            self.signal.take();
        }
    }

    /// Return a byte if one is already buffered.
    pub fn try_read(&self) -> Option<u8> {
        self.ring.pop_guarded()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ring::OverflowPolicy;
    use crate::signal::AtomicSignal;

    #[test]
    fn test_read_drains_burst_behind_one_signal() {
        let ring = ByteRing::<8>::new(OverflowPolicy::Reject);
        let signal = AtomicSignal::new();

        // Three bytes, gives coalesced into one pending signal.
        for b in b"abc" {
            ring.push(*b);
            signal.give_from_isr();
        }

        let source = BlockingByteSource::new(&ring, &signal);
        assert_eq!(source.read(), b'a');
        assert_eq!(source.read(), b'b');
        assert_eq!(source.read(), b'c');
        assert_eq!(source.try_read(), None);
    }

    #[test]
    fn test_spurious_wake_loops() {
        let ring = ByteRing::<8>::new(OverflowPolicy::Reject);
        let signal = AtomicSignal::new();
        let source = BlockingByteSource::new(&ring, &signal);

        // Stale signal with an empty ring, then a real byte from another thread.
        signal.give_from_isr();
        std::thread::scope(|s| {
            s.spawn(|| {
                std::thread::sleep(std::time::Duration::from_millis(5));
                ring.push(b'z');
                signal.give_from_isr();
            });
            assert_eq!(source.read(), b'z');
        });
    }
}
