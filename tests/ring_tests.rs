//! ByteRing tests: FIFO order, capacity bound, overflow policies

use serial_cli_console::{ByteRing, OverflowPolicy};

#[test]
fn test_fifo_order_across_wrap() {
    let ring = ByteRing::<5>::new(OverflowPolicy::Reject);
    let mut expected = Vec::new();
    let mut got = Vec::new();

    for i in 0..40u8 {
        assert!(ring.push(i));
        expected.push(i);
        if i % 3 == 0 {
            while let Some(b) = ring.pop() {
                got.push(b);
            }
        }
    }
    while let Some(b) = ring.pop() {
        got.push(b);
    }

    assert_eq!(got, expected);
}

#[test]
fn test_count_never_exceeds_capacity() {
    let ring = ByteRing::<4>::new(OverflowPolicy::OverwriteOldest);

    for i in 0..100u8 {
        ring.push_guarded(i);
        assert!(ring.len() <= ring.capacity());
        assert_eq!(ring.len() + ring.available(), ring.capacity());
    }
    assert!(ring.is_full());
}

#[test]
fn test_reject_leaves_contents_untouched() {
    let ring = ByteRing::<3>::new(OverflowPolicy::Reject);

    for b in b"abc" {
        assert!(ring.push_guarded(*b));
    }
    assert!(!ring.push_guarded(b'd'));
    assert!(!ring.push(b'e'));
    assert_eq!(ring.overruns(), 2);

    assert_eq!(ring.pop_guarded(), Some(b'a'));
    assert_eq!(ring.pop_guarded(), Some(b'b'));
    assert_eq!(ring.pop_guarded(), Some(b'c'));
    assert_eq!(ring.pop_guarded(), None);
}

#[test]
fn test_overwrite_oldest_keeps_newest() {
    let ring = ByteRing::<3>::new(OverflowPolicy::OverwriteOldest);

    for b in b"abcde" {
        assert!(ring.push_guarded(*b));
    }

    assert_eq!(ring.overruns(), 2);
    assert_eq!(ring.pop(), Some(b'c'));
    assert_eq!(ring.pop(), Some(b'd'));
    assert_eq!(ring.pop(), Some(b'e'));
}

#[test]
fn test_pop_empty_is_not_an_error() {
    let ring = ByteRing::<1>::new(OverflowPolicy::Reject);

    assert_eq!(ring.pop(), None);
    assert_eq!(ring.pop_guarded(), None);
    assert_eq!(ring.overruns(), 0);

    assert!(ring.push(7));
    assert!(ring.is_full());
    assert_eq!(ring.pop(), Some(7));
}

#[test]
fn test_spsc_threads_preserve_order() {
    use std::thread;

    const TOTAL: usize = 20_000;
    let ring = ByteRing::<16>::new(OverflowPolicy::Reject);

    thread::scope(|s| {
        s.spawn(|| {
            for i in 0..TOTAL {
                while !ring.push((i % 251) as u8) {
                    thread::yield_now();
                }
            }
        });

        let mut received = 0;
        while received < TOTAL {
            match ring.pop_guarded() {
                Some(b) => {
                    assert_eq!(b, (received % 251) as u8);
                    received += 1;
                }
                None => thread::yield_now(),
            }
        }
    });

    assert!(ring.is_empty());
}
