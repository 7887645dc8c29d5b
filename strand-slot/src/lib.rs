//! Single-value, first-write-wins result slot.
//!
//! This is built for the "several workers race toward one answer" pattern:
//! - Any worker may publish a result; the first publish wins
//! - Later publishes are dropped without disturbing the settled value
//! - Workers poll [`RaceSlot::is_settled`] to stop once somebody has won
//! - The coordinator reads the answer after all workers have joined
//!
//! The slot goes through three states: empty, claimed (a winner is mid-write),
//! and settled. Claiming is a single compare-and-swap, so exactly one publish
//! can ever reach the write.
//!
//! # Example
//!
//! ```rust
//! use std::thread;
//! use strand_slot::RaceSlot;
//!
//! let slot: RaceSlot<u32> = RaceSlot::new();
//!
//! thread::scope(|scope| {
//!     for id in 0..2u32 {
//!         let slot = &slot;
//!         scope.spawn(move || {
//!             // Both workers try; exactly one claim succeeds.
//!             slot.publish(id);
//!         });
//!     }
//! });
//!
//! let winner = slot.get().unwrap();
//! assert!(winner == 0 || winner == 1);
//! ```

use std::cell::UnsafeCell;
use std::fmt;
use std::mem::MaybeUninit;
use std::sync::atomic::{AtomicU8, Ordering};

use crossbeam_utils::CachePadded;

/// No publish has started.
const EMPTY: u8 = 0;
/// A winner holds the claim and is writing the value.
const CLAIMED: u8 = 1;
/// The value is written and readable.
const SETTLED: u8 = 2;

/// A write-once slot shared by racing workers.
///
/// `T` must be `Copy`: the slot hands out copies of the settled value and
/// never runs drop glue, so it can be read any number of times.
pub struct RaceSlot<T> {
    state: CachePadded<AtomicU8>,
    value: UnsafeCell<MaybeUninit<T>>,
}

// Safety: the value cell is written exactly once, by the worker that won the
// EMPTY -> CLAIMED claim, and only read after the SETTLED store is observed
// with Acquire ordering. T: Send covers handing copies across threads.
unsafe impl<T: Send> Send for RaceSlot<T> {}
unsafe impl<T: Send> Sync for RaceSlot<T> {}

impl<T: Copy> RaceSlot<T> {
    /// Creates an empty slot.
    pub const fn new() -> Self {
        Self {
            state: CachePadded::new(AtomicU8::new(EMPTY)),
            value: UnsafeCell::new(MaybeUninit::uninit()),
        }
    }

    /// Publishes a result. Returns `true` if this call won the race.
    ///
    /// A losing publish is dropped: the settled value is never overwritten.
    #[inline]
    pub fn publish(&self, value: T) -> bool {
        if self
            .state
            .compare_exchange(EMPTY, CLAIMED, Ordering::Relaxed, Ordering::Relaxed)
            .is_err()
        {
            return false;
        }

        // Safety: the CAS above makes this thread the only writer, ever.
        unsafe { (*self.value.get()).write(value) };

        self.state.store(SETTLED, Ordering::Release);
        true
    }

    /// Returns `true` once any publish has begun.
    ///
    /// This is the cooperative early-exit probe: a worker that observes a
    /// settled (or claimed) slot knows the race is over and can stop scanning.
    /// A single relaxed load, cheap enough for a per-step check.
    #[inline]
    pub fn is_settled(&self) -> bool {
        self.state.load(Ordering::Relaxed) != EMPTY
    }

    /// Returns the settled value, or `None` if no publish has completed.
    ///
    /// Returns `None` while a winning publish is still mid-write; call sites
    /// that have joined their workers never observe that window.
    #[inline]
    pub fn get(&self) -> Option<T> {
        if self.state.load(Ordering::Acquire) != SETTLED {
            return None;
        }

        // Safety: SETTLED is stored with Release only after the value write.
        Some(unsafe { (*self.value.get()).assume_init_read() })
    }
}

impl<T: Copy> Default for RaceSlot<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Copy + fmt::Debug> fmt::Debug for RaceSlot<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RaceSlot").field("value", &self.get()).finish()
    }
}
