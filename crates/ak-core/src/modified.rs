//! Modification clock used for lazy recomputation.
//!
//! Every mutable scene object stamps itself with [`Generation::next`] when it
//! changes. Because the clock is shared by the whole process, generations of
//! different objects can be compared directly: a cached result built at
//! generation `g` is stale once any of its inputs carries a generation newer
//! than `g`.

use std::sync::atomic::{AtomicU64, Ordering};

static CLOCK: AtomicU64 = AtomicU64::new(1);

/// A point on the global modification clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Generation(u64);

impl Generation {
    /// The generation older than every stamped object.
    pub const NEVER: Generation = Generation(0);

    /// Advance the clock and return the new generation.
    pub fn next() -> Self {
        Generation(CLOCK.fetch_add(1, Ordering::Relaxed))
    }

    /// Raw counter value.
    pub fn value(self) -> u64 {
        self.0
    }

    /// Returns true if `self` is strictly newer than `other`.
    pub fn is_newer_than(self, other: Generation) -> bool {
        self.0 > other.0
    }
}
