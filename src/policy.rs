//! The `policy` module decides when a [`crate::CircularDeque`]
//! relocates its slots, and to what capacity.
//!
//! After every push or pop, the deque asks its [`GrowthPolicy`] for a
//! relocation target.  With a factor `K`, a deque of `len` elements
//! and `capacity` slots:
//!
//! - shrinks to `max(K * len, min_capacity)` slots when `capacity >= K * K * len`;
//! - grows to `K * capacity` slots when `len >= capacity`;
//! - otherwise stays put.
//!
//! The shrink trigger is quadratic in `K` while the shrink target is
//! linear, so a deque that just shrank sits halfway between both
//! thresholds, and alternating push/pop at a boundary can't relocate
//! every time.

/// A [`GrowthPolicy`] is usually a zero-sized value stored in the
/// deque, like a marker type.
///
/// The deque doesn't trust its policy for memory safety: it ignores
/// targets that wouldn't leave room for one more element, and always
/// grows by [`GrowthPolicy::factor`] when full.
pub trait GrowthPolicy {
    /// The growth factor `K`, at least 2 (checked when the deque is
    /// created).
    fn factor(&self) -> usize;

    /// The smallest capacity we ever allocate, at least 1 (the
    /// slot mapping takes the index modulo the capacity).
    fn min_capacity(&self) -> usize;

    /// Returns the capacity a deque with `len` elements in `capacity`
    /// slots should relocate to, or `None` if it should stay put.
    ///
    /// Panics if growing would overflow `usize`.
    #[inline(always)]
    fn relocation_target(&self, len: usize, capacity: usize) -> Option<usize> {
        let factor = self.factor();
        debug_assert!(factor >= 2);

        let target = if factor.saturating_mul(factor).saturating_mul(len) <= capacity {
            factor
                .saturating_mul(len)
                .max(self.min_capacity())
                .max(1)
        } else if len >= capacity {
            factor.checked_mul(capacity).expect("capacity overflow")
        } else {
            return None;
        };

        // Relocating to the same capacity would only reset the start
        // offset; skip the copy.
        (target != capacity).then_some(target)
    }
}

/// Doubles on growth, starts at (and never shrinks below) 8 slots.
///
/// This is the default policy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Doubling;

impl GrowthPolicy for Doubling {
    #[inline(always)]
    fn factor(&self) -> usize {
        2
    }

    #[inline(always)]
    fn min_capacity(&self) -> usize {
        8
    }
}

/// Triples on growth, and shrinks all the way down to a single slot.
///
/// Fewer relocations on growth, at the expense of up to 9x slack
/// (vs 4x for [`Doubling`]) before we shrink.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Tripling;

impl GrowthPolicy for Tripling {
    #[inline(always)]
    fn factor(&self) -> usize {
        3
    }

    #[inline(always)]
    fn min_capacity(&self) -> usize {
        1
    }
}

#[test]
fn test_doubling_targets_miri() {
    let policy = Doubling;

    // Empty at the floor: nothing to do.
    assert_eq!(policy.relocation_target(0, 8), None);
    // Full: grow.
    assert_eq!(policy.relocation_target(8, 8), Some(16));
    assert_eq!(policy.relocation_target(7, 8), None);
    // Exactly at the shrink threshold.
    assert_eq!(policy.relocation_target(8, 32), Some(16));
    assert_eq!(policy.relocation_target(9, 32), None);
    assert_eq!(policy.relocation_target(5, 16), None);
    assert_eq!(policy.relocation_target(4, 16), Some(8));
    // Shrinking never goes below the floor.
    assert_eq!(policy.relocation_target(2, 8), None);
    assert_eq!(policy.relocation_target(3, 16), Some(8));
    assert_eq!(policy.relocation_target(0, 1024), Some(8));
}

#[test]
fn test_tripling_targets_miri() {
    let policy = Tripling;

    assert_eq!(policy.relocation_target(0, 1), None);
    assert_eq!(policy.relocation_target(1, 1), Some(3));
    assert_eq!(policy.relocation_target(3, 3), Some(9));
    assert_eq!(policy.relocation_target(1, 9), Some(3));
    assert_eq!(policy.relocation_target(2, 9), None);
    assert_eq!(policy.relocation_target(0, 3), Some(1));
}

#[test]
#[should_panic(expected = "capacity overflow")]
fn test_grow_overflow() {
    let capacity = usize::MAX / 2 + 1;
    let _ = Doubling.relocation_target(capacity, capacity);
}
