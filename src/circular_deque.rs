//! The `circular_deque` module defines the [`CircularDeque`]
//! container: a double-ended queue in a single circular buffer of
//! slots, with random access by logical index.
//!
//! Logical index `i` lives in physical slot `(start + i) % capacity`.
//! Pushes and pops only move `start` and `len`, until the
//! [`GrowthPolicy`] asks for a relocation; relocating copies the
//! logical range to the beginning of a fresh buffer (in one or two
//! blocks, depending on whether the range wraps around the end).
#![deny(unsafe_op_in_unsafe_fn)]

use std::mem::MaybeUninit;
use std::ops::Index;
use std::ops::IndexMut;
use std::ops::Range;
use std::ptr;

use smallvec::SmallVec;

use crate::policy::Doubling;
use crate::policy::GrowthPolicy;
use crate::storage::SlotStorage;
use crate::TryReserveError;

/// A [`CircularDeque`] stores its elements in a fixed-size
/// [`SlotStorage`] buffer, and relocates to a larger (or smaller)
/// buffer when its [`GrowthPolicy`] says so.
///
/// Pushing and popping at either end is amortised constant-time, and
/// indexing is constant-time.  The capacity stays within a constant
/// factor (`K * K` for the policy's factor `K`) of the number of live
/// elements, except right after [`CircularDeque::reserve`].
pub struct CircularDeque<Storage, Policy = Doubling>
where
    Storage: SlotStorage,
    Policy: GrowthPolicy,
{
    slots: Storage,
    /// Physical slot of the first logical element; always less than
    /// the capacity.
    start: usize,
    len: usize,
    policy: Policy,
}

/// A [`CircularDeque`] where the slots live in a boxed slice.
pub type CircularVec<T> = CircularDeque<Box<[MaybeUninit<T>]>>;

/// A [`CircularDeque`] where the slots live in a [`SmallVec`], i.e.,
/// inline for up to `N` slots.  The default [`Doubling`] policy never
/// goes below 8 slots, so `N` should be at least 8.
pub type CircularSmallVec<T, const N: usize> = CircularDeque<SmallVec<[MaybeUninit<T>; N]>>;

impl<Storage, Policy> CircularDeque<Storage, Policy>
where
    Storage: SlotStorage,
    Policy: GrowthPolicy + Default,
{
    /// Creates a new empty [`CircularDeque`], with the policy's
    /// minimum capacity.
    #[inline(always)]
    pub fn new() -> Self {
        Self::with_policy(Default::default())
    }
}

impl<Storage, Policy> CircularDeque<Storage, Policy>
where
    Storage: SlotStorage,
    Policy: GrowthPolicy,
{
    /// Creates a new empty [`CircularDeque`] that grows and shrinks
    /// according to `policy`.
    ///
    /// Panics if the policy's growth factor is less than 2.
    pub fn with_policy(policy: Policy) -> Self {
        assert!(policy.factor() >= 2, "growth factor must be at least 2");
        let capacity = policy.min_capacity().max(1);
        Self {
            slots: Storage::allocate(capacity),
            start: 0,
            len: 0,
            policy,
        }
    }

    /// Returns the number of elements in the [`CircularDeque`].
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Determines whether the [`CircularDeque`] is empty.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of slots currently allocated.
    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.slots.slots().len()
    }

    /// Returns the [`GrowthPolicy`] value.
    #[inline(always)]
    pub fn policy(&self) -> &Policy {
        &self.policy
    }

    /// Maps a logical index to its physical slot.
    #[inline(always)]
    fn physical(&self, index: usize) -> usize {
        (self.start + index) % self.capacity()
    }

    /// Returns the physical ranges for the logical elements, in
    /// logical order.  The second range is empty unless the elements
    /// wrap around the end of the buffer, in which case it always
    /// starts at 0.
    #[inline(always)]
    fn slot_ranges(&self) -> (Range<usize>, Range<usize>) {
        let capacity = self.capacity();
        if self.len <= capacity - self.start {
            (self.start..self.start + self.len, 0..0)
        } else {
            (self.start..capacity, 0..(self.start + self.len - capacity))
        }
    }

    /// Returns a reference to the element at logical `index`, if any.
    #[inline(always)]
    pub fn get(&self, index: usize) -> Option<&Storage::Item> {
        if index < self.len {
            Some(unsafe { self.get_unchecked(index) })
        } else {
            None
        }
    }

    /// Returns a mutable reference to the element at logical `index`,
    /// if any.
    #[inline(always)]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Storage::Item> {
        if index < self.len {
            Some(unsafe { self.get_unchecked_mut(index) })
        } else {
            None
        }
    }

    /// Returns a reference to the element at logical `index`, without
    /// bounds checking.
    ///
    /// # Safety
    ///
    /// `index` must be less than [`CircularDeque::len`]: other slots
    /// are uninitialised, or hold values that were already moved out.
    #[inline(always)]
    pub unsafe fn get_unchecked(&self, index: usize) -> &Storage::Item {
        debug_assert!(index < self.len);
        let slot = self.physical(index);
        // Logical indices below `len` map to initialised slots.
        unsafe { self.slots.slots().get_unchecked(slot).assume_init_ref() }
    }

    /// Returns a mutable reference to the element at logical `index`,
    /// without bounds checking.
    ///
    /// # Safety
    ///
    /// `index` must be less than [`CircularDeque::len`].
    #[inline(always)]
    pub unsafe fn get_unchecked_mut(&mut self, index: usize) -> &mut Storage::Item {
        debug_assert!(index < self.len);
        let slot = self.physical(index);
        unsafe {
            self.slots
                .slots_mut()
                .get_unchecked_mut(slot)
                .assume_init_mut()
        }
    }

    /// Returns a reference to the first element, if any.
    #[inline(always)]
    pub fn front(&self) -> Option<&Storage::Item> {
        self.get(0)
    }

    /// Returns a mutable reference to the first element, if any.
    #[inline(always)]
    pub fn front_mut(&mut self) -> Option<&mut Storage::Item> {
        self.get_mut(0)
    }

    /// Returns a reference to the last element, if any.
    #[inline(always)]
    pub fn back(&self) -> Option<&Storage::Item> {
        self.get(self.len.wrapping_sub(1))
    }

    /// Returns a mutable reference to the last element, if any.
    #[inline(always)]
    pub fn back_mut(&mut self) -> Option<&mut Storage::Item> {
        self.get_mut(self.len.wrapping_sub(1))
    }

    /// Pushes `item` to the back of the [`CircularDeque`].
    #[inline(always)]
    pub fn push_back(&mut self, item: Storage::Item) {
        debug_assert!(self.len < self.capacity());
        let slot = self.physical(self.len);
        self.slots.slots_mut()[slot].write(item);
        self.len += 1;
        self.normalize();
    }

    /// Pushes `item` to the front of the [`CircularDeque`].
    #[inline(always)]
    pub fn push_front(&mut self, item: Storage::Item) {
        debug_assert!(self.len < self.capacity());
        self.start = match self.start {
            0 => self.capacity() - 1,
            start => start - 1,
        };

        let slot = self.start;
        self.slots.slots_mut()[slot].write(item);
        self.len += 1;
        self.normalize();
    }

    /// Consumes and returns the last element, if any.
    #[inline(always)]
    pub fn pop_back(&mut self) -> Option<Storage::Item> {
        if self.is_empty() {
            return None;
        }

        self.len -= 1;
        let slot = self.physical(self.len);
        // The slot was live until we decremented `len`.
        let ret = unsafe { self.slots.slots()[slot].assume_init_read() };
        self.normalize();
        Some(ret)
    }

    /// Consumes and returns the first element, if any.
    #[inline(always)]
    pub fn pop_front(&mut self) -> Option<Storage::Item> {
        if self.is_empty() {
            return None;
        }

        let slot = self.start;
        let ret = unsafe { self.slots.slots()[slot].assume_init_read() };
        self.start = (self.start + 1) % self.capacity();
        self.len -= 1;
        self.normalize();
        Some(ret)
    }

    /// Swaps the elements at logical indices `i` and `j`.
    ///
    /// Panics if either index is out of bounds.
    #[inline(always)]
    pub fn swap(&mut self, i: usize, j: usize) {
        assert!(i < self.len, "swap index {} out of bounds ({})", i, self.len);
        assert!(j < self.len, "swap index {} out of bounds ({})", j, self.len);

        let (i, j) = (self.physical(i), self.physical(j));
        self.slots.slots_mut().swap(i, j);
    }

    /// Returns the logical contents as a pair of slices, in order.
    ///
    /// The second slice is empty unless the elements wrap around the
    /// end of the buffer.
    pub fn as_slices(&self) -> (&[Storage::Item], &[Storage::Item]) {
        let (head, tail) = self.slot_ranges();
        let slots = self.slots.slots();

        // Both ranges only cover live slots, and `MaybeUninit<T>` has
        // the same layout as `T`.
        unsafe {
            (
                &*(&slots[head] as *const [MaybeUninit<Storage::Item>] as *const [Storage::Item]),
                &*(&slots[tail] as *const [MaybeUninit<Storage::Item>] as *const [Storage::Item]),
            )
        }
    }

    /// Returns the logical contents as a pair of mutable slices, in order.
    ///
    /// The second slice is empty unless the elements wrap around the
    /// end of the buffer.
    pub fn as_mut_slices(&mut self) -> (&mut [Storage::Item], &mut [Storage::Item]) {
        let (head, tail) = self.slot_ranges();
        // The tail range always starts at 0 and ends at or before the
        // head's start.
        debug_assert!(tail.end <= head.start);
        let (lo, hi) = self.slots.slots_mut().split_at_mut(head.start);
        let head = &mut hi[..head.len()];
        let tail = &mut lo[tail];

        unsafe {
            (
                &mut *(head as *mut [MaybeUninit<Storage::Item>] as *mut [Storage::Item]),
                &mut *(tail as *mut [MaybeUninit<Storage::Item>] as *mut [Storage::Item]),
            )
        }
    }

    /// Drops all the elements, and releases the buffer for a fresh
    /// one with the policy's minimum capacity.
    pub fn clear(&mut self) {
        log::trace!(
            "clearing circular deque: {} elements in {} slots",
            self.len,
            self.capacity()
        );

        self.drop_elements();
        self.slots = Storage::allocate(self.policy.min_capacity().max(1));
        self.start = 0;
    }

    /// Ensures the [`CircularDeque`] has at least `capacity` slots,
    /// relocating to exactly `capacity` slots if it doesn't.
    ///
    /// The next push or pop may still shrink the buffer back, if the
    /// policy finds it too large for the number of live elements.
    pub fn reserve(&mut self, capacity: usize) {
        if capacity <= self.capacity() {
            return;
        }

        log::trace!(
            "reserving {} slots in circular deque (was {})",
            capacity,
            self.capacity()
        );
        self.relocate(capacity);
    }

    /// Like [`CircularDeque::reserve`], but reports allocation
    /// failures instead of aborting.
    pub fn try_reserve(&mut self, capacity: usize) -> Result<(), TryReserveError> {
        if capacity <= self.capacity() {
            return Ok(());
        }

        let fresh = Storage::try_allocate(capacity)?;
        self.move_into(fresh);
        Ok(())
    }

    /// Relocates to a different capacity if the policy says we should,
    /// or if the buffer is full.
    ///
    /// Policy targets that wouldn't leave room for the next push are
    /// ignored.  A full buffer always grows, by the policy's factor.
    #[inline(always)]
    fn normalize(&mut self) {
        let capacity = self.capacity();
        let target = match self.policy.relocation_target(self.len, capacity) {
            Some(target) if target > self.len => target,
            _ if self.len >= capacity => capacity
                .checked_mul(self.policy.factor().max(2))
                .expect("capacity overflow"),
            _ => capacity,
        };

        if target != capacity {
            self.relocate(target);
        }

        self.check_rep();
    }

    #[inline(never)]
    fn relocate(&mut self, capacity: usize) {
        self.move_into(Storage::allocate(capacity));
    }

    /// Moves the logical elements, in order, to the beginning of `fresh`,
    /// and swaps `fresh` in as the new buffer.
    fn move_into(&mut self, mut fresh: Storage) {
        let capacity = fresh.slots().len();
        // There must be room for the next push.
        assert!(capacity > self.len);

        log::trace!(
            "relocating circular deque: {} -> {} slots ({} elements)",
            self.capacity(),
            capacity,
            self.len
        );

        let (head, tail) = self.slot_ranges();
        let src = self.slots.slots().as_ptr();
        let dst = fresh.slots_mut().as_mut_ptr();

        // `fresh` is a different allocation with room for `len`
        // elements; the old slots become logically uninitialised once
        // we swap in `fresh`, so this is a move.
        unsafe {
            dst.copy_from_nonoverlapping(src.add(head.start), head.len());
            dst.add(head.len())
                .copy_from_nonoverlapping(src.add(tail.start), tail.len());
        }

        // Dropping `MaybeUninit` slots doesn't drop their contents.
        let _old = std::mem::replace(&mut self.slots, fresh);
        self.start = 0;
    }

    /// Drops all the live elements, and leaves the deque empty (in
    /// the same buffer).
    fn drop_elements(&mut self) {
        let (head, tail) = self.as_mut_slices();
        let head: *mut [Storage::Item] = head;
        let tail: *mut [Storage::Item] = tail;

        // Forget the elements first: if a destructor panics, we leak
        // instead of dropping twice.
        self.len = 0;
        unsafe {
            ptr::drop_in_place(head);
            ptr::drop_in_place(tail);
        }
    }

    #[cfg_attr(test, mutants::skip)] // obviously, removing checks will not be detected.
    #[inline(always)]
    fn check_rep(&self) {
        debug_assert!(self.capacity() >= 1);
        debug_assert!(self.start < self.capacity());
        // There's always room for one more push.
        debug_assert!(self.len < self.capacity());
    }
}

impl<Storage, Policy> Drop for CircularDeque<Storage, Policy>
where
    Storage: SlotStorage,
    Policy: GrowthPolicy,
{
    fn drop(&mut self) {
        self.drop_elements();
    }
}

impl<Storage, Policy> Default for CircularDeque<Storage, Policy>
where
    Storage: SlotStorage,
    Policy: GrowthPolicy + Default,
{
    #[inline(always)]
    fn default() -> Self {
        Self::new()
    }
}

/// Cloning preserves the physical layout: the copy has the same
/// capacity, and each element sits in the same slot as in the source.
impl<Storage, Policy> Clone for CircularDeque<Storage, Policy>
where
    Storage: SlotStorage,
    Storage::Item: Clone,
    Policy: GrowthPolicy + Clone,
{
    fn clone(&self) -> Self {
        let mut copy = Self {
            slots: Storage::allocate(self.capacity()),
            start: self.start,
            len: 0,
            policy: self.policy.clone(),
        };

        // Bump `len` one element at a time, so that a panic in `clone`
        // only drops what we've already written.
        for item in self.iter() {
            let slot = copy.physical(copy.len);
            copy.slots.slots_mut()[slot].write(item.clone());
            copy.len += 1;
        }

        copy
    }
}

impl<Storage, Policy> std::fmt::Debug for CircularDeque<Storage, Policy>
where
    Storage: SlotStorage,
    Storage::Item: std::fmt::Debug,
    Policy: GrowthPolicy,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// Equality only looks at the logical contents, not at the layout.
impl<S1, P1, S2, P2> PartialEq<CircularDeque<S2, P2>> for CircularDeque<S1, P1>
where
    S1: SlotStorage,
    S2: SlotStorage,
    S1::Item: PartialEq<S2::Item>,
    P1: GrowthPolicy,
    P2: GrowthPolicy,
{
    fn eq(&self, other: &CircularDeque<S2, P2>) -> bool {
        self.len() == other.len() && self.iter().zip(other.iter()).all(|(x, y)| x == y)
    }
}

impl<Storage, Policy> Eq for CircularDeque<Storage, Policy>
where
    Storage: SlotStorage,
    Storage::Item: Eq,
    Policy: GrowthPolicy,
{
}

impl<Storage, Policy> Index<usize> for CircularDeque<Storage, Policy>
where
    Storage: SlotStorage,
    Policy: GrowthPolicy,
{
    type Output = Storage::Item;

    #[inline(always)]
    fn index(&self, index: usize) -> &Storage::Item {
        let len = self.len;
        self.get(index).unwrap_or_else(|| {
            panic!(
                "index out of bounds: the len is {} but the index is {}",
                len, index
            )
        })
    }
}

impl<Storage, Policy> IndexMut<usize> for CircularDeque<Storage, Policy>
where
    Storage: SlotStorage,
    Policy: GrowthPolicy,
{
    #[inline(always)]
    fn index_mut(&mut self, index: usize) -> &mut Storage::Item {
        let len = self.len;
        self.get_mut(index).unwrap_or_else(|| {
            panic!(
                "index out of bounds: the len is {} but the index is {}",
                len, index
            )
        })
    }
}

#[cfg(test)]
use crate::policy::Tripling;

#[cfg(test)]
fn collect<S: SlotStorage, P: GrowthPolicy>(deque: &CircularDeque<S, P>) -> Vec<S::Item>
where
    S::Item: Clone,
{
    (0..deque.len()).map(|i| deque[i].clone()).collect()
}

/// Checks that `deque` matches `oracle`, through every accessor.
#[cfg(test)]
fn assert_matches<S, P>(deque: &CircularDeque<S, P>, oracle: &std::collections::VecDeque<i64>)
where
    S: SlotStorage<Item = i64>,
    P: GrowthPolicy,
{
    assert_eq!(deque.len(), oracle.len());
    assert_eq!(deque.is_empty(), oracle.is_empty());
    assert_eq!(deque.front(), oracle.front());
    assert_eq!(deque.back(), oracle.back());
    for (i, expected) in oracle.iter().enumerate() {
        assert_eq!(&deque[i], expected);
    }
    itertools::assert_equal(deque.iter(), oracle.iter());
    itertools::assert_equal(deque.iter().rev(), oracle.iter().rev());

    let (head, tail) = deque.as_slices();
    itertools::assert_equal(head.iter().chain(tail.iter()), oracle.iter());
}

#[test]
fn test_empty_miri() {
    let mut deque: CircularVec<u32> = CircularVec::new();

    assert_eq!(deque.len(), 0);
    assert!(deque.is_empty());
    assert_eq!(deque.capacity(), 8);
    assert_eq!(deque.front(), None);
    assert_eq!(deque.back(), None);
    assert_eq!(deque.get(0), None);
    assert_eq!(deque.pop_back(), None);
    assert_eq!(deque.pop_front(), None);
    assert_eq!(deque.as_slices(), (&[][..], &[][..]));

    // Still usable after popping nothing.
    deque.push_back(1);
    assert_eq!(deque.pop_back(), Some(1));
    assert!(deque.is_empty());
}

#[test]
fn test_manual_scenario_miri() {
    let mut deque: CircularVec<i32> = Default::default();

    deque.push_back(1);
    deque.pop_back();
    assert!(deque.is_empty());

    deque.push_back(1);
    deque.push_back(2);
    deque.push_back(3);
    deque.push_back(4);
    assert_eq!(deque.front(), Some(&1));
    assert_eq!(deque.back(), Some(&4));
    assert_eq!(deque.len(), 4);

    assert_eq!(deque.pop_front(), Some(1));
    assert_eq!(deque.front(), Some(&2));

    for value in (-8..=1).rev() {
        deque.push_front(value);
    }

    assert_eq!(deque.front(), Some(&-8));
    assert_eq!(deque.back(), Some(&4));
    assert_eq!(deque[3], -5);
    assert_eq!(deque.len(), 13);
    assert_eq!(collect(&deque), (-8..=4).collect::<Vec<_>>());
}

#[test]
fn test_manual_scenario_tripling_miri() {
    let mut deque: CircularDeque<Box<[MaybeUninit<i32>]>, Tripling> = CircularDeque::new();
    assert_eq!(deque.capacity(), 1);

    for value in 1..=4 {
        deque.push_back(value);
    }
    assert_eq!(deque.pop_front(), Some(1));
    for value in (-8..=1).rev() {
        deque.push_front(value);
    }

    assert_eq!(deque.front(), Some(&-8));
    assert_eq!(deque.back(), Some(&4));
    assert_eq!(deque[3], -5);
    assert_eq!(collect(&deque), (-8..=4).collect::<Vec<_>>());
}

#[test]
fn test_wrap_around_miri() {
    let mut deque: CircularVec<u32> = CircularVec::new();

    // Push to the front until `start` wraps past 0, without growing.
    for i in 0..3 {
        deque.push_front(i);
    }
    assert_eq!(deque.capacity(), 8);
    assert_eq!(deque.start, 5);

    for i in 10..14 {
        deque.push_back(i);
    }
    assert_eq!(deque.capacity(), 8);
    assert_eq!(deque.as_slices(), (&[2, 1, 0][..], &[10, 11, 12, 13][..]));
    assert_eq!(collect(&deque), [2, 1, 0, 10, 11, 12, 13]);

    // This one fills the buffer and relocates to a contiguous range.
    deque.push_back(14);
    assert_eq!(deque.capacity(), 16);
    assert_eq!(deque.start, 0);
    assert_eq!(
        deque.as_slices(),
        (&[2, 1, 0, 10, 11, 12, 13, 14][..], &[][..])
    );
}

#[test]
fn test_pop_front_wraps_start_miri() {
    let mut deque: CircularVec<u32> = CircularVec::new();

    deque.push_front(0);
    assert_eq!(deque.start, 7);
    for i in 1..5 {
        deque.push_back(i);
    }

    assert_eq!(deque.pop_front(), Some(0));
    assert_eq!(deque.start, 0);
    assert_eq!(collect(&deque), [1, 2, 3, 4]);
}

#[cfg(test)]
#[derive(Clone, Copy, Debug, Default)]
struct NeverRelocate;

#[cfg(test)]
impl GrowthPolicy for NeverRelocate {
    fn factor(&self) -> usize {
        2
    }

    fn min_capacity(&self) -> usize {
        2
    }

    fn relocation_target(&self, _len: usize, _capacity: usize) -> Option<usize> {
        None
    }
}

#[cfg(test)]
#[derive(Clone, Copy, Debug, Default)]
struct ShrinkToLen;

#[cfg(test)]
impl GrowthPolicy for ShrinkToLen {
    fn factor(&self) -> usize {
        3
    }

    fn min_capacity(&self) -> usize {
        1
    }

    fn relocation_target(&self, len: usize, _capacity: usize) -> Option<usize> {
        Some(len)
    }
}

#[cfg(test)]
#[derive(Clone, Copy, Debug, Default)]
struct NoGrowth;

#[cfg(test)]
impl GrowthPolicy for NoGrowth {
    fn factor(&self) -> usize {
        1
    }

    fn min_capacity(&self) -> usize {
        4
    }
}

#[test]
fn test_full_buffer_grows_without_policy_miri() {
    let mut deque: CircularDeque<Box<[MaybeUninit<String>]>, NeverRelocate> =
        CircularDeque::new();
    assert_eq!(deque.capacity(), 2);

    for item in ["a", "b", "c"] {
        deque.push_back(item.to_owned());
        assert!(deque.capacity() > deque.len());
    }
    assert_eq!(deque.capacity(), 4);
    itertools::assert_equal(deque.iter().map(String::as_str), ["a", "b", "c"]);

    for item in ["z", "y"] {
        deque.push_front(item.to_owned());
        assert!(deque.capacity() > deque.len());
    }
    assert_eq!(deque.capacity(), 8);
    itertools::assert_equal(deque.iter().map(String::as_str), ["y", "z", "a", "b", "c"]);

    assert_eq!(deque.pop_front().as_deref(), Some("y"));
    assert_eq!(deque.pop_back().as_deref(), Some("c"));
    // Never shrinks, but the remaining elements are dropped exactly once.
    assert_eq!(deque.capacity(), 8);
    itertools::assert_equal(deque.iter().map(String::as_str), ["z", "a", "b"]);
}

#[test]
fn test_policy_target_without_room_ignored_miri() {
    let mut deque: CircularDeque<Box<[MaybeUninit<String>]>, ShrinkToLen> =
        CircularDeque::new();
    assert_eq!(deque.capacity(), 1);

    deque.push_back("x".to_owned());
    assert_eq!(deque.capacity(), 3);
    deque.push_back("y".to_owned());
    assert_eq!(deque.capacity(), 3);
    deque.push_front("w".to_owned());
    assert_eq!(deque.capacity(), 9);

    assert_eq!(deque.pop_back().as_deref(), Some("y"));
    assert_eq!(deque.capacity(), 9);
    itertools::assert_equal(deque.iter().map(String::as_str), ["w", "x"]);

    deque.clear();
    assert_eq!(deque.capacity(), 1);
    deque.push_front("v".to_owned());
    assert_eq!(deque.capacity(), 3);
    assert_eq!(deque.front().map(String::as_str), Some("v"));
}

#[test]
#[should_panic(expected = "growth factor must be at least 2")]
fn test_growth_factor_too_small() {
    let _deque: CircularDeque<Box<[MaybeUninit<u32>]>, NoGrowth> = CircularDeque::new();
}

#[test]
fn test_grow_and_shrink() {
    let mut deque: CircularVec<usize> = CircularVec::new();

    for i in 0..100 {
        deque.push_back(i);
        assert!(deque.capacity() > deque.len());
        assert!(deque.capacity() <= 4 * deque.len().max(2));
    }
    assert_eq!(deque.capacity(), 128);

    for i in 0..100 {
        assert_eq!(deque.pop_front(), Some(i));
        assert!(deque.capacity() >= 8);
        assert!(deque.capacity() <= (4 * deque.len()).max(8));
    }

    assert!(deque.is_empty());
    assert_eq!(deque.capacity(), 8);
}

#[test]
fn test_index_mut_miri() {
    let mut deque: CircularVec<u32> = (0..5).collect();

    deque[2] = 42;
    *deque.front_mut().unwrap() = 10;
    *deque.back_mut().unwrap() = 20;
    *deque.get_mut(1).unwrap() += 1;
    assert_eq!(deque.get_mut(5), None);

    assert_eq!(collect(&deque), [10, 2, 42, 3, 20]);
}

#[test]
#[should_panic(expected = "index out of bounds")]
fn test_index_out_of_bounds() {
    let deque: CircularVec<u32> = (0..5).collect();
    let _ = deque[5];
}

#[test]
fn test_get_unchecked_miri() {
    let mut deque: CircularVec<u32> = CircularVec::new();
    deque.push_front(1);
    deque.push_back(2);

    assert_eq!(unsafe { *deque.get_unchecked(0) }, 1);
    unsafe { *deque.get_unchecked_mut(1) = 3 };
    assert_eq!(deque[1], 3);
}

#[test]
fn test_swap_miri() {
    let mut deque: CircularVec<u32> = CircularVec::new();
    deque.push_front(0);
    deque.push_back(1);
    deque.push_back(2);

    deque.swap(0, 2);
    assert_eq!(collect(&deque), [2, 1, 0]);
    deque.swap(1, 1);
    assert_eq!(collect(&deque), [2, 1, 0]);
}

#[test]
#[should_panic(expected = "out of bounds")]
fn test_swap_out_of_bounds() {
    let mut deque: CircularVec<u32> = (0..3).collect();
    deque.swap(0, 3);
}

#[test]
fn test_as_mut_slices_miri() {
    let mut deque: CircularVec<u32> = CircularVec::new();
    deque.push_front(1);
    deque.push_front(0);
    deque.push_back(2);

    {
        let (head, tail) = deque.as_mut_slices();
        assert_eq!(head, &[0, 1]);
        assert_eq!(tail, &[2]);
        head[0] = 10;
        tail[0] = 12;
    }

    assert_eq!(collect(&deque), [10, 1, 12]);
}

#[test]
fn test_clear_miri() {
    let mut deque: CircularVec<String> = CircularVec::new();
    for i in 0..20 {
        deque.push_front(i.to_string());
    }
    assert_eq!(deque.capacity(), 32);

    deque.clear();
    assert!(deque.is_empty());
    assert_eq!(deque.capacity(), 8);
    assert_eq!(deque.start, 0);

    deque.push_back("a".to_owned());
    assert_eq!(deque.front().map(String::as_str), Some("a"));
}

#[test]
fn test_reserve_miri() {
    let mut deque: CircularVec<u32> = CircularVec::new();
    deque.push_front(1);
    deque.push_front(0);
    deque.push_back(2);

    // No-op when we already have enough slots.
    deque.reserve(4);
    assert_eq!(deque.capacity(), 8);
    assert_eq!(deque.start, 6);

    deque.reserve(100);
    assert_eq!(deque.capacity(), 100);
    assert_eq!(deque.start, 0);
    assert_eq!(collect(&deque), [0, 1, 2]);

    // The next push finds the buffer way too large for 4 elements.
    deque.push_back(3);
    assert_eq!(deque.capacity(), 8);
    assert_eq!(collect(&deque), [0, 1, 2, 3]);
}

#[test]
fn test_try_reserve_miri() {
    let mut deque: CircularVec<u64> = (0..3).collect();

    assert_eq!(deque.try_reserve(2), Ok(()));
    assert_eq!(deque.capacity(), 8);

    assert_eq!(deque.try_reserve(20), Ok(()));
    assert_eq!(deque.capacity(), 20);
    assert_eq!(collect(&deque), [0, 1, 2]);

    assert_eq!(
        deque.try_reserve(usize::MAX),
        Err(TryReserveError::CapacityOverflow {
            requested: usize::MAX
        })
    );
    // Failure leaves the deque alone.
    assert_eq!(deque.capacity(), 20);
    assert_eq!(collect(&deque), [0, 1, 2]);
}

#[test]
fn test_clone_preserves_layout_miri() {
    let mut original: CircularVec<String> = CircularVec::new();
    for i in 0..3 {
        original.push_front(i.to_string());
    }
    original.push_back("x".to_owned());

    let copy = original.clone();
    assert_eq!(copy.capacity(), original.capacity());
    assert_eq!(copy.start, original.start);
    assert_eq!(copy, original);
    assert_eq!(copy.as_slices(), original.as_slices());
}

#[test]
fn test_clone_independence_miri() {
    let mut a: CircularVec<u32> = (0..10).collect();
    let mut b = a.clone();

    b.push_back(10);
    b[0] = 100;
    assert_eq!(collect(&a), (0..10).collect::<Vec<_>>());

    a.pop_front();
    a.push_front(50);
    assert_eq!(b[0], 100);
    assert_eq!(b.len(), 11);

    let mut c: CircularVec<u32> = CircularVec::new();
    c.clone_from(&a);
    assert_eq!(c, a);
    c.clear();
    assert_eq!(a.len(), 10);
}

#[test]
fn test_drop_releases_elements_miri() {
    use std::rc::Rc;

    let tracker = Rc::new(());
    {
        let mut deque: CircularVec<Rc<()>> = CircularVec::new();
        for _ in 0..5 {
            deque.push_front(tracker.clone());
            deque.push_back(tracker.clone());
        }
        deque.pop_back();
        assert_eq!(Rc::strong_count(&tracker), 10);

        let copy = deque.clone();
        assert_eq!(Rc::strong_count(&tracker), 19);
        drop(copy);
        assert_eq!(Rc::strong_count(&tracker), 10);

        deque.clear();
        assert_eq!(Rc::strong_count(&tracker), 1);

        deque.push_back(tracker.clone());
    }
    assert_eq!(Rc::strong_count(&tracker), 1);
}

#[test]
fn test_smallvec_storage_miri() {
    let mut deque: CircularSmallVec<u8, 8> = CircularSmallVec::new();
    assert_eq!(deque.capacity(), 8);

    for i in 0..7 {
        deque.push_front(i);
    }
    assert_eq!(deque.capacity(), 8);
    assert_eq!(collect(&deque), [6, 5, 4, 3, 2, 1, 0]);

    deque.push_back(7);
    assert_eq!(deque.capacity(), 16);
    assert_eq!(collect(&deque), [6, 5, 4, 3, 2, 1, 0, 7]);

    while deque.len() > 1 {
        deque.pop_back();
    }
    assert_eq!(deque.capacity(), 8);
    assert_eq!(collect(&deque), [6]);
}

#[test]
fn test_debug_and_eq_miri() {
    let mut deque: CircularVec<u32> = CircularVec::new();
    deque.push_front(1);
    deque.push_back(2);
    assert_eq!(format!("{:?}", deque), "[1, 2]");

    // Same contents, different layouts.
    let other: CircularDeque<Box<[MaybeUninit<u32>]>, Tripling> = [1, 2].into_iter().collect();
    assert_eq!(deque, other);

    deque.push_back(3);
    assert_ne!(deque, other);
}

#[test]
fn test_randomized_oracle() {
    use rand::rngs::StdRng;
    use rand::Rng;
    use rand::SeedableRng;
    use std::collections::VecDeque;

    let mut rng = StdRng::seed_from_u64(0x5eed);
    let mut deque: CircularVec<i64> = CircularVec::new();
    let mut oracle: VecDeque<i64> = VecDeque::new();

    for _ in 0..5000 {
        match rng.gen_range(0..46) {
            0..=9 => {
                let value = rng.gen_range(-10_000..=10_000);
                deque.push_back(value);
                oracle.push_back(value);
            }
            10..=19 => {
                let value = rng.gen_range(-10_000..=10_000);
                deque.push_front(value);
                oracle.push_front(value);
            }
            20..=27 => assert_eq!(deque.pop_back(), oracle.pop_back()),
            28..=35 => assert_eq!(deque.pop_front(), oracle.pop_front()),
            _ => {
                if oracle.is_empty() {
                    continue;
                }
                let index = rng.gen_range(0..oracle.len());
                let value = rng.gen_range(-10_000..=10_000);
                deque[index] = value;
                oracle[index] = value;
            }
        }

        assert_matches(&deque, &oracle);
    }
}

#[cfg(test)]
#[derive(Clone, Debug)]
enum Op {
    PushBack(i64),
    PushFront(i64),
    PopBack,
    PopFront,
    Set(usize, i64),
}

#[cfg(test)]
fn op_strategy() -> impl proptest::strategy::Strategy<Value = Op> {
    use proptest::prelude::*;

    prop_oneof![
        any::<i64>().prop_map(Op::PushBack),
        any::<i64>().prop_map(Op::PushFront),
        Just(Op::PopBack),
        Just(Op::PopFront),
        (any::<usize>(), any::<i64>()).prop_map(|(index, value)| Op::Set(index, value)),
    ]
}

#[cfg(test)]
fn run_ops<S, P>(mut deque: CircularDeque<S, P>, ops: &[Op])
where
    S: SlotStorage<Item = i64>,
    P: GrowthPolicy,
{
    use std::collections::VecDeque;

    let factor = deque.policy().factor();
    let floor = deque.policy().min_capacity();
    let mut oracle: VecDeque<i64> = VecDeque::new();

    for op in ops {
        match *op {
            Op::PushBack(value) => {
                deque.push_back(value);
                oracle.push_back(value);
            }
            Op::PushFront(value) => {
                deque.push_front(value);
                oracle.push_front(value);
            }
            Op::PopBack => assert_eq!(deque.pop_back(), oracle.pop_back()),
            Op::PopFront => assert_eq!(deque.pop_front(), oracle.pop_front()),
            Op::Set(index, value) => {
                if !oracle.is_empty() {
                    let index = index % oracle.len();
                    deque[index] = value;
                    oracle[index] = value;
                }
            }
        }

        assert_matches(&deque, &oracle);
        assert!(deque.capacity() > deque.len());
        assert!(deque.capacity() >= floor);
        assert!(deque.capacity() <= (factor * factor * deque.len()).max(floor));
    }
}

#[cfg(test)]
proptest::proptest! {
    #[test]
    fn test_oracle_doubling(ops in proptest::collection::vec(op_strategy(), 0..300)) {
        run_ops(CircularVec::new(), &ops);
    }

    #[test]
    fn test_oracle_tripling(ops in proptest::collection::vec(op_strategy(), 0..300)) {
        run_ops(CircularDeque::<Box<[MaybeUninit<i64>]>, Tripling>::new(), &ops);
    }

    #[test]
    fn test_oracle_smallvec(ops in proptest::collection::vec(op_strategy(), 0..300)) {
        run_ops(CircularSmallVec::<i64, 16>::new(), &ops);
    }
}
