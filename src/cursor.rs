//! The `cursor` module defines random-access cursors over a
//! [`CircularDeque`]: a logical position and a reference to the
//! deque, with the usual pointer-like arithmetic.
//!
//! Cursors never cache physical slots.  Every access goes through the
//! deque's logical indexing, so moving a cursor is pure arithmetic on
//! its position, and a cursor may legitimately sit one past the end
//! (or anywhere else, for that matter); only accesses are checked.
//!
//! A [`Cursor`] borrows the deque immutably, and a [`CursorMut`]
//! mutably; the borrow checker thus prevents any relocation while a
//! cursor is alive.  [`Reversed`] flips the direction of any cursor.
use std::cmp::Ordering;
use std::ops::Add;
use std::ops::AddAssign;
use std::ops::Index;
use std::ops::IndexMut;
use std::ops::Sub;
use std::ops::SubAssign;

use crate::policy::GrowthPolicy;
use crate::storage::SlotStorage;
use crate::CircularDeque;

/// A random-access cursor can move by arbitrary signed offsets,
/// measure its distance to another cursor of the same type, and look
/// at the item at any offset from its current position.
///
/// Distances between cursors over different containers are
/// meaningless.
pub trait RandomAccessCursor {
    /// The type of the items the cursor points to.
    type Item;

    /// Moves the cursor by `offset` positions.
    fn advance(&mut self, offset: isize);

    /// Returns the number of positions from `origin` to `self`, i.e.,
    /// `origin` advanced by the return value equals `self`.
    fn offset_from(&self, origin: &Self) -> isize;

    /// Returns the item `offset` positions away from the cursor, if
    /// there is one.
    fn peek(&self, offset: isize) -> Option<&Self::Item>;

    /// Returns the item at the cursor, if any.
    #[inline(always)]
    fn current(&self) -> Option<&Self::Item> {
        self.peek(0)
    }

    #[inline(always)]
    fn step_forward(&mut self) {
        self.advance(1)
    }

    #[inline(always)]
    fn step_back(&mut self) {
        self.advance(-1)
    }
}

/// A [`RandomAccessCursor`] that can also update items in place.
pub trait RandomAccessCursorMut: RandomAccessCursor {
    /// Returns a mutable reference to the item `offset` positions away
    /// from the cursor, if there is one.
    fn peek_mut(&mut self, offset: isize) -> Option<&mut Self::Item>;

    /// Returns a mutable reference to the item at the cursor, if any.
    #[inline(always)]
    fn current_mut(&mut self) -> Option<&mut Self::Item> {
        self.peek_mut(0)
    }

    /// Swaps the items at offsets `a` and `b` from the cursor.
    ///
    /// Panics if either offset doesn't point to an item.
    fn swap(&mut self, a: isize, b: isize);
}

/// Converts a logical index to a cursor position.
#[inline(always)]
fn to_position(index: usize) -> isize {
    isize::try_from(index).expect("cursor position must fit in isize")
}

/// Adds `offset` to `position`, and returns the result as a logical
/// index if it's non-negative.
#[inline(always)]
fn to_index(position: isize, offset: isize) -> Option<usize> {
    usize::try_from(position.checked_add(offset)?).ok()
}

/// A read-only cursor into a [`CircularDeque`].
pub struct Cursor<'a, Storage: SlotStorage, Policy: GrowthPolicy> {
    deque: &'a CircularDeque<Storage, Policy>,
    position: isize,
}

impl<'a, Storage: SlotStorage, Policy: GrowthPolicy> Cursor<'a, Storage, Policy> {
    /// Returns the cursor's logical position in the deque.
    #[inline(always)]
    pub fn position(&self) -> isize {
        self.position
    }

    /// Returns the item at the cursor, with the deque's lifetime.
    #[inline(always)]
    pub fn get(&self) -> Option<&'a Storage::Item> {
        self.get_at(0)
    }

    /// Returns the item `offset` positions away, with the deque's lifetime.
    #[inline(always)]
    pub fn get_at(&self, offset: isize) -> Option<&'a Storage::Item> {
        self.deque.get(to_index(self.position, offset)?)
    }
}

// Manual impls: derives would want `Storage: Clone`.
impl<Storage: SlotStorage, Policy: GrowthPolicy> Clone for Cursor<'_, Storage, Policy> {
    #[inline(always)]
    fn clone(&self) -> Self {
        *self
    }
}

impl<Storage: SlotStorage, Policy: GrowthPolicy> Copy for Cursor<'_, Storage, Policy> {}

impl<Storage: SlotStorage, Policy: GrowthPolicy> std::fmt::Debug for Cursor<'_, Storage, Policy> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cursor")
            .field("position", &self.position)
            .field("len", &self.deque.len())
            .finish()
    }
}

impl<Storage: SlotStorage, Policy: GrowthPolicy> RandomAccessCursor for Cursor<'_, Storage, Policy> {
    type Item = Storage::Item;

    #[inline(always)]
    fn advance(&mut self, offset: isize) {
        self.position += offset;
    }

    #[inline(always)]
    fn offset_from(&self, origin: &Self) -> isize {
        self.position - origin.position
    }

    #[inline(always)]
    fn peek(&self, offset: isize) -> Option<&Storage::Item> {
        self.get_at(offset)
    }
}

impl<Storage: SlotStorage, Policy: GrowthPolicy> PartialEq for Cursor<'_, Storage, Policy> {
    #[inline(always)]
    fn eq(&self, other: &Self) -> bool {
        self.position == other.position
    }
}

impl<Storage: SlotStorage, Policy: GrowthPolicy> Eq for Cursor<'_, Storage, Policy> {}

impl<Storage: SlotStorage, Policy: GrowthPolicy> PartialOrd for Cursor<'_, Storage, Policy> {
    #[inline(always)]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<Storage: SlotStorage, Policy: GrowthPolicy> Ord for Cursor<'_, Storage, Policy> {
    #[inline(always)]
    fn cmp(&self, other: &Self) -> Ordering {
        self.position.cmp(&other.position)
    }
}

impl<Storage: SlotStorage, Policy: GrowthPolicy> AddAssign<isize> for Cursor<'_, Storage, Policy> {
    #[inline(always)]
    fn add_assign(&mut self, offset: isize) {
        self.advance(offset);
    }
}

impl<Storage: SlotStorage, Policy: GrowthPolicy> SubAssign<isize> for Cursor<'_, Storage, Policy> {
    #[inline(always)]
    fn sub_assign(&mut self, offset: isize) {
        self.advance(-offset);
    }
}

impl<'a, Storage: SlotStorage, Policy: GrowthPolicy> Add<isize> for Cursor<'a, Storage, Policy> {
    type Output = Self;

    #[inline(always)]
    fn add(mut self, offset: isize) -> Self {
        self += offset;
        self
    }
}

impl<'a, Storage: SlotStorage, Policy: GrowthPolicy> Add<Cursor<'a, Storage, Policy>> for isize {
    type Output = Cursor<'a, Storage, Policy>;

    #[inline(always)]
    fn add(self, cursor: Cursor<'a, Storage, Policy>) -> Cursor<'a, Storage, Policy> {
        cursor + self
    }
}

impl<'a, Storage: SlotStorage, Policy: GrowthPolicy> Sub<isize> for Cursor<'a, Storage, Policy> {
    type Output = Self;

    #[inline(always)]
    fn sub(mut self, offset: isize) -> Self {
        self -= offset;
        self
    }
}

impl<'a, Storage: SlotStorage, Policy: GrowthPolicy> Sub for Cursor<'a, Storage, Policy> {
    type Output = isize;

    #[inline(always)]
    fn sub(self, origin: Self) -> isize {
        self.offset_from(&origin)
    }
}

impl<Storage: SlotStorage, Policy: GrowthPolicy> Index<isize> for Cursor<'_, Storage, Policy> {
    type Output = Storage::Item;

    #[inline(always)]
    fn index(&self, offset: isize) -> &Storage::Item {
        self.get_at(offset)
            .expect("cursor offset must point to an element")
    }
}

/// A cursor into a [`CircularDeque`] that can update items in place.
///
/// A [`CursorMut`] converts to a [`Cursor`] (see [`CursorMut::as_cursor`]
/// and the [`From`] impl), but not the other way around.
pub struct CursorMut<'a, Storage: SlotStorage, Policy: GrowthPolicy> {
    deque: &'a mut CircularDeque<Storage, Policy>,
    position: isize,
}

impl<'a, Storage: SlotStorage, Policy: GrowthPolicy> CursorMut<'a, Storage, Policy> {
    /// Returns the cursor's logical position in the deque.
    #[inline(always)]
    pub fn position(&self) -> isize {
        self.position
    }

    /// Returns the item at the cursor, if any.
    #[inline(always)]
    pub fn get(&self) -> Option<&Storage::Item> {
        self.peek(0)
    }

    /// Returns a mutable reference to the item at the cursor, if any.
    #[inline(always)]
    pub fn get_mut(&mut self) -> Option<&mut Storage::Item> {
        self.peek_mut(0)
    }

    /// Returns a read-only cursor at the same position, that borrows
    /// from this cursor.
    #[inline(always)]
    pub fn as_cursor(&self) -> Cursor<'_, Storage, Policy> {
        Cursor {
            deque: &*self.deque,
            position: self.position,
        }
    }
}

impl<'a, Storage: SlotStorage, Policy: GrowthPolicy> From<CursorMut<'a, Storage, Policy>>
    for Cursor<'a, Storage, Policy>
{
    #[inline(always)]
    fn from(cursor: CursorMut<'a, Storage, Policy>) -> Self {
        Cursor {
            deque: cursor.deque,
            position: cursor.position,
        }
    }
}

impl<Storage: SlotStorage, Policy: GrowthPolicy> std::fmt::Debug
    for CursorMut<'_, Storage, Policy>
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CursorMut")
            .field("position", &self.position)
            .field("len", &self.deque.len())
            .finish()
    }
}

impl<Storage: SlotStorage, Policy: GrowthPolicy> RandomAccessCursor
    for CursorMut<'_, Storage, Policy>
{
    type Item = Storage::Item;

    #[inline(always)]
    fn advance(&mut self, offset: isize) {
        self.position += offset;
    }

    #[inline(always)]
    fn offset_from(&self, origin: &Self) -> isize {
        self.position - origin.position
    }

    #[inline(always)]
    fn peek(&self, offset: isize) -> Option<&Storage::Item> {
        self.deque.get(to_index(self.position, offset)?)
    }
}

impl<Storage: SlotStorage, Policy: GrowthPolicy> RandomAccessCursorMut
    for CursorMut<'_, Storage, Policy>
{
    #[inline(always)]
    fn peek_mut(&mut self, offset: isize) -> Option<&mut Storage::Item> {
        self.deque.get_mut(to_index(self.position, offset)?)
    }

    #[inline(always)]
    fn swap(&mut self, a: isize, b: isize) {
        let a = to_index(self.position, a).expect("swap offset must point to an element");
        let b = to_index(self.position, b).expect("swap offset must point to an element");
        self.deque.swap(a, b);
    }
}

impl<Storage: SlotStorage, Policy: GrowthPolicy> AddAssign<isize>
    for CursorMut<'_, Storage, Policy>
{
    #[inline(always)]
    fn add_assign(&mut self, offset: isize) {
        self.advance(offset);
    }
}

impl<Storage: SlotStorage, Policy: GrowthPolicy> SubAssign<isize>
    for CursorMut<'_, Storage, Policy>
{
    #[inline(always)]
    fn sub_assign(&mut self, offset: isize) {
        self.advance(-offset);
    }
}

impl<Storage: SlotStorage, Policy: GrowthPolicy> Add<isize> for CursorMut<'_, Storage, Policy> {
    type Output = Self;

    #[inline(always)]
    fn add(mut self, offset: isize) -> Self {
        self += offset;
        self
    }
}

impl<'a, Storage: SlotStorage, Policy: GrowthPolicy> Add<CursorMut<'a, Storage, Policy>> for isize {
    type Output = CursorMut<'a, Storage, Policy>;

    #[inline(always)]
    fn add(self, cursor: CursorMut<'a, Storage, Policy>) -> CursorMut<'a, Storage, Policy> {
        cursor + self
    }
}

impl<Storage: SlotStorage, Policy: GrowthPolicy> Sub<isize> for CursorMut<'_, Storage, Policy> {
    type Output = Self;

    #[inline(always)]
    fn sub(mut self, offset: isize) -> Self {
        self -= offset;
        self
    }
}

impl<Storage: SlotStorage, Policy: GrowthPolicy> Index<isize> for CursorMut<'_, Storage, Policy> {
    type Output = Storage::Item;

    #[inline(always)]
    fn index(&self, offset: isize) -> &Storage::Item {
        self.peek(offset)
            .expect("cursor offset must point to an element")
    }
}

impl<Storage: SlotStorage, Policy: GrowthPolicy> IndexMut<isize>
    for CursorMut<'_, Storage, Policy>
{
    #[inline(always)]
    fn index_mut(&mut self, offset: isize) -> &mut Storage::Item {
        self.peek_mut(offset)
            .expect("cursor offset must point to an element")
    }
}

/// A [`Reversed`] cursor walks its base cursor backwards.
///
/// Like C++'s `std::reverse_iterator`, the reversed cursor points to
/// the item just *before* its base: reversing the one-past-the-end
/// cursor yields a cursor at the last item, and reversing the
/// beginning yields the reversed one-past-the-end.  Offset `p` from a
/// reversed cursor is offset `-1 - p` from its base.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Reversed<Base> {
    base: Base,
}

impl<Base> Reversed<Base> {
    /// Returns a reversed cursor that points just before `base`.
    #[inline(always)]
    pub fn new(base: Base) -> Self {
        Self { base }
    }

    /// Returns the base cursor, which points just after the reversed one.
    #[inline(always)]
    pub fn base(&self) -> &Base {
        &self.base
    }

    #[inline(always)]
    pub fn into_base(self) -> Base {
        self.base
    }
}

impl<'a, Storage: SlotStorage, Policy: GrowthPolicy> Reversed<Cursor<'a, Storage, Policy>> {
    /// Returns the item at the cursor, with the deque's lifetime.
    #[inline(always)]
    pub fn get(&self) -> Option<&'a Storage::Item> {
        self.base.get_at(-1)
    }
}

impl<'a, Storage: SlotStorage, Policy: GrowthPolicy> From<Reversed<CursorMut<'a, Storage, Policy>>>
    for Reversed<Cursor<'a, Storage, Policy>>
{
    #[inline(always)]
    fn from(cursor: Reversed<CursorMut<'a, Storage, Policy>>) -> Self {
        Reversed::new(cursor.base.into())
    }
}

impl<Base: RandomAccessCursor> RandomAccessCursor for Reversed<Base> {
    type Item = Base::Item;

    #[inline(always)]
    fn advance(&mut self, offset: isize) {
        self.base.advance(-offset);
    }

    #[inline(always)]
    fn offset_from(&self, origin: &Self) -> isize {
        origin.base.offset_from(&self.base)
    }

    #[inline(always)]
    fn peek(&self, offset: isize) -> Option<&Base::Item> {
        self.base.peek(offset.checked_neg()?.checked_sub(1)?)
    }
}

impl<Base: RandomAccessCursorMut> RandomAccessCursorMut for Reversed<Base> {
    #[inline(always)]
    fn peek_mut(&mut self, offset: isize) -> Option<&mut Base::Item> {
        self.base.peek_mut(offset.checked_neg()?.checked_sub(1)?)
    }

    #[inline(always)]
    fn swap(&mut self, a: isize, b: isize) {
        self.base.swap(-1 - a, -1 - b);
    }
}

impl<Base: PartialOrd> PartialOrd for Reversed<Base> {
    #[inline(always)]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        other.base.partial_cmp(&self.base)
    }
}

impl<Base: Ord> Ord for Reversed<Base> {
    #[inline(always)]
    fn cmp(&self, other: &Self) -> Ordering {
        other.base.cmp(&self.base)
    }
}

impl<Base: RandomAccessCursor> AddAssign<isize> for Reversed<Base> {
    #[inline(always)]
    fn add_assign(&mut self, offset: isize) {
        self.advance(offset);
    }
}

impl<Base: RandomAccessCursor> SubAssign<isize> for Reversed<Base> {
    #[inline(always)]
    fn sub_assign(&mut self, offset: isize) {
        self.advance(-offset);
    }
}

impl<Base: RandomAccessCursor> Add<isize> for Reversed<Base> {
    type Output = Self;

    #[inline(always)]
    fn add(mut self, offset: isize) -> Self {
        self += offset;
        self
    }
}

impl<Base: RandomAccessCursor> Add<Reversed<Base>> for isize {
    type Output = Reversed<Base>;

    #[inline(always)]
    fn add(self, cursor: Reversed<Base>) -> Reversed<Base> {
        cursor + self
    }
}

impl<Base: RandomAccessCursor> Sub<isize> for Reversed<Base> {
    type Output = Self;

    #[inline(always)]
    fn sub(mut self, offset: isize) -> Self {
        self -= offset;
        self
    }
}

impl<Base: RandomAccessCursor> Sub for Reversed<Base> {
    type Output = isize;

    #[inline(always)]
    fn sub(self, origin: Self) -> isize {
        self.offset_from(&origin)
    }
}

impl<Base: RandomAccessCursor> Index<isize> for Reversed<Base> {
    type Output = Base::Item;

    #[inline(always)]
    fn index(&self, offset: isize) -> &Base::Item {
        self.peek(offset)
            .expect("cursor offset must point to an element")
    }
}

impl<Base: RandomAccessCursorMut> IndexMut<isize> for Reversed<Base> {
    #[inline(always)]
    fn index_mut(&mut self, offset: isize) -> &mut Base::Item {
        self.peek_mut(offset)
            .expect("cursor offset must point to an element")
    }
}

impl<Storage: SlotStorage, Policy: GrowthPolicy> CircularDeque<Storage, Policy> {
    /// Returns a read-only cursor at logical `position`, which may be
    /// [`CircularDeque::len`] for the one-past-the-end cursor.
    #[inline(always)]
    pub fn cursor(&self, position: usize) -> Cursor<'_, Storage, Policy> {
        debug_assert!(position <= self.len());
        Cursor {
            deque: self,
            position: to_position(position),
        }
    }

    /// Returns a mutable cursor at logical `position`, which may be
    /// [`CircularDeque::len`] for the one-past-the-end cursor.
    #[inline(always)]
    pub fn cursor_mut(&mut self, position: usize) -> CursorMut<'_, Storage, Policy> {
        debug_assert!(position <= self.len());
        CursorMut {
            deque: self,
            position: to_position(position),
        }
    }

    #[inline(always)]
    pub fn begin(&self) -> Cursor<'_, Storage, Policy> {
        self.cursor(0)
    }

    #[inline(always)]
    pub fn end(&self) -> Cursor<'_, Storage, Policy> {
        self.cursor(self.len())
    }

    #[inline(always)]
    pub fn begin_mut(&mut self) -> CursorMut<'_, Storage, Policy> {
        self.cursor_mut(0)
    }

    #[inline(always)]
    pub fn end_mut(&mut self) -> CursorMut<'_, Storage, Policy> {
        let len = self.len();
        self.cursor_mut(len)
    }

    /// Returns a reversed cursor at the last element.
    #[inline(always)]
    pub fn rbegin(&self) -> Reversed<Cursor<'_, Storage, Policy>> {
        Reversed::new(self.end())
    }

    /// Returns a reversed cursor one before the first element.
    #[inline(always)]
    pub fn rend(&self) -> Reversed<Cursor<'_, Storage, Policy>> {
        Reversed::new(self.begin())
    }

    #[inline(always)]
    pub fn rbegin_mut(&mut self) -> Reversed<CursorMut<'_, Storage, Policy>> {
        Reversed::new(self.end_mut())
    }

    #[inline(always)]
    pub fn rend_mut(&mut self) -> Reversed<CursorMut<'_, Storage, Policy>> {
        Reversed::new(self.begin_mut())
    }
}

#[cfg(test)]
use crate::CircularVec;

#[cfg(test)]
fn test_deque() -> CircularVec<i32> {
    let mut deque = CircularVec::new();
    for value in -1..=5 {
        deque.push_back(value);
    }
    // Make sure the logical range wraps around the buffer.
    for value in (-5..=-2).rev() {
        deque.push_front(value);
    }

    assert_ne!(deque.as_slices().1.len(), 0);
    deque
}

#[test]
fn test_cursor_walk_miri() {
    let deque = test_deque();
    assert_eq!(deque.len(), 11);

    let mut it = deque.begin();
    for i in 0..deque.len() {
        assert_eq!(it.get(), Some(&deque[i]));
        it.step_forward();
    }
    assert_eq!(it, deque.end());
    assert_eq!(it.get(), None);

    it.step_back();
    assert_eq!(it.get(), Some(&5));
}

#[test]
fn test_cursor_arithmetic_miri() {
    let deque = test_deque();

    let mut it = deque.begin();
    it += 7;
    assert_eq!(it.get(), Some(&deque[7]));
    it -= 3;
    assert_eq!(it.get(), Some(&deque[4]));
    it += 1;
    assert_eq!(it.get(), Some(&deque[5]));

    assert_eq!((it + -2).get(), Some(&deque[3]));
    assert_eq!((2 + it).get(), Some(&deque[7]));
    assert_eq!((it - 3).get(), Some(&deque[2]));
    assert_eq!(it[2], deque[7]);
    assert_eq!(it[-5], deque[0]);

    assert_eq!(deque.end() - deque.begin(), deque.len() as isize);
    assert_eq!(deque.begin() - deque.end(), -(deque.len() as isize));
    assert_eq!(deque.rend() - deque.rbegin(), deque.len() as isize);
}

#[test]
fn test_cursor_laws_miri() {
    let deque = test_deque();
    let len = deque.len() as isize;

    for start in 0..=len {
        let it = deque.cursor(start as usize);
        for n in -start..=(len - start) {
            assert_eq!((it + n).get(), deque.get((start + n) as usize));
            assert_eq!(it + n, n + it);
            assert_eq!((it + n) - it, n);
            assert_eq!((it + n) - n, it);

            for m in -start..=(len - start) {
                assert_eq!((it + m) + n, it + (m + n));
                assert_eq!((it + m) < (it + n), m < n);
            }
        }
    }

    for start in 0..=len {
        let rit = deque.rbegin() + start;
        for n in -start..=(len - start) {
            assert_eq!((rit + n).get(), deque.get((len - 1 - start - n) as usize));
            assert_eq!(rit + n, n + rit);
            assert_eq!((rit + n) - rit, n);
            assert_eq!((rit + n) - n, rit);

            for m in -start..=(len - start) {
                assert_eq!((rit + m) + n, rit + (m + n));
                assert_eq!((rit + m) < (rit + n), m < n);
            }
        }
    }
}

#[test]
fn test_cursor_mut_commutative_add_miri() {
    let mut deque = test_deque();
    let len = deque.len();

    let it = 3 + deque.begin_mut();
    assert_eq!(it.position(), 3);
    assert_eq!(it.get(), Some(&-2));

    let it = -2 + deque.end_mut();
    assert_eq!(it.position(), len as isize - 2);
    assert_eq!(it.get(), Some(&4));

    let mut rit = 1 + deque.rbegin_mut();
    assert_eq!(rit.current(), Some(&4));
    *rit.current_mut().unwrap() = 40;
    assert_eq!(deque[len - 2], 40);
}

#[test]
fn test_cursor_out_of_range_miri() {
    let deque = test_deque();

    let before = deque.begin() - 1;
    assert_eq!(before.get(), None);
    assert_eq!(before.get_at(1), Some(&-5));
    assert_eq!(deque.end().get_at(isize::MAX), None);
    assert_eq!(deque.begin().get_at(isize::MIN), None);
}

#[test]
#[should_panic(expected = "cursor offset must point to an element")]
fn test_cursor_index_past_end() {
    let deque = test_deque();
    let _ = deque.end()[0];
}

#[test]
fn test_reverse_consistency_miri() {
    let deque = test_deque();
    let len = deque.len();

    for i in 0..len {
        assert_eq!((deque.rbegin() + i as isize).get(), Some(&deque[len - 1 - i]));
        assert_eq!(deque.rbegin()[i as isize], deque[len - 1 - i]);
    }

    let mut rit = deque.rbegin();
    let mut i = len;
    while rit != deque.rend() {
        i -= 1;
        assert_eq!(rit.current(), Some(&deque[i]));
        rit.step_forward();
    }
    assert_eq!(i, 0);
    assert_eq!(rit.get(), None);

    assert!(deque.rbegin() < deque.rend());
    assert_eq!(*deque.rend().base(), deque.begin());
    assert_eq!(deque.rbegin().into_base(), deque.end());
}

#[test]
fn test_cursor_mut_miri() {
    let mut deque = test_deque();

    {
        let mut it = deque.begin_mut();
        *it.get_mut().unwrap() = 100;
        it += 3;
        it[1] = 101;
        *it.peek_mut(-1).unwrap() = 102;
        assert_eq!(it.get(), Some(&-2));
        assert_eq!(it.position(), 3);

        it.swap(0, 7);
        assert_eq!(it[0], 5);
        assert_eq!(it.as_cursor().get(), Some(&5));

        let it = it - 3;
        assert_eq!(it.position(), 0);
        assert_eq!(it.get(), Some(&100));
    }

    assert_eq!(
        deque.iter().copied().collect::<Vec<_>>(),
        [100, -4, 102, 5, 101, 0, 1, 2, 3, 4, -2]
    );
}

#[test]
fn test_cursor_mut_to_cursor_miri() {
    let mut deque = test_deque();

    let it = deque.cursor_mut(2) + 1;
    let it: Cursor<'_, _, _> = it.into();
    assert_eq!(it.position(), 3);
    assert_eq!(it.get(), Some(&-2));
    assert_eq!((it - 3).get(), Some(&-5));
    assert_eq!(it - (it - 3), 3);
}

#[test]
fn test_reversed_mut_miri() {
    let mut deque = test_deque();
    let len = deque.len();

    {
        let mut rit = deque.rbegin_mut();
        assert_eq!(rit.current(), Some(&5));
        *rit.current_mut().unwrap() = 50;
        rit += 2;
        assert_eq!(rit[0], 3);
        rit[1] = 20;
        rit.swap(0, -2);
        assert_eq!(rit.peek(-2), Some(&3));
    }

    assert_eq!(deque[len - 1], 3);
    assert_eq!(deque[len - 3], 50);
    assert_eq!(deque[len - 4], 20);

    let rend = deque.rend_mut();
    assert_eq!(rend.current(), None);
    let rend: Reversed<Cursor<'_, _, _>> = rend.into();
    assert_eq!(rend.peek(-1), Some(&-5));
}

#[test]
fn test_empty_cursors_miri() {
    let deque: CircularVec<u8> = CircularVec::new();

    assert_eq!(deque.begin(), deque.end());
    assert_eq!(deque.rbegin(), deque.rend());
    assert_eq!(deque.end() - deque.begin(), 0);
    assert_eq!(deque.begin().get(), None);
    assert_eq!(deque.rbegin().current(), None);
}
