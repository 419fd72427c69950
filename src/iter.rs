//! Standard iterators for [`CircularDeque`].
//!
//! [`Iter`] walks a pair of [`Cursor`]s towards each other, while
//! [`IterMut`] splits the deque in its (at most) two contiguous slices
//! to hand out disjoint mutable references.
use std::iter::FusedIterator;

use crate::cursor::Cursor;
use crate::policy::GrowthPolicy;
use crate::storage::SlotStorage;
use crate::CircularDeque;

/// Iterator over shared references to the elements of a [`CircularDeque`].
pub struct Iter<'a, Storage: SlotStorage, Policy: GrowthPolicy> {
    front: Cursor<'a, Storage, Policy>,
    back: Cursor<'a, Storage, Policy>,
}

impl<Storage: SlotStorage, Policy: GrowthPolicy> Clone for Iter<'_, Storage, Policy> {
    fn clone(&self) -> Self {
        Self {
            front: self.front,
            back: self.back,
        }
    }
}

impl<Storage: SlotStorage, Policy: GrowthPolicy> std::fmt::Debug for Iter<'_, Storage, Policy> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Iter")
            .field("front", &self.front)
            .field("back", &self.back)
            .finish()
    }
}

impl<'a, Storage: SlotStorage, Policy: GrowthPolicy> Iterator for Iter<'a, Storage, Policy> {
    type Item = &'a Storage::Item;

    #[inline(always)]
    fn next(&mut self) -> Option<&'a Storage::Item> {
        if self.front == self.back {
            return None;
        }

        let ret = self.front.get();
        self.front += 1;
        ret
    }

    #[inline(always)]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = (self.back - self.front) as usize;
        (len, Some(len))
    }

    #[inline(always)]
    fn nth(&mut self, n: usize) -> Option<&'a Storage::Item> {
        let skip = n.min(self.len()) as isize;
        self.front += skip;
        self.next()
    }
}

impl<'a, Storage: SlotStorage, Policy: GrowthPolicy> DoubleEndedIterator
    for Iter<'a, Storage, Policy>
{
    #[inline(always)]
    fn next_back(&mut self) -> Option<&'a Storage::Item> {
        if self.front == self.back {
            return None;
        }

        self.back -= 1;
        self.back.get()
    }
}

impl<Storage: SlotStorage, Policy: GrowthPolicy> ExactSizeIterator for Iter<'_, Storage, Policy> {}

impl<Storage: SlotStorage, Policy: GrowthPolicy> FusedIterator for Iter<'_, Storage, Policy> {}

/// Iterator over mutable references to the elements of a [`CircularDeque`].
#[derive(Debug)]
pub struct IterMut<'a, T> {
    head: std::slice::IterMut<'a, T>,
    tail: std::slice::IterMut<'a, T>,
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    #[inline(always)]
    fn next(&mut self) -> Option<&'a mut T> {
        self.head.next().or_else(|| self.tail.next())
    }

    #[inline(always)]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.head.len() + self.tail.len();
        (len, Some(len))
    }
}

impl<'a, T> DoubleEndedIterator for IterMut<'a, T> {
    #[inline(always)]
    fn next_back(&mut self) -> Option<&'a mut T> {
        self.tail.next_back().or_else(|| self.head.next_back())
    }
}

impl<T> ExactSizeIterator for IterMut<'_, T> {}

impl<T> FusedIterator for IterMut<'_, T> {}

/// Owning iterator over the elements of a [`CircularDeque`].
///
/// Each step pops from the deque, so the buffer shrinks as we go.
pub struct IntoIter<Storage: SlotStorage, Policy: GrowthPolicy> {
    deque: CircularDeque<Storage, Policy>,
}

impl<Storage, Policy> std::fmt::Debug for IntoIter<Storage, Policy>
where
    Storage: SlotStorage,
    Storage::Item: std::fmt::Debug,
    Policy: GrowthPolicy,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("IntoIter").field(&self.deque).finish()
    }
}

impl<Storage: SlotStorage, Policy: GrowthPolicy> Iterator for IntoIter<Storage, Policy> {
    type Item = Storage::Item;

    #[inline(always)]
    fn next(&mut self) -> Option<Storage::Item> {
        self.deque.pop_front()
    }

    #[inline(always)]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.deque.len();
        (len, Some(len))
    }
}

impl<Storage: SlotStorage, Policy: GrowthPolicy> DoubleEndedIterator for IntoIter<Storage, Policy> {
    #[inline(always)]
    fn next_back(&mut self) -> Option<Storage::Item> {
        self.deque.pop_back()
    }
}

impl<Storage: SlotStorage, Policy: GrowthPolicy> ExactSizeIterator for IntoIter<Storage, Policy> {}

impl<Storage: SlotStorage, Policy: GrowthPolicy> FusedIterator for IntoIter<Storage, Policy> {}

impl<Storage: SlotStorage, Policy: GrowthPolicy> CircularDeque<Storage, Policy> {
    /// Returns a front-to-back iterator over the elements.
    #[inline(always)]
    pub fn iter(&self) -> Iter<'_, Storage, Policy> {
        Iter {
            front: self.begin(),
            back: self.end(),
        }
    }

    /// Returns a front-to-back iterator over mutable references to
    /// the elements.
    #[inline(always)]
    pub fn iter_mut(&mut self) -> IterMut<'_, Storage::Item> {
        let (head, tail) = self.as_mut_slices();
        IterMut {
            head: head.iter_mut(),
            tail: tail.iter_mut(),
        }
    }
}

impl<Storage: SlotStorage, Policy: GrowthPolicy> IntoIterator for CircularDeque<Storage, Policy> {
    type Item = Storage::Item;
    type IntoIter = IntoIter<Storage, Policy>;

    fn into_iter(self) -> IntoIter<Storage, Policy> {
        IntoIter { deque: self }
    }
}

impl<'a, Storage: SlotStorage, Policy: GrowthPolicy> IntoIterator
    for &'a CircularDeque<Storage, Policy>
{
    type Item = &'a Storage::Item;
    type IntoIter = Iter<'a, Storage, Policy>;

    fn into_iter(self) -> Iter<'a, Storage, Policy> {
        self.iter()
    }
}

impl<'a, Storage: SlotStorage, Policy: GrowthPolicy> IntoIterator
    for &'a mut CircularDeque<Storage, Policy>
{
    type Item = &'a mut Storage::Item;
    type IntoIter = IterMut<'a, Storage::Item>;

    fn into_iter(self) -> IterMut<'a, Storage::Item> {
        self.iter_mut()
    }
}

impl<Storage: SlotStorage, Policy: GrowthPolicy> Extend<Storage::Item>
    for CircularDeque<Storage, Policy>
{
    fn extend<I: IntoIterator<Item = Storage::Item>>(&mut self, iter: I) {
        for item in iter {
            self.push_back(item);
        }
    }
}

impl<Storage, Policy> FromIterator<Storage::Item> for CircularDeque<Storage, Policy>
where
    Storage: SlotStorage,
    Policy: GrowthPolicy + Default,
{
    fn from_iter<I: IntoIterator<Item = Storage::Item>>(iter: I) -> Self {
        let mut deque = Self::new();
        deque.extend(iter);
        deque
    }
}

#[cfg(test)]
use crate::CircularVec;

#[cfg(test)]
fn wrapped_deque() -> CircularVec<u32> {
    let mut deque = CircularVec::new();
    deque.extend([3, 4, 5]);
    for value in (0..3).rev() {
        deque.push_front(value);
    }

    assert_ne!(deque.as_slices().1.len(), 0);
    deque
}

#[test]
fn test_iter_miri() {
    let deque = wrapped_deque();

    let mut iter = deque.iter();
    assert_eq!(iter.len(), 6);
    assert_eq!(iter.next(), Some(&0));
    assert_eq!(iter.next_back(), Some(&5));
    assert_eq!(iter.len(), 4);
    assert_eq!(iter.clone().collect::<Vec<_>>(), [&1, &2, &3, &4]);
    assert_eq!(iter.nth(2), Some(&3));
    assert_eq!(iter.next(), Some(&4));
    assert_eq!(iter.next(), None);
    assert_eq!(iter.next_back(), None);

    let mut iter = deque.iter();
    assert_eq!(iter.nth(10), None);
    assert_eq!(iter.next(), None);

    let mut expected = 0;
    for value in &deque {
        assert_eq!(*value, expected);
        expected += 1;
    }
    assert_eq!(expected, 6);
}

#[test]
fn test_iter_mut_miri() {
    let mut deque = wrapped_deque();

    {
        let mut iter = deque.iter_mut();
        assert_eq!(iter.len(), 6);
        *iter.next().unwrap() += 10;
        *iter.next_back().unwrap() += 20;
        assert_eq!(iter.len(), 4);
    }

    for value in &mut deque {
        *value *= 2;
    }

    itertools::assert_equal(deque.iter().copied(), [20, 2, 4, 6, 8, 50]);
    itertools::assert_equal(deque.iter_mut().rev().map(|x| *x), [50, 8, 6, 4, 2, 20]);
}

#[test]
fn test_into_iter_miri() {
    let deque = wrapped_deque();
    assert_eq!(deque.clone().into_iter().collect::<Vec<_>>(), [0, 1, 2, 3, 4, 5]);
    assert_eq!(
        deque.clone().into_iter().rev().collect::<Vec<_>>(),
        [5, 4, 3, 2, 1, 0]
    );

    let mut iter = deque.into_iter();
    assert_eq!(iter.len(), 6);
    assert_eq!(iter.next(), Some(0));
    assert_eq!(iter.next_back(), Some(5));
    assert_eq!(iter.len(), 4);
}

#[test]
fn test_into_iter_partial_drop_miri() {
    let mut deque: CircularVec<String> = CircularVec::new();
    deque.extend(["a", "b", "c"].map(String::from));
    deque.push_front("z".to_owned());

    let mut iter = deque.into_iter();
    assert_eq!(iter.next().as_deref(), Some("z"));
    // The rest is dropped with the iterator.
}

#[test]
fn test_from_iter_and_extend_miri() {
    let mut deque: CircularVec<u32> = (0..20).collect();
    assert_eq!(deque.len(), 20);
    assert_eq!(deque.capacity(), 32);

    deque.extend([20, 21]);
    itertools::assert_equal(deque.iter().copied(), 0..22);
}
