//! The `algorithms` module contains generic in-place algorithms that
//! only rely on the [`RandomAccessCursor`] traits, so they work the
//! same on forward, [`crate::Reversed`], read-only and mutable
//! cursors.
//!
//! Mutable cursors hold an exclusive borrow of their container, so
//! mutating algorithms take a single cursor and a length instead of a
//! `[first, last)` pair.
use std::cmp::Ordering;

use rand::Rng;

use crate::cursor::RandomAccessCursor;
use crate::cursor::RandomAccessCursorMut;

#[inline(always)]
fn to_offset(index: usize) -> isize {
    isize::try_from(index).expect("range length must fit in isize")
}

#[inline(always)]
fn item_at<C: RandomAccessCursor>(cursor: &C, index: usize) -> &C::Item {
    cursor
        .peek(to_offset(index))
        .expect("range must only cover elements")
}

/// Shuffles the `len` items starting at `cursor` uniformly at random
/// (Fisher-Yates).
///
/// Panics if the range extends past the container.
pub fn shuffle<C, R>(cursor: &mut C, len: usize, rng: &mut R)
where
    C: RandomAccessCursorMut,
    R: Rng + ?Sized,
{
    for i in (1..len).rev() {
        let j = rng.gen_range(0..=i);
        cursor.swap(to_offset(i), to_offset(j));
    }
}

/// Sorts the `len` items starting at `cursor` in ascending order.
///
/// Panics if the range extends past the container.
pub fn sort<C>(cursor: &mut C, len: usize)
where
    C: RandomAccessCursorMut,
    C::Item: Ord,
{
    sort_by(cursor, len, |x, y| x.cmp(y))
}

/// Sorts the `len` items starting at `cursor` according to `compare`.
///
/// This is an unstable, in-place heapsort: `O(n log n)` comparisons
/// and swaps, and no allocation.
///
/// Panics if the range extends past the container.
pub fn sort_by<C, F>(cursor: &mut C, len: usize, mut compare: F)
where
    C: RandomAccessCursorMut,
    F: FnMut(&C::Item, &C::Item) -> Ordering,
{
    if len < 2 {
        return;
    }

    // Check the whole range up front, rather than halfway through.
    let _ = item_at(cursor, len - 1);

    for root in (0..len / 2).rev() {
        sift_down(cursor, root, len, &mut compare);
    }

    for end in (1..len).rev() {
        cursor.swap(0, to_offset(end));
        sift_down(cursor, 0, end, &mut compare);
    }
}

/// Restores the max-heap property for the subtree at `root`, in the
/// heap made of the first `end` items.
fn sift_down<C, F>(cursor: &mut C, mut root: usize, end: usize, compare: &mut F)
where
    C: RandomAccessCursorMut,
    F: FnMut(&C::Item, &C::Item) -> Ordering,
{
    loop {
        let mut child = 2 * root + 1;
        if child >= end {
            return;
        }

        if child + 1 < end
            && compare(item_at(cursor, child), item_at(cursor, child + 1)) == Ordering::Less
        {
            child += 1;
        }

        if compare(item_at(cursor, root), item_at(cursor, child)) != Ordering::Less {
            return;
        }

        cursor.swap(to_offset(root), to_offset(child));
        root = child;
    }
}

/// Determines whether the items in `[first, last)` are in ascending order.
///
/// Returns `true` for empty (or inverted) ranges.
pub fn is_sorted<C>(first: &C, last: &C) -> bool
where
    C: RandomAccessCursor,
    C::Item: PartialOrd,
{
    let len = last.offset_from(first);
    (1..len).all(|i| match (first.peek(i - 1), first.peek(i)) {
        (Some(prev), Some(next)) => prev <= next,
        _ => false,
    })
}

#[cfg(test)]
use crate::CircularVec;

#[cfg(test)]
use rand::rngs::StdRng;

#[cfg(test)]
use rand::SeedableRng;

#[test]
fn test_shuffle_then_sort() {
    const COUNT: usize = 1000;

    let mut deque: CircularVec<usize> = (0..COUNT).collect();
    let expected = deque.clone();
    let mut rng = StdRng::seed_from_u64(42);

    let len = deque.len();
    shuffle(&mut deque.begin_mut(), len, &mut rng);
    assert_ne!(deque, expected);
    assert!(!is_sorted(&deque.begin(), &deque.end()));

    sort(&mut deque.begin_mut(), len);
    assert_eq!(deque, expected);
    assert!(is_sorted(&deque.begin(), &deque.end()));
}

#[test]
fn test_sort_wrapped_miri() {
    let mut deque: CircularVec<i32> = CircularVec::new();
    for value in [3, -1, 4] {
        deque.push_back(value);
    }
    for value in [1, -5, 9, 2] {
        deque.push_front(value);
    }
    assert_ne!(deque.as_slices().1.len(), 0);

    let len = deque.len();
    sort(&mut deque.begin_mut(), len);
    itertools::assert_equal(deque.iter().copied(), [-5, -1, 1, 2, 3, 4, 9]);
}

#[test]
fn test_sort_reversed_miri() {
    let mut deque: CircularVec<u32> = [5, 1, 4, 2, 3].into_iter().collect();

    let len = deque.len();
    sort(&mut deque.rbegin_mut(), len);
    itertools::assert_equal(deque.iter().copied(), [5, 4, 3, 2, 1]);
    assert!(is_sorted(&deque.rbegin(), &deque.rend()));
    assert!(!is_sorted(&deque.begin(), &deque.end()));
}

#[test]
fn test_sort_subrange_miri() {
    let mut deque: CircularVec<u32> = [9, 8, 7, 6, 5, 4].into_iter().collect();

    let mut cursor = deque.cursor_mut(1);
    sort_by(&mut cursor, 4, |x, y| x.cmp(y));
    itertools::assert_equal(deque.iter().copied(), [9, 5, 6, 7, 8, 4]);

    assert!(is_sorted(&deque.cursor(1), &deque.cursor(5)));
    assert!(is_sorted(&deque.cursor(3), &deque.cursor(3)));
    assert!(is_sorted(&deque.cursor(3), &deque.cursor(1)));
}

#[test]
fn test_sort_by_key_order_miri() {
    let mut deque: CircularVec<(u8, char)> =
        [(2, 'b'), (0, 'z'), (1, 'a'), (3, 'c')].into_iter().collect();

    let len = deque.len();
    sort_by(&mut deque.begin_mut(), len, |x, y| y.1.cmp(&x.1));
    itertools::assert_equal(
        deque.iter().map(|x| x.1),
        ['z', 'c', 'b', 'a'],
    );
}

#[test]
fn test_trivial_ranges_miri() {
    let mut deque: CircularVec<u32> = CircularVec::new();
    let mut rng = StdRng::seed_from_u64(1);

    shuffle(&mut deque.begin_mut(), 0, &mut rng);
    sort(&mut deque.begin_mut(), 0);
    assert!(deque.is_empty());

    deque.push_back(1);
    shuffle(&mut deque.begin_mut(), 1, &mut rng);
    sort(&mut deque.begin_mut(), 1);
    itertools::assert_equal(deque.iter().copied(), [1]);
}

#[test]
#[should_panic(expected = "range must only cover elements")]
fn test_sort_past_end() {
    let mut deque: CircularVec<u32> = [3, 2, 1].into_iter().collect();
    sort(&mut deque.begin_mut(), 4);
}
