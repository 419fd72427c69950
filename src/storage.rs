//! The `storage` module defines the [`SlotStorage`] trait: a fixed
//! number of possibly uninitialised slots in a single contiguous
//! allocation.  The [`crate::CircularDeque`] decides which slots are
//! live; the storage only owns the memory.
//!
//! We provide implementations for a boxed slice (the regular case),
//! and for a [`SmallVec`], for deques that usually stay small enough
//! to live inline.
use std::alloc::Layout;
use std::mem::MaybeUninit;

use smallvec::CollectionAllocErr;
use smallvec::SmallVec;

use crate::TryReserveError;

/// In order to implement a circular deque, we need an underlying
/// buffer with a fixed number of slots, allocated once and never
/// resized in place.  The deque relocates to a fresh buffer instead.
///
/// Implementations never read or drop the contents of the slots:
/// they're [`MaybeUninit`], and the deque is responsible for
/// tracking (and dropping) the live ones.
///
/// # Safety
///
/// The deque reads and writes slots without bounds checks, so
/// implementations must guarantee that:
///
/// - [`SlotStorage::allocate`] and [`SlotStorage::try_allocate`]
///   return buffers of exactly `capacity` slots;
/// - [`SlotStorage::slots`] and [`SlotStorage::slots_mut`] always
///   return the same slots, with the same length, for the lifetime of
///   the buffer, and values written in a slot stay there until the
///   deque overwrites them (moving the buffer may move the slots, but
///   not reorder them).
pub unsafe trait SlotStorage {
    /// The type of each value in the slots.
    type Item;

    /// Allocates a buffer of exactly `capacity` uninitialised slots.
    ///
    /// Allocation failure is fatal, like it is for [`Vec`].
    fn allocate(capacity: usize) -> Self;

    /// Allocates a buffer of exactly `capacity` uninitialised slots,
    /// or reports why that wasn't possible.
    fn try_allocate(capacity: usize) -> Result<Self, TryReserveError>
    where
        Self: Sized;

    /// Returns all the slots, live or not, in physical order.
    fn slots(&self) -> &[MaybeUninit<Self::Item>];

    /// Returns all the slots, live or not, in physical order.
    fn slots_mut(&mut self) -> &mut [MaybeUninit<Self::Item>];
}

/// Checks that `capacity` slots of `T` fit in a single allocation.
#[inline(always)]
fn check_layout<T>(capacity: usize) -> Result<(), TryReserveError> {
    match Layout::array::<T>(capacity) {
        Ok(_) => Ok(()),
        Err(_) => Err(TryReserveError::CapacityOverflow {
            requested: capacity,
        }),
    }
}

// Safety: a boxed slice never changes length.
unsafe impl<T> SlotStorage for Box<[MaybeUninit<T>]> {
    type Item = T;

    #[inline(always)]
    fn allocate(capacity: usize) -> Self {
        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, MaybeUninit::uninit);
        slots.into_boxed_slice()
    }

    fn try_allocate(capacity: usize) -> Result<Self, TryReserveError> {
        check_layout::<T>(capacity)?;

        let mut slots = Vec::new();
        slots
            .try_reserve_exact(capacity)
            .map_err(|_| TryReserveError::AllocError { capacity })?;
        slots.resize_with(capacity, MaybeUninit::uninit);
        Ok(slots.into_boxed_slice())
    }

    #[inline(always)]
    fn slots(&self) -> &[MaybeUninit<T>] {
        self
    }

    #[inline(always)]
    fn slots_mut(&mut self) -> &mut [MaybeUninit<T>] {
        self
    }
}

// Safety: we only resize the `SmallVec` in `allocate`.
unsafe impl<T, const N: usize> SlotStorage for SmallVec<[MaybeUninit<T>; N]> {
    type Item = T;

    #[inline(always)]
    fn allocate(capacity: usize) -> Self {
        let mut slots = SmallVec::with_capacity(capacity);
        slots.resize_with(capacity, MaybeUninit::uninit);
        slots
    }

    fn try_allocate(capacity: usize) -> Result<Self, TryReserveError> {
        check_layout::<T>(capacity)?;

        let mut slots = SmallVec::new();
        slots.try_reserve_exact(capacity).map_err(|e| match e {
            CollectionAllocErr::CapacityOverflow => TryReserveError::CapacityOverflow {
                requested: capacity,
            },
            _ => TryReserveError::AllocError { capacity },
        })?;
        slots.resize_with(capacity, MaybeUninit::uninit);
        Ok(slots)
    }

    #[inline(always)]
    fn slots(&self) -> &[MaybeUninit<T>] {
        self
    }

    #[inline(always)]
    fn slots_mut(&mut self) -> &mut [MaybeUninit<T>] {
        self
    }
}

#[test]
fn test_box_allocate_miri() {
    let slots = <Box<[MaybeUninit<u32>]> as SlotStorage>::allocate(5);
    assert_eq!(slots.slots().len(), 5);

    let slots = <Box<[MaybeUninit<u32>]> as SlotStorage>::try_allocate(3).unwrap();
    assert_eq!(slots.slots().len(), 3);
}

#[test]
fn test_smallvec_allocate_miri() {
    // Fits inline.
    let slots = <SmallVec<[MaybeUninit<u8>; 4]> as SlotStorage>::allocate(4);
    assert_eq!(slots.slots().len(), 4);
    assert!(!slots.spilled());

    // Spills to the heap.
    let slots = <SmallVec<[MaybeUninit<u8>; 4]> as SlotStorage>::try_allocate(9).unwrap();
    assert_eq!(slots.slots().len(), 9);
    assert!(slots.spilled());
}

#[test]
fn test_try_allocate_overflow() {
    assert_eq!(
        <Box<[MaybeUninit<u64>]> as SlotStorage>::try_allocate(usize::MAX).unwrap_err(),
        TryReserveError::CapacityOverflow {
            requested: usize::MAX
        }
    );

    assert_eq!(
        <SmallVec<[MaybeUninit<u64>; 2]> as SlotStorage>::try_allocate(usize::MAX / 2)
            .unwrap_err(),
        TryReserveError::CapacityOverflow {
            requested: usize::MAX / 2
        }
    );
}
