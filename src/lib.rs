//! The `circular_deque` crate defines the [`CircularDeque`] container,
//! a double-ended queue backed by a single circular buffer of slots.
//!
//! Unlike the standard [`std::collections::VecDeque`], a
//! [`CircularDeque`] shrinks as well as grows: after every push or pop,
//! its [`traits::GrowthPolicy`] may relocate all elements to a fresh
//! buffer `K` times larger (when full) or to `K` times the element count
//! (when at least `K * K` times too large).  The deque is also generic
//! over the slot container; this crate comes with support for boxed
//! slices ([`CircularVec`]), and for [`smallvec::SmallVec`]
//! ([`CircularSmallVec`]) for deques that are usually small.
//!
//! Elements are reached through random-access [`Cursor`]s (or
//! [`CursorMut`]s), and iterating backwards is just a matter of wrapping
//! any cursor in [`Reversed`].  The [`algorithms`] module implements
//! shuffling and sorting on top of these cursors only.
//!
//! # Examples
//!
//! ```rust
//! use circular_deque::CircularVec;
//!
//! let mut deque: CircularVec<u32> = CircularVec::new();
//! deque.push_back(1);
//! deque.push_back(2);
//! deque.push_front(0);
//! assert_eq!(deque.pop_front(), Some(0));
//! assert_eq!(deque[1], 2);
//!
//! let reversed: Vec<u32> = deque.iter().rev().copied().collect();
//! assert_eq!(reversed, [2, 1]);
//! ```
//!
//! ```rust
//! use std::mem::MaybeUninit;
//!
//! use circular_deque::algorithms;
//! use circular_deque::CircularDeque;
//! use circular_deque::Tripling;
//!
//! let mut deque: CircularDeque<Box<[MaybeUninit<u32>]>, Tripling> =
//!     CircularDeque::with_policy(Tripling);
//! deque.extend([3, 1, 2]);
//!
//! // Sort in descending order, by sorting the reversed view.
//! let len = deque.len();
//! algorithms::sort(&mut deque.rbegin_mut(), len);
//! assert_eq!(deque.iter().copied().collect::<Vec<_>>(), [3, 2, 1]);
//! assert!(algorithms::is_sorted(&deque.rbegin(), &deque.rend()));
//! ```
pub mod algorithms;
mod circular_deque;
mod cursor;
mod error;
mod iter;
mod policy;
mod storage;

pub use circular_deque::CircularDeque;
pub use circular_deque::CircularSmallVec;
pub use circular_deque::CircularVec;
pub use cursor::Cursor;
pub use cursor::CursorMut;
pub use cursor::Reversed;
pub use error::TryReserveError;
pub use iter::IntoIter;
pub use iter::Iter;
pub use iter::IterMut;
pub use policy::Doubling;
pub use policy::Tripling;

/// Traits to implement custom slot containers and growth policies, or
/// to write algorithms generic over cursors.
pub mod traits {
    pub use crate::cursor::RandomAccessCursor;
    pub use crate::cursor::RandomAccessCursorMut;
    pub use crate::policy::GrowthPolicy;
    pub use crate::storage::SlotStorage;
}
