use thiserror::Error;

/// Error returned by [`crate::CircularDeque::try_reserve`] when the
/// slot buffer could not be grown.
#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum TryReserveError {
    /// The requested slot count overflows the address space for the
    /// element type.
    #[error("capacity overflow: cannot allocate {requested} slots")]
    CapacityOverflow {
        /// Number of slots requested
        requested: usize,
    },
    /// The allocator refused the request.
    #[error("allocation failure for {capacity} slots")]
    AllocError {
        /// Number of slots requested
        capacity: usize,
    },
}
