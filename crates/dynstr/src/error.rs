use thiserror::Error;

/// Failure modes of the fallible [`DynString`](crate::DynString) operations.
///
/// Every mutating operation that reports an error leaves its target in the
/// state it held before the call; there is no partial mutation to observe.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The allocator refused a buffer request, or the capacity computation
    /// overflowed `usize` (in which case `requested` saturates).
    #[error("allocation of {requested} bytes failed")]
    OutOfMemory {
        /// Total buffer size, in bytes, that could not be provided.
        requested: usize,
    },

    /// A requested sub-range does not lie inside the content it addresses.
    #[error("range of {count} bytes at index {start} exceeds length {len}")]
    OutOfRange {
        /// Index of the first requested byte.
        start: usize,
        /// Number of bytes requested starting at `start`.
        count: usize,
        /// Content length the range was checked against.
        len: usize,
    },

    /// A formatting trait implementation reported failure while rendering.
    #[error("formatting trait implementation returned an error")]
    Fmt,
}

/// Shorthand for `Result` values produced by this crate.
pub type Result<T> = core::result::Result<T, Error>;
