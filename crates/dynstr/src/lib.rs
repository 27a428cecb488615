//! Growable byte strings with explicit, observable capacity management.
//!
//! [`DynString`] owns a contiguous heap buffer and keeps two book-keeping
//! values alongside it: the *length* (how many bytes are meaningful) and the
//! *capacity* (how many bytes are allocated). One capacity slot past the
//! content always holds a `0` terminator, so the buffer can be handed to
//! consumers that expect a sentinel-terminated sequence; see
//! [`DynString::as_bytes_with_nul`]. Content bytes themselves are
//! unrestricted, interior zeros included.
//!
//! Mutations grow the buffer on demand, doubling past the required length so
//! that `n` incremental appends reallocate `O(log n)` times, and never give
//! capacity back; shrinking happens only through the explicit
//! [`DynString::fit`]. Everything that can allocate returns a [`Result`]
//! instead of aborting on exhaustion, and a failed allocation leaves the
//! string exactly as it was. The handful of fixed-signature trait impls that
//! cannot report failure ([`Clone`], [`core::fmt::Write`]) follow the
//! standard library's abort-on-exhaustion convention instead and say so in
//! their docs.
//!
//! ```
//! use dynstr::DynString;
//!
//! let mut s = DynString::from_bytes(b"foo")?;
//! s.append(b"bar")?;
//! assert_eq!(&*s, b"foobar");
//!
//! s.cut(1, 3)?;
//! assert_eq!(&*s, b"oob");
//!
//! s.reserve(100)?;
//! assert!(s.capacity() >= 100);
//! s.fit()?;
//! assert_eq!(s.capacity(), s.len() + 1);
//! # Ok::<(), dynstr::Error>(())
//! ```

#![no_std]
extern crate alloc;

#[cfg(test)]
extern crate std;

mod error;
mod fmt;
mod string;


pub use error::{Error, Result};
pub use string::DynString;

/// Builds a [`DynString`] from format arguments, sized exactly to the
/// rendered result.
///
/// Unlike [`alloc::format!`], exhaustion is reported rather than aborting:
/// the expansion evaluates to [`Result`]`<`[`DynString`]`>`.
///
/// ```
/// let s = dynstr::format!("{}-{}", 4, "two")?;
/// assert_eq!(&*s, b"4-two");
/// # Ok::<(), dynstr::Error>(())
/// ```
#[macro_export]
macro_rules! format {
    ( $( $arg:tt )* ) => {
        $crate::DynString::format(::core::format_args!($($arg)*))
    };
}
