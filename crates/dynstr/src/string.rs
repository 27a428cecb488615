//! The [`DynString`] container: representation, constructors, mutators, and
//! capacity management.
//!
//! The backing allocation is a `Vec<u8>` kept resized to the full recorded
//! capacity, so `buf.len()` *is* the capacity and every slot is initialized.
//! Newly acquired slots are zero-filled; slots between the terminator and the
//! end of the buffer may hold stale bytes from earlier, longer content.

use alloc::vec::Vec;
use core::{
    cmp::Ordering,
    ffi::CStr,
    hash::{Hash, Hasher},
    ops::{Deref, DerefMut},
};

use bstr::BStr;

use crate::error::{Error, Result};

/// A growable byte string with an explicit, observable capacity.
///
/// Two values are tracked alongside the heap buffer: the *length* (bytes of
/// meaningful content) and the *capacity* (bytes allocated). The slot at
/// index `length` always holds a `0` terminator, so `length < capacity`
/// holds for every live string and [`as_bytes_with_nul`] can hand the buffer
/// to sentinel-expecting consumers at no cost. Content bytes are
/// unrestricted; interior zeros are ordinary data.
///
/// Mutations grow the buffer on demand and never shrink it; see [`reserve`]
/// and [`fit`] for explicit control. Every growing operation reports
/// exhaustion as [`Error::OutOfMemory`] and leaves the string untouched when
/// it fails.
///
/// [`as_bytes_with_nul`]: DynString::as_bytes_with_nul
/// [`reserve`]: DynString::reserve
/// [`fit`]: DynString::fit
pub struct DynString {
    // Invariants: buf.len() is the recorded capacity, never zero;
    // len < buf.len(); buf[len] == 0.
    pub(crate) buf: Vec<u8>,
    pub(crate) len: usize,
}

impl DynString {
    /// Creates an empty string with the minimal capacity of one byte (the
    /// terminator slot).
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfMemory`] if the allocator refuses the
    /// single-byte buffer.
    pub fn new() -> Result<Self> {
        Self::with_capacity(1)
    }

    /// Creates an empty string with `capacity` bytes pre-allocated.
    ///
    /// The terminator needs one slot, so a minimum of one byte is always
    /// allocated; `with_capacity(0)` is equivalent to [`new`](Self::new).
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfMemory`] if the allocator refuses the request.
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        let capacity = capacity.max(1);
        let mut buf = Vec::new();
        buf.try_reserve_exact(capacity)
            .map_err(|_| Error::OutOfMemory {
                requested: capacity,
            })?;
        buf.resize(capacity, 0);
        Ok(Self { buf, len: 0 })
    }

    /// Creates a string holding a copy of `src`, sized to the minimal
    /// capacity `src.len() + 1`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfMemory`] if the allocator refuses the buffer.
    pub fn from_bytes(src: &[u8]) -> Result<Self> {
        let mut s = Self::with_capacity(src.len() + 1)?;
        s.buf[..src.len()].copy_from_slice(src);
        s.len = src.len();
        Ok(s)
    }

    /// Creates a string holding a copy of the content of a NUL-terminated
    /// buffer, excluding the terminator.
    ///
    /// The length is derived by the terminator scan already performed at the
    /// [`CStr`] boundary, so this accepts buffers handed over from foreign
    /// code without a separate length.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfMemory`] if the allocator refuses the buffer.
    pub fn from_c_str(src: &CStr) -> Result<Self> {
        Self::from_bytes(src.to_bytes())
    }

    /// Creates a string holding a copy of `count` bytes of `src` starting at
    /// index `start`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] if `start + count` exceeds `src.len()`
    /// (or overflows), and [`Error::OutOfMemory`] if the allocator refuses
    /// the buffer.
    pub fn from_bytes_range(src: &[u8], start: usize, count: usize) -> Result<Self> {
        let end = start
            .checked_add(count)
            .filter(|&end| end <= src.len())
            .ok_or(Error::OutOfRange {
                start,
                count,
                len: src.len(),
            })?;
        Self::from_bytes(&src[start..end])
    }

    /// Returns a copy of this string in a distinct allocation with the
    /// minimal capacity `len() + 1`, regardless of this string's capacity.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfMemory`] if the allocator refuses the buffer;
    /// `self` is unaffected either way.
    pub fn try_clone(&self) -> Result<Self> {
        Self::from_bytes(self.as_bytes())
    }

    /// Number of content bytes currently stored.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if no content bytes are stored.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Total number of bytes allocated, terminator slot included.
    ///
    /// Always strictly greater than [`len`](Self::len).
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// The content bytes, terminator excluded.
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    /// The content bytes plus the trailing `0` terminator.
    ///
    /// This is the view to hand to consumers that expect a
    /// sentinel-terminated sequence.
    #[inline]
    #[must_use]
    pub fn as_bytes_with_nul(&self) -> &[u8] {
        &self.buf[..=self.len]
    }

    /// The content as a [`BStr`], unlocking the byte-string inspection and
    /// search API.
    #[inline]
    #[must_use]
    pub fn as_bstr(&self) -> &BStr {
        BStr::new(self.as_bytes())
    }

    /// Discards the content, keeping the allocation.
    ///
    /// The length drops to zero and the terminator moves to index zero; the
    /// capacity is untouched.
    pub fn clear(&mut self) {
        self.buf[0] = 0;
        self.len = 0;
    }

    /// Replaces the content with a copy of `src`.
    ///
    /// Grows the buffer if `src` does not fit; never shrinks it, so
    /// assigning shorter content retains the larger allocation.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfMemory`] if growth fails; the previous content,
    /// length, and capacity are untouched.
    pub fn assign(&mut self, src: &[u8]) -> Result<()> {
        self.grow_for(src.len())?;
        self.buf[..src.len()].copy_from_slice(src);
        self.buf[src.len()] = 0;
        self.len = src.len();
        Ok(())
    }

    /// Appends a copy of `src` after the existing content.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfMemory`] if growth fails; the previous content,
    /// length, and capacity are untouched.
    pub fn append(&mut self, src: &[u8]) -> Result<()> {
        let new_len = self.joined_len(src.len())?;
        self.grow_for(new_len)?;
        self.buf[self.len..new_len].copy_from_slice(src);
        self.buf[new_len] = 0;
        self.len = new_len;
        Ok(())
    }

    /// Appends a single byte.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfMemory`] if growth fails; the previous content,
    /// length, and capacity are untouched.
    pub fn push(&mut self, byte: u8) -> Result<()> {
        let new_len = self.joined_len(1)?;
        self.grow_for(new_len)?;
        self.buf[self.len] = byte;
        self.buf[new_len] = 0;
        self.len = new_len;
        Ok(())
    }

    /// Inserts a copy of `src` before the existing content, which shifts
    /// forward to make room.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfMemory`] if growth fails; the previous content,
    /// length, and capacity are untouched.
    pub fn prepend(&mut self, src: &[u8]) -> Result<()> {
        let new_len = self.joined_len(src.len())?;
        self.grow_for(new_len)?;
        self.buf.copy_within(..self.len, src.len());
        self.buf[..src.len()].copy_from_slice(src);
        self.buf[new_len] = 0;
        self.len = new_len;
        Ok(())
    }

    /// Replaces the content with its own sub-range of `count` bytes starting
    /// at index `start`, discarding everything else. The capacity is
    /// retained.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] if `start + count` exceeds the current
    /// length (or overflows); the content is untouched in that case.
    pub fn cut(&mut self, start: usize, count: usize) -> Result<()> {
        let end = start
            .checked_add(count)
            .filter(|&end| end <= self.len)
            .ok_or(Error::OutOfRange {
                start,
                count,
                len: self.len,
            })?;
        self.buf.copy_within(start..end, 0);
        self.buf[count] = 0;
        self.len = count;
        Ok(())
    }

    /// Grows the capacity to exactly `capacity` total bytes, terminator slot
    /// included. A request the current allocation already satisfies is a
    /// no-op; the capacity never shrinks here (see [`fit`](Self::fit)).
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfMemory`] if the allocator refuses; the string
    /// is untouched.
    pub fn reserve(&mut self, capacity: usize) -> Result<()> {
        if capacity <= self.buf.len() {
            return Ok(());
        }
        self.set_capacity_exact(capacity)
    }

    /// Shrinks the capacity to the minimal `len() + 1` bytes.
    ///
    /// The smaller buffer is populated first and swapped in only on success,
    /// so a failed shrink leaves the string byte-identical and fully usable.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfMemory`] if the replacement buffer cannot be
    /// allocated.
    pub fn fit(&mut self) -> Result<()> {
        let target = self.len + 1;
        if self.buf.len() == target {
            return Ok(());
        }
        let mut exact: Vec<u8> = Vec::new();
        exact
            .try_reserve_exact(target)
            .map_err(|_| Error::OutOfMemory { requested: target })?;
        exact.extend_from_slice(self.as_bytes());
        exact.push(0);
        self.buf = exact;
        Ok(())
    }

    /// Ensures the buffer can hold `new_len` content bytes plus the
    /// terminator, growing to `2 * new_len + 1` in a single reallocation
    /// when it cannot.
    fn grow_for(&mut self, new_len: usize) -> Result<()> {
        let needed = new_len.checked_add(1).ok_or(Error::OutOfMemory {
            requested: usize::MAX,
        })?;
        if needed <= self.buf.len() {
            return Ok(());
        }
        let target = new_len
            .checked_mul(2)
            .and_then(|doubled| doubled.checked_add(1))
            .ok_or(Error::OutOfMemory {
                requested: usize::MAX,
            })?;
        self.set_capacity_exact(target)
    }

    /// Reallocates to exactly `target` total bytes, zero-filling the new
    /// slots. `target` must exceed the current capacity.
    fn set_capacity_exact(&mut self, target: usize) -> Result<()> {
        let additional = target - self.buf.len();
        self.buf
            .try_reserve_exact(additional)
            .map_err(|_| Error::OutOfMemory { requested: target })?;
        self.buf.resize(target, 0);
        Ok(())
    }

    /// Current length plus `extra`, with overflow reported as exhaustion.
    fn joined_len(&self, extra: usize) -> Result<usize> {
        self.len.checked_add(extra).ok_or(Error::OutOfMemory {
            requested: usize::MAX,
        })
    }
}

/// Copies the content into a fresh minimal-capacity allocation, like
/// [`DynString::try_clone`], but follows the standard library's
/// abort-on-exhaustion convention because the signature cannot report
/// failure.
impl Clone for DynString {
    fn clone(&self) -> Self {
        let mut buf = Vec::with_capacity(self.len + 1);
        buf.extend_from_slice(self.as_bytes());
        buf.push(0);
        Self { buf, len: self.len }
    }
}

impl Deref for DynString {
    type Target = [u8];

    #[inline]
    fn deref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl DerefMut for DynString {
    #[inline]
    fn deref_mut(&mut self) -> &mut [u8] {
        &mut self.buf[..self.len]
    }
}

impl AsRef<[u8]> for DynString {
    #[inline]
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl AsMut<[u8]> for DynString {
    #[inline]
    fn as_mut(&mut self) -> &mut [u8] {
        &mut self.buf[..self.len]
    }
}

impl PartialEq for DynString {
    fn eq(&self, other: &Self) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl Eq for DynString {}

impl PartialEq<[u8]> for DynString {
    fn eq(&self, other: &[u8]) -> bool {
        self.as_bytes() == other
    }
}

impl PartialEq<DynString> for [u8] {
    fn eq(&self, other: &DynString) -> bool {
        self == other.as_bytes()
    }
}

impl PartialEq<&[u8]> for DynString {
    fn eq(&self, other: &&[u8]) -> bool {
        self.as_bytes() == *other
    }
}

impl PartialEq<DynString> for &[u8] {
    fn eq(&self, other: &DynString) -> bool {
        *self == other.as_bytes()
    }
}

impl<const N: usize> PartialEq<[u8; N]> for DynString {
    fn eq(&self, other: &[u8; N]) -> bool {
        self.as_bytes() == other
    }
}

impl<const N: usize> PartialEq<DynString> for [u8; N] {
    fn eq(&self, other: &DynString) -> bool {
        self == other.as_bytes()
    }
}

impl<const N: usize> PartialEq<&[u8; N]> for DynString {
    fn eq(&self, other: &&[u8; N]) -> bool {
        self.as_bytes() == *other
    }
}

impl PartialEq<str> for DynString {
    fn eq(&self, other: &str) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl PartialEq<DynString> for str {
    fn eq(&self, other: &DynString) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl PartialEq<&str> for DynString {
    fn eq(&self, other: &&str) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl PartialEq<DynString> for &str {
    fn eq(&self, other: &DynString) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl PartialEq<Vec<u8>> for DynString {
    fn eq(&self, other: &Vec<u8>) -> bool {
        self.as_bytes() == other.as_slice()
    }
}

impl PartialEq<DynString> for Vec<u8> {
    fn eq(&self, other: &DynString) -> bool {
        self.as_slice() == other.as_bytes()
    }
}

impl PartialOrd for DynString {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Lexicographic byte order over the content; the capacity is ignored, as it
/// is for equality.
impl Ord for DynString {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_bytes().cmp(other.as_bytes())
    }
}

impl Hash for DynString {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_bytes().hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn capacity_invariants(s: &DynString) {
        assert!(s.capacity() > s.len());
        assert_eq!(s.buf.len(), s.capacity());
        assert_eq!(s.buf[s.len], 0);
    }

    #[test]
    fn growth_doubles_past_requirement() {
        let mut s = DynString::new().unwrap();
        assert_eq!(s.capacity(), 1);

        s.append(b"abc").unwrap();
        assert_eq!(s.capacity(), 7);
        capacity_invariants(&s);

        // Still room for one more byte: 3 + 1 content, terminator at 4.
        s.push(b'd').unwrap();
        assert_eq!(s.capacity(), 7);

        s.append(b"efg").unwrap();
        assert_eq!(s.capacity(), 15);
        capacity_invariants(&s);
    }

    #[test]
    fn grow_for_is_noop_within_capacity() {
        let mut s = DynString::with_capacity(16).unwrap();
        s.grow_for(15).unwrap();
        assert_eq!(s.capacity(), 16);
        s.grow_for(16).unwrap();
        assert_eq!(s.capacity(), 33);
    }

    #[test]
    fn grow_for_overflow_reports_exhaustion() {
        let mut s = DynString::from_bytes(b"intact").unwrap();
        let before_cap = s.capacity();

        let err = s.grow_for(usize::MAX).unwrap_err();
        assert_eq!(
            err,
            Error::OutOfMemory {
                requested: usize::MAX
            }
        );
        assert_eq!(s.as_bytes(), b"intact");
        assert_eq!(s.capacity(), before_cap);
        capacity_invariants(&s);
    }

    #[test]
    fn set_capacity_zero_fills_new_slots() {
        let mut s = DynString::from_bytes(b"xy").unwrap();
        s.set_capacity_exact(10).unwrap();
        assert_eq!(&s.buf[..], b"xy\0\0\0\0\0\0\0\0");
    }

    #[test]
    fn joined_len_overflow_is_exhaustion() {
        let s = DynString::from_bytes(b"a").unwrap();
        assert_eq!(
            s.joined_len(usize::MAX),
            Err(Error::OutOfMemory {
                requested: usize::MAX
            })
        );
    }

    #[test]
    fn cut_moves_overlapping_ranges() {
        let mut s = DynString::from_bytes(b"abcdefgh").unwrap();
        s.cut(2, 5).unwrap();
        assert_eq!(s.as_bytes(), b"cdefg");
        capacity_invariants(&s);
    }

    #[test]
    fn prepend_shifts_existing_content() {
        let mut s = DynString::from_bytes(b"world").unwrap();
        s.prepend(b"hello ").unwrap();
        assert_eq!(s.as_bytes(), b"hello world");
        capacity_invariants(&s);
    }

    #[test]
    fn clone_uses_minimal_capacity() {
        let mut s = DynString::new().unwrap();
        s.reserve(64).unwrap();
        s.append(b"abc").unwrap();

        let copy = s.clone();
        assert_eq!(copy, s);
        assert_eq!(copy.capacity(), 4);
        capacity_invariants(&copy);
    }

    #[test]
    fn equality_ignores_capacity() {
        let a = DynString::from_bytes(b"same").unwrap();
        let mut b = DynString::with_capacity(100).unwrap();
        b.assign(b"same").unwrap();

        assert_eq!(a, b);
        assert_eq!(a, b"same");
        assert_eq!(a, "same");
        assert_ne!(a.capacity(), b.capacity());
    }
}
