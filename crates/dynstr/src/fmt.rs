//! Formatted rendering into [`DynString`] buffers.
//!
//! Two entry points cover the two capacity disciplines. [`DynString::format`]
//! builds a new string sized exactly to the rendered output by running the
//! arguments twice, first through a counting sink and then into the
//! freshly-sized buffer; `fmt::Arguments` is `Copy`, which is what makes the
//! second pass possible. [`DynString::write_truncated`] renders into an
//! existing buffer without reallocating, truncating at the capacity and
//! reporting the untruncated length, the contract C programmers know from
//! `vsnprintf`.

use core::fmt;

use crate::{
    error::{Error, Result},
    string::DynString,
};

/// Sink that measures the rendered length without storing anything.
struct CountingWriter {
    count: usize,
}

impl fmt::Write for CountingWriter {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.count = self.count.saturating_add(s.len());
        Ok(())
    }
}

/// Sink that fills a fixed slice and keeps counting after it is full.
///
/// Truncation is not an error: `write_str` always succeeds so the render
/// runs to completion and `required` ends up holding the full length.
struct TruncatingWriter<'a> {
    buf: &'a mut [u8],
    written: usize,
    required: usize,
}

impl fmt::Write for TruncatingWriter<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.required = self.required.saturating_add(s.len());
        let take = (self.buf.len() - self.written).min(s.len());
        if take > 0 {
            self.buf[self.written..self.written + take].copy_from_slice(&s.as_bytes()[..take]);
            self.written += take;
        }
        Ok(())
    }
}

impl DynString {
    /// Creates a string from format arguments, sized exactly to the rendered
    /// output with no surplus capacity.
    ///
    /// The [`format!`](crate::format!) macro is the usual front door:
    ///
    /// ```
    /// let s = dynstr::format!("{:05}!", 42)?;
    /// assert_eq!(&*s, b"00042!");
    /// assert_eq!(s.capacity(), s.len() + 1);
    /// # Ok::<(), dynstr::Error>(())
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`Error::Fmt`] if a formatting trait implementation fails,
    /// and [`Error::OutOfMemory`] if the allocator refuses the buffer.
    pub fn format(args: fmt::Arguments<'_>) -> Result<Self> {
        let mut counter = CountingWriter { count: 0 };
        fmt::write(&mut counter, args).map_err(|_| Error::Fmt)?;
        let required = counter.count;

        let capacity = required.checked_add(1).ok_or(Error::OutOfMemory {
            requested: usize::MAX,
        })?;
        let mut s = Self::with_capacity(capacity)?;
        let mut writer = TruncatingWriter {
            buf: &mut s.buf[..required],
            written: 0,
            required: 0,
        };
        fmt::write(&mut writer, args).map_err(|_| Error::Fmt)?;
        s.len = writer.written;
        Ok(s)
    }

    /// Renders format arguments into the existing buffer without growing it,
    /// truncating the stored content to `capacity() - 1` bytes if the output
    /// does not fit. Returns the length the full, untruncated rendering
    /// would have, so callers can detect truncation by comparing against
    /// [`len`](Self::len) and size a retry with [`reserve`](Self::reserve).
    ///
    /// The previous content is replaced whether or not truncation occurs.
    /// The capacity is read once at entry; the deliberate contrast with the
    /// growing mutators is that this never reallocates.
    ///
    /// ```
    /// use dynstr::DynString;
    ///
    /// let mut s = DynString::with_capacity(6)?;
    /// let required = s.write_truncated(format_args!("{}{}", "abc", "def"))?;
    /// assert_eq!(required, 6);
    /// assert_eq!(&*s, b"abcde");
    /// assert_eq!(s.len(), s.capacity() - 1);
    /// # Ok::<(), dynstr::Error>(())
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`Error::Fmt`] if a formatting trait implementation fails; in
    /// that case the stored content is the prefix rendered before the
    /// failure and the terminator invariant still holds.
    pub fn write_truncated(&mut self, args: fmt::Arguments<'_>) -> Result<usize> {
        let content_capacity = self.buf.len() - 1;
        let mut writer = TruncatingWriter {
            buf: &mut self.buf[..content_capacity],
            written: 0,
            required: 0,
        };
        let rendered = fmt::write(&mut writer, args);
        let (written, required) = (writer.written, writer.required);

        self.len = written;
        self.buf[written] = 0;
        match rendered {
            Ok(()) => Ok(required),
            Err(fmt::Error) => Err(Error::Fmt),
        }
    }
}

impl fmt::Debug for DynString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DynString")
            .field("len", &self.len())
            .field("capacity", &self.capacity())
            .field("content", &self.as_bstr())
            .finish()
    }
}

/// Renders the content like [`BStr`](bstr::BStr) does, substituting the
/// replacement character for invalid UTF-8.
impl fmt::Display for DynString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.as_bstr(), f)
    }
}

/// Growing append sink, so `write!(s, ...)` works on a [`DynString`].
///
/// The signature cannot carry an allocation error, so exhaustion surfaces as
/// [`fmt::Error`] instead of aborting.
impl fmt::Write for DynString {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.append(s.as_bytes()).map_err(|_| fmt::Error)
    }
}
