//! Ownership and lifecycle of a [`CFile`].

use std::ffi::c_int;
use std::fmt;
use std::path::Path;
use std::ptr::{self, NonNull};

use cfile_core::OpenMode;

use crate::util::open_stream;

/// An exclusively owned C stdio stream.
///
/// A `CFile` either owns one open `FILE *` or is empty. It cannot be cloned; the
/// stream is closed exactly once, by [`reset`](Self::reset), [`fclose`](Self::fclose),
/// or `Drop`, unless ownership is given away with [`release`](Self::release).
///
/// Opening never fails loudly. Check the result:
///
/// ```no_run
/// use cfile::{AccessMode, CFile, NULL};
///
/// let file = CFile::open("/etc/hostname", AccessMode::READ);
/// if file == NULL {
///     eprintln!("open failed: {}", std::io::Error::last_os_error());
/// }
/// ```
pub struct CFile {
    stream: Option<NonNull<libc::FILE>>,
}

// SAFETY: a FILE is not bound to the thread that opened it and glibc serializes
// access per stream. Not `Sync`: every mutating call goes through `&mut self`.
unsafe impl Send for CFile {}

impl CFile {
    /// An empty instance that owns nothing.
    #[must_use]
    pub const fn new() -> Self {
        Self { stream: None }
    }

    /// Adopt an already-open stream. No validation is performed.
    ///
    /// # Safety
    ///
    /// `stream` must be a live `FILE *` obtained from the C library, and no other
    /// owner may close it afterwards.
    #[must_use]
    pub unsafe fn from_raw(stream: NonNull<libc::FILE>) -> Self {
        Self {
            stream: Some(stream),
        }
    }

    /// `fopen(path, mode)`. The result is empty if the platform refuses the open.
    #[must_use]
    pub fn open<P: AsRef<Path>, M: OpenMode>(path: P, mode: M) -> Self {
        Self {
            stream: open_stream(path.as_ref(), &mode),
        }
    }

    /// Move the stream out, leaving `self` empty.
    #[must_use]
    pub fn take(&mut self) -> Self {
        Self {
            stream: self.stream.take(),
        }
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.stream.is_some()
    }

    #[must_use]
    pub fn is_null(&self) -> bool {
        self.stream.is_none()
    }

    /// Give up ownership without closing. Returns the raw handle (null if empty).
    ///
    /// The caller becomes responsible for closing the stream.
    #[must_use = "the released stream leaks unless it is closed"]
    pub fn release(&mut self) -> *mut libc::FILE {
        self.stream.take().map_or(ptr::null_mut(), NonNull::as_ptr)
    }

    /// Close the owned stream, if any, and become empty.
    ///
    /// Returns the `fclose` status, or 0 when nothing was owned.
    pub fn reset(&mut self) -> c_int {
        match self.stream.take() {
            // SAFETY: we owned this live stream and have just forgotten it.
            Some(stream) => unsafe { libc::fclose(stream.as_ptr()) },
            None => 0,
        }
    }

    /// Close the owned stream, if any, then adopt `stream`.
    ///
    /// Returns the `fclose` status of the previous stream, or 0 when nothing was owned.
    ///
    /// # Safety
    ///
    /// Same contract as [`from_raw`](Self::from_raw); in particular `stream` must not
    /// be the handle `self` currently owns.
    pub unsafe fn reset_with(&mut self, stream: NonNull<libc::FILE>) -> c_int {
        debug_assert_ne!(self.stream, Some(stream), "reset_with on the owned stream");
        let status = self.reset();
        self.stream = Some(stream);
        status
    }

    /// The raw handle without transferring ownership (null if empty).
    #[must_use]
    pub fn get(&self) -> *mut libc::FILE {
        self.stream.map_or(ptr::null_mut(), NonNull::as_ptr)
    }

    #[must_use]
    pub fn as_non_null(&self) -> Option<NonNull<libc::FILE>> {
        self.stream
    }

    /// Run `f` on the owned handle, or report `EBADF` and return `on_empty`.
    pub(crate) fn forward<R>(&self, on_empty: R, f: impl FnOnce(*mut libc::FILE) -> R) -> R {
        match self.stream {
            Some(stream) => f(stream.as_ptr()),
            None => {
                crate::util::set_errno(libc::EBADF);
                on_empty
            }
        }
    }

    pub(crate) fn set_stream(&mut self, stream: Option<NonNull<libc::FILE>>) {
        self.stream = stream;
    }
}

impl Default for CFile {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for CFile {
    fn drop(&mut self) {
        // The close status has nowhere to go; call `reset` first to observe it.
        let _ = self.reset();
    }
}

impl fmt::Debug for CFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.stream {
            Some(stream) => f.debug_tuple("CFile").field(&stream).finish(),
            None => f.write_str("CFile(NULL)"),
        }
    }
}

/// The empty-stream sentinel for comparisons: `file == NULL`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Null;

/// Compare a [`CFile`] against this to test whether it owns a stream.
pub const NULL: Null = Null;

impl PartialEq<Null> for CFile {
    fn eq(&self, _: &Null) -> bool {
        self.is_null()
    }
}

impl PartialEq<CFile> for Null {
    fn eq(&self, other: &CFile) -> bool {
        other.is_null()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_empty_and_equals_null() {
        let file = CFile::default();
        assert!(file.is_null());
        assert!(!file.is_open());
        assert!(file == NULL);
        assert!(NULL == file);
        assert!(file.get().is_null());
        assert_eq!(format!("{file:?}"), "CFile(NULL)");
    }

    #[test]
    fn empty_release_and_reset_are_noops() {
        let mut file = CFile::new();
        assert!(file.release().is_null());
        assert_eq!(file.reset(), 0);
        assert!(file.take().is_null());
    }

    #[test]
    fn forward_on_empty_returns_fallback() {
        let file = CFile::new();
        let called = file.forward(-7, |_| 1);
        assert_eq!(called, -7);
        assert_eq!(
            std::io::Error::last_os_error().raw_os_error(),
            Some(libc::EBADF)
        );
    }

    #[test]
    fn open_dev_null_owns_a_stream() {
        let mut file = CFile::open("/dev/null", "r");
        assert!(file != NULL);
        assert!(format!("{file:?}").starts_with("CFile(0x"));
        assert_eq!(file.reset(), 0);
        assert!(file == NULL);
    }
}
