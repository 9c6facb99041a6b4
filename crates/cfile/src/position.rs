//! Opaque saved stream positions for `fgetpos`/`fsetpos`.

use std::fmt;
use std::mem::MaybeUninit;

/// A stream position saved by [`CFile::fgetpos`](crate::CFile::fgetpos).
///
/// Wraps the platform `fpos_t`, which may carry multibyte conversion state in
/// addition to the byte offset. Only meaningful for the stream it came from.
pub struct FilePosition(MaybeUninit<libc::fpos_t>);

impl FilePosition {
    /// A position slot to be filled by `fgetpos`.
    #[must_use]
    pub fn new() -> Self {
        Self(MaybeUninit::zeroed())
    }

    pub(crate) fn as_mut_ptr(&mut self) -> *mut libc::fpos_t {
        self.0.as_mut_ptr()
    }

    pub(crate) fn as_ptr(&self) -> *const libc::fpos_t {
        self.0.as_ptr()
    }
}

impl Default for FilePosition {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for FilePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilePosition").finish_non_exhaustive()
    }
}
