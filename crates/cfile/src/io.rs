//! Stream operations forwarded to libc stdio.
//!
//! Each method calls the stdio primitive of the same name on the owned handle and
//! returns its result unchanged. On an empty [`CFile`] the primitive is not
//! called; the method returns that primitive's failure value with `errno = EBADF`.

use std::ffi::{CStr, c_char, c_int, c_long, c_void};
use std::fmt;
use std::path::Path;

use bytemuck::Pod;
use cfile_core::OpenMode;

use crate::position::FilePosition;
use crate::stream::CFile;
use crate::util::{open_stream, path_to_cstring, set_errno};

// ---------------------------------------------------------------------------
// File access
// ---------------------------------------------------------------------------

impl CFile {
    /// `fopen` into an empty instance.
    ///
    /// Calling this on an instance that already owns a stream is a bug: debug
    /// builds panic, release builds keep the current stream and open nothing.
    pub fn fopen<P: AsRef<Path>, M: OpenMode>(&mut self, path: P, mode: M) -> &mut Self {
        debug_assert!(self.is_null(), "fopen on a CFile that already owns a stream");
        if self.is_null() {
            self.set_stream(open_stream(path.as_ref(), &mode));
        }
        self
    }

    /// `freopen`: reuse the owned stream for `path` opened with `mode`.
    ///
    /// On failure the original stream is closed and the instance is empty. An empty
    /// instance simply opens `path`.
    pub fn freopen<P: AsRef<Path>, M: OpenMode>(&mut self, path: P, mode: M) -> &mut Self {
        let Some(current) = self.as_non_null() else {
            self.set_stream(open_stream(path.as_ref(), &mode));
            return self;
        };
        let (Some(path), Some(mode)) = (path_to_cstring(path.as_ref()), mode.to_mode_cstr()) else {
            self.reset();
            set_errno(libc::EINVAL);
            return self;
        };
        // SAFETY: `current` is owned and live; freopen consumes it either way.
        let reopened = unsafe { libc::freopen(path.as_ptr(), mode.as_ptr(), current.as_ptr()) };
        self.set_stream(std::ptr::NonNull::new(reopened));
        self
    }

    /// `fclose`. The instance is empty afterwards, whatever the status.
    pub fn fclose(&mut self) -> c_int {
        if self.is_null() {
            set_errno(libc::EBADF);
            return libc::EOF;
        }
        self.reset()
    }

    /// `fflush`.
    pub fn fflush(&mut self) -> c_int {
        self.forward(libc::EOF, |fp| unsafe { libc::fflush(fp) })
    }

    /// `setbuf`. A null `buffer` makes the stream unbuffered.
    ///
    /// # Safety
    ///
    /// A non-null `buffer` must point to at least `BUFSIZ` writable bytes that
    /// outlive the stream.
    pub unsafe fn setbuf(&mut self, buffer: *mut c_char) {
        self.forward((), |fp| unsafe { libc::setbuf(fp, buffer) });
    }

    /// `setvbuf(stream, NULL, _IONBF, 0)`.
    pub fn set_unbuffered(&mut self) -> c_int {
        self.forward(libc::EOF, |fp| unsafe {
            libc::setvbuf(fp, std::ptr::null_mut(), libc::_IONBF, 0)
        })
    }

    /// `setvbuf` with a buffer of `size` bytes allocated by the C library.
    ///
    /// `mode` is one of `_IOFBF`, `_IOLBF`, `_IONBF`.
    pub fn set_buffering(&mut self, mode: c_int, size: usize) -> c_int {
        self.forward(libc::EOF, |fp| unsafe {
            libc::setvbuf(fp, std::ptr::null_mut(), mode, size)
        })
    }

    /// Fully buffer through `buffer` (`BUFSIZ` bytes), or disable buffering when
    /// `buffer` is null.
    ///
    /// # Safety
    ///
    /// Same contract as [`setbuf`](Self::setbuf).
    pub unsafe fn setvbuf_full(&mut self, buffer: *mut c_char) -> c_int {
        if buffer.is_null() {
            return self.set_unbuffered();
        }
        unsafe { self.setvbuf(buffer, libc::_IOFBF, libc::BUFSIZ as usize) }
    }

    /// `setvbuf`.
    ///
    /// # Safety
    ///
    /// A non-null `buffer` must point to `size` writable bytes that outlive the
    /// stream.
    pub unsafe fn setvbuf(&mut self, buffer: *mut c_char, mode: c_int, size: usize) -> c_int {
        self.forward(libc::EOF, |fp| unsafe { libc::setvbuf(fp, buffer, mode, size) })
    }
}

// ---------------------------------------------------------------------------
// Direct input/output
// ---------------------------------------------------------------------------

impl CFile {
    /// `fread`: read up to `count` elements of `size` bytes.
    ///
    /// # Safety
    ///
    /// `buffer` must be valid for writes of `size * count` bytes.
    pub unsafe fn fread(&mut self, buffer: *mut c_void, size: usize, count: usize) -> usize {
        self.forward(0, |fp| unsafe { libc::fread(buffer, size, count, fp) })
    }

    /// `fwrite`: write `count` elements of `size` bytes.
    ///
    /// # Safety
    ///
    /// `buffer` must be valid for reads of `size * count` bytes.
    pub unsafe fn fwrite(&mut self, buffer: *const c_void, size: usize, count: usize) -> usize {
        self.forward(0, |fp| unsafe { libc::fwrite(buffer, size, count, fp) })
    }

    /// `fread(items, size_of::<T>(), items.len())`. Returns whole elements read.
    pub fn read_items<T: Pod>(&mut self, items: &mut [T]) -> usize {
        let count = items.len();
        // SAFETY: the slice covers exactly size_of::<T>() * count writable bytes,
        // and any byte pattern is a valid T.
        unsafe { self.fread(items.as_mut_ptr().cast(), size_of::<T>(), count) }
    }

    /// `fwrite(items, size_of::<T>(), items.len())`. Returns whole elements written.
    pub fn write_items<T: Pod>(&mut self, items: &[T]) -> usize {
        let count = items.len();
        // SAFETY: the slice covers exactly size_of::<T>() * count readable bytes.
        unsafe { self.fwrite(items.as_ptr().cast(), size_of::<T>(), count) }
    }
}

// ---------------------------------------------------------------------------
// Unformatted input/output
// ---------------------------------------------------------------------------

impl CFile {
    /// `fgetc`.
    #[must_use]
    pub fn fgetc(&mut self) -> c_int {
        self.forward(libc::EOF, |fp| unsafe { libc::fgetc(fp) })
    }

    /// `fgets` into `buffer`; returns the line read, including its newline.
    ///
    /// `None` on end of file or error, like a null return from `fgets`.
    pub fn fgets<'a>(&mut self, buffer: &'a mut [u8]) -> Option<&'a CStr> {
        if buffer.is_empty() {
            return None;
        }
        let count = c_int::try_from(buffer.len()).unwrap_or(c_int::MAX);
        let line = self.forward(std::ptr::null_mut(), |fp| unsafe {
            libc::fgets(buffer.as_mut_ptr().cast(), count, fp)
        });
        if line.is_null() {
            return None;
        }
        CStr::from_bytes_until_nul(buffer).ok()
    }

    /// `fputc`.
    pub fn fputc(&mut self, character: c_int) -> c_int {
        self.forward(libc::EOF, |fp| unsafe { libc::fputc(character, fp) })
    }

    /// `fputs`.
    pub fn fputs(&mut self, text: &CStr) -> c_int {
        self.forward(libc::EOF, |fp| unsafe { libc::fputs(text.as_ptr(), fp) })
    }

    /// `ungetc`.
    pub fn ungetc(&mut self, character: c_int) -> c_int {
        self.forward(libc::EOF, |fp| unsafe { libc::ungetc(character, fp) })
    }
}

// ---------------------------------------------------------------------------
// Formatted output
// ---------------------------------------------------------------------------

impl CFile {
    /// Write Rust-formatted text, with `fprintf`'s return contract: the number of
    /// bytes written, or a negative value on failure.
    ///
    /// For the C format mini-language use [`fprintf!`](crate::fprintf).
    pub fn print_fmt(&mut self, args: fmt::Arguments<'_>) -> c_int {
        let text = match args.as_str() {
            Some(s) => std::borrow::Cow::Borrowed(s),
            None => std::borrow::Cow::Owned(args.to_string()),
        };
        let bytes = text.as_bytes();
        if self.is_null() {
            set_errno(libc::EBADF);
            return -1;
        }
        if self.write_items(bytes) != bytes.len() {
            return -1;
        }
        c_int::try_from(bytes.len()).unwrap_or(c_int::MAX)
    }
}

// ---------------------------------------------------------------------------
// File positioning
// ---------------------------------------------------------------------------

impl CFile {
    /// `ftell`.
    #[must_use]
    pub fn ftell(&mut self) -> c_long {
        self.forward(-1, |fp| unsafe { libc::ftell(fp) })
    }

    /// `fgetpos`: store the current position in `position`.
    pub fn fgetpos(&mut self, position: &mut FilePosition) -> c_int {
        self.forward(-1, |fp| unsafe { libc::fgetpos(fp, position.as_mut_ptr()) })
    }

    /// `fseek`. `origin` is `SEEK_SET`, `SEEK_CUR` or `SEEK_END`.
    pub fn fseek(&mut self, offset: c_long, origin: c_int) -> c_int {
        self.forward(-1, |fp| unsafe { libc::fseek(fp, offset, origin) })
    }

    /// `fsetpos`: return to a position saved by [`fgetpos`](Self::fgetpos).
    pub fn fsetpos(&mut self, position: &FilePosition) -> c_int {
        self.forward(-1, |fp| unsafe { libc::fsetpos(fp, position.as_ptr()) })
    }

    /// `rewind`.
    pub fn rewind(&mut self) {
        self.forward((), |fp| unsafe { libc::rewind(fp) });
    }
}

// ---------------------------------------------------------------------------
// Error handling
// ---------------------------------------------------------------------------

impl CFile {
    /// `clearerr`.
    pub fn clearerr(&mut self) {
        self.forward((), |fp| unsafe { libc::clearerr(fp) });
    }

    /// `feof`. An empty instance reports 0.
    #[must_use]
    pub fn feof(&self) -> c_int {
        self.forward(0, |fp| unsafe { libc::feof(fp) })
    }

    /// `ferror`. An empty instance reports nonzero.
    #[must_use]
    pub fn ferror(&self) -> c_int {
        self.forward(1, |fp| unsafe { libc::ferror(fp) })
    }

    /// `fileno`.
    #[must_use]
    pub fn fileno(&self) -> c_int {
        self.forward(-1, |fp| unsafe { libc::fileno(fp) })
    }
}
