//! Path-level stdio operations that need no open stream.

use std::ffi::{CString, c_int};
use std::path::Path;
use std::ptr::NonNull;

use crate::stream::CFile;
use crate::util::{path_to_cstring, set_errno};

/// Directory `tmpnam` draws names from (glibc `P_tmpdir`).
const P_TMPDIR: &str = "/tmp";

impl CFile {
    /// `perror`: print `message`, a colon, and the text for the current `errno` to
    /// standard error. A message with an interior NUL is cut at the NUL.
    pub fn perror(message: &str) {
        let bytes: Vec<u8> = message.bytes().take_while(|&b| b != 0).collect();
        // SAFETY: `bytes` stops before the first NUL.
        let message = unsafe { CString::from_vec_unchecked(bytes) };
        // SAFETY: valid NUL-terminated string.
        unsafe { libc::perror(message.as_ptr()) };
    }

    /// `remove`. Returns 0 on success, nonzero with `errno` set on failure.
    pub fn remove<P: AsRef<Path>>(path: P) -> c_int {
        let Some(path) = path_to_cstring(path.as_ref()) else {
            set_errno(libc::EINVAL);
            return -1;
        };
        // SAFETY: valid NUL-terminated string.
        unsafe { libc::remove(path.as_ptr()) }
    }

    /// `rename`. Returns 0 on success, nonzero with `errno` set on failure.
    pub fn rename<P: AsRef<Path>, Q: AsRef<Path>>(old: P, new: Q) -> c_int {
        let (Some(old), Some(new)) = (path_to_cstring(old.as_ref()), path_to_cstring(new.as_ref()))
        else {
            set_errno(libc::EINVAL);
            return -1;
        };
        // SAFETY: valid NUL-terminated strings.
        unsafe { libc::rename(old.as_ptr(), new.as_ptr()) }
    }

    /// `tmpfile`: an anonymous `wb+` stream removed automatically when closed.
    ///
    /// Empty if the platform cannot create one.
    #[must_use]
    pub fn tmpfile() -> Self {
        // SAFETY: tmpfile returns either null or a fresh stream we now own.
        match NonNull::new(unsafe { libc::tmpfile() }) {
            Some(stream) => unsafe { Self::from_raw(stream) },
            None => Self::new(),
        }
    }

    /// A path name in the temporary directory that names no existing file.
    ///
    /// Unlike C `tmpnam` there is no shared static buffer: the name is reserved
    /// with `mkstemp`, then the placeholder is removed. As with `tmpnam`, another
    /// process may claim the name before the caller uses it.
    #[must_use]
    pub fn tmpnam() -> Option<CString> {
        let template = CString::new(format!("{P_TMPDIR}/cfileXXXXXX")).ok()?;
        let mut bytes = template.into_bytes_with_nul();
        // SAFETY: `bytes` is a writable NUL-terminated template ending in XXXXXX.
        let fd = unsafe { libc::mkstemp(bytes.as_mut_ptr().cast()) };
        if fd < 0 {
            return None;
        }
        // SAFETY: fd was just returned by mkstemp; bytes now holds its path.
        unsafe {
            libc::close(fd);
            libc::unlink(bytes.as_ptr().cast());
        }
        bytes.pop();
        CString::new(bytes).ok()
    }
}
