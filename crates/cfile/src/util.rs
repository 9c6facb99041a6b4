//! Shared internal helpers for the libc boundary.

use std::ffi::{CString, c_int};
use std::os::unix::ffi::OsStrExt;
use std::path::Path;
use std::ptr::NonNull;

use cfile_core::OpenMode;

/// Convert a path to a C string byte-for-byte. `None` if it contains a NUL.
pub(crate) fn path_to_cstring(path: &Path) -> Option<CString> {
    CString::new(path.as_os_str().as_bytes()).ok()
}

/// Store `code` in the calling thread's `errno`.
pub(crate) fn set_errno(code: c_int) {
    #[cfg(any(target_os = "linux", target_os = "emscripten"))]
    unsafe {
        *libc::__errno_location() = code;
    }
    #[cfg(target_os = "android")]
    unsafe {
        *libc::__errno() = code;
    }
    #[cfg(any(
        target_os = "macos",
        target_os = "ios",
        target_os = "freebsd",
        target_os = "dragonfly"
    ))]
    unsafe {
        *libc::__error() = code;
    }
}

/// `fopen(path, mode)`.
///
/// A path or mode that cannot be expressed as a C string fails like the platform
/// would for a bad argument: no stream, `errno = EINVAL`.
pub(crate) fn open_stream(path: &Path, mode: &impl OpenMode) -> Option<NonNull<libc::FILE>> {
    let (Some(path), Some(mode)) = (path_to_cstring(path), mode.to_mode_cstr()) else {
        set_errno(libc::EINVAL);
        return None;
    };
    // SAFETY: both arguments are valid NUL-terminated strings.
    NonNull::new(unsafe { libc::fopen(path.as_ptr(), mode.as_ptr()) })
}
