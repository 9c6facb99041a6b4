//! Variadic formatted I/O through the C format mini-language.
//!
//! `fprintf!` and `fscanf!` hand a C format string and argument list to libc
//! untouched, so conversions behave exactly as in C. Both expand to an unsafe call:
//! wrap them in `unsafe` and make sure every argument matches its conversion
//! specifier.

/// `fprintf` on a [`CFile`](crate::CFile).
///
/// ```no_run
/// use std::ffi::c_int;
/// use cfile::{CFile, fprintf};
///
/// let file = CFile::tmpfile();
/// let written = unsafe { fprintf!(file, c"%d-%s\n", 42 as c_int, c"ok".as_ptr()) };
/// assert_eq!(written, 6);
/// ```
///
/// Returns what `fprintf` returns; an empty stream yields `EOF` with `errno = EBADF`.
#[macro_export]
macro_rules! fprintf {
    ($stream:expr, $format:expr $(, $arg:expr)* $(,)?) => {
        match $crate::CFile::as_non_null(&$stream) {
            ::core::option::Option::Some(fp) => $crate::__private::libc::fprintf(
                fp.as_ptr(),
                ::core::ffi::CStr::as_ptr($format)
                $(, $arg)*
            ),
            ::core::option::Option::None => $crate::__private::closed_stream_eof(),
        }
    };
}

/// `fscanf` on a [`CFile`](crate::CFile). Pass output arguments as raw pointers.
///
/// Returns what `fscanf` returns; an empty stream yields `EOF` with `errno = EBADF`.
#[macro_export]
macro_rules! fscanf {
    ($stream:expr, $format:expr $(, $arg:expr)* $(,)?) => {
        match $crate::CFile::as_non_null(&$stream) {
            ::core::option::Option::Some(fp) => $crate::__private::libc::fscanf(
                fp.as_ptr(),
                ::core::ffi::CStr::as_ptr($format)
                $(, $arg)*
            ),
            ::core::option::Option::None => $crate::__private::closed_stream_eof(),
        }
    };
}
