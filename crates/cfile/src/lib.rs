//! # cfile
//!
//! Exclusive-ownership wrapper around a C stdio `FILE *`.
//!
//! [`CFile`] owns at most one open stream and closes it when dropped. Every stdio
//! operation is a direct call into the platform C library: return values, `EOF`
//! sentinels and `errno` are exactly what libc reports, and nothing is retried,
//! logged, or translated.
//!
//! # Architecture
//!
//! ```text
//! caller -> CFile method -> libc stdio primitive -> return code
//!              |
//!              +-> AccessMode / raw string -> mode string (cfile-core)
//! ```
//!
//! One deviation from raw stdio: an operation on an empty `CFile` never hands a
//! null `FILE *` to libc. It returns the primitive's failure value and sets
//! `errno` to `EBADF`.

mod adapters;
mod fs;
mod io;
mod macros;
mod position;
mod stream;
mod util;

pub use cfile_core::{AccessMode, ModeError, OpenMode};
pub use position::FilePosition;
pub use stream::{CFile, NULL, Null};

/// Items used by the exported macros. Not part of the public API.
#[doc(hidden)]
pub mod __private {
    pub use libc;

    /// Failure value for a formatted call on an empty stream.
    pub fn closed_stream_eof() -> std::ffi::c_int {
        crate::util::set_errno(libc::EBADF);
        libc::EOF
    }
}
