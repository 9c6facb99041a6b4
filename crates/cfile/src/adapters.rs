//! `std::io` and fd interop for [`CFile`].
//!
//! These sit on top of the stdio primitives, so they share the stream's buffer
//! with direct calls like [`CFile::fgetc`]. Failures surface as
//! `io::Error::last_os_error()`.

use std::io::{self, Read, Seek, SeekFrom, Write};
use std::os::fd::{AsRawFd, RawFd};

use crate::stream::CFile;

fn not_open() -> io::Error {
    io::Error::from_raw_os_error(libc::EBADF)
}

impl Read for CFile {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.is_null() {
            return Err(not_open());
        }
        // The error indicator is sticky; only a failure of this read counts.
        self.clearerr();
        let n = self.read_items(buf);
        if n < buf.len() && self.ferror() != 0 {
            let err = io::Error::last_os_error();
            self.clearerr();
            if n == 0 {
                return Err(err);
            }
        }
        Ok(n)
    }
}

impl Write for CFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.is_null() {
            return Err(not_open());
        }
        let n = self.write_items(buf);
        if n == 0 && !buf.is_empty() {
            let err = io::Error::last_os_error();
            self.clearerr();
            return Err(err);
        }
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        if self.is_null() {
            return Err(not_open());
        }
        if self.fflush() != 0 {
            return Err(io::Error::last_os_error());
        }
        Ok(())
    }
}

impl Seek for CFile {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        let (offset, whence) = match pos {
            SeekFrom::Start(n) => (
                i64::try_from(n).map_err(|_| io::Error::from(io::ErrorKind::InvalidInput))?,
                libc::SEEK_SET,
            ),
            SeekFrom::Current(n) => (n, libc::SEEK_CUR),
            SeekFrom::End(n) => (n, libc::SEEK_END),
        };
        let Some(fp) = self.as_non_null() else {
            return Err(not_open());
        };
        let fp = fp.as_ptr();
        // SAFETY: fp is the live stream owned by self.
        if unsafe { libc::fseeko(fp, offset as libc::off_t, whence) } != 0 {
            return Err(io::Error::last_os_error());
        }
        // SAFETY: as above.
        let now = unsafe { libc::ftello(fp) };
        u64::try_from(now).map_err(|_| io::Error::last_os_error())
    }
}

impl AsRawFd for CFile {
    /// The underlying descriptor, or -1 when empty.
    fn as_raw_fd(&self) -> RawFd {
        self.fileno()
    }
}
