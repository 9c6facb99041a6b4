//! Access modes for `fopen`/`freopen`.
//!
//! [`AccessMode`] is a composable flag set. Exactly twelve combinations name an
//! `fopen` mode string; every other combination is a programming error. Callers
//! that need a mode the flags cannot express pass a raw string instead, through
//! the [`OpenMode`] trait.

use std::borrow::Cow;
use std::ffi::{CStr, CString};
use std::fmt;
use std::ops::{BitOr, BitOrAssign};
use std::str::FromStr;

use crate::error::ModeError;

const R: u8 = 0b0000_0001;
const W: u8 = 0b0000_0010;
const A: u8 = 0b0000_0100;
const B: u8 = 0b0000_1000;
const X: u8 = 0b0001_0000;

const ALL_BITS: u8 = R | W | A | B | X;

// Valid combinations, named for use as match patterns.
const RX: u8 = R | X;
const WX: u8 = W | X;
const AX: u8 = A | X;
const RB: u8 = R | B;
const WB: u8 = W | B;
const AB: u8 = A | B;
const RBX: u8 = R | B | X;
const WBX: u8 = W | B | X;
const ABX: u8 = A | B | X;

/// Symbolic `fopen` access mode.
///
/// Combine flags with `|`:
///
/// ```
/// use cfile_core::AccessMode;
///
/// let mode = AccessMode::READ | AccessMode::BINARY | AccessMode::EXTENDED;
/// assert_eq!(mode.mode_str(), Some("rb+"));
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct AccessMode(u8);

impl AccessMode {
    /// Open for reading (`r`).
    pub const READ: Self = Self(R);
    /// Truncate or create for writing (`w`).
    pub const WRITE: Self = Self(W);
    /// Append, creating if needed (`a`).
    pub const APPEND: Self = Self(A);
    /// Binary stream (`b`).
    pub const BINARY: Self = Self(B);
    /// Update mode: both reading and writing (`+`).
    pub const EXTENDED: Self = Self(X);

    /// Every flag combination that resolves to a mode string, in table order.
    pub const ALL_VALID: [Self; 12] = [
        Self(R),
        Self(W),
        Self(A),
        Self(RX),
        Self(WX),
        Self(AX),
        Self(RB),
        Self(WB),
        Self(AB),
        Self(RBX),
        Self(WBX),
        Self(ABX),
    ];

    /// Raw flag bits.
    #[must_use]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Build from raw bits. Returns `None` if any undefined bit is set.
    #[must_use]
    pub const fn from_bits(bits: u8) -> Option<Self> {
        if bits & !ALL_BITS == 0 {
            Some(Self(bits))
        } else {
            None
        }
    }

    /// Build from raw bits, dropping undefined ones.
    #[must_use]
    pub const fn from_bits_truncate(bits: u8) -> Self {
        Self(bits & ALL_BITS)
    }

    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// True if every flag in `other` is also set in `self`.
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// True if this combination resolves to a mode string.
    #[must_use]
    pub const fn is_valid(self) -> bool {
        self.as_cstr().is_some()
    }

    /// The NUL-terminated mode string for this combination, if it has one.
    #[must_use]
    pub const fn as_cstr(self) -> Option<&'static CStr> {
        let s = match self.0 {
            R => c"r",
            W => c"w",
            A => c"a",
            RX => c"r+",
            WX => c"w+",
            AX => c"a+",
            RB => c"rb",
            WB => c"wb",
            AB => c"ab",
            RBX => c"rb+",
            WBX => c"wb+",
            ABX => c"ab+",
            _ => return None,
        };
        Some(s)
    }

    /// The mode string for this combination, if it has one.
    #[must_use]
    pub fn mode_str(self) -> Option<&'static str> {
        self.as_cstr().and_then(|s| s.to_str().ok())
    }

    /// Like [`as_cstr`](Self::as_cstr), reporting the bad bits on failure.
    pub fn try_mode_str(self) -> Result<&'static CStr, ModeError> {
        self.as_cstr()
            .ok_or(ModeError::InvalidCombination { bits: self.0 })
    }

    /// Resolve for an open call.
    ///
    /// An invalid combination is a caller bug: debug builds panic, release builds
    /// get `None` and the open is skipped.
    #[must_use]
    pub fn resolve(self) -> Option<&'static CStr> {
        let resolved = self.as_cstr();
        debug_assert!(
            resolved.is_some(),
            "access mode flags {:#07b} do not name an fopen mode",
            self.0
        );
        resolved
    }

    /// Parse a canonical mode string back into flags.
    ///
    /// Accepts the twelve strings [`as_cstr`](Self::as_cstr) produces, plus the
    /// `r+b` spelling of the binary update modes.
    pub fn parse(s: &str) -> Result<Self, ModeError> {
        let bits = match s {
            "r" => R,
            "w" => W,
            "a" => A,
            "r+" => RX,
            "w+" => WX,
            "a+" => AX,
            "rb" => RB,
            "wb" => WB,
            "ab" => AB,
            "rb+" | "r+b" => RBX,
            "wb+" | "w+b" => WBX,
            "ab+" | "a+b" => ABX,
            _ => return Err(ModeError::UnknownModeString(s.to_owned())),
        };
        Ok(Self(bits))
    }
}

impl BitOr for AccessMode {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

impl BitOrAssign for AccessMode {
    fn bitor_assign(&mut self, rhs: Self) {
        *self = self.union(rhs);
    }
}

impl FromStr for AccessMode {
    type Err = ModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for AccessMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mode_str().unwrap_or("<invalid>"))
    }
}

impl fmt::Debug for AccessMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AccessMode({:#07b} = {self})", self.0)
    }
}

/// A value usable as the mode argument of `fopen`/`freopen`.
///
/// Implemented for the symbolic [`AccessMode`] and for raw strings. Raw strings
/// pass through unchanged, so platform extensions such as `"wx"` or `"re"` stay
/// reachable.
pub trait OpenMode {
    /// The NUL-terminated mode string, or `None` when there is none to pass.
    fn to_mode_cstr(&self) -> Option<Cow<'_, CStr>>;
}

impl OpenMode for AccessMode {
    fn to_mode_cstr(&self) -> Option<Cow<'_, CStr>> {
        self.resolve().map(Cow::Borrowed)
    }
}

impl OpenMode for str {
    fn to_mode_cstr(&self) -> Option<Cow<'_, CStr>> {
        CString::new(self).ok().map(Cow::Owned)
    }
}

impl OpenMode for String {
    fn to_mode_cstr(&self) -> Option<Cow<'_, CStr>> {
        self.as_str().to_mode_cstr()
    }
}

impl OpenMode for CStr {
    fn to_mode_cstr(&self) -> Option<Cow<'_, CStr>> {
        Some(Cow::Borrowed(self))
    }
}

impl OpenMode for CString {
    fn to_mode_cstr(&self) -> Option<Cow<'_, CStr>> {
        Some(Cow::Borrowed(self.as_c_str()))
    }
}

impl<T: OpenMode + ?Sized> OpenMode for &T {
    fn to_mode_cstr(&self) -> Option<Cow<'_, CStr>> {
        (**self).to_mode_cstr()
    }
}
