//! Error types for mode handling.

use thiserror::Error;

/// Failure to turn an access mode into (or out of) an `fopen` mode string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModeError {
    #[error("access mode flags {bits:#07b} do not name an fopen mode")]
    InvalidCombination { bits: u8 },
    #[error("unrecognized fopen mode string {0:?}")]
    UnknownModeString(String),
}
