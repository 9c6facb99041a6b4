//! # cfile-core
//!
//! Safe building blocks for the `cfile` stream wrapper.
//!
//! This crate models `fopen` access modes as a typed flag set and resolves them to
//! the mode strings the C library expects. No `unsafe` code is permitted at the
//! crate level; everything that touches a `FILE *` lives in the `cfile` crate.

#![deny(unsafe_code)]

pub mod error;
pub mod mode;

pub use error::ModeError;
pub use mode::{AccessMode, OpenMode};
