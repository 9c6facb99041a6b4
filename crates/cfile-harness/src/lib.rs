//! Conformance harness for cfile.
//!
//! This crate provides:
//! - Scenarios: executable checks of the `CFile` ownership and I/O contract
//! - Runner: executes scenarios against a scratch directory and records outcomes
//! - Mode table: machine-readable dump of every `AccessMode` resolution
//! - Structured logging: JSONL records for every scenario outcome

#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod mode_table;
pub mod runner;
pub mod scenarios;
pub mod structured_log;

pub use config::HarnessConfig;
pub use error::HarnessError;
pub use runner::{RunSummary, ScenarioResult, ScenarioRunner};
