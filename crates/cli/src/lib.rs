//! `shringar-cli` library crate.
//!
//! Loads a snapshot exported from the hosted booking database, normalises it
//! into `shringar_core` types and renders assignment and payout reports. The
//! binary entrypoint lives in `main.rs`.

pub mod config;
pub mod error;
pub mod report;
pub mod snapshot;
