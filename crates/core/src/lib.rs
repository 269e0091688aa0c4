//! `shringar-core` -- booking domain types and pure business logic.
//!
//! Nothing in this crate performs I/O. Callers fetch bookings, artists and
//! settings from the hosted database, normalise them into these types and
//! hand them to [`availability`] and [`payout`].

pub mod artist;
pub mod availability;
pub mod booking;
pub mod error;
pub mod payout;
pub mod types;
