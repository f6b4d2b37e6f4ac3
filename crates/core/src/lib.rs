//! # Slotbook Core
//!
//! Domain types and the availability engine for the Slotbook appointment
//! service. Nothing in this crate performs I/O: the database and HTTP crates
//! fetch profiles and bookings, then hand plain values to [`engine`].
//!
//! - [`models`]: profiles, appointments, time-of-day values and derived
//!   availability shapes
//! - [`engine`]: template expansion and occupancy resolution
//! - [`validation`]: template and profile checks run before anything is stored
//! - [`dates`]: calendar-date parsing and day bounds

pub mod dates;
pub mod engine;
pub mod errors;
pub mod models;
pub mod validation;
