//! FleetPulse domain types and the device health engine.
//!
//! This crate is pure: no I/O, no async, no ambient clock. Every health
//! computation takes an already-materialized device snapshot plus an
//! explicit `now` timestamp, so results are deterministic and the same
//! snapshot always produces the same output.

pub mod device;
pub mod error;
pub mod health;
pub mod types;
