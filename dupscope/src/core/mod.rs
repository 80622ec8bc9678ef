//! Deterministic decision logic of the duplicate name check.
//!
//! Core modules perform no I/O of their own. Everything they need from the
//! outside world arrives through the traits in [`ports`].

pub mod duplicate;
pub mod error;
pub mod ports;
pub mod resolver;
pub mod rule;
pub mod scope_index;
pub mod types;
