//! # pt-contracts
//!
//! Contract validation for prodtrack.
//!
//! Contracts validate a mutation's input against the current collections
//! before anything is written. A failed contract aborts the operation with
//! no side effects.

pub mod base;
pub mod off_days;
pub mod production;
pub mod users;

pub use base::*;
