//! # pt-core
//!
//! Core types, traits, and utilities for prodtrack.
//!
//! This crate provides the foundational building blocks used across all other crates:
//! - Common error types and the `PtResult` alias
//! - Record identifiers and calendar helpers (`RecordId`, `MonthKey`, `SiteClock`)
//! - Core traits (`Identifiable`)
//! - Configuration types

pub mod config;
pub mod error;
pub mod traits;
pub mod types;

pub use error::*;
pub use traits::*;
pub use types::*;
