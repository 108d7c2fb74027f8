//! # pt-api
//!
//! JSON HTTP API for prodtrack.
//!
//! Handlers act as the user of the stored session and delegate to
//! `pt-services`; errors are rendered as `{ "_type": "Error", ... }`.

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod routes;

pub use extractors::AppState;
pub use routes::router;
