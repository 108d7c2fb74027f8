//! API request handlers

pub mod dashboard;
pub mod entries;
pub mod logs;
pub mod off_days;
pub mod session;
pub mod sync;
pub mod users;
