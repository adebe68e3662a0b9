//! HTTP route handlers.

pub mod domains;
pub mod health;
pub mod metrics;
