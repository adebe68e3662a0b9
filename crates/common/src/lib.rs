//! Shared identity types for the DNS registry.

pub mod types;

pub use types::StreamName;
