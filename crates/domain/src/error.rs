//! Registry error types.

use event_store::EventStoreError;
use thiserror::Error;

use crate::dns::{DomainError, InvalidSecondLevelDomain, InvalidTopLevelDomain, RecordError};

/// Errors that can occur during registry operations.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// An error occurred in the event store.
    #[error("Event store error: {0}")]
    EventStore(#[from] EventStoreError),

    /// A command was rejected by the domain aggregate.
    #[error("Domain error: {0}")]
    Domain(DomainError),

    /// A record failed validation. The message is surfaced to callers
    /// verbatim, so no prefix.
    #[error(transparent)]
    InvalidRecord(#[from] RecordError),

    /// A second-level domain failed the DNS label rules.
    #[error(transparent)]
    InvalidSecondLevelDomain(#[from] InvalidSecondLevelDomain),

    /// A top-level domain is not supported.
    #[error(transparent)]
    InvalidTopLevelDomain(#[from] InvalidTopLevelDomain),

    /// Aggregate not found.
    #[error("Aggregate not found: {aggregate_type} with stream {stream_name}")]
    AggregateNotFound {
        aggregate_type: &'static str,
        stream_name: String,
    },

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
