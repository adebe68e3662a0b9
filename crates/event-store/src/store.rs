use std::pin::Pin;

use async_trait::async_trait;
use futures_core::Stream;

use crate::{EventEnvelope, Result, StreamName, Version};

/// Options for appending events to the store.
#[derive(Debug, Clone, Default)]
pub struct AppendOptions {
    /// Expected version of the stream for optimistic concurrency control.
    /// If None, no version check is performed (use with caution).
    pub expected_version: Option<Version>,
}

impl AppendOptions {
    /// Creates options with no version check.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options expecting the stream to be at a specific version.
    pub fn expect_version(version: Version) -> Self {
        Self {
            expected_version: Some(version),
        }
    }

    /// Creates options expecting the stream to not exist yet.
    pub fn expect_new() -> Self {
        Self {
            expected_version: Some(Version::initial()),
        }
    }
}

/// A stream of events.
pub type EventStream = Pin<Box<dyn Stream<Item = Result<EventEnvelope>> + Send>>;

/// Core trait for event store implementations.
///
/// An event store is responsible for persisting and retrieving events.
/// All implementations must be thread-safe (Send + Sync).
#[async_trait]
pub trait EventStore: Send + Sync {
    /// Appends events to the store.
    ///
    /// Events are appended atomically - either all succeed or none do.
    /// If `options.expected_version` is set, the operation will fail with
    /// `ConcurrencyConflict` if the current version doesn't match.
    ///
    /// Returns the new version of the stream after appending.
    async fn append(&self, events: Vec<EventEnvelope>, options: AppendOptions) -> Result<Version>;

    /// Retrieves all events for a specific stream.
    ///
    /// Events are returned in version order (oldest first).
    async fn get_events_for_stream(&self, stream_name: &StreamName) -> Result<Vec<EventEnvelope>>;

    /// Streams all events in the store, across all streams.
    ///
    /// Events are returned in insertion order.
    async fn stream_all_events(&self) -> Result<EventStream>;

    /// Gets the current version of a stream.
    ///
    /// Returns None if the stream doesn't exist.
    async fn get_stream_version(&self, stream_name: &StreamName) -> Result<Option<Version>>;
}

/// Extension trait providing convenience methods for event stores.
#[async_trait]
pub trait EventStoreExt: EventStore {
    /// Appends a single event to the store.
    async fn append_event(&self, event: EventEnvelope, options: AppendOptions) -> Result<Version> {
        self.append(vec![event], options).await
    }

    /// Checks if a stream exists (has any events).
    async fn stream_exists(&self, stream_name: &StreamName) -> Result<bool> {
        Ok(self.get_stream_version(stream_name).await?.is_some())
    }

    /// Loads a stream's events along with its current version.
    async fn read_stream(
        &self,
        stream_name: &StreamName,
    ) -> Result<(Vec<EventEnvelope>, Version)> {
        let events = self.get_events_for_stream(stream_name).await?;
        let version = events
            .last()
            .map(|e| e.version)
            .unwrap_or_else(Version::initial);
        Ok((events, version))
    }
}

// Blanket implementation for all EventStore implementations
impl<T: EventStore + ?Sized> EventStoreExt for T {}

/// Error returned when building an invalid event batch for appending.
#[derive(Debug, Clone)]
pub struct AppendValidationError {
    pub message: String,
}

impl std::fmt::Display for AppendValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Append validation error: {}", self.message)
    }
}

impl std::error::Error for AppendValidationError {}

/// Validates events before appending.
pub fn validate_events_for_append(
    events: &[EventEnvelope],
) -> std::result::Result<(), AppendValidationError> {
    if events.is_empty() {
        return Err(AppendValidationError {
            message: "Cannot append empty event list".to_string(),
        });
    }

    // All events must belong to the same stream
    let first = &events[0];
    for event in events.iter().skip(1) {
        if event.stream_name != first.stream_name {
            return Err(AppendValidationError {
                message: "All events must be for the same stream".to_string(),
            });
        }
        if event.aggregate_type != first.aggregate_type {
            return Err(AppendValidationError {
                message: "All events must have the same aggregate type".to_string(),
            });
        }
    }

    // Versions must be sequential
    let mut expected_version = first.version;
    for event in events.iter().skip(1) {
        expected_version = expected_version.next();
        if event.version != expected_version {
            return Err(AppendValidationError {
                message: format!(
                    "Event versions must be sequential. Expected {}, got {}",
                    expected_version, event.version
                ),
            });
        }
    }

    Ok(())
}
