//! Domain events.
//!
//! Payload shapes are persisted and must stay stable. Payloads carry no
//! wall-clock data so that replay is byte-deterministic; the envelope owns
//! the append timestamp.

use serde::{Deserialize, Serialize};

use crate::aggregate::AggregateEvent;

use super::record_set::RecordSet;
use super::service::{Service, ServiceType};
use super::value_objects::{DomainName, GoogleVerificationToken, ManualLabel, ServiceId};

/// Events that can occur on a domain aggregate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum DomainEvent {
    /// The domain was registered.
    DomainWasCreated(DomainWasCreatedData),

    /// A manual service was added.
    ManualWasAdded(ManualWasAddedData),

    /// A Google Suite service was added.
    GoogleSuiteWasAdded(GoogleSuiteWasAddedData),

    /// A service was removed.
    ServiceWasRemoved(ServiceWasRemovedData),

    /// The derived record set was recomputed.
    RecordSetWasUpdated(RecordSetWasUpdatedData),
}

impl AggregateEvent for DomainEvent {
    fn event_type(&self) -> &'static str {
        match self {
            DomainEvent::DomainWasCreated(_) => "DomainWasCreated",
            DomainEvent::ManualWasAdded(_) => "ManualWasAdded",
            DomainEvent::GoogleSuiteWasAdded(_) => "GoogleSuiteWasAdded",
            DomainEvent::ServiceWasRemoved(_) => "ServiceWasRemoved",
            DomainEvent::RecordSetWasUpdated(_) => "RecordSetWasUpdated",
        }
    }
}

/// Data for the DomainWasCreated event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainWasCreatedData {
    /// The registered domain name.
    pub domain_name: DomainName,
}

/// Data for the ManualWasAdded event.
///
/// Carries everything needed to reconstruct the service on replay without
/// consulting any other source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManualWasAddedData {
    pub domain_name: DomainName,
    pub service_id: ServiceId,
    pub service_type: ServiceType,
    pub service_label: String,
    pub records: RecordSet,
}

/// Data for the GoogleSuiteWasAdded event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoogleSuiteWasAddedData {
    pub domain_name: DomainName,
    pub service_id: ServiceId,
    pub verification_token: GoogleVerificationToken,
}

/// Data for the ServiceWasRemoved event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceWasRemovedData {
    pub domain_name: DomainName,
    pub service_id: ServiceId,
}

/// Data for the RecordSetWasUpdated event.
///
/// Holds the full recomputed record set, never a diff.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordSetWasUpdatedData {
    pub domain_name: DomainName,
    pub records: RecordSet,
}

// Convenience constructors for events
impl DomainEvent {
    /// Creates a DomainWasCreated event.
    pub fn domain_was_created(domain_name: DomainName) -> Self {
        DomainEvent::DomainWasCreated(DomainWasCreatedData { domain_name })
    }

    /// Creates a ManualWasAdded event.
    pub fn manual_was_added(
        domain_name: DomainName,
        service_id: ServiceId,
        label: &ManualLabel,
        records: RecordSet,
    ) -> Self {
        let service = Service::Manual {
            label: label.clone(),
            records: records.clone(),
        };
        DomainEvent::ManualWasAdded(ManualWasAddedData {
            domain_name,
            service_id,
            service_type: service.service_type(),
            service_label: service.display_label(),
            records,
        })
    }

    /// Creates a GoogleSuiteWasAdded event.
    pub fn google_suite_was_added(
        domain_name: DomainName,
        service_id: ServiceId,
        verification_token: GoogleVerificationToken,
    ) -> Self {
        DomainEvent::GoogleSuiteWasAdded(GoogleSuiteWasAddedData {
            domain_name,
            service_id,
            verification_token,
        })
    }

    /// Creates a ServiceWasRemoved event.
    pub fn service_was_removed(domain_name: DomainName, service_id: ServiceId) -> Self {
        DomainEvent::ServiceWasRemoved(ServiceWasRemovedData {
            domain_name,
            service_id,
        })
    }

    /// Creates a RecordSetWasUpdated event.
    pub fn record_set_was_updated(domain_name: DomainName, records: RecordSet) -> Self {
        DomainEvent::RecordSetWasUpdated(RecordSetWasUpdatedData {
            domain_name,
            records,
        })
    }
}
