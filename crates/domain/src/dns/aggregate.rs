//! Domain aggregate implementation.

use std::collections::HashMap;

use common::StreamName;
use event_store::Version;
use serde::{Deserialize, Serialize};

use crate::aggregate::Aggregate;

use super::{
    DomainError, DomainEvent, DomainName, GoogleVerificationToken, ManualLabel, RecordSet,
    Service, ServiceId, ServiceType,
    events::{
        DomainWasCreatedData, GoogleSuiteWasAddedData, ManualWasAddedData,
        RecordSetWasUpdatedData, ServiceWasRemovedData,
    },
};

/// Domain aggregate root.
///
/// Holds the registered name, the map of attached services, and the current
/// derived record set. The record set always equals the union of the records
/// produced by every attached service; it is recomputed in full whenever the
/// service map changes, and overwritten verbatim on replay.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Domain {
    /// The registered domain name; set exactly once.
    name: Option<DomainName>,

    /// Current version for optimistic concurrency.
    #[serde(default)]
    version: Version,

    /// Attached services, keyed by service ID.
    services: HashMap<ServiceId, Service>,

    /// The derived record set, as of the last service mutation.
    record_set: RecordSet,
}

impl Aggregate for Domain {
    type Event = DomainEvent;
    type Error = DomainError;

    fn aggregate_type() -> &'static str {
        "Domain"
    }

    fn stream_name(&self) -> Option<StreamName> {
        self.name.as_ref().map(DomainName::stream_name)
    }

    fn version(&self) -> Version {
        self.version
    }

    fn set_version(&mut self, version: Version) {
        self.version = version;
    }

    fn apply(&mut self, event: Self::Event) {
        match event {
            DomainEvent::DomainWasCreated(data) => self.apply_domain_was_created(data),
            DomainEvent::ManualWasAdded(data) => self.apply_manual_was_added(data),
            DomainEvent::GoogleSuiteWasAdded(data) => self.apply_google_suite_was_added(data),
            DomainEvent::ServiceWasRemoved(data) => self.apply_service_was_removed(data),
            DomainEvent::RecordSetWasUpdated(data) => self.apply_record_set_was_updated(data),
        }
    }
}

// Query methods
impl Domain {
    /// Returns the registered domain name.
    pub fn name(&self) -> Option<&DomainName> {
        self.name.as_ref()
    }

    /// Returns all attached services with their IDs.
    pub fn services(&self) -> impl Iterator<Item = (&ServiceId, &Service)> {
        self.services.iter()
    }

    /// Returns a service by ID.
    pub fn get_service(&self, service_id: &ServiceId) -> Option<&Service> {
        self.services.get(service_id)
    }

    /// Returns the number of attached services.
    pub fn service_count(&self) -> usize {
        self.services.len()
    }

    /// Whether a Google Suite service is currently attached.
    pub fn has_google_suite(&self) -> bool {
        self.services
            .values()
            .any(|s| s.service_type() == ServiceType::GoogleSuite)
    }

    /// The current derived record set.
    pub fn record_set(&self) -> &RecordSet {
        &self.record_set
    }
}

// Command methods (decide)
impl Domain {
    /// Registers the domain. Only valid when the domain does not exist yet.
    pub fn register(&self, name: DomainName) -> Result<Vec<DomainEvent>, DomainError> {
        if self.name.is_some() {
            return Err(DomainError::AlreadyRegistered);
        }

        Ok(vec![DomainEvent::domain_was_created(name)])
    }

    /// Adds a manual service carrying caller-supplied records.
    pub fn add_manual(
        &self,
        service_id: ServiceId,
        label: ManualLabel,
        records: RecordSet,
    ) -> Result<Vec<DomainEvent>, DomainError> {
        let name = self.registered_name()?;
        self.ensure_service_id_free(&service_id)?;

        let service = Service::Manual {
            label: label.clone(),
            records: records.clone(),
        };

        Ok(vec![
            DomainEvent::manual_was_added(name.clone(), service_id, &label, records),
            self.record_set_after_insert(name, service_id, service),
        ])
    }

    /// Adds a Google Suite service deriving its records from the token.
    pub fn add_google_suite(
        &self,
        service_id: ServiceId,
        verification_token: GoogleVerificationToken,
    ) -> Result<Vec<DomainEvent>, DomainError> {
        let name = self.registered_name()?;
        self.ensure_service_id_free(&service_id)?;

        if self.has_google_suite() {
            return Err(DomainError::GoogleSuiteServiceAlreadyExists);
        }

        let service = Service::GoogleSuite {
            verification_token: verification_token.clone(),
        };

        Ok(vec![
            DomainEvent::google_suite_was_added(name.clone(), service_id, verification_token),
            self.record_set_after_insert(name, service_id, service),
        ])
    }

    /// Removes a service. Removing an unknown service ID is a silent no-op,
    /// not an error.
    pub fn remove_service(&self, service_id: ServiceId) -> Result<Vec<DomainEvent>, DomainError> {
        let name = self.registered_name()?;

        if !self.services.contains_key(&service_id) {
            return Ok(vec![]);
        }

        let mut remaining = self.services.clone();
        remaining.remove(&service_id);

        Ok(vec![
            DomainEvent::service_was_removed(name.clone(), service_id),
            DomainEvent::record_set_was_updated(name.clone(), Self::derive_record_set(&remaining)),
        ])
    }

    fn registered_name(&self) -> Result<&DomainName, DomainError> {
        self.name.as_ref().ok_or(DomainError::NotRegistered)
    }

    fn ensure_service_id_free(&self, service_id: &ServiceId) -> Result<(), DomainError> {
        if self.services.contains_key(service_id) {
            return Err(DomainError::ServiceAlreadyExists {
                service_id: *service_id,
            });
        }
        Ok(())
    }

    /// Builds the RecordSetWasUpdated event for the service map as it will
    /// look after inserting the given service.
    fn record_set_after_insert(
        &self,
        name: &DomainName,
        service_id: ServiceId,
        service: Service,
    ) -> DomainEvent {
        let mut next = self.services.clone();
        next.insert(service_id, service);
        DomainEvent::record_set_was_updated(name.clone(), Self::derive_record_set(&next))
    }

    /// The full recomputation: union of every service's current records.
    fn derive_record_set(services: &HashMap<ServiceId, Service>) -> RecordSet {
        services
            .values()
            .fold(RecordSet::empty(), |acc, service| {
                acc.union(&service.records())
            })
    }
}

// Event application (replay)
impl Domain {
    fn apply_domain_was_created(&mut self, data: DomainWasCreatedData) {
        self.name = Some(data.domain_name);
        self.services = HashMap::new();
        self.record_set = RecordSet::empty();
    }

    fn apply_manual_was_added(&mut self, data: ManualWasAddedData) {
        // The service is reconstructed from the event payload, never re-derived.
        self.services.insert(
            data.service_id,
            Service::Manual {
                label: ManualLabel::new(data.service_label),
                records: data.records,
            },
        );
    }

    fn apply_google_suite_was_added(&mut self, data: GoogleSuiteWasAddedData) {
        self.services.insert(
            data.service_id,
            Service::GoogleSuite {
                verification_token: data.verification_token,
            },
        );
    }

    fn apply_service_was_removed(&mut self, data: ServiceWasRemovedData) {
        self.services.remove(&data.service_id);
    }

    fn apply_record_set_was_updated(&mut self, data: RecordSetWasUpdatedData) {
        // Replay trusts the persisted record set verbatim.
        self.record_set = data.records;
    }
}
