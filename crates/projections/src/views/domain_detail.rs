//! Domain detail read model — per-domain services and the flattened record set.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use common::StreamName;
use domain::{DomainEvent, Record, ServiceId, ServiceType};
use event_store::EventEnvelope;
use tokio::sync::RwLock;

use crate::Result;
use crate::projection::{Projection, ProjectionPosition};
use crate::read_model::ReadModel;

/// A service attached to a domain, as shown in the detail view.
#[derive(Debug, Clone)]
pub struct ServiceDetail {
    pub service_id: ServiceId,
    pub service_type: ServiceType,
    pub label: String,
}

/// Full detail of a single domain: its services and current record set.
#[derive(Debug, Clone)]
pub struct DomainDetail {
    pub stream_name: StreamName,
    pub domain_name: String,
    pub services: HashMap<ServiceId, ServiceDetail>,
    pub records: Vec<Record>,
    pub registered_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Read model view exposing the full state of each domain.
///
/// The record list mirrors the RecordSetWasUpdated payloads verbatim, so
/// it always reflects the aggregate's own recomputation.
#[derive(Clone)]
pub struct DomainDetailView {
    domains: Arc<RwLock<HashMap<StreamName, DomainDetail>>>,
    position: Arc<RwLock<ProjectionPosition>>,
}

impl DomainDetailView {
    /// Creates a new empty domain detail view.
    pub fn new() -> Self {
        Self {
            domains: Arc::new(RwLock::new(HashMap::new())),
            position: Arc::new(RwLock::new(ProjectionPosition::zero())),
        }
    }

    /// Gets the detail for a specific domain.
    pub async fn get_domain(&self, stream_name: &StreamName) -> Option<DomainDetail> {
        self.domains.read().await.get(stream_name).cloned()
    }

    /// Gets a single service attached to a domain.
    pub async fn get_service(
        &self,
        stream_name: &StreamName,
        service_id: &ServiceId,
    ) -> Option<ServiceDetail> {
        self.domains
            .read()
            .await
            .get(stream_name)
            .and_then(|d| d.services.get(service_id).cloned())
    }

    /// Gets the current records for a domain.
    pub async fn get_records(&self, stream_name: &StreamName) -> Vec<Record> {
        self.domains
            .read()
            .await
            .get(stream_name)
            .map(|d| d.records.clone())
            .unwrap_or_default()
    }
}

impl Default for DomainDetailView {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Projection for DomainDetailView {
    fn name(&self) -> &'static str {
        "DomainDetailView"
    }

    async fn handle(&self, event: &EventEnvelope) -> Result<()> {
        if event.aggregate_type != "Domain" {
            let mut pos = self.position.write().await;
            *pos = pos.advance();
            return Ok(());
        }

        let domain_event: DomainEvent = serde_json::from_value(event.payload.clone())?;

        let mut domains = self.domains.write().await;

        match domain_event {
            DomainEvent::DomainWasCreated(data) => {
                domains.insert(
                    event.stream_name.clone(),
                    DomainDetail {
                        stream_name: event.stream_name.clone(),
                        domain_name: data.domain_name.to_string(),
                        services: HashMap::new(),
                        records: Vec::new(),
                        registered_at: event.timestamp,
                        updated_at: event.timestamp,
                    },
                );
            }
            DomainEvent::ManualWasAdded(data) => {
                if let Some(domain) = domains.get_mut(&event.stream_name) {
                    domain.services.insert(
                        data.service_id,
                        ServiceDetail {
                            service_id: data.service_id,
                            service_type: data.service_type,
                            label: data.service_label,
                        },
                    );
                    domain.updated_at = event.timestamp;
                }
            }
            DomainEvent::GoogleSuiteWasAdded(data) => {
                if let Some(domain) = domains.get_mut(&event.stream_name) {
                    domain.services.insert(
                        data.service_id,
                        ServiceDetail {
                            service_id: data.service_id,
                            service_type: ServiceType::GoogleSuite,
                            label: "Google Suite".to_string(),
                        },
                    );
                    domain.updated_at = event.timestamp;
                }
            }
            DomainEvent::ServiceWasRemoved(data) => {
                if let Some(domain) = domains.get_mut(&event.stream_name) {
                    domain.services.remove(&data.service_id);
                    domain.updated_at = event.timestamp;
                }
            }
            DomainEvent::RecordSetWasUpdated(data) => {
                if let Some(domain) = domains.get_mut(&event.stream_name) {
                    domain.records = data.records.iter().cloned().collect();
                    domain.updated_at = event.timestamp;
                }
            }
        }

        let mut pos = self.position.write().await;
        *pos = pos.advance();

        Ok(())
    }

    async fn position(&self) -> ProjectionPosition {
        *self.position.read().await
    }

    async fn reset(&self) -> Result<()> {
        self.domains.write().await.clear();
        *self.position.write().await = ProjectionPosition::zero();
        Ok(())
    }
}

impl ReadModel for DomainDetailView {
    fn name(&self) -> &'static str {
        "DomainDetailView"
    }

    fn count(&self) -> usize {
        // try_read avoids blocking; reports 0 while the lock is held
        self.domains.try_read().map(|d| d.len()).unwrap_or(0)
    }
}
