//! Domain list read model — one summary row per registered domain.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use common::StreamName;
use domain::DomainEvent;
use event_store::EventEnvelope;
use tokio::sync::RwLock;

use crate::Result;
use crate::projection::{Projection, ProjectionPosition};
use crate::read_model::ReadModel;

/// Summary of a registered domain in the list view.
#[derive(Debug, Clone)]
pub struct DomainSummary {
    pub stream_name: StreamName,
    pub domain_name: String,
    pub service_count: usize,
    pub record_count: usize,
    pub registered_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Read model view listing every registered domain with headline counts.
#[derive(Clone)]
pub struct DomainListView {
    domains: Arc<RwLock<HashMap<StreamName, DomainSummary>>>,
    position: Arc<RwLock<ProjectionPosition>>,
}

impl DomainListView {
    /// Creates a new empty domain list view.
    pub fn new() -> Self {
        Self {
            domains: Arc::new(RwLock::new(HashMap::new())),
            position: Arc::new(RwLock::new(ProjectionPosition::zero())),
        }
    }

    /// Gets the summary for a specific domain.
    pub async fn get_domain(&self, stream_name: &StreamName) -> Option<DomainSummary> {
        self.domains.read().await.get(stream_name).cloned()
    }

    /// Gets all registered domains, sorted by domain name.
    pub async fn get_all_domains(&self) -> Vec<DomainSummary> {
        let mut domains: Vec<_> = self.domains.read().await.values().cloned().collect();
        domains.sort_by(|a, b| a.domain_name.cmp(&b.domain_name));
        domains
    }
}

impl Default for DomainListView {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Projection for DomainListView {
    fn name(&self) -> &'static str {
        "DomainListView"
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
                    DomainSummary {
                        stream_name: event.stream_name.clone(),
                        domain_name: data.domain_name.to_string(),
                        service_count: 0,
                        record_count: 0,
                        registered_at: event.timestamp,
                        updated_at: event.timestamp,
                    },
                );
            }
            DomainEvent::ManualWasAdded(_) | DomainEvent::GoogleSuiteWasAdded(_) => {
                if let Some(domain) = domains.get_mut(&event.stream_name) {
                    domain.service_count += 1;
                    domain.updated_at = event.timestamp;
                }
            }
            DomainEvent::ServiceWasRemoved(_) => {
                if let Some(domain) = domains.get_mut(&event.stream_name) {
                    domain.service_count = domain.service_count.saturating_sub(1);
                    domain.updated_at = event.timestamp;
                }
            }
            DomainEvent::RecordSetWasUpdated(data) => {
                if let Some(domain) = domains.get_mut(&event.stream_name) {
                    domain.record_count = data.records.len();
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

impl ReadModel for DomainListView {
    fn name(&self) -> &'static str {
        "DomainListView"
    }

    fn count(&self) -> usize {
        // try_read avoids blocking; reports 0 while the lock is held
        self.domains.try_read().map(|d| d.len()).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::{
        AggregateEvent, DomainName, ManualLabel, Record, RecordSet, RecordType, ServiceId,
    };
    use event_store::Version;

    fn make_envelope(stream_name: &StreamName, version: i64, event: &DomainEvent) -> EventEnvelope {
        EventEnvelope::builder()
            .stream_name(stream_name.clone())
            .aggregate_type("Domain")
            .event_type(event.event_type())
            .version(Version::new(version))
            .payload(event)
            .unwrap()
            .build()
    }

    fn example_com() -> DomainName {
        DomainName::parse("example.com").unwrap()
    }

    fn sample_records() -> RecordSet {
        [
            Record::new(RecordType::A, "@", "1.2.3.4", 3600).unwrap(),
            Record::new(RecordType::Mx, "@", "10 mail.example.com.", 3600).unwrap(),
        ]
        .into_iter()
        .collect()
    }

    #[tokio::test]
    async fn test_domain_registration_creates_summary() {
        let view = DomainListView::new();
        let stream = example_com().stream_name();

        let event = DomainEvent::domain_was_created(example_com());
        view.handle(&make_envelope(&stream, 1, &event)).await.unwrap();

        let summary = view.get_domain(&stream).await.unwrap();
        assert_eq!(summary.domain_name, "example.com");
        assert_eq!(summary.service_count, 0);
        assert_eq!(summary.record_count, 0);
    }

    #[tokio::test]
    async fn test_service_and_record_counts_follow_events() {
        let view = DomainListView::new();
        let stream = example_com().stream_name();
        let service_id = ServiceId::new();

        let created = DomainEvent::domain_was_created(example_com());
        view.handle(&make_envelope(&stream, 1, &created))
            .await
            .unwrap();

        let added = DomainEvent::manual_was_added(
            example_com(),
            service_id,
            &ManualLabel::new("primary"),
            sample_records(),
        );
        view.handle(&make_envelope(&stream, 2, &added)).await.unwrap();

        let updated = DomainEvent::record_set_was_updated(example_com(), sample_records());
        view.handle(&make_envelope(&stream, 3, &updated))
            .await
            .unwrap();

        let summary = view.get_domain(&stream).await.unwrap();
        assert_eq!(summary.service_count, 1);
        assert_eq!(summary.record_count, 2);

        let removed = DomainEvent::service_was_removed(example_com(), service_id);
        view.handle(&make_envelope(&stream, 4, &removed))
            .await
            .unwrap();
        let emptied = DomainEvent::record_set_was_updated(example_com(), RecordSet::empty());
        view.handle(&make_envelope(&stream, 5, &emptied))
            .await
            .unwrap();

        let summary = view.get_domain(&stream).await.unwrap();
        assert_eq!(summary.service_count, 0);
        assert_eq!(summary.record_count, 0);
    }

    #[tokio::test]
    async fn test_all_domains_sorted_by_name() {
        let view = DomainListView::new();
        for name in ["zulu.org", "alpha.be"] {
            let domain_name = DomainName::parse(name).unwrap();
            let stream = domain_name.stream_name();
            let event = DomainEvent::domain_was_created(domain_name);
            view.handle(&make_envelope(&stream, 1, &event)).await.unwrap();
        }

        let all = view.get_all_domains().await;
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].domain_name, "alpha.be");
        assert_eq!(all[1].domain_name, "zulu.org");
    }

    #[tokio::test]
    async fn test_skips_foreign_aggregate_types() {
        let view = DomainListView::new();

        let envelope = EventEnvelope::builder()
            .stream_name(StreamName::new("example.com"))
            .aggregate_type("Zone")
            .event_type("ZoneTransferred")
            .version(Version::new(1))
            .payload_raw(serde_json::json!({"zone": "example.com"}))
            .build();

        view.handle(&envelope).await.unwrap();
        assert!(view.get_all_domains().await.is_empty());
        assert_eq!(view.position().await.events_processed, 1);
    }

    #[tokio::test]
    async fn test_reset_clears_state_and_position() {
        let view = DomainListView::new();
        let stream = example_com().stream_name();

        let event = DomainEvent::domain_was_created(example_com());
        view.handle(&make_envelope(&stream, 1, &event)).await.unwrap();
        assert_eq!(view.get_all_domains().await.len(), 1);

        view.reset().await.unwrap();

        assert!(view.get_all_domains().await.is_empty());
        assert_eq!(view.position().await.events_processed, 0);
    }
}
