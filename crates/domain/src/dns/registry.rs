//! Registry facade providing a simplified API for domain operations.

use common::StreamName;
use event_store::EventStore;

use crate::aggregate::Aggregate;
use crate::command::{Command, CommandHandler, CommandResult};
use crate::error::RegistryError;

use super::{
    AddGoogleSuiteService, AddManualService, Domain, DomainError, RegisterDomain, RemoveService,
};

impl From<DomainError> for RegistryError {
    fn from(e: DomainError) -> Self {
        RegistryError::Domain(e)
    }
}

/// Service for managing domains.
///
/// Provides a high-level API for domain operations, wrapping the command
/// handler and providing convenient methods for common operations.
pub struct DomainRegistry<S: EventStore> {
    handler: CommandHandler<S, Domain>,
}

impl<S: EventStore> DomainRegistry<S> {
    /// Creates a new registry with the given event store.
    pub fn new(store: S) -> Self {
        Self {
            handler: CommandHandler::new(store),
        }
    }

    /// Returns a reference to the underlying command handler.
    pub fn handler(&self) -> &CommandHandler<S, Domain> {
        &self.handler
    }

    /// Registers a new domain.
    ///
    /// Rejects re-registration up front; the aggregate enforces the same
    /// invariant from its own state.
    #[tracing::instrument(skip(self))]
    pub async fn register(
        &self,
        cmd: RegisterDomain,
    ) -> Result<CommandResult<Domain>, RegistryError> {
        let stream = cmd.stream_name();

        if self.handler.exists(&stream).await? {
            return Err(DomainError::AlreadyRegistered.into());
        }

        metrics::counter!("domain_commands_total", "command" => "register").increment(1);

        let domain_name = cmd.domain_name;
        self.handler
            .execute(&stream, |domain| domain.register(domain_name))
            .await
    }

    /// Adds a manual service to a domain.
    #[tracing::instrument(skip(self))]
    pub async fn add_manual(
        &self,
        cmd: AddManualService,
    ) -> Result<CommandResult<Domain>, RegistryError> {
        metrics::counter!("domain_commands_total", "command" => "add_manual").increment(1);

        self.handler
            .execute(&cmd.stream_name(), |domain| {
                domain.add_manual(cmd.service_id, cmd.label.clone(), cmd.records.clone())
            })
            .await
    }

    /// Adds a Google Suite service to a domain.
    #[tracing::instrument(skip(self))]
    pub async fn add_google_suite(
        &self,
        cmd: AddGoogleSuiteService,
    ) -> Result<CommandResult<Domain>, RegistryError> {
        metrics::counter!("domain_commands_total", "command" => "add_google_suite").increment(1);

        self.handler
            .execute(&cmd.stream_name(), |domain| {
                domain.add_google_suite(cmd.service_id, cmd.verification_token.clone())
            })
            .await
    }

    /// Removes a service from a domain.
    ///
    /// Fails with a not-found error when the domain itself is unknown.
    /// Removing a service ID the domain does not hold produces no events.
    #[tracing::instrument(skip(self))]
    pub async fn remove_service(
        &self,
        cmd: RemoveService,
    ) -> Result<CommandResult<Domain>, RegistryError> {
        let stream = cmd.stream_name();

        if !self.handler.exists(&stream).await? {
            return Err(RegistryError::AggregateNotFound {
                aggregate_type: Domain::aggregate_type(),
                stream_name: stream.to_string(),
            });
        }

        metrics::counter!("domain_commands_total", "command" => "remove_service").increment(1);

        self.handler
            .execute(&stream, |domain| domain.remove_service(cmd.service_id))
            .await
    }

    /// Loads a domain by its stream name.
    ///
    /// Returns None if the domain doesn't exist.
    #[tracing::instrument(skip(self))]
    pub async fn get_domain(&self, stream: &StreamName) -> Result<Option<Domain>, RegistryError> {
        self.handler.load_existing(stream).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dns::{
        DomainName, GoogleVerificationToken, ManualLabel, Record, RecordSet, RecordType, ServiceId,
    };
    use event_store::{InMemoryEventStore, Version};

    fn example_com() -> DomainName {
        DomainName::parse("example.com").unwrap()
    }

    fn manual_records() -> RecordSet {
        [Record::new(RecordType::A, "@", "1.2.3.4", 3600).unwrap()]
            .into_iter()
            .collect()
    }

    async fn registered(registry: &DomainRegistry<InMemoryEventStore>) {
        registry
            .register(RegisterDomain::new(example_com()))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_register_domain() {
        let registry = DomainRegistry::new(InMemoryEventStore::new());

        let result = registry
            .register(RegisterDomain::new(example_com()))
            .await
            .unwrap();

        assert_eq!(result.events.len(), 1);
        assert_eq!(result.new_version, Version::first());
        assert_eq!(result.aggregate.name(), Some(&example_com()));
    }

    #[tokio::test]
    async fn test_register_twice_is_rejected() {
        let registry = DomainRegistry::new(InMemoryEventStore::new());
        registered(&registry).await;

        let result = registry.register(RegisterDomain::new(example_com())).await;
        assert!(matches!(
            result,
            Err(RegistryError::Domain(DomainError::AlreadyRegistered))
        ));
    }

    #[tokio::test]
    async fn test_add_manual_service() {
        let registry = DomainRegistry::new(InMemoryEventStore::new());
        registered(&registry).await;

        let result = registry
            .add_manual(AddManualService::new(
                example_com(),
                ServiceId::new(),
                ManualLabel::new("primary"),
                manual_records(),
            ))
            .await
            .unwrap();

        assert_eq!(result.events.len(), 2);
        assert_eq!(result.new_version, Version::new(3));
        assert_eq!(result.aggregate.record_set(), &manual_records());
    }

    #[tokio::test]
    async fn test_google_suite_uniqueness() {
        let registry = DomainRegistry::new(InMemoryEventStore::new());
        registered(&registry).await;

        registry
            .add_google_suite(AddGoogleSuiteService::new(
                example_com(),
                ServiceId::new(),
                GoogleVerificationToken::new("tok1"),
            ))
            .await
            .unwrap();

        let result = registry
            .add_google_suite(AddGoogleSuiteService::new(
                example_com(),
                ServiceId::new(),
                GoogleVerificationToken::new("tok2"),
            ))
            .await;

        assert!(matches!(
            result,
            Err(RegistryError::Domain(
                DomainError::GoogleSuiteServiceAlreadyExists
            ))
        ));
    }

    #[tokio::test]
    async fn test_remove_service_lifecycle() {
        let registry = DomainRegistry::new(InMemoryEventStore::new());
        registered(&registry).await;

        let service_id = ServiceId::new();
        registry
            .add_manual(AddManualService::new(
                example_com(),
                service_id,
                ManualLabel::new("primary"),
                manual_records(),
            ))
            .await
            .unwrap();

        let result = registry
            .remove_service(RemoveService::new(example_com(), service_id))
            .await
            .unwrap();

        assert_eq!(result.events.len(), 2);
        assert!(result.aggregate.record_set().is_empty());
        assert_eq!(result.aggregate.service_count(), 0);
    }

    #[tokio::test]
    async fn test_remove_unknown_service_produces_no_events() {
        let registry = DomainRegistry::new(InMemoryEventStore::new());
        registered(&registry).await;

        let before = registry
            .get_domain(&example_com().stream_name())
            .await
            .unwrap()
            .unwrap();

        let result = registry
            .remove_service(RemoveService::new(example_com(), ServiceId::new()))
            .await
            .unwrap();

        assert!(result.events.is_empty());
        assert_eq!(result.aggregate, before);
    }

    #[tokio::test]
    async fn test_remove_on_unknown_domain_is_not_found() {
        let registry = DomainRegistry::new(InMemoryEventStore::new());

        let result = registry
            .remove_service(RemoveService::new(example_com(), ServiceId::new()))
            .await;

        assert!(matches!(
            result,
            Err(RegistryError::AggregateNotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_get_domain() {
        let registry = DomainRegistry::new(InMemoryEventStore::new());

        let missing = registry
            .get_domain(&example_com().stream_name())
            .await
            .unwrap();
        assert!(missing.is_none());

        registered(&registry).await;

        let found = registry
            .get_domain(&example_com().stream_name())
            .await
            .unwrap();
        assert!(found.is_some());
    }

    #[tokio::test]
    async fn test_reload_matches_in_memory_state() {
        let registry = DomainRegistry::new(InMemoryEventStore::new());
        registered(&registry).await;

        let result = registry
            .add_google_suite(AddGoogleSuiteService::new(
                example_com(),
                ServiceId::new(),
                GoogleVerificationToken::new("tok"),
            ))
            .await
            .unwrap();

        let reloaded = registry
            .get_domain(&example_com().stream_name())
            .await
            .unwrap()
            .unwrap();

        assert_eq!(reloaded, result.aggregate);
    }
}
