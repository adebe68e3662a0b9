//! Domain layer for the DNS registry.
//!
//! This crate provides the core domain abstractions including:
//! - Aggregate trait for event-sourced entities
//! - AggregateEvent trait for domain events
//! - Command trait and CommandHandler for command processing
//! - The Domain aggregate with its record validation grammar

pub mod aggregate;
pub mod command;
pub mod dns;
pub mod error;

pub use aggregate::{Aggregate, AggregateEvent};
pub use command::{Command, CommandHandler, CommandResult};
pub use dns::{
    AddGoogleSuiteService, AddManualService, Domain, DomainError, DomainEvent, DomainName,
    DomainRegistry, DomainWasCreatedData, GoogleSuiteWasAddedData, GoogleVerificationToken,
    InvalidSecondLevelDomain, InvalidTopLevelDomain, ManualLabel, ManualWasAddedData, Record,
    RecordError, RecordLabel, RecordSet, RecordSetWasUpdatedData, RecordType, RecordValue,
    RegisterDomain, RemoveService, SecondLevelDomain, Service, ServiceId, ServiceType,
    ServiceWasRemovedData, TimeToLive, TopLevelDomain,
};
pub use error::RegistryError;
