//! The DNS domain aggregate and related types.

mod aggregate;
mod commands;
mod events;
mod record;
mod record_set;
mod registry;
mod service;
mod value_objects;

pub use aggregate::Domain;
pub use commands::*;
pub use events::{
    DomainEvent, DomainWasCreatedData, GoogleSuiteWasAddedData, ManualWasAddedData,
    RecordSetWasUpdatedData, ServiceWasRemovedData,
};
pub use record::{Record, RecordError, RecordLabel, RecordType, RecordValue, TimeToLive};
pub use record_set::RecordSet;
pub use registry::DomainRegistry;
pub use service::{Service, ServiceType};
pub use value_objects::{
    DomainName, GoogleVerificationToken, InvalidSecondLevelDomain, InvalidTopLevelDomain,
    ManualLabel, SecondLevelDomain, ServiceId, TopLevelDomain,
};

use thiserror::Error;

/// Errors that can occur during domain aggregate operations.
#[derive(Debug, Error)]
pub enum DomainError {
    /// The domain is already registered.
    #[error("Domain is already registered")]
    AlreadyRegistered,

    /// The domain has not been registered yet.
    #[error("Domain is not registered")]
    NotRegistered,

    /// A service with the same ID is already attached.
    #[error("Service with id {service_id} already exists")]
    ServiceAlreadyExists { service_id: ServiceId },

    /// A Google Suite service is already attached.
    #[error("A Google Suite service already exists for this domain")]
    GoogleSuiteServiceAlreadyExists,
}
