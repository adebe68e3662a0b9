//! Domain commands.

use common::StreamName;

use crate::command::Command;

use super::{Domain, DomainName, GoogleVerificationToken, ManualLabel, RecordSet, ServiceId};

/// Command to register a new domain.
#[derive(Debug, Clone)]
pub struct RegisterDomain {
    /// The domain name to register.
    pub domain_name: DomainName,
}

impl RegisterDomain {
    /// Creates a new RegisterDomain command.
    pub fn new(domain_name: DomainName) -> Self {
        Self { domain_name }
    }
}

impl Command for RegisterDomain {
    type Aggregate = Domain;

    fn stream_name(&self) -> StreamName {
        self.domain_name.stream_name()
    }
}

/// Command to add a manual service to a domain.
#[derive(Debug, Clone)]
pub struct AddManualService {
    /// The domain to attach the service to.
    pub domain_name: DomainName,

    /// Caller-assigned service ID.
    pub service_id: ServiceId,

    /// Human-readable service label.
    pub label: ManualLabel,

    /// The validated records this service contributes.
    pub records: RecordSet,
}

impl AddManualService {
    /// Creates a new AddManualService command.
    pub fn new(
        domain_name: DomainName,
        service_id: ServiceId,
        label: ManualLabel,
        records: RecordSet,
    ) -> Self {
        Self {
            domain_name,
            service_id,
            label,
            records,
        }
    }
}

impl Command for AddManualService {
    type Aggregate = Domain;

    fn stream_name(&self) -> StreamName {
        self.domain_name.stream_name()
    }
}

/// Command to add a Google Suite service to a domain.
#[derive(Debug, Clone)]
pub struct AddGoogleSuiteService {
    /// The domain to attach the service to.
    pub domain_name: DomainName,

    /// Caller-assigned service ID.
    pub service_id: ServiceId,

    /// Site-verification token the records derive from.
    pub verification_token: GoogleVerificationToken,
}

impl AddGoogleSuiteService {
    /// Creates a new AddGoogleSuiteService command.
    pub fn new(
        domain_name: DomainName,
        service_id: ServiceId,
        verification_token: GoogleVerificationToken,
    ) -> Self {
        Self {
            domain_name,
            service_id,
            verification_token,
        }
    }
}

impl Command for AddGoogleSuiteService {
    type Aggregate = Domain;

    fn stream_name(&self) -> StreamName {
        self.domain_name.stream_name()
    }
}

/// Command to remove a service from a domain.
#[derive(Debug, Clone)]
pub struct RemoveService {
    /// The domain to remove the service from.
    pub domain_name: DomainName,

    /// The ID of the service to remove.
    pub service_id: ServiceId,
}

impl RemoveService {
    /// Creates a new RemoveService command.
    pub fn new(domain_name: DomainName, service_id: ServiceId) -> Self {
        Self {
            domain_name,
            service_id,
        }
    }
}

impl Command for RemoveService {
    type Aggregate = Domain;

    fn stream_name(&self) -> StreamName {
        self.domain_name.stream_name()
    }
}
