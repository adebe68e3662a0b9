//! Identity value types for domains and services.

use common::StreamName;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use super::record::validate_label;

/// Error raised when a second-level domain fails the DNS label rules.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Second level domain must be a legal dns label.")]
pub struct InvalidSecondLevelDomain;

/// Error raised when a top-level domain is not in the supported set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{value}' is not a supported top level domain.")]
pub struct InvalidTopLevelDomain {
    pub value: String,
}

/// The second-level part of a domain name (`example` in `example.com`).
///
/// Follows the DNS label rules. Deserialization bypasses validation so
/// persisted events replay verbatim.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SecondLevelDomain(String);

impl SecondLevelDomain {
    /// Validates and creates a second-level domain.
    pub fn new(name: impl Into<String>) -> Result<Self, InvalidSecondLevelDomain> {
        let name = name.into();
        validate_label(&name).map_err(|_| InvalidSecondLevelDomain)?;
        Ok(Self(name))
    }

    /// Returns the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SecondLevelDomain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The closed set of top-level domains the registry supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TopLevelDomain {
    Be,
    Com,
    Eu,
    Net,
    Org,
    Vlaanderen,
}

impl TopLevelDomain {
    /// All supported top-level domains.
    pub const ALL: [TopLevelDomain; 6] = [
        TopLevelDomain::Be,
        TopLevelDomain::Com,
        TopLevelDomain::Eu,
        TopLevelDomain::Net,
        TopLevelDomain::Org,
        TopLevelDomain::Vlaanderen,
    ];

    /// Returns the stable wire name of the top-level domain.
    pub fn as_str(&self) -> &'static str {
        match self {
            TopLevelDomain::Be => "be",
            TopLevelDomain::Com => "com",
            TopLevelDomain::Eu => "eu",
            TopLevelDomain::Net => "net",
            TopLevelDomain::Org => "org",
            TopLevelDomain::Vlaanderen => "vlaanderen",
        }
    }
}

impl std::fmt::Display for TopLevelDomain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for TopLevelDomain {
    type Err = InvalidTopLevelDomain;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "be" => Ok(TopLevelDomain::Be),
            "com" => Ok(TopLevelDomain::Com),
            "eu" => Ok(TopLevelDomain::Eu),
            "net" => Ok(TopLevelDomain::Net),
            "org" => Ok(TopLevelDomain::Org),
            "vlaanderen" => Ok(TopLevelDomain::Vlaanderen),
            _ => Err(InvalidTopLevelDomain {
                value: s.to_string(),
            }),
        }
    }
}

/// A full domain name, the identity key of a domain aggregate.
///
/// Never changes after creation; one event stream per full name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DomainName {
    pub second_level_domain: SecondLevelDomain,
    pub top_level_domain: TopLevelDomain,
}

impl DomainName {
    /// Creates a domain name from its two parts.
    pub fn new(second_level_domain: SecondLevelDomain, top_level_domain: TopLevelDomain) -> Self {
        Self {
            second_level_domain,
            top_level_domain,
        }
    }

    /// Parses `"example.com"` into a validated domain name.
    pub fn parse(name: &str) -> Result<Self, crate::error::RegistryError> {
        let (sld, tld) = name.rsplit_once('.').ok_or_else(|| InvalidTopLevelDomain {
            value: name.to_string(),
        })?;
        let top_level_domain: TopLevelDomain = tld.parse()?;
        let second_level_domain = SecondLevelDomain::new(sld)?;
        Ok(Self::new(second_level_domain, top_level_domain))
    }

    /// The name of the event stream holding this domain's history.
    pub fn stream_name(&self) -> StreamName {
        StreamName::new(self.to_string())
    }
}

impl std::fmt::Display for DomainName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.second_level_domain, self.top_level_domain)
    }
}

/// Caller-assigned unique identifier of a service within a domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServiceId(Uuid);

impl ServiceId {
    /// Creates a new random service ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a service ID from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the underlying UUID.
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for ServiceId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ServiceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for ServiceId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

/// Human-readable label of a manual service.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ManualLabel(String);

impl ManualLabel {
    /// Creates a manual service label.
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    /// Returns the label as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ManualLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ManualLabel {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Site-verification token of a Google Suite service.
///
/// Record derivation is a pure function of this token.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GoogleVerificationToken(String);

impl GoogleVerificationToken {
    /// Creates a verification token.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Returns the token as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for GoogleVerificationToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for GoogleVerificationToken {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}
