//! Service variants attached to a domain.

use serde::{Deserialize, Serialize};

use super::record::{Record, RecordLabel, RecordType, RecordValue, TimeToLive};
use super::record_set::RecordSet;
use super::value_objects::{GoogleVerificationToken, ManualLabel};

/// Stable discriminator for the service variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceType {
    Manual,
    GoogleSuite,
}

impl ServiceType {
    /// Returns the stable wire name of the service type.
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceType::Manual => "manual",
            ServiceType::GoogleSuite => "googlesuite",
        }
    }
}

impl std::fmt::Display for ServiceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A service attached to a domain.
///
/// Each variant's only contribution to the domain is "produce my current
/// records". Adding a variant without updating [`Service::records`] is a
/// compile error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Service {
    /// Caller-supplied records under a caller-chosen label.
    Manual {
        label: ManualLabel,
        records: RecordSet,
    },

    /// Records derived deterministically from a site-verification token.
    GoogleSuite {
        verification_token: GoogleVerificationToken,
    },
}

impl Service {
    /// The discriminator of this service.
    pub fn service_type(&self) -> ServiceType {
        match self {
            Service::Manual { .. } => ServiceType::Manual,
            Service::GoogleSuite { .. } => ServiceType::GoogleSuite,
        }
    }

    /// Human label for list and detail display.
    pub fn display_label(&self) -> String {
        match self {
            Service::Manual { label, .. } => label.to_string(),
            Service::GoogleSuite { .. } => "Google Suite".to_string(),
        }
    }

    /// The records this service currently contributes to the domain.
    pub fn records(&self) -> RecordSet {
        match self {
            Service::Manual { records, .. } => records.clone(),
            Service::GoogleSuite { verification_token } => {
                google_suite_records(verification_token)
            }
        }
    }
}

const GOOGLE_TTL: i64 = 3600;

const GOOGLE_MX_HOSTS: [&str; 5] = [
    "1 aspmx.l.google.com.",
    "5 alt1.aspmx.l.google.com.",
    "5 alt2.aspmx.l.google.com.",
    "10 alt3.aspmx.l.google.com.",
    "10 alt4.aspmx.l.google.com.",
];

/// Derives the Google Suite record set from a verification token.
///
/// Pure function of the token: five MX records at the root plus one CNAME
/// for site verification. Uses trusted constructors since every derived
/// value is known to be well-formed except the token, which Google accepts
/// as an opaque label.
fn google_suite_records(token: &GoogleVerificationToken) -> RecordSet {
    let mut records: Vec<Record> = GOOGLE_MX_HOSTS
        .iter()
        .map(|value| {
            Record::raw(
                RecordType::Mx,
                RecordLabel::root(),
                RecordValue::raw(*value),
                TimeToLive::raw(GOOGLE_TTL),
            )
        })
        .collect();

    records.push(Record::raw(
        RecordType::Cname,
        RecordLabel::raw(token.as_str()),
        RecordValue::raw(format!("gv-{}.dv.googlehosted.com.", token)),
        TimeToLive::raw(GOOGLE_TTL),
    ));

    records.into_iter().collect()
}
