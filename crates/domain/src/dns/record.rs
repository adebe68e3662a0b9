//! The DNS record model and its validation grammar.
//!
//! Every record is validated against per-type rules before it enters the
//! aggregate. Validation failures are distinct, stable error kinds whose
//! messages are surfaced to the end caller verbatim. Deserialization
//! deliberately bypasses validation: replay trusts persisted data.

use std::net::Ipv4Addr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation errors for DNS records.
///
/// Each kind carries a fixed, caller-visible message. The messages are part
/// of the public contract and must not change between releases.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("Label of a record cannot be empty.")]
    EmptyLabel,

    #[error("Label of a record cannot be longer than {} characters.", RecordLabel::MAX_LENGTH)]
    LabelTooLong,

    #[error("Label of a record contains invalid characters.")]
    LabelInvalidCharacters,

    #[error("Label of a record cannot start with a dash.")]
    LabelStartsWithDash,

    #[error("Label of a record cannot end with a dash.")]
    LabelEndsWithDash,

    #[error("Label of a record cannot consist out of digits only.")]
    LabelAllDigits,

    #[error("Value of a record cannot be empty.")]
    EmptyValue,

    #[error("Value of a record cannot be longer than {} characters.", RecordValue::MAX_LENGTH)]
    ValueTooLong,

    #[error("Value of an A record must be a dotted-quad IP address.")]
    AValueNotValidIp,

    #[error("Value of a CNAME record must be a label, or a hostname ending with a dot.")]
    CnameInvalidHostname,

    #[error("Value of a CNAME record must be a label, or a hostname ending with a dot.")]
    CnameInvalidLabel,

    #[error(
        "Value of an MX record must be a 16-bit integer priority field, and a legal hostname or dns label."
    )]
    MxMissingPriorityAndHostname,

    #[error(
        "Value of an MX record must be a 16-bit integer priority field, and a legal hostname or dns label."
    )]
    MxNonIntegerPriority,

    #[error(
        "Value of an MX record must be a 16-bit integer priority field, and a legal hostname or dns label."
    )]
    MxMissingHostname,

    #[error(
        "Value of an MX record must be a 16-bit integer priority field, and a legal hostname or dns label."
    )]
    MxInvalidHostname,

    #[error(
        "Value of an MX record must be a 16-bit integer priority field, and a legal hostname or dns label."
    )]
    MxInvalidLabel,

    #[error("Value of an NS record must be a legal hostname or dns label.")]
    NsInvalidHostname,

    #[error("Value of an NS record must be a legal hostname or dns label.")]
    NsInvalidLabel,

    #[error("Time to live cannot be negative.")]
    NegativeTimeToLive,
}

/// The label part of a DNS record.
///
/// `"@"` denotes the domain root. Any other label is a single DNS label:
/// at most 63 characters, alphanumeric plus dashes, no leading or trailing
/// dash, not all digits.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordLabel(String);

impl RecordLabel {
    /// Maximum length of a DNS label.
    pub const MAX_LENGTH: usize = 63;

    /// The label denoting the domain root.
    pub const ROOT: &'static str = "@";

    /// Validates and creates a record label.
    pub fn new(label: impl Into<String>) -> Result<Self, RecordError> {
        let label = label.into();

        if label == Self::ROOT {
            return Ok(Self(label));
        }

        validate_label(&label)?;
        Ok(Self(label))
    }

    /// The root label, `"@"`.
    pub fn root() -> Self {
        Self(Self::ROOT.to_string())
    }

    /// Whether this label denotes the domain root.
    pub fn is_root(&self) -> bool {
        self.0 == Self::ROOT
    }

    /// Returns the label as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    // Trusted construction for records the system derives itself.
    pub(crate) fn raw(label: impl Into<String>) -> Self {
        Self(label.into())
    }
}

impl std::fmt::Display for RecordLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The value part of a DNS record.
///
/// Generic bounds only; the per-type grammar is applied by [`Record::new`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordValue(String);

impl RecordValue {
    /// Maximum length of a record value.
    pub const MAX_LENGTH: usize = 255;

    /// Validates and creates a record value.
    pub fn new(value: impl Into<String>) -> Result<Self, RecordError> {
        let value = value.into();

        if value.is_empty() {
            return Err(RecordError::EmptyValue);
        }
        if value.chars().count() > Self::MAX_LENGTH {
            return Err(RecordError::ValueTooLong);
        }

        Ok(Self(value))
    }

    /// Returns the value as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    // Trusted construction for records the system derives itself.
    pub(crate) fn raw(value: impl Into<String>) -> Self {
        Self(value.into())
    }
}

impl std::fmt::Display for RecordValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Time to live of a record, in seconds. Never negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimeToLive(i64);

impl TimeToLive {
    /// Validates and creates a time to live from a number of seconds.
    pub fn from_secs(secs: i64) -> Result<Self, RecordError> {
        if secs < 0 {
            return Err(RecordError::NegativeTimeToLive);
        }
        Ok(Self(secs))
    }

    /// Returns the time to live in seconds.
    pub fn as_secs(&self) -> i64 {
        self.0
    }

    // Trusted construction for records the system derives itself.
    pub(crate) fn raw(secs: i64) -> Self {
        Self(secs)
    }
}

impl std::fmt::Display for TimeToLive {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The closed set of supported record types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordType {
    A,
    Cname,
    Mx,
    Ns,
}

impl RecordType {
    /// Returns the stable wire name of the record type.
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordType::A => "a",
            RecordType::Cname => "cname",
            RecordType::Mx => "mx",
            RecordType::Ns => "ns",
        }
    }
}

impl std::fmt::Display for RecordType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single validated DNS record.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Record {
    pub label: RecordLabel,
    #[serde(rename = "type")]
    pub record_type: RecordType,
    pub value: RecordValue,
    pub ttl: TimeToLive,
}

impl Record {
    /// Validates raw inputs against the grammar for `record_type` and
    /// produces a record. First failure wins; validation order is label,
    /// generic value bounds, per-type value shape, then TTL.
    pub fn new(
        record_type: RecordType,
        label: impl Into<String>,
        value: impl Into<String>,
        ttl: i64,
    ) -> Result<Self, RecordError> {
        let label = RecordLabel::new(label)?;
        let value = RecordValue::new(value)?;

        match record_type {
            RecordType::A => validate_a_value(value.as_str())?,
            RecordType::Cname => validate_cname_value(value.as_str())?,
            RecordType::Mx => validate_mx_value(value.as_str())?,
            RecordType::Ns => validate_ns_value(value.as_str())?,
        }

        let ttl = TimeToLive::from_secs(ttl)?;

        Ok(Self {
            label,
            record_type,
            value,
            ttl,
        })
    }

    // Trusted construction for records the system derives itself.
    pub(crate) fn raw(record_type: RecordType, label: RecordLabel, value: RecordValue, ttl: TimeToLive) -> Self {
        Self {
            label,
            record_type,
            value,
            ttl,
        }
    }
}

/// Checks the single-label rules shared by record labels, hostname parts,
/// and second-level domain names.
pub(crate) fn validate_label(label: &str) -> Result<(), RecordError> {
    if label.is_empty() {
        return Err(RecordError::EmptyLabel);
    }
    if label.chars().count() > RecordLabel::MAX_LENGTH {
        return Err(RecordError::LabelTooLong);
    }
    if !label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        return Err(RecordError::LabelInvalidCharacters);
    }
    if label.starts_with('-') {
        return Err(RecordError::LabelStartsWithDash);
    }
    if label.ends_with('-') {
        return Err(RecordError::LabelEndsWithDash);
    }
    if label.chars().all(|c| c.is_ascii_digit()) {
        return Err(RecordError::LabelAllDigits);
    }
    Ok(())
}

/// Maximum total length of a hostname, dots included, trailing dot excluded.
const HOSTNAME_MAX_LENGTH: usize = 253;

fn is_legal_label(label: &str) -> bool {
    validate_label(label).is_ok()
}

/// A fully-qualified hostname: dot-separated legal labels ending with a
/// trailing dot. Hostname parts may be all-digits-free labels only.
fn is_legal_hostname(value: &str) -> bool {
    let Some(body) = value.strip_suffix('.') else {
        return false;
    };
    if body.is_empty() || body.chars().count() > HOSTNAME_MAX_LENGTH {
        return false;
    }
    body.split('.').all(is_legal_label)
}

fn validate_a_value(value: &str) -> Result<(), RecordError> {
    value
        .parse::<Ipv4Addr>()
        .map(|_| ())
        .map_err(|_| RecordError::AValueNotValidIp)
}

/// A host field is either a bare label or a fully-qualified hostname with a
/// trailing dot. The presence of a dot decides which shape was attempted,
/// which in turn decides the error kind on failure.
fn validate_host(
    value: &str,
    invalid_hostname: RecordError,
    invalid_label: RecordError,
) -> Result<(), RecordError> {
    if value.contains('.') {
        if is_legal_hostname(value) {
            Ok(())
        } else {
            Err(invalid_hostname)
        }
    } else if is_legal_label(value) {
        Ok(())
    } else {
        Err(invalid_label)
    }
}

fn validate_cname_value(value: &str) -> Result<(), RecordError> {
    validate_host(
        value,
        RecordError::CnameInvalidHostname,
        RecordError::CnameInvalidLabel,
    )
}

fn validate_ns_value(value: &str) -> Result<(), RecordError> {
    validate_host(
        value,
        RecordError::NsInvalidHostname,
        RecordError::NsInvalidLabel,
    )
}

fn validate_mx_value(value: &str) -> Result<(), RecordError> {
    let Some((priority, host)) = value.split_once(' ') else {
        return Err(RecordError::MxMissingPriorityAndHostname);
    };

    if priority.parse::<u16>().is_err() {
        return Err(RecordError::MxNonIntegerPriority);
    }

    if host.is_empty() {
        return Err(RecordError::MxMissingHostname);
    }

    validate_host(
        host,
        RecordError::MxInvalidHostname,
        RecordError::MxInvalidLabel,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    mod labels {
        use super::*;

        #[test]
        fn accepts_simple_labels() {
            assert!(RecordLabel::new("www").is_ok());
            assert!(RecordLabel::new("mail-01").is_ok());
            assert!(RecordLabel::new("a1b2").is_ok());
        }

        #[test]
        fn root_label_is_accepted() {
            let label = RecordLabel::new("@").unwrap();
            assert!(label.is_root());
            assert_eq!(label, RecordLabel::root());
        }

        #[test]
        fn rejects_empty_label() {
            assert_eq!(RecordLabel::new(""), Err(RecordError::EmptyLabel));
        }

        #[test]
        fn rejects_label_over_63_characters() {
            let label = "a".repeat(64);
            assert_eq!(RecordLabel::new(label), Err(RecordError::LabelTooLong));

            let label = "a".repeat(63);
            assert!(RecordLabel::new(label).is_ok());
        }

        #[test]
        fn rejects_invalid_characters() {
            assert_eq!(
                RecordLabel::new("www.mail"),
                Err(RecordError::LabelInvalidCharacters)
            );
            assert_eq!(
                RecordLabel::new("under_score"),
                Err(RecordError::LabelInvalidCharacters)
            );
            assert_eq!(
                RecordLabel::new("spa ce"),
                Err(RecordError::LabelInvalidCharacters)
            );
        }

        #[test]
        fn rejects_edge_dashes() {
            assert_eq!(
                RecordLabel::new("-www"),
                Err(RecordError::LabelStartsWithDash)
            );
            assert_eq!(
                RecordLabel::new("www-"),
                Err(RecordError::LabelEndsWithDash)
            );
        }

        #[test]
        fn rejects_all_digit_labels() {
            assert_eq!(RecordLabel::new("12345"), Err(RecordError::LabelAllDigits));
            assert!(RecordLabel::new("1a2b").is_ok());
        }
    }

    mod values {
        use super::*;

        #[test]
        fn rejects_empty_value() {
            assert_eq!(RecordValue::new(""), Err(RecordError::EmptyValue));
        }

        #[test]
        fn rejects_value_over_255_characters() {
            let value = "a".repeat(256);
            assert_eq!(RecordValue::new(value), Err(RecordError::ValueTooLong));

            let value = "a".repeat(255);
            assert!(RecordValue::new(value).is_ok());
        }
    }

    mod a_records {
        use super::*;

        #[test]
        fn accepts_dotted_quad() {
            assert!(Record::new(RecordType::A, "@", "1.2.3.4", 3600).is_ok());
            assert!(Record::new(RecordType::A, "www", "192.168.0.1", 3600).is_ok());
        }

        #[test]
        fn rejects_out_of_range_octets() {
            assert_eq!(
                Record::new(RecordType::A, "@", "999.1.1.1", 3600),
                Err(RecordError::AValueNotValidIp)
            );
        }

        #[test]
        fn rejects_non_ip_values() {
            assert_eq!(
                Record::new(RecordType::A, "@", "abc", 3600),
                Err(RecordError::AValueNotValidIp)
            );
            assert_eq!(
                Record::new(RecordType::A, "@", "1.2.3", 3600),
                Err(RecordError::AValueNotValidIp)
            );
        }
    }

    mod cname_records {
        use super::*;

        #[test]
        fn accepts_bare_label() {
            assert!(Record::new(RecordType::Cname, "www", "webserver", 3600).is_ok());
        }

        #[test]
        fn accepts_hostname_with_trailing_dot() {
            assert!(Record::new(RecordType::Cname, "www", "host.example.com.", 3600).is_ok());
        }

        #[test]
        fn rejects_hostname_without_trailing_dot() {
            assert_eq!(
                Record::new(RecordType::Cname, "www", "host.example.com", 3600),
                Err(RecordError::CnameInvalidHostname)
            );
        }

        #[test]
        fn rejects_invalid_bare_label() {
            assert_eq!(
                Record::new(RecordType::Cname, "www", "-bad", 3600),
                Err(RecordError::CnameInvalidLabel)
            );
        }
    }

    mod mx_records {
        use super::*;

        #[test]
        fn accepts_priority_and_hostname() {
            assert!(Record::new(RecordType::Mx, "@", "10 mail.example.com.", 3600).is_ok());
        }

        #[test]
        fn accepts_priority_and_bare_label() {
            assert!(Record::new(RecordType::Mx, "@", "10 mail", 3600).is_ok());
        }

        #[test]
        fn rejects_missing_priority() {
            assert_eq!(
                Record::new(RecordType::Mx, "@", "mail.example.com.", 3600),
                Err(RecordError::MxMissingPriorityAndHostname)
            );
        }

        #[test]
        fn rejects_priority_out_of_16_bit_range() {
            assert_eq!(
                Record::new(RecordType::Mx, "@", "70000 mail.example.com.", 3600),
                Err(RecordError::MxNonIntegerPriority)
            );
        }

        #[test]
        fn rejects_non_integer_priority() {
            assert_eq!(
                Record::new(RecordType::Mx, "@", "high mail.example.com.", 3600),
                Err(RecordError::MxNonIntegerPriority)
            );
        }

        #[test]
        fn rejects_missing_hostname() {
            assert_eq!(
                Record::new(RecordType::Mx, "@", "10 ", 3600),
                Err(RecordError::MxMissingHostname)
            );
        }

        #[test]
        fn rejects_invalid_hostname() {
            assert_eq!(
                Record::new(RecordType::Mx, "@", "10 mail.example.com", 3600),
                Err(RecordError::MxInvalidHostname)
            );
        }

        #[test]
        fn rejects_invalid_label() {
            assert_eq!(
                Record::new(RecordType::Mx, "@", "10 -mail", 3600),
                Err(RecordError::MxInvalidLabel)
            );
        }
    }

    mod ns_records {
        use super::*;

        #[test]
        fn accepts_hostname_and_label() {
            assert!(Record::new(RecordType::Ns, "@", "ns1.example.com.", 3600).is_ok());
            assert!(Record::new(RecordType::Ns, "@", "ns1", 3600).is_ok());
        }

        #[test]
        fn rejects_invalid_hostname() {
            assert_eq!(
                Record::new(RecordType::Ns, "@", "ns1.example.com", 3600),
                Err(RecordError::NsInvalidHostname)
            );
        }

        #[test]
        fn rejects_invalid_label() {
            assert_eq!(
                Record::new(RecordType::Ns, "@", "ns 1", 3600),
                Err(RecordError::NsInvalidLabel)
            );
        }
    }

    mod ttl {
        use super::*;

        #[test]
        fn rejects_negative_ttl() {
            assert_eq!(
                Record::new(RecordType::A, "@", "1.2.3.4", -1),
                Err(RecordError::NegativeTimeToLive)
            );
        }

        #[test]
        fn accepts_zero_ttl() {
            assert!(Record::new(RecordType::A, "@", "1.2.3.4", 0).is_ok());
        }
    }

    #[test]
    fn validation_order_label_first() {
        // A broken label reports the label error even when the value is also bad.
        assert_eq!(
            Record::new(RecordType::A, "", "not-an-ip", 3600),
            Err(RecordError::EmptyLabel)
        );
    }

    #[test]
    fn record_serialization_shape() {
        let record = Record::new(RecordType::A, "www", "1.2.3.4", 3600).unwrap();
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "label": "www",
                "type": "a",
                "value": "1.2.3.4",
                "ttl": 3600,
            })
        );
    }

    #[test]
    fn record_deserialization_trusts_persisted_data() {
        // Replay never re-validates; even a value that would fail the
        // grammar today must round-trip.
        let json = serde_json::json!({
            "label": "www",
            "type": "a",
            "value": "not-an-ip",
            "ttl": 60,
        });
        let record: Record = serde_json::from_value(json).unwrap();
        assert_eq!(record.value.as_str(), "not-an-ip");
    }

    #[test]
    fn error_messages_are_stable() {
        assert_eq!(
            RecordError::EmptyLabel.to_string(),
            "Label of a record cannot be empty."
        );
        assert_eq!(
            RecordError::LabelTooLong.to_string(),
            "Label of a record cannot be longer than 63 characters."
        );
        assert_eq!(
            RecordError::AValueNotValidIp.to_string(),
            "Value of an A record must be a dotted-quad IP address."
        );
        assert_eq!(
            RecordError::MxNonIntegerPriority.to_string(),
            "Value of an MX record must be a 16-bit integer priority field, and a legal hostname or dns label."
        );
        assert_eq!(
            RecordError::NegativeTimeToLive.to_string(),
            "Time to live cannot be negative."
        );
    }
}
