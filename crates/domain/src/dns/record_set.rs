//! An order-independent, de-duplicating collection of DNS records.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::record::{Record, RecordLabel, RecordType, RecordValue};

/// A set of records, keyed by (label, type, value) so duplicates collapse.
///
/// Immutable: every operation returns a new set. When two records share a
/// key but differ in TTL, the later insertion wins. Iteration order is the
/// key order, which makes de-duplication and serialization deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Record>", into = "Vec<Record>")]
pub struct RecordSet {
    records: BTreeMap<(RecordLabel, RecordType, RecordValue), Record>,
}

impl RecordSet {
    /// The empty record set.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns a new set with the given records added. Records that share a
    /// (label, type, value) key with an existing entry replace it.
    pub fn add_records(&self, records: impl IntoIterator<Item = Record>) -> Self {
        let mut merged = self.records.clone();
        for record in records {
            let key = (
                record.label.clone(),
                record.record_type,
                record.value.clone(),
            );
            merged.insert(key, record);
        }
        Self { records: merged }
    }

    /// Returns the union of this set and another.
    pub fn union(&self, other: &RecordSet) -> Self {
        self.add_records(other.iter().cloned())
    }

    /// Number of distinct records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the set holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterates over the records in key order.
    pub fn iter(&self) -> impl Iterator<Item = &Record> {
        self.records.values()
    }

    /// Whether the set contains a record with the same (label, type, value).
    pub fn contains(&self, record: &Record) -> bool {
        self.records.contains_key(&(
            record.label.clone(),
            record.record_type,
            record.value.clone(),
        ))
    }
}

impl FromIterator<Record> for RecordSet {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        Self::empty().add_records(iter)
    }
}

impl From<Vec<Record>> for RecordSet {
    fn from(records: Vec<Record>) -> Self {
        records.into_iter().collect()
    }
}

impl From<RecordSet> for Vec<Record> {
    fn from(set: RecordSet) -> Self {
        set.records.into_values().collect()
    }
}
