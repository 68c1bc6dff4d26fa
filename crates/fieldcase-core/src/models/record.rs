//! Field and central record models

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::SyncStatus;

/// Identifier of a field record, generated locally.
///
/// New ids are UUID v7 strings (time-sortable), but the type accepts any
/// non-empty string so externally seeded data round-trips unchanged.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldRecordId(String);

/// Identifier of a central record, assigned by the central repository.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CentralRecordId(String);

macro_rules! string_id {
    ($name:ident) => {
        impl $name {
            /// Get the string representation of this ID
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl FromStr for $name {
            type Err = std::convert::Infallible;

            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                Ok(Self(s.to_string()))
            }
        }
    };
}

string_id!(FieldRecordId);
string_id!(CentralRecordId);

impl FieldRecordId {
    /// Create a new unique field record ID using UUID v7
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7().to_string())
    }
}

impl Default for FieldRecordId {
    fn default() -> Self {
        Self::new()
    }
}

/// Domain attributes of a case record (name, address, phone, notes, ...).
///
/// Opaque to the sync engine beyond whole-value equality; stored as an
/// ordered map so serialized snapshots are deterministic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Attributes(BTreeMap<String, Value>);

impl Attributes {
    /// Create an empty attribute map
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up an attribute by key
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Insert or replace an attribute
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    /// Whether no attributes are set
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over key/value pairs in key order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Attributes {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

/// A case record captured/edited while disconnected from the central system.
///
/// `last_modified` is optional at the serde level so malformed snapshots are
/// representable (the engine skips and counts them); constructors always set
/// it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldRecord {
    /// Locally generated, stable identifier
    pub id: FieldRecordId,
    /// Paired central record, absent until first successful push
    #[serde(default)]
    pub link_id: Option<CentralRecordId>,
    /// Domain fields, opaque to the engine
    #[serde(default)]
    pub attributes: Attributes,
    /// Lifecycle tag driving participation in the next pass
    pub sync_status: SyncStatus,
    /// Updated on every local attribute mutation (ISO-8601 in snapshots)
    #[serde(default)]
    pub last_modified: Option<DateTime<Utc>>,
    /// The paired central record's `last_modified` as of the last completed
    /// pass; the baseline for central-drift detection
    #[serde(default)]
    pub synced_central_at: Option<DateTime<Utc>>,
}

impl FieldRecord {
    /// Create a new local record with status `new`
    #[must_use]
    pub fn new(attributes: Attributes) -> Self {
        Self {
            id: FieldRecordId::new(),
            link_id: None,
            attributes,
            sync_status: SyncStatus::New,
            last_modified: Some(Utc::now()),
            synced_central_at: None,
        }
    }

    /// Project a field record from an unclaimed central record (reverse
    /// pass). The result is already `synced` and linked.
    pub fn from_central(central: &CentralRecord) -> Result<Self> {
        let central_id = central.checked_id()?;
        let central_modified = central.checked_last_modified()?;
        Ok(Self {
            id: FieldRecordId::new(),
            link_id: Some(central_id.clone()),
            attributes: central.attributes.clone(),
            sync_status: SyncStatus::Synced,
            last_modified: Some(central_modified),
            synced_central_at: Some(central_modified),
        })
    }

    /// Mutate one attribute, bumping `last_modified` and the sync status.
    pub fn set_attribute(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.attributes.set(key, value);
        self.touch();
        self.sync_status = self.sync_status.on_local_edit();
    }

    /// Bump `last_modified`, never letting it decrease.
    pub fn touch(&mut self) {
        let now = Utc::now();
        self.last_modified = Some(match self.last_modified {
            Some(previous) if previous > now => previous,
            _ => now,
        });
    }

    /// `last_modified`, or a malformed-record error when absent.
    pub fn checked_last_modified(&self) -> Result<DateTime<Utc>> {
        self.last_modified
            .ok_or_else(|| Error::malformed(self.id.as_str(), "missing lastModified"))
    }
}

/// The authoritative record in the central case database.
///
/// `id` is `None` only for records not yet persisted; the repository
/// assigns one on `add`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CentralRecord {
    /// Authoritative identifier assigned by the central repository
    #[serde(default)]
    pub id: Option<CentralRecordId>,
    /// The field record that created/updated this one; absent for
    /// centrally-originated records
    #[serde(default)]
    pub link_id: Option<FieldRecordId>,
    /// Domain fields projected into the central schema
    #[serde(default)]
    pub attributes: Attributes,
    /// Updated whenever the central side mutates, through any path
    #[serde(default)]
    pub last_modified: Option<DateTime<Utc>>,
}

impl CentralRecord {
    /// Create an unpersisted, centrally-originated record
    #[must_use]
    pub fn new(attributes: Attributes) -> Self {
        Self {
            id: None,
            link_id: None,
            attributes,
            last_modified: Some(Utc::now()),
        }
    }

    /// Project an unpersisted central record from a field record
    /// (first push). The repository assigns the id on `add`.
    #[must_use]
    pub fn from_field(field: &FieldRecord) -> Self {
        Self {
            id: None,
            link_id: Some(field.id.clone()),
            attributes: field.attributes.clone(),
            last_modified: Some(Utc::now()),
        }
    }

    /// The persisted id, or a malformed-record error when absent.
    pub fn checked_id(&self) -> Result<&CentralRecordId> {
        self.id
            .as_ref()
            .ok_or_else(|| Error::malformed("<unassigned>", "missing central id"))
    }

    /// `last_modified`, or a malformed-record error when absent.
    pub fn checked_last_modified(&self) -> Result<DateTime<Utc>> {
        self.last_modified.ok_or_else(|| {
            let id = self.id.as_ref().map_or("<unassigned>", CentralRecordId::as_str);
            Error::malformed(id, "missing lastModified")
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_field_record_id_unique() {
        assert_ne!(FieldRecordId::new(), FieldRecordId::new());
    }

    #[test]
    fn test_new_field_record_starts_pending() {
        let record = FieldRecord::new(Attributes::new());
        assert_eq!(record.sync_status, SyncStatus::New);
        assert!(record.link_id.is_none());
        assert!(record.last_modified.is_some());
        assert!(record.synced_central_at.is_none());
    }

    #[test]
    fn test_set_attribute_marks_synced_record_modified() {
        let mut record = FieldRecord::new(Attributes::new());
        record.sync_status = SyncStatus::Synced;
        record.set_attribute("notes", "visited on site");
        assert_eq!(record.sync_status, SyncStatus::Modified);
        assert_eq!(
            record.attributes.get("notes"),
            Some(&Value::from("visited on site"))
        );
    }

    #[test]
    fn test_touch_never_decreases_last_modified() {
        let mut record = FieldRecord::new(Attributes::new());
        let future = Utc::now() + chrono::Duration::hours(1);
        record.last_modified = Some(future);
        record.touch();
        assert_eq!(record.last_modified, Some(future));
    }

    #[test]
    fn test_checked_last_modified_flags_malformed() {
        let mut record = FieldRecord::new(Attributes::new());
        record.last_modified = None;
        assert!(matches!(
            record.checked_last_modified(),
            Err(crate::Error::MalformedRecord { .. })
        ));
    }

    #[test]
    fn test_from_field_projection_carries_link() {
        let field = FieldRecord::new([("name", "Jan Kowalski")].into_iter().collect());
        let central = CentralRecord::from_field(&field);
        assert_eq!(central.link_id.as_ref(), Some(&field.id));
        assert_eq!(central.attributes, field.attributes);
        assert!(central.id.is_none());
    }

    #[test]
    fn test_from_central_projection_is_synced() {
        let mut central = CentralRecord::new([("name", "Anna Nowak")].into_iter().collect());
        central.id = Some(CentralRecordId::from("c7"));
        let field = FieldRecord::from_central(&central).unwrap();
        assert_eq!(field.sync_status, SyncStatus::Synced);
        assert_eq!(field.link_id, Some(CentralRecordId::from("c7")));
        assert_eq!(field.last_modified, central.last_modified);
        assert_eq!(field.synced_central_at, central.last_modified);
    }

    #[test]
    fn test_field_record_serde_round_trip() {
        let json = r#"{
            "id": "f1",
            "linkId": null,
            "attributes": {"name": "Jan Kowalski"},
            "syncStatus": "new",
            "lastModified": "2024-01-01T10:00:00Z"
        }"#;
        let record: FieldRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.id, FieldRecordId::from("f1"));
        assert_eq!(record.sync_status, SyncStatus::New);
        assert_eq!(
            record.attributes.get("name"),
            Some(&Value::from("Jan Kowalski"))
        );

        let serialized = serde_json::to_string(&record).unwrap();
        let reparsed: FieldRecord = serde_json::from_str(&serialized).unwrap();
        assert_eq!(reparsed, record);
    }

    #[test]
    fn test_missing_last_modified_deserializes_as_none() {
        let json = r#"{"id": "f9", "syncStatus": "new"}"#;
        let record: FieldRecord = serde_json::from_str(json).unwrap();
        assert!(record.last_modified.is_none());
    }
}
