//! Report document types.
//!
//! Records are plain structs whose optional sections are `None` unless the
//! matching flag was requested; `None` sections are left out of the JSON.

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::catalog::{AccessEntry, MetadataEntry, Replica};
use crate::ui::json;

/// Timestamp layout for replica times.
pub const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Name-keyed records in catalog enumeration order.
///
/// Serializes as a JSON object whose keys keep insertion order.
#[derive(Debug, Clone, PartialEq)]
pub struct Section<T> {
    entries: Vec<(String, T)>,
}

impl<T> Default for Section<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<T> Section<T> {
    /// Create an empty section.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a record. A repeated name replaces the earlier record in place.
    pub fn insert(&mut self, name: impl Into<String>, record: T) {
        let name = name.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = record,
            None => self.entries.push((name, record)),
        }
    }

    /// Look up a record by name.
    pub fn get(&self, name: &str) -> Option<&T> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, record)| record)
    }

    /// Names in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T: Serialize> Serialize for Section<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, record) in &self.entries {
            map.serialize_entry(name, record)?;
        }
        map.end()
    }
}

/// One child collection.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
pub struct CollectionRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub acls: Option<Vec<AccessEntry>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Vec<MetadataEntry>>,
}

/// One data object.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
pub struct DataObjectRecord {
    pub size: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub acls: Option<Vec<AccessEntry>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Vec<MetadataEntry>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replicas: Option<Vec<ReplicaRecord>>,
}

/// One replica, with times rendered as text.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ReplicaRecord {
    pub number: u32,
    pub status: String,
    pub size: u64,
    pub physical_path: String,
    pub resc_hier: String,
    pub resource_name: String,
    pub modify_time: String,
    pub create_time: String,
    pub checksum: Option<String>,
}

impl From<&Replica> for ReplicaRecord {
    fn from(replica: &Replica) -> Self {
        Self {
            number: replica.number,
            status: replica.status.clone(),
            size: replica.size,
            physical_path: replica.physical_path.clone(),
            resc_hier: replica.resc_hier.clone(),
            resource_name: replica.resource_name.clone(),
            modify_time: replica.modify_time.format(TIME_FORMAT).to_string(),
            create_time: replica.create_time.format(TIME_FORMAT).to_string(),
            checksum: replica.checksum.clone(),
        }
    }
}

/// The listing output.
///
/// `collections` is present only when the listed path is a collection.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
pub struct ReportDocument {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collections: Option<Section<CollectionRecord>>,
    pub data_objects: Section<DataObjectRecord>,
}

impl ReportDocument {
    /// Render as a single-line JSON document.
    pub fn to_json(&self) -> serde_json::Result<String> {
        json::to_line(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn section_keeps_insertion_order() {
        let mut section = Section::new();
        section.insert("zeta", 1);
        section.insert("alpha", 2);
        assert_eq!(json::to_line(&section).unwrap(), r#"{"zeta": 1, "alpha": 2}"#);
    }

    #[test]
    fn section_replaces_repeated_name() {
        let mut section = Section::new();
        section.insert("a", 1);
        section.insert("b", 2);
        section.insert("a", 3);
        assert_eq!(section.len(), 2);
        assert_eq!(section.get("a"), Some(&3));
        assert_eq!(section.names().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn data_object_record_omits_unrequested_sections() {
        let record = DataObjectRecord {
            size: 42,
            ..Default::default()
        };
        assert_eq!(json::to_line(&record).unwrap(), r#"{"size": 42}"#);
    }

    #[test]
    fn size_precedes_id() {
        let record = DataObjectRecord {
            size: 1,
            id: Some(10_010),
            ..Default::default()
        };
        assert_eq!(
            json::to_line(&record).unwrap(),
            r#"{"size": 1, "id": 10010}"#
        );
    }

    #[test]
    fn requested_empty_sections_are_kept() {
        let record = CollectionRecord {
            acls: Some(Vec::new()),
            ..Default::default()
        };
        assert_eq!(json::to_line(&record).unwrap(), r#"{"acls": []}"#);
    }

    #[test]
    fn replica_times_are_formatted() {
        let replica = Replica {
            number: 0,
            status: "1".to_string(),
            size: 3,
            physical_path: "/var/lib/irods/Vault/home/rods/f".to_string(),
            resc_hier: "demoResc".to_string(),
            resource_name: "demoResc".to_string(),
            modify_time: Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 5).unwrap(),
            create_time: Utc.with_ymd_and_hms(2024, 2, 29, 8, 0, 0).unwrap(),
            checksum: None,
        };
        let record = ReplicaRecord::from(&replica);
        assert_eq!(record.modify_time, "2024-03-01 12:30:05");
        assert_eq!(record.create_time, "2024-02-29 08:00:00");
        let json: serde_json::Value = serde_json::to_value(&record).unwrap();
        assert!(json["checksum"].is_null());
    }

    #[test]
    fn data_object_document_has_no_collections_key() {
        let mut doc = ReportDocument::default();
        doc.data_objects.insert(
            "sample.json",
            DataObjectRecord {
                size: 5,
                ..Default::default()
            },
        );
        assert_eq!(
            doc.to_json().unwrap(),
            r#"{"data_objects": {"sample.json": {"size": 5}}}"#
        );
    }
}
