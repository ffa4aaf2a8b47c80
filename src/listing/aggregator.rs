//! Builds listing reports from several catalog lookups.

use tracing::debug;

use crate::catalog::{AccessEntry, Catalog, DataObjectEntry, EntityKind, MetadataEntry};
use crate::error::{CliError, Result};
use crate::path::LogicalPath;

use super::report::{CollectionRecord, DataObjectRecord, ReplicaRecord, ReportDocument, Section};

/// Which optional sections a report includes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportFlags {
    /// Include numeric ids.
    pub verbose: bool,
    /// Include access-control entries.
    pub acls: bool,
    /// Include AVU metadata.
    pub metadata: bool,
    /// Include replicas of data objects.
    pub replicas: bool,
}

/// Describes a collection's children or a single data object.
pub struct ListingAggregator<'a> {
    catalog: &'a dyn Catalog,
    flags: ReportFlags,
}

impl<'a> ListingAggregator<'a> {
    pub fn new(catalog: &'a dyn Catalog, flags: ReportFlags) -> Self {
        Self { catalog, flags }
    }

    /// Build the report for `path`.
    ///
    /// # Errors
    ///
    /// `CliError::BadLogicalPath` when `path` is neither a collection nor a
    /// data object. Any catalog failure aborts the whole report.
    pub fn build_report(&self, path: &LogicalPath) -> Result<ReportDocument> {
        let mut report = ReportDocument::default();

        let data_objects = if self.catalog.collection_exists(path)? {
            debug!("Listing collection {}", path);
            report.collections = Some(self.collection_section(path)?);
            self.catalog.data_objects_in(path)?
        } else if self.catalog.data_object_exists(path)? {
            debug!("Listing data object {}", path);
            vec![self.catalog.data_object(path)?]
        } else {
            return Err(CliError::BadLogicalPath);
        };

        for object in &data_objects {
            report
                .data_objects
                .insert(object.name(), self.data_object_record(object)?);
        }
        Ok(report)
    }

    fn collection_section(&self, path: &LogicalPath) -> Result<Section<CollectionRecord>> {
        let mut section = Section::new();
        for child in self.catalog.subcollections(path)? {
            let record = CollectionRecord {
                id: self.flags.verbose.then_some(child.id),
                acls: self.acls(EntityKind::Collection, &child.path)?,
                metadata: self.metadata(EntityKind::Collection, &child.path)?,
            };
            section.insert(child.name(), record);
        }
        Ok(section)
    }

    fn data_object_record(&self, object: &DataObjectEntry) -> Result<DataObjectRecord> {
        let replicas = if self.flags.replicas {
            let replicas = self.catalog.replicas(&object.path)?;
            Some(replicas.iter().map(ReplicaRecord::from).collect())
        } else {
            None
        };
        Ok(DataObjectRecord {
            size: object.size,
            id: self.flags.verbose.then_some(object.id),
            acls: self.acls(EntityKind::DataObject, &object.path)?,
            metadata: self.metadata(EntityKind::DataObject, &object.path)?,
            replicas,
        })
    }

    fn acls(
        &self,
        kind: EntityKind,
        path: &LogicalPath,
    ) -> Result<Option<Vec<AccessEntry>>> {
        if !self.flags.acls {
            return Ok(None);
        }
        Ok(Some(self.catalog.access_entries(kind, path)?))
    }

    fn metadata(
        &self,
        kind: EntityKind,
        path: &LogicalPath,
    ) -> Result<Option<Vec<MetadataEntry>>> {
        if !self.flags.metadata {
            return Ok(None);
        }
        Ok(Some(self.catalog.metadata(kind, path)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CatalogError, MemoryCatalog};

    const HOME: &str = "/tempZone/home/rods";

    fn path(p: &str) -> LogicalPath {
        LogicalPath::new(p).unwrap()
    }

    fn sample() -> MemoryCatalog {
        MemoryCatalog::new("tempZone", "rods")
            .with_collection("/tempZone/home/rods/one")
            .with_data_object("/tempZone/home/rods/one/2", 2)
            .with_data_object("/tempZone/home/rods/sample.json", 42)
            .with_metadata("/tempZone/home/rods/sample.json", "kind", "sample", "")
    }

    fn report(catalog: &MemoryCatalog, target: &str, flags: ReportFlags) -> Result<ReportDocument> {
        ListingAggregator::new(catalog, flags).build_report(&path(target))
    }

    #[test]
    fn collection_lists_children() {
        let catalog = sample();
        let doc = report(&catalog, HOME, ReportFlags::default()).unwrap();
        let collections = doc.collections.unwrap();
        assert_eq!(collections.names().collect::<Vec<_>>(), vec!["one"]);
        assert_eq!(collections.get("one"), Some(&CollectionRecord::default()));
        assert_eq!(doc.data_objects.get("sample.json").unwrap().size, 42);
        assert_eq!(doc.data_objects.len(), 1);
    }

    #[test]
    fn empty_collection_keeps_both_sections() {
        let catalog = sample();
        let doc = report(&catalog, "/tempZone/home/rods/one", ReportFlags::default()).unwrap();
        assert_eq!(
            doc.to_json().unwrap(),
            r#"{"collections": {}, "data_objects": {"2": {"size": 2}}}"#
        );
    }

    #[test]
    fn data_object_is_described_alone() {
        let catalog = sample();
        let doc = report(
            &catalog,
            "/tempZone/home/rods/sample.json",
            ReportFlags::default(),
        )
        .unwrap();
        assert!(doc.collections.is_none());
        assert_eq!(
            doc.to_json().unwrap(),
            r#"{"data_objects": {"sample.json": {"size": 42}}}"#
        );
    }

    #[test]
    fn missing_path_is_bad_logical_path() {
        let catalog = sample();
        let err = report(&catalog, "/tempZone/home/rods/nopes", ReportFlags::default())
            .unwrap_err();
        assert_eq!(err.to_string(), "bad logical path");
    }

    #[test]
    fn flags_select_sections() {
        let catalog = sample();
        let flags = ReportFlags {
            verbose: true,
            acls: true,
            metadata: true,
            replicas: true,
        };
        let doc = report(&catalog, HOME, flags).unwrap();

        let one = doc.collections.as_ref().unwrap().get("one").unwrap();
        assert!(one.id.is_some());
        assert_eq!(one.acls.as_ref().unwrap()[0].access_name, "own");
        assert_eq!(one.metadata, Some(Vec::new()));

        let sample = doc.data_objects.get("sample.json").unwrap();
        assert!(sample.id.is_some());
        assert_eq!(sample.metadata.as_ref().unwrap()[0].attribute, "kind");
        let replicas = sample.replicas.as_ref().unwrap();
        assert_eq!(replicas.len(), 1);
        assert_eq!(replicas[0].resource_name, "demoResc");
        assert_eq!(replicas[0].size, 42);
    }

    #[test]
    fn replicas_are_data_object_only() {
        let catalog = sample();
        let flags = ReportFlags {
            replicas: true,
            ..Default::default()
        };
        let doc = report(&catalog, HOME, flags).unwrap();
        let json: serde_json::Value = serde_json::from_str(&doc.to_json().unwrap()).unwrap();
        assert!(json["collections"]["one"].get("replicas").is_none());
        assert!(json["data_objects"]["sample.json"]["replicas"].is_array());
    }

    #[test]
    fn any_catalog_failure_fails_the_report() {
        let catalog = sample().with_fault(
            "/tempZone/home/rods/sample.json",
            CatalogError::Network("connection reset".to_string()),
        );
        let flags = ReportFlags {
            metadata: true,
            ..Default::default()
        };
        let err = report(&catalog, HOME, flags).unwrap_err();
        assert_eq!(err.to_string(), "Network error: connection reset");
    }

    #[test]
    fn enumeration_order_is_preserved() {
        let catalog = MemoryCatalog::new("tempZone", "rods")
            .with_data_object("/tempZone/home/rods/b", 1)
            .with_data_object("/tempZone/home/rods/a", 1);
        let doc = report(&catalog, HOME, ReportFlags::default()).unwrap();
        assert_eq!(doc.data_objects.names().collect::<Vec<_>>(), vec!["b", "a"]);
    }
}
