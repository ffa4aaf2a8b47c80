//! The catalog session boundary.
//!
//! Commands never talk to iRODS directly. They go through the [`Catalog`]
//! trait, which exposes exactly the capabilities the front end needs:
//! existence checks, child enumeration, ACL/metadata/replica lookups, the
//! three mutating operations, and GenQuery2.
//!
//! - [`HttpCatalog`] talks to the iRODS HTTP API.
//! - [`MemoryCatalog`] keeps an in-memory tree for tests.

pub mod codes;
pub mod error;
pub mod http;
pub mod memory;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::path::LogicalPath;

pub use error::CatalogError;
pub use http::HttpCatalog;
pub use memory::MemoryCatalog;

/// Result type for catalog calls.
pub type CatalogResult<T> = std::result::Result<T, CatalogError>;

/// Which kind of entity a path names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Collection,
    DataObject,
}

/// A collection as returned by enumeration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionEntry {
    pub id: u64,
    pub path: LogicalPath,
}

impl CollectionEntry {
    /// Name relative to the parent collection.
    pub fn name(&self) -> &str {
        self.path.name()
    }
}

/// A data object as returned by enumeration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataObjectEntry {
    pub id: u64,
    pub path: LogicalPath,
    pub size: u64,
}

impl DataObjectEntry {
    /// Name relative to the parent collection.
    pub fn name(&self) -> &str {
        self.path.name()
    }
}

/// One access-control entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccessEntry {
    pub access_name: String,
    pub user_name: String,
    pub user_zone: String,
}

/// One attribute/value/unit triple.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetadataEntry {
    pub attribute: String,
    pub value: String,
    pub unit: String,
}

/// One physical copy of a data object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replica {
    pub number: u32,
    pub status: String,
    pub size: u64,
    pub physical_path: String,
    pub resc_hier: String,
    pub resource_name: String,
    pub modify_time: DateTime<Utc>,
    pub create_time: DateTime<Utc>,
    pub checksum: Option<String>,
}

/// Options for removing a collection or data object.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RemoveOptions {
    /// Remove a collection and everything below it.
    pub recursive: bool,
    /// Skip the trash.
    pub force: bool,
}

/// Where a touch takes its new modification time from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MtimeSource {
    SecondsSinceEpoch(i64),
    Reference(LogicalPath),
}

/// Which replica a data-object touch applies to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplicaTarget {
    LeafResource(String),
    ReplicaNumber(u32),
}

/// Options for updating a modification time.
///
/// Built by the touch validator, so conflicting option pairs cannot be
/// expressed here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TouchOptions {
    pub mtime: Option<MtimeSource>,
    pub replica: Option<ReplicaTarget>,
}

/// Outcome of a GenQuery2 request.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryOutput {
    /// Result rows, as returned by the server.
    Rows(serde_json::Value),
    /// The SQL the query compiles to.
    Sql(String),
}

/// Capabilities the CLI consumes from an iRODS session.
pub trait Catalog {
    /// Whether `path` names an existing collection.
    fn collection_exists(&self, path: &LogicalPath) -> CatalogResult<bool>;

    /// Whether `path` names an existing data object.
    fn data_object_exists(&self, path: &LogicalPath) -> CatalogResult<bool>;

    /// Look up a single data object.
    fn data_object(&self, path: &LogicalPath) -> CatalogResult<DataObjectEntry>;

    /// Immediate child collections of `path`.
    fn subcollections(&self, path: &LogicalPath) -> CatalogResult<Vec<CollectionEntry>>;

    /// Immediate child data objects of `path`.
    fn data_objects_in(&self, path: &LogicalPath) -> CatalogResult<Vec<DataObjectEntry>>;

    /// Access-control entries of a collection or data object.
    fn access_entries(&self, kind: EntityKind, path: &LogicalPath)
        -> CatalogResult<Vec<AccessEntry>>;

    /// Metadata attached to a collection or data object.
    fn metadata(&self, kind: EntityKind, path: &LogicalPath) -> CatalogResult<Vec<MetadataEntry>>;

    /// Replicas of a data object.
    fn replicas(&self, path: &LogicalPath) -> CatalogResult<Vec<Replica>>;

    /// Remove a collection.
    fn remove_collection(&self, path: &LogicalPath, options: RemoveOptions) -> CatalogResult<()>;

    /// Remove a data object.
    fn unlink_data_object(&self, path: &LogicalPath, options: RemoveOptions) -> CatalogResult<()>;

    /// Rename (move) a collection or data object.
    fn rename(
        &self,
        kind: EntityKind,
        source: &LogicalPath,
        destination: &LogicalPath,
    ) -> CatalogResult<()>;

    /// Update the modification time of a collection or data object.
    ///
    /// Touching a missing data object creates it.
    fn touch(&self, kind: EntityKind, path: &LogicalPath, options: &TouchOptions)
        -> CatalogResult<()>;

    /// Run or compile a GenQuery2 query against `zone`.
    fn general_query(&self, query: &str, zone: &str, sql_only: bool) -> CatalogResult<QueryOutput>;

    /// Column mappings understood by GenQuery2.
    fn query_columns(&self, zone: &str) -> CatalogResult<serde_json::Value>;
}
