//! In-memory catalog for testing.
//!
//! `MemoryCatalog` implements [`Catalog`] over a small in-memory tree and
//! mirrors the server behavior the CLI depends on: zone checks, unknown
//! parent collections, refusal to overwrite on rename, non-empty collection
//! removal, and touch-creates-data-object.
//!
//! # Example
//!
//! ```
//! use irods_cli::catalog::{Catalog, MemoryCatalog};
//! use irods_cli::path::LogicalPath;
//!
//! let catalog = MemoryCatalog::new("tempZone", "rods")
//!     .with_collection("/tempZone/home/rods/one")
//!     .with_data_object("/tempZone/home/rods/sample.json", 42);
//!
//! let home = LogicalPath::home("tempZone", "rods");
//! assert!(catalog.collection_exists(&home.join("one")).unwrap());
//! assert_eq!(catalog.data_objects_in(&home).unwrap().len(), 1);
//! ```

use std::cell::{Cell, RefCell};

use chrono::{DateTime, Utc};
use serde_json::Value;

use super::{
    codes, AccessEntry, Catalog, CatalogError, CatalogResult, CollectionEntry, DataObjectEntry,
    EntityKind, MetadataEntry, MtimeSource, QueryOutput, RemoveOptions, Replica, ReplicaTarget,
    TouchOptions,
};
use crate::path::LogicalPath;

/// Resource new data objects land on when none is named.
pub const DEFAULT_RESOURCE: &str = "demoResc";

const FIRST_ID: u64 = 10_000;

#[derive(Debug, Clone)]
struct StoredCollection {
    id: u64,
    path: LogicalPath,
    acls: Vec<AccessEntry>,
    metadata: Vec<MetadataEntry>,
    modified: i64,
}

#[derive(Debug, Clone)]
struct StoredDataObject {
    id: u64,
    path: LogicalPath,
    acls: Vec<AccessEntry>,
    metadata: Vec<MetadataEntry>,
    replicas: Vec<Replica>,
}

impl StoredDataObject {
    fn size(&self) -> u64 {
        self.replicas.first().map(|r| r.size).unwrap_or(0)
    }

    fn modified(&self) -> i64 {
        self.replicas
            .iter()
            .map(|r| r.modify_time.timestamp())
            .max()
            .unwrap_or(0)
    }
}

#[derive(Debug, Clone)]
enum QueryFixture {
    Valid { sql: String, rows: Value },
    Failing(CatalogError),
}

#[derive(Debug, Default)]
struct State {
    next_id: u64,
    collections: Vec<StoredCollection>,
    data_objects: Vec<StoredDataObject>,
    queries: Vec<(String, QueryFixture)>,
    columns: Option<Value>,
    faults: Vec<(LogicalPath, CatalogError)>,
    offline: Option<CatalogError>,
}

/// In-memory [`Catalog`] implementation.
#[derive(Debug)]
pub struct MemoryCatalog {
    zone: String,
    user: String,
    state: RefCell<State>,
    calls: Cell<usize>,
}

impl MemoryCatalog {
    /// Create a catalog holding `/`, `/<zone>`, `/<zone>/home` and the
    /// user's home collection.
    pub fn new(zone: impl Into<String>, user: impl Into<String>) -> Self {
        let zone = zone.into();
        let user = user.into();
        let catalog = Self {
            state: RefCell::new(State {
                next_id: FIRST_ID,
                ..State::default()
            }),
            calls: Cell::new(0),
            zone,
            user,
        };
        let home = LogicalPath::home(&catalog.zone, &catalog.user);
        catalog.state.borrow_mut().ensure_collection(&home, &catalog.owner());
        catalog
    }

    /// Add a collection, creating missing parents.
    pub fn with_collection(self, path: &str) -> Self {
        let path = absolute(path);
        let owner = self.owner();
        self.state.borrow_mut().ensure_collection(&path, &owner);
        self
    }

    /// Add a data object with a single replica on [`DEFAULT_RESOURCE`].
    pub fn with_data_object(self, path: &str, size: u64) -> Self {
        let path = absolute(path);
        let owner = self.owner();
        {
            let mut state = self.state.borrow_mut();
            if let Some(parent) = path.parent() {
                state.ensure_collection(&parent, &owner);
            }
            state.create_data_object(&path, size, DEFAULT_RESOURCE, now(), &owner);
        }
        self
    }

    /// Grant `access_name` on `path` to `user#zone`.
    pub fn with_acl(self, path: &str, access_name: &str, user: &str, zone: &str) -> Self {
        let entry = AccessEntry {
            access_name: access_name.to_string(),
            user_name: user.to_string(),
            user_zone: zone.to_string(),
        };
        self.state
            .borrow_mut()
            .with_entity(&absolute(path), |acls, _| acls.push(entry));
        self
    }

    /// Attach an AVU to `path`.
    pub fn with_metadata(self, path: &str, attribute: &str, value: &str, unit: &str) -> Self {
        let entry = MetadataEntry {
            attribute: attribute.to_string(),
            value: value.to_string(),
            unit: unit.to_string(),
        };
        self.state
            .borrow_mut()
            .with_entity(&absolute(path), |_, avus| avus.push(entry));
        self
    }

    /// Append a replica to an existing data object.
    pub fn with_replica(self, path: &str, replica: Replica) -> Self {
        let path = absolute(path);
        if let Some(object) = self.state.borrow_mut().data_object_mut(&path) {
            object.replicas.push(replica);
        }
        self
    }

    /// Register a GenQuery2 query that compiles to `sql` and returns `rows`.
    pub fn with_query(self, query: &str, sql: &str, rows: Value) -> Self {
        self.state.borrow_mut().queries.push((
            query.to_string(),
            QueryFixture::Valid {
                sql: sql.to_string(),
                rows,
            },
        ));
        self
    }

    /// Register a GenQuery2 query the server rejects with `error`.
    pub fn with_query_error(self, query: &str, error: CatalogError) -> Self {
        self.state
            .borrow_mut()
            .queries
            .push((query.to_string(), QueryFixture::Failing(error)));
        self
    }

    /// Set the GenQuery2 column mappings.
    pub fn with_columns(self, columns: Value) -> Self {
        self.state.borrow_mut().columns = Some(columns);
        self
    }

    /// Make every call that names `path` fail with `error`.
    pub fn with_fault(self, path: &str, error: CatalogError) -> Self {
        self.state.borrow_mut().faults.push((absolute(path), error));
        self
    }

    /// Make every call fail as if the server were unreachable.
    pub fn offline(self) -> Self {
        self.state.borrow_mut().offline =
            Some(CatalogError::Network("connection refused".to_string()));
        self
    }

    /// Number of catalog calls made so far.
    pub fn calls(&self) -> usize {
        self.calls.get()
    }

    /// Whether `path` names a collection or data object.
    pub fn contains(&self, path: &str) -> bool {
        let path = absolute(path);
        let state = self.state.borrow();
        state.collection(&path).is_some() || state.data_object(&path).is_some()
    }

    /// Modification time of a collection or data object, in epoch seconds.
    pub fn modified(&self, path: &str) -> Option<i64> {
        self.state.borrow().modified(&absolute(path))
    }

    fn owner(&self) -> AccessEntry {
        AccessEntry {
            access_name: "own".to_string(),
            user_name: self.user.clone(),
            user_zone: self.zone.clone(),
        }
    }

    fn enter(&self, paths: &[&LogicalPath]) -> CatalogResult<()> {
        self.calls.set(self.calls.get() + 1);
        let state = self.state.borrow();
        if let Some(err) = &state.offline {
            return Err(err.clone());
        }
        for (faulty, err) in &state.faults {
            if paths.contains(&faulty) {
                return Err(err.clone());
            }
        }
        Ok(())
    }

    fn check_zone(&self, path: &LogicalPath) -> CatalogResult<()> {
        if path.zone() == self.zone {
            Ok(())
        } else {
            Err(CatalogError::server(
                codes::SYS_INVALID_ZONE_NAME,
                format!("zone '{}' is unknown", path.zone()),
            ))
        }
    }

    fn check_parent(&self, path: &LogicalPath) -> CatalogResult<()> {
        let parent = path.parent().unwrap_or_else(|| path.clone());
        if self.state.borrow().collection(&parent).is_some() {
            Ok(())
        } else {
            Err(CatalogError::server(
                codes::CAT_UNKNOWN_COLLECTION,
                format!("collection '{}' is unknown", parent),
            ))
        }
    }
}

impl State {
    fn allocate_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn collection(&self, path: &LogicalPath) -> Option<&StoredCollection> {
        self.collections.iter().find(|c| &c.path == path)
    }

    fn data_object(&self, path: &LogicalPath) -> Option<&StoredDataObject> {
        self.data_objects.iter().find(|d| &d.path == path)
    }

    fn data_object_mut(&mut self, path: &LogicalPath) -> Option<&mut StoredDataObject> {
        self.data_objects.iter_mut().find(|d| &d.path == path)
    }

    fn modified(&self, path: &LogicalPath) -> Option<i64> {
        self.collection(path)
            .map(|c| c.modified)
            .or_else(|| self.data_object(path).map(StoredDataObject::modified))
    }

    fn ensure_collection(&mut self, path: &LogicalPath, owner: &AccessEntry) {
        if self.collection(path).is_some() {
            return;
        }
        if let Some(parent) = path.parent() {
            self.ensure_collection(&parent, owner);
        }
        let id = self.allocate_id();
        self.collections.push(StoredCollection {
            id,
            path: path.clone(),
            acls: vec![owner.clone()],
            metadata: Vec::new(),
            modified: now(),
        });
    }

    fn create_data_object(
        &mut self,
        path: &LogicalPath,
        size: u64,
        resource: &str,
        mtime: i64,
        owner: &AccessEntry,
    ) {
        let id = self.allocate_id();
        let time = timestamp(mtime);
        let vault_path = format!(
            "/var/lib/irods/Vault{}",
            path.as_str()
                .splitn(3, '/')
                .nth(2)
                .map(|rest| format!("/{}", rest))
                .unwrap_or_default()
        );
        self.data_objects.push(StoredDataObject {
            id,
            path: path.clone(),
            acls: vec![owner.clone()],
            metadata: Vec::new(),
            replicas: vec![Replica {
                number: 0,
                status: "1".to_string(),
                size,
                physical_path: vault_path,
                resc_hier: resource.to_string(),
                resource_name: resource.to_string(),
                modify_time: time,
                create_time: time,
                checksum: None,
            }],
        });
    }

    fn with_entity(
        &mut self,
        path: &LogicalPath,
        apply: impl FnOnce(&mut Vec<AccessEntry>, &mut Vec<MetadataEntry>),
    ) {
        if let Some(c) = self.collections.iter_mut().find(|c| &c.path == path) {
            apply(&mut c.acls, &mut c.metadata);
        } else if let Some(d) = self.data_objects.iter_mut().find(|d| &d.path == path) {
            apply(&mut d.acls, &mut d.metadata);
        }
    }

    fn has_children(&self, path: &LogicalPath) -> bool {
        self.collections.iter().any(|c| c.path.is_descendant_of(path))
            || self.data_objects.iter().any(|d| d.path.is_descendant_of(path))
    }

    fn relocate(&mut self, source: &LogicalPath, destination: &LogicalPath) {
        let moved = |path: &LogicalPath| -> Option<LogicalPath> {
            if path == source {
                Some(destination.clone())
            } else if path.is_descendant_of(source) {
                let rest = &path.as_str()[source.as_str().trim_end_matches('/').len()..];
                LogicalPath::new(format!("{}{}", destination, rest)).ok()
            } else {
                None
            }
        };
        for c in &mut self.collections {
            if let Some(path) = moved(&c.path) {
                c.path = path;
            }
        }
        for d in &mut self.data_objects {
            if let Some(path) = moved(&d.path) {
                d.path = path;
            }
        }
    }
}

impl Catalog for MemoryCatalog {
    fn collection_exists(&self, path: &LogicalPath) -> CatalogResult<bool> {
        self.enter(&[path])?;
        Ok(self.state.borrow().collection(path).is_some())
    }

    fn data_object_exists(&self, path: &LogicalPath) -> CatalogResult<bool> {
        self.enter(&[path])?;
        Ok(self.state.borrow().data_object(path).is_some())
    }

    fn data_object(&self, path: &LogicalPath) -> CatalogResult<DataObjectEntry> {
        self.enter(&[path])?;
        self.state
            .borrow()
            .data_object(path)
            .map(|d| DataObjectEntry {
                id: d.id,
                path: d.path.clone(),
                size: d.size(),
            })
            .ok_or_else(|| {
                CatalogError::server(
                    codes::CAT_NO_ROWS_FOUND,
                    format!("data object '{}' does not exist", path),
                )
            })
    }

    fn subcollections(&self, path: &LogicalPath) -> CatalogResult<Vec<CollectionEntry>> {
        self.enter(&[path])?;
        Ok(self
            .state
            .borrow()
            .collections
            .iter()
            .filter(|c| c.path.parent().as_ref() == Some(path) && &c.path != path)
            .map(|c| CollectionEntry {
                id: c.id,
                path: c.path.clone(),
            })
            .collect())
    }

    fn data_objects_in(&self, path: &LogicalPath) -> CatalogResult<Vec<DataObjectEntry>> {
        self.enter(&[path])?;
        Ok(self
            .state
            .borrow()
            .data_objects
            .iter()
            .filter(|d| d.path.parent().as_ref() == Some(path))
            .map(|d| DataObjectEntry {
                id: d.id,
                path: d.path.clone(),
                size: d.size(),
            })
            .collect())
    }

    fn access_entries(
        &self,
        kind: EntityKind,
        path: &LogicalPath,
    ) -> CatalogResult<Vec<AccessEntry>> {
        self.enter(&[path])?;
        let state = self.state.borrow();
        let acls = match kind {
            EntityKind::Collection => state.collection(path).map(|c| c.acls.clone()),
            EntityKind::DataObject => state.data_object(path).map(|d| d.acls.clone()),
        };
        acls.ok_or_else(|| not_found(path))
    }

    fn metadata(&self, kind: EntityKind, path: &LogicalPath) -> CatalogResult<Vec<MetadataEntry>> {
        self.enter(&[path])?;
        let state = self.state.borrow();
        let avus = match kind {
            EntityKind::Collection => state.collection(path).map(|c| c.metadata.clone()),
            EntityKind::DataObject => state.data_object(path).map(|d| d.metadata.clone()),
        };
        avus.ok_or_else(|| not_found(path))
    }

    fn replicas(&self, path: &LogicalPath) -> CatalogResult<Vec<Replica>> {
        self.enter(&[path])?;
        self.state
            .borrow()
            .data_object(path)
            .map(|d| d.replicas.clone())
            .ok_or_else(|| not_found(path))
    }

    fn remove_collection(&self, path: &LogicalPath, options: RemoveOptions) -> CatalogResult<()> {
        self.enter(&[path])?;
        let mut state = self.state.borrow_mut();
        if state.collection(path).is_none() {
            return Err(CatalogError::server(
                codes::CAT_UNKNOWN_COLLECTION,
                format!("collection '{}' is unknown", path),
            ));
        }
        if state.has_children(path) && !options.recursive {
            return Err(CatalogError::server(
                codes::CAT_COLLECTION_NOT_EMPTY,
                format!("collection '{}' is not empty", path),
            ));
        }
        state
            .collections
            .retain(|c| &c.path != path && !c.path.is_descendant_of(path));
        state.data_objects.retain(|d| !d.path.is_descendant_of(path));
        Ok(())
    }

    fn unlink_data_object(&self, path: &LogicalPath, _options: RemoveOptions) -> CatalogResult<()> {
        self.enter(&[path])?;
        let mut state = self.state.borrow_mut();
        if state.data_object(path).is_none() {
            return Err(CatalogError::server(
                codes::SYS_INVALID_INPUT_PARAM,
                "path does not point to a data object",
            ));
        }
        state.data_objects.retain(|d| &d.path != path);
        Ok(())
    }

    fn rename(
        &self,
        kind: EntityKind,
        source: &LogicalPath,
        destination: &LogicalPath,
    ) -> CatalogResult<()> {
        self.enter(&[source, destination])?;
        self.check_zone(destination)?;

        let target = {
            let state = self.state.borrow();
            let exists = match kind {
                EntityKind::Collection => state.collection(source).is_some(),
                EntityKind::DataObject => state.data_object(source).is_some(),
            };
            if !exists {
                return Err(not_found(source));
            }

            // A data object moved onto a collection lands inside it.
            let target = if kind == EntityKind::DataObject
                && state.collection(destination).is_some()
            {
                destination.join(source.name())
            } else {
                destination.clone()
            };

            if state.collection(&target).is_some() {
                return Err(CatalogError::server(
                    codes::CAT_NAME_EXISTS_AS_COLLECTION,
                    format!("'{}' already exists", target),
                ));
            }
            if state.data_object(&target).is_some() {
                return Err(CatalogError::server(
                    codes::CAT_NAME_EXISTS_AS_DATAOBJ,
                    format!("'{}' already exists", target),
                ));
            }
            target
        };

        self.check_parent(&target)?;
        self.state.borrow_mut().relocate(source, &target);
        Ok(())
    }

    fn touch(
        &self,
        kind: EntityKind,
        path: &LogicalPath,
        options: &TouchOptions,
    ) -> CatalogResult<()> {
        let mut named = vec![path];
        if let Some(MtimeSource::Reference(reference)) = &options.mtime {
            named.push(reference);
        }
        self.enter(&named)?;
        self.check_zone(path)?;

        let mtime = match &options.mtime {
            Some(MtimeSource::SecondsSinceEpoch(seconds)) => *seconds,
            Some(MtimeSource::Reference(reference)) => {
                self.state.borrow().modified(reference).ok_or_else(|| {
                    CatalogError::server(
                        codes::OBJ_PATH_DOES_NOT_EXIST,
                        format!("reference '{}' does not exist", reference),
                    )
                })?
            }
            None => now(),
        };

        if kind == EntityKind::Collection {
            let mut state = self.state.borrow_mut();
            return match state.collections.iter_mut().find(|c| &c.path == path) {
                Some(collection) => {
                    collection.modified = mtime;
                    Ok(())
                }
                None => Err(not_found(path)),
            };
        }

        let exists = self.state.borrow().data_object(path).is_some();
        if !exists {
            self.check_parent(path)?;
            let resource = match &options.replica {
                Some(ReplicaTarget::ReplicaNumber(_)) => {
                    return Err(CatalogError::server(
                        codes::SYS_INVALID_INPUT_PARAM,
                        "replica numbers cannot be used to create data objects",
                    ));
                }
                Some(ReplicaTarget::LeafResource(name)) => name.clone(),
                None => DEFAULT_RESOURCE.to_string(),
            };
            let owner = self.owner();
            self.state
                .borrow_mut()
                .create_data_object(path, 0, &resource, mtime, &owner);
            return Ok(());
        }

        let mut state = self.state.borrow_mut();
        let object = state.data_object_mut(path).ok_or_else(|| not_found(path))?;
        let time = timestamp(mtime);
        let mut touched = 0;
        for replica in &mut object.replicas {
            let selected = match &options.replica {
                Some(ReplicaTarget::LeafResource(name)) => &replica.resource_name == name,
                Some(ReplicaTarget::ReplicaNumber(number)) => replica.number == *number,
                None => true,
            };
            if selected {
                replica.modify_time = time;
                touched += 1;
            }
        }
        if touched == 0 {
            return Err(CatalogError::server(
                codes::SYS_INVALID_INPUT_PARAM,
                format!("no matching replica of '{}'", path),
            ));
        }
        Ok(())
    }

    fn general_query(&self, query: &str, zone: &str, sql_only: bool) -> CatalogResult<QueryOutput> {
        self.enter(&[])?;
        if zone != self.zone {
            return Err(CatalogError::server(
                codes::SYS_INVALID_ZONE_NAME,
                format!("zone '{}' is unknown", zone),
            ));
        }

        let state = self.state.borrow();
        match state.queries.iter().find(|(q, _)| q == query) {
            Some((_, QueryFixture::Valid { sql, rows })) => Ok(if sql_only {
                QueryOutput::Sql(sql.clone())
            } else {
                QueryOutput::Rows(rows.clone())
            }),
            Some((_, QueryFixture::Failing(err))) => Err(err.clone()),
            None => Err(CatalogError::server(codes::SYS_LIBRARY_ERROR, "")),
        }
    }

    fn query_columns(&self, zone: &str) -> CatalogResult<Value> {
        self.enter(&[])?;
        if zone != self.zone {
            return Err(CatalogError::server(
                codes::SYS_INVALID_ZONE_NAME,
                format!("zone '{}' is unknown", zone),
            ));
        }
        Ok(self
            .state
            .borrow()
            .columns
            .clone()
            .unwrap_or_else(|| Value::Object(Default::default())))
    }
}

fn absolute(path: &str) -> LogicalPath {
    LogicalPath::root().join(path.trim_start_matches('/'))
}

fn now() -> i64 {
    Utc::now().timestamp()
}

fn timestamp(seconds: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(seconds, 0).unwrap_or_default()
}

fn not_found(path: &LogicalPath) -> CatalogError {
    CatalogError::server(
        codes::OBJ_PATH_DOES_NOT_EXIST,
        format!("path '{}' does not exist", path),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(p: &str) -> LogicalPath {
        LogicalPath::new(p).unwrap()
    }

    fn catalog() -> MemoryCatalog {
        MemoryCatalog::new("tempZone", "rods")
    }

    #[test]
    fn new_creates_home() {
        let catalog = catalog();
        assert!(catalog.contains("/tempZone/home/rods"));
        assert!(catalog.contains("/tempZone"));
        assert!(catalog.contains("/"));
    }

    #[test]
    fn enumeration_keeps_insertion_order() {
        let catalog = catalog()
            .with_collection("/tempZone/home/rods/zeta")
            .with_collection("/tempZone/home/rods/alpha");
        let names: Vec<String> = catalog
            .subcollections(&path("/tempZone/home/rods"))
            .unwrap()
            .iter()
            .map(|c| c.name().to_string())
            .collect();
        assert_eq!(names, vec!["zeta", "alpha"]);
    }

    #[test]
    fn touch_creates_missing_data_object() {
        let catalog = catalog();
        let target = path("/tempZone/home/rods/newfile");
        catalog
            .touch(EntityKind::DataObject, &target, &TouchOptions::default())
            .unwrap();
        assert!(catalog.data_object_exists(&target).unwrap());
    }

    #[test]
    fn touch_with_unknown_parent_fails() {
        let err = catalog()
            .touch(
                EntityKind::DataObject,
                &path("/tempZone/nopes/nopes/nopes"),
                &TouchOptions::default(),
            )
            .unwrap_err();
        assert_eq!(err.code(), Some(codes::CAT_UNKNOWN_COLLECTION));
        assert!(err
            .to_string()
            .contains("collection '/tempZone/nopes/nopes' is unknown"));
    }

    #[test]
    fn touch_in_other_zone_fails() {
        let err = catalog()
            .touch(
                EntityKind::DataObject,
                &path("/notallowed"),
                &TouchOptions::default(),
            )
            .unwrap_err();
        assert!(err.to_string().contains("SYS_INVALID_ZONE_NAME"));
    }

    #[test]
    fn touch_sets_explicit_mtime() {
        let catalog = catalog().with_data_object("/tempZone/home/rods/one", 3);
        let options = TouchOptions {
            mtime: Some(MtimeSource::SecondsSinceEpoch(345)),
            replica: None,
        };
        catalog
            .touch(EntityKind::DataObject, &path("/tempZone/home/rods/one"), &options)
            .unwrap();
        assert_eq!(catalog.modified("/tempZone/home/rods/one"), Some(345));
    }

    #[test]
    fn touch_copies_reference_mtime() {
        let catalog = catalog()
            .with_data_object("/tempZone/home/rods/one", 3)
            .with_data_object("/tempZone/home/rods/two", 3);
        let set = TouchOptions {
            mtime: Some(MtimeSource::SecondsSinceEpoch(1_000)),
            replica: None,
        };
        catalog
            .touch(EntityKind::DataObject, &path("/tempZone/home/rods/one"), &set)
            .unwrap();
        let copy = TouchOptions {
            mtime: Some(MtimeSource::Reference(path("/tempZone/home/rods/one"))),
            replica: None,
        };
        catalog
            .touch(EntityKind::DataObject, &path("/tempZone/home/rods/two"), &copy)
            .unwrap();
        assert_eq!(catalog.modified("/tempZone/home/rods/two"), Some(1_000));
    }

    #[test]
    fn replica_number_cannot_create() {
        let options = TouchOptions {
            mtime: None,
            replica: Some(ReplicaTarget::ReplicaNumber(0)),
        };
        let err = catalog()
            .touch(
                EntityKind::DataObject,
                &path("/tempZone/home/rods/fresh"),
                &options,
            )
            .unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn rename_refuses_to_overwrite() {
        let catalog = catalog()
            .with_data_object("/tempZone/home/rods/a", 1)
            .with_data_object("/tempZone/home/rods/b", 1);
        let err = catalog
            .rename(
                EntityKind::DataObject,
                &path("/tempZone/home/rods/a"),
                &path("/tempZone/home/rods/b"),
            )
            .unwrap_err();
        assert_eq!(err.code(), Some(codes::CAT_NAME_EXISTS_AS_DATAOBJ));
    }

    #[test]
    fn rename_into_collection() {
        let catalog = catalog()
            .with_data_object("/tempZone/home/rods/a", 1)
            .with_collection("/tempZone/home/rods/one");
        catalog
            .rename(
                EntityKind::DataObject,
                &path("/tempZone/home/rods/a"),
                &path("/tempZone/home/rods/one"),
            )
            .unwrap();
        assert!(catalog.contains("/tempZone/home/rods/one/a"));
    }

    #[test]
    fn rename_collection_moves_subtree() {
        let catalog = catalog().with_data_object("/tempZone/home/rods/one/2", 1);
        catalog
            .rename(
                EntityKind::Collection,
                &path("/tempZone/home/rods/one"),
                &path("/tempZone/home/rods/two"),
            )
            .unwrap();
        assert!(catalog.contains("/tempZone/home/rods/two/2"));
        assert!(!catalog.contains("/tempZone/home/rods/one"));
    }

    #[test]
    fn remove_non_empty_collection_requires_recursion() {
        let catalog = catalog().with_data_object("/tempZone/home/rods/one/2", 1);
        let one = path("/tempZone/home/rods/one");
        let err = catalog
            .remove_collection(&one, RemoveOptions::default())
            .unwrap_err();
        assert_eq!(err.code(), Some(codes::CAT_COLLECTION_NOT_EMPTY));

        catalog
            .remove_collection(
                &one,
                RemoveOptions {
                    recursive: true,
                    force: false,
                },
            )
            .unwrap();
        assert!(!catalog.contains("/tempZone/home/rods/one/2"));
    }

    #[test]
    fn unlink_missing_data_object_fails() {
        let err = catalog()
            .unlink_data_object(
                &path("/tempZone/home/rods/doesnotexist"),
                RemoveOptions::default(),
            )
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "path does not point to a data object: SYS_INVALID_INPUT_PARAM"
        );
    }

    #[test]
    fn unknown_query_is_a_library_error() {
        let err = catalog()
            .general_query("nopes", "tempZone", false)
            .unwrap_err();
        assert!(err.is_library_error());
    }

    #[test]
    fn faults_and_offline() {
        let catalog = catalog().with_fault(
            "/tempZone/home/rods",
            CatalogError::Network("reset".to_string()),
        );
        assert!(catalog
            .collection_exists(&path("/tempZone/home/rods"))
            .is_err());
        assert!(catalog.collection_exists(&path("/tempZone")).is_ok());

        let offline = MemoryCatalog::new("tempZone", "rods").offline();
        assert!(matches!(
            offline.collection_exists(&path("/tempZone")),
            Err(CatalogError::Network(_))
        ));
        assert_eq!(offline.calls(), 1);
    }
}
