//! Catalog access over the iRODS HTTP API.
//!
//! Reads go through GenQuery1 (`/query?op=execute_genquery&parser=genquery1`),
//! except ACLs which come from the `stat` operations. Mutations are form
//! POSTs to `/collections` and `/data-objects`. Every response carries an
//! `irods_response.status_code`; a non-zero code becomes
//! [`CatalogError::Server`].

use std::cell::RefCell;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

use super::{
    codes, AccessEntry, Catalog, CatalogError, CatalogResult, CollectionEntry, DataObjectEntry,
    EntityKind, MetadataEntry, MtimeSource, QueryOutput, RemoveOptions, Replica, ReplicaTarget,
    TouchOptions,
};
use crate::path::LogicalPath;

/// Rows requested per GenQuery1 page.
const PAGE_SIZE: usize = 256;

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Blocking client for the iRODS HTTP API.
pub struct HttpCatalog {
    base_url: String,
    username: String,
    password: Option<String>,
    client: reqwest::blocking::Client,
    token: RefCell<Option<String>>,
}

#[derive(Debug, Deserialize)]
struct IrodsResponse {
    status_code: i32,
    #[serde(default)]
    status_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Permission {
    name: String,
    zone: String,
    perm: String,
}

impl HttpCatalog {
    /// Create a client for the API rooted at `base_url`.
    ///
    /// No request is made until the first catalog call.
    pub fn new(
        base_url: impl Into<String>,
        username: impl Into<String>,
        password: Option<String>,
        timeout: Duration,
    ) -> CatalogResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            username: username.into(),
            password,
            client,
            token: RefCell::new(None),
        })
    }

    /// The API root this client talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, name: &str) -> String {
        format!("{}/{}", self.base_url, name)
    }

    fn token(&self) -> CatalogResult<String> {
        if let Some(token) = self.token.borrow().as_ref() {
            return Ok(token.clone());
        }
        let token = self.authenticate()?;
        *self.token.borrow_mut() = Some(token.clone());
        Ok(token)
    }

    fn authenticate(&self) -> CatalogResult<String> {
        let url = self.endpoint("authenticate");
        tracing::debug!(user = %self.username, "authenticating against {}", url);

        let response = self
            .client
            .post(&url)
            .basic_auth(&self.username, self.password.as_deref())
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::server(
                codes::CAT_INVALID_AUTHENTICATION,
                format!("authentication as '{}' was rejected", self.username),
            ));
        }

        let token = response.text()?.trim().to_string();
        if token.is_empty() {
            return Err(CatalogError::Protocol {
                endpoint: "authenticate".to_string(),
                message: "empty bearer token".to_string(),
            });
        }
        Ok(token)
    }

    fn get(&self, endpoint: &str, params: &[(&str, String)]) -> CatalogResult<Value> {
        let token = self.token()?;
        tracing::debug!(endpoint, ?params, "GET");
        let response = self
            .client
            .get(self.endpoint(endpoint))
            .bearer_auth(token)
            .query(params)
            .send()?;
        decode(endpoint, response)
    }

    fn post(&self, endpoint: &str, params: &[(&str, String)]) -> CatalogResult<Value> {
        let token = self.token()?;
        tracing::debug!(endpoint, ?params, "POST");
        let response = self
            .client
            .post(self.endpoint(endpoint))
            .bearer_auth(token)
            .form(params)
            .send()?;
        decode(endpoint, response)
    }

    /// Run a GenQuery1 query, following pages until the result is exhausted.
    fn genquery1(&self, query: &str) -> CatalogResult<Vec<Vec<String>>> {
        let mut rows = Vec::new();
        let mut offset = 0usize;

        loop {
            let value = self.get(
                "query",
                &[
                    ("op", "execute_genquery".to_string()),
                    ("parser", "genquery1".to_string()),
                    ("query", query.to_string()),
                    ("offset", offset.to_string()),
                    ("count", PAGE_SIZE.to_string()),
                ],
            )?;
            let page: Vec<Vec<String>> = match value.get("rows") {
                Some(rows) => serde_json::from_value(rows.clone()).map_err(|e| {
                    CatalogError::Protocol {
                        endpoint: "query".to_string(),
                        message: e.to_string(),
                    }
                })?,
                None => Vec::new(),
            };

            let count = page.len();
            rows.extend(page);
            if count < PAGE_SIZE {
                break;
            }
            offset += count;
        }

        Ok(rows)
    }

    fn stat(&self, kind: EntityKind, path: &LogicalPath) -> CatalogResult<Value> {
        self.get(
            kind_endpoint(kind),
            &[("op", "stat".to_string()), ("lpath", path.to_string())],
        )
    }
}

impl Catalog for HttpCatalog {
    fn collection_exists(&self, path: &LogicalPath) -> CatalogResult<bool> {
        let rows = self.genquery1(&format!(
            "select COLL_ID where COLL_NAME = {}",
            quote(path.as_str())?
        ))?;
        Ok(!rows.is_empty())
    }

    fn data_object_exists(&self, path: &LogicalPath) -> CatalogResult<bool> {
        Ok(!self.data_object_rows(path)?.is_empty())
    }

    fn data_object(&self, path: &LogicalPath) -> CatalogResult<DataObjectEntry> {
        let parent = parent_of(path);
        self.data_object_rows(path)?
            .into_iter()
            .next()
            .map(|row| data_object_from_row(&parent, &row))
            .transpose()?
            .ok_or_else(|| {
                CatalogError::server(
                    codes::CAT_NO_ROWS_FOUND,
                    format!("data object '{}' does not exist", path),
                )
            })
    }

    fn subcollections(&self, path: &LogicalPath) -> CatalogResult<Vec<CollectionEntry>> {
        let rows = self.genquery1(&format!(
            "select COLL_ID, COLL_NAME where COLL_PARENT_NAME = {}",
            quote(path.as_str())?
        ))?;

        let mut entries = Vec::with_capacity(rows.len());
        for row in rows {
            let [id, name] = columns::<2>(&row)?;
            // The root collection is its own parent.
            if name == path.as_str() {
                continue;
            }
            entries.push(CollectionEntry {
                id: parse_number(id, "COLL_ID")?,
                path: LogicalPath::new(name.clone()).map_err(|e| protocol(e.to_string()))?,
            });
        }
        Ok(entries)
    }

    fn data_objects_in(&self, path: &LogicalPath) -> CatalogResult<Vec<DataObjectEntry>> {
        let rows = self.genquery1(&format!(
            "select DATA_ID, DATA_NAME, DATA_SIZE where COLL_NAME = {}",
            quote(path.as_str())?
        ))?;

        // One row per replica; keep the first row of each object.
        let mut entries: Vec<DataObjectEntry> = Vec::new();
        for row in rows {
            let entry = data_object_from_row(path, &row)?;
            if !entries.iter().any(|e| e.id == entry.id) {
                entries.push(entry);
            }
        }
        Ok(entries)
    }

    fn access_entries(
        &self,
        kind: EntityKind,
        path: &LogicalPath,
    ) -> CatalogResult<Vec<AccessEntry>> {
        let value = self.stat(kind, path)?;
        let permissions: Vec<Permission> = match value.get("permissions") {
            Some(perms) => serde_json::from_value(perms.clone())
                .map_err(|e| protocol(format!("permissions: {}", e)))?,
            None => Vec::new(),
        };
        Ok(permissions
            .into_iter()
            .map(|p| AccessEntry {
                access_name: p.perm,
                user_name: p.name,
                user_zone: p.zone,
            })
            .collect())
    }

    fn metadata(&self, kind: EntityKind, path: &LogicalPath) -> CatalogResult<Vec<MetadataEntry>> {
        let query = match kind {
            EntityKind::Collection => format!(
                "select META_COLL_ATTR_NAME, META_COLL_ATTR_VALUE, META_COLL_ATTR_UNITS \
                 where COLL_NAME = {}",
                quote(path.as_str())?
            ),
            EntityKind::DataObject => format!(
                "select META_DATA_ATTR_NAME, META_DATA_ATTR_VALUE, META_DATA_ATTR_UNITS \
                 where COLL_NAME = {} and DATA_NAME = {}",
                quote(parent_of(path).as_str())?,
                quote(path.name())?
            ),
        };

        self.genquery1(&query)?
            .iter()
            .map(|row| {
                let [attribute, value, unit] = columns::<3>(row)?;
                Ok(MetadataEntry {
                    attribute: attribute.clone(),
                    value: value.clone(),
                    unit: unit.clone(),
                })
            })
            .collect()
    }

    fn replicas(&self, path: &LogicalPath) -> CatalogResult<Vec<Replica>> {
        let query = format!(
            "select DATA_REPL_NUM, DATA_REPL_STATUS, DATA_SIZE, DATA_PATH, DATA_RESC_HIER, \
             DATA_RESC_NAME, DATA_MODIFY_TIME, DATA_CREATE_TIME, DATA_CHECKSUM \
             where COLL_NAME = {} and DATA_NAME = {}",
            quote(parent_of(path).as_str())?,
            quote(path.name())?
        );

        self.genquery1(&query)?
            .iter()
            .map(|row| {
                let [number, status, size, physical, hier, resource, modified, created, checksum] =
                    columns::<9>(row)?;
                Ok(Replica {
                    number: parse_number(number, "DATA_REPL_NUM")?,
                    status: status.clone(),
                    size: parse_number(size, "DATA_SIZE")?,
                    physical_path: physical.clone(),
                    resc_hier: hier.clone(),
                    resource_name: resource.clone(),
                    modify_time: parse_timestamp(modified, "DATA_MODIFY_TIME")?,
                    create_time: parse_timestamp(created, "DATA_CREATE_TIME")?,
                    checksum: if checksum.is_empty() {
                        None
                    } else {
                        Some(checksum.clone())
                    },
                })
            })
            .collect()
    }

    fn remove_collection(&self, path: &LogicalPath, options: RemoveOptions) -> CatalogResult<()> {
        self.post(
            "collections",
            &[
                ("op", "remove".to_string()),
                ("lpath", path.to_string()),
                ("recurse", flag(options.recursive)),
                ("no-trash", flag(options.force)),
            ],
        )?;
        Ok(())
    }

    fn unlink_data_object(&self, path: &LogicalPath, options: RemoveOptions) -> CatalogResult<()> {
        self.post(
            "data-objects",
            &[
                ("op", "remove".to_string()),
                ("lpath", path.to_string()),
                ("catalog-only", flag(false)),
                ("no-trash", flag(options.force)),
            ],
        )?;
        Ok(())
    }

    fn rename(
        &self,
        kind: EntityKind,
        source: &LogicalPath,
        destination: &LogicalPath,
    ) -> CatalogResult<()> {
        self.post(
            kind_endpoint(kind),
            &[
                ("op", "rename".to_string()),
                ("old-lpath", source.to_string()),
                ("new-lpath", destination.to_string()),
            ],
        )?;
        Ok(())
    }

    fn touch(
        &self,
        kind: EntityKind,
        path: &LogicalPath,
        options: &TouchOptions,
    ) -> CatalogResult<()> {
        let mut params = vec![("op", "touch".to_string()), ("lpath", path.to_string())];
        if kind == EntityKind::DataObject {
            params.push(("no-create", flag(false)));
        }
        match &options.mtime {
            Some(MtimeSource::SecondsSinceEpoch(seconds)) => {
                params.push(("seconds-since-epoch", seconds.to_string()));
            }
            Some(MtimeSource::Reference(reference)) => {
                params.push(("reference", reference.to_string()));
            }
            None => {}
        }
        match &options.replica {
            Some(ReplicaTarget::LeafResource(name)) => {
                params.push(("leaf-resource", name.clone()));
            }
            Some(ReplicaTarget::ReplicaNumber(number)) => {
                params.push(("replica-number", number.to_string()));
            }
            None => {}
        }

        self.post(kind_endpoint(kind), &params)?;
        Ok(())
    }

    fn general_query(&self, query: &str, zone: &str, sql_only: bool) -> CatalogResult<QueryOutput> {
        let mut params = vec![
            ("op", "execute_genquery".to_string()),
            ("parser", "genquery2".to_string()),
            ("query", query.to_string()),
            ("zone", zone.to_string()),
        ];
        if sql_only {
            params.push(("sql-only", flag(true)));
        }

        let value = self.get("query", &params)?;
        if sql_only {
            value
                .get("sql")
                .and_then(Value::as_str)
                .map(|sql| QueryOutput::Sql(sql.to_string()))
                .ok_or_else(|| protocol("missing 'sql' in GenQuery2 response"))
        } else {
            Ok(QueryOutput::Rows(
                value.get("rows").cloned().unwrap_or_else(|| Value::Array(Vec::new())),
            ))
        }
    }

    fn query_columns(&self, zone: &str) -> CatalogResult<Value> {
        let value = self.get(
            "query",
            &[
                ("op", "list_genquery_columns".to_string()),
                ("zone", zone.to_string()),
            ],
        )?;
        value
            .get("columns")
            .cloned()
            .ok_or_else(|| protocol("missing 'columns' in GenQuery2 response"))
    }
}

impl HttpCatalog {
    fn data_object_rows(&self, path: &LogicalPath) -> CatalogResult<Vec<Vec<String>>> {
        self.genquery1(&format!(
            "select DATA_ID, DATA_NAME, DATA_SIZE where COLL_NAME = {} and DATA_NAME = {}",
            quote(parent_of(path).as_str())?,
            quote(path.name())?
        ))
    }
}

fn decode(endpoint: &str, response: reqwest::blocking::Response) -> CatalogResult<Value> {
    let status = response.status();
    let body = response.text()?;

    let value: Value = match serde_json::from_str(&body) {
        Ok(value) => value,
        Err(_) if !status.is_success() => {
            return Err(CatalogError::Http {
                status: status.as_u16(),
                endpoint: endpoint.to_string(),
            });
        }
        Err(e) => {
            return Err(CatalogError::Protocol {
                endpoint: endpoint.to_string(),
                message: e.to_string(),
            });
        }
    };

    if let Some(irods) = value.get("irods_response") {
        let irods: IrodsResponse =
            serde_json::from_value(irods.clone()).map_err(|e| CatalogError::Protocol {
                endpoint: endpoint.to_string(),
                message: e.to_string(),
            })?;
        if irods.status_code != 0 {
            tracing::debug!(endpoint, code = irods.status_code, "iRODS error");
            return Err(CatalogError::server(
                irods.status_code,
                irods.status_message.unwrap_or_default(),
            ));
        }
    }

    if !status.is_success() {
        return Err(CatalogError::Http {
            status: status.as_u16(),
            endpoint: endpoint.to_string(),
        });
    }

    Ok(value)
}

fn kind_endpoint(kind: EntityKind) -> &'static str {
    match kind {
        EntityKind::Collection => "collections",
        EntityKind::DataObject => "data-objects",
    }
}

/// Wrap a GenQuery1 value in single quotes.
///
/// GenQuery1 has no escape for a quote inside a value, so such values are
/// rejected before anything is sent.
fn quote(value: &str) -> CatalogResult<String> {
    if value.contains('\'') {
        return Err(protocol(format!(
            "GenQuery1 cannot match a value containing a single quote: {}",
            value
        )));
    }
    Ok(format!("'{}'", value))
}

fn flag(value: bool) -> String {
    let flag = if value { "1" } else { "0" };
    flag.to_string()
}

fn parent_of(path: &LogicalPath) -> LogicalPath {
    path.parent().unwrap_or_else(|| path.clone())
}

fn protocol(message: impl Into<String>) -> CatalogError {
    CatalogError::Protocol {
        endpoint: "query".to_string(),
        message: message.into(),
    }
}

fn columns<const N: usize>(row: &[String]) -> CatalogResult<[&String; N]> {
    let cells: Vec<&String> = row.iter().collect();
    cells
        .try_into()
        .map_err(|_| protocol(format!("expected {} columns, got {}", N, row.len())))
}

fn parse_number<T: std::str::FromStr>(value: &str, column: &str) -> CatalogResult<T> {
    value
        .trim()
        .parse()
        .map_err(|_| protocol(format!("{} is not a number: '{}'", column, value)))
}

fn parse_timestamp(value: &str, column: &str) -> CatalogResult<DateTime<Utc>> {
    let seconds: i64 = parse_number(value, column)?;
    DateTime::from_timestamp(seconds, 0)
        .ok_or_else(|| protocol(format!("{} is out of range: '{}'", column, value)))
}

fn data_object_from_row(collection: &LogicalPath, row: &[String]) -> CatalogResult<DataObjectEntry> {
    let [id, name, size] = columns::<3>(row)?;
    Ok(DataObjectEntry {
        id: parse_number(id, "DATA_ID")?,
        path: collection.join(name),
        size: parse_number(size, "DATA_SIZE")?,
    })
}
