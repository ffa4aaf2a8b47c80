//! Per-invocation session context.

use std::path::PathBuf;

use crate::config::{environment_path, IrodsEnvironment};
use crate::error::{CliError, Result};
use crate::path::LogicalPath;

use super::WorkingDirectoryStore;

/// Environment settings plus the invoking shell's working-directory record.
///
/// Built once at startup and handed to every command. The record is read
/// here and nowhere else, so every path in one invocation resolves against
/// the same working collection.
#[derive(Debug, Clone)]
pub struct SessionContext {
    environment: IrodsEnvironment,
    store: WorkingDirectoryStore,
    current: LogicalPath,
}

impl SessionContext {
    /// Create a context from already-loaded parts, reading the record once.
    pub fn new(environment: IrodsEnvironment, store: WorkingDirectoryStore) -> Self {
        let current = store.current_collection(&environment.home_collection());
        Self {
            environment,
            store,
            current,
        }
    }

    /// Load the environment file and locate the parent shell's record.
    pub fn load() -> Result<Self> {
        let path = environment_path()?;
        let environment = IrodsEnvironment::load(&path)?;
        let store = WorkingDirectoryStore::for_parent_process().ok_or_else(|| {
            CliError::WorkingDirectory {
                path: PathBuf::from("~/.irods"),
                message: "home directory could not be determined".to_string(),
            }
        })?;
        Ok(Self::new(environment, store))
    }

    /// Environment settings.
    pub fn environment(&self) -> &IrodsEnvironment {
        &self.environment
    }

    /// Working-directory record for this shell.
    pub fn store(&self) -> &WorkingDirectoryStore {
        &self.store
    }

    /// Zone the session belongs to.
    pub fn zone(&self) -> &str {
        &self.environment.irods_zone_name
    }

    /// `/<zone>/home/<user>`.
    pub fn home_collection(&self) -> LogicalPath {
        self.environment.home_collection()
    }

    /// The working collection as of startup, or the home collection.
    pub fn current_collection(&self) -> &LogicalPath {
        &self.current
    }

    /// Resolve a user-supplied path against the current collection.
    ///
    /// # Errors
    ///
    /// Returns `CliError::EmptyPath` for an empty argument.
    pub fn resolve(&self, raw: &str) -> Result<LogicalPath> {
        if raw.is_empty() {
            return Err(CliError::EmptyPath);
        }
        Ok(LogicalPath::resolve(raw, &self.current))
    }

    /// Resolve an optional argument; absent or empty means the current
    /// collection.
    pub fn resolve_or_current(&self, raw: Option<&str>) -> LogicalPath {
        match raw.filter(|r| !r.is_empty()) {
            Some(raw) => LogicalPath::resolve(raw, &self.current),
            None => self.current.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store(temp: &TempDir) -> WorkingDirectoryStore {
        WorkingDirectoryStore::in_dir(&temp.path().join(".irods"), 99)
    }

    fn context(temp: &TempDir) -> SessionContext {
        let environment = IrodsEnvironment::parse(
            r#"{"irods_user_name": "rods", "irods_zone_name": "tempZone"}"#,
        )
        .unwrap();
        SessionContext::new(environment, store(temp))
    }

    #[test]
    fn current_defaults_to_home() {
        let temp = TempDir::new().unwrap();
        let ctx = context(&temp);
        assert_eq!(ctx.current_collection().as_str(), "/tempZone/home/rods");
    }

    #[test]
    fn resolve_uses_stored_collection() {
        let temp = TempDir::new().unwrap();
        store(&temp)
            .set(&LogicalPath::new("/tempZone/home").unwrap())
            .unwrap();
        let ctx = context(&temp);
        assert_eq!(ctx.resolve("rods").unwrap().as_str(), "/tempZone/home/rods");
        assert_eq!(ctx.resolve("/other").unwrap().as_str(), "/other");
    }

    #[test]
    fn resolve_rejects_empty() {
        let temp = TempDir::new().unwrap();
        let err = context(&temp).resolve("").unwrap_err();
        assert_eq!(err.to_string(), "logical path must not be empty");
    }

    #[test]
    fn resolve_or_current_treats_empty_as_absent() {
        let temp = TempDir::new().unwrap();
        let ctx = context(&temp);
        assert_eq!(ctx.resolve_or_current(None), ctx.home_collection());
        assert_eq!(ctx.resolve_or_current(Some("")), ctx.home_collection());
        assert_eq!(
            ctx.resolve_or_current(Some("one")).as_str(),
            "/tempZone/home/rods/one"
        );
    }

    #[test]
    fn record_is_read_once_per_context() {
        let temp = TempDir::new().unwrap();
        store(&temp)
            .set(&LogicalPath::new("/tempZone/home/rods/one").unwrap())
            .unwrap();
        let ctx = context(&temp);
        let source = ctx.resolve("a").unwrap();

        store(&temp)
            .set(&LogicalPath::new("/tempZone/home/rods").unwrap())
            .unwrap();
        let destination = ctx.resolve("c").unwrap();

        assert_eq!(source.as_str(), "/tempZone/home/rods/one/a");
        assert_eq!(destination.as_str(), "/tempZone/home/rods/one/c");
        assert_eq!(context(&temp).resolve("c").unwrap().as_str(), "/tempZone/home/rods/c");
    }

    #[test]
    fn record_removed_after_startup_is_not_noticed() {
        let temp = TempDir::new().unwrap();
        store(&temp)
            .set(&LogicalPath::new("/tempZone/home").unwrap())
            .unwrap();
        let ctx = context(&temp);
        ctx.store().clear().unwrap();
        assert_eq!(ctx.current_collection().as_str(), "/tempZone/home");
    }
}
