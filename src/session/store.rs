//! Working-directory storage.
//!
//! Each interactive shell gets its own current collection, keyed by the
//! parent process id of the CLI: `~/.irods/.irods_environment.json.<ppid>`
//! holding `{"irods_cwd": "<path>"}`.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::CliError;
use crate::path::LogicalPath;

const RECORD_PREFIX: &str = ".irods_environment.json";

#[derive(Debug, Serialize, Deserialize)]
struct Record {
    irods_cwd: String,
}

/// Persistent per-shell current collection.
#[derive(Debug, Clone)]
pub struct WorkingDirectoryStore {
    path: PathBuf,
}

impl WorkingDirectoryStore {
    /// Create a store backed by the record file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The record for process `ppid` inside `irods_dir`.
    pub fn in_dir(irods_dir: &Path, ppid: u32) -> Self {
        Self::new(irods_dir.join(format!("{}.{}", RECORD_PREFIX, ppid)))
    }

    /// The record for the shell that invoked this process.
    ///
    /// Returns `None` if the home directory cannot be determined.
    pub fn for_parent_process() -> Option<Self> {
        let irods_dir = dirs::home_dir()?.join(".irods");
        Some(Self::in_dir(&irods_dir, parent_process_id()))
    }

    /// Location of the record file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored collection.
    ///
    /// A missing record is `Ok(None)`. Unreadable or malformed content and a
    /// non-absolute `irods_cwd` are errors.
    pub fn load(&self) -> Result<Option<LogicalPath>> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to read {:?}", self.path));
            }
        };
        let record: Record = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse {:?}", self.path))?;
        let path = LogicalPath::new(record.irods_cwd)?;
        Ok(Some(path))
    }

    /// The stored collection, or `home` when there is none or it is unusable.
    pub fn current_collection(&self, home: &LogicalPath) -> LogicalPath {
        match self.load() {
            Ok(Some(path)) => path,
            Ok(None) => home.clone(),
            Err(e) => {
                debug!("Ignoring working-directory record: {:#}", e);
                home.clone()
            }
        }
    }

    /// Overwrite the record with `path`.
    ///
    /// Uses the write-to-temp-then-rename pattern so a concurrent reader
    /// never sees a partial record.
    pub fn set(&self, path: &LogicalPath) -> crate::error::Result<()> {
        self.write(path).map_err(|e| self.update_error(e))
    }

    fn write(&self, path: &LogicalPath) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let record = Record {
            irods_cwd: path.to_string(),
        };
        let content = serde_json::to_string(&record)?;

        let mut temp_path = self.path.clone().into_os_string();
        temp_path.push(".tmp");
        let temp_path = PathBuf::from(temp_path);
        fs::write(&temp_path, content)?;
        fs::rename(&temp_path, &self.path)?;

        debug!("Current collection set to {} in {:?}", path, self.path);
        Ok(())
    }

    /// Delete the record. A record that does not exist is not an error.
    pub fn clear(&self) -> crate::error::Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                debug!("Cleared working-directory record {:?}", self.path);
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(self.update_error(e)),
        }
    }

    fn update_error(&self, err: std::io::Error) -> CliError {
        CliError::WorkingDirectory {
            path: self.path.clone(),
            message: err.to_string(),
        }
    }
}

/// Id of the process that invoked the CLI.
pub fn parent_process_id() -> u32 {
    #[cfg(unix)]
    {
        // SAFETY: getppid() is a simple syscall that always succeeds
        unsafe { libc::getppid() as u32 }
    }

    #[cfg(not(unix))]
    {
        std::process::id()
    }
}
