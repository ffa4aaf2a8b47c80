//! iRODS environment file handling.
//!
//! The environment file is the standard iRODS client JSON document
//! (`~/.irods/irods_environment.json`). Only the keys the CLI needs are read;
//! anything else in the file is ignored.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{CliError, Result};
use crate::path::LogicalPath;

/// Overrides the location of the environment file.
pub const ENVIRONMENT_FILE_VAR: &str = "IRODS_ENVIRONMENT_FILE";

/// Overrides the password from the environment file.
pub const PASSWORD_VAR: &str = "IRODS_PASSWORD";

const HTTP_API_PORT: u16 = 9000;
const HTTP_API_PREFIX: &str = "irods-http-api/0.5.0";

/// Session settings read from the environment file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct IrodsEnvironment {
    /// Catalog provider host.
    #[serde(default = "default_host")]
    pub irods_host: String,

    /// User the session authenticates as.
    pub irods_user_name: String,

    /// Zone the user belongs to.
    pub irods_zone_name: String,

    /// Base URL of the iRODS HTTP API.
    #[serde(default)]
    pub irods_http_api_url: Option<String>,

    /// Password for native authentication.
    #[serde(default)]
    pub irods_password: Option<String>,
}

fn default_host() -> String {
    "localhost".to_string()
}

impl IrodsEnvironment {
    /// Load the environment file at `path`.
    ///
    /// # Errors
    ///
    /// Returns `CliError::Environment` if the file is missing, unreadable,
    /// or not a valid environment document.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| CliError::Environment {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::parse(&content).map_err(|e| CliError::Environment {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Parse environment JSON.
    pub fn parse(content: &str) -> serde_json::Result<Self> {
        serde_json::from_str(content)
    }

    /// The user's home collection, `/<zone>/home/<user>`.
    pub fn home_collection(&self) -> LogicalPath {
        LogicalPath::home(&self.irods_zone_name, &self.irods_user_name)
    }

    /// Base URL of the HTTP API, without a trailing slash.
    pub fn http_api_url(&self) -> String {
        match &self.irods_http_api_url {
            Some(url) => url.trim_end_matches('/').to_string(),
            None => format!(
                "http://{}:{}/{}",
                self.irods_host, HTTP_API_PORT, HTTP_API_PREFIX
            ),
        }
    }

    /// Password to authenticate with, honoring `IRODS_PASSWORD`.
    pub fn password(&self) -> Option<String> {
        self.password_with_override(std::env::var(PASSWORD_VAR).ok())
    }

    fn password_with_override(&self, overridden: Option<String>) -> Option<String> {
        overridden.or_else(|| self.irods_password.clone())
    }
}

/// Default environment file location: `~/.irods/irods_environment.json`.
pub fn default_environment_path() -> Option<PathBuf> {
    Some(
        dirs::home_dir()?
            .join(".irods")
            .join("irods_environment.json"),
    )
}

/// The environment file to use: `IRODS_ENVIRONMENT_FILE`, else the default.
///
/// # Errors
///
/// Returns `CliError::Environment` when neither is available.
pub fn environment_path() -> Result<PathBuf> {
    if let Some(path) = std::env::var_os(ENVIRONMENT_FILE_VAR).filter(|p| !p.is_empty()) {
        return Ok(PathBuf::from(path));
    }
    default_environment_path().ok_or_else(|| CliError::Environment {
        path: PathBuf::from("~/.irods/irods_environment.json"),
        message: "home directory could not be determined".to_string(),
    })
}
