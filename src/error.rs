//! Error types for CLI operations.
//!
//! This module defines [`CliError`], the error type every command returns,
//! and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - `Display` is the text printed for the user; it is the whole output line
//! - [`CliError::exit_code`] is the process status
//! - Catalog failures are relayed through their own text, except the two
//!   query faults that get fixed literals
//! - Use `anyhow::Error` (via `CliError::Other`) for unexpected errors

use std::path::PathBuf;

use thiserror::Error;

use crate::catalog::CatalogError;
use crate::cli::validator::ValidationError;
use crate::path::LogicalPath;

/// Core error type for CLI operations.
#[derive(Debug, Error)]
pub enum CliError {
    /// Mutually exclusive options were combined.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A required logical path argument was empty.
    #[error("logical path must not be empty")]
    EmptyPath,

    /// The listing target is neither a collection nor a data object.
    #[error("bad logical path")]
    BadLogicalPath,

    /// `cd` was pointed at a collection that does not exist.
    #[error("No such collection: {path}")]
    NoSuchCollection { path: LogicalPath },

    /// Failure reported by the catalog.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Failure reported while running or compiling a GenQuery2 query.
    #[error("{}", describe_query_error(.0))]
    Query(CatalogError),

    /// The iRODS environment file could not be read or parsed.
    #[error("Failed to load iRODS environment from {}: {message}", path.display())]
    Environment { path: PathBuf, message: String },

    /// The working-directory record could not be written or removed.
    #[error("Failed to update current collection at {}: {message}", path.display())]
    WorkingDirectory { path: PathBuf, message: String },

    /// Report output could not be serialized.
    #[error("Failed to serialize output: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CliError {
    /// Process exit status for this failure.
    ///
    /// Every failure the CLI reports exits with 1; success is 0.
    pub fn exit_code(&self) -> i32 {
        1
    }
}

fn describe_query_error(err: &CatalogError) -> String {
    if err.is_invalid_input() {
        "ERROR: irods.exception.SYS_INVALID_INPUT_PARAM".to_string()
    } else if err.is_library_error() {
        "bad querystring".to_string()
    } else {
        err.to_string()
    }
}

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;
