//! irods-cli - Command-line front end to an iRODS data catalog.
//!
//! The CLI resolves shell-style paths against a per-shell current
//! collection, validates options before touching the catalog, aggregates
//! listing metadata into one JSON report, and maps catalog failures onto
//! stable messages and exit codes.
//!
//! # Modules
//!
//! - [`catalog`] - The catalog session boundary and its implementations
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - iRODS environment file loading
//! - [`error`] - Error types and result aliases
//! - [`listing`] - Listing report aggregation
//! - [`path`] - Logical path resolution
//! - [`session`] - Working-directory state and session context
//! - [`ui`] - Output sink
//!
//! # Example
//!
//! ```
//! use irods_cli::catalog::MemoryCatalog;
//! use irods_cli::listing::{ListingAggregator, ReportFlags};
//! use irods_cli::path::LogicalPath;
//!
//! let catalog = MemoryCatalog::new("tempZone", "rods")
//!     .with_data_object("/tempZone/home/rods/sample.json", 42);
//! let report = ListingAggregator::new(&catalog, ReportFlags::default())
//!     .build_report(&LogicalPath::new("/tempZone/home/rods/sample.json").unwrap())
//!     .unwrap();
//! assert_eq!(
//!     report.to_json().unwrap(),
//!     r#"{"data_objects": {"sample.json": {"size": 42}}}"#
//! );
//! ```

pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod listing;
pub mod path;
pub mod session;
pub mod ui;

pub use error::{CliError, Result};
