//! Session configuration.
//!
//! The CLI reads the standard iRODS environment file:
//! - `IRODS_ENVIRONMENT_FILE`, if set
//! - `~/.irods/irods_environment.json` otherwise
//!
//! # Example
//!
//! ```
//! use irods_cli::config::IrodsEnvironment;
//!
//! let env = IrodsEnvironment::parse(
//!     r#"{"irods_host": "localhost", "irods_user_name": "rods", "irods_zone_name": "tempZone"}"#,
//! )
//! .unwrap();
//! assert_eq!(env.home_collection().as_str(), "/tempZone/home/rods");
//! ```

pub mod environment;

pub use environment::{
    default_environment_path, environment_path, IrodsEnvironment, ENVIRONMENT_FILE_VAR,
    PASSWORD_VAR,
};
