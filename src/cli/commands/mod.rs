//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! # Architecture
//!
//! Commands are dispatched via [`CommandDispatcher`], which routes CLI
//! subcommands to their implementations. This allows:
//! - Local validation before the session is opened
//! - One session per invocation, shared by the command
//! - Placeholder subcommands that parse and do nothing

pub mod cd;
pub mod completions;
pub mod dispatcher;
pub mod list;
pub mod pwd;
pub mod query;
pub mod remove;
pub mod rename;
pub mod touch;

pub use dispatcher::{Command, CommandDispatcher, CommandResult};

#[cfg(test)]
pub(crate) mod test_support {
    use tempfile::TempDir;

    use crate::catalog::MemoryCatalog;
    use crate::config::IrodsEnvironment;
    use crate::session::{Session, SessionContext, WorkingDirectoryStore};

    pub const HOME: &str = "/tempZone/home/rods";

    /// The working-directory record a test session in `temp` reads.
    pub fn store(temp: &TempDir) -> WorkingDirectoryStore {
        WorkingDirectoryStore::in_dir(&temp.path().join(".irods"), 4242)
    }

    /// A `rods#tempZone` session over `catalog`, with its record in `temp`.
    pub fn session(temp: &TempDir, catalog: MemoryCatalog) -> Session {
        let environment = IrodsEnvironment::parse(
            r#"{"irods_host": "localhost", "irods_user_name": "rods", "irods_zone_name": "tempZone"}"#,
        )
        .unwrap();
        Session::new(
            SessionContext::new(environment, store(temp)),
            Box::new(catalog),
        )
    }

    pub fn catalog() -> MemoryCatalog {
        MemoryCatalog::new("tempZone", "rods")
    }
}
