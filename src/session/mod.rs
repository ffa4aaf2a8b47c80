//! Session state for one CLI invocation.
//!
//! This module provides:
//! - [`WorkingDirectoryStore`], the per-shell current collection
//! - [`SessionContext`], environment settings plus that store
//! - [`Session`], a context paired with a catalog connection
//! - [`SessionSource`], how the dispatcher obtains a session on demand

mod context;
mod store;

pub use context::SessionContext;
pub use store::{parent_process_id, WorkingDirectoryStore};

use crate::catalog::http::DEFAULT_TIMEOUT;
use crate::catalog::{Catalog, HttpCatalog};
use crate::error::Result;

/// A session context paired with the catalog it talks to.
pub struct Session {
    context: SessionContext,
    catalog: Box<dyn Catalog>,
}

impl Session {
    /// Pair a context with a catalog.
    pub fn new(context: SessionContext, catalog: Box<dyn Catalog>) -> Self {
        Self { context, catalog }
    }

    /// Environment settings and working-directory state.
    pub fn context(&self) -> &SessionContext {
        &self.context
    }

    /// The catalog connection.
    pub fn catalog(&self) -> &dyn Catalog {
        self.catalog.as_ref()
    }
}

/// Opens sessions for commands that need one.
///
/// The dispatcher only opens a session after local validation passes, so a
/// rejected command never reads the environment file.
pub trait SessionSource {
    /// Open a session.
    fn open(&self) -> Result<Session>;
}

/// Opens sessions from the iRODS environment file and the HTTP API.
#[derive(Debug, Default)]
pub struct EnvironmentSource;

impl SessionSource for EnvironmentSource {
    fn open(&self) -> Result<Session> {
        let context = SessionContext::load()?;
        let environment = context.environment();
        let catalog = HttpCatalog::new(
            environment.http_api_url(),
            environment.irods_user_name.clone(),
            environment.password(),
            DEFAULT_TIMEOUT,
        )?;
        tracing::debug!(
            "Session for {}#{} via {}",
            environment.irods_user_name,
            environment.irods_zone_name,
            catalog.base_url()
        );
        Ok(Session::new(context, Box::new(catalog)))
    }
}
