//! `data cd`: change the current collection.

use tracing::info;

use crate::cli::args::CdArgs;
use crate::error::{CliError, Result};
use crate::session::Session;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The cd command implementation.
///
/// With no argument the shell's record is removed, which returns it to the
/// home collection.
pub struct CdCommand<'a> {
    session: &'a Session,
    args: CdArgs,
}

impl<'a> CdCommand<'a> {
    pub fn new(session: &'a Session, args: CdArgs) -> Self {
        Self { session, args }
    }
}

impl Command for CdCommand<'_> {
    fn execute(&self, _ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let context = self.session.context();

        let Some(raw) = self.args.collection.as_deref().filter(|c| !c.is_empty()) else {
            context.store().clear()?;
            return Ok(CommandResult::success());
        };

        let target = context.resolve(raw)?;
        if !self.session.catalog().collection_exists(&target)? {
            return Err(CliError::NoSuchCollection { path: target });
        }

        context.store().set(&target)?;
        info!("Current collection is now {}", target);
        Ok(CommandResult::success())
    }
}
