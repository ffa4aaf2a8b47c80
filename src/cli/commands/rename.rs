//! `data rename`: move a data object or collection.

use tracing::info;

use crate::catalog::EntityKind;
use crate::cli::args::RenameArgs;
use crate::error::Result;
use crate::session::Session;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The rename command implementation.
pub struct RenameCommand<'a> {
    session: &'a Session,
    args: RenameArgs,
}

impl<'a> RenameCommand<'a> {
    pub fn new(session: &'a Session, args: RenameArgs) -> Self {
        Self { session, args }
    }
}

impl Command for RenameCommand<'_> {
    fn execute(&self, _ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let context = self.session.context();
        let source = context.resolve(&self.args.source)?;
        let destination = context.resolve(&self.args.destination)?;
        let catalog = self.session.catalog();

        let kind = if catalog.collection_exists(&source)? {
            EntityKind::Collection
        } else {
            EntityKind::DataObject
        };
        catalog.rename(kind, &source, &destination)?;
        info!("Renamed {} to {}", source, destination);
        Ok(CommandResult::success())
    }
}
