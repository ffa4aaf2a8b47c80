//! `data touch`: update a modification time, creating a missing data object.

use tracing::info;

use crate::catalog::EntityKind;
use crate::cli::validator::TouchPlan;
use crate::error::Result;
use crate::session::Session;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The touch command implementation.
///
/// Takes an already validated [`TouchPlan`].
pub struct TouchCommand<'a> {
    session: &'a Session,
    plan: TouchPlan,
}

impl<'a> TouchCommand<'a> {
    pub fn new(session: &'a Session, plan: TouchPlan) -> Self {
        Self { session, plan }
    }
}

impl Command for TouchCommand<'_> {
    fn execute(&self, _ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let (target, options) = self.plan.resolve(self.session.context())?;
        let catalog = self.session.catalog();

        let kind = if catalog.collection_exists(&target)? {
            EntityKind::Collection
        } else {
            EntityKind::DataObject
        };
        catalog.touch(kind, &target, &options)?;
        info!("Touched {}", target);
        Ok(CommandResult::success())
    }
}
