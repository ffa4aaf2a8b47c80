//! `data list`: describe a collection's children or a data object.

use crate::cli::args::ListArgs;
use crate::error::Result;
use crate::listing::{ListingAggregator, ReportFlags};
use crate::session::Session;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The list command implementation.
pub struct ListCommand<'a> {
    session: &'a Session,
    args: ListArgs,
}

impl<'a> ListCommand<'a> {
    /// Create a new list command.
    pub fn new(session: &'a Session, args: ListArgs) -> Self {
        Self { session, args }
    }

    fn flags(&self) -> ReportFlags {
        ReportFlags {
            verbose: self.args.verbose,
            acls: self.args.acls,
            metadata: self.args.metadata,
            replicas: self.args.replicas,
        }
    }
}

impl Command for ListCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let target = self
            .session
            .context()
            .resolve_or_current(self.args.logical_path.as_deref());

        let report =
            ListingAggregator::new(self.session.catalog(), self.flags()).build_report(&target)?;
        ui.message(&report.to_json()?);
        Ok(CommandResult::success())
    }
}
