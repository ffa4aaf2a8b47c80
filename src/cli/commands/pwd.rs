//! `data pwd`: print the current collection.

use crate::error::Result;
use crate::session::Session;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The pwd command implementation.
pub struct PwdCommand<'a> {
    session: &'a Session,
}

impl<'a> PwdCommand<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }
}

impl Command for PwdCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let current = self.session.context().current_collection();
        ui.message(current.as_str());
        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands::test_support::{catalog, session, store, HOME};
    use crate::path::LogicalPath;
    use crate::ui::MockUI;
    use tempfile::TempDir;

    #[test]
    fn prints_home_without_record() {
        let temp = TempDir::new().unwrap();
        let session = session(&temp, catalog());
        let mut ui = MockUI::new();
        PwdCommand::new(&session).execute(&mut ui).unwrap();
        assert_eq!(ui.output(), HOME);
    }

    #[test]
    fn prints_stored_collection() {
        let temp = TempDir::new().unwrap();
        store(&temp)
            .set(&LogicalPath::new("/tempZone/home").unwrap())
            .unwrap();
        let session = session(&temp, catalog());
        let mut ui = MockUI::new();
        PwdCommand::new(&session).execute(&mut ui).unwrap();
        assert_eq!(ui.output(), "/tempZone/home");
    }
}
