//! `data remove`: remove a data object or collection.

use tracing::info;

use crate::catalog::RemoveOptions;
use crate::cli::args::RemoveArgs;
use crate::error::Result;
use crate::session::Session;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The remove command implementation.
pub struct RemoveCommand<'a> {
    session: &'a Session,
    args: RemoveArgs,
}

impl<'a> RemoveCommand<'a> {
    pub fn new(session: &'a Session, args: RemoveArgs) -> Self {
        Self { session, args }
    }
}

impl Command for RemoveCommand<'_> {
    fn execute(&self, _ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let target = self.session.context().resolve(&self.args.logical_path)?;
        let catalog = self.session.catalog();
        let options = RemoveOptions {
            recursive: self.args.recursive,
            force: self.args.force,
        };

        if catalog.collection_exists(&target)? {
            catalog.remove_collection(&target, options)?;
        } else {
            catalog.unlink_data_object(&target, options)?;
        }
        info!("Removed {}", target);
        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands::test_support::{catalog, session};
    use crate::path::LogicalPath;
    use crate::ui::MockUI;
    use tempfile::TempDir;

    fn remove(session: &Session, path: &str, recursive: bool) -> Result<CommandResult> {
        let args = RemoveArgs {
            logical_path: path.to_string(),
            recursive,
            force: false,
        };
        RemoveCommand::new(session, args).execute(&mut MockUI::new())
    }

    fn exists(session: &Session, path: &str) -> bool {
        let path = LogicalPath::new(path).unwrap();
        let catalog = session.catalog();
        catalog.collection_exists(&path).unwrap() || catalog.data_object_exists(&path).unwrap()
    }

    #[test]
    fn removes_data_object() {
        let temp = TempDir::new().unwrap();
        let session = session(&temp, catalog().with_data_object("/tempZone/home/rods/a", 1));
        remove(&session, "a", false).unwrap();
        assert!(!exists(&session, "/tempZone/home/rods/a"));
    }

    #[test]
    fn missing_data_object_fails() {
        let temp = TempDir::new().unwrap();
        let session = session(&temp, catalog());
        let err = remove(&session, "doesnotexist", false).unwrap_err();
        assert!(err.to_string().contains("SYS_INVALID_INPUT_PARAM"));
    }

    #[test]
    fn non_empty_collection_needs_recursive() {
        let temp = TempDir::new().unwrap();
        let session = session(
            &temp,
            catalog().with_data_object("/tempZone/home/rods/one/2", 1),
        );
        let err = remove(&session, "one", false).unwrap_err();
        assert!(err.to_string().contains("CAT_COLLECTION_NOT_EMPTY"));
        assert!(exists(&session, "/tempZone/home/rods/one/2"));

        remove(&session, "one", true).unwrap();
        assert!(!exists(&session, "/tempZone/home/rods/one"));
    }

    #[test]
    fn empty_path_is_rejected() {
        let temp = TempDir::new().unwrap();
        let session = session(&temp, catalog());
        let err = remove(&session, "", false).unwrap_err();
        assert_eq!(err.to_string(), "logical path must not be empty");
    }
}
