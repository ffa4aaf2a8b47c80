//! GenQuery2 commands: `query execute-general-query` and `query list-columns`.

use crate::catalog::QueryOutput;
use crate::cli::args::{ExecuteGeneralQueryArgs, ListColumnsArgs};
use crate::error::{CliError, Result};
use crate::session::Session;
use crate::ui::{json, UserInterface};

use super::dispatcher::{Command, CommandResult};

/// Runs a GenQuery2 query, or prints the SQL it compiles to.
pub struct ExecuteGeneralQueryCommand<'a> {
    session: &'a Session,
    args: ExecuteGeneralQueryArgs,
}

impl<'a> ExecuteGeneralQueryCommand<'a> {
    pub fn new(session: &'a Session, args: ExecuteGeneralQueryArgs) -> Self {
        Self { session, args }
    }
}

impl Command for ExecuteGeneralQueryCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let zone = self
            .args
            .zone
            .as_deref()
            .unwrap_or_else(|| self.session.context().zone());

        let output = self
            .session
            .catalog()
            .general_query(&self.args.querystring, zone, self.args.sql_only)
            .map_err(CliError::Query)?;

        let json = match output {
            QueryOutput::Rows(rows) => json::to_line(&rows)?,
            QueryOutput::Sql(sql) => json::to_line(&sql)?,
        };
        ui.message(&json);
        Ok(CommandResult::success())
    }
}

/// Prints the column mappings GenQuery2 understands.
pub struct ListColumnsCommand<'a> {
    session: &'a Session,
    args: ListColumnsArgs,
}

impl<'a> ListColumnsCommand<'a> {
    pub fn new(session: &'a Session, args: ListColumnsArgs) -> Self {
        Self { session, args }
    }
}

impl Command for ListColumnsCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let zone = self
            .args
            .zone
            .as_deref()
            .unwrap_or_else(|| self.session.context().zone());
        let columns = self.session.catalog().query_columns(zone)?;
        ui.message(&json::to_line(&columns)?);
        Ok(CommandResult::success())
    }
}
