//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::fmt::Debug;

use tracing::debug;

use crate::cli::args::{Cli, Commands, DataCommands, QueryCommands};
use crate::cli::validator::validate_touch;
use crate::error::Result;
use crate::session::SessionSource;
use crate::ui::UserInterface;

use super::cd::CdCommand;
use super::completions::CompletionsCommand;
use super::list::ListCommand;
use super::pwd::PwdCommand;
use super::query::{ExecuteGeneralQueryCommand, ListColumnsCommand};
use super::remove::RemoveCommand;
use super::rename::RenameCommand;
use super::touch::TouchCommand;

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
pub trait Command {
    /// Execute the command.
    ///
    /// # Arguments
    ///
    /// * `ui` - Sink for the command's single line of output
    ///
    /// # Returns
    ///
    /// A [`CommandResult`] on success. Failures are returned as errors and
    /// reported by [`CommandDispatcher::run`].
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of a command that ran to completion.
///
/// Failures never produce a `CommandResult`; they are returned as
/// [`CliError`](crate::error::CliError) and carry their own exit code.
#[derive(Debug)]
pub struct CommandResult {
    /// Exit code to use.
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self { exit_code: 0 }
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher<'s> {
    source: &'s dyn SessionSource,
}

impl<'s> CommandDispatcher<'s> {
    /// Create a dispatcher that opens sessions from `source`.
    pub fn new(source: &'s dyn SessionSource) -> Self {
        Self { source }
    }

    /// Dispatch a command and report any failure through `ui`.
    ///
    /// Returns the process exit code.
    pub fn run(&self, cli: &Cli, ui: &mut dyn UserInterface) -> i32 {
        match self.dispatch(cli, ui) {
            Ok(result) => result.exit_code,
            Err(e) => {
                debug!("Command failed: {:?}", e);
                ui.error(&e.to_string());
                e.exit_code()
            }
        }
    }

    /// Dispatch and execute a command.
    ///
    /// Routes the CLI subcommand to the appropriate command implementation
    /// and executes it.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        match &cli.command {
            Commands::Data { command } => self.dispatch_data(command, ui),
            Commands::Query { command } => self.dispatch_query(command, ui),
            Commands::Completions(args) => {
                let cmd = CompletionsCommand::new(args.clone());
                cmd.execute(ui)
            }
            other => Ok(placeholder(other)),
        }
    }

    fn dispatch_data(
        &self,
        command: &DataCommands,
        ui: &mut dyn UserInterface,
    ) -> Result<CommandResult> {
        match command {
            DataCommands::Cd(args) => {
                let session = self.source.open()?;
                CdCommand::new(&session, args.clone()).execute(ui)
            }
            DataCommands::List(args) => {
                let session = self.source.open()?;
                ListCommand::new(&session, args.clone()).execute(ui)
            }
            DataCommands::Pwd => {
                let session = self.source.open()?;
                PwdCommand::new(&session).execute(ui)
            }
            DataCommands::Remove(args) => {
                let session = self.source.open()?;
                RemoveCommand::new(&session, args.clone()).execute(ui)
            }
            DataCommands::Rename(args) => {
                let session = self.source.open()?;
                RenameCommand::new(&session, args.clone()).execute(ui)
            }
            DataCommands::Touch(args) => {
                let plan = validate_touch(args)?;
                let session = self.source.open()?;
                TouchCommand::new(&session, plan).execute(ui)
            }
            other => Ok(placeholder(other)),
        }
    }

    fn dispatch_query(
        &self,
        command: &QueryCommands,
        ui: &mut dyn UserInterface,
    ) -> Result<CommandResult> {
        match command {
            QueryCommands::ExecuteGeneralQuery(args) => {
                let session = self.source.open()?;
                ExecuteGeneralQueryCommand::new(&session, args.clone()).execute(ui)
            }
            QueryCommands::ListColumns(args) => {
                let session = self.source.open()?;
                ListColumnsCommand::new(&session, args.clone()).execute(ui)
            }
            other => Ok(placeholder(other)),
        }
    }
}

/// Subcommands without behavior succeed silently.
fn placeholder(command: &impl Debug) -> CommandResult {
    debug!("{:?} has no behavior; nothing to do", command);
    CommandResult::success()
}
