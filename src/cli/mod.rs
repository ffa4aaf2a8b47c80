//! Command-line interface for iRODS.
//!
//! This module provides the CLI argument parsing using clap's derive macros
//! and command implementations.
//!
//! # Architecture
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`validator`] - Option checks that run before any catalog call
//! - [`commands`] - Command implementations

pub mod args;
pub mod commands;
pub mod validator;

pub use args::{
    CdArgs, Cli, Commands, DataCommands, ExecuteGeneralQueryArgs, ListArgs, ListColumnsArgs,
    QueryCommands, RemoveArgs, RenameArgs, TouchArgs,
};
pub use commands::{Command, CommandDispatcher, CommandResult};
pub use validator::{validate_touch, TouchPlan, ValidationError};
