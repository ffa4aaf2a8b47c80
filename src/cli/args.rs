//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.
//!
//! Subcommands are grouped by noun (`data`, `group`, `query`, ...). Only the
//! `data` navigation/mutation commands and the GenQuery2 commands carry
//! behavior; the rest are accepted and do nothing.

use clap::{ArgAction, Args, Parser, Subcommand};
use clap_complete::Shell;

/// The iRODS CLI
#[derive(Debug, Parser)]
#[command(name = "irods")]
#[command(author, version, about, long_about = None)]
#[command(disable_version_flag = true)]
pub struct Cli {
    /// Show the version and exit
    #[arg(short = 'v', long, action = ArgAction::Version)]
    pub version: Option<bool>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level noun groups.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// The data operations
    #[command(visible_alias = "d")]
    Data {
        #[command(subcommand)]
        command: DataCommands,
    },

    /// The group operations
    #[command(visible_alias = "g")]
    Group {
        #[command(subcommand)]
        command: GroupCommands,
    },

    /// The query operations
    #[command(visible_alias = "q")]
    Query {
        #[command(subcommand)]
        command: QueryCommands,
    },

    /// The resource operations
    #[command(visible_alias = "re")]
    Resource {
        #[command(subcommand)]
        command: ResourceCommands,
    },

    /// The rule operations
    #[command(visible_alias = "ru")]
    Rule {
        #[command(subcommand)]
        command: RuleCommands,
    },

    /// The ticket operations
    #[command(visible_alias = "t")]
    Ticket {
        #[command(subcommand)]
        command: TicketCommands,
    },

    /// The user operations
    #[command(visible_alias = "u")]
    User {
        #[command(subcommand)]
        command: UserCommands,
    },

    /// The zone operations
    #[command(visible_alias = "z")]
    Zone {
        #[command(subcommand)]
        command: ZoneCommands,
    },

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// `data` subcommands.
#[derive(Debug, Subcommand)]
pub enum DataCommands {
    CalculateChecksum,

    /// Changes present working directory/collection.
    Cd(CdArgs),

    #[command(visible_alias = "cp")]
    Copy,

    /// List information in a collection or about a data object.
    #[command(visible_alias = "ls")]
    List(ListArgs),

    Mkdir,
    ModifyMetadata,
    ModifyPermissions,
    ModifyReplica,

    /// Displays present working directory/collection.
    Pwd,

    #[command(visible_alias = "get")]
    Read,

    Register,

    /// Removes a data object or collection.
    #[command(visible_alias = "rm")]
    Remove(RemoveArgs),

    /// Renames a data object or collection.
    #[command(visible_aliases = ["move", "mv"])]
    Rename(RenameArgs),

    #[command(visible_alias = "repl")]
    Replicate,

    SetInheritance,
    SetPermission,
    Sync,

    /// Updates the mtime of a data object or collection.
    Touch(TouchArgs),

    Tree,
    Trim,
    Unregister,
    VerifyChecksum,

    #[command(visible_alias = "put")]
    Write,
}

/// `group` subcommands.
#[derive(Debug, Subcommand)]
pub enum GroupCommands {
    Create,
    List,
    ModifyMetadata,
    #[command(visible_aliases = ["delete", "rm"])]
    Remove,
}

/// `query` subcommands.
#[derive(Debug, Subcommand)]
pub enum QueryCommands {
    #[command(visible_alias = "asq")]
    AddSpecificQuery,

    /// Query the iRODS Catalog using GenQuery2
    ExecuteGeneralQuery(ExecuteGeneralQueryArgs),

    ExecuteSpecificQuery,

    /// List columns supported by GenQuery2
    ListColumns(ListColumnsArgs),

    #[command(visible_alias = "rsq")]
    RemoveSpecificQuery,
}

/// `resource` subcommands.
#[derive(Debug, Subcommand)]
pub enum ResourceCommands {
    AddChild,
    Create,
    List,
    Modify,
    ModifyMetadata,
    Rebalance,
    Remove,
    RemoveChild,
}

/// `rule` subcommands.
#[derive(Debug, Subcommand)]
pub enum RuleCommands {
    Execute,
    ListDelayRules,
    ListRuleEngines,
    RemoveDelayRule,
}

/// `ticket` subcommands.
#[derive(Debug, Subcommand)]
pub enum TicketCommands {
    Create,
    List,
    Modify,
    Remove,
}

/// `user` subcommands.
#[derive(Debug, Subcommand)]
pub enum UserCommands {
    AddToGroup,
    Authenticate,
    Create,
    IsMemberOfGroup,
    List,
    ModifyMetadata,
    Remove,
    RemoveFromGroup,
    SetPassword,
    SetUserType,
}

/// `zone` subcommands.
#[derive(Debug, Subcommand)]
pub enum ZoneCommands {
    Create,
    GetGridConfiguration,
    List,
    Modify,
    Remove,
    Report,
    SetGridConfiguration,
}

/// Arguments for the `data cd` command.
#[derive(Debug, Clone, Default, Args)]
pub struct CdArgs {
    /// Collection to change to; omit to return to the home collection
    pub collection: Option<String>,
}

/// Arguments for the `data list` command.
#[derive(Debug, Clone, Default, Args)]
pub struct ListArgs {
    /// Collection or data object to describe (default: current collection)
    pub logical_path: Option<String>,

    /// Show IDs
    #[arg(short, long)]
    pub verbose: bool,

    /// Show ACLs
    #[arg(long)]
    pub acls: bool,

    /// Show metadata (AVUs)
    #[arg(long)]
    pub metadata: bool,

    /// Show replica information
    #[arg(long)]
    pub replicas: bool,
}

/// Arguments for the `data remove` command.
#[derive(Debug, Clone, Default, Args)]
pub struct RemoveArgs {
    /// Data object or collection to remove
    pub logical_path: String,

    /// Remove collections recursively
    #[arg(short, long)]
    pub recursive: bool,

    /// Delete, and skip the trash
    #[arg(short, long)]
    pub force: bool,
}

/// Arguments for the `data rename` command.
#[derive(Debug, Clone, Default, Args)]
pub struct RenameArgs {
    /// Data object or collection to rename
    pub source: String,

    /// New logical path
    pub destination: String,
}

/// Arguments for the `data touch` command.
#[derive(Debug, Clone, Default, Args)]
pub struct TouchArgs {
    /// Data object or collection to touch
    pub logical_path: String,

    /// The number of seconds since epoch representing the new mtime. Cannot be used with "--reference".
    #[arg(long)]
    pub seconds_since_epoch: Option<i64>,

    /// Use the mtime of the logical path to the data object or collection identified by this option. Cannot be used with "--seconds-since-epoch".
    #[arg(long)]
    pub reference: Option<String>,

    /// The name of the leaf resource containing the replica to update. A missing data object is created on this resource. Cannot be used with "--replica-number".
    #[arg(long)]
    pub leaf_resource_name: Option<String>,

    /// The replica number of the replica to update. Replica numbers cannot be used to create data objects. Cannot be used with "--leaf-resource-name".
    #[arg(long)]
    pub replica_number: Option<u32>,
}

/// Arguments for the `query execute-general-query` command.
#[derive(Debug, Clone, Default, Args)]
pub struct ExecuteGeneralQueryArgs {
    /// GenQuery2 query string
    pub querystring: String,

    /// Print the SQL generated by the parser. The generated SQL will not be executed.
    #[arg(long)]
    pub sql_only: bool,

    /// The name of the zone to run the query against. Defaults to the local zone.
    #[arg(short, long)]
    pub zone: Option<String>,
}

/// Arguments for the `query list-columns` command.
#[derive(Debug, Clone, Default, Args)]
pub struct ListColumnsArgs {
    /// The name of the zone to run the query against. Defaults to the local zone.
    #[arg(short, long)]
    pub zone: Option<String>,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
