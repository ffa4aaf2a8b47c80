//! Output sink for commands.
//!
//! This module provides:
//! - [`UserInterface`] trait for output abstraction
//! - [`TerminalUI`] for the real terminal
//! - [`MockUI`] for capturing output in tests
//! - [`json::to_line`] for rendering JSON documents
//!
//! Every command produces at most one line of output on stdout: nothing, a
//! bare value, one JSON document, or a failure message. Diagnostics go
//! through `tracing` to stderr instead.
//!
//! # Example
//!
//! ```
//! use irods_cli::ui::{MockUI, UserInterface};
//!
//! let mut ui = MockUI::new();
//! ui.message("/tempZone/home/rods");
//! assert_eq!(ui.output(), "/tempZone/home/rods");
//! ```

pub mod json;
pub mod mock;
pub mod terminal;

pub use mock::MockUI;
pub use terminal::TerminalUI;

/// Trait for user interface interactions.
///
/// This trait allows mocking the UI in tests.
pub trait UserInterface {
    /// Display a line of command output.
    fn message(&mut self, msg: &str);

    /// Display a failure message.
    fn error(&mut self, msg: &str);
}
