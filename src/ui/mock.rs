//! Mock UI implementation for testing.
//!
//! `MockUI` implements the `UserInterface` trait and captures all output
//! for later assertion.
//!
//! # Example
//!
//! ```
//! use irods_cli::ui::{MockUI, UserInterface};
//!
//! let mut ui = MockUI::new();
//! ui.error("bad logical path");
//!
//! assert!(ui.errors().contains(&"bad logical path".to_string()));
//! assert_eq!(ui.output(), "bad logical path");
//! ```

use super::UserInterface;

/// Mock UI implementation for testing.
#[derive(Debug, Default)]
pub struct MockUI {
    lines: Vec<String>,
    messages: Vec<String>,
    errors: Vec<String>,
}

impl MockUI {
    /// Create a new MockUI.
    pub fn new() -> Self {
        Self::default()
    }

    /// Output lines passed to `message`.
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Failure lines passed to `error`.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Everything written, in order, one line per call.
    pub fn output(&self) -> String {
        self.lines.join("\n")
    }

    /// Whether nothing was written.
    pub fn is_silent(&self) -> bool {
        self.lines.is_empty()
    }
}

impl UserInterface for MockUI {
    fn message(&mut self, msg: &str) {
        self.lines.push(msg.to_string());
        self.messages.push(msg.to_string());
    }

    fn error(&mut self, msg: &str) {
        self.lines.push(msg.to_string());
        self.errors.push(msg.to_string());
    }
}
