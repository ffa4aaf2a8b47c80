//! Terminal output.

use console::Term;
use tracing::debug;

use super::UserInterface;

/// Terminal UI implementation.
///
/// Output and failure messages both go to stdout; stderr is reserved for
/// logging.
pub struct TerminalUI {
    term: Term,
}

impl TerminalUI {
    /// Create a terminal UI writing to stdout.
    pub fn new() -> Self {
        Self {
            term: Term::stdout(),
        }
    }

    fn write(&self, msg: &str) {
        if let Err(e) = self.term.write_line(msg) {
            debug!("Failed to write to stdout: {}", e);
        }
    }
}

impl Default for TerminalUI {
    fn default() -> Self {
        Self::new()
    }
}

impl UserInterface for TerminalUI {
    fn message(&mut self, msg: &str) {
        self.write(msg);
    }

    fn error(&mut self, msg: &str) {
        self.write(msg);
    }
}
