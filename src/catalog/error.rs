//! Errors raised at the catalog boundary.

use thiserror::Error;

use super::codes;

/// Failure reported by a [`Catalog`](super::Catalog) implementation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// The server rejected the request with an iRODS status code.
    #[error("{}", describe_server_error(*code, message))]
    Server { code: i32, message: String },

    /// The server could not be reached or the connection broke.
    #[error("Network error: {0}")]
    Network(String),

    /// The server answered with a non-success HTTP status and no iRODS status.
    #[error("HTTP {status} from {endpoint}")]
    Http { status: u16, endpoint: String },

    /// A request could not be expressed, or a response could not be decoded.
    #[error("Protocol error ({endpoint}): {message}")]
    Protocol { endpoint: String, message: String },
}

impl CatalogError {
    /// Create a server error from a status code and message.
    pub fn server(code: i32, message: impl Into<String>) -> Self {
        Self::Server {
            code,
            message: message.into(),
        }
    }

    /// The iRODS status code with the errno stripped, if any.
    pub fn code(&self) -> Option<i32> {
        match self {
            Self::Server { code, .. } => Some(codes::base_code(*code)),
            _ => None,
        }
    }

    /// The server refused the input parameters.
    pub fn is_invalid_input(&self) -> bool {
        self.code() == Some(codes::SYS_INVALID_INPUT_PARAM)
    }

    /// A library used by the server failed internally.
    pub fn is_library_error(&self) -> bool {
        self.code() == Some(codes::SYS_LIBRARY_ERROR)
    }
}

fn describe_server_error(code: i32, message: &str) -> String {
    let message = message.trim();
    match (codes::name(code), message.is_empty()) {
        (Some(name), true) => name.to_string(),
        (Some(name), false) => format!("{}: {}", message, name),
        (None, true) => format!("iRODS error {}", code),
        (None, false) => format!("{} (iRODS error {})", message, code),
    }
}

impl From<reqwest::Error> for CatalogError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network(err.to_string())
    }
}
