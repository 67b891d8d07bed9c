//! Error types for session operations

use kindred_graph::GraphError;
use thiserror::Error;

/// Errors that can occur during session operations
#[derive(Error, Debug)]
pub enum SessionError {
    /// The graph model rejected the mutation; nothing changed
    #[error(transparent)]
    Graph(#[from] GraphError),

    /// The repository failed after the mutation was applied in memory
    #[error("Storage error: {0}")]
    Store(String),

    /// Configuration could not be read or parsed
    #[error("Configuration error: {0}")]
    Config(String),
}

impl SessionError {
    pub(crate) fn store<E: std::fmt::Display>(err: E) -> Self {
        SessionError::Store(err.to_string())
    }

    /// Whether the in-memory state moved on despite this error
    pub fn is_applied(&self) -> bool {
        matches!(self, SessionError::Store(_))
    }
}

/// Result type for session operations
pub type Result<T> = std::result::Result<T, SessionError>;
