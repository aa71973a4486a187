use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The common error type used by repository operations.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RepositoryError {
    /// Login was rejected because the identity or secret did not match
    #[error("Authentication failed for {user}")]
    AuthenticationFailed {
        /// The identity that attempted to log in
        user: String,
    },

    /// Workspace with the given name does not exist
    #[error("Workspace {name} not found")]
    WorkspaceNotFound {
        /// The name of the workspace that was not found
        name: String,
    },

    /// The session's access level does not permit the attempted operation
    #[error("Access denied: cannot {action} {path}")]
    AccessDenied {
        /// The operation that was refused
        action: String,
        /// The path the operation targeted
        path: String,
    },

    /// No node exists at the given path
    #[error("Node {path} not found")]
    NotFound {
        /// The path that did not resolve to a node
        path: String,
    },

    /// The backend does not support the requested capability
    #[error("Unsupported operation: {0}")]
    Unsupported(String),

    /// Raw text could not be interpreted as a node path
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    /// An error occurred in the underlying state store
    #[error("Storage operation failed: {0}")]
    Storage(String),
}
