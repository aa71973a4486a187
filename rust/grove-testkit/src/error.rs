use thiserror::Error;

/// The common error type surfaced by the conformance harness.
///
/// The type is `Clone + PartialEq` on purpose: a repository acquisition
/// failure is cached for the lifetime of the harness and replayed verbatim
/// to every subsequent caller, and conformance suites compare the replays.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AccessError {
    /// The base property descriptor could not be read or parsed
    #[error("Failed to load stub configuration from {path}: {cause}")]
    ConfigurationLoad {
        /// Path of the descriptor that failed to load
        path: String,
        /// The underlying failure message
        cause: String,
    },

    /// A configuration key the harness requires was absent from both the
    /// overlay and the base descriptor
    #[error("Missing configuration property: {key}")]
    MissingProperty {
        /// The key that was absent
        key: String,
    },

    /// The repository factory failed to produce an instance
    #[error("Failed to acquire repository: {cause}")]
    RepositoryAcquisition {
        /// The underlying failure message
        cause: String,
    },

    /// The backend rejected a login
    #[error("Authentication failed for {user}: {cause}")]
    Authentication {
        /// The identity that attempted to log in
        user: String,
        /// The rejection reported by the backend
        cause: String,
    },

    /// The active backend cannot support the requested operation. Suites
    /// treat this as "skip the test", never as "fail the test".
    #[error("Not executable: {operation}")]
    NotExecutable {
        /// The operation the backend cannot support
        operation: String,
    },
}
