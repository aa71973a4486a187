use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::{Credentials, NodePath, Principal, RepositoryError, Value};

/// The privilege tier granted by a successful login.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AccessLevel {
    /// May read content but not change it
    ReadOnly,
    /// May read and write content
    ReadWrite,
    /// May read and write content anywhere in the repository
    Administrative,
}

impl AccessLevel {
    /// Whether this level permits mutating content.
    pub fn allows_writes(&self) -> bool {
        matches!(self, AccessLevel::ReadWrite | AccessLevel::Administrative)
    }
}

/// A [`ContentRepository`] is a facade over the live backend instance under
/// test. Everything behind it — storage, indexing, persistence — is opaque
/// to callers; the only way in is an authenticated [`ContentSession`].
#[async_trait]
pub trait ContentRepository: Send + Sync {
    /// Authenticates `credentials` against the workspace named by
    /// `workspace`, or against the default workspace when `None` is given.
    ///
    /// The returned session is owned by the caller and closed by dropping
    /// it; the repository does not track or recycle sessions.
    async fn login(
        &self,
        credentials: &Credentials,
        workspace: Option<&str>,
    ) -> Result<Box<dyn ContentSession>, RepositoryError>;

    /// The name of the workspace used when a login names none.
    fn default_workspace(&self) -> &str;

    /// Resolves a principal known to exist in this repository's security
    /// domain, relative to `session`.
    ///
    /// Backends that cannot enumerate identities keep the default body and
    /// report the capability as unsupported.
    fn known_principal(
        &self,
        _session: &dyn ContentSession,
    ) -> Result<Principal, RepositoryError> {
        Err(RepositoryError::Unsupported(
            "known principal resolution".to_string(),
        ))
    }

    /// Resolves a principal guaranteed to be absent from this repository's
    /// security domain, relative to `session`.
    ///
    /// Backends that cannot rule an identity out keep the default body and
    /// report the capability as unsupported.
    fn unknown_principal(
        &self,
        _session: &dyn ContentSession,
    ) -> Result<Principal, RepositoryError> {
        Err(RepositoryError::Unsupported(
            "unknown principal resolution".to_string(),
        ))
    }
}

/// A [`ContentSession`] is an authenticated, workspace-scoped handle through
/// which content operations are performed. The backend enforces the access
/// level granted at login; sessions carry no locking discipline of their
/// own, so a caller that shares one across tasks owns that coordination.
#[async_trait]
pub trait ContentSession: Send + Sync {
    /// The identity this session authenticated as.
    fn user_id(&self) -> &str;

    /// The access level granted at login.
    fn access_level(&self) -> AccessLevel;

    /// The name of the workspace this session is scoped to.
    fn workspace_name(&self) -> &str;

    /// Reads the value stored at `path`, if any.
    async fn get(&self, path: &NodePath) -> Result<Option<Value>, RepositoryError>;

    /// Stores `value` at `path`, creating or replacing the node there.
    async fn put(&self, path: &NodePath, value: Value) -> Result<(), RepositoryError>;

    /// Removes the node at `path`.
    async fn remove(&self, path: &NodePath) -> Result<(), RepositoryError>;
}
