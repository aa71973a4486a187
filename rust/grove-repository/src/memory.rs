use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::{
    AccessLevel, ContentRepository, ContentSession, Credentials, NodePath, Principal,
    RepositoryError, Value,
};

/// A registered identity and the access level it is granted at login.
#[derive(Clone, Debug)]
struct Account {
    password: String,
    level: AccessLevel,
}

/// Shared node tree of one workspace.
type WorkspaceNodes = Arc<RwLock<HashMap<NodePath, Value>>>;

/// A trivial implementation of [`ContentRepository`] where all content is
/// kept in memory and never persisted, for suites that need a live backend
/// without provisioning one.
///
/// The account set and workspace set are fixed at construction; only node
/// content mutates afterwards. All sessions scoped to one workspace observe
/// the same node tree.
pub struct MemoryRepository {
    default_workspace: String,
    administrator: Option<String>,
    accounts: HashMap<String, Account>,
    workspaces: HashMap<String, WorkspaceNodes>,
}

impl MemoryRepository {
    /// Creates a repository containing only the given default workspace and
    /// no accounts.
    pub fn new(default_workspace: impl Into<String>) -> Self {
        let default_workspace = default_workspace.into();
        let mut workspaces = HashMap::new();
        workspaces.insert(default_workspace.clone(), WorkspaceNodes::default());

        Self {
            default_workspace,
            administrator: None,
            accounts: HashMap::new(),
            workspaces,
        }
    }

    /// Registers an identity that may log in with the given password and
    /// access level.
    pub fn with_account(
        mut self,
        user_id: impl Into<String>,
        password: impl Into<String>,
        level: AccessLevel,
    ) -> Self {
        self.accounts.insert(
            user_id.into(),
            Account {
                password: password.into(),
                level,
            },
        );
        self
    }

    /// Adds a further named workspace next to the default one.
    pub fn with_workspace(mut self, name: impl Into<String>) -> Self {
        self.workspaces
            .entry(name.into())
            .or_insert_with(WorkspaceNodes::default);
        self
    }

    /// Names the administrator identity. When that identity is also a
    /// registered account, principal resolution prefers it over the asking
    /// session's own identity.
    pub fn with_administrator(mut self, user_id: impl Into<String>) -> Self {
        self.administrator = Some(user_id.into());
        self
    }
}

#[async_trait]
impl ContentRepository for MemoryRepository {
    async fn login(
        &self,
        credentials: &Credentials,
        workspace: Option<&str>,
    ) -> Result<Box<dyn ContentSession>, RepositoryError> {
        let account = self.accounts.get(credentials.user_id()).ok_or_else(|| {
            RepositoryError::AuthenticationFailed {
                user: credentials.user_id().to_string(),
            }
        })?;

        if account.password != credentials.password() {
            return Err(RepositoryError::AuthenticationFailed {
                user: credentials.user_id().to_string(),
            });
        }

        let name = workspace.unwrap_or(&self.default_workspace);
        let nodes = self
            .workspaces
            .get(name)
            .cloned()
            .ok_or_else(|| RepositoryError::WorkspaceNotFound {
                name: name.to_string(),
            })?;

        debug!(user = credentials.user_id(), workspace = name, "session opened");

        Ok(Box::new(MemorySession {
            user_id: credentials.user_id().to_string(),
            level: account.level,
            workspace: name.to_string(),
            nodes,
        }))
    }

    fn default_workspace(&self) -> &str {
        &self.default_workspace
    }

    fn known_principal(
        &self,
        session: &dyn ContentSession,
    ) -> Result<Principal, RepositoryError> {
        if let Some(administrator) = &self.administrator {
            if self.accounts.contains_key(administrator) {
                return Ok(Principal::named(administrator.clone()));
            }
        }

        // The session's own identity is always present in the account set.
        Ok(Principal::named(session.user_id()))
    }

    fn unknown_principal(
        &self,
        _session: &dyn ContentSession,
    ) -> Result<Principal, RepositoryError> {
        let mut index = 0usize;

        loop {
            let candidate = if index == 0 {
                "unknown-user".to_string()
            } else {
                format!("unknown-user-{index}")
            };

            if !self.accounts.contains_key(&candidate) {
                return Ok(Principal::named(candidate));
            }

            index += 1;
        }
    }
}

/// Session handle over one workspace of a [`MemoryRepository`].
struct MemorySession {
    user_id: String,
    level: AccessLevel,
    workspace: String,
    nodes: WorkspaceNodes,
}

impl MemorySession {
    fn ensure_writable(&self, action: &str, path: &NodePath) -> Result<(), RepositoryError> {
        if self.level.allows_writes() {
            Ok(())
        } else {
            Err(RepositoryError::AccessDenied {
                action: action.to_string(),
                path: path.to_string(),
            })
        }
    }
}

#[async_trait]
impl ContentSession for MemorySession {
    fn user_id(&self) -> &str {
        &self.user_id
    }

    fn access_level(&self) -> AccessLevel {
        self.level
    }

    fn workspace_name(&self) -> &str {
        &self.workspace
    }

    async fn get(&self, path: &NodePath) -> Result<Option<Value>, RepositoryError> {
        let nodes = self.nodes.read().await;
        Ok(nodes.get(path).cloned())
    }

    async fn put(&self, path: &NodePath, value: Value) -> Result<(), RepositoryError> {
        self.ensure_writable("write", path)?;

        let mut nodes = self.nodes.write().await;
        nodes.insert(path.clone(), value);
        Ok(())
    }

    async fn remove(&self, path: &NodePath) -> Result<(), RepositoryError> {
        self.ensure_writable("remove", path)?;

        let mut nodes = self.nodes.write().await;
        match nodes.remove(path) {
            Some(_) => Ok(()),
            None => Err(RepositoryError::NotFound {
                path: path.to_string(),
            }),
        }
    }
}
