use std::sync::Arc;

use async_trait::async_trait;
use grove_repository::{AccessLevel, ContentRepository, Credentials, MemoryRepository};
use tracing::debug;

use crate::{AccessError, StubConfig};

/// Configuration key selecting the repository factory implementation.
pub const REPOSITORY_IMPLEMENTATION_KEY: &str = "repository.implementation";

/// Configuration key naming the default workspace.
pub const DEFAULT_WORKSPACE_KEY: &str = "workspace.default";

/// Configuration key naming the administrator identity.
pub const ADMINISTRATOR_ID_KEY: &str = "identity.administrator";

/// Configuration key naming the anonymous identity.
pub const ANONYMOUS_ID_KEY: &str = "identity.anonymous";

/// Workspace name used when the configuration names none.
pub const FALLBACK_WORKSPACE: &str = "default";

/// Value of [`REPOSITORY_IMPLEMENTATION_KEY`] that wires the in-memory
/// repository.
pub const MEMORY_IMPLEMENTATION: &str = "memory";

/// Produces the repository instance under test from merged configuration.
///
/// A harness invokes its factory at most once; whatever the outcome, it is
/// final for that harness's lifetime. Implementations are free to start
/// expensive machinery (an embedded storage or indexing backend) here.
#[async_trait]
pub trait RepositoryFactory: Send + Sync {
    /// Builds the repository described by `config`.
    async fn create(
        &self,
        config: &StubConfig,
    ) -> Result<Arc<dyn ContentRepository>, AccessError>;
}

/// Resolves the factory named by [`REPOSITORY_IMPLEMENTATION_KEY`].
pub fn configured_factory(
    config: &StubConfig,
) -> Result<Arc<dyn RepositoryFactory>, AccessError> {
    let implementation = config.require(REPOSITORY_IMPLEMENTATION_KEY)?;

    match implementation {
        MEMORY_IMPLEMENTATION => Ok(Arc::new(MemoryFactory)),
        other => Err(AccessError::RepositoryAcquisition {
            cause: format!("Unknown repository implementation: {other}"),
        }),
    }
}

/// The configuration key fragment for an access level's credential entries.
fn level_slug(level: AccessLevel) -> &'static str {
    match level {
        AccessLevel::ReadOnly => "readonly",
        AccessLevel::ReadWrite => "readwrite",
        AccessLevel::Administrative => "superuser",
    }
}

/// Derives the credentials for `level` from configuration alone.
///
/// One code path covers all three tiers; each reads
/// `credentials.<tier>.name` and `credentials.<tier>.password`. The
/// derivation is pure - no repository instance is required, and repeated
/// calls yield equal credentials.
pub fn credentials_for(
    level: AccessLevel,
    config: &StubConfig,
) -> Result<Credentials, AccessError> {
    let slug = level_slug(level);
    let user = config.require(&format!("credentials.{slug}.name"))?;
    let password = config.require(&format!("credentials.{slug}.password"))?;

    Ok(Credentials::with_password(user, password))
}

/// Wires a [`MemoryRepository`] from configuration: the default workspace,
/// one account per credential tier, the administrator identity, and (when
/// configured) a passwordless read-only account for the anonymous identity.
pub struct MemoryFactory;

#[async_trait]
impl RepositoryFactory for MemoryFactory {
    async fn create(
        &self,
        config: &StubConfig,
    ) -> Result<Arc<dyn ContentRepository>, AccessError> {
        let workspace = config
            .resolve(DEFAULT_WORKSPACE_KEY)?
            .unwrap_or(FALLBACK_WORKSPACE);

        let mut repository = MemoryRepository::new(workspace);

        for level in [
            AccessLevel::ReadOnly,
            AccessLevel::ReadWrite,
            AccessLevel::Administrative,
        ] {
            let credentials = credentials_for(level, config)?;
            repository =
                repository.with_account(credentials.user_id(), credentials.password(), level);
        }

        if let Some(administrator) = config.resolve(ADMINISTRATOR_ID_KEY)? {
            repository = repository.with_administrator(administrator);
        }

        if let Some(anonymous) = config.resolve(ANONYMOUS_ID_KEY)? {
            repository = repository.with_account(anonymous, "", AccessLevel::ReadOnly);
        }

        debug!(workspace, "memory repository wired");

        Ok(Arc::new(repository))
    }
}

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use grove_repository::{AccessLevel, ContentRepository};

    use crate::{
        AccessError, MemoryFactory, RepositoryFactory, StubConfig, configured_factory,
        credentials_for, memory_descriptor, write_descriptor,
    };

    #[test]
    fn it_derives_equal_credentials_per_tier() -> Result<()> {
        let (path, _root) = write_descriptor(&memory_descriptor())?;
        let config = StubConfig::with_descriptor(Default::default(), path);

        let first = credentials_for(AccessLevel::ReadOnly, &config)?;
        let second = credentials_for(AccessLevel::ReadOnly, &config)?;

        assert_eq!(first, second);
        assert_eq!(first.user_id(), "reader");

        let admin = credentials_for(AccessLevel::Administrative, &config)?;

        assert_eq!(admin.user_id(), "admin");

        Ok(())
    }

    #[test]
    fn it_reports_missing_credential_entries() -> Result<()> {
        let mut entries = memory_descriptor();
        entries.remove("credentials.readwrite.password");
        let (path, _root) = write_descriptor(&entries)?;
        let config = StubConfig::with_descriptor(Default::default(), path);

        let result = credentials_for(AccessLevel::ReadWrite, &config);

        assert!(matches!(
            result,
            Err(AccessError::MissingProperty { key }) if key == "credentials.readwrite.password"
        ));

        Ok(())
    }

    #[test]
    fn it_rejects_unknown_implementation_selectors() -> Result<()> {
        let mut entries = memory_descriptor();
        entries.insert(
            super::REPOSITORY_IMPLEMENTATION_KEY.to_string(),
            "teleported".to_string(),
        );
        let (path, _root) = write_descriptor(&entries)?;
        let config = StubConfig::with_descriptor(Default::default(), path);

        let result = configured_factory(&config).map(|_| ());

        assert!(matches!(
            result,
            Err(AccessError::RepositoryAcquisition { .. })
        ));

        Ok(())
    }

    #[tokio::test]
    async fn it_wires_the_configured_default_workspace() -> Result<()> {
        let (path, _root) = write_descriptor(&memory_descriptor())?;
        let config = StubConfig::with_descriptor(Default::default(), path);

        let repository = MemoryFactory.create(&config).await?;

        assert_eq!(repository.default_workspace(), "main");

        Ok(())
    }
}
