use std::collections::HashMap;
use std::sync::Arc;

use grove_repository::{
    AccessLevel, ContentRepository, ContentSession, Credentials, Principal, RepositoryError,
};
use tokio::sync::OnceCell;
use tracing::{debug, warn};

use crate::{AccessError, RepositoryFactory, StubConfig, configured_factory, credentials_for};

/// Hands out access to the repository under test.
///
/// A [`RepositoryHarness`] owns one lazily-created repository instance:
/// whichever accessor needs the instance first triggers creation through
/// the [`RepositoryFactory`], and every accessor after that - session,
/// property or handle - reuses the same outcome. Creation happens at most
/// once per harness lifetime, including when it fails: the failure is
/// cached and replayed rather than retried, so a persistent
/// misconfiguration reports consistently instead of flapping.
///
/// Credentials, by contrast, derive from configuration alone and never
/// require the backend to have started.
pub struct RepositoryHarness {
    config: StubConfig,
    factory: Option<Arc<dyn RepositoryFactory>>,
    repository: OnceCell<Result<Arc<dyn ContentRepository>, AccessError>>,
}

impl RepositoryHarness {
    /// Creates a harness configured entirely by the property descriptor.
    pub fn new() -> Self {
        Self::with_config(StubConfig::default())
    }

    /// Creates a harness with overlay entries that take precedence over the
    /// property descriptor.
    pub fn with_overlay(overlay: HashMap<String, String>) -> Self {
        Self::with_config(StubConfig::new(overlay))
    }

    /// Creates a harness over an explicit configuration.
    pub fn with_config(config: StubConfig) -> Self {
        Self {
            config,
            factory: None,
            repository: OnceCell::new(),
        }
    }

    /// Creates a harness that acquires its repository from `factory`
    /// instead of the configuration-selected implementation.
    pub fn with_factory(config: StubConfig, factory: Arc<dyn RepositoryFactory>) -> Self {
        Self {
            config,
            factory: Some(factory),
            repository: OnceCell::new(),
        }
    }

    /// The merged configuration this harness was constructed over.
    pub fn config(&self) -> &StubConfig {
        &self.config
    }

    /// Returns the repository instance under test, creating it on first
    /// call.
    ///
    /// Concurrent first callers all await the same creation attempt and
    /// observe the same outcome; the factory is never invoked a second
    /// time, not even after a failure.
    pub async fn repository(&self) -> Result<Arc<dyn ContentRepository>, AccessError> {
        self.repository
            .get_or_init(|| async {
                debug!("acquiring repository instance");

                let factory = match &self.factory {
                    Some(factory) => factory.clone(),
                    None => configured_factory(&self.config)?,
                };

                match factory.create(&self.config).await {
                    Ok(repository) => {
                        debug!("repository instance ready");
                        Ok(repository)
                    }
                    Err(error) => {
                        warn!(%error, "repository acquisition failed; the failure is final for this harness");
                        Err(error)
                    }
                }
            })
            .await
            .clone()
    }

    /// Credentials for `level`, derived from configuration alone. Repeated
    /// calls yield equal credentials, whether or not the repository
    /// instance exists yet.
    pub fn credentials(&self, level: AccessLevel) -> Result<Credentials, AccessError> {
        credentials_for(level, &self.config)
    }

    /// Read-only tier credentials.
    pub fn readonly_credentials(&self) -> Result<Credentials, AccessError> {
        self.credentials(AccessLevel::ReadOnly)
    }

    /// Read-write tier credentials.
    pub fn readwrite_credentials(&self) -> Result<Credentials, AccessError> {
        self.credentials(AccessLevel::ReadWrite)
    }

    /// Administrative tier credentials.
    pub fn superuser_credentials(&self) -> Result<Credentials, AccessError> {
        self.credentials(AccessLevel::Administrative)
    }

    /// Opens a session at `level` against the workspace named by
    /// `workspace`, or against the configured default workspace when `None`
    /// is given. The caller owns the returned session.
    pub async fn session(
        &self,
        level: AccessLevel,
        workspace: Option<&str>,
    ) -> Result<Box<dyn ContentSession>, AccessError> {
        let credentials = self.credentials(level)?;
        let repository = self.repository().await?;

        debug!(user = credentials.user_id(), ?workspace, "logging in");

        repository
            .login(&credentials, workspace)
            .await
            .map_err(|error| match error {
                RepositoryError::Unsupported(operation) => {
                    AccessError::NotExecutable { operation }
                }
                error => AccessError::Authentication {
                    user: credentials.user_id().to_string(),
                    cause: error.to_string(),
                },
            })
    }

    /// A read-only session of the default or named workspace.
    pub async fn readonly_session(
        &self,
        workspace: Option<&str>,
    ) -> Result<Box<dyn ContentSession>, AccessError> {
        self.session(AccessLevel::ReadOnly, workspace).await
    }

    /// A read-write session of the default or named workspace.
    pub async fn readwrite_session(
        &self,
        workspace: Option<&str>,
    ) -> Result<Box<dyn ContentSession>, AccessError> {
        self.session(AccessLevel::ReadWrite, workspace).await
    }

    /// A superuser session of the default or named workspace, with read and
    /// write access to the whole workspace.
    pub async fn superuser_session(
        &self,
        workspace: Option<&str>,
    ) -> Result<Box<dyn ContentSession>, AccessError> {
        self.session(AccessLevel::Administrative, workspace).await
    }

    /// Resolves the configuration property `name`; absent properties are
    /// `Ok(None)`.
    ///
    /// Forces creation of the repository instance first: properties are
    /// defined as whatever the active stub configuration reports, and the
    /// active stub is only fully resolved once its repository exists.
    pub async fn property(&self, name: &str) -> Result<Option<String>, AccessError> {
        self.repository().await?;

        Ok(self.config.resolve(name)?.map(str::to_string))
    }

    /// Resolves a principal known to exist in the repository's security
    /// domain, relative to `session`.
    pub async fn known_principal(
        &self,
        session: &dyn ContentSession,
    ) -> Result<Principal, AccessError> {
        let repository = self.repository().await?;

        repository
            .known_principal(session)
            .map_err(principal_error)
    }

    /// Resolves a principal guaranteed to be absent from the repository's
    /// security domain, relative to `session`. Never returns a principal
    /// that [`Self::known_principal`] returns for the same session.
    pub async fn unknown_principal(
        &self,
        session: &dyn ContentSession,
    ) -> Result<Principal, AccessError> {
        let repository = self.repository().await?;

        repository
            .unknown_principal(session)
            .map_err(principal_error)
    }
}

impl Default for RepositoryHarness {
    fn default() -> Self {
        Self::new()
    }
}

/// A backend that cannot resolve principals reports the capability as
/// unsupported; suites must skip, not fail.
fn principal_error(error: RepositoryError) -> AccessError {
    match error {
        RepositoryError::Unsupported(operation) => AccessError::NotExecutable { operation },
        error => AccessError::NotExecutable {
            operation: error.to_string(),
        },
    }
}
