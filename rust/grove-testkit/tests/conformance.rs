//! End-to-end pass over the harness with the in-memory repository wired
//! from a property descriptor file, the way a conformance suite consumes
//! the crate.

use std::collections::HashMap;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::Result;
use grove_repository::{
    ContentRepository, ContentSession, Credentials, NodePath, RepositoryError, Value,
};
use grove_testkit::{
    ADMINISTRATOR_ID_KEY, ANONYMOUS_ID_KEY, RepositoryHarness, StubConfig,
};
use tempfile::TempDir;

fn descriptor_entries() -> HashMap<String, String> {
    HashMap::from(
        [
            ("repository.implementation", "memory"),
            ("workspace.default", "main"),
            ("identity.administrator", "admin"),
            ("identity.anonymous", "anonymous"),
            ("credentials.readonly.name", "reader"),
            ("credentials.readonly.password", "reader-secret"),
            ("credentials.readwrite.name", "writer"),
            ("credentials.readwrite.password", "writer-secret"),
            ("credentials.superuser.name", "admin"),
            ("credentials.superuser.password", "admin-secret"),
        ]
        .map(|(key, value)| (key.to_string(), value.to_string())),
    )
}

fn write_descriptor(entries: &HashMap<String, String>) -> Result<(PathBuf, TempDir)> {
    let root = tempfile::tempdir()?;
    let path = root.path().join("repository-stub.json");

    std::fs::write(&path, serde_json::to_string(entries)?)?;

    Ok((path, root))
}

fn harness_with_overlay(
    overlay: HashMap<String, String>,
) -> Result<(RepositoryHarness, TempDir)> {
    let (path, root) = write_descriptor(&descriptor_entries())?;
    let config = StubConfig::with_descriptor(overlay, path);

    Ok((RepositoryHarness::with_config(config), root))
}

fn harness() -> Result<(RepositoryHarness, TempDir)> {
    harness_with_overlay(HashMap::new())
}

#[tokio::test]
async fn it_boots_the_configured_repository_from_the_descriptor() -> Result<()> {
    let (harness, _root) = harness()?;

    let session = harness.superuser_session(None).await?;

    assert_eq!(session.workspace_name(), "main");
    assert_eq!(session.user_id(), "admin");

    Ok(())
}

#[tokio::test]
async fn it_applies_overlay_entries_over_the_descriptor() -> Result<()> {
    let overlay = HashMap::from([(
        "workspace.default".to_string(),
        "staging".to_string(),
    )]);
    let (harness, _root) = harness_with_overlay(overlay)?;

    let session = harness.superuser_session(None).await?;

    assert_eq!(session.workspace_name(), "staging");
    assert_eq!(
        harness.property("workspace.default").await?.as_deref(),
        Some("staging")
    );

    Ok(())
}

#[tokio::test]
async fn it_authenticates_each_tier_as_its_configured_identity() -> Result<()> {
    let (harness, _root) = harness()?;

    assert_eq!(harness.readonly_credentials()?.user_id(), "reader");
    assert_eq!(harness.readwrite_credentials()?.user_id(), "writer");
    assert_eq!(harness.superuser_credentials()?.user_id(), "admin");

    let session = harness.readwrite_session(None).await?;

    assert_eq!(session.user_id(), "writer");

    Ok(())
}

#[tokio::test]
async fn it_observes_tier_enforcement_through_the_backend() -> Result<()> {
    let (harness, _root) = harness()?;
    let path = NodePath::from_str("/content/articles/first")?;

    let superuser = harness.superuser_session(None).await?;
    superuser.put(&path, Value::from("body")).await?;

    let readonly = harness.readonly_session(None).await?;

    assert_eq!(
        readonly.get(&path).await?,
        Some(Value::String("body".to_string()))
    );

    let refusal = readonly.put(&path, Value::from("vandalism")).await;

    assert!(matches!(
        refusal,
        Err(RepositoryError::AccessDenied { .. })
    ));

    Ok(())
}

#[tokio::test]
async fn it_resolves_disjoint_principals_for_one_session() -> Result<()> {
    let (harness, _root) = harness()?;
    let session = harness.readonly_session(None).await?;

    let known = harness.known_principal(session.as_ref()).await?;

    assert_eq!(known.name(), "admin");

    for _ in 0..3 {
        let unknown = harness.unknown_principal(session.as_ref()).await?;

        assert_ne!(known, unknown);
    }

    Ok(())
}

#[tokio::test]
async fn it_exposes_identity_properties_and_the_anonymous_account() -> Result<()> {
    let (harness, _root) = harness()?;

    assert_eq!(
        harness.property(ADMINISTRATOR_ID_KEY).await?.as_deref(),
        Some("admin")
    );
    assert_eq!(
        harness.property(ANONYMOUS_ID_KEY).await?.as_deref(),
        Some("anonymous")
    );

    // The anonymous identity is registered read-only with an empty secret.
    let repository = harness.repository().await?;
    let anonymous = repository
        .login(&Credentials::with_password("anonymous", ""), None)
        .await?;

    assert!(!anonymous.access_level().allows_writes());

    Ok(())
}
