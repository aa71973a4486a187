use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::Result;
use tempfile::TempDir;

use crate::{
    ADMINISTRATOR_ID_KEY, ANONYMOUS_ID_KEY, DEFAULT_WORKSPACE_KEY, MEMORY_IMPLEMENTATION,
    REPOSITORY_IMPLEMENTATION_KEY,
};

/// A complete descriptor entry set wiring the in-memory repository: the
/// `main` workspace plus one account per credential tier. Useful as a
/// starting point for suites that only need to vary a few entries, either
/// as a written descriptor or directly as an overlay.
pub fn memory_descriptor() -> HashMap<String, String> {
    HashMap::from(
        [
            (REPOSITORY_IMPLEMENTATION_KEY, MEMORY_IMPLEMENTATION),
            (DEFAULT_WORKSPACE_KEY, "main"),
            (ADMINISTRATOR_ID_KEY, "admin"),
            (ANONYMOUS_ID_KEY, "anonymous"),
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

/// Writes `entries` as a property descriptor in a fresh temporary
/// directory, for use in tests. The descriptor lives as long as the
/// returned [`TempDir`].
pub fn write_descriptor(entries: &HashMap<String, String>) -> Result<(PathBuf, TempDir)> {
    let root = tempfile::tempdir()?;
    let path = root.path().join("repository-stub.json");

    std::fs::write(&path, serde_json::to_string_pretty(entries)?)?;

    Ok((path, root))
}
