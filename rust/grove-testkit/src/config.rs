use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use crate::AccessError;

/// Conventional file name of the base property descriptor.
pub const DESCRIPTOR_FILE: &str = "repository-stub.json";

/// Environment variable that overrides the descriptor path.
pub const DESCRIPTOR_PATH_VAR: &str = "GROVE_STUB_CONFIG";

/// Layered configuration for the repository under test.
///
/// A [`StubConfig`] is a conjunction of two key/value layers: an overlay
/// supplied by the caller at construction, and a base layer read from a
/// property descriptor file. All lookups check the overlay first and fall
/// back to the base layer. Neither layer mutates after construction.
///
/// The base layer loads lazily: a key satisfied by the overlay never
/// touches the descriptor, and a descriptor that fails to load surfaces
/// that failure on first fall-through (and on every one after - the
/// failure is cached, not retried).
pub struct StubConfig {
    overlay: HashMap<String, String>,
    descriptor_path: PathBuf,
    base: OnceLock<Result<HashMap<String, String>, AccessError>>,
}

impl StubConfig {
    /// Creates a configuration with the given overlay over the
    /// conventional descriptor: the file named by [`DESCRIPTOR_PATH_VAR`]
    /// when that variable is set, [`DESCRIPTOR_FILE`] in the working
    /// directory otherwise.
    pub fn new(overlay: HashMap<String, String>) -> Self {
        let descriptor_path = env::var(DESCRIPTOR_PATH_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DESCRIPTOR_FILE));

        Self::with_descriptor(overlay, descriptor_path)
    }

    /// Creates a configuration with the given overlay over the descriptor
    /// at `path`.
    pub fn with_descriptor(overlay: HashMap<String, String>, path: impl Into<PathBuf>) -> Self {
        Self {
            overlay,
            descriptor_path: path.into(),
            base: OnceLock::new(),
        }
    }

    /// Resolves `key` against the overlay first and the base descriptor
    /// second. Absence from both layers is `Ok(None)`, not an error;
    /// callers decide whether absence is fatal.
    pub fn resolve(&self, key: &str) -> Result<Option<&str>, AccessError> {
        if let Some(value) = self.overlay.get(key) {
            return Ok(Some(value.as_str()));
        }

        match self.base() {
            Ok(base) => Ok(base.get(key).map(String::as_str)),
            Err(error) => Err(error.clone()),
        }
    }

    /// Resolves `key`, treating absence as [`AccessError::MissingProperty`].
    pub(crate) fn require(&self, key: &str) -> Result<&str, AccessError> {
        self.resolve(key)?.ok_or_else(|| AccessError::MissingProperty {
            key: key.to_string(),
        })
    }

    fn base(&self) -> &Result<HashMap<String, String>, AccessError> {
        self.base
            .get_or_init(|| load_descriptor(&self.descriptor_path))
    }
}

impl Default for StubConfig {
    /// A configuration with an empty overlay: every lookup falls through to
    /// the conventional descriptor.
    fn default() -> Self {
        Self::new(HashMap::new())
    }
}

fn load_descriptor(path: &Path) -> Result<HashMap<String, String>, AccessError> {
    let text = fs::read_to_string(path).map_err(|error| AccessError::ConfigurationLoad {
        path: path.display().to_string(),
        cause: error.to_string(),
    })?;

    serde_json::from_str(&text).map_err(|error| AccessError::ConfigurationLoad {
        path: path.display().to_string(),
        cause: error.to_string(),
    })
}
