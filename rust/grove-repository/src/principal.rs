use std::fmt::{Debug, Display, Formatter};

use serde::{Deserialize, Serialize};

/// Identifies an actor within the repository's security domain. A principal
/// either names an identity known to the repository or one guaranteed to be
/// absent from it; which of the two is established by the resolver that
/// produced it.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Principal(String);

impl Principal {
    /// Creates a principal for the given identity name.
    pub fn named(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The identity name this principal refers to.
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl Display for Principal {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl Debug for Principal {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Principal({})", self.0)
    }
}
