use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::RepositoryError;

/// A [`NodePath`] is a helper type that validates and addresses a node
/// within a workspace's hierarchy. Paths are absolute and slash-separated;
/// `/` alone addresses the workspace root.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct NodePath(String);

impl NodePath {
    /// The path of the workspace root.
    pub fn root() -> Self {
        Self("/".to_string())
    }

    /// Whether this path addresses the workspace root.
    pub fn is_root(&self) -> bool {
        self.0 == "/"
    }

    /// The individual name segments of this path, in root-to-leaf order.
    /// The root path has no segments.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('/').filter(|segment| !segment.is_empty())
    }

    /// The path of this node's parent, or `None` for the root.
    pub fn parent(&self) -> Option<NodePath> {
        if self.is_root() {
            return None;
        }

        match self.0.rsplit_once('/') {
            Some(("", _)) => Some(NodePath::root()),
            Some((parent, _)) => Some(NodePath(parent.to_string())),
            None => None,
        }
    }

    /// Extends this path with one more name segment.
    pub fn join(&self, segment: &str) -> Result<NodePath, RepositoryError> {
        if segment.is_empty() || segment.contains('/') {
            return Err(RepositoryError::InvalidPath(format!(
                "'{segment}' is not a valid path segment"
            )));
        }

        if self.is_root() {
            Ok(NodePath(format!("/{segment}")))
        } else {
            Ok(NodePath(format!("{}/{segment}", self.0)))
        }
    }

    /// This path as a plain string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for NodePath {
    type Err = RepositoryError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let Some(rest) = value.strip_prefix('/') else {
            return Err(RepositoryError::InvalidPath(format!(
                "'{value}' is not absolute"
            )));
        };

        if rest.is_empty() {
            return Ok(NodePath::root());
        }

        if rest.split('/').any(|segment| segment.is_empty()) {
            return Err(RepositoryError::InvalidPath(format!(
                "'{value}' contains an empty segment"
            )));
        }

        Ok(NodePath(value.to_string()))
    }
}

impl Display for NodePath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for NodePath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use anyhow::Result;

    use crate::{NodePath, RepositoryError};

    #[test]
    fn it_parses_absolute_paths() -> Result<()> {
        let path = NodePath::from_str("/content/articles/first")?;

        assert_eq!(
            path.segments().collect::<Vec<_>>(),
            vec!["content", "articles", "first"]
        );

        Ok(())
    }

    #[test]
    fn it_rejects_relative_paths() {
        let result = NodePath::from_str("content/articles");

        assert!(matches!(result, Err(RepositoryError::InvalidPath(_))));
    }

    #[test]
    fn it_rejects_empty_segments() {
        let result = NodePath::from_str("/content//articles");

        assert!(matches!(result, Err(RepositoryError::InvalidPath(_))));

        let result = NodePath::from_str("/content/");

        assert!(matches!(result, Err(RepositoryError::InvalidPath(_))));
    }

    #[test]
    fn it_walks_up_to_the_root() -> Result<()> {
        let path = NodePath::from_str("/content/articles")?;

        let parent = path.parent().expect("non-root path has a parent");
        assert_eq!(parent.as_str(), "/content");

        let grandparent = parent.parent().expect("non-root path has a parent");
        assert!(grandparent.is_root());
        assert_eq!(grandparent.parent(), None);

        Ok(())
    }

    #[test]
    fn it_joins_segments() -> Result<()> {
        let path = NodePath::root().join("content")?.join("articles")?;

        assert_eq!(path.as_str(), "/content/articles");
        assert!(path.join("a/b").is_err());

        Ok(())
    }
}
