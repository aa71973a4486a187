#![warn(missing_docs)]

//! Access layer for driving conformance tests against a hierarchical content
//! repository.
//!
//! A [`RepositoryHarness`] resolves layered configuration (explicit overlay
//! entries over a property descriptor file), lazily creates exactly one
//! repository instance per harness lifetime through a [`RepositoryFactory`],
//! and hands out authenticated sessions at three trust tiers:
//!
//! ```ignore
//! use grove_testkit::RepositoryHarness;
//!
//! let harness = RepositoryHarness::new();
//!
//! // Credentials derive from configuration alone; the backend has not
//! // started yet.
//! let credentials = harness.readonly_credentials()?;
//!
//! // First session access creates the repository instance - exactly once,
//! // no matter how many sessions follow.
//! let session = harness.superuser_session(None).await?;
//! session.put(&"/content/greeting".parse()?, "hello".into()).await?;
//! ```
//!
//! Sessions are owned by the caller; the harness neither tracks nor
//! recycles them.

mod config;
pub use config::*;

mod error;
pub use error::*;

mod harness;
pub use harness::*;

mod stub;
pub use stub::*;

#[cfg(any(test, feature = "helpers"))]
mod helpers;
#[cfg(any(test, feature = "helpers"))]
pub use helpers::*;
