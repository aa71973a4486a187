#![warn(missing_docs)]

//! This crate contains the API boundary for a hierarchical content
//! repository: the opaque [`ContentRepository`] and [`ContentSession`]
//! traits, the identity types ([`Credentials`], [`Principal`]) and content
//! types ([`NodePath`], [`Value`]) they exchange, and a trivial in-memory
//! provider ([`MemoryRepository`]) for suites that need a backend to
//! exercise.
//!
//! A backend is constructed up front and then only reached through the
//! traits:
//!
//! ```rust
//! use grove_repository::{AccessLevel, Credentials, MemoryRepository};
//!
//! let repository = MemoryRepository::new("main")
//!     .with_account("reader", "reader-secret", AccessLevel::ReadOnly);
//!
//! let credentials = Credentials::with_password("reader", "reader-secret");
//! ```
//!
//! Sessions returned by [`ContentRepository::login`] are owned by the
//! caller; dropping one closes it.

mod credentials;
pub use credentials::*;

mod error;
pub use error::*;

mod memory;
pub use memory::*;

mod path;
pub use path::*;

mod principal;
pub use principal::*;

mod repository;
pub use repository::*;

mod value;
pub use value::*;
