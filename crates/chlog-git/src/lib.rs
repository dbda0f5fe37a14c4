//! Git collaborators for chlog.
//!
//! This crate provides:
//! - [`GitLog`]: fetches `git log` text for a revision range
//! - [`Repository`]: tag ordering, revision keywords and remotes
//! - [`RemoteInfo`]: remote URL parsing

mod error;
mod fetch;
mod remote;
mod repository;

pub use error::{GitError, GitResult};
pub use fetch::GitLog;
pub use remote::RemoteInfo;
pub use repository::Repository;
