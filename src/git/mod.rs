//! Git operations abstraction layer
//!
//! The workflow only talks to a repository through the [Repository] trait,
//! which keeps the version decision testable without a real git directory.
//!
//! - [repository::Git2Repository]: the real implementation using the `git2` crate
//! - [mock::MockRepository]: an in-memory implementation for tests
//!
//! ```rust
//! # use semtag::git::Repository;
//! # fn example<R: Repository>(repo: &R) -> semtag::Result<()> {
//! let latest = repo.latest_tag()?;
//! let commits = repo.commits_since(latest.map(|t| t.oid))?;
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod mock;
pub mod repository;

pub use auth::{AuthMethod, PushAuth, RemoteType};
pub use mock::{MockCall, MockRepository};
pub use repository::Git2Repository;

use crate::domain::Version;
use crate::error::Result;
use git2::Oid;

/// Git config key that turns validation off for a repository
pub const DISABLE_CONFIG_KEY: &str = "semtag.disable";

/// The highest tag in the repository that parses as a semantic version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LatestTag {
    /// Tag name as stored in git (e.g., "v1.2.3")
    pub name: String,
    /// Commit the tag points to, peeled through annotated tags
    pub oid: Oid,
    pub version: Version,
}

/// Repository operations the tagging workflow needs
///
/// All implementors must be `Send`. Implementations map their
/// underlying failures (like `git2::Error`) onto [crate::error::SemtagError].
pub trait Repository: Send {
    /// Find the tag with the highest semantic version.
    ///
    /// Tags that are not semantic versions are ignored, not reported.
    ///
    /// # Returns
    /// * `Ok(Some(LatestTag))` - The highest semver tag
    /// * `Ok(None)` - If no tag parses as a semantic version
    fn latest_tag(&self) -> Result<Option<LatestTag>>;

    /// Commit messages reachable from HEAD but not from `from`.
    ///
    /// Returned oldest first. `None` lists every commit reachable from HEAD.
    fn commits_since(&self, from: Option<Oid>) -> Result<Vec<String>>;

    /// Create a tag at HEAD. Fails if the tag already exists.
    fn create_tag(&self, name: &str) -> Result<()>;

    /// Delete the tag if it exists, then create it at HEAD.
    ///
    /// Used for moving alias tags such as `latest`.
    fn recreate_tag(&self, name: &str) -> Result<()>;

    /// Push all tags to the configured remote
    fn push_tags(&self) -> Result<()>;

    /// Push all tags to the configured remote, overwriting remote tags
    fn force_push_tags(&self) -> Result<()>;

    /// Resolve a branch (or any revision) to the commit it points at
    fn hash_for_branch(&self, branch: &str) -> Result<Oid>;

    /// Whether validation has been switched off for this repository
    fn is_disabled(&self) -> Result<bool>;
}
