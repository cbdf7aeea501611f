//! Domain logic - pure business rules independent of git operations

pub mod bump;
pub mod commit;
pub mod prefix;
pub mod tag;
pub mod version;

pub use bump::{bump_for_commits, VersionBump};
pub use commit::{classify, is_valid_commit_message, ParsedCommit, BREAKING_CHANGE};
pub use prefix::CommitPrefix;
pub use tag::TagFormat;
pub use version::Version;
