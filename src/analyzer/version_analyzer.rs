use crate::domain::{bump_for_commits, Version, VersionBump};
use crate::error::Result;

/// Outcome of deciding the next version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionDecision {
    /// Version the latest tag carries, if any
    pub previous: Option<Version>,
    /// Aggregated bump across the analyzed commits (after the always-patch policy)
    pub bump: VersionBump,
    /// The version to tag, or `None` when no new tag is needed
    pub next: Option<Version>,
}

/// Analyzes commits to determine the next version
#[derive(Debug, Clone, Default)]
pub struct VersionAnalyzer {
    always_patch: bool,
}

impl VersionAnalyzer {
    /// Create a new version analyzer
    pub fn new(always_patch: bool) -> Self {
        VersionAnalyzer { always_patch }
    }

    /// Analyze commit messages and determine the version bump
    pub fn analyze_messages(&self, messages: &[String]) -> Result<VersionBump> {
        bump_for_commits(messages)
    }

    /// Decide the next version from the latest tag and an aggregated bump.
    ///
    /// - no previous version: the initial version, regardless of the bump
    /// - `None` bump: a patch if always-patch is set, otherwise nothing
    /// - anything else: exactly one increment of the previous version
    pub fn decide(&self, previous: Option<&Version>, bump: VersionBump) -> VersionDecision {
        let Some(previous) = previous else {
            return VersionDecision {
                previous: None,
                bump,
                next: Some(Version::initial()),
            };
        };

        let bump = if bump == VersionBump::None && self.always_patch {
            VersionBump::Patch
        } else {
            bump
        };

        let next = match bump {
            VersionBump::None => None,
            _ => Some(previous.bump(bump)),
        };

        VersionDecision {
            previous: Some(previous.clone()),
            bump,
            next,
        }
    }
}
