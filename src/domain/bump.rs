use crate::domain::commit::ParsedCommit;
use crate::domain::prefix::CommitPrefix;
use crate::error::{Result, SemtagError};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Version bump level, ordered from smallest to largest
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum VersionBump {
    #[default]
    None,
    Patch,
    Minor,
    Major,
}

impl VersionBump {
    /// Bump level required by a single classified commit
    pub fn for_commit(commit: &ParsedCommit) -> Self {
        if commit.is_breaking_change {
            return VersionBump::Major;
        }
        match commit.prefix {
            CommitPrefix::Feat => VersionBump::Minor,
            CommitPrefix::Fix => VersionBump::Patch,
            _ => VersionBump::None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            VersionBump::None => "none",
            VersionBump::Patch => "patch",
            VersionBump::Minor => "minor",
            VersionBump::Major => "major",
        }
    }
}

impl fmt::Display for VersionBump {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VersionBump {
    type Err = SemtagError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "none" => Ok(VersionBump::None),
            "patch" => Ok(VersionBump::Patch),
            "minor" => Ok(VersionBump::Minor),
            "major" => Ok(VersionBump::Major),
            other => Err(SemtagError::version(format!(
                "'{}' is not a valid bump, try [none, patch, minor, major]",
                other
            ))),
        }
    }
}

/// Reduce a set of commit messages to the single highest bump they require.
///
/// Messages that match no known prefix are skipped rather than failing the
/// whole computation. Any other error aborts and is returned unchanged.
pub fn bump_for_commits<I, S>(messages: I) -> Result<VersionBump>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut bump = VersionBump::None;

    for message in messages {
        let message = message.as_ref();
        let commit = match ParsedCommit::parse(message) {
            Ok(commit) => commit,
            Err(e) if e.is_not_recognized() => {
                debug!(message = %first_line(message), "skipping unrecognized commit");
                continue;
            }
            Err(e) => return Err(e),
        };
        bump = bump.max(VersionBump::for_commit(&commit));
    }

    Ok(bump)
}

fn first_line(message: &str) -> &str {
    message.lines().next().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering() {
        assert!(VersionBump::None < VersionBump::Patch);
        assert!(VersionBump::Patch < VersionBump::Minor);
        assert!(VersionBump::Minor < VersionBump::Major);
        assert_eq!(VersionBump::default(), VersionBump::None);
    }

    #[test]
    fn test_empty_is_none() {
        let none: [&str; 0] = [];
        assert_eq!(bump_for_commits(none).unwrap(), VersionBump::None);
    }

    #[test]
    fn test_docs_and_chore_are_none() {
        let bump = bump_for_commits(["docs: document a thing", "chore: chore-thing"]).unwrap();
        assert_eq!(bump, VersionBump::None);
    }

    #[test]
    fn test_fix_is_patch() {
        let bump = bump_for_commits(["fix: fix a thing", "docs: document a thing"]).unwrap();
        assert_eq!(bump, VersionBump::Patch);
    }

    #[test]
    fn test_feat_is_minor() {
        let bump = bump_for_commits(["fix: fix a thing", "feat: do a thing"]).unwrap();
        assert_eq!(bump, VersionBump::Minor);
    }

    #[test]
    fn test_breaking_refactor_dominates_feat() {
        let bump = bump_for_commits(["feat: a", "refactor!: b"]).unwrap();
        assert_eq!(bump, VersionBump::Major);

        let scoped = bump_for_commits(["feat: a", "refactor(config)!: b"]).unwrap();
        assert_eq!(scoped, VersionBump::Major);
    }

    #[test]
    fn test_breaking_footer_is_major() {
        let bump = bump_for_commits([
            "fix: fix a thing",
            "feat: do a thing",
            "fix: fix bug\n\nBREAKING CHANGE stuff works different\n",
        ])
        .unwrap();
        assert_eq!(bump, VersionBump::Major);
    }

    #[test]
    fn test_unrecognized_commits_are_skipped() {
        let bump = bump_for_commits(["not a real commit", "feat: valid one"]).unwrap();
        assert_eq!(bump, VersionBump::Minor);

        let only_junk = bump_for_commits(["wip", "more wip"]).unwrap();
        assert_eq!(only_junk, VersionBump::None);
    }

    #[test]
    fn test_merge_commits_do_not_bump() {
        let bump = bump_for_commits(["Merge branch 'feature' into main", "docs: x"]).unwrap();
        assert_eq!(bump, VersionBump::None);
    }

    #[test]
    fn test_order_does_not_matter() {
        let forward = bump_for_commits(["fix: a", "feat: b", "chore: c"]).unwrap();
        let backward = bump_for_commits(["chore: c", "feat: b", "fix: a"]).unwrap();
        assert_eq!(forward, backward);
    }

    #[test]
    fn test_accepts_owned_strings() {
        let messages = vec!["feat: owned".to_string()];
        assert_eq!(bump_for_commits(&messages).unwrap(), VersionBump::Minor);
    }

    #[test]
    fn test_display_and_parse() {
        for bump in [
            VersionBump::None,
            VersionBump::Patch,
            VersionBump::Minor,
            VersionBump::Major,
        ] {
            assert_eq!(bump.to_string().parse::<VersionBump>().unwrap(), bump);
        }
        assert!("huge".parse::<VersionBump>().is_err());
    }
}
