use crate::error::{Result, SemtagError};
use std::fmt;
use std::str::FromStr;

/// Conventional commit kinds recognized by the classifier.
///
/// `Nop` is reserved for merge commits; it never comes out of prefix matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommitPrefix {
    Nop,
    Fix,
    Feat,
    Chore,
    Docs,
    Style,
    Refactor,
    Perf,
    Test,
    Ci,
    Improve,
}

impl CommitPrefix {
    /// Every kind that can be matched from a message's first line
    pub const MATCHABLE: [CommitPrefix; 10] = [
        CommitPrefix::Fix,
        CommitPrefix::Feat,
        CommitPrefix::Chore,
        CommitPrefix::Docs,
        CommitPrefix::Style,
        CommitPrefix::Refactor,
        CommitPrefix::Perf,
        CommitPrefix::Test,
        CommitPrefix::Ci,
        CommitPrefix::Improve,
    ];

    /// Canonical lowercase token
    pub fn as_str(&self) -> &'static str {
        match self {
            CommitPrefix::Nop => "nop",
            CommitPrefix::Fix => "fix",
            CommitPrefix::Feat => "feat",
            CommitPrefix::Chore => "chore",
            CommitPrefix::Docs => "docs",
            CommitPrefix::Style => "style",
            CommitPrefix::Refactor => "refactor",
            CommitPrefix::Perf => "perf",
            CommitPrefix::Test => "test",
            CommitPrefix::Ci => "ci",
            CommitPrefix::Improve => "improve",
        }
    }
}

impl fmt::Display for CommitPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CommitPrefix {
    type Err = SemtagError;

    fn from_str(s: &str) -> Result<Self> {
        let lowered = s.to_ascii_lowercase();
        if lowered == CommitPrefix::Nop.as_str() {
            return Ok(CommitPrefix::Nop);
        }
        CommitPrefix::MATCHABLE
            .into_iter()
            .find(|p| p.as_str() == lowered)
            .ok_or_else(|| SemtagError::NotRecognized(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_lowercase() {
        assert_eq!(CommitPrefix::Feat.to_string(), "feat");
        assert_eq!(CommitPrefix::Improve.to_string(), "improve");
        assert_eq!(CommitPrefix::Nop.to_string(), "nop");
    }

    #[test]
    fn test_from_str_case_insensitive() {
        assert_eq!("FEAT".parse::<CommitPrefix>().unwrap(), CommitPrefix::Feat);
        assert_eq!("Ci".parse::<CommitPrefix>().unwrap(), CommitPrefix::Ci);
        assert_eq!("nop".parse::<CommitPrefix>().unwrap(), CommitPrefix::Nop);
    }

    #[test]
    fn test_from_str_unknown() {
        let err = "feature".parse::<CommitPrefix>().unwrap_err();
        assert!(err.is_not_recognized());
    }

    #[test]
    fn test_matchable_excludes_nop() {
        assert!(!CommitPrefix::MATCHABLE.contains(&CommitPrefix::Nop));
        assert_eq!(CommitPrefix::MATCHABLE.len(), 10);
    }
}
