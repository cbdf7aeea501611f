use crate::domain::prefix::CommitPrefix;
use crate::error::{Result, SemtagError};
use regex::Regex;
use std::sync::LazyLock;

/// Footer marker that makes any recognized commit a breaking change
pub const BREAKING_CHANGE: &str = "BREAKING CHANGE";

const MERGE_PREFIX: &str = "Merge branch";

struct PrefixMatcher {
    prefix: CommitPrefix,
    conventional: Regex,
    breaking: Regex,
}

static MATCHERS: LazyLock<Vec<PrefixMatcher>> = LazyLock::new(|| {
    debug_assert!(
        tokens_are_disjoint(&CommitPrefix::MATCHABLE),
        "commit prefix tokens must not be prefixes of one another"
    );

    CommitPrefix::MATCHABLE
        .into_iter()
        .map(|prefix| PrefixMatcher {
            prefix,
            conventional: Regex::new(&format!(r"(?i)^{}(?:\((?P<scope>.+?)\))?!?: ", prefix))
                .expect("conventional prefix pattern is valid"),
            breaking: Regex::new(&format!(r"(?i)^{}(?:\(.+?\))?!: ", prefix))
                .expect("breaking prefix pattern is valid"),
        })
        .collect()
});

fn tokens_are_disjoint(prefixes: &[CommitPrefix]) -> bool {
    prefixes.iter().all(|a| {
        prefixes
            .iter()
            .filter(|b| a != *b)
            .all(|b| !b.as_str().starts_with(a.as_str()))
    })
}

/// Result of classifying one commit message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommit {
    pub prefix: CommitPrefix,
    pub scope: Option<String>,
    pub is_breaking_change: bool,
}

impl ParsedCommit {
    /// Classify a commit message by its conventional prefix.
    ///
    /// Supported first lines (kind matched case-insensitively):
    /// - `Merge branch ...` (always accepted as `nop`)
    /// - `type(scope)!: description`
    /// - `type(scope): description`
    /// - `type!: description`
    /// - `type: description`
    ///
    /// Anything else yields [`SemtagError::NotRecognized`].
    pub fn parse(message: &str) -> Result<Self> {
        let first_line = message.lines().next().unwrap_or_default();

        if first_line.starts_with(MERGE_PREFIX) {
            return Ok(ParsedCommit {
                prefix: CommitPrefix::Nop,
                scope: None,
                is_breaking_change: false,
            });
        }

        let (matcher, captures) = MATCHERS
            .iter()
            .find_map(|m| m.conventional.captures(first_line).map(|c| (m, c)))
            .ok_or_else(|| SemtagError::NotRecognized(message.to_string()))?;

        let is_breaking_change =
            message.contains(BREAKING_CHANGE) || matcher.breaking.is_match(first_line);

        Ok(ParsedCommit {
            prefix: matcher.prefix,
            scope: captures.name("scope").map(|m| m.as_str().to_string()),
            is_breaking_change,
        })
    }
}

/// Shorthand for [`ParsedCommit::parse`]
pub fn classify(message: &str) -> Result<ParsedCommit> {
    ParsedCommit::parse(message)
}

/// True when the message classifies to any kind, merge commits included
pub fn is_valid_commit_message(message: &str) -> bool {
    classify(message).is_ok()
}
