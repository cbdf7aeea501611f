use std::fmt;

/// Non-fatal conditions worth reporting to the user while tagging or validating.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryWarning {
    /// Repository has no semver tag yet, so the initial version is used
    NoPriorTag { initial_tag: String },
    /// Commits since the latest tag that match no known prefix
    UnrecognizedCommits { count: usize, latest_tag: String },
    /// Validation was skipped because the repository opted out
    ValidationDisabled { config_key: String },
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::NoPriorTag { initial_tag } => {
                write!(f, "No semver tag found, starting at '{}'", initial_tag)
            }
            BoundaryWarning::UnrecognizedCommits { count, latest_tag } => {
                let noun = if *count == 1 { "commit" } else { "commits" };
                write!(
                    f,
                    "{} {} since '{}' did not follow the convention and were ignored",
                    count, noun, latest_tag
                )
            }
            BoundaryWarning::ValidationDisabled { config_key } => {
                write!(f, "Validation skipped: '{}' is set", config_key)
            }
        }
    }
}
