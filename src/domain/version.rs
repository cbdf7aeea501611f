use crate::domain::bump::VersionBump;
use crate::error::{Result, SemtagError};
use std::cmp::Ordering;
use std::fmt;

/// Semantic version as read from (or written to) a tag.
///
/// The numeric part lives in a [`semver::Version`]; the literal prefix of the
/// tag it came from (`v`, `V` or nothing) is kept so the tag can be rebuilt
/// as written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Version {
    pub prefix: String,
    pub semver: semver::Version,
}

impl Version {
    /// Create a new version with no prefix
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Version {
            prefix: String::new(),
            semver: semver::Version::new(major, minor, patch),
        }
    }

    /// Version used when the repository has no semver tag yet
    pub fn initial() -> Self {
        Version::new(0, 0, 1).with_prefix("v")
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn major(&self) -> u64 {
        self.semver.major
    }

    pub fn minor(&self) -> u64 {
        self.semver.minor
    }

    pub fn patch(&self) -> u64 {
        self.semver.patch
    }

    /// Parse version from a tag string (e.g., "v1.2.3" -> 1.2.3 with prefix "v").
    ///
    /// Pre-release and build suffixes are accepted and preserved. Short tags
    /// such as `v1.2` or `v1` read as `1.2.0` and `1.0.0`.
    pub fn parse(tag: &str) -> Result<Self> {
        let (prefix, rest) = match tag.strip_prefix(['v', 'V']) {
            Some(rest) => (&tag[..1], rest),
            None => ("", tag),
        };

        let semver = semver::Version::parse(&pad_core(rest)).map_err(|e| {
            SemtagError::version(format!("Invalid version format: '{}' - {}", tag, e))
        })?;

        Ok(Version {
            prefix: prefix.to_string(),
            semver,
        })
    }

    /// Apply exactly one increment. `VersionBump::None` leaves the version as is.
    pub fn bump(&self, bump_type: VersionBump) -> Self {
        let current = &self.semver;
        let semver = match bump_type {
            VersionBump::Major => semver::Version::new(current.major + 1, 0, 0),
            VersionBump::Minor => semver::Version::new(current.major, current.minor + 1, 0),
            // A patch on a pre-release is the release itself
            VersionBump::Patch if !current.pre.is_empty() => {
                semver::Version::new(current.major, current.minor, current.patch)
            }
            VersionBump::Patch => {
                semver::Version::new(current.major, current.minor, current.patch + 1)
            }
            VersionBump::None => return self.clone(),
        };

        Version {
            prefix: self.prefix.clone(),
            semver,
        }
    }

    /// The version without any prefix (e.g., "1.2.3")
    pub fn bare(&self) -> String {
        self.semver.to_string()
    }
}

/// Fill in missing minor and patch numbers, leaving any suffix untouched.
fn pad_core(version: &str) -> String {
    let end = version.find(['-', '+']).unwrap_or(version.len());
    let (core, suffix) = version.split_at(end);
    let missing = match core.split('.').count() {
        1 => ".0.0",
        2 => ".0",
        _ => "",
    };
    format!("{}{}{}", core, missing, suffix)
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        self.semver
            .cmp(&other.semver)
            .then_with(|| self.prefix.cmp(&other.prefix))
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.prefix, self.semver)
    }
}
