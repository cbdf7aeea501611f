use crate::domain::version::Version;
use serde::{Deserialize, Serialize};

/// How a computed version is written out as a tag name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TagFormat {
    /// Keep whatever prefix the version carries (`v1.2.3` stays `v1.2.3`)
    #[default]
    Preserve,
    /// Numbers only (`1.2.3`)
    Bare,
}

impl TagFormat {
    pub fn from_no_prefix(no_prefix: bool) -> Self {
        if no_prefix {
            TagFormat::Bare
        } else {
            TagFormat::Preserve
        }
    }

    /// Tag name for a version
    pub fn format(&self, version: &Version) -> String {
        match self {
            TagFormat::Preserve => version.to_string(),
            TagFormat::Bare => version.bare(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preserve_keeps_prefix() {
        let v = Version::parse("v1.2.3").unwrap();
        assert_eq!(TagFormat::Preserve.format(&v), "v1.2.3");
        let bare = Version::parse("1.2.3").unwrap();
        assert_eq!(TagFormat::Preserve.format(&bare), "1.2.3");
    }

    #[test]
    fn test_bare_strips_prefix() {
        let v = Version::parse("v1.2.3").unwrap();
        assert_eq!(TagFormat::Bare.format(&v), "1.2.3");
        assert_eq!(TagFormat::Bare.format(&Version::initial()), "0.0.1");
    }

    #[test]
    fn test_from_no_prefix() {
        assert_eq!(TagFormat::from_no_prefix(true), TagFormat::Bare);
        assert_eq!(TagFormat::from_no_prefix(false), TagFormat::Preserve);
    }
}
