use thiserror::Error;

/// Unified error type for semtag operations
#[derive(Error, Debug)]
pub enum SemtagError {
    #[error("Invalid commit message: {0:?}")]
    NotRecognized(String),

    #[error("Commit message does not conform to conventions: {0:?}")]
    NonConforming(String),

    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid configuration file: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Version parsing error: {0}")]
    Version(String),

    #[error("Tag error: {0}")]
    Tag(String),

    #[error("Branch error: {0}")]
    Branch(String),

    #[error("Remote operation failed: {0}")]
    Remote(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in semtag
pub type Result<T> = std::result::Result<T, SemtagError>;

impl SemtagError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        SemtagError::Config(msg.into())
    }

    /// Create a version error with context
    pub fn version(msg: impl Into<String>) -> Self {
        SemtagError::Version(msg.into())
    }

    /// Create a tag error with context
    pub fn tag(msg: impl Into<String>) -> Self {
        SemtagError::Tag(msg.into())
    }

    /// Create a branch error with context
    pub fn branch(msg: impl Into<String>) -> Self {
        SemtagError::Branch(msg.into())
    }

    /// Create a remote error with context
    pub fn remote(msg: impl Into<String>) -> Self {
        SemtagError::Remote(msg.into())
    }

    /// True for the one error the bump aggregation is allowed to skip over
    pub fn is_not_recognized(&self) -> bool {
        matches!(self, SemtagError::NotRecognized(_))
    }
}
