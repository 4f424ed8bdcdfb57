use thiserror::Error;

/// Unified error type for changelog operations
#[derive(Error, Debug)]
pub enum ChangelogError {
    /// The string does not match the semantic-version grammar.
    #[error("not a valid version: {0}")]
    NotSemver(String),

    #[error("multiple releases for {0}")]
    DuplicateRelease(String),

    #[error("malformed trailer line for {version}: {reason}")]
    MalformedTrailer { version: String, reason: String },

    #[error("package name must not be empty")]
    EmptyPackage,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in changelog
pub type Result<T> = std::result::Result<T, ChangelogError>;

impl ChangelogError {
    /// Create a "not a valid version" error for the given input
    pub fn not_semver(s: impl Into<String>) -> Self {
        ChangelogError::NotSemver(s.into())
    }

    /// Create a duplicate-release error naming the version string
    pub fn duplicate(version: impl Into<String>) -> Self {
        ChangelogError::DuplicateRelease(version.into())
    }

    /// Create a malformed-trailer error naming the offending version
    pub fn trailer(version: impl Into<String>, reason: impl Into<String>) -> Self {
        ChangelogError::MalformedTrailer {
            version: version.into(),
            reason: reason.into(),
        }
    }

    /// True if this error is the "not a valid version" sentinel
    pub fn is_not_semver(&self) -> bool {
        matches!(self, ChangelogError::NotSemver(_))
    }
}
