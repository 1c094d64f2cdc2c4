use thiserror::Error;

/// Errors produced while loading limits, resolving patterns, or reading files.
#[derive(Error, Debug)]
pub enum Error {
    /// A pattern or override key that cannot be turned into a matcher.
    #[error("invalid pattern {pattern:?}: {reason}")]
    InvalidPattern { pattern: String, reason: String },

    /// A limits file that parsed but failed the required-field check.
    #[error("invalid limits configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Build an `InvalidPattern` error, truncating the pattern for display.
    pub(crate) fn invalid_pattern(pattern: &str, reason: impl Into<String>) -> Self {
        Error::InvalidPattern {
            pattern: pattern.chars().take(60).collect(),
            reason: reason.into(),
        }
    }

    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::InvalidPattern { .. } | Error::InvalidConfig(_) => 2,
            Error::Io(_) | Error::Json(_) => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
