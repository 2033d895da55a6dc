//! Custom error types for release-herald with improved type safety and error handling.

use thiserror::Error;

/// Main error type for release-herald operations.
#[derive(Error, Debug)]
pub enum HeraldError {
    // Cli args errors
    #[error("Invalid arguments: {0}")]
    InvalidArgs(String),

    // Configuration errors
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // Code host errors
    #[error(
        "cannot compare {previous}...{target} in {repo}: reference not found"
    )]
    ReferenceNotFound {
        repo: String,
        previous: String,
        target: String,
    },

    #[error("Remote resource not found: {0}")]
    NotFound(String),

    #[error("Code host operation failed: {0}")]
    ForgeError(String),

    // Issue tracker errors
    #[error("Issue tracker operation failed: {0}")]
    TrackerError(String),

    #[error("Precondition failed for issue {issue}: {reason}")]
    PreconditionFailed { issue: String, reason: String },

    // Network/API errors
    #[error("Network request failed: {0}")]
    NetworkError(String),

    #[error("API authentication failed: {0}")]
    AuthenticationError(String),

    #[error("API rate limit exceeded")]
    RateLimitExceeded,

    // Parsing errors - automatic conversions via #[from]
    #[error("JSON parse error: {0}")]
    JsonParseError(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParseError(#[from] toml::de::Error),

    #[error("URL parse error: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("Template rendering failed: {0}")]
    TemplateError(#[from] tera::Error),

    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] log::SetLoggerError),

    // Generic wrapper for other errors
    #[error(transparent)]
    Other(#[from] color_eyre::Report),
}

impl HeraldError {
    /// Create a code host error with context
    pub fn forge(msg: impl Into<String>) -> Self {
        Self::ForgeError(msg.into())
    }

    /// Create an issue tracker error with context
    pub fn tracker(msg: impl Into<String>) -> Self {
        Self::TrackerError(msg.into())
    }

    /// Create an invalid config error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Create a precondition failure for an issue transition
    pub fn precondition(
        issue: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::PreconditionFailed {
            issue: issue.into(),
            reason: reason.into(),
        }
    }

    /// Whether a read-only query hitting this error may be retried with
    /// backoff. The terminal issue-tracker write is never retried.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::NetworkError(_) | Self::RateLimitExceeded)
    }
}

// Implement From for std::io::Error - wraps in Other variant for generic I/O errors
impl From<std::io::Error> for HeraldError {
    fn from(err: std::io::Error) -> Self {
        Self::Other(color_eyre::Report::from(err))
    }
}

// Implement From for reqwest errors (network/API)
impl From<reqwest::Error> for HeraldError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() || err.is_connect() {
            Self::NetworkError(err.to_string())
        } else if err.is_status() {
            if let Some(status) = err.status() {
                if status.as_u16() == 401 || status.as_u16() == 403 {
                    Self::AuthenticationError(err.to_string())
                } else if status.as_u16() == 404 {
                    Self::NotFound(err.to_string())
                } else if status.as_u16() == 429 {
                    Self::RateLimitExceeded
                } else {
                    Self::TrackerError(err.to_string())
                }
            } else {
                Self::NetworkError(err.to_string())
            }
        } else {
            Self::NetworkError(err.to_string())
        }
    }
}

// Implement From for reqwest header errors (needs custom message)
impl From<reqwest::header::InvalidHeaderValue> for HeraldError {
    fn from(err: reqwest::header::InvalidHeaderValue) -> Self {
        Self::AuthenticationError(format!("Invalid header value: {}", err))
    }
}

// Implement From for octocrab errors (GitHub API)
impl From<octocrab::Error> for HeraldError {
    fn from(err: octocrab::Error) -> Self {
        match &err {
            octocrab::Error::GitHub { source, .. } => {
                if source.status_code == reqwest::StatusCode::NOT_FOUND {
                    Self::NotFound(source.message.clone())
                } else if source.status_code
                    == reqwest::StatusCode::UNAUTHORIZED
                    || source.status_code == reqwest::StatusCode::FORBIDDEN
                {
                    Self::AuthenticationError(source.message.clone())
                } else if source.message.contains("rate limit") {
                    Self::RateLimitExceeded
                } else {
                    Self::ForgeError(format!("GitHub API error: {}", err))
                }
            }
            _ => Self::ForgeError(format!("GitHub API error: {}", err)),
        }
    }
}
