//! Configuration for the code host connection.
use secrecy::SecretString;

/// Maximum attempts for a read-only query before giving up.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;
/// Base delay for exponential backoff between retried queries.
pub const RETRY_BASE_DELAY_MS: u64 = 500;

/// Remote code host connection configuration for authenticating and
/// querying the GitHub API.
#[derive(Debug, Clone)]
pub struct RemoteConfig {
    /// Remote host (e.g., "github.com").
    pub host: String,
    /// URL scheme (http or https).
    pub scheme: String,
    /// Access token for authentication.
    pub token: SecretString,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            host: "github.com".to_string(),
            scheme: "https".to_string(),
            token: SecretString::from("".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_remote_config() {
        let remote = RemoteConfig::default();
        assert_eq!(remote.host, "github.com");
        assert_eq!(remote.scheme, "https");
    }
}
