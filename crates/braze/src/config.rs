//! Configuration for the Braze API client.

use std::time::Duration;

/// Default REST endpoint, the US-05 cluster. Braze keys are bound to a
/// cluster, so most deployments override this.
pub const DEFAULT_BASE_URL: &str = "https://rest.iad-05.braze.com";

/// Default `User-Agent` header value.
pub const DEFAULT_USER_AGENT: &str = "braze-rs";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Configuration for connecting to the Braze REST API.
///
/// All settings are fixed at client construction; there is no way to change
/// them on a live [`BrazeClient`](crate::BrazeClient).
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Cluster base URL, e.g. `https://rest.iad-01.braze.com`.
    pub base_url: String,
    /// REST API key, sent as a bearer token on every request.
    pub api_key: String,
    /// `User-Agent` header value. Ignored when `http` is supplied.
    pub user_agent: String,
    /// Per-request timeout. Ignored when `http` is supplied.
    pub timeout: Duration,
    /// Pre-built transport to use instead of constructing one. Timeout and
    /// user agent are expected to already be configured on it.
    pub http: Option<reqwest::Client>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: String::new(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: DEFAULT_TIMEOUT,
            http: None,
        }
    }
}

impl ClientConfig {
    /// Create a configuration with the given API key and all defaults.
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Default::default()
        }
    }

    /// Set the cluster base URL.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the `User-Agent` header value.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set the per-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Supply a pre-built [`reqwest::Client`] as the transport.
    pub fn http_client(mut self, http: reqwest::Client) -> Self {
        self.http = Some(http);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.user_agent, DEFAULT_USER_AGENT);
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert!(config.api_key.is_empty());
        assert!(config.http.is_none());
    }

    #[test]
    fn setters_chain() {
        let config = ClientConfig::with_api_key("key-123")
            .base_url("https://rest.iad-01.braze.com")
            .user_agent("acme-sync")
            .timeout(Duration::from_secs(30));
        assert_eq!(config.api_key, "key-123");
        assert_eq!(config.base_url, "https://rest.iad-01.braze.com");
        assert_eq!(config.user_agent, "acme-sync");
        assert_eq!(config.timeout, Duration::from_secs(30));
    }
}
