//! Ticketmaster provider configuration.

use std::time::Duration;

/// Configuration for the Ticketmaster Discovery API adapter.
#[derive(Clone)]
pub struct TicketmasterConfig {
    /// Discovery API key. Without one, every fetch reports an error.
    pub api_key: Option<String>,

    /// API base URL, without the trailing `/events.json`.
    pub base_url: String,

    /// Number of events requested per call (one page only, 1..=50).
    pub page_size: usize,

    /// Request timeout.
    pub timeout: Duration,

    /// User agent string for API requests.
    pub user_agent: String,
}

impl TicketmasterConfig {
    /// Default Discovery v2 endpoint.
    pub const DEFAULT_BASE_URL: &'static str = "https://app.ticketmaster.com/discovery/v2";

    /// Largest page the adapter will request.
    pub const MAX_PAGE_SIZE: usize = 50;

    /// Default timeout in seconds.
    pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

    /// Creates a configuration with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            ..Self::unconfigured()
        }
    }

    /// Creates a configuration without an API key.
    pub fn unconfigured() -> Self {
        Self {
            api_key: None,
            base_url: Self::DEFAULT_BASE_URL.to_string(),
            page_size: Self::MAX_PAGE_SIZE,
            timeout: Duration::from_secs(Self::DEFAULT_TIMEOUT_SECS),
            user_agent: format!("eventfinder/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Sets the page size.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns true if an API key is present.
    pub fn has_api_key(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.trim().is_empty())
    }

    /// Returns the full events endpoint URL.
    pub fn events_url(&self) -> String {
        format!("{}/events.json", self.base_url.trim_end_matches('/'))
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        let parsed = url::Url::parse(&self.base_url)
            .map_err(|e| format!("invalid base_url '{}': {}", self.base_url, e))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(format!(
                "base_url must use http or https, got '{}'",
                parsed.scheme()
            ));
        }

        if self.page_size == 0 || self.page_size > Self::MAX_PAGE_SIZE {
            return Err(format!(
                "page_size must be between 1 and {}",
                Self::MAX_PAGE_SIZE
            ));
        }

        if self.timeout.is_zero() {
            return Err("timeout must be greater than zero".to_string());
        }

        Ok(())
    }
}

impl std::fmt::Debug for TicketmasterConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TicketmasterConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("page_size", &self.page_size)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = TicketmasterConfig::new("key");
        assert!(config.has_api_key());
        assert_eq!(config.page_size, 50);
        assert_eq!(
            config.events_url(),
            "https://app.ticketmaster.com/discovery/v2/events.json"
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn blank_key_counts_as_missing() {
        let mut config = TicketmasterConfig::unconfigured();
        assert!(!config.has_api_key());
        config.api_key = Some("  ".to_string());
        assert!(!config.has_api_key());
    }

    #[test]
    fn trailing_slash_is_trimmed() {
        let config = TicketmasterConfig::new("key").with_base_url("http://localhost:9000/tm/");
        assert_eq!(config.events_url(), "http://localhost:9000/tm/events.json");
    }

    #[test]
    fn validation_rejects_bad_values() {
        assert!(
            TicketmasterConfig::new("k")
                .with_base_url("not a url")
                .validate()
                .is_err()
        );
        assert!(
            TicketmasterConfig::new("k")
                .with_base_url("ftp://example.com")
                .validate()
                .is_err()
        );
        assert!(TicketmasterConfig::new("k").with_page_size(0).validate().is_err());
        assert!(TicketmasterConfig::new("k").with_page_size(51).validate().is_err());
        assert!(
            TicketmasterConfig::new("k")
                .with_timeout(Duration::ZERO)
                .validate()
                .is_err()
        );
    }

    #[test]
    fn debug_redacts_key() {
        let debug = format!("{:?}", TicketmasterConfig::new("super-secret"));
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("<redacted>"));
    }
}
