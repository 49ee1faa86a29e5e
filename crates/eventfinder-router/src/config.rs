//! Router and fusion configuration.
//!
//! These types arrive already resolved: secrets have been looked up and files
//! parsed by the caller.

use std::time::Duration;

/// Rule set used by the rule-based decider.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleSet {
    /// Provider for large, ticketed events.
    pub major_venue_provider: String,

    /// Provider for informal, community events.
    pub community_provider: String,

    /// Event types that route to the major venue provider only.
    pub large_event_types: Vec<String>,

    /// Categories that route to the major venue provider only.
    pub large_event_categories: Vec<String>,
}

impl Default for RuleSet {
    fn default() -> Self {
        Self {
            major_venue_provider: "ticketmaster".to_string(),
            community_provider: "eventbrite".to_string(),
            large_event_types: vec![
                "sports".to_string(),
                "concert".to_string(),
                "theater".to_string(),
            ],
            large_event_categories: vec!["music".to_string()],
        }
    }
}

impl RuleSet {
    /// Builder: set the provider identifiers.
    pub fn with_providers(
        mut self,
        major_venue: impl Into<String>,
        community: impl Into<String>,
    ) -> Self {
        self.major_venue_provider = major_venue.into();
        self.community_provider = community.into();
        self
    }

    /// Builder: set the large event types.
    pub fn with_large_event_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.large_event_types = types.into_iter().map(Into::into).collect();
        self
    }

    /// Builder: set the large event categories.
    pub fn with_large_event_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.large_event_categories = categories.into_iter().map(Into::into).collect();
        self
    }

    /// Returns true if the hints name a large, organized event class.
    pub fn is_large_event(&self, event_type: Option<&str>, category: Option<&str>) -> bool {
        let matches = |value: Option<&str>, set: &[String]| {
            value.is_some_and(|v| {
                let v = v.trim();
                set.iter().any(|s| s.eq_ignore_ascii_case(v))
            })
        };
        matches(event_type, &self.large_event_types)
            || matches(category, &self.large_event_categories)
    }
}

/// Reasoning service (OpenAI Responses API) configuration.
#[derive(Clone)]
pub struct ReasoningConfig {
    /// API key, already resolved.
    pub api_key: String,

    /// Model name.
    pub model: String,

    /// API base URL, without the trailing `/responses`.
    pub base_url: String,

    /// Request timeout.
    pub timeout: Duration,
}

impl ReasoningConfig {
    /// Default model.
    pub const DEFAULT_MODEL: &'static str = "gpt-4.1-mini";

    /// Default API base URL.
    pub const DEFAULT_BASE_URL: &'static str = "https://api.openai.com/v1";

    /// Default timeout in seconds.
    pub const DEFAULT_TIMEOUT_SECS: u64 = 20;

    /// Creates a configuration with the given API key and defaults.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: Self::DEFAULT_MODEL.to_string(),
            base_url: Self::DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(Self::DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Builder: set the model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Builder: set the base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Builder: set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the full Responses endpoint URL.
    pub fn responses_url(&self) -> String {
        format!("{}/responses", self.base_url.trim_end_matches('/'))
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.api_key.trim().is_empty() {
            return Err("api_key must not be empty".to_string());
        }
        if self.model.trim().is_empty() {
            return Err("model must not be empty".to_string());
        }

        let parsed = url::Url::parse(&self.base_url)
            .map_err(|e| format!("invalid base_url '{}': {}", self.base_url, e))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(format!(
                "base_url must use http or https, got '{}'",
                parsed.scheme()
            ));
        }

        if self.timeout.is_zero() {
            return Err("timeout must be greater than zero".to_string());
        }

        Ok(())
    }
}

impl std::fmt::Debug for ReasoningConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReasoningConfig")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Fusion orchestrator configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct FusionConfig {
    /// Upper bound on a single provider call. `None` waits indefinitely.
    pub provider_timeout: Option<Duration>,
}

impl Default for FusionConfig {
    fn default() -> Self {
        Self {
            provider_timeout: Some(Duration::from_secs(30)),
        }
    }
}

impl FusionConfig {
    /// Builder: set the per-provider timeout.
    pub fn with_provider_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.provider_timeout = timeout;
        self
    }
}
