//! Client configuration.
//!
//! All settings live in a single `config.toml` file at
//! `~/.config/eventfinder/config.toml` by default. Every section is optional.
//!
//! API keys (`[reasoning] api_key`, `[ticketmaster] api_key`) support secret
//! references:
//! - `pass::path/in/store`: resolved via `pass show`
//! - `env::VAR_NAME`: resolved from the environment
//! - plain text: used as-is

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;

use eventfinder_router::{FusionConfig, ReasoningConfig, RuleSet};

// ---------------------------------------------------------------------------
// ClientConfig (config.toml)
// ---------------------------------------------------------------------------

/// Configuration for the eventfinder client.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Debug mode.
    pub debug: bool,

    /// Routing rules.
    pub router: RouterSettings,

    /// Reasoning service settings.
    pub reasoning: ReasoningSettings,

    /// Ticketmaster settings.
    pub ticketmaster: TicketmasterSettings,

    /// Fusion settings.
    pub fusion: FusionSettings,
}

/// Routing rule settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RouterSettings {
    /// Fail instead of falling back when the reasoning service is unusable.
    pub strict: bool,

    /// Provider for large, ticketed events.
    pub major_venue_provider: String,

    /// Provider for community events.
    pub community_provider: String,

    /// Event types routed to the major venue provider only.
    pub large_event_types: Vec<String>,

    /// Categories routed to the major venue provider only.
    pub large_event_categories: Vec<String>,
}

impl Default for RouterSettings {
    fn default() -> Self {
        let rules = RuleSet::default();
        Self {
            strict: false,
            major_venue_provider: rules.major_venue_provider,
            community_provider: rules.community_provider,
            large_event_types: rules.large_event_types,
            large_event_categories: rules.large_event_categories,
        }
    }
}

impl RouterSettings {
    /// Converts to the router rule set.
    pub fn to_rule_set(&self) -> RuleSet {
        RuleSet::default()
            .with_providers(&self.major_venue_provider, &self.community_provider)
            .with_large_event_types(self.large_event_types.iter().cloned())
            .with_large_event_categories(self.large_event_categories.iter().cloned())
    }
}

/// Reasoning service settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReasoningSettings {
    /// Whether to ask the reasoning service at all.
    pub enabled: bool,

    /// API key (supports `pass::` and `env::` prefixes).
    pub api_key: Option<String>,

    /// Model name.
    pub model: String,

    /// API base URL.
    pub base_url: String,

    /// Request timeout in seconds.
    pub timeout: u64,
}

impl Default for ReasoningSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            api_key: Some("env::OPENAI_API_KEY".to_string()),
            model: ReasoningConfig::DEFAULT_MODEL.to_string(),
            base_url: ReasoningConfig::DEFAULT_BASE_URL.to_string(),
            timeout: ReasoningConfig::DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ReasoningSettings {
    /// Converts to a reasoning service configuration.
    ///
    /// Returns `Ok(None)` when the service is disabled or no key can be
    /// resolved; routing then relies on rules (or fails in strict mode).
    pub fn to_reasoning_config(
        &self,
        model_override: Option<&str>,
    ) -> Result<Option<ReasoningConfig>, String> {
        if !self.enabled {
            return Ok(None);
        }

        let api_key = match crate::secret::resolve_key(self.api_key.as_deref()) {
            Ok(Some(key)) => key,
            Ok(None) => return Ok(None),
            Err(e) => {
                warn!(error = %e, "reasoning API key could not be resolved");
                return Ok(None);
            }
        };

        let model = model_override
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .unwrap_or(self.model.as_str());

        let config = ReasoningConfig::new(api_key)
            .with_model(model)
            .with_base_url(&self.base_url)
            .with_timeout(Duration::from_secs(self.timeout));
        config.validate()?;

        Ok(Some(config))
    }
}

/// Ticketmaster settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TicketmasterSettings {
    /// Register the Ticketmaster provider.
    pub enabled: bool,

    /// Discovery API key (supports `pass::` and `env::` prefixes).
    pub api_key: Option<String>,

    /// API base URL.
    pub base_url: String,

    /// Events per request (1..=50).
    pub page_size: usize,

    /// Request timeout in seconds.
    pub timeout: u64,
}

impl Default for TicketmasterSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            api_key: Some("env::TICKETMASTER_API_KEY".to_string()),
            base_url: "https://app.ticketmaster.com/discovery/v2".to_string(),
            page_size: 50,
            timeout: 15,
        }
    }
}

#[cfg(feature = "ticketmaster")]
impl TicketmasterSettings {
    /// Converts to provider configuration.
    ///
    /// An unresolvable key leaves the provider unconfigured: it stays
    /// registered and reports the missing key in every fetch.
    pub fn to_provider_config(
        &self,
    ) -> Result<eventfinder_providers::ticketmaster::TicketmasterConfig, String> {
        use eventfinder_providers::ticketmaster::TicketmasterConfig;

        let mut config = TicketmasterConfig::unconfigured()
            .with_base_url(&self.base_url)
            .with_page_size(self.page_size)
            .with_timeout(Duration::from_secs(self.timeout));

        match crate::secret::resolve_key(self.api_key.as_deref()) {
            Ok(key) => config.api_key = key,
            Err(e) => warn!(error = %e, "Ticketmaster API key could not be resolved"),
        }

        config.validate()?;
        Ok(config)
    }
}

/// Fusion settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FusionSettings {
    /// Per-provider timeout in seconds; 0 disables it.
    pub provider_timeout: u64,
}

impl Default for FusionSettings {
    fn default() -> Self {
        Self {
            provider_timeout: 30,
        }
    }
}

impl FusionSettings {
    /// Converts to the orchestrator configuration.
    pub fn to_fusion_config(&self) -> FusionConfig {
        let timeout = (self.provider_timeout > 0).then(|| Duration::from_secs(self.provider_timeout));
        FusionConfig::default().with_provider_timeout(timeout)
    }
}

impl ClientConfig {
    /// Loads configuration from the default path.
    pub fn load() -> Result<Self, String> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Loads configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self, String> {
        let content =
            std::fs::read_to_string(path).map_err(|e| format!("failed to read config: {}", e))?;
        toml::from_str(&content).map_err(|e| format!("failed to parse config: {}", e))
    }

    /// Returns the default configuration file path.
    pub fn default_path() -> PathBuf {
        Self::default_config_dir().join("config.toml")
    }

    /// Returns the default configuration directory.
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("eventfinder")
    }

    /// Checks values that do not depend on secrets.
    pub fn validate(&self) -> Result<(), String> {
        if self.router.major_venue_provider.trim().is_empty() {
            return Err("router.major_venue_provider must not be empty".to_string());
        }
        if self.router.major_venue_provider == self.router.community_provider {
            return Err(
                "router.major_venue_provider and router.community_provider must differ"
                    .to_string(),
            );
        }

        if self.reasoning.enabled {
            ReasoningConfig::new("placeholder")
                .with_model(&self.reasoning.model)
                .with_base_url(&self.reasoning.base_url)
                .with_timeout(Duration::from_secs(self.reasoning.timeout))
                .validate()
                .map_err(|e| format!("reasoning: {}", e))?;
        }

        #[cfg(feature = "ticketmaster")]
        if self.ticketmaster.enabled {
            use eventfinder_providers::ticketmaster::TicketmasterConfig;

            TicketmasterConfig::unconfigured()
                .with_base_url(&self.ticketmaster.base_url)
                .with_page_size(self.ticketmaster.page_size)
                .with_timeout(Duration::from_secs(self.ticketmaster.timeout))
                .validate()
                .map_err(|e| format!("ticketmaster: {}", e))?;
        }

        Ok(())
    }
}
