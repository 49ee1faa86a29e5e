//! Provider registry.
//!
//! The registry maps provider identifiers to adapters. It is built once at
//! startup and handed, read-only, to the routing decider and the fusion
//! orchestrator. Iteration order is the sorted identifier order.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::debug;

use crate::error::{ProviderError, ProviderResult};
use crate::provider::EventProvider;

/// Identifier → adapter mapping.
#[derive(Clone, Default)]
pub struct ProviderRegistry {
    providers: BTreeMap<String, Arc<dyn EventProvider>>,
}

impl ProviderRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a provider under its own name.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the name is empty or already taken.
    pub fn register(&mut self, provider: Arc<dyn EventProvider>) -> ProviderResult<()> {
        let name = provider.name().to_string();
        if name.trim().is_empty() {
            return Err(ProviderError::configuration("provider name must not be empty"));
        }
        if self.providers.contains_key(&name) {
            return Err(ProviderError::configuration(format!(
                "provider '{}' is already registered",
                name
            )));
        }

        debug!(provider = %name, "registered provider");
        self.providers.insert(name, provider);
        Ok(())
    }

    /// Builder form of [`register`](Self::register).
    pub fn with_provider(mut self, provider: Arc<dyn EventProvider>) -> ProviderResult<Self> {
        self.register(provider)?;
        Ok(self)
    }

    /// Looks up a provider by identifier.
    pub fn get(&self, name: &str) -> Option<&Arc<dyn EventProvider>> {
        self.providers.get(name)
    }

    /// Returns true if `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.providers.contains_key(name)
    }

    /// Returns the registered identifiers, sorted.
    pub fn names(&self) -> Vec<String> {
        self.providers.keys().cloned().collect()
    }

    /// Iterates over `(identifier, provider)` pairs in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Arc<dyn EventProvider>)> {
        self.providers.iter().map(|(name, p)| (name.as_str(), p))
    }

    /// Returns the number of registered providers.
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    /// Returns true if no provider is registered.
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Keeps the registered identifiers of `names`, in order, without duplicates.
    pub fn retain_known<I, S>(&self, names: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut known: Vec<String> = Vec::new();
        for name in names {
            let name = name.as_ref();
            if self.contains(name) && !known.iter().any(|k| k == name) {
                known.push(name.to_string());
            }
        }
        known
    }
}

impl std::fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderRegistry")
            .field("providers", &self.names())
            .finish()
    }
}
