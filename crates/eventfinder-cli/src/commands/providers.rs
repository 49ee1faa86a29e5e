//! Provider listing.

use std::fmt::Write as _;

use eventfinder_providers::ProviderRegistry;

use crate::config::ClientConfig;
use crate::error::ClientResult;

/// Prints every registered provider with its guidance and routing role.
pub fn list(registry: &ProviderRegistry, config: &ClientConfig) -> ClientResult<()> {
    print!("{}", render(registry, config));
    Ok(())
}

/// Renders the provider listing.
pub fn render(registry: &ProviderRegistry, config: &ClientConfig) -> String {
    let mut out = String::new();
    if registry.is_empty() {
        out.push_str("No providers registered.\n");
        return out;
    }

    for (name, provider) in registry.iter() {
        let role = if name == config.router.major_venue_provider {
            " (major venues)"
        } else if name == config.router.community_provider {
            " (community)"
        } else {
            ""
        };
        let _ = writeln!(out, "{}{}", name, role);
        let _ = writeln!(out, "    {}", provider.guidance());
    }
    out
}
