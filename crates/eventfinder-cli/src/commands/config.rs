//! Configuration commands.

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};

/// Dump the current configuration to stdout.
pub fn dump(config: &ClientConfig) -> ClientResult<()> {
    let toml_str = toml::to_string_pretty(config)
        .map_err(|e| ClientError::Config(format!("failed to serialize config: {}", e)))?;
    println!("# config.toml ({})", ClientConfig::default_path().display());
    println!("{}", toml_str);

    Ok(())
}

/// Validate the configuration, including secret references.
pub fn validate(config: &ClientConfig) -> ClientResult<()> {
    config.validate().map_err(ClientError::Config)?;

    if config.reasoning.enabled {
        match crate::secret::resolve_key(config.reasoning.api_key.as_deref()) {
            Ok(Some(_)) => println!("Reasoning service key resolved."),
            Ok(None) => println!("Reasoning service key not set; routing will use rules."),
            Err(e) => {
                return Err(ClientError::Config(format!(
                    "invalid reasoning api_key: {}",
                    e
                )));
            }
        }
    }

    if config.ticketmaster.enabled {
        match crate::secret::resolve_key(config.ticketmaster.api_key.as_deref()) {
            Ok(Some(_)) => println!("Ticketmaster key resolved."),
            Ok(None) => println!("Ticketmaster key not set; searches will report an error."),
            Err(e) => {
                return Err(ClientError::Config(format!(
                    "invalid ticketmaster api_key: {}",
                    e
                )));
            }
        }
    }

    println!("Configuration is valid.");
    Ok(())
}

/// Show the configuration file path.
pub fn path() -> ClientResult<()> {
    let config_path = ClientConfig::default_path();
    println!("config: {}", config_path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_rejects_unresolvable_key() {
        let mut config = ClientConfig::default();
        config.reasoning.api_key = Some("env::EVENTFINDER_TEST_SURELY_UNSET_VAR".to_string());

        let err = validate(&config).unwrap_err();
        assert!(err.to_string().contains("invalid reasoning api_key"));
    }

    #[test]
    fn validate_accepts_missing_keys() {
        let mut config = ClientConfig::default();
        config.reasoning.api_key = None;
        config.ticketmaster.api_key = None;
        assert!(validate(&config).is_ok());
    }
}
