//! Configuration loading from disk and the process environment.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::GatewayConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable holding the expected `X-Internal-Auth` value.
pub const AUTH_TOKEN_ENV: &str = "INTERNAL_AUTH_TOKEN";

/// Environment variable overriding `listener.bind_address`.
pub const BIND_ADDRESS_ENV: &str = "COOLAPK_GATEWAY_BIND";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parse a TOML document into a configuration without validating it.
pub fn parse_config(content: &str) -> Result<GatewayConfig, ConfigError> {
    Ok(toml::from_str(content)?)
}

/// Overlay environment values onto `config`.
///
/// `lookup` abstracts the environment so callers (and tests) decide where
/// values come from.
pub fn apply_env_overrides<F>(config: &mut GatewayConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(token) = lookup(AUTH_TOKEN_ENV) {
        config.auth.token = token;
    }
    if let Some(bind) = lookup(BIND_ADDRESS_ENV).filter(|v| !v.is_empty()) {
        config.listener.bind_address = bind;
    }
}

/// Load configuration from an optional TOML file, overlay the process
/// environment and validate the result.
pub fn load_config(path: Option<&Path>) -> Result<GatewayConfig, ConfigError> {
    let mut config = match path {
        Some(path) => parse_config(&fs::read_to_string(path)?)?,
        None => GatewayConfig::default(),
    };

    apply_env_overrides(&mut config, |key| std::env::var(key).ok());
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_parse_partial_document_keeps_defaults() {
        let config = parse_config(
            r#"
            [auth]
            token = "s3cret"

            [upstream]
            timeout_secs = 3
            "#,
        )
        .unwrap();

        assert_eq!(config.auth.token, "s3cret");
        assert_eq!(config.upstream.timeout_secs, 3);
        assert_eq!(config.upstream.base_url, "https://api.coolapk.com");
        assert_eq!(config.listener.bind_address, "0.0.0.0:8080");
    }

    #[test]
    fn test_parse_rejects_wrong_types() {
        let err = parse_config("[upstream]\ntimeout_secs = \"five\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_env_overrides_file_values() {
        let mut config = parse_config("[auth]\ntoken = \"from-file\"").unwrap();
        let env: HashMap<&str, &str> = HashMap::from([
            (AUTH_TOKEN_ENV, "from-env"),
            (BIND_ADDRESS_ENV, "127.0.0.1:3000"),
        ]);

        apply_env_overrides(&mut config, |key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.auth.token, "from-env");
        assert_eq!(config.listener.bind_address, "127.0.0.1:3000");
    }

    #[test]
    fn test_empty_env_token_disables_auth() {
        let mut config = parse_config("[auth]\ntoken = \"from-file\"").unwrap();
        apply_env_overrides(&mut config, |key| {
            (key == AUTH_TOKEN_ENV).then(String::new)
        });
        assert!(config.auth.is_disabled());
    }

    #[test]
    fn test_validation_error_display_lists_all() {
        let err = ConfigError::Validation(vec![
            ValidationError::ZeroTimeout,
            ValidationError::InvalidBaseUrl("x".into()),
        ]);
        assert_eq!(
            err.to_string(),
            "Validation failed: upstream.timeout_secs must be greater than zero, \
             upstream.base_url must be an http(s) URL, got 'x'"
        );
    }
}
