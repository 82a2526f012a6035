//! Authentication configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::token::{KeyError, SecretKey};

/// Errors raised while validating auth configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The signing secret is missing or empty.
    #[error("auth.secret must not be empty")]
    MissingSecret,
}

/// Authentication configuration.
///
/// The secret is key material: it never appears in logs (see
/// [`SecretKey`]'s redacted `Debug`) and this struct should not be dumped
/// wholesale either.
///
/// # Example (TOML)
///
/// ```toml
/// [auth]
/// secret = "change-me"
/// token_lifetime = "1h"
/// ```
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Symmetric signing secret for bearer tokens.
    pub secret: String,

    /// Lifetime of issued bearer tokens.
    #[serde(with = "humantime_serde")]
    pub token_lifetime: Duration,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            secret: String::new(),
            token_lifetime: Duration::from_secs(3600), // 1 hour
        }
    }
}

impl AuthConfig {
    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingSecret`] if no secret is configured.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.secret.is_empty() {
            return Err(ConfigError::MissingSecret);
        }
        Ok(())
    }

    /// Loads the configured secret as key material.
    ///
    /// # Errors
    ///
    /// Returns a [`KeyError`] if the secret is empty. This is fatal at
    /// startup: a verifier is never constructed from an invalid key.
    pub fn secret_key(&self) -> Result<SecretKey, KeyError> {
        SecretKey::from_bytes(self.secret.as_bytes().to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_fails_validation() {
        let config = AuthConfig::default();
        assert!(matches!(config.validate(), Err(ConfigError::MissingSecret)));
        assert!(config.secret_key().is_err());
    }

    #[test]
    fn test_configured_secret_passes() {
        let config = AuthConfig {
            secret: "test-secret".to_string(),
            ..AuthConfig::default()
        };

        assert!(config.validate().is_ok());
        assert!(config.secret_key().is_ok());
    }

    #[test]
    fn test_token_lifetime_parses_humantime() {
        let config: AuthConfig =
            toml::from_str("secret = \"s\"\ntoken_lifetime = \"90m\"").expect("parse");
        assert_eq!(config.token_lifetime, Duration::from_secs(90 * 60));
    }
}
