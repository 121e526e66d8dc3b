//! Client configuration: API endpoint and bearer token

use crate::error::{QuayError, Result};
use serde::{Deserialize, Serialize};
use std::env;
use url::Url;

pub const DEFAULT_API_URL: &str = "https://quay.io/api/v1";
pub const API_URL_ENV: &str = "QUAY_API_URL";
pub const TOKEN_ENV: &str = "QUAY_TOKEN";

#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClientConfig {
    pub url: String,
    pub token: String,
}

// Keep the token out of logs.
impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("url", &self.url)
            .field("token", &"<redacted>")
            .finish()
    }
}

impl ClientConfig {
    pub fn new(url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            token: token.into(),
        }
    }

    /// Read `QUAY_API_URL` (optional) and `QUAY_TOKEN` (required)
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let url = lookup(API_URL_ENV)
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let token = lookup(TOKEN_ENV)
            .ok_or_else(|| QuayError::Config(format!("{} not set", TOKEN_ENV)))?;

        let config = Self::new(url, token);
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.token.trim().is_empty() {
            return Err(QuayError::Config("Bearer token cannot be empty".to_string()));
        }

        let url = Url::parse(&self.url)?;
        match url.scheme() {
            "http" | "https" => Ok(()),
            other => Err(QuayError::InvalidUrl(format!(
                "Unsupported scheme '{}' in {}",
                other, self.url
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_to_quay_io() {
        let config = ClientConfig::from_lookup(lookup(&[(TOKEN_ENV, "abc")])).unwrap();
        assert_eq!(config.url, DEFAULT_API_URL);
        assert_eq!(config.token, "abc");
    }

    #[test]
    fn custom_url_from_env() {
        let config = ClientConfig::from_lookup(lookup(&[
            (API_URL_ENV, "http://localhost:8080/api/v1"),
            (TOKEN_ENV, "abc"),
        ]))
        .unwrap();
        assert_eq!(config.url, "http://localhost:8080/api/v1");
    }

    #[test]
    fn missing_token_is_config_error() {
        let err = ClientConfig::from_lookup(lookup(&[])).unwrap_err();
        assert_eq!(err, QuayError::Config("QUAY_TOKEN not set".to_string()));
    }

    #[test]
    fn validate_rejects_blank_token_and_odd_schemes() {
        assert!(matches!(
            ClientConfig::new(DEFAULT_API_URL, "  ").validate(),
            Err(QuayError::Config(_))
        ));
        assert!(matches!(
            ClientConfig::new("ftp://quay.io/api/v1", "abc").validate(),
            Err(QuayError::InvalidUrl(_))
        ));
        assert!(ClientConfig::new(DEFAULT_API_URL, "abc").validate().is_ok());
    }

    #[test]
    fn debug_redacts_token() {
        let config = ClientConfig::new(DEFAULT_API_URL, "super-secret");
        assert!(!format!("{:?}", config).contains("super-secret"));
    }
}
