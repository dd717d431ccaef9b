//! Photo server connection settings.

use kiosk_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

const DEFAULT_SCHEME: &str = "http://";

/// Connection settings for the Immich server.
///
/// Never overridable per request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server base URL. A missing scheme defaults to `http://`.
    #[serde(default)]
    pub url: String,
    /// API key sent as `x-api-key`.
    #[serde(default)]
    pub api_key: String,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            api_key: String::new(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ServerConfig {
    pub fn new(url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            api_key: api_key.into(),
            ..Default::default()
        }
    }

    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Per-request timeout. Zero is rejected.
    pub fn timeout(&self) -> Result<Duration> {
        if self.timeout_secs == 0 {
            return Err(Error::InvalidConfig(
                "server timeout must be at least one second".into(),
            ));
        }
        Ok(Duration::from_secs(self.timeout_secs))
    }

    /// Parsed base URL with a scheme and without a trailing slash.
    pub fn base_url(&self) -> Result<Url> {
        let normalized = normalize_url(&self.url);
        if normalized.is_empty() {
            return Err(Error::InvalidConfig("server url is not set".into()));
        }
        Url::parse(&normalized)
            .map_err(|e| Error::InvalidConfig(format!("invalid server url '{}': {}", self.url, e)))
    }
}

/// Add the default scheme when missing and trim trailing slashes.
pub fn normalize_url(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return String::new();
    }
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("{}{}", DEFAULT_SCHEME, trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ImmichClient;

    #[test]
    fn test_normalize_url() {
        let cases = [
            ("nope", "http://nope"),
            ("192.168.1.1", "http://192.168.1.1"),
            ("192.168.1.1:1234", "http://192.168.1.1:1234"),
            ("https://192.168.1.1:1234", "https://192.168.1.1:1234"),
            ("nope:32", "http://nope:32"),
            ("https://photos.example.com/", "https://photos.example.com"),
        ];
        for (input, want) in cases {
            assert_eq!(normalize_url(input), want, "input {}", input);
        }
    }

    #[test]
    fn test_base_url_requires_value() {
        let config = ServerConfig::default();
        assert!(matches!(config.base_url(), Err(Error::InvalidConfig(_))));

        let config = ServerConfig::new("photos.local:2283", "key");
        assert_eq!(config.base_url().unwrap().as_str(), "http://photos.local:2283/");
    }

    #[test]
    fn test_timeout_is_whole_seconds() {
        let config = ServerConfig::new("photos.local", "key").with_timeout_secs(3);
        assert_eq!(config.timeout().unwrap(), Duration::from_secs(3));

        let config = config.with_timeout_secs(0);
        assert!(matches!(config.timeout(), Err(Error::InvalidConfig(_))));
        assert!(ImmichClient::new(&config).is_err());
    }
}
