//! Backend origin configuration.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use url::Url;

use crate::http::Method;

/// Origin used when nothing is configured.
pub const DEFAULT_BASE_URL: &str = "https://event-management-backend-j2a2.onrender.com";

/// Environment variable naming the backend origin.
pub const BASE_URL_ENV: &str = "CAMPUS_API_URL";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// The origin is neither empty nor an absolute `http(s)://` URL.
    #[error("invalid base URL '{0}': expected an http:// or https:// origin")]
    InvalidBaseUrl(String),
}

/// Where API requests are sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    base_url: String,
}

impl ClientConfig {
    /// Validate and normalise an origin. Trailing slashes are trimmed; an
    /// empty origin means same-origin relative requests.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] for a non-HTTP origin.
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        let trimmed = base_url.trim().trim_end_matches('/');
        if !trimmed.is_empty() {
            let invalid = || ConfigError::InvalidBaseUrl(base_url.to_owned());
            let parsed = Url::parse(trimmed).map_err(|_| invalid())?;
            if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
                return Err(invalid());
            }
        }
        Ok(Self { base_url: trimmed.to_owned() })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for an API path.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{path}", self.base_url)
        } else {
            format!("{}/{path}", self.base_url)
        }
    }

    /// Human-readable request line used in logs.
    #[must_use]
    pub fn describe(&self, method: Method, path: &str) -> String {
        format!("{} {}", method.as_str(), self.url(path))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self { base_url: DEFAULT_BASE_URL.to_owned() }
    }
}
