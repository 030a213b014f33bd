//! Operations backend API configuration.

use serde::{Deserialize, Serialize};

/// Default request timeout in seconds.
const fn default_timeout_secs() -> u64 {
    15
}

fn default_user_agent() -> String {
    String::from("teleops/0.1")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    /// Base URL of the REST API (e.g., `https://ops.example.net/api/v1/`).
    #[serde(default)]
    pub base_url: String,

    /// Bearer token for the tenant session.
    #[serde(default)]
    pub token: String,

    /// Per-request timeout, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            token: String::new(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

impl ApiConfig {
    /// Check if the API has the minimum required fields for remote access.
    pub fn is_configured(&self) -> bool {
        !self.base_url.is_empty() && !self.token.is_empty()
    }

    /// Base URL guaranteed to end in `/`, so relative paths join under it.
    pub fn normalized_base_url(&self) -> String {
        if self.base_url.ends_with('/') {
            self.base_url.clone()
        } else {
            format!("{}/", self.base_url)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_not_configured() {
        let config = ApiConfig::default();
        assert!(!config.is_configured());
        assert_eq!(config.timeout_secs, 15);
        assert_eq!(config.user_agent, "teleops/0.1");
    }

    #[test]
    fn configured_when_url_and_token_set() {
        let config = ApiConfig {
            base_url: "https://ops.example.net/api".into(),
            token: "tok".into(),
            ..Default::default()
        };
        assert!(config.is_configured());
    }

    #[test]
    fn base_url_gets_trailing_slash() {
        let config = ApiConfig {
            base_url: "https://ops.example.net/api".into(),
            ..Default::default()
        };
        assert_eq!(config.normalized_base_url(), "https://ops.example.net/api/");

        let config = ApiConfig {
            base_url: "https://ops.example.net/api/".into(),
            ..Default::default()
        };
        assert_eq!(config.normalized_base_url(), "https://ops.example.net/api/");
    }
}
