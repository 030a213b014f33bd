//! # teleops-api
//!
//! REST client for the Teleops operations backend.
//!
//! Covers the calls the design editor and permission screens rely on:
//! - design versions (list, create, replace items, reorder, publish, delete)
//! - the resource-type registry, with a built-in fallback list
//! - the equipment/category catalog
//!
//! Every list endpoint goes through [`teleops_core::envelope::ListEnvelope`],
//! so bare arrays and `{count, results}` pages are both accepted.

pub mod equipment;
pub mod resource_types;
pub mod versions;

mod error;
mod http;

pub use error::ApiError;

use std::time::Duration;

use teleops_config::ApiConfig;

// ── Client ─────────────────────────────────────────────────────────

/// HTTP client for the operations backend.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

impl ApiClient {
    /// Create a client from the `api` configuration section.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Config`] if the base URL is empty, or
    /// [`ApiError::Http`] if the underlying `reqwest::Client` fails to build.
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        if config.base_url.trim().is_empty() {
            return Err(ApiError::Config("api.base_url is empty".to_string()));
        }
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            http,
            base_url: config.normalized_base_url(),
            token: config.token.clone(),
        })
    }

    /// Absolute URL for a path relative to the API base.
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path.trim_start_matches('/'))
    }

    fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.authorize(self.http.get(self.url(path)))
    }

    fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.authorize(self.http.post(self.url(path)))
    }

    fn put(&self, path: &str) -> reqwest::RequestBuilder {
        self.authorize(self.http.put(self.url(path)))
    }

    fn delete(&self, path: &str) -> reqwest::RequestBuilder {
        self.authorize(self.http.delete(self.url(path)))
    }

    fn authorize(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        if self.token.is_empty() {
            builder
        } else {
            builder.bearer_auth(&self.token)
        }
    }
}

/// Append `?search=<query>` when the query is not blank.
fn with_search(path: &str, query: &str) -> String {
    let query = query.trim();
    if query.is_empty() {
        path.to_string()
    } else {
        format!("{path}?search={}", urlencoding::encode(query))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn test_client(base_url: &str) -> ApiClient {
        ApiClient::new(&ApiConfig {
            base_url: base_url.to_string(),
            token: "tok".to_string(),
            timeout_secs: 2,
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn empty_base_url_is_rejected() {
        let err = ApiClient::new(&ApiConfig::default()).unwrap_err();
        assert!(matches!(err, ApiError::Config(_)));
    }

    #[test]
    fn url_joins_under_base() {
        let client = test_client("https://ops.example.net/api/v1");
        assert_eq!(
            client.url("/design-versions/dv-1/"),
            "https://ops.example.net/api/v1/design-versions/dv-1/"
        );
        assert_eq!(
            client.url("resource-types/"),
            "https://ops.example.net/api/v1/resource-types/"
        );
    }

    #[test]
    fn search_query_is_encoded() {
        assert_eq!(with_search("equipment/", "  "), "equipment/");
        assert_eq!(
            with_search("equipment/", "RRU 5G&x"),
            "equipment/?search=RRU%205G%26x"
        );
    }
}
