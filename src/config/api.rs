//! Backend API and display configuration types.

use std::time::Duration;

use memberclaims_client::{ApiClientConfig, DEFAULT_BASE_URL, DEFAULT_LIMIT};
use serde::Deserialize;

/// Currency code used when formatting amounts.
pub const DEFAULT_CURRENCY: &str = "KES";

/// Backend API configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the REST backend.
    pub base_url: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
    /// Bearer token for authenticated requests.
    pub token: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
            token: None,
        }
    }
}

impl ApiConfig {
    /// Client configuration for `memberclaims_client::ApiClient`.
    pub fn client_config(&self) -> ApiClientConfig {
        let config = ApiClientConfig::default()
            .with_base_url(self.base_url.clone())
            .with_timeout(Duration::from_secs(self.timeout_secs.max(1)));
        match &self.token {
            Some(token) => config.with_token(token.clone()),
            None => config,
        }
    }
}

/// Display formatting configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Currency code prefixed to formatted amounts.
    pub currency: String,
    /// Rows per page in list views.
    pub page_size: u32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            currency: DEFAULT_CURRENCY.to_string(),
            page_size: DEFAULT_LIMIT,
        }
    }
}
