//! Default client implementation over HTTP/JSON using reqwest.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::envelope;
use crate::error::{ClientError, Result};
use crate::model::{
    Claim, ClaimPage, ClaimUpdate, CoverageLimits, NewClaim, Payment, PaymentPage, StatusUpdate,
};
use crate::query::{ClaimQuery, PaymentQuery, QueryPairs, UserClaimsQuery};
use crate::traits;
use crate::validation::validate_status_update;

/// Backend base URL used when nothing is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000/api";
/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client configuration.
#[derive(Debug, Clone)]
pub struct ApiClientConfig {
    /// Backend base URL, e.g. `https://api.example.org/api`.
    pub base_url: String,

    /// Request timeout.
    pub timeout: Duration,

    /// Bearer token sent with every request.
    pub token: Option<String>,
}

impl Default for ApiClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            token: None,
        }
    }
}

impl ApiClientConfig {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        let token = token.into();
        self.token = Some(token).filter(|t| !t.is_empty());
        self
    }
}

/// Claims, coverage and payments client.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: Url,
    token: Option<String>,
}

impl ApiClient {
    /// Create a client from configuration.
    pub fn new(config: ApiClientConfig) -> Result<Self> {
        let trimmed = config.base_url.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            return Err(ClientError::InvalidArgument(
                "base URL not configured".to_string(),
            ));
        }
        let base_url = Url::parse(trimmed)
            .map_err(|e| ClientError::InvalidArgument(format!("base URL {}: {}", trimmed, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidArgument(format!(
                "base URL {} cannot carry paths",
                trimmed
            )));
        }

        let http = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            http,
            base_url,
            token: config.token,
        })
    }

    /// Connect to a base URL with default settings.
    pub fn connect(base_url: &str) -> Result<Self> {
        Self::new(ApiClientConfig::default().with_base_url(base_url))
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// Build an endpoint URL from path segments; segments are percent-encoded.
    /// Dot segments are dropped by `Url`, so ids pass through [`require_id`] first.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidArgument("base URL cannot carry paths".to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn request(&self, method: Method, url: Url, query: Option<&QueryPairs>) -> RequestBuilder {
        let mut request = self.http.request(method, url);
        if let Some(pairs) = query {
            request = request.query(pairs);
        }
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        request
    }

    /// Send a request and return status plus raw body.
    async fn execute(&self, request: RequestBuilder) -> Result<(u16, String)> {
        let response = request.send().await?;
        let status = response.status().as_u16();
        let url = response.url().path().to_string();
        let body = response.text().await?;
        debug!(path = %url, status, bytes = body.len(), "API response");
        Ok((status, body))
    }

    async fn fetch<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let (status, body) = self.execute(request).await?;
        envelope::decode(status, &body)
    }
}

/// Reject ids that would not address a single resource.
fn require_id(id: &str, what: &str) -> Result<()> {
    let trimmed = id.trim();
    if trimmed.is_empty() {
        return Err(ClientError::InvalidArgument(format!("{} is required", what)));
    }
    if trimmed == "." || trimmed == ".." {
        return Err(ClientError::InvalidArgument(format!(
            "{} {:?} is not a valid id",
            what, id
        )));
    }
    Ok(())
}

#[async_trait]
impl traits::ClaimsApi for ApiClient {
    async fn get_all_claims(&self, query: &ClaimQuery) -> Result<ClaimPage> {
        query.validate()?;
        let url = self.endpoint(&["claims"])?;
        let pairs = query.to_query_pairs();
        self.fetch(self.request(Method::GET, url, Some(&pairs))).await
    }

    async fn get_claim_by_id(&self, id: &str) -> Result<Claim> {
        require_id(id, "claim id")?;
        let url = self.endpoint(&["claims", id])?;
        self.fetch(self.request(Method::GET, url, None)).await
    }

    async fn create_claim(&self, claim: &NewClaim) -> Result<Claim> {
        let url = self.endpoint(&["claims"])?;
        self.fetch(self.request(Method::POST, url, None).json(claim))
            .await
    }

    async fn update_claim(&self, id: &str, claim: &ClaimUpdate) -> Result<Claim> {
        require_id(id, "claim id")?;
        let url = self.endpoint(&["claims", id])?;
        self.fetch(self.request(Method::PUT, url, None).json(claim))
            .await
    }

    async fn update_claim_status(&self, id: &str, update: &StatusUpdate) -> Result<Claim> {
        require_id(id, "claim id")?;
        validate_status_update(update)?;
        let url = self.endpoint(&["claims", id, "status"])?;
        let payload = update.to_payload();
        self.fetch(self.request(Method::PUT, url, None).json(&payload))
            .await
    }

    async fn delete_claim(&self, id: &str) -> Result<()> {
        require_id(id, "claim id")?;
        let url = self.endpoint(&["claims", id])?;
        let (status, body) = self.execute(self.request(Method::DELETE, url, None)).await?;
        envelope::decode_unit(status, &body)
    }

    async fn get_user_claims(&self, user_id: &str, query: &UserClaimsQuery) -> Result<ClaimPage> {
        require_id(user_id, "user id")?;
        query.validate()?;
        let url = self.endpoint(&["claims", "user", user_id])?;
        let pairs = query.to_query_pairs();
        self.fetch(self.request(Method::GET, url, Some(&pairs))).await
    }

    async fn get_coverage_limits(&self, user_id: &str) -> Result<CoverageLimits> {
        require_id(user_id, "user id")?;
        let url = self.endpoint(&["claims", "coverage", user_id, "limits"])?;
        self.fetch(self.request(Method::GET, url, None)).await
    }
}

#[async_trait]
impl traits::PaymentsApi for ApiClient {
    async fn get_user_payments(&self, user_id: &str, query: &PaymentQuery) -> Result<PaymentPage> {
        require_id(user_id, "user id")?;
        query.validate()?;
        let url = self.endpoint(&["payments", "user", user_id])?;
        let pairs = query.to_query_pairs();
        self.fetch(self.request(Method::GET, url, Some(&pairs))).await
    }

    async fn get_payment_by_id(&self, id: &str) -> Result<Payment> {
        require_id(id, "payment id")?;
        let url = self.endpoint(&["payments", id])?;
        self.fetch(self.request(Method::GET, url, None)).await
    }
}
