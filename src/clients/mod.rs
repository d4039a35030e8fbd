//! Backend clients.

pub mod mock;

use memberclaims_client::ApiClient;
use tracing::info;

use crate::config::ApiConfig;

/// Build the HTTP client for the configured backend.
pub fn connect(config: &ApiConfig) -> memberclaims_client::Result<ApiClient> {
    let client = ApiClient::new(config.client_config())?;
    info!(
        base_url = %client.base_url(),
        authenticated = config.token.is_some(),
        "connected to claims backend"
    );
    Ok(client)
}
