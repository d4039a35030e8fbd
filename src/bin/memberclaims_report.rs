//! memberclaims-report: Member claims summary
//!
//! Fetches one member's claims and coverage limits and prints them as
//! plain text.
//!
//! ## Configuration
//! - MEMBERCLAIMS_USER_ID: Member to report on (required)
//! - MEMBERCLAIMS_CONFIG: Path to a YAML config file (optional)
//! - MEMBERCLAIMS__API__BASE_URL / VITE_API_URL: Backend base URL
//! - MEMBERCLAIMS_LOG: Log filter (default: info)
//!
//! Exits non-zero when the claims list cannot be fetched. Missing coverage
//! limits are reported but not fatal.

use std::sync::Arc;

use tracing::{info, warn};

use memberclaims::clients;
use memberclaims::config::{Config, USER_ID_ENV_VAR};
use memberclaims::services::ClaimsService;
use memberclaims::utils::bootstrap::init_tracing;
use memberclaims::views::{render_member_report, ClaimsTable};
use memberclaims_client::UserClaimsQuery;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let user_id = std::env::var(USER_ID_ENV_VAR)
        .ok()
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| format!("{} must be set", USER_ID_ENV_VAR))?;

    let config = Config::load(None)?;
    let api = Arc::new(clients::connect(&config.api)?);
    let service = ClaimsService::new(api);

    info!(user_id = %user_id, "building member report");

    let query = UserClaimsQuery::new(1, config.display.page_size.max(1));
    let page = match service.get_user_claims(&user_id, &query).await {
        Ok(page) => page,
        Err(failure) => {
            eprintln!("{}", failure);
            std::process::exit(1);
        }
    };
    let table = ClaimsTable::from_page(&page, &query, &config.display.currency);

    let coverage = match service.get_coverage_limits(&user_id).await {
        Ok(limits) => Some(limits),
        Err(failure) => {
            warn!(user_id = %user_id, message = %failure, "coverage limits unavailable");
            None
        }
    };

    print!(
        "{}",
        render_member_report(&user_id, &table, coverage.as_ref(), &config.display.currency)
    );
    Ok(())
}
