//! Claims service.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use memberclaims_client::validation::{
    validate_new_claim, validate_status_update, validate_transition,
};
use memberclaims_client::{
    Claim, ClaimPage, ClaimQuery, ClaimUpdate, ClaimsApi, CoverageLimits, NewClaim,
    StatusUpdate, UserClaimsQuery,
};
use tracing::info;

use super::{reject, settle, Failure, Outcome};

/// Claims and coverage operations with outcome normalization.
///
/// Submissions, updates and status changes are validated locally first;
/// a validation failure never reaches the backend.
#[derive(Clone)]
pub struct ClaimsService {
    api: Arc<dyn ClaimsApi>,
    today: Option<NaiveDate>,
}

impl ClaimsService {
    pub fn new(api: Arc<dyn ClaimsApi>) -> Self {
        Self { api, today: None }
    }

    /// Pin the date used for "not in the future" checks.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Utc::now().date_naive())
    }

    pub async fn get_all_claims(&self, query: &ClaimQuery) -> Outcome<ClaimPage> {
        settle(
            "get_all_claims",
            "Failed to fetch claims",
            self.api.get_all_claims(query),
        )
        .await
    }

    pub async fn get_claim_by_id(&self, id: &str) -> Outcome<Claim> {
        settle(
            "get_claim_by_id",
            "Failed to fetch claim",
            self.api.get_claim_by_id(id),
        )
        .await
    }

    pub async fn create_claim(&self, claim: &NewClaim) -> Outcome<Claim> {
        validate_new_claim(claim, self.today())
            .map_err(|e| reject("create_claim", Failure::validation(e)))?;

        let created = settle(
            "create_claim",
            "Failed to submit claim",
            self.api.create_claim(claim),
        )
        .await?;
        info!(claim_id = %created.id, claim_type = %created.claim_type, "claim submitted");
        Ok(created)
    }

    pub async fn update_claim(&self, id: &str, claim: &ClaimUpdate) -> Outcome<Claim> {
        validate_new_claim(claim, self.today())
            .map_err(|e| reject("update_claim", Failure::validation(e)))?;

        let updated = settle(
            "update_claim",
            "Failed to update claim",
            self.api.update_claim(id, claim),
        )
        .await?;
        info!(claim_id = %updated.id, "claim updated");
        Ok(updated)
    }

    pub async fn update_claim_status(&self, id: &str, update: &StatusUpdate) -> Outcome<Claim> {
        validate_status_update(update)
            .map_err(|e| reject("update_claim_status", Failure::validation(e)))?;

        let updated = settle(
            "update_claim_status",
            "Failed to update claim status",
            self.api.update_claim_status(id, &update.to_payload()),
        )
        .await?;
        info!(claim_id = %updated.id, status = %updated.status, "claim status updated");
        Ok(updated)
    }

    /// Admin review: check the lifecycle transition from the claim's current
    /// status, then update it.
    pub async fn review_claim(&self, claim: &Claim, update: &StatusUpdate) -> Outcome<Claim> {
        validate_transition(claim.status, update.status)
            .map_err(|e| reject("review_claim", Failure::validation(e)))?;
        self.update_claim_status(&claim.id, update).await
    }

    pub async fn delete_claim(&self, id: &str) -> Outcome<()> {
        settle(
            "delete_claim",
            "Failed to delete claim",
            self.api.delete_claim(id),
        )
        .await?;
        info!(claim_id = %id, "claim deleted");
        Ok(())
    }

    pub async fn get_user_claims(
        &self,
        user_id: &str,
        query: &UserClaimsQuery,
    ) -> Outcome<ClaimPage> {
        settle(
            "get_user_claims",
            "Failed to fetch user claims",
            self.api.get_user_claims(user_id, query),
        )
        .await
    }

    pub async fn get_coverage_limits(&self, user_id: &str) -> Outcome<CoverageLimits> {
        settle(
            "get_coverage_limits",
            "Failed to fetch coverage limits",
            self.api.get_coverage_limits(user_id),
        )
        .await
    }
}
