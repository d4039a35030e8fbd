//! Client traits for the claims and payments APIs.
//!
//! The HTTP client and the in-memory mock implement the same traits, so
//! service code can be exercised without a backend.

use async_trait::async_trait;

use crate::error::Result;
use crate::model::{
    Claim, ClaimPage, ClaimUpdate, CoverageLimits, NewClaim, Payment, PaymentPage, StatusUpdate,
};
use crate::query::{ClaimQuery, PaymentQuery, UserClaimsQuery};

/// Claims and coverage endpoints.
///
/// Implementations perform no retries and no caching: every read goes to
/// the backend.
#[async_trait]
pub trait ClaimsApi: Send + Sync {
    /// `GET /claims` with paging and filters.
    async fn get_all_claims(&self, query: &ClaimQuery) -> Result<ClaimPage>;

    /// `GET /claims/:id`.
    async fn get_claim_by_id(&self, id: &str) -> Result<Claim>;

    /// `POST /claims`.
    async fn create_claim(&self, claim: &NewClaim) -> Result<Claim>;

    /// `PUT /claims/:id`.
    async fn update_claim(&self, id: &str, claim: &ClaimUpdate) -> Result<Claim>;

    /// `PUT /claims/:id/status`.
    async fn update_claim_status(&self, id: &str, update: &StatusUpdate) -> Result<Claim>;

    /// `DELETE /claims/:id`.
    async fn delete_claim(&self, id: &str) -> Result<()>;

    /// `GET /claims/user/:id`.
    async fn get_user_claims(&self, user_id: &str, query: &UserClaimsQuery) -> Result<ClaimPage>;

    /// `GET /claims/coverage/:id/limits`.
    async fn get_coverage_limits(&self, user_id: &str) -> Result<CoverageLimits>;
}

/// Payment history endpoints.
#[async_trait]
pub trait PaymentsApi: Send + Sync {
    /// `GET /payments/user/:id`.
    async fn get_user_payments(&self, user_id: &str, query: &PaymentQuery) -> Result<PaymentPage>;

    /// `GET /payments/:id`.
    async fn get_payment_by_id(&self, id: &str) -> Result<Payment>;
}
