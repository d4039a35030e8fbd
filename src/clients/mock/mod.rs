//! In-memory claims backend for testing.
//!
//! Implements the same client traits as the HTTP client and mirrors the
//! backend's paging, filtering and not-found behavior. Failures and
//! response delays can be injected per test.

use std::collections::{HashMap, VecDeque};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use memberclaims_client::convert::now;
use memberclaims_client::query::QueryPairs;
use memberclaims_client::{
    CategoryLimit, Claim, ClaimPage, ClaimQuery, ClaimStatus, ClaimType, ClaimUpdate,
    ClaimsApi, ClientError, CoverageLimits, NewClaim, Payment, PaymentPage, PaymentQuery,
    PaymentStatus, PaymentsApi, Result, StatusUpdate, UserClaimsQuery,
};
use rust_decimal::Decimal;
use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

/// Failure returned by every call while set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockFailure {
    /// Non-2xx with the given status and message.
    Server(u16, String),
    /// 2xx with `success: false`.
    Rejected(String),
    /// Body that does not decode.
    Garbled,
}

impl MockFailure {
    fn to_error(&self) -> ClientError {
        match self {
            MockFailure::Server(status, message) => ClientError::Server {
                status: *status,
                message: message.clone(),
            },
            MockFailure::Rejected(message) => ClientError::Rejected(message.clone()),
            MockFailure::Garbled => ClientError::Decode("expected value at line 1 column 1".into()),
        }
    }
}

/// Mock claims, coverage and payments backend.
#[derive(Default)]
pub struct MockBackend {
    claims: RwLock<Vec<Claim>>,
    coverage: RwLock<HashMap<String, CoverageLimits>>,
    payments: RwLock<Vec<Payment>>,
    failure: RwLock<Option<MockFailure>>,
    delays: Mutex<VecDeque<Duration>>,
    calls: RwLock<Vec<String>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend preloaded with two members' claims, coverage and payments.
    pub fn with_sample_data() -> Self {
        Self {
            claims: RwLock::new(sample_claims()),
            coverage: RwLock::new(
                [("member-1".to_string(), sample_coverage("member-1"))]
                    .into_iter()
                    .collect(),
            ),
            payments: RwLock::new(sample_payments()),
            ..Self::default()
        }
    }

    pub async fn set_coverage(&self, limits: CoverageLimits) {
        self.coverage
            .write()
            .await
            .insert(limits.user_id.clone(), limits);
    }

    /// Fail every subsequent call until [`MockBackend::recover`].
    pub async fn fail_with(&self, failure: MockFailure) {
        *self.failure.write().await = Some(failure);
    }

    pub async fn recover(&self) {
        *self.failure.write().await = None;
    }

    /// Delay the next list response. Delays queue in call order.
    pub async fn push_delay(&self, delay: Duration) {
        self.delays.lock().await.push_back(delay);
    }

    pub async fn claim_count(&self) -> usize {
        self.claims.read().await.len()
    }

    /// Requests received, as `METHOD /path?query`.
    pub async fn calls(&self) -> Vec<String> {
        self.calls.read().await.clone()
    }

    pub async fn clear_calls(&self) {
        self.calls.write().await.clear();
    }

    async fn receive(&self, method: &str, path: String, query: QueryPairs) -> Result<()> {
        let line = if query.is_empty() {
            format!("{} {}", method, path)
        } else {
            let pairs: Vec<String> = query.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
            format!("{} {}?{}", method, path, pairs.join("&"))
        };
        self.calls.write().await.push(line);

        match self.failure.read().await.as_ref() {
            Some(failure) => Err(failure.to_error()),
            None => Ok(()),
        }
    }

    async fn wait_turn(&self) {
        let delay = self.delays.lock().await.pop_front();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
    }
}

fn not_found(what: &str) -> ClientError {
    ClientError::Server {
        status: 404,
        message: format!("{} not found", what),
    }
}

fn paginate<T: Clone>(items: Vec<T>, page: u32, limit: u32) -> (Vec<T>, u64) {
    let total = items.len() as u64;
    let skip = (page.saturating_sub(1) as usize).saturating_mul(limit as usize);
    let slice = items.into_iter().skip(skip).take(limit as usize).collect();
    (slice, total)
}

fn apply_fields(claim: &mut Claim, update: &NewClaim) {
    if let Some(user_id) = &update.user_id {
        claim.user_id = user_id.clone();
    }
    claim.plan_id = update.plan_id.clone();
    claim.coverage_id = update.coverage_id.clone();
    claim.claim_type = update.claim_type;
    claim.provider_name = update.provider_name.clone();
    claim.provider_location = update.provider_location.clone();
    claim.service_date = update.service_date;
    claim.amount_claimed = update.amount_claimed;
    claim.diagnosis = update.diagnosis.clone();
    claim.treatment = update.treatment.clone();
    claim.notes = update.notes.clone();
    claim.documents = update.documents.clone();
}

#[async_trait]
impl ClaimsApi for MockBackend {
    async fn get_all_claims(&self, query: &ClaimQuery) -> Result<ClaimPage> {
        query.validate()?;
        self.receive("GET", "/claims".into(), query.to_query_pairs())
            .await?;
        self.wait_turn().await;

        let matching: Vec<Claim> = self
            .claims
            .read()
            .await
            .iter()
            .filter(|c| query.claim_type.map_or(true, |t| c.claim_type == t))
            .filter(|c| query.status.map_or(true, |s| c.status == s))
            .filter(|c| query.start_date.map_or(true, |d| c.service_date >= d))
            .filter(|c| query.end_date.map_or(true, |d| c.service_date <= d))
            .cloned()
            .collect();
        let (claims, total) = paginate(matching, query.page, query.limit);
        Ok(ClaimPage { claims, total })
    }

    async fn get_claim_by_id(&self, id: &str) -> Result<Claim> {
        self.receive("GET", format!("/claims/{}", id), Vec::new())
            .await?;
        self.claims
            .read()
            .await
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or_else(|| not_found("Claim"))
    }

    async fn create_claim(&self, claim: &NewClaim) -> Result<Claim> {
        self.receive("POST", "/claims".into(), Vec::new()).await?;

        let mut created = Claim {
            id: format!("claim-{}", Uuid::new_v4().simple()),
            user_id: String::new(),
            plan_id: String::new(),
            coverage_id: String::new(),
            claim_type: claim.claim_type,
            provider_name: String::new(),
            provider_location: String::new(),
            service_date: claim.service_date,
            submission_date: now(),
            processed_date: None,
            amount_claimed: claim.amount_claimed,
            amount_approved: Decimal::ZERO,
            diagnosis: String::new(),
            treatment: String::new(),
            notes: String::new(),
            documents: Vec::new(),
            status: ClaimStatus::Pending,
        };
        apply_fields(&mut created, claim);
        if created.user_id.is_empty() {
            created.user_id = "member-1".to_string();
        }
        self.claims.write().await.push(created.clone());
        Ok(created)
    }

    async fn update_claim(&self, id: &str, claim: &ClaimUpdate) -> Result<Claim> {
        self.receive("PUT", format!("/claims/{}", id), Vec::new())
            .await?;
        let mut claims = self.claims.write().await;
        let existing = claims
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| not_found("Claim"))?;
        apply_fields(existing, claim);
        Ok(existing.clone())
    }

    async fn update_claim_status(&self, id: &str, update: &StatusUpdate) -> Result<Claim> {
        self.receive("PUT", format!("/claims/{}/status", id), Vec::new())
            .await?;
        let mut claims = self.claims.write().await;
        let existing = claims
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| not_found("Claim"))?;
        existing.status = update.status;
        if let Some(amount) = update.amount_approved {
            existing.amount_approved = amount;
        }
        if let Some(notes) = &update.notes {
            existing.notes = notes.clone();
        }
        existing.processed_date = Some(now());
        Ok(existing.clone())
    }

    async fn delete_claim(&self, id: &str) -> Result<()> {
        self.receive("DELETE", format!("/claims/{}", id), Vec::new())
            .await?;
        let mut claims = self.claims.write().await;
        let before = claims.len();
        claims.retain(|c| c.id != id);
        if claims.len() == before {
            return Err(not_found("Claim"));
        }
        Ok(())
    }

    async fn get_user_claims(&self, user_id: &str, query: &UserClaimsQuery) -> Result<ClaimPage> {
        query.validate()?;
        self.receive(
            "GET",
            format!("/claims/user/{}", user_id),
            query.to_query_pairs(),
        )
        .await?;
        self.wait_turn().await;

        let matching: Vec<Claim> = self
            .claims
            .read()
            .await
            .iter()
            .filter(|c| c.user_id == user_id)
            .filter(|c| query.status.map_or(true, |s| c.status == s))
            .cloned()
            .collect();
        let (claims, total) = paginate(matching, query.page, query.limit);
        Ok(ClaimPage { claims, total })
    }

    async fn get_coverage_limits(&self, user_id: &str) -> Result<CoverageLimits> {
        self.receive(
            "GET",
            format!("/claims/coverage/{}/limits", user_id),
            Vec::new(),
        )
        .await?;
        self.coverage
            .read()
            .await
            .get(user_id)
            .cloned()
            .ok_or_else(|| not_found("Coverage limits"))
    }
}

#[async_trait]
impl PaymentsApi for MockBackend {
    async fn get_user_payments(&self, user_id: &str, query: &PaymentQuery) -> Result<PaymentPage> {
        query.validate()?;
        self.receive(
            "GET",
            format!("/payments/user/{}", user_id),
            query.to_query_pairs(),
        )
        .await?;

        let matching: Vec<Payment> = self
            .payments
            .read()
            .await
            .iter()
            .filter(|p| p.user_id == user_id)
            .filter(|p| query.status.map_or(true, |s| p.status == s))
            .cloned()
            .collect();
        let (payments, total) = paginate(matching, query.page, query.limit);
        Ok(PaymentPage { payments, total })
    }

    async fn get_payment_by_id(&self, id: &str) -> Result<Payment> {
        self.receive("GET", format!("/payments/{}", id), Vec::new())
            .await?;
        self.payments
            .read()
            .await
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| not_found("Payment"))
    }
}

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

fn at_midnight(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

#[allow(clippy::too_many_arguments)]
fn sample_claim(
    id: &str,
    user_id: &str,
    claim_type: ClaimType,
    provider: &str,
    service_date: NaiveDate,
    amount: i64,
    status: ClaimStatus,
    approved: i64,
) -> Claim {
    Claim {
        id: id.to_string(),
        user_id: user_id.to_string(),
        plan_id: "plan-gold".to_string(),
        coverage_id: format!("cov-{}", user_id),
        claim_type,
        provider_name: provider.to_string(),
        provider_location: "Nairobi".to_string(),
        service_date,
        submission_date: at_midnight(service_date),
        processed_date: match status {
            ClaimStatus::Pending => None,
            _ => Some(at_midnight(service_date)),
        },
        amount_claimed: Decimal::from(amount),
        amount_approved: Decimal::from(approved),
        diagnosis: "Consultation".to_string(),
        treatment: String::new(),
        notes: String::new(),
        documents: Vec::new(),
        status,
    }
}

fn sample_claims() -> Vec<Claim> {
    vec![
        sample_claim(
            "claim-1",
            "member-1",
            ClaimType::Outpatient,
            "Aga Khan Hospital",
            day(2024, 3, 4),
            4_500,
            ClaimStatus::Pending,
            0,
        ),
        sample_claim(
            "claim-2",
            "member-1",
            ClaimType::Inpatient,
            "Kenyatta National Hospital",
            day(2024, 2, 11),
            85_000,
            ClaimStatus::Approved,
            80_000,
        ),
        sample_claim(
            "claim-3",
            "member-1",
            ClaimType::Optical,
            "Eye Care Centre",
            day(2024, 1, 20),
            12_000,
            ClaimStatus::Paid,
            12_000,
        ),
        sample_claim(
            "claim-4",
            "member-1",
            ClaimType::Dental,
            "Smile Dental Clinic",
            day(2023, 12, 2),
            7_800,
            ClaimStatus::Rejected,
            0,
        ),
        sample_claim(
            "claim-5",
            "member-2",
            ClaimType::Maternity,
            "Nairobi Women's Hospital",
            day(2024, 4, 18),
            150_000,
            ClaimStatus::Processing,
            0,
        ),
    ]
}

fn sample_coverage(user_id: &str) -> CoverageLimits {
    CoverageLimits {
        user_id: user_id.to_string(),
        inpatient: CategoryLimit::new(Decimal::from(500_000), Decimal::from(420_000)),
        outpatient: CategoryLimit::new(Decimal::from(100_000), Decimal::from(95_500)),
        optical: CategoryLimit::new(Decimal::from(20_000), Decimal::from(8_000)),
        maternity: CategoryLimit::new(Decimal::from(200_000), Decimal::from(200_000)),
    }
}

fn sample_payment(
    id: &str,
    amount: i64,
    date: NaiveDate,
    status: PaymentStatus,
    method: &str,
    mpesa_code: Option<&str>,
) -> Payment {
    Payment {
        id: id.to_string(),
        user_id: "member-1".to_string(),
        amount: Decimal::from(amount),
        date: at_midnight(date),
        status,
        method: method.to_string(),
        plan: "Gold Family Cover".to_string(),
        reference: format!("REF-{}", id.to_ascii_uppercase()),
        mpesa_code: mpesa_code.map(str::to_string),
    }
}

fn sample_payments() -> Vec<Payment> {
    vec![
        sample_payment(
            "pay-1",
            2_500,
            day(2024, 1, 5),
            PaymentStatus::Completed,
            "mpesa",
            Some("QJK4XT2B9L"),
        ),
        sample_payment(
            "pay-2",
            2_500,
            day(2024, 2, 5),
            PaymentStatus::Completed,
            "card",
            None,
        ),
        sample_payment(
            "pay-3",
            2_500,
            day(2024, 3, 5),
            PaymentStatus::Failed,
            "mpesa",
            Some("QKL7YU3C1M"),
        ),
    ]
}
