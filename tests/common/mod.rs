//! Shared utilities for integration tests.
//!
//! Builds services and browsers over the in-memory backend.

use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal_macros::dec;

use memberclaims::clients::mock::MockBackend;
use memberclaims::{ClaimsBrowser, ClaimsService, PaymentsService};
use memberclaims_client::{ClaimType, NewClaim};

/// Fixed "today" for submission date checks.
pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 30).unwrap()
}

pub fn sample_backend() -> Arc<MockBackend> {
    Arc::new(MockBackend::with_sample_data())
}

pub fn claims_service(backend: &Arc<MockBackend>) -> ClaimsService {
    ClaimsService::new(backend.clone()).with_today(today())
}

#[allow(dead_code)]
pub fn payments_service(backend: &Arc<MockBackend>) -> PaymentsService {
    PaymentsService::new(backend.clone())
}

#[allow(dead_code)]
pub fn browser(backend: &Arc<MockBackend>) -> ClaimsBrowser {
    ClaimsBrowser::new(claims_service(backend), "KES")
}

/// A valid outpatient submission for `member-1`.
#[allow(dead_code)]
pub fn outpatient_submission() -> NewClaim {
    NewClaim::new(
        "plan-gold",
        ClaimType::Outpatient,
        "MP Shah Hospital",
        NaiveDate::from_ymd_opt(2024, 6, 12).unwrap(),
        dec!(6200),
        "Bronchitis",
    )
    .with_user("member-1")
    .with_provider_location("Nairobi")
    .with_document("receipts/mp-shah-0612.pdf")
}
