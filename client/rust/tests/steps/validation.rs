//! Client-side validation step definitions.

use chrono::{Days, NaiveDate};
use cucumber::{given, then, when, World};
use memberclaims_client::validation::{
    validate_new_claim, validate_status_update, validate_transition,
};
use memberclaims_client::{ClaimStatus, ClaimType, NewClaim, StatusUpdate, ValidationError};
use rust_decimal::Decimal;

/// Test context for validation scenarios.
#[derive(Debug, World)]
#[world(init = Self::new)]
pub struct ValidationWorld {
    update: Option<StatusUpdate>,
    current_status: Option<ClaimStatus>,
    new_claim: Option<NewClaim>,
    today: NaiveDate,
    outcome: Option<Result<(), ValidationError>>,
}

impl ValidationWorld {
    fn new() -> Self {
        Self {
            update: None,
            current_status: None,
            new_claim: None,
            today: NaiveDate::from_ymd_opt(2024, 6, 30).unwrap(),
            outcome: None,
        }
    }

    fn base_claim(&self) -> NewClaim {
        NewClaim::new(
            "p-1",
            ClaimType::Outpatient,
            "City Clinic",
            self.today,
            Decimal::from(2500),
            "Influenza",
        )
    }
}

// --- Given steps ---

#[given(expr = "a status update to {string} with amount {int}")]
async fn given_status_update(world: &mut ValidationWorld, status: String, amount: i64) {
    let status: ClaimStatus = status.parse().unwrap();
    world.update = Some(StatusUpdate::new(status).with_amount(Decimal::from(amount)));
}

#[given(expr = "a claim in status {string}")]
async fn given_claim_status(world: &mut ValidationWorld, status: String) {
    world.current_status = Some(status.parse().unwrap());
}

#[given("a new claim without a diagnosis")]
async fn given_claim_without_diagnosis(world: &mut ValidationWorld) {
    let mut claim = world.base_claim();
    claim.diagnosis = String::new();
    world.new_claim = Some(claim);
}

#[given("a new claim with a service date in the future")]
async fn given_claim_in_future(world: &mut ValidationWorld) {
    let mut claim = world.base_claim();
    claim.service_date = world.today.checked_add_days(Days::new(1)).unwrap();
    world.new_claim = Some(claim);
}

// --- When steps ---

#[when("the status update is validated")]
async fn when_update_validated(world: &mut ValidationWorld) {
    let update = world.update.as_ref().expect("no status update");
    world.outcome = Some(validate_status_update(update));
}

#[when(expr = "it is moved to {string}")]
async fn when_moved(world: &mut ValidationWorld, next: String) {
    let current = world.current_status.expect("no current status");
    let next: ClaimStatus = next.parse().unwrap();
    world.outcome = Some(validate_transition(current, next));
}

#[when("the new claim is validated")]
async fn when_claim_validated(world: &mut ValidationWorld) {
    let claim = world.new_claim.as_ref().expect("no claim");
    world.outcome = Some(validate_new_claim(claim, world.today));
}

// --- Then steps ---

#[then("validation passes")]
async fn then_passes(world: &mut ValidationWorld) {
    assert_eq!(world.outcome, Some(Ok(())));
}

#[then(expr = "validation fails on field {string}")]
async fn then_fails_on(world: &mut ValidationWorld, field: String) {
    match &world.outcome {
        Some(Err(err)) => {
            assert_eq!(err.field, field);
            assert!(!err.message.is_empty());
        }
        other => panic!("expected a validation failure, got {:?}", other),
    }
}
