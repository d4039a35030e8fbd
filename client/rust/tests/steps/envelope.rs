//! Envelope decoding step definitions.

use cucumber::{given, then, when, World};
use memberclaims_client::envelope::decode;
use memberclaims_client::{ClaimPage, ClientError};
use serde_json::json;

/// Test context for envelope scenarios.
#[derive(Debug, World)]
#[world(init = Self::new)]
pub struct EnvelopeWorld {
    status: u16,
    body: String,
    result: Option<Result<ClaimPage, ClientError>>,
}

impl EnvelopeWorld {
    fn new() -> Self {
        Self {
            status: 200,
            body: String::new(),
            result: None,
        }
    }

    fn error(&self) -> &ClientError {
        match &self.result {
            Some(Err(e)) => e,
            other => panic!("expected an error, got {:?}", other),
        }
    }
}

fn claim_json(n: usize) -> serde_json::Value {
    json!({
        "id": format!("c-{}", n),
        "userId": "u-1",
        "planId": "p-1",
        "type": "outpatient",
        "providerName": "City Clinic",
        "serviceDate": "2024-04-01",
        "submissionDate": "2024-04-02T10:00:00Z",
        "amountClaimed": 1000 + n,
        "status": "pending"
    })
}

// --- Given steps ---

#[given(expr = "the backend answers {int} with a page of {int} claims")]
async fn given_page(world: &mut EnvelopeWorld, status: u16, count: usize) {
    let claims: Vec<_> = (0..count).map(claim_json).collect();
    world.status = status;
    world.body = json!({
        "success": true,
        "data": { "claims": claims, "total": count }
    })
    .to_string();
}

#[given(expr = "the backend answers {int} with success false and message {string}")]
async fn given_failure_with_message(world: &mut EnvelopeWorld, status: u16, message: String) {
    world.status = status;
    world.body = json!({ "success": false, "message": message }).to_string();
}

#[given(expr = "the backend answers {int} with success false and no message")]
async fn given_failure_without_message(world: &mut EnvelopeWorld, status: u16) {
    world.status = status;
    world.body = json!({ "success": false }).to_string();
}

#[given(expr = "the backend answers {int} with body {string}")]
async fn given_raw_body(world: &mut EnvelopeWorld, status: u16, body: String) {
    world.status = status;
    world.body = body;
}

// --- When steps ---

#[when("the claims page is decoded")]
async fn when_decoded(world: &mut EnvelopeWorld) {
    world.result = Some(decode::<ClaimPage>(world.status, &world.body));
}

// --- Then steps ---

#[then(expr = "decoding succeeds with {int} claims")]
async fn then_succeeds(world: &mut EnvelopeWorld, count: usize) {
    match &world.result {
        Some(Ok(page)) => {
            assert_eq!(page.claims.len(), count);
            assert_eq!(page.total, count as u64);
        }
        other => panic!("expected a page, got {:?}", other),
    }
}

#[then("decoding fails as rejected")]
async fn then_rejected(world: &mut EnvelopeWorld) {
    assert!(matches!(world.error(), ClientError::Rejected(_)));
}

#[then("decoding fails as undecodable")]
async fn then_undecodable(world: &mut EnvelopeWorld) {
    assert!(matches!(world.error(), ClientError::Decode(_)));
}

#[then(expr = "decoding fails with status {int}")]
async fn then_status(world: &mut EnvelopeWorld, status: u16) {
    assert_eq!(world.error().status(), Some(status));
}

#[then(expr = "the decoded error message is {string}")]
async fn then_message(world: &mut EnvelopeWorld, message: String) {
    assert_eq!(world.error().message(), message);
}

#[then("the decoded error message is not empty")]
async fn then_message_not_empty(world: &mut EnvelopeWorld) {
    assert!(!world.error().message().trim().is_empty());
}
