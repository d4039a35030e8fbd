//! Query encoding step definitions.

use cucumber::{given, then, World};
use memberclaims_client::convert::parse_date;
use memberclaims_client::ClaimQuery;

/// Test context for query scenarios.
#[derive(Debug, Default, World)]
pub struct QueryWorld {
    query: ClaimQuery,
}

fn query_string(query: &ClaimQuery) -> String {
    query
        .to_query_pairs()
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&")
}

// --- Given steps ---

#[given(expr = "a claims query for page {int} with limit {int}")]
async fn given_query(world: &mut QueryWorld, page: u32, limit: u32) {
    world.query = ClaimQuery::new(page, limit);
}

#[given(expr = "the query filters type {string}")]
async fn given_type(world: &mut QueryWorld, claim_type: String) {
    world.query = world.query.clone().with_type(claim_type.parse().unwrap());
}

#[given(expr = "the query filters status {string}")]
async fn given_status(world: &mut QueryWorld, status: String) {
    world.query = world.query.clone().with_status(status.parse().unwrap());
}

#[given(expr = "the query covers {string} to {string}")]
async fn given_range(world: &mut QueryWorld, start: String, end: String) {
    world.query = world
        .query
        .clone()
        .between(parse_date(&start).unwrap(), parse_date(&end).unwrap());
}

// --- Then steps ---

#[then(expr = "the query string is {string}")]
async fn then_query_string(world: &mut QueryWorld, expected: String) {
    assert!(world.query.validate().is_ok());
    assert_eq!(query_string(&world.query), expected);
}

#[then("the query is invalid")]
async fn then_invalid(world: &mut QueryWorld) {
    let err = world.query.validate().unwrap_err();
    assert!(err.is_validation());
}
