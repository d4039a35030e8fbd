//! Claims browser: superseded responses and recovery.

use std::sync::Arc;
use std::time::Duration;

use memberclaims::clients::mock::MockFailure;
use memberclaims::LoadResult;
use memberclaims_client::{ClaimQuery, ClaimStatus};

use crate::common::{browser, sample_backend};

#[tokio::test]
async fn test_slow_old_response_does_not_overwrite_newer() {
    let backend = sample_backend();
    let browser = Arc::new(browser(&backend));
    backend.push_delay(Duration::from_millis(200)).await;

    let slow = {
        let browser = browser.clone();
        tokio::spawn(async move {
            browser
                .load(ClaimQuery::default().with_status(ClaimStatus::Pending))
                .await
        })
    };
    // Let the first load reach the backend before superseding it.
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(browser.is_loading().await);

    let fast = browser
        .load(ClaimQuery::default().with_status(ClaimStatus::Paid))
        .await;

    assert_eq!(fast, LoadResult::Applied);
    assert_eq!(slow.await.unwrap(), LoadResult::Superseded);

    let state = browser.snapshot().await;
    assert!(!state.loading);
    assert_eq!(state.query.status, Some(ClaimStatus::Paid));
    let table = state.table.unwrap();
    assert_eq!(table.rows().len(), 1);
    assert_eq!(table.rows()[0].id, "claim-3");
}

#[tokio::test]
async fn test_only_last_of_burst_applies() {
    let backend = sample_backend();
    let browser = browser(&backend);
    for ms in [250, 200, 150, 100, 50] {
        backend.push_delay(Duration::from_millis(ms)).await;
    }

    let results = futures::future::join_all(
        (1..=5).map(|page| browser.load(ClaimQuery::new(page, 1))),
    )
    .await;

    assert_eq!(results[4], LoadResult::Applied);
    assert!(results[..4].iter().all(|r| *r == LoadResult::Superseded));
    let state = browser.snapshot().await;
    assert_eq!(state.query.page, 5);
    assert_eq!(state.table.unwrap().rows()[0].id, "claim-5");
}

#[tokio::test]
async fn test_loading_until_latest_returns() {
    let backend = sample_backend();
    let browser = Arc::new(browser(&backend));
    backend.push_delay(Duration::from_millis(10)).await;
    backend.push_delay(Duration::from_millis(200)).await;

    let first = {
        let browser = browser.clone();
        tokio::spawn(async move { browser.load(ClaimQuery::new(1, 2)).await })
    };
    tokio::time::sleep(Duration::from_millis(5)).await;
    let second = {
        let browser = browser.clone();
        tokio::spawn(async move { browser.load(ClaimQuery::new(2, 2)).await })
    };

    assert_eq!(first.await.unwrap(), LoadResult::Superseded);
    assert!(browser.is_loading().await);
    assert!(browser.snapshot().await.table.is_none());

    assert_eq!(second.await.unwrap(), LoadResult::Applied);
    let state = browser.snapshot().await;
    assert!(!state.loading);
    assert_eq!(state.table.unwrap().pagination.page, 2);
}

#[tokio::test]
async fn test_try_again_after_failure() {
    let backend = sample_backend();
    let browser = browser(&backend);
    backend
        .fail_with(MockFailure::Server(502, String::new()))
        .await;

    let failed = browser.load(ClaimQuery::default()).await;
    let LoadResult::Failed(failure) = failed else {
        panic!("expected failure, got {:?}", failed);
    };
    assert!(failure.is_retryable());
    assert_eq!(failure.message, "Failed to fetch claims");

    backend.recover().await;
    assert_eq!(browser.retry().await, LoadResult::Applied);
    let state = browser.snapshot().await;
    assert!(state.error.is_none());
    assert_eq!(state.table.unwrap().rows().len(), 5);
}
