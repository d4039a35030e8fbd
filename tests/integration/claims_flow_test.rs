//! Claims lifecycle through the service layer.

use rust_decimal_macros::dec;
use tokio_test::{assert_err, assert_ok};

use memberclaims::clients::mock::MockFailure;
use memberclaims::views::ClaimsTable;
use memberclaims::FailureKind;
use memberclaims_client::{
    CategoryLimit, ClaimQuery, ClaimStatus, ClaimType, CoverageLimits, StatusUpdate,
    UserClaimsQuery,
};

use crate::common::{claims_service, outpatient_submission, sample_backend};

#[tokio::test]
async fn test_submit_review_and_pay() {
    let backend = sample_backend();
    let service = claims_service(&backend);

    let submitted = assert_ok!(service.create_claim(&outpatient_submission()).await);
    assert_eq!(submitted.status, ClaimStatus::Pending);
    assert_eq!(submitted.user_id, "member-1");
    assert_eq!(submitted.documents, vec!["receipts/mp-shah-0612.pdf"]);

    let processing = assert_ok!(service.review_claim(&submitted, &StatusUpdate::processing()).await);
    assert_eq!(processing.status, ClaimStatus::Processing);
    assert_eq!(processing.approved_amount(), None);

    let approved = assert_ok!(
        service
            .review_claim(
                &processing,
                &StatusUpdate::approve(dec!(6000)).with_notes("co-pay deducted")
            )
            .await
    );
    assert_eq!(approved.approved_amount(), Some(dec!(6000)));
    assert_eq!(approved.notes, "co-pay deducted");

    let paid = assert_ok!(
        service
            .review_claim(&approved, &StatusUpdate::new(ClaimStatus::Paid))
            .await
    );
    assert_eq!(paid.status, ClaimStatus::Paid);
    assert_eq!(paid.approved_amount(), Some(dec!(6000)));

    let refused = assert_err!(service.review_claim(&paid, &StatusUpdate::reject()).await);
    assert_eq!(refused.kind, FailureKind::Validation);
    assert_eq!(refused.field.as_deref(), Some("status"));
}

#[tokio::test]
async fn test_same_status_is_refused() {
    let backend = sample_backend();
    let service = claims_service(&backend);
    let pending = assert_ok!(service.get_claim_by_id("claim-1").await);
    backend.clear_calls().await;

    let failure = assert_err!(
        service
            .review_claim(&pending, &StatusUpdate::new(ClaimStatus::Pending))
            .await
    );

    assert_eq!(failure.message, "cannot move claim from pending to pending");
    assert!(backend.calls().await.is_empty());
}

#[tokio::test]
async fn test_repeated_reads_are_identical() {
    let backend = sample_backend();
    let service = claims_service(&backend);

    let first = assert_ok!(service.get_claim_by_id("claim-2").await);
    let second = assert_ok!(service.get_claim_by_id("claim-2").await);

    assert_eq!(first, second);
    assert_eq!(
        backend.calls().await,
        vec!["GET /claims/claim-2", "GET /claims/claim-2"]
    );
}

#[tokio::test]
async fn test_update_then_delete() {
    let backend = sample_backend();
    let service = claims_service(&backend);
    let claim = assert_ok!(service.get_claim_by_id("claim-1").await);

    let mut update = memberclaims_client::NewClaim::from(&claim);
    update.amount_claimed = dec!(5100);
    update.treatment = "Antimalarials".to_string();
    let updated = assert_ok!(service.update_claim(&claim.id, &update).await);
    assert_eq!(updated.amount_claimed, dec!(5100));
    assert_eq!(updated.status, ClaimStatus::Pending);

    assert_ok!(service.delete_claim(&claim.id).await);
    let gone = assert_err!(service.get_claim_by_id(&claim.id).await);
    assert!(gone.is_not_found());
}

#[tokio::test]
async fn test_invalid_update_not_sent() {
    let backend = sample_backend();
    let service = claims_service(&backend);
    let claim = assert_ok!(service.get_claim_by_id("claim-1").await);
    backend.clear_calls().await;

    let mut update = memberclaims_client::NewClaim::from(&claim);
    update.provider_name = "  ".to_string();
    let failure = assert_err!(service.update_claim(&claim.id, &update).await);

    assert_eq!(failure.field.as_deref(), Some("providerName"));
    assert_eq!(failure.message, "providerName is required");
    assert!(backend.calls().await.is_empty());
}

#[tokio::test]
async fn test_admin_list_sends_exact_paging() {
    let backend = sample_backend();
    let service = claims_service(&backend);

    let query = ClaimQuery::new(3, 1).with_type(ClaimType::Optical);
    let page = assert_ok!(service.get_all_claims(&query).await);

    assert_eq!(page.total, 1);
    assert!(page.claims.is_empty());
    assert_eq!(
        backend.calls().await,
        vec!["GET /claims?page=3&limit=1&type=optical"]
    );
}

#[tokio::test]
async fn test_member_claims_render_one_row_each() {
    let backend = sample_backend();
    let service = claims_service(&backend);

    let query = UserClaimsQuery::new(1, 10);
    let page = assert_ok!(service.get_user_claims("member-1", &query).await);
    let table = ClaimsTable::from_page(&page, &query, "KES");

    assert_eq!(table.rows().len(), 4);
    assert_eq!(table.rows()[1].amount_approved.as_deref(), Some("KES 80,000.00"));

    let none = assert_ok!(service.get_user_claims("member-404", &query).await);
    let empty = ClaimsTable::from_page(&none, &query, "KES");
    assert_eq!(empty.empty_message(), Some("No claims found"));
}

#[tokio::test]
async fn test_coverage_limits() {
    let backend = sample_backend();
    let service = claims_service(&backend);

    let limits = assert_ok!(service.get_coverage_limits("member-1").await);
    let optical = limits.get(ClaimType::Optical).unwrap();
    assert_eq!(optical.used(), dec!(12000));
    assert_eq!(optical.percent_used(), 60);
    assert!(limits.get(ClaimType::Dental).is_none());

    let missing = assert_err!(service.get_coverage_limits("member-2").await);
    assert_eq!(missing.message, "Coverage limits not found");

    backend
        .set_coverage(CoverageLimits {
            user_id: "member-2".to_string(),
            maternity: CategoryLimit::new(dec!(200000), dec!(0)),
            ..CoverageLimits::default()
        })
        .await;
    let limits = assert_ok!(service.get_coverage_limits("member-2").await);
    assert!(limits.maternity.is_exhausted());
    assert_eq!(limits.maternity.percent_used(), 100);
}

#[tokio::test]
async fn test_every_failure_has_message() {
    let backend = sample_backend();
    let service = claims_service(&backend);

    for failure in [
        MockFailure::Server(500, String::new()),
        MockFailure::Rejected(String::new()),
        MockFailure::Garbled,
    ] {
        backend.fail_with(failure).await;
        let f = assert_err!(service.get_user_claims("member-1", &UserClaimsQuery::default()).await);
        assert_eq!(f.kind, FailureKind::Server);
        assert!(f.message.starts_with("Failed to fetch user claims"));
    }
}

#[tokio::test]
async fn test_unreachable_backend_is_transport_failure() {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let config = memberclaims::config::ApiConfig {
        base_url: format!("http://127.0.0.1:{}/api", port),
        timeout_secs: 2,
        token: None,
    };
    let client = memberclaims::clients::connect(&config).unwrap();
    let service = memberclaims::ClaimsService::new(std::sync::Arc::new(client));

    let failure = assert_err!(service.get_all_claims(&ClaimQuery::default()).await);

    assert_eq!(failure.kind, FailureKind::Transport);
    assert_eq!(failure.status, None);
    assert_eq!(failure.message, "Failed to fetch claims: unable to reach the server");
}

#[tokio::test]
async fn test_silent_backend_is_timeout_failure() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    // Accept connections and never answer.
    let server = tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });
    let client = memberclaims_client::ApiClient::new(
        memberclaims_client::ApiClientConfig::default()
            .with_base_url(format!("http://{}/api", addr))
            .with_timeout(std::time::Duration::from_millis(200)),
    )
    .unwrap();
    let service = memberclaims::ClaimsService::new(std::sync::Arc::new(client));

    let failure = assert_err!(service.get_all_claims(&ClaimQuery::default()).await);
    server.abort();

    assert_eq!(failure.kind, FailureKind::Transport);
    assert!(failure.is_retryable());
    assert_eq!(
        failure.message,
        "Failed to fetch claims: the server took too long to respond"
    );
}
