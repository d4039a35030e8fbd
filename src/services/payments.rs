//! Payments service.

use std::sync::Arc;

use memberclaims_client::{Payment, PaymentPage, PaymentQuery, PaymentsApi};

use super::{settle, Outcome};

/// Read-only payment history with outcome normalization.
#[derive(Clone)]
pub struct PaymentsService {
    api: Arc<dyn PaymentsApi>,
}

impl PaymentsService {
    pub fn new(api: Arc<dyn PaymentsApi>) -> Self {
        Self { api }
    }

    pub async fn get_user_payments(
        &self,
        user_id: &str,
        query: &PaymentQuery,
    ) -> Outcome<PaymentPage> {
        settle(
            "get_user_payments",
            "Failed to fetch payments",
            self.api.get_user_payments(user_id, query),
        )
        .await
    }

    pub async fn get_payment_by_id(&self, id: &str) -> Outcome<Payment> {
        settle(
            "get_payment_by_id",
            "Failed to fetch payment",
            self.api.get_payment_by_id(id),
        )
        .await
    }
}
