//! Payment history filtering and sorting.
//!
//! Runs locally over an already-fetched page.

use std::cmp::Ordering;

use chrono::NaiveDate;
use memberclaims_client::{Payment, PaymentStatus};

use super::format::{format_amount, format_timestamp};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    Date,
    Amount,
    Status,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Ascending,
    #[default]
    Descending,
}

/// Local payment filter. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaymentFilter {
    pub status: Option<PaymentStatus>,
    /// Exact method, case-insensitive.
    pub method: Option<String>,
    /// Substring of reference, plan or M-Pesa code, case-insensitive.
    pub search: Option<String>,
    /// Inclusive, by payment date (UTC).
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl PaymentFilter {
    pub fn with_status(mut self, status: PaymentStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn between(mut self, from: NaiveDate, to: NaiveDate) -> Self {
        self.from = Some(from);
        self.to = Some(to);
        self
    }

    pub fn matches(&self, payment: &Payment) -> bool {
        if self.status.is_some_and(|s| payment.status != s) {
            return false;
        }
        if let Some(method) = self.method.as_deref().filter(|m| !m.trim().is_empty()) {
            if !payment.method.eq_ignore_ascii_case(method.trim()) {
                return false;
            }
        }
        if let Some(needle) = self.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            let needle = needle.to_lowercase();
            let hit = [
                payment.reference.as_str(),
                payment.plan.as_str(),
                payment.mpesa_code.as_deref().unwrap_or(""),
            ]
            .iter()
            .any(|field| field.to_lowercase().contains(&needle));
            if !hit {
                return false;
            }
        }
        let date = payment.date.date_naive();
        if self.from.is_some_and(|from| date < from) {
            return false;
        }
        if self.to.is_some_and(|to| date > to) {
            return false;
        }
        true
    }
}

fn compare(a: &Payment, b: &Payment, key: SortKey) -> Ordering {
    match key {
        SortKey::Date => a.date.cmp(&b.date),
        SortKey::Amount => a.amount.cmp(&b.amount),
        SortKey::Status => a.status.cmp(&b.status),
    }
}

/// Filter then stable-sort payments. Ties keep their fetched order in both
/// directions.
pub fn filter_and_sort(
    payments: &[Payment],
    filter: &PaymentFilter,
    key: SortKey,
    order: SortOrder,
) -> Vec<Payment> {
    let mut selected: Vec<Payment> = payments
        .iter()
        .filter(|p| filter.matches(p))
        .cloned()
        .collect();
    selected.sort_by(|a, b| match order {
        SortOrder::Ascending => compare(a, b, key),
        SortOrder::Descending => compare(b, a, key),
    });
    selected
}

/// Display-ready payment row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentRow {
    pub id: String,
    pub date: String,
    pub amount: String,
    pub status: PaymentStatus,
    pub method: String,
    pub reference: String,
    pub mpesa_code: String,
}

impl PaymentRow {
    pub fn new(payment: &Payment, currency: &str) -> Self {
        Self {
            id: payment.id.clone(),
            date: format_timestamp(payment.date),
            amount: format_amount(payment.amount, currency),
            status: payment.status,
            method: payment.method.clone(),
            reference: payment.reference.clone(),
            mpesa_code: payment.mpesa_code.clone().unwrap_or_default(),
        }
    }
}
