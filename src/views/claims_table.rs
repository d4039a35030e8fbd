//! Claims table view model.
//!
//! One row per claim in the fetched page, or the empty state when the page
//! has none. Pagination is derived from the backend's total.

use memberclaims_client::{Claim, ClaimPage, ClaimQuery, ClaimStatus, UserClaimsQuery};

use super::format::{format_amount, format_date};

/// Shown in place of rows when a page has no claims.
pub const EMPTY_MESSAGE: &str = "No claims found";

/// Page position of a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paging {
    pub page: u32,
    pub limit: u32,
}

impl From<&ClaimQuery> for Paging {
    fn from(query: &ClaimQuery) -> Self {
        Self {
            page: query.page,
            limit: query.limit,
        }
    }
}

impl From<&UserClaimsQuery> for Paging {
    fn from(query: &UserClaimsQuery) -> Self {
        Self {
            page: query.page,
            limit: query.limit,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub total_pages: u64,
    pub has_next: bool,
    pub has_previous: bool,
}

impl Pagination {
    pub fn new(paging: Paging, total: u64) -> Self {
        let limit = u64::from(paging.limit.max(1));
        let total_pages = total.div_ceil(limit).max(1);
        let page = u64::from(paging.page.max(1));
        Self {
            page: paging.page,
            limit: paging.limit,
            total,
            total_pages,
            has_next: page < total_pages,
            has_previous: page > 1,
        }
    }
}

/// Display-ready claim row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimRow {
    pub id: String,
    pub member: String,
    pub claim_type: &'static str,
    pub provider: String,
    pub service_date: String,
    pub amount_claimed: String,
    /// Present only for approved or paid claims.
    pub amount_approved: Option<String>,
    pub status: ClaimStatus,
    pub status_label: &'static str,
}

impl ClaimRow {
    pub fn new(claim: &Claim, currency: &str) -> Self {
        Self {
            id: claim.id.clone(),
            member: claim.user_id.clone(),
            claim_type: claim.claim_type.label(),
            provider: claim.provider_name.clone(),
            service_date: format_date(claim.service_date),
            amount_claimed: format_amount(claim.amount_claimed, currency),
            amount_approved: claim
                .approved_amount()
                .map(|amount| format_amount(amount, currency)),
            status: claim.status,
            status_label: claim.status.label(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableBody {
    Rows(Vec<ClaimRow>),
    Empty { message: &'static str },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimsTable {
    pub body: TableBody,
    pub pagination: Pagination,
}

impl ClaimsTable {
    pub fn from_page(page: &ClaimPage, paging: impl Into<Paging>, currency: &str) -> Self {
        let body = if page.claims.is_empty() {
            TableBody::Empty {
                message: EMPTY_MESSAGE,
            }
        } else {
            TableBody::Rows(
                page.claims
                    .iter()
                    .map(|claim| ClaimRow::new(claim, currency))
                    .collect(),
            )
        };
        Self {
            body,
            pagination: Pagination::new(paging.into(), page.total),
        }
    }

    pub fn rows(&self) -> &[ClaimRow] {
        match &self.body {
            TableBody::Rows(rows) => rows,
            TableBody::Empty { .. } => &[],
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self.body, TableBody::Empty { .. })
    }

    pub fn empty_message(&self) -> Option<&'static str> {
        match self.body {
            TableBody::Empty { message } => Some(message),
            TableBody::Rows(_) => None,
        }
    }
}
