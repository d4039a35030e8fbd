//! List queries and their query-string encoding.
//!
//! `page` and `limit` are always sent exactly as given; optional filters
//! are omitted when unset.

use chrono::NaiveDate;

use crate::convert::DATE_FORMAT;
use crate::error::{ClientError, Result};
use crate::model::{ClaimStatus, ClaimType, PaymentStatus};

/// Default page number (1-based).
pub const DEFAULT_PAGE: u32 = 1;
/// Default page size.
pub const DEFAULT_LIMIT: u32 = 10;

/// Query-string pairs in request order.
pub type QueryPairs = Vec<(&'static str, String)>;

fn check_paging(page: u32, limit: u32) -> Result<()> {
    if page == 0 {
        return Err(ClientError::InvalidArgument(
            "page must be at least 1".to_string(),
        ));
    }
    if limit == 0 {
        return Err(ClientError::InvalidArgument(
            "limit must be at least 1".to_string(),
        ));
    }
    Ok(())
}

/// Filter for the admin claims list (`GET /claims`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimQuery {
    pub page: u32,
    pub limit: u32,
    pub claim_type: Option<ClaimType>,
    pub status: Option<ClaimStatus>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl Default for ClaimQuery {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
            claim_type: None,
            status: None,
            start_date: None,
            end_date: None,
        }
    }
}

impl ClaimQuery {
    pub fn new(page: u32, limit: u32) -> Self {
        Self {
            page,
            limit,
            ..Default::default()
        }
    }

    pub fn with_type(mut self, claim_type: ClaimType) -> Self {
        self.claim_type = Some(claim_type);
        self
    }

    pub fn with_status(mut self, status: ClaimStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Restrict to service dates within `[start, end]`.
    pub fn between(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.start_date = Some(start);
        self.end_date = Some(end);
        self
    }

    /// Same filter, different page.
    pub fn at_page(&self, page: u32) -> Self {
        Self {
            page,
            ..self.clone()
        }
    }

    pub fn validate(&self) -> Result<()> {
        check_paging(self.page, self.limit)?;
        if let (Some(start), Some(end)) = (self.start_date, self.end_date) {
            if start > end {
                return Err(ClientError::InvalidArgument(format!(
                    "startDate {} is after endDate {}",
                    start, end
                )));
            }
        }
        Ok(())
    }

    pub fn to_query_pairs(&self) -> QueryPairs {
        let mut pairs = vec![
            ("page", self.page.to_string()),
            ("limit", self.limit.to_string()),
        ];
        if let Some(t) = self.claim_type {
            pairs.push(("type", t.as_str().to_string()));
        }
        if let Some(s) = self.status {
            pairs.push(("status", s.as_str().to_string()));
        }
        if let Some(d) = self.start_date {
            pairs.push(("startDate", d.format(DATE_FORMAT).to_string()));
        }
        if let Some(d) = self.end_date {
            pairs.push(("endDate", d.format(DATE_FORMAT).to_string()));
        }
        pairs
    }
}

/// Filter for a member's own claims (`GET /claims/user/:id`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserClaimsQuery {
    pub page: u32,
    pub limit: u32,
    pub status: Option<ClaimStatus>,
}

impl Default for UserClaimsQuery {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
            status: None,
        }
    }
}

impl UserClaimsQuery {
    pub fn new(page: u32, limit: u32) -> Self {
        Self {
            page,
            limit,
            status: None,
        }
    }

    pub fn with_status(mut self, status: ClaimStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn validate(&self) -> Result<()> {
        check_paging(self.page, self.limit)
    }

    pub fn to_query_pairs(&self) -> QueryPairs {
        let mut pairs = vec![
            ("page", self.page.to_string()),
            ("limit", self.limit.to_string()),
        ];
        if let Some(s) = self.status {
            pairs.push(("status", s.as_str().to_string()));
        }
        pairs
    }
}

/// Filter for a member's payments (`GET /payments/user/:id`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentQuery {
    pub page: u32,
    pub limit: u32,
    pub status: Option<PaymentStatus>,
}

impl Default for PaymentQuery {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
            status: None,
        }
    }
}

impl PaymentQuery {
    pub fn new(page: u32, limit: u32) -> Self {
        Self {
            page,
            limit,
            status: None,
        }
    }

    pub fn with_status(mut self, status: PaymentStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn validate(&self) -> Result<()> {
        check_paging(self.page, self.limit)
    }

    pub fn to_query_pairs(&self) -> QueryPairs {
        let mut pairs = vec![
            ("page", self.page.to_string()),
            ("limit", self.limit.to_string()),
        ];
        if let Some(s) = self.status {
            pairs.push(("status", s.as_str().to_string()));
        }
        pairs
    }
}
