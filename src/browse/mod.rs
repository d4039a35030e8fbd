//! Claims list browser.
//!
//! Tracks the current filter, the loading flag and the last failure, and
//! renders each fetched page into a [`ClaimsTable`]. Every load takes a
//! ticket from the [`RequestSequencer`]; a response is applied only while
//! its ticket is still the latest, so a slow response for an old filter
//! never replaces a newer one. Superseded requests are not aborted.

mod sequencer;

pub use sequencer::{RequestSequencer, Ticket};

use memberclaims_client::{ClaimQuery, ClaimStatus, ClaimType};
use tokio::sync::RwLock;
use tracing::debug;

use crate::services::{ClaimsService, Failure};
use crate::views::ClaimsTable;

/// Observable browser state.
#[derive(Debug, Clone)]
pub struct BrowserState {
    pub query: ClaimQuery,
    /// Last successfully loaded table. Kept when a later load fails.
    pub table: Option<ClaimsTable>,
    pub loading: bool,
    /// Failure of the latest load, cleared by the next success.
    pub error: Option<Failure>,
}

/// What happened to one load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadResult {
    Applied,
    Failed(Failure),
    /// A newer load was issued before this one returned; discarded.
    Superseded,
}

pub struct ClaimsBrowser {
    service: ClaimsService,
    sequencer: RequestSequencer,
    state: RwLock<BrowserState>,
    currency: String,
}

impl ClaimsBrowser {
    pub fn new(service: ClaimsService, currency: impl Into<String>) -> Self {
        Self {
            service,
            sequencer: RequestSequencer::new(),
            state: RwLock::new(BrowserState {
                query: ClaimQuery::default(),
                table: None,
                loading: false,
                error: None,
            }),
            currency: currency.into(),
        }
    }

    /// Load a page for `query`, superseding any load still in flight.
    pub async fn load(&self, query: ClaimQuery) -> LoadResult {
        let ticket = {
            let mut state = self.state.write().await;
            state.query = query.clone();
            state.loading = true;
            self.sequencer.issue()
        };
        debug!(ticket = ticket.value(), page = query.page, "loading claims");

        let outcome = self.service.get_all_claims(&query).await;

        let mut state = self.state.write().await;
        if !self.sequencer.is_current(ticket) {
            debug!(ticket = ticket.value(), "discarding superseded claims response");
            return LoadResult::Superseded;
        }
        state.loading = false;
        match outcome {
            Ok(page) => {
                state.table = Some(ClaimsTable::from_page(&page, &query, &self.currency));
                state.error = None;
                LoadResult::Applied
            }
            Err(failure) => {
                state.error = Some(failure.clone());
                LoadResult::Failed(failure)
            }
        }
    }

    /// Re-issue the current filter ("Try Again").
    pub async fn retry(&self) -> LoadResult {
        let query = self.state.read().await.query.clone();
        self.load(query).await
    }

    /// Same filter on another page.
    pub async fn go_to_page(&self, page: u32) -> LoadResult {
        let query = self.state.read().await.query.at_page(page);
        self.load(query).await
    }

    /// Advance a page; `None` when already on the last page.
    pub async fn next_page(&self) -> Option<LoadResult> {
        let (query, has_next) = {
            let state = self.state.read().await;
            let has_next = state
                .table
                .as_ref()
                .is_some_and(|t| t.pagination.has_next);
            (state.query.clone(), has_next)
        };
        if !has_next {
            return None;
        }
        Some(self.load(query.at_page(query.page + 1)).await)
    }

    /// Go back a page; `None` on the first page.
    pub async fn previous_page(&self) -> Option<LoadResult> {
        let query = self.state.read().await.query.clone();
        if query.page <= 1 {
            return None;
        }
        Some(self.load(query.at_page(query.page - 1)).await)
    }

    /// Change the status filter and return to the first page.
    pub async fn filter_status(&self, status: Option<ClaimStatus>) -> LoadResult {
        let mut query = self.state.read().await.query.at_page(1);
        query.status = status;
        self.load(query).await
    }

    /// Change the type filter and return to the first page.
    pub async fn filter_type(&self, claim_type: Option<ClaimType>) -> LoadResult {
        let mut query = self.state.read().await.query.at_page(1);
        query.claim_type = claim_type;
        self.load(query).await
    }

    pub async fn snapshot(&self) -> BrowserState {
        self.state.read().await.clone()
    }

    pub async fn is_loading(&self) -> bool {
        self.state.read().await.loading
    }
}
