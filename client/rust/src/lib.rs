//! Typed Rust client for the member claims, coverage and payments API.
//!
//! Every backend response arrives in a `{success, data, message}` envelope;
//! this crate decodes it into `Result<T, ClientError>` so success and
//! failure are exhaustive at compile time.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use memberclaims_client::{ApiClient, ClaimQuery, ClaimsApi, ClaimStatus};
//!
//! async fn example() -> memberclaims_client::Result<()> {
//!     let client = ApiClient::connect("http://localhost:5000/api")?;
//!
//!     let page = client
//!         .get_all_claims(&ClaimQuery::new(1, 20).with_status(ClaimStatus::Pending))
//!         .await?;
//!     println!("{} of {} pending claims", page.claims.len(), page.total);
//!     Ok(())
//! }
//! ```
//!
//! # Mocking for Tests
//!
//! Implement [`ClaimsApi`] / [`PaymentsApi`] to substitute the HTTP client.

pub mod client;
pub mod convert;
pub mod envelope;
pub mod error;
pub mod model;
pub mod query;
pub mod traits;
pub mod validation;

// Re-export main types at crate root
pub use client::{ApiClient, ApiClientConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
pub use envelope::Envelope;
pub use error::{ClientError, Result, ValidationError};
pub use model::{
    CategoryLimit, Claim, ClaimPage, ClaimStatus, ClaimType, ClaimUpdate, CoverageLimits,
    NewClaim, Payment, PaymentPage, PaymentStatus, StatusUpdate,
};
pub use query::{ClaimQuery, PaymentQuery, UserClaimsQuery, DEFAULT_LIMIT, DEFAULT_PAGE};
pub use traits::{ClaimsApi, PaymentsApi};
