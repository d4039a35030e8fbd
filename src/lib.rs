//! Memberclaims - member claims dashboard data layer
//!
//! Services over the claims, coverage and payments backend that settle
//! every call into a success-or-failure outcome, plus the view models the
//! dashboard renders from them.

pub mod browse;
pub mod clients;
pub mod config;
pub mod services;
pub mod utils;
pub mod views;

pub use browse::{ClaimsBrowser, LoadResult};
pub use services::{ClaimsService, Failure, FailureKind, Outcome, PaymentsService};
