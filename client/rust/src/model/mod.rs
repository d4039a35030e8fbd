//! Wire data model.

mod claim;
mod coverage;
mod payment;

pub use claim::{Claim, ClaimPage, ClaimStatus, ClaimType, ClaimUpdate, NewClaim, StatusUpdate};
pub use coverage::{CategoryLimit, CoverageLimits};
pub use payment::{Payment, PaymentPage, PaymentStatus};
