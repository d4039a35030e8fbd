//! Client-side validation run before a request is sent.
//!
//! # Example
//!
//! ```rust,ignore
//! use memberclaims_client::validation::{validate_new_claim, validate_status_update};
//!
//! validate_new_claim(&claim, today)?;
//! validate_status_update(&StatusUpdate::approve(amount))?;
//! ```

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::error::ValidationError;
use crate::model::{ClaimStatus, NewClaim, StatusUpdate};

/// Require that a value is positive (greater than zero).
pub fn require_positive<T: PartialOrd + Default>(
    value: T,
    field_name: &str,
) -> Result<(), ValidationError> {
    if value <= T::default() {
        return Err(ValidationError::new(
            field_name,
            format!("{} must be greater than zero", field_name),
        ));
    }
    Ok(())
}

/// Require that a string is not blank.
pub fn require_not_empty_str(value: &str, field_name: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new(
            field_name,
            format!("{} is required", field_name),
        ));
    }
    Ok(())
}

/// Require that a date is not after `today`.
pub fn require_not_future(
    date: NaiveDate,
    today: NaiveDate,
    field_name: &str,
) -> Result<(), ValidationError> {
    if date > today {
        return Err(ValidationError::new(
            field_name,
            format!("{} cannot be in the future", field_name),
        ));
    }
    Ok(())
}

/// Validate a claim submission or full update.
pub fn validate_new_claim(claim: &NewClaim, today: NaiveDate) -> Result<(), ValidationError> {
    require_not_empty_str(&claim.plan_id, "planId")?;
    require_not_empty_str(&claim.provider_name, "providerName")?;
    require_not_empty_str(&claim.diagnosis, "diagnosis")?;
    require_positive(claim.amount_claimed, "amountClaimed")?;
    require_not_future(claim.service_date, today, "serviceDate")?;
    Ok(())
}

/// Validate an admin status update.
///
/// An approval must carry an approved amount greater than zero.
pub fn validate_status_update(update: &StatusUpdate) -> Result<(), ValidationError> {
    if update.status == ClaimStatus::Approved {
        require_positive(
            update.amount_approved.unwrap_or(Decimal::ZERO),
            "amountApproved",
        )?;
    }
    Ok(())
}

/// Validate a review transition given the claim's current status.
pub fn validate_transition(
    current: ClaimStatus,
    next: ClaimStatus,
) -> Result<(), ValidationError> {
    if current.is_terminal() {
        return Err(ValidationError::new(
            "status",
            format!("claim is already {} and cannot be changed", current),
        ));
    }
    if !current.can_transition_to(next) {
        return Err(ValidationError::new(
            "status",
            format!("cannot move claim from {} to {}", current, next),
        ));
    }
    Ok(())
}
