//! Claim records and the payloads that create or change them.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ClientError;

/// Claim category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClaimType {
    Inpatient,
    Outpatient,
    Maternity,
    Optical,
    Dental,
    Accident,
    Emergency,
}

impl ClaimType {
    pub const ALL: [ClaimType; 7] = [
        ClaimType::Inpatient,
        ClaimType::Outpatient,
        ClaimType::Maternity,
        ClaimType::Optical,
        ClaimType::Dental,
        ClaimType::Accident,
        ClaimType::Emergency,
    ];

    /// Wire value.
    pub fn as_str(&self) -> &'static str {
        match self {
            ClaimType::Inpatient => "inpatient",
            ClaimType::Outpatient => "outpatient",
            ClaimType::Maternity => "maternity",
            ClaimType::Optical => "optical",
            ClaimType::Dental => "dental",
            ClaimType::Accident => "accident",
            ClaimType::Emergency => "emergency",
        }
    }

    /// Display label.
    pub fn label(&self) -> &'static str {
        match self {
            ClaimType::Inpatient => "Inpatient",
            ClaimType::Outpatient => "Outpatient",
            ClaimType::Maternity => "Maternity",
            ClaimType::Optical => "Optical",
            ClaimType::Dental => "Dental",
            ClaimType::Accident => "Accident",
            ClaimType::Emergency => "Emergency",
        }
    }
}

impl fmt::Display for ClaimType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClaimType {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        ClaimType::ALL
            .into_iter()
            .find(|t| t.as_str() == lower)
            .ok_or_else(|| ClientError::InvalidArgument(format!("unknown claim type: {}", s)))
    }
}

/// Claim processing status.
///
/// Review transitions: pending -> processing | approved | rejected,
/// processing -> approved | rejected, approved -> paid.
/// Paid and rejected are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClaimStatus {
    Pending,
    Processing,
    Approved,
    Rejected,
    Paid,
}

impl ClaimStatus {
    pub const ALL: [ClaimStatus; 5] = [
        ClaimStatus::Pending,
        ClaimStatus::Processing,
        ClaimStatus::Approved,
        ClaimStatus::Rejected,
        ClaimStatus::Paid,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ClaimStatus::Pending => "pending",
            ClaimStatus::Processing => "processing",
            ClaimStatus::Approved => "approved",
            ClaimStatus::Rejected => "rejected",
            ClaimStatus::Paid => "paid",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ClaimStatus::Pending => "Pending",
            ClaimStatus::Processing => "Processing",
            ClaimStatus::Approved => "Approved",
            ClaimStatus::Rejected => "Rejected",
            ClaimStatus::Paid => "Paid",
        }
    }

    /// No further transition is possible.
    pub fn is_terminal(&self) -> bool {
        matches!(self, ClaimStatus::Paid | ClaimStatus::Rejected)
    }

    /// Whether an admin review may move a claim from `self` to `next`.
    pub fn can_transition_to(&self, next: ClaimStatus) -> bool {
        use ClaimStatus::*;
        matches!(
            (self, next),
            (Pending, Processing)
                | (Pending, Approved)
                | (Pending, Rejected)
                | (Processing, Approved)
                | (Processing, Rejected)
                | (Approved, Paid)
        )
    }
}

impl fmt::Display for ClaimStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClaimStatus {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        ClaimStatus::ALL
            .into_iter()
            .find(|st| st.as_str() == lower)
            .ok_or_else(|| ClientError::InvalidArgument(format!("unknown claim status: {}", s)))
    }
}

/// A member's reimbursement claim as stored by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self", rename_all = "camelCase")]
pub struct Claim {
    pub id: String,
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub plan_id: String,
    #[serde(default)]
    pub coverage_id: String,
    #[serde(rename = "type")]
    pub claim_type: ClaimType,
    #[serde(default)]
    pub provider_name: String,
    #[serde(default)]
    pub provider_location: String,
    #[serde(with = "crate::convert::wire_date")]
    pub service_date: NaiveDate,
    pub submission_date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processed_date: Option<DateTime<Utc>>,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount_claimed: Decimal,
    #[serde(default, with = "rust_decimal::serde::float")]
    pub amount_approved: Decimal,
    #[serde(default)]
    pub diagnosis: String,
    #[serde(default)]
    pub treatment: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub documents: Vec<String>,
    pub status: ClaimStatus,
}

impl Serialize for Claim {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        Claim::serialize(self, serializer)
    }
}

impl<'de> Deserialize<'de> for Claim {
    /// Accepts the key as `id` or `_id`, preferring `id`.
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let fields = crate::convert::record_fields(deserializer)?;
        Claim::deserialize(fields).map_err(serde::de::Error::custom)
    }
}

impl Claim {
    /// Approved amount, only when the status gives it meaning.
    pub fn approved_amount(&self) -> Option<Decimal> {
        match self.status {
            ClaimStatus::Approved | ClaimStatus::Paid => Some(self.amount_approved),
            _ => None,
        }
    }
}

/// Submission payload for a new claim. Also used for full updates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewClaim {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    pub plan_id: String,
    #[serde(default)]
    pub coverage_id: String,
    #[serde(rename = "type")]
    pub claim_type: ClaimType,
    pub provider_name: String,
    #[serde(default)]
    pub provider_location: String,
    #[serde(with = "crate::convert::wire_date")]
    pub service_date: NaiveDate,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount_claimed: Decimal,
    pub diagnosis: String,
    #[serde(default)]
    pub treatment: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub documents: Vec<String>,
}

/// Full-update payload (`PUT /claims/:id`).
pub type ClaimUpdate = NewClaim;

impl NewClaim {
    pub fn new(
        plan_id: impl Into<String>,
        claim_type: ClaimType,
        provider_name: impl Into<String>,
        service_date: NaiveDate,
        amount_claimed: Decimal,
        diagnosis: impl Into<String>,
    ) -> Self {
        Self {
            user_id: None,
            plan_id: plan_id.into(),
            coverage_id: String::new(),
            claim_type,
            provider_name: provider_name.into(),
            provider_location: String::new(),
            service_date,
            amount_claimed,
            diagnosis: diagnosis.into(),
            treatment: String::new(),
            notes: String::new(),
            documents: Vec::new(),
        }
    }

    /// Submit on behalf of a member (admin flow).
    pub fn with_user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    pub fn with_coverage(mut self, coverage_id: impl Into<String>) -> Self {
        self.coverage_id = coverage_id.into();
        self
    }

    pub fn with_provider_location(mut self, location: impl Into<String>) -> Self {
        self.provider_location = location.into();
        self
    }

    pub fn with_treatment(mut self, treatment: impl Into<String>) -> Self {
        self.treatment = treatment.into();
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    pub fn with_document(mut self, document: impl Into<String>) -> Self {
        self.documents.push(document.into());
        self
    }
}

impl From<&Claim> for NewClaim {
    fn from(claim: &Claim) -> Self {
        Self {
            user_id: Some(claim.user_id.clone()).filter(|u| !u.is_empty()),
            plan_id: claim.plan_id.clone(),
            coverage_id: claim.coverage_id.clone(),
            claim_type: claim.claim_type,
            provider_name: claim.provider_name.clone(),
            provider_location: claim.provider_location.clone(),
            service_date: claim.service_date,
            amount_claimed: claim.amount_claimed,
            diagnosis: claim.diagnosis.clone(),
            treatment: claim.treatment.clone(),
            notes: claim.notes.clone(),
            documents: claim.documents.clone(),
        }
    }
}

/// Partial update for the admin review workflow (`PUT /claims/:id/status`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusUpdate {
    pub status: ClaimStatus,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    pub amount_approved: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl StatusUpdate {
    pub fn new(status: ClaimStatus) -> Self {
        Self {
            status,
            amount_approved: None,
            notes: None,
        }
    }

    pub fn approve(amount: Decimal) -> Self {
        Self::new(ClaimStatus::Approved).with_amount(amount)
    }

    pub fn reject() -> Self {
        Self::new(ClaimStatus::Rejected)
    }

    pub fn processing() -> Self {
        Self::new(ClaimStatus::Processing)
    }

    pub fn with_amount(mut self, amount: Decimal) -> Self {
        self.amount_approved = Some(amount);
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        let notes = notes.into();
        self.notes = Some(notes).filter(|n| !n.trim().is_empty());
        self
    }

    /// Payload as sent on the wire: the approved amount only travels with
    /// an approval.
    pub fn to_payload(&self) -> StatusUpdate {
        let amount_approved = match self.status {
            ClaimStatus::Approved => self.amount_approved,
            _ => None,
        };
        StatusUpdate {
            status: self.status,
            amount_approved,
            notes: self.notes.clone(),
        }
    }
}

/// One page of claims.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ClaimPage {
    #[serde(default)]
    pub claims: Vec<Claim>,
    #[serde(default)]
    pub total: u64,
}
