//! Per-member coverage limits.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::claim::ClaimType;

/// Limit for one claim category within the current coverage period.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CategoryLimit {
    #[serde(default, with = "rust_decimal::serde::float")]
    pub total: Decimal,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    pub used: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::float")]
    pub remaining: Decimal,
}

impl CategoryLimit {
    pub fn new(total: Decimal, remaining: Decimal) -> Self {
        Self {
            total,
            used: None,
            remaining,
        }
    }

    /// Amount consumed so far; derived from `total - remaining` when the
    /// backend omits it.
    pub fn used(&self) -> Decimal {
        self.used.unwrap_or(self.total - self.remaining)
    }

    /// Consumed share of the limit in `[0, 1]`. Zero-total limits report 1.
    pub fn used_fraction(&self) -> f64 {
        if self.total <= Decimal::ZERO {
            return 1.0;
        }
        let fraction = (self.used() / self.total).to_f64().unwrap_or(1.0);
        fraction.clamp(0.0, 1.0)
    }

    /// Rounded percentage for progress bars.
    pub fn percent_used(&self) -> u8 {
        (self.used_fraction() * 100.0).round() as u8
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining <= Decimal::ZERO
    }
}

/// Coverage limits for one member, by category.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverageLimits {
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub inpatient: CategoryLimit,
    #[serde(default)]
    pub outpatient: CategoryLimit,
    #[serde(default)]
    pub optical: CategoryLimit,
    #[serde(default)]
    pub maternity: CategoryLimit,
}

impl CoverageLimits {
    /// Limit that applies to a claim type, if that type has its own category.
    pub fn get(&self, claim_type: ClaimType) -> Option<&CategoryLimit> {
        match claim_type {
            ClaimType::Inpatient => Some(&self.inpatient),
            ClaimType::Outpatient => Some(&self.outpatient),
            ClaimType::Optical => Some(&self.optical),
            ClaimType::Maternity => Some(&self.maternity),
            ClaimType::Dental | ClaimType::Accident | ClaimType::Emergency => None,
        }
    }

    /// All categories in display order.
    pub fn categories(&self) -> [(ClaimType, &CategoryLimit); 4] {
        [
            (ClaimType::Inpatient, &self.inpatient),
            (ClaimType::Outpatient, &self.outpatient),
            (ClaimType::Optical, &self.optical),
            (ClaimType::Maternity, &self.maternity),
        ]
    }
}
