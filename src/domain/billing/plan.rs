//! Credit bundle plans.
//!
//! The price table is fixed and enumerated; there is deliberately no
//! database-backed catalog behind it.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{DomainError, ErrorCode};

/// A named, fixed (credits, charge) bundle offered for purchase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Plan {
    Basic,
    Advanced,
    Business,
}

impl Plan {
    /// All purchasable plans.
    pub const ALL: [Plan; 3] = [Plan::Basic, Plan::Advanced, Plan::Business];

    /// Resolves a client-supplied plan selector.
    pub fn from_selector(selector: &str) -> Result<Self, DomainError> {
        match selector {
            "Basic" => Ok(Plan::Basic),
            "Advanced" => Ok(Plan::Advanced),
            "Business" => Ok(Plan::Business),
            other => Err(DomainError::new(
                ErrorCode::InvalidPlan,
                format!("Unknown plan: {}", other),
            )),
        }
    }

    /// Credits granted on settlement.
    pub fn credits(&self) -> i64 {
        match self {
            Plan::Basic => 100,
            Plan::Advanced => 500,
            Plan::Business => 5000,
        }
    }

    /// Charge in whole currency units.
    pub fn amount(&self) -> i64 {
        match self {
            Plan::Basic => 10,
            Plan::Advanced => 50,
            Plan::Business => 250,
        }
    }

    /// Charge in minor currency units, as the gateway order API expects.
    pub fn amount_minor_units(&self) -> i64 {
        self.amount() * 100
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Plan::Basic => "Basic",
            Plan::Advanced => "Advanced",
            Plan::Business => "Business",
        }
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_table_is_exact() {
        assert_eq!(Plan::Basic.credits(), 100);
        assert_eq!(Plan::Basic.amount(), 10);
        assert_eq!(Plan::Advanced.credits(), 500);
        assert_eq!(Plan::Advanced.amount(), 50);
        assert_eq!(Plan::Business.credits(), 5000);
        assert_eq!(Plan::Business.amount(), 250);
    }

    #[test]
    fn minor_units_scale_by_hundred() {
        for plan in Plan::ALL {
            assert_eq!(plan.amount_minor_units(), plan.amount() * 100);
        }
    }

    #[test]
    fn selector_round_trips() {
        for plan in Plan::ALL {
            assert_eq!(Plan::from_selector(plan.as_str()).unwrap(), plan);
        }
    }

    #[test]
    fn unknown_selector_rejected() {
        let err = Plan::from_selector("Enterprise").unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidPlan);

        // Selectors are case-sensitive
        assert!(Plan::from_selector("basic").is_err());
        assert!(Plan::from_selector("").is_err());
    }
}
