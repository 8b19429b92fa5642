//! Leave balance model and policy helpers.
//!
//! This module contains the [`LeaveBalance`] type tracking available leave
//! hours per owner and category, and the pure policy functions for FTE
//! proration and per-period accrual. The balance enforces its bounds by
//! validation before mutation, never by clamping.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::RecordCategory;

/// Available leave hours for one owner and category.
///
/// # Example
///
/// ```
/// use timekeeping_engine::models::{LeaveBalance, RecordCategory};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let mut balance = LeaveBalance::new(
///     "emp_001",
///     RecordCategory::Pto,
///     Decimal::from_str("40.00").unwrap(),
///     Decimal::from_str("160.00").unwrap(),
/// );
///
/// balance.deduct(Decimal::from_str("8.00").unwrap()).unwrap();
/// assert_eq!(balance.available.to_string(), "32.00");
///
/// // Over-draw is rejected without mutating the balance.
/// assert!(balance.deduct(Decimal::from_str("100.00").unwrap()).is_err());
/// assert_eq!(balance.available.to_string(), "32.00");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaveBalance {
    /// The employee this balance belongs to.
    pub owner: String,
    /// The leave category this balance funds.
    pub category: RecordCategory,
    /// Hours currently available.
    pub available: Decimal,
    /// The policy-derived maximum this balance may reach.
    pub maximum: Decimal,
}

impl LeaveBalance {
    /// Creates a balance with the given available hours and policy maximum.
    pub fn new(
        owner: impl Into<String>,
        category: RecordCategory,
        available: Decimal,
        maximum: Decimal,
    ) -> Self {
        Self {
            owner: owner.into(),
            category,
            available,
            maximum,
        }
    }

    /// Deducts approved leave hours from the balance.
    ///
    /// Fails with [`EngineError::InsufficientBalance`] if the deduction
    /// would drive the balance negative; the balance is left unchanged in
    /// that case.
    pub fn deduct(&mut self, hours: Decimal) -> EngineResult<()> {
        if hours > self.available {
            return Err(EngineError::InsufficientBalance {
                owner: self.owner.clone(),
                category: self.category.to_string(),
                requested: hours,
                available: self.available,
            });
        }
        self.available -= hours;
        Ok(())
    }

    /// Adds accrued hours to the balance.
    ///
    /// Fails with [`EngineError::BalanceOverMaximum`] if the accrual would
    /// push the balance past its policy maximum; the balance is left
    /// unchanged in that case.
    pub fn accrue(&mut self, hours: Decimal) -> EngineResult<()> {
        let resulting = self.available + hours;
        if resulting > self.maximum {
            return Err(EngineError::BalanceOverMaximum {
                owner: self.owner.clone(),
                category: self.category.to_string(),
                resulting,
                maximum: self.maximum,
            });
        }
        self.available = resulting;
        Ok(())
    }
}

/// Prorates a policy maximum by a fractional full-time-equivalent value.
///
/// Shared by every caller that re-derives an employee's effective cap
/// (admin correction screens and the accrual batch alike), so the rule
/// lives in exactly one place.
///
/// # Example
///
/// ```
/// use timekeeping_engine::models::prorated_maximum;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let half_time = prorated_maximum(
///     Decimal::from_str("160").unwrap(),
///     Decimal::from_str("0.5").unwrap(),
/// );
/// assert_eq!(half_time, Decimal::from_str("80").unwrap());
/// ```
pub fn prorated_maximum(policy_maximum: Decimal, fte: Decimal) -> Decimal {
    (policy_maximum * fte).round_dp(2)
}

/// Computes the hours accrued in one pay period from an annual policy rate
/// and the employee's FTE fraction.
pub fn accrual_for_period(
    annual_hours: Decimal,
    fte: Decimal,
    periods_per_year: Decimal,
) -> Decimal {
    (annual_hours * fte / periods_per_year).round_dp(2)
}
