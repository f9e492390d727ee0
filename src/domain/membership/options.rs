//! Payment plans offered to a member.
//!
//! A member may settle any oldest-first prefix of their due periods, never
//! a later year ahead of an earlier one. Plans are a closed set: pay the
//! next N years, or pay everything outstanding.

use std::fmt;

use super::calculation::DuePeriod;
use super::errors::MembershipError;
use super::period::PeriodNumber;

/// Largest "pay N years" plan offered besides paying everything.
pub const MAX_PARTIAL_YEARS: usize = 5;

/// A selectable payment plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaymentPlan {
    /// Every due period.
    PayAll,
    /// The N oldest due periods.
    PayYears(usize),
}

impl PaymentPlan {
    /// Stable identifier used by clients, e.g. `option_2years`.
    pub fn id(&self) -> String {
        match self {
            PaymentPlan::PayAll => "pay_all".to_string(),
            PaymentPlan::PayYears(1) => "option_1year".to_string(),
            PaymentPlan::PayYears(n) => format!("option_{}years", n),
        }
    }

    /// Display label for a plan covering `count` periods.
    pub fn label(&self, count: usize) -> String {
        match self {
            PaymentPlan::PayAll if count == 1 => "Pay all outstanding (1 year)".to_string(),
            PaymentPlan::PayAll => format!("Pay all outstanding ({} years)", count),
            PaymentPlan::PayYears(1) => "Pay 1 year".to_string(),
            PaymentPlan::PayYears(n) => format!("Pay {} years", n),
        }
    }

    /// Number of periods this plan covers out of `due_count`.
    pub fn period_count(&self, due_count: usize) -> usize {
        match self {
            PaymentPlan::PayAll => due_count,
            PaymentPlan::PayYears(n) => (*n).min(due_count),
        }
    }
}

impl fmt::Display for PaymentPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id())
    }
}

/// A plan resolved against a member's due periods.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentOption {
    pub plan: PaymentPlan,
    pub name: String,
    pub periods: Vec<PeriodNumber>,
    pub total_amount: i64,
    /// Due periods left unpaid after this option.
    pub remaining: usize,
}

impl PaymentOption {
    pub fn id(&self) -> String {
        self.plan.id()
    }
}

/// Builds the options for `due`: "pay N years" for N from 1 up to
/// `min(5, due.len() - 1)`, then "pay all".
pub fn build_payment_options(due: &[DuePeriod], fee_per_period: i64) -> Vec<PaymentOption> {
    if due.is_empty() {
        return Vec::new();
    }

    let partial_limit = MAX_PARTIAL_YEARS.min(due.len() - 1);
    (1..=partial_limit)
        .map(PaymentPlan::PayYears)
        .chain(std::iter::once(PaymentPlan::PayAll))
        .map(|plan| resolve(plan, due, fee_per_period))
        .collect()
}

fn resolve(plan: PaymentPlan, due: &[DuePeriod], fee_per_period: i64) -> PaymentOption {
    let count = plan.period_count(due.len());
    PaymentOption {
        plan,
        name: plan.label(count),
        periods: due[..count].iter().map(|d| d.period).collect(),
        total_amount: count as i64 * fee_per_period,
        remaining: due.len() - count,
    }
}

/// Checks that `selected` is a non-empty, oldest-first prefix of `due`.
pub fn validate_selection(
    due: &[DuePeriod],
    selected: &[PeriodNumber],
) -> Result<(), MembershipError> {
    if due.is_empty() {
        return Err(MembershipError::NothingDue);
    }
    if selected.is_empty() {
        return Err(MembershipError::invalid_selection("no periods selected"));
    }
    if selected.len() > due.len() {
        return Err(MembershipError::invalid_selection(format!(
            "{} periods selected but only {} are due",
            selected.len(),
            due.len()
        )));
    }

    for (expected, actual) in due.iter().zip(selected) {
        if expected.period != *actual {
            return Err(MembershipError::invalid_selection(format!(
                "expected {} next but got {}; years must be paid oldest first",
                expected.label,
                actual.label()
            )));
        }
    }

    Ok(())
}
