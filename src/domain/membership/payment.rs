//! Writing a settled payment onto a member's record.

use chrono::NaiveDate;

use super::errors::MembershipError;
use super::period::PeriodNumber;
use super::record::{MemberPaymentRecord, PeriodPayment};

/// A payment to be written across one or more periods.
///
/// Callers obtain `periods` from a validated selection. Applying it does not
/// re-check sequencing; [`PaymentApplication::conflict_with`] only guards
/// against overwriting a different payment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentApplication {
    periods: Vec<PeriodNumber>,
    payment_id: String,
    amount_per_period: i64,
    payment_date: NaiveDate,
}

impl PaymentApplication {
    pub fn new(
        periods: Vec<PeriodNumber>,
        payment_id: impl Into<String>,
        amount_per_period: i64,
        payment_date: NaiveDate,
    ) -> Result<Self, MembershipError> {
        let payment_id = payment_id.into();
        if periods.is_empty() {
            return Err(MembershipError::invalid_selection("no periods selected"));
        }
        if payment_id.trim().is_empty() {
            return Err(MembershipError::validation(
                "payment_id",
                "payment reference cannot be empty",
            ));
        }
        if amount_per_period <= 0 {
            return Err(MembershipError::validation(
                "amount",
                "amount per period must be positive",
            ));
        }

        Ok(Self {
            periods,
            payment_id,
            amount_per_period,
            payment_date,
        })
    }

    pub fn periods(&self) -> &[PeriodNumber] {
        &self.periods
    }

    pub fn payment_id(&self) -> &str {
        &self.payment_id
    }

    pub fn amount_per_period(&self) -> i64 {
        self.amount_per_period
    }

    pub fn payment_date(&self) -> NaiveDate {
        self.payment_date
    }

    pub fn total_amount(&self) -> i64 {
        self.amount_per_period * self.periods.len() as i64
    }

    /// Calendar years that become paid, e.g. `[2023, 2024]`.
    pub fn activated_years(&self) -> Vec<i32> {
        self.periods.iter().map(PeriodNumber::start_year).collect()
    }

    /// First period already paid under a different reference.
    ///
    /// Replaying the same payment is not a conflict.
    pub fn conflict_with(&self, record: &MemberPaymentRecord) -> Option<PeriodNumber> {
        self.periods.iter().copied().find(|period| {
            record.get(*period).is_some_and(|existing| {
                existing.is_paid() && existing.payment_id.as_deref() != Some(self.payment_id.as_str())
            })
        })
    }

    /// Overwrites every selected period with this payment.
    pub fn apply_to(&self, record: &mut MemberPaymentRecord) {
        for period in &self.periods {
            record.set(
                *period,
                PeriodPayment::paid(self.amount_per_period, self.payment_id.clone(), self.payment_date),
            );
        }
    }
}
