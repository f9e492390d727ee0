//! Per-period payment record of a member.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::errors::MembershipError;
use super::period::{PeriodCatalog, PeriodNumber};

/// Payment fields stored for one period.
///
/// A period is paid when it carries a non-blank payment reference and a
/// positive amount. An amount of exactly zero marks the period exempt.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PeriodPayment {
    pub amount: Option<i64>,
    pub payment_id: Option<String>,
    pub payment_date: Option<NaiveDate>,
}

impl PeriodPayment {
    pub fn paid(amount: i64, payment_id: impl Into<String>, payment_date: NaiveDate) -> Self {
        Self {
            amount: Some(amount),
            payment_id: Some(payment_id.into()),
            payment_date: Some(payment_date),
        }
    }

    pub fn exempt() -> Self {
        Self {
            amount: Some(0),
            payment_id: None,
            payment_date: None,
        }
    }

    pub fn is_paid(&self) -> bool {
        self.amount.is_some_and(|amount| amount > 0) && self.has_reference()
    }

    pub fn is_exempt(&self) -> bool {
        self.amount == Some(0)
    }

    /// Amount and reference are both recorded, whatever the amount.
    pub fn is_recorded(&self) -> bool {
        self.amount.is_some() && self.has_reference()
    }

    fn has_reference(&self) -> bool {
        self.payment_id
            .as_deref()
            .is_some_and(|id| !id.trim().is_empty())
    }
}

/// All payment fields of one member, keyed by period.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MemberPaymentRecord {
    /// First period the member is liable for, if recorded.
    pub starting_period: Option<PeriodNumber>,
    /// Used to derive the starting period when none is recorded.
    pub join_date: Option<NaiveDate>,
    periods: BTreeMap<PeriodNumber, PeriodPayment>,
}

impl MemberPaymentRecord {
    pub fn new(starting_period: Option<PeriodNumber>, join_date: Option<NaiveDate>) -> Self {
        Self {
            starting_period,
            join_date,
            periods: BTreeMap::new(),
        }
    }

    pub fn with_payment(mut self, period: PeriodNumber, payment: PeriodPayment) -> Self {
        self.set(period, payment);
        self
    }

    pub fn get(&self, period: PeriodNumber) -> Option<&PeriodPayment> {
        self.periods.get(&period)
    }

    pub fn set(&mut self, period: PeriodNumber, payment: PeriodPayment) {
        self.periods.insert(period, payment);
    }

    /// Recorded periods in ascending order.
    pub fn entries(&self) -> impl Iterator<Item = (PeriodNumber, &PeriodPayment)> {
        self.periods.iter().map(|(number, payment)| (*number, payment))
    }

    pub fn is_paid(&self, period: PeriodNumber) -> bool {
        self.get(period).is_some_and(PeriodPayment::is_paid)
    }

    pub fn is_exempt(&self, period: PeriodNumber) -> bool {
        self.get(period).is_some_and(PeriodPayment::is_exempt)
    }

    /// Periods with a successful payment, ascending.
    pub fn paid_periods(&self) -> Vec<PeriodNumber> {
        self.entries()
            .filter(|(_, payment)| payment.is_paid())
            .map(|(number, _)| number)
            .collect()
    }

    /// Starting period as recorded, else derived from the join date,
    /// else the first tracked period.
    pub fn declared_start(&self, catalog: &PeriodCatalog) -> PeriodNumber {
        self.starting_period
            .or_else(|| {
                self.join_date
                    .map(|date| catalog.starting_period_for_join_date(date))
            })
            .unwrap_or_else(|| catalog.first())
    }

    /// Declared start, pulled back to the earliest period that already
    /// carries both an amount and a payment reference.
    pub fn effective_start(&self, catalog: &PeriodCatalog) -> PeriodNumber {
        let declared = self.declared_start(catalog);
        let earliest_recorded = self
            .entries()
            .filter(|(_, payment)| payment.is_recorded())
            .map(|(number, _)| number)
            .next();

        match earliest_recorded {
            Some(earliest) if earliest < declared => earliest,
            _ => declared,
        }
    }

    /// Waives `period`. Fails if it is already paid.
    pub fn mark_exempt(&mut self, period: PeriodNumber) -> Result<(), MembershipError> {
        if self.is_paid(period) {
            return Err(MembershipError::PeriodAlreadyPaid(period));
        }
        self.set(period, PeriodPayment::exempt());
        Ok(())
    }
}
