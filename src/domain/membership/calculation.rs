//! Dues calculation.
//!
//! Classifies every tracked period of a member and produces the ordered
//! list of due periods. The due list is always oldest first; sequential
//! payment depends on that order.

use chrono::NaiveDate;
use serde::Serialize;

use super::period::{PeriodCatalog, PeriodNumber};
use super::record::MemberPaymentRecord;

/// Classification of one period for one member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PeriodState {
    /// Before the member's effective starting period.
    NotApplicable,
    /// Waived; never owed.
    Exempt,
    Paid,
    /// Unpaid and at or before the current period.
    Due,
    /// Unpaid but after the current period.
    Upcoming,
}

/// One row of a member's payment status table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodStatus {
    pub period: PeriodNumber,
    pub label: String,
    pub state: PeriodState,
    pub amount: Option<i64>,
    pub payment_id: Option<String>,
    pub payment_date: Option<NaiveDate>,
}

/// A period the member owes right now.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuePeriod {
    pub period: PeriodNumber,
    pub label: String,
    pub amount: i64,
}

/// Full outcome of a dues calculation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentAssessment {
    pub effective_start: PeriodNumber,
    pub current_period: PeriodNumber,
    pub fee_per_period: i64,
    /// One row per tracked period, ascending.
    pub statuses: Vec<PeriodStatus>,
    /// Due periods, ascending.
    pub due: Vec<DuePeriod>,
}

impl PaymentAssessment {
    pub fn total_due(&self) -> i64 {
        self.due.iter().map(|d| d.amount).sum()
    }

    pub fn years_owed(&self) -> usize {
        self.due.len()
    }

    pub fn all_paid(&self) -> bool {
        self.due.is_empty()
    }

    pub fn can_pay(&self) -> bool {
        !self.due.is_empty()
    }

    pub fn due_periods(&self) -> Vec<PeriodNumber> {
        self.due.iter().map(|d| d.period).collect()
    }

    pub fn paid_periods(&self) -> Vec<PeriodNumber> {
        self.periods_in(PeriodState::Paid)
    }

    pub fn periods_in(&self, state: PeriodState) -> Vec<PeriodNumber> {
        self.statuses
            .iter()
            .filter(|s| s.state == state)
            .map(|s| s.period)
            .collect()
    }
}

/// Classifies every tracked period of `record` relative to `current`.
pub fn assess(
    record: &MemberPaymentRecord,
    current: PeriodNumber,
    catalog: &PeriodCatalog,
    fee_per_period: i64,
) -> PaymentAssessment {
    let effective_start = record.effective_start(catalog);
    let mut statuses = Vec::with_capacity(catalog.len());
    let mut due = Vec::new();

    for period in catalog.iter() {
        let payment = record.get(period.number).cloned().unwrap_or_default();

        let state = if period.number < effective_start {
            PeriodState::NotApplicable
        } else if payment.is_exempt() {
            PeriodState::Exempt
        } else if payment.is_paid() {
            PeriodState::Paid
        } else if period.number <= current {
            PeriodState::Due
        } else {
            PeriodState::Upcoming
        };

        if state == PeriodState::Due {
            due.push(DuePeriod {
                period: period.number,
                label: period.label.clone(),
                amount: fee_per_period,
            });
        }

        statuses.push(PeriodStatus {
            period: period.number,
            label: period.label.clone(),
            state,
            amount: payment.amount,
            payment_id: payment.payment_id,
            payment_date: payment.payment_date,
        });
    }

    PaymentAssessment {
        effective_start,
        current_period: current,
        fee_per_period,
        statuses,
        due,
    }
}

/// Due periods of `record`, oldest first.
pub fn compute_unpaid_periods(
    record: &MemberPaymentRecord,
    current: PeriodNumber,
    catalog: &PeriodCatalog,
    fee_per_period: i64,
) -> Vec<DuePeriod> {
    assess(record, current, catalog, fee_per_period).due
}
