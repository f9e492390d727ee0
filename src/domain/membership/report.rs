//! Collection and defaulter reports across members.
//!
//! Removed members are excluded from both reports.

use super::calculation::{assess, PeriodState};
use super::member::Member;
use super::period::{PeriodCatalog, PeriodNumber};
use crate::domain::foundation::MemberId;

/// Totals for one period.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodCollection {
    pub period: PeriodNumber,
    pub label: String,
    pub paid_count: usize,
    pub exempt_count: usize,
    pub due_count: usize,
    pub collected_amount: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionReport {
    pub current_period: PeriodNumber,
    pub member_count: usize,
    pub periods: Vec<PeriodCollection>,
    pub total_collected: i64,
    pub total_outstanding: i64,
}

/// A member who owes at least one period.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Defaulter {
    pub member_id: MemberId,
    pub folio_number: String,
    pub name: String,
    pub years_owed: usize,
    pub total_due: i64,
    pub oldest_due: PeriodNumber,
}

pub fn collection_report(
    members: &[Member],
    current: PeriodNumber,
    catalog: &PeriodCatalog,
    fee_per_period: i64,
) -> CollectionReport {
    let mut periods: Vec<PeriodCollection> = catalog
        .iter()
        .map(|period| PeriodCollection {
            period: period.number,
            label: period.label.clone(),
            paid_count: 0,
            exempt_count: 0,
            due_count: 0,
            collected_amount: 0,
        })
        .collect();

    let mut member_count = 0;
    let mut total_outstanding = 0;

    for member in members.iter().filter(|m| m.status.is_listed()) {
        member_count += 1;
        let assessment = assess(&member.payments, current, catalog, fee_per_period);
        total_outstanding += assessment.total_due();

        // statuses and periods are both in catalog order
        for (row, status) in periods.iter_mut().zip(&assessment.statuses) {
            match status.state {
                PeriodState::Paid => {
                    row.paid_count += 1;
                    row.collected_amount += status.amount.unwrap_or(0);
                }
                PeriodState::Exempt => row.exempt_count += 1,
                PeriodState::Due => row.due_count += 1,
                PeriodState::NotApplicable | PeriodState::Upcoming => {}
            }
        }
    }

    let total_collected = periods.iter().map(|p| p.collected_amount).sum();

    CollectionReport {
        current_period: current,
        member_count,
        periods,
        total_collected,
        total_outstanding,
    }
}

/// Members with due periods, most years owed first, then by folio number.
pub fn defaulters(
    members: &[Member],
    current: PeriodNumber,
    catalog: &PeriodCatalog,
    fee_per_period: i64,
) -> Vec<Defaulter> {
    let mut list: Vec<Defaulter> = members
        .iter()
        .filter(|m| m.status.is_listed())
        .filter_map(|member| {
            let assessment = assess(&member.payments, current, catalog, fee_per_period);
            let oldest_due = assessment.due.first()?.period;
            Some(Defaulter {
                member_id: member.id,
                folio_number: member.folio_number.clone(),
                name: member.name.clone(),
                years_owed: assessment.years_owed(),
                total_due: assessment.total_due(),
                oldest_due,
            })
        })
        .collect();

    list.sort_by(|a, b| {
        b.years_owed
            .cmp(&a.years_owed)
            .then_with(|| a.folio_number.cmp(&b.folio_number))
    });
    list
}
