//! Membership-year view with gap detection.
//!
//! Works on calendar years that carry a successful payment. A missing year
//! between the first paid year and the current one is a gap, and catch-up
//! must start there.

use serde::Serialize;

/// Which situation the member's paid years describe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "state")]
pub enum YearPlanState {
    /// Nothing paid yet.
    FirstTime,
    /// A year before the current one was skipped.
    Gap { gap_year: i32 },
    /// Paid through the current year.
    AllPaid,
    /// No holes; owes the years after the latest paid one.
    SequentialDue,
}

/// Payable years derived from paid history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearPlan {
    pub state: YearPlanState,
    pub current_year: i32,
    pub paid_years: Vec<i32>,
    pub latest_paid_year: Option<i32>,
    pub payable_years: Vec<i32>,
    pub total_amount: i64,
}

impl YearPlan {
    pub fn has_gap(&self) -> bool {
        matches!(self.state, YearPlanState::Gap { .. })
    }

    pub fn gap_year(&self) -> Option<i32> {
        match self.state {
            YearPlanState::Gap { gap_year } => Some(gap_year),
            _ => None,
        }
    }

    pub fn is_first_time(&self) -> bool {
        self.state == YearPlanState::FirstTime
    }

    pub fn all_paid(&self) -> bool {
        self.state == YearPlanState::AllPaid
    }
}

/// Derives the payable years from `paid_years` relative to `current_year`.
pub fn detect_gap(paid_years: &[i32], current_year: i32, fee_per_year: i64) -> YearPlan {
    let mut paid = paid_years.to_vec();
    paid.sort_unstable();
    paid.dedup();

    let (state, payable_years) = match (paid.first().copied(), paid.last().copied()) {
        (None, _) | (_, None) => (YearPlanState::FirstTime, vec![current_year]),
        (Some(first), Some(latest)) => {
            let gap = (first..current_year).find(|year| paid.binary_search(year).is_err());
            match gap {
                Some(gap_year) => (
                    YearPlanState::Gap { gap_year },
                    (gap_year..=current_year)
                        .filter(|year| paid.binary_search(year).is_err())
                        .collect(),
                ),
                None if latest >= current_year => (YearPlanState::AllPaid, Vec::new()),
                None => (
                    YearPlanState::SequentialDue,
                    (latest + 1..=current_year).collect(),
                ),
            }
        }
    };

    let total_amount = payable_years.len() as i64 * fee_per_year;

    YearPlan {
        state,
        current_year,
        latest_paid_year: paid.last().copied(),
        paid_years: paid,
        payable_years,
        total_amount,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::membership::period::FEE_PER_PERIOD;
    use proptest::prelude::*;

    #[test]
    fn skipped_year_is_reported_as_gap() {
        let plan = detect_gap(&[2022, 2024], 2025, FEE_PER_PERIOD);

        assert!(plan.has_gap());
        assert_eq!(plan.gap_year(), Some(2023));
        assert_eq!(plan.payable_years, vec![2023, 2025]);
        assert_eq!(plan.total_amount, 2400);
    }

    #[test]
    fn paid_through_current_year_is_all_paid() {
        let plan = detect_gap(&[2021, 2022, 2023, 2024, 2025], 2025, FEE_PER_PERIOD);

        assert!(plan.all_paid());
        assert!(plan.payable_years.is_empty());
        assert_eq!(plan.total_amount, 0);
    }

    #[test]
    fn empty_history_pays_current_year_only() {
        let plan = detect_gap(&[], 2025, FEE_PER_PERIOD);

        assert!(plan.is_first_time());
        assert_eq!(plan.payable_years, vec![2025]);
        assert_eq!(plan.total_amount, FEE_PER_PERIOD);
        assert_eq!(plan.latest_paid_year, None);
    }

    #[test]
    fn contiguous_history_owes_following_years() {
        let plan = detect_gap(&[2021, 2022], 2025, FEE_PER_PERIOD);

        assert_eq!(plan.state, YearPlanState::SequentialDue);
        assert_eq!(plan.payable_years, vec![2023, 2024, 2025]);
        assert_eq!(plan.total_amount, 3600);
        assert!(!plan.has_gap());
    }

    #[test]
    fn unsorted_duplicate_input_is_normalised() {
        let plan = detect_gap(&[2024, 2022, 2022], 2025, FEE_PER_PERIOD);
        assert_eq!(plan.paid_years, vec![2022, 2024]);
        assert_eq!(plan.gap_year(), Some(2023));
    }

    #[test]
    fn current_year_gap_is_not_a_gap() {
        let plan = detect_gap(&[2023, 2024], 2025, FEE_PER_PERIOD);
        assert_eq!(plan.state, YearPlanState::SequentialDue);
        assert_eq!(plan.payable_years, vec![2025]);
    }

    #[test]
    fn state_serializes_with_tag() {
        let json = serde_json::to_value(YearPlanState::Gap { gap_year: 2023 }).unwrap();
        assert_eq!(json["state"], "gap");
        assert_eq!(json["gap_year"], 2023);
    }

    proptest! {
        #[test]
        fn total_matches_payable_years(
            paid in proptest::collection::vec(2015i32..2030, 0..10),
            current in 2015i32..2030,
        ) {
            let plan = detect_gap(&paid, current, FEE_PER_PERIOD);
            prop_assert_eq!(plan.total_amount, plan.payable_years.len() as i64 * FEE_PER_PERIOD);
            for year in &plan.payable_years {
                prop_assert!(!plan.paid_years.contains(year));
                prop_assert!(*year <= current);
            }
        }
    }
}
