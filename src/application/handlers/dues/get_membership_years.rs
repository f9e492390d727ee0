//! GetMembershipYearsHandler - Query handler for the membership-year view.

use std::sync::Arc;

use crate::domain::foundation::{MemberId, Timestamp};
use crate::domain::membership::{detect_gap, Member, MembershipError, PeriodNumber, YearPlan};
use crate::ports::MemberRepository;

use super::schedule::{load_member, DuesSchedule};

#[derive(Debug, Clone)]
pub struct GetMembershipYearsQuery {
    pub member_id: MemberId,
    pub now: Timestamp,
}

#[derive(Debug, Clone)]
pub struct MembershipYears {
    pub member: Member,
    pub plan: YearPlan,
}

/// Builds the gap-aware year plan from the member's paid periods.
pub struct GetMembershipYearsHandler {
    repository: Arc<dyn MemberRepository>,
    schedule: DuesSchedule,
}

impl GetMembershipYearsHandler {
    pub fn new(repository: Arc<dyn MemberRepository>, schedule: DuesSchedule) -> Self {
        Self {
            repository,
            schedule,
        }
    }

    pub async fn handle(
        &self,
        query: GetMembershipYearsQuery,
    ) -> Result<MembershipYears, MembershipError> {
        let member = load_member(&self.repository, &query.member_id).await?;

        let paid_years: Vec<i32> = member
            .payments
            .paid_periods()
            .iter()
            .map(PeriodNumber::start_year)
            .collect();
        let current_year = self.schedule.current_period(query.now).start_year();
        let plan = detect_gap(&paid_years, current_year, self.schedule.fee_per_period);

        Ok(MembershipYears { member, plan })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{june_2025, member, store_with};

    async fn plan_for(paid: &[i32]) -> YearPlan {
        let m = member("F-001", None, 21);
        let store = store_with(&m, paid).await;
        GetMembershipYearsHandler::new(store, DuesSchedule::default())
            .handle(GetMembershipYearsQuery {
                member_id: m.id,
                now: june_2025(),
            })
            .await
            .unwrap()
            .plan
    }

    #[tokio::test]
    async fn skipped_year_is_a_gap() {
        let plan = plan_for(&[22, 24]).await;
        assert!(plan.has_gap());
        assert_eq!(plan.gap_year(), Some(2023));
    }

    #[tokio::test]
    async fn no_history_is_first_time() {
        let plan = plan_for(&[]).await;
        assert!(plan.is_first_time());
        assert_eq!(plan.payable_years, vec![2025]);
        assert_eq!(plan.total_amount, 1200);
    }

    #[tokio::test]
    async fn paid_through_current_year_is_all_paid() {
        let plan = plan_for(&[23, 24, 25]).await;
        assert!(plan.all_paid());
        assert!(plan.payable_years.is_empty());
        assert_eq!(plan.total_amount, 0);
    }
}
