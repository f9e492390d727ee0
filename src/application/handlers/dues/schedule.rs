//! Fee schedule shared by the dues handlers.

use std::sync::Arc;

use crate::domain::foundation::{MemberId, Timestamp};
use crate::domain::membership::{
    assess, Member, MembershipError, PaymentAssessment, PeriodCatalog, PeriodNumber,
    FEE_PER_PERIOD,
};
use crate::ports::MemberRepository;

/// Tracked periods and the fee charged for each.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuesSchedule {
    pub catalog: PeriodCatalog,
    pub fee_per_period: i64,
}

impl DuesSchedule {
    pub fn new(catalog: PeriodCatalog, fee_per_period: i64) -> Self {
        Self {
            catalog,
            fee_per_period,
        }
    }

    pub fn current_period(&self, now: Timestamp) -> PeriodNumber {
        self.catalog.current_period(now.date())
    }

    pub fn assess(&self, member: &Member, now: Timestamp) -> PaymentAssessment {
        assess(
            &member.payments,
            self.current_period(now),
            &self.catalog,
            self.fee_per_period,
        )
    }

    /// Validates raw period numbers against the catalog.
    pub fn periods(&self, values: &[i32]) -> Result<Vec<PeriodNumber>, MembershipError> {
        values
            .iter()
            .map(|v| self.catalog.period(*v).map_err(MembershipError::from))
            .collect()
    }
}

impl Default for DuesSchedule {
    fn default() -> Self {
        Self::new(PeriodCatalog::default(), FEE_PER_PERIOD)
    }
}

/// Loads a member or fails with `MemberNotFound`.
pub(crate) async fn load_member(
    repository: &Arc<dyn MemberRepository>,
    id: &MemberId,
) -> Result<Member, MembershipError> {
    repository
        .find_by_id(id)
        .await?
        .ok_or(MembershipError::MemberNotFound(*id))
}
