//! GrantExemptionHandler - Command handler for waiving periods.

use std::sync::Arc;

use crate::domain::foundation::MemberId;
use crate::domain::membership::{MembershipError, PeriodNumber};
use crate::ports::MemberRepository;

use super::schedule::{load_member, DuesSchedule};

#[derive(Debug, Clone)]
pub struct GrantExemptionCommand {
    pub member_id: MemberId,
    pub periods: Vec<i32>,
}

/// Marks periods exempt (amount zero). Paid periods cannot be waived.
pub struct GrantExemptionHandler {
    repository: Arc<dyn MemberRepository>,
    schedule: DuesSchedule,
}

impl GrantExemptionHandler {
    pub fn new(repository: Arc<dyn MemberRepository>, schedule: DuesSchedule) -> Self {
        Self {
            repository,
            schedule,
        }
    }

    pub async fn handle(
        &self,
        cmd: GrantExemptionCommand,
    ) -> Result<Vec<PeriodNumber>, MembershipError> {
        let mut periods = self.schedule.periods(&cmd.periods)?;
        periods.sort_unstable();
        periods.dedup();
        if periods.is_empty() {
            return Err(MembershipError::invalid_selection("no periods selected"));
        }

        let member = load_member(&self.repository, &cmd.member_id).await?;
        if let Some(period) = periods.iter().copied().find(|p| member.payments.is_paid(*p)) {
            return Err(MembershipError::PeriodAlreadyPaid(period));
        }

        self.repository
            .mark_exempt(&member.id, &periods)
            .await
            .map_err(MembershipError::from)?;

        tracing::info!(member_id = %member.id, periods = ?cmd.periods, "Periods exempted");
        Ok(periods)
    }
}
