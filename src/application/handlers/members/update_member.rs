//! UpdateMemberHandler - Command handler for editing member details.

use std::sync::Arc;

use crate::application::handlers::dues::{load_member, DuesSchedule};
use crate::domain::foundation::{MemberId, Timestamp};
use crate::domain::membership::{Member, MemberDetails, MembershipError};
use crate::ports::MemberRepository;

#[derive(Debug, Clone)]
pub struct UpdateMemberCommand {
    pub member_id: MemberId,
    pub details: MemberDetails,
    /// Left unchanged when absent.
    pub starting_period: Option<i32>,
    pub now: Timestamp,
}

pub struct UpdateMemberHandler {
    repository: Arc<dyn MemberRepository>,
    schedule: DuesSchedule,
}

impl UpdateMemberHandler {
    pub fn new(repository: Arc<dyn MemberRepository>, schedule: DuesSchedule) -> Self {
        Self {
            repository,
            schedule,
        }
    }

    pub async fn handle(&self, cmd: UpdateMemberCommand) -> Result<Member, MembershipError> {
        let mut member = load_member(&self.repository, &cmd.member_id).await?;

        member.update_details(cmd.details, cmd.now)?;
        if let Some(value) = cmd.starting_period {
            let period = self.schedule.catalog.period(value)?;
            member.set_starting_period(period, cmd.now);
        }

        self.repository.update(&member).await?;

        tracing::info!(member_id = %member.id, "Member updated");
        Ok(member)
    }
}
