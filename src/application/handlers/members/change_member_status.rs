//! ChangeMemberStatusHandler - Command handler for activating, deactivating
//! and removing members.

use std::sync::Arc;

use crate::application::handlers::dues::load_member;
use crate::domain::foundation::{MemberId, Timestamp};
use crate::domain::membership::{Member, MemberStatus, MembershipError};
use crate::ports::MemberRepository;

#[derive(Debug, Clone)]
pub struct ChangeMemberStatusCommand {
    pub member_id: MemberId,
    pub status: MemberStatus,
    pub now: Timestamp,
}

pub struct ChangeMemberStatusHandler {
    repository: Arc<dyn MemberRepository>,
}

impl ChangeMemberStatusHandler {
    pub fn new(repository: Arc<dyn MemberRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, cmd: ChangeMemberStatusCommand) -> Result<Member, MembershipError> {
        let mut member = load_member(&self.repository, &cmd.member_id).await?;
        let from = member.status;

        member.change_status(cmd.status, cmd.now)?;
        self.repository.update(&member).await?;

        tracing::info!(
            member_id = %member.id,
            from = %from,
            to = %member.status,
            "Member status changed"
        );

        Ok(member)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{june_2025, member, store_with};

    fn cmd(member_id: MemberId, status: MemberStatus) -> ChangeMemberStatusCommand {
        ChangeMemberStatusCommand {
            member_id,
            status,
            now: june_2025(),
        }
    }

    #[tokio::test]
    async fn toggles_between_active_and_inactive() {
        let m = member("F-001", None, 21);
        let store = store_with(&m, &[]).await;
        let handler = ChangeMemberStatusHandler::new(store.clone());

        handler.handle(cmd(m.id, MemberStatus::Inactive)).await.unwrap();
        let back = handler.handle(cmd(m.id, MemberStatus::Active)).await.unwrap();

        assert_eq!(back.status, MemberStatus::Active);
        let stored = store.find_by_id(&m.id).await.unwrap().unwrap();
        assert_eq!(stored.status, MemberStatus::Active);
    }

    #[tokio::test]
    async fn removal_is_terminal() {
        let m = member("F-001", None, 21);
        let handler = ChangeMemberStatusHandler::new(store_with(&m, &[]).await);

        handler.handle(cmd(m.id, MemberStatus::Removed)).await.unwrap();
        let err = handler
            .handle(cmd(m.id, MemberStatus::Active))
            .await
            .unwrap_err();

        assert_eq!(
            err,
            MembershipError::InvalidStatusTransition {
                from: MemberStatus::Removed,
                to: MemberStatus::Active,
            }
        );
    }
}
