//! CreateMemberHandler - Command handler for registering a member.

use std::sync::Arc;

use crate::application::handlers::dues::DuesSchedule;
use crate::domain::foundation::Timestamp;
use crate::domain::membership::{Member, MemberDetails, MembershipError};
use crate::ports::MemberRepository;

#[derive(Debug, Clone)]
pub struct CreateMemberCommand {
    pub details: MemberDetails,
    /// Derived from the join date when absent.
    pub starting_period: Option<i32>,
    pub now: Timestamp,
}

pub struct CreateMemberHandler {
    repository: Arc<dyn MemberRepository>,
    schedule: DuesSchedule,
}

impl CreateMemberHandler {
    pub fn new(repository: Arc<dyn MemberRepository>, schedule: DuesSchedule) -> Self {
        Self {
            repository,
            schedule,
        }
    }

    pub async fn handle(&self, cmd: CreateMemberCommand) -> Result<Member, MembershipError> {
        let starting_period = cmd
            .starting_period
            .map(|value| self.schedule.catalog.period(value))
            .transpose()?;

        let member = Member::register(cmd.details, starting_period, &self.schedule.catalog, cmd.now)?;
        self.repository.save(&member).await?;

        tracing::info!(
            member_id = %member.id,
            folio_number = %member.folio_number,
            "Member created"
        );

        Ok(member)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemoryMemberStore;
    use crate::application::handlers::test_support::june_2025;
    use crate::domain::membership::PeriodNumber;
    use chrono::NaiveDate;

    fn details(folio: &str, email: Option<&str>) -> MemberDetails {
        MemberDetails {
            folio_number: folio.to_string(),
            name: "Meera Iyer".to_string(),
            email: email.map(String::from),
            phone: None,
            join_date: NaiveDate::from_ymd_opt(2023, 1, 10),
        }
    }

    fn handler(store: &Arc<InMemoryMemberStore>) -> CreateMemberHandler {
        CreateMemberHandler::new(store.clone(), DuesSchedule::default())
    }

    #[tokio::test]
    async fn derives_starting_period_from_join_date() {
        let store = Arc::new(InMemoryMemberStore::new());

        let member = handler(&store)
            .handle(CreateMemberCommand {
                details: details("F-200", Some("meera@example.com")),
                starting_period: None,
                now: june_2025(),
            })
            .await
            .unwrap();

        // January 2023 falls in the April 2022 fiscal year
        assert_eq!(member.starting_period(), Some(PeriodNumber::new(22)));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn explicit_starting_period_wins() {
        let store = Arc::new(InMemoryMemberStore::new());

        let member = handler(&store)
            .handle(CreateMemberCommand {
                details: details("F-200", None),
                starting_period: Some(24),
                now: june_2025(),
            })
            .await
            .unwrap();

        assert_eq!(member.starting_period(), Some(PeriodNumber::new(24)));
    }

    #[tokio::test]
    async fn duplicate_folio_conflicts() {
        let store = Arc::new(InMemoryMemberStore::new());
        let h = handler(&store);
        let cmd = CreateMemberCommand {
            details: details("F-200", None),
            starting_period: None,
            now: june_2025(),
        };
        h.handle(cmd.clone()).await.unwrap();

        let err = h
            .handle(CreateMemberCommand {
                details: details("f-200", None),
                ..cmd
            })
            .await
            .unwrap_err();

        assert!(matches!(err, MembershipError::DuplicateFolio(_)));
    }

    #[tokio::test]
    async fn duplicate_email_conflicts() {
        let store = Arc::new(InMemoryMemberStore::new());
        let h = handler(&store);
        h.handle(CreateMemberCommand {
            details: details("F-200", Some("meera@example.com")),
            starting_period: None,
            now: june_2025(),
        })
        .await
        .unwrap();

        let err = h
            .handle(CreateMemberCommand {
                details: details("F-201", Some("MEERA@example.com")),
                starting_period: None,
                now: june_2025(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, MembershipError::DuplicateEmail(_)));
    }

    #[tokio::test]
    async fn untracked_starting_period_is_rejected() {
        let store = Arc::new(InMemoryMemberStore::new());

        let err = handler(&store)
            .handle(CreateMemberCommand {
                details: details("F-200", None),
                starting_period: Some(35),
                now: june_2025(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, MembershipError::ValidationFailed { .. }));
        assert!(store.is_empty().await);
    }
}
