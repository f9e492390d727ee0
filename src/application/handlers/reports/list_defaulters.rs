//! ListDefaultersHandler - Query handler for members with dues outstanding.

use std::sync::Arc;

use crate::application::handlers::dues::DuesSchedule;
use crate::domain::foundation::Timestamp;
use crate::domain::membership::{defaulters, Defaulter, MembershipError};
use crate::ports::MemberReader;

pub struct ListDefaultersHandler {
    reader: Arc<dyn MemberReader>,
    schedule: DuesSchedule,
}

impl ListDefaultersHandler {
    pub fn new(reader: Arc<dyn MemberReader>, schedule: DuesSchedule) -> Self {
        Self { reader, schedule }
    }

    /// Most years owed first.
    pub async fn handle(&self, now: Timestamp) -> Result<Vec<Defaulter>, MembershipError> {
        let members = self.reader.list_for_reports().await?;
        Ok(defaulters(
            &members,
            self.schedule.current_period(now),
            &self.schedule.catalog,
            self.schedule.fee_per_period,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{june_2025, member, store_with};
    use crate::domain::membership::PeriodNumber;
    use crate::ports::MemberRepository;

    #[tokio::test]
    async fn sorted_by_years_owed() {
        let paid_up = member("F-001", None, 21);
        let store = store_with(&paid_up, &[21, 22, 23, 24, 25]).await;

        let one_year = member("F-002", None, 25);
        let three_years = member("F-003", None, 23);
        store.save(&one_year).await.unwrap();
        store.save(&three_years).await.unwrap();

        let handler = ListDefaultersHandler::new(store, DuesSchedule::default());
        let list = handler.handle(june_2025()).await.unwrap();

        assert_eq!(list.len(), 2);
        assert_eq!(list[0].folio_number, "F-003");
        assert_eq!(list[0].years_owed, 3);
        assert_eq!(list[0].total_due, 3600);
        assert_eq!(list[0].oldest_due, PeriodNumber::new(23));
        assert_eq!(list[1].folio_number, "F-002");
    }
}
