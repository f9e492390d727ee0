//! GetCollectionReportHandler - Query handler for per-period collection totals.

use std::sync::Arc;

use crate::application::handlers::dues::DuesSchedule;
use crate::domain::foundation::Timestamp;
use crate::domain::membership::{collection_report, CollectionReport, MembershipError};
use crate::ports::MemberReader;

pub struct GetCollectionReportHandler {
    reader: Arc<dyn MemberReader>,
    schedule: DuesSchedule,
}

impl GetCollectionReportHandler {
    pub fn new(reader: Arc<dyn MemberReader>, schedule: DuesSchedule) -> Self {
        Self { reader, schedule }
    }

    pub async fn handle(&self, now: Timestamp) -> Result<CollectionReport, MembershipError> {
        let members = self.reader.list_for_reports().await?;
        let report = collection_report(
            &members,
            self.schedule.current_period(now),
            &self.schedule.catalog,
            self.schedule.fee_per_period,
        );

        tracing::debug!(
            members = report.member_count,
            collected = report.total_collected,
            outstanding = report.total_outstanding,
            "Collection report built"
        );

        Ok(report)
    }
}
