//! RecordOfflinePaymentHandler - Command handler for payments taken outside checkout.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::domain::foundation::{MemberId, Timestamp};
use crate::domain::membership::{
    validate_selection, MembershipError, PaymentApplication, PeriodNumber,
};
use crate::ports::MemberRepository;

use super::schedule::{load_member, DuesSchedule};

#[derive(Debug, Clone)]
pub struct RecordOfflinePaymentCommand {
    pub member_id: MemberId,
    pub periods: Vec<i32>,
    /// Cheque number, bank transfer id or receipt number.
    pub reference: String,
    /// Defaults to the day of `now`.
    pub payment_date: Option<NaiveDate>,
    pub now: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordOfflinePaymentResult {
    pub periods: Vec<PeriodNumber>,
    pub total_amount: i64,
    pub activated_years: Vec<i32>,
}

/// Records an offline payment. The same oldest-first rule applies as for
/// checkout payments.
pub struct RecordOfflinePaymentHandler {
    repository: Arc<dyn MemberRepository>,
    schedule: DuesSchedule,
}

impl RecordOfflinePaymentHandler {
    pub fn new(repository: Arc<dyn MemberRepository>, schedule: DuesSchedule) -> Self {
        Self {
            repository,
            schedule,
        }
    }

    pub async fn handle(
        &self,
        cmd: RecordOfflinePaymentCommand,
    ) -> Result<RecordOfflinePaymentResult, MembershipError> {
        let member = load_member(&self.repository, &cmd.member_id).await?;
        let selected = self.schedule.periods(&cmd.periods)?;
        let assessment = self.schedule.assess(&member, cmd.now);
        validate_selection(&assessment.due, &selected)?;

        let payment = PaymentApplication::new(
            selected,
            cmd.reference.trim(),
            self.schedule.fee_per_period,
            cmd.payment_date.unwrap_or_else(|| cmd.now.date()),
        )?;

        self.repository
            .apply_payment(&member.id, &payment)
            .await
            .map_err(MembershipError::from)?;

        tracing::info!(
            member_id = %member.id,
            reference = %payment.payment_id(),
            periods = ?cmd.periods,
            "Offline payment recorded"
        );

        Ok(RecordOfflinePaymentResult {
            periods: payment.periods().to_vec(),
            total_amount: payment.total_amount(),
            activated_years: payment.activated_years(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{june_2025, member, store_with};

    #[tokio::test]
    async fn records_payment_with_given_date() {
        let m = member("F-001", None, 21);
        let store = store_with(&m, &[]).await;
        let handler = RecordOfflinePaymentHandler::new(store.clone(), DuesSchedule::default());
        let date = NaiveDate::from_ymd_opt(2025, 4, 2).unwrap();

        let result = handler
            .handle(RecordOfflinePaymentCommand {
                member_id: m.id,
                periods: vec![21, 22],
                reference: " CHQ-1042 ".to_string(),
                payment_date: Some(date),
                now: june_2025(),
            })
            .await
            .unwrap();

        assert_eq!(result.total_amount, 2400);
        let stored = store.find_by_id(&m.id).await.unwrap().unwrap();
        let entry = stored.payments.get(PeriodNumber::new(22)).unwrap();
        assert_eq!(entry.payment_id.as_deref(), Some("CHQ-1042"));
        assert_eq!(entry.payment_date, Some(date));
    }

    #[tokio::test]
    async fn blank_reference_is_rejected() {
        let m = member("F-001", None, 21);
        let store = store_with(&m, &[]).await;
        let handler = RecordOfflinePaymentHandler::new(store, DuesSchedule::default());

        let err = handler
            .handle(RecordOfflinePaymentCommand {
                member_id: m.id,
                periods: vec![21],
                reference: "  ".to_string(),
                payment_date: None,
                now: june_2025(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, MembershipError::ValidationFailed { .. }));
    }

    #[tokio::test]
    async fn must_start_with_oldest_due_year() {
        let m = member("F-001", None, 21);
        let store = store_with(&m, &[]).await;
        let handler = RecordOfflinePaymentHandler::new(store, DuesSchedule::default());

        let err = handler
            .handle(RecordOfflinePaymentCommand {
                member_id: m.id,
                periods: vec![22],
                reference: "CHQ-1".to_string(),
                payment_date: None,
                now: june_2025(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, MembershipError::InvalidSelection { .. }));
    }
}
