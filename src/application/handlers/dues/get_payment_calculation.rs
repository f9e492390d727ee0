//! GetPaymentCalculationHandler - Query handler for a member's dues.

use std::sync::Arc;

use crate::domain::foundation::{MemberId, Timestamp};
use crate::domain::membership::{
    build_payment_options, Member, MembershipError, PaymentAssessment, PaymentOption,
};
use crate::ports::MemberRepository;

use super::schedule::{load_member, DuesSchedule};

/// Query for the dues of one member at `now`.
#[derive(Debug, Clone)]
pub struct GetPaymentCalculationQuery {
    pub member_id: MemberId,
    pub now: Timestamp,
}

/// Member, per-period classification and the plans on offer.
#[derive(Debug, Clone)]
pub struct PaymentCalculation {
    pub member: Member,
    pub assessment: PaymentAssessment,
    pub options: Vec<PaymentOption>,
}

pub struct GetPaymentCalculationHandler {
    repository: Arc<dyn MemberRepository>,
    schedule: DuesSchedule,
}

impl GetPaymentCalculationHandler {
    pub fn new(repository: Arc<dyn MemberRepository>, schedule: DuesSchedule) -> Self {
        Self {
            repository,
            schedule,
        }
    }

    pub async fn handle(
        &self,
        query: GetPaymentCalculationQuery,
    ) -> Result<PaymentCalculation, MembershipError> {
        let member = load_member(&self.repository, &query.member_id).await?;
        let assessment = self.schedule.assess(&member, query.now);
        let options = build_payment_options(&assessment.due, self.schedule.fee_per_period);

        tracing::debug!(
            member_id = %member.id,
            years_owed = assessment.years_owed(),
            "Calculated dues"
        );

        Ok(PaymentCalculation {
            member,
            assessment,
            options,
        })
    }
}
