//! VerifyPaymentHandler - Command handler for settling a checkout payment.
//!
//! The gateway signature proves the payment happened against some order.
//! The order is then fetched back and must have been opened for this
//! member, these periods and this amount. Before writing, the selection
//! is checked again against the member's record as it stands now; the
//! repository write itself refuses to overwrite a period settled under a
//! different payment reference.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::domain::foundation::{MemberId, Timestamp};
use crate::domain::membership::{
    validate_selection, MembershipError, PaymentApplication, PeriodNumber,
};
use crate::ports::{MemberRepository, PaymentErrorCode, PaymentGateway};

use super::checkout_notes::CheckoutNotes;
use super::schedule::{load_member, DuesSchedule};

#[derive(Debug, Clone)]
pub struct VerifyPaymentCommand {
    pub member_id: MemberId,
    pub order_id: String,
    pub payment_id: String,
    pub signature: String,
    pub periods: Vec<i32>,
    /// Total the client believes it paid.
    pub total_amount: i64,
    pub now: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyPaymentResult {
    pub member_id: MemberId,
    pub order_id: String,
    pub payment_id: String,
    pub periods: Vec<PeriodNumber>,
    pub amount_per_period: i64,
    pub total_amount: i64,
    pub payment_date: NaiveDate,
    /// Calendar years now paid, e.g. `[2023, 2024]`.
    pub activated_years: Vec<i32>,
    /// True when this payment had already been recorded.
    pub replayed: bool,
}

pub struct VerifyPaymentHandler {
    repository: Arc<dyn MemberRepository>,
    gateway: Arc<dyn PaymentGateway>,
    schedule: DuesSchedule,
}

impl VerifyPaymentHandler {
    pub fn new(
        repository: Arc<dyn MemberRepository>,
        gateway: Arc<dyn PaymentGateway>,
        schedule: DuesSchedule,
    ) -> Self {
        Self {
            repository,
            gateway,
            schedule,
        }
    }

    pub async fn handle(
        &self,
        cmd: VerifyPaymentCommand,
    ) -> Result<VerifyPaymentResult, MembershipError> {
        // 1. Signature
        self.gateway
            .verify_signature(&cmd.order_id, &cmd.payment_id, &cmd.signature)
            .map_err(|e| {
                tracing::warn!(
                    member_id = %cmd.member_id,
                    order_id = %cmd.order_id,
                    "Payment signature rejected"
                );
                match e.code {
                    PaymentErrorCode::InvalidSignature => MembershipError::InvalidPaymentSignature,
                    _ => MembershipError::PaymentGateway(e.message),
                }
            })?;

        // 2. Declared total
        let selected = self.schedule.periods(&cmd.periods)?;
        let expected = selected.len() as i64 * self.schedule.fee_per_period;
        if cmd.total_amount != expected {
            return Err(MembershipError::amount_mismatch(expected, cmd.total_amount));
        }

        // 3. The order must have been opened for exactly this payment
        let order = self
            .gateway
            .fetch_order(&cmd.order_id)
            .await
            .map_err(|e| MembershipError::PaymentGateway(e.message))?;
        let opened_for = CheckoutNotes::from_map(&order.notes);
        let order_matches = order.amount == expected
            && opened_for.is_some_and(|notes| {
                notes.member_id == cmd.member_id && notes.periods == selected
            });
        if !order_matches {
            tracing::warn!(
                member_id = %cmd.member_id,
                order_id = %cmd.order_id,
                order_amount = order.amount,
                "Payment does not match its order"
            );
            return Err(MembershipError::OrderMismatch {
                order_id: cmd.order_id,
            });
        }

        let payment = PaymentApplication::new(
            selected.clone(),
            cmd.payment_id.clone(),
            self.schedule.fee_per_period,
            cmd.now.date(),
        )?;

        // 4. Re-read and re-check against the current record
        let member = load_member(&self.repository, &cmd.member_id).await?;
        let replayed = !selected.is_empty()
            && selected.iter().all(|p| {
                member.payments.get(*p).is_some_and(|existing| {
                    existing.is_paid()
                        && existing.payment_id.as_deref() == Some(cmd.payment_id.as_str())
                })
            });

        if !replayed {
            let assessment = self.schedule.assess(&member, cmd.now);
            validate_selection(&assessment.due, &selected)?;

            // 5. Conditional write
            self.repository
                .apply_payment(&member.id, &payment)
                .await
                .map_err(MembershipError::from)?;

            tracing::info!(
                member_id = %member.id,
                payment_id = %cmd.payment_id,
                periods = ?cmd.periods,
                "Payment applied"
            );
        } else {
            tracing::info!(
                member_id = %member.id,
                payment_id = %cmd.payment_id,
                "Payment already recorded"
            );
        }

        Ok(VerifyPaymentResult {
            member_id: member.id,
            order_id: cmd.order_id,
            payment_id: cmd.payment_id,
            activated_years: payment.activated_years(),
            amount_per_period: payment.amount_per_period(),
            total_amount: payment.total_amount(),
            payment_date: payment.payment_date(),
            periods: selected,
            replayed,
        })
    }
}
