//! CreatePaymentOrderHandler - Command handler for opening a checkout order.

use std::sync::Arc;

use crate::domain::foundation::{MemberId, Timestamp};
use crate::domain::membership::{validate_selection, DuePeriod, MembershipError};
use crate::ports::{CreateOrderRequest, GatewayOrder, MemberRepository, PaymentGateway};

use super::checkout_notes::CheckoutNotes;
use super::schedule::{load_member, DuesSchedule};

/// Gateway receipts are limited to 40 characters.
const MAX_RECEIPT_LEN: usize = 40;

#[derive(Debug, Clone)]
pub struct CreatePaymentOrderCommand {
    pub member_id: MemberId,
    pub periods: Vec<i32>,
    pub now: Timestamp,
}

#[derive(Debug, Clone)]
pub struct CreatePaymentOrderResult {
    pub order: GatewayOrder,
    /// Public key for the checkout widget.
    pub key_id: String,
    pub periods: Vec<DuePeriod>,
}

pub struct CreatePaymentOrderHandler {
    repository: Arc<dyn MemberRepository>,
    gateway: Arc<dyn PaymentGateway>,
    schedule: DuesSchedule,
    currency: String,
}

impl CreatePaymentOrderHandler {
    pub fn new(
        repository: Arc<dyn MemberRepository>,
        gateway: Arc<dyn PaymentGateway>,
        schedule: DuesSchedule,
        currency: impl Into<String>,
    ) -> Self {
        Self {
            repository,
            gateway,
            schedule,
            currency: currency.into(),
        }
    }

    pub async fn handle(
        &self,
        cmd: CreatePaymentOrderCommand,
    ) -> Result<CreatePaymentOrderResult, MembershipError> {
        // 1. Selection must be an oldest-first prefix of what is due now
        let member = load_member(&self.repository, &cmd.member_id).await?;
        let selected = self.schedule.periods(&cmd.periods)?;
        let assessment = self.schedule.assess(&member, cmd.now);
        validate_selection(&assessment.due, &selected)?;

        let periods: Vec<DuePeriod> = assessment.due[..selected.len()].to_vec();
        let amount = periods.len() as i64 * self.schedule.fee_per_period;

        // 2. Open the order
        let notes = CheckoutNotes {
            member_id: member.id,
            periods: selected,
        }
        .to_map(&member.folio_number);

        let receipt: String = format!("dues_{}_{}", member.folio_number, cmd.now.as_unix_secs())
            .chars()
            .take(MAX_RECEIPT_LEN)
            .collect();

        let order = self
            .gateway
            .create_order(CreateOrderRequest {
                amount,
                currency: self.currency.clone(),
                receipt,
                notes,
            })
            .await
            .map_err(|e| {
                tracing::error!(member_id = %member.id, error = %e, "Order creation failed");
                MembershipError::PaymentGateway(e.message)
            })?;

        tracing::info!(
            member_id = %member.id,
            order_id = %order.id,
            amount,
            periods = periods.len(),
            "Payment order created"
        );

        Ok(CreatePaymentOrderResult {
            order,
            key_id: self.gateway.key_id().to_string(),
            periods,
        })
    }
}
