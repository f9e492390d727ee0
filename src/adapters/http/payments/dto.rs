//! HTTP DTOs for the checkout endpoints.
//!
//! Checkout callback fields keep the gateway's snake_case names.

use serde::{Deserialize, Serialize};

use crate::application::handlers::{
    CreatePaymentOrderResult, PaymentCalculation, VerifyPaymentResult,
};
use crate::domain::membership::PaymentOption;

use super::super::dto::{DuePeriodDto, PeriodStatusDto};

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculateRequest {
    pub member_id: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub member_id: String,
    pub periods: Vec<i32>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyPaymentRequest {
    #[serde(rename = "razorpay_order_id")]
    pub order_id: String,
    #[serde(rename = "razorpay_payment_id")]
    pub payment_id: String,
    #[serde(rename = "razorpay_signature")]
    pub signature: String,
    pub member_id: String,
    pub periods: Vec<i32>,
    pub total_amount: i64,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentOptionDto {
    pub id: String,
    pub name: String,
    pub periods: Vec<i32>,
    pub total_amount: i64,
    pub remaining: usize,
}

impl From<&PaymentOption> for PaymentOptionDto {
    fn from(o: &PaymentOption) -> Self {
        Self {
            id: o.id(),
            name: o.name.clone(),
            periods: o.periods.iter().map(|p| p.value()).collect(),
            total_amount: o.total_amount,
            remaining: o.remaining,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutCalculationDto {
    pub member_name: String,
    pub folio_number: String,
    pub current_period: i32,
    pub payment_status: Vec<PeriodStatusDto>,
    pub unpaid_periods: Vec<DuePeriodDto>,
    pub total_due: i64,
    pub can_pay: bool,
    pub payment_options: Vec<PaymentOptionDto>,
}

impl From<&PaymentCalculation> for CheckoutCalculationDto {
    fn from(c: &PaymentCalculation) -> Self {
        Self {
            member_name: c.member.name.clone(),
            folio_number: c.member.folio_number.clone(),
            current_period: c.assessment.current_period.value(),
            payment_status: c.assessment.statuses.iter().map(Into::into).collect(),
            unpaid_periods: c.assessment.due.iter().map(Into::into).collect(),
            total_due: c.assessment.total_due(),
            can_pay: c.assessment.can_pay(),
            payment_options: c.options.iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CheckoutCalculationResponse {
    pub success: bool,
    pub calculation: CheckoutCalculationDto,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderResponse {
    pub success: bool,
    pub order_id: String,
    pub amount: i64,
    pub currency: String,
    pub key_id: String,
    pub periods: Vec<DuePeriodDto>,
}

impl From<CreatePaymentOrderResult> for CreateOrderResponse {
    fn from(r: CreatePaymentOrderResult) -> Self {
        Self {
            success: true,
            order_id: r.order.id,
            amount: r.order.amount,
            currency: r.order.currency,
            key_id: r.key_id,
            periods: r.periods.iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentDto {
    pub member_id: String,
    pub order_id: String,
    pub payment_id: String,
    pub periods: Vec<i32>,
    pub amount_per_period: i64,
    pub total_amount: i64,
    pub payment_date: chrono::NaiveDate,
    pub replayed: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyPaymentResponse {
    pub success: bool,
    pub payment: PaymentDto,
    pub activated_years: Vec<i32>,
}

impl From<VerifyPaymentResult> for VerifyPaymentResponse {
    fn from(r: VerifyPaymentResult) -> Self {
        Self {
            success: true,
            payment: PaymentDto {
                member_id: r.member_id.to_string(),
                order_id: r.order_id,
                payment_id: r.payment_id,
                periods: r.periods.iter().map(|p| p.value()).collect(),
                amount_per_period: r.amount_per_period,
                total_amount: r.total_amount,
                payment_date: r.payment_date,
                replayed: r.replayed,
            },
            activated_years: r.activated_years,
        }
    }
}
