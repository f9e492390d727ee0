//! HTTP handlers for the checkout endpoints.

use axum::extract::{Json, State};
use axum::response::IntoResponse;

use crate::application::handlers::{
    CreatePaymentOrderCommand, GetPaymentCalculationQuery, VerifyPaymentCommand,
};

use super::super::dto::parse_member_id;
use super::super::error::ApiError;
use super::super::state::AppState;
use super::dto::{
    CalculateRequest, CheckoutCalculationDto, CheckoutCalculationResponse, CreateOrderRequest,
    CreateOrderResponse, VerifyPaymentRequest, VerifyPaymentResponse,
};

/// POST /payments/calculate - Due periods with payment options
pub async fn calculate(
    State(state): State<AppState>,
    Json(request): Json<CalculateRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let query = GetPaymentCalculationQuery {
        member_id: parse_member_id(&request.member_id)?,
        now: state.now(),
    };
    let calculation = state.payment_calculation_handler().handle(query).await?;

    Ok(Json(CheckoutCalculationResponse {
        success: true,
        calculation: CheckoutCalculationDto::from(&calculation),
    }))
}

/// POST /payments/create-order - Open a checkout order for selected periods
pub async fn create_order(
    State(state): State<AppState>,
    Json(request): Json<CreateOrderRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = CreatePaymentOrderCommand {
        member_id: parse_member_id(&request.member_id)?,
        periods: request.periods,
        now: state.now(),
    };
    let result = state.create_order_handler().handle(cmd).await?;

    Ok(Json(CreateOrderResponse::from(result)))
}

/// POST /payments/verify - Verify the checkout signature and record the payment
pub async fn verify_payment(
    State(state): State<AppState>,
    Json(request): Json<VerifyPaymentRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = VerifyPaymentCommand {
        member_id: parse_member_id(&request.member_id)?,
        order_id: request.order_id,
        payment_id: request.payment_id,
        signature: request.signature,
        periods: request.periods,
        total_amount: request.total_amount,
        now: state.now(),
    };
    let result = state.verify_payment_handler().handle(cmd).await?;

    Ok(Json(VerifyPaymentResponse::from(result)))
}
