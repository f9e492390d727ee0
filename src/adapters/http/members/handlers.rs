//! HTTP handlers for the self-service member endpoints.

use axum::extract::{Json, Path, Query, State};
use axum::response::IntoResponse;

use crate::application::handlers::{
    GetMembershipYearsQuery, GetPaymentCalculationQuery, SearchMembersQuery, SendOtpCommand,
    VerifyOtpCommand,
};

use super::super::dto::{parse_member_id, rfc3339, MemberDto};
use super::super::error::ApiError;
use super::super::state::AppState;
use super::dto::{
    CalculationDto, CalculationResponse, MemberMatchDto, MembershipYearsDto,
    MembershipYearsResponse, SearchParams, SearchResponse, SendOtpRequest, SendOtpResponse,
    VerifyOtpRequest, VerifyOtpResponse,
};

/// GET /members/search?q= - Find members by folio number, name or email
pub async fn search_members(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<impl IntoResponse, ApiError> {
    let found = state
        .search_members_handler()
        .handle(SearchMembersQuery {
            query: params.q,
            limit: params.limit,
        })
        .await?;

    Ok(Json(SearchResponse {
        success: true,
        members: found.into_iter().map(MemberMatchDto::from).collect(),
    }))
}

/// GET /members/:id/payment-calculation - Due periods and totals
pub async fn get_payment_calculation(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let query = GetPaymentCalculationQuery {
        member_id: parse_member_id(&id)?,
        now: state.now(),
    };
    let calculation = state.payment_calculation_handler().handle(query).await?;

    Ok(Json(CalculationResponse {
        success: true,
        calculation: CalculationDto::from(&calculation),
    }))
}

/// GET /members/:id/membership-years - Paid years with gap detection
pub async fn get_membership_years(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let query = GetMembershipYearsQuery {
        member_id: parse_member_id(&id)?,
        now: state.now(),
    };
    let years = state.membership_years_handler().handle(query).await?;

    Ok(Json(MembershipYearsResponse {
        success: true,
        membership_years: MembershipYearsDto::from(&years),
    }))
}

/// POST /members/send-otp - Email a passcode to the member
pub async fn send_otp(
    State(state): State<AppState>,
    Json(request): Json<SendOtpRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = SendOtpCommand {
        member_id: parse_member_id(&request.member_id)?,
        now: state.now(),
    };
    let sent = state.send_otp_handler().handle(cmd).await?;

    Ok(Json(SendOtpResponse {
        success: true,
        email: sent.masked_email,
        expires_at: rfc3339(&sent.expires_at),
    }))
}

/// POST /members/verify-otp - Check a passcode
pub async fn verify_otp(
    State(state): State<AppState>,
    Json(request): Json<VerifyOtpRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = VerifyOtpCommand {
        member_id: parse_member_id(&request.member_id)?,
        otp: request.otp,
        now: state.now(),
    };
    let member = state.verify_otp_handler().handle(cmd).await?;

    Ok(Json(VerifyOtpResponse {
        success: true,
        verified: true,
        member: MemberDto::from(&member),
    }))
}
