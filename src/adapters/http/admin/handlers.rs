//! HTTP handlers for the admin endpoints.
//!
//! Everything except login sits behind `auth_middleware`; handlers take
//! `RequireAdmin` so the acting admin is logged.

use axum::extract::{Json, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::handlers::{
    ChangeMemberStatusCommand, CreateMemberCommand, GrantExemptionCommand, LoginAdminCommand,
    RecordOfflinePaymentCommand, UpdateMemberCommand,
};
use crate::domain::membership::{MemberStatus, MembershipError};

use super::super::dto::{parse_member_id, rfc3339, MemberDto};
use super::super::error::ApiError;
use super::super::middleware::RequireAdmin;
use super::super::state::AppState;
use super::dto::{
    ChangeStatusRequest, CollectionReportDto, CollectionReportResponse, DefaulterDto,
    DefaultersResponse, ExemptionRequest, ExemptionResponse, ListParams, LoginRequest,
    LoginResponse, MemberListResponse, MemberRequest, MemberResponse, OfflinePaymentRequest,
    OfflinePaymentResponse,
};

/// POST /admin/login - Exchange credentials for a bearer token
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let session = state
        .login_handler()
        .handle(LoginAdminCommand {
            username: request.username,
            password: request.password,
            now: state.now(),
        })
        .await?;

    Ok(Json(LoginResponse {
        success: true,
        token: session.token,
        expires_at: rfc3339(&session.expires_at),
    }))
}

/// GET /admin/members - Filtered, paginated member list
pub async fn list_members(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(params): Query<ListParams>,
) -> Result<impl IntoResponse, ApiError> {
    let page = state
        .list_members_handler()
        .handle(params.into_filter()?)
        .await?;
    Ok(Json(MemberListResponse::from(page)))
}

/// GET /admin/members/:id - One member
pub async fn get_member(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let member = state.get_member_handler().handle(parse_member_id(&id)?).await?;
    Ok(Json(MemberResponse {
        success: true,
        member: MemberDto::from(&member),
    }))
}

/// POST /admin/members - Register a member
pub async fn create_member(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Json(request): Json<MemberRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let member = state
        .create_member_handler()
        .handle(CreateMemberCommand {
            details: request.details(),
            starting_period: request.starting_period,
            now: state.now(),
        })
        .await?;

    tracing::info!(admin = %admin.username, member_id = %member.id, "Admin created member");

    Ok((
        StatusCode::CREATED,
        Json(MemberResponse {
            success: true,
            member: MemberDto::from(&member),
        }),
    ))
}

/// PUT /admin/members/:id - Edit member details
pub async fn update_member(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<String>,
    Json(request): Json<MemberRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let member = state
        .update_member_handler()
        .handle(UpdateMemberCommand {
            member_id: parse_member_id(&id)?,
            details: request.details(),
            starting_period: request.starting_period,
            now: state.now(),
        })
        .await?;

    tracing::info!(admin = %admin.username, member_id = %member.id, "Admin updated member");

    Ok(Json(MemberResponse {
        success: true,
        member: MemberDto::from(&member),
    }))
}

/// POST /admin/members/:id/status - Activate, deactivate or remove
pub async fn change_status(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<String>,
    Json(request): Json<ChangeStatusRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let status: MemberStatus = request.status.parse().map_err(MembershipError::from)?;
    let member = state
        .change_status_handler()
        .handle(ChangeMemberStatusCommand {
            member_id: parse_member_id(&id)?,
            status,
            now: state.now(),
        })
        .await?;

    tracing::info!(admin = %admin.username, member_id = %member.id, status = %member.status, "Admin changed member status");

    Ok(Json(MemberResponse {
        success: true,
        member: MemberDto::from(&member),
    }))
}

/// POST /admin/members/:id/payments - Record a payment taken offline
pub async fn record_offline_payment(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<String>,
    Json(request): Json<OfflinePaymentRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let member_id = parse_member_id(&id)?;
    let result = state
        .offline_payment_handler()
        .handle(RecordOfflinePaymentCommand {
            member_id,
            periods: request.periods,
            reference: request.reference,
            payment_date: request.payment_date,
            now: state.now(),
        })
        .await?;

    tracing::info!(admin = %admin.username, member_id = %member_id, "Admin recorded offline payment");

    Ok((StatusCode::CREATED, Json(OfflinePaymentResponse::from(result))))
}

/// POST /admin/members/:id/exemptions - Waive unpaid periods
pub async fn grant_exemption(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<String>,
    Json(request): Json<ExemptionRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let member_id = parse_member_id(&id)?;
    let periods = state
        .exemption_handler()
        .handle(GrantExemptionCommand {
            member_id,
            periods: request.periods,
        })
        .await?;

    tracing::info!(admin = %admin.username, member_id = %member_id, "Admin granted exemption");

    Ok(Json(ExemptionResponse {
        success: true,
        periods: periods.iter().map(|p| p.value()).collect(),
    }))
}

/// GET /admin/reports/collection - Per-period collection totals
pub async fn collection_report(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> Result<impl IntoResponse, ApiError> {
    let report = state.collection_report_handler().handle(state.now()).await?;
    Ok(Json(CollectionReportResponse {
        success: true,
        report: CollectionReportDto::from(&report),
    }))
}

/// GET /admin/reports/defaulters - Members with dues outstanding
pub async fn defaulters(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> Result<impl IntoResponse, ApiError> {
    let list = state.defaulters_handler().handle(state.now()).await?;
    Ok(Json(DefaultersResponse {
        success: true,
        defaulters: list.iter().map(DefaulterDto::from).collect(),
    }))
}
