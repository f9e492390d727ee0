//! HTTP error mapping.
//!
//! Every failure leaves the API as `{ success: false, errorCode, message }`
//! with a status chosen by error category.

use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::application::handlers::VerificationError;
use crate::domain::foundation::{AuthError, DomainError, ErrorCode};
use crate::domain::membership::MembershipError;
use crate::domain::otp::OtpError;

/// Standard error response body.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub success: bool,
    /// Error code for programmatic handling.
    pub error_code: String,
    /// Human-readable error message.
    pub message: String,
}

impl ErrorResponse {
    pub fn new(error_code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            success: false,
            error_code: error_code.into(),
            message: message.into(),
        }
    }
}

/// API error type that converts application errors to HTTP responses.
#[derive(Debug)]
pub enum ApiError {
    Membership(MembershipError),
    Verification(VerificationError),
    Auth(AuthError),
}

impl From<MembershipError> for ApiError {
    fn from(err: MembershipError) -> Self {
        ApiError::Membership(err)
    }
}

impl From<VerificationError> for ApiError {
    fn from(err: VerificationError) -> Self {
        match err {
            VerificationError::Member(e) => ApiError::Membership(e),
            other => ApiError::Verification(other),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        ApiError::Auth(err)
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        ApiError::Membership(MembershipError::from(err))
    }
}

fn membership_status(err: &MembershipError) -> StatusCode {
    match err {
        MembershipError::MemberNotFound(_) => StatusCode::NOT_FOUND,
        MembershipError::EmailMissing(_)
        | MembershipError::NothingDue
        | MembershipError::InvalidSelection { .. }
        | MembershipError::AmountMismatch { .. }
        | MembershipError::OrderMismatch { .. }
        | MembershipError::InvalidPaymentSignature
        | MembershipError::ValidationFailed { .. } => StatusCode::BAD_REQUEST,
        MembershipError::PeriodAlreadyPaid(_)
        | MembershipError::DuplicateFolio(_)
        | MembershipError::DuplicateEmail(_)
        | MembershipError::InvalidStatusTransition { .. } => StatusCode::CONFLICT,
        MembershipError::PaymentGateway(_) => StatusCode::BAD_GATEWAY,
        MembershipError::Infrastructure(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn otp_status(err: &OtpError) -> StatusCode {
    match err {
        OtpError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
        OtpError::Infrastructure(_) => StatusCode::INTERNAL_SERVER_ERROR,
        _ => StatusCode::BAD_REQUEST,
    }
}

fn auth_status(err: &AuthError) -> (StatusCode, ErrorCode) {
    match err {
        AuthError::InvalidCredentials | AuthError::InvalidToken | AuthError::TokenExpired => {
            (StatusCode::UNAUTHORIZED, ErrorCode::Unauthorized)
        }
        AuthError::RateLimited { .. } => (StatusCode::TOO_MANY_REQUESTS, ErrorCode::RateLimited),
        AuthError::ServiceUnavailable(_) => {
            (StatusCode::SERVICE_UNAVAILABLE, ErrorCode::InternalError)
        }
    }
}

impl ApiError {
    fn parts(&self) -> (StatusCode, ErrorCode, String, Option<u64>) {
        match self {
            ApiError::Membership(e) => (membership_status(e), e.code(), e.message(), None),
            ApiError::Verification(VerificationError::Otp(e)) => {
                let retry_after = match e {
                    OtpError::RateLimited { retry_after_secs } => Some(*retry_after_secs),
                    _ => None,
                };
                (otp_status(e), e.code(), e.to_string(), retry_after)
            }
            ApiError::Verification(VerificationError::Delivery(e)) => (
                StatusCode::BAD_GATEWAY,
                ErrorCode::EmailDeliveryFailed,
                format!("Could not send the verification email: {}", e),
                None,
            ),
            ApiError::Verification(VerificationError::Member(e)) => {
                (membership_status(e), e.code(), e.message(), None)
            }
            ApiError::Auth(e) => {
                let (status, code) = auth_status(e);
                let retry_after = match e {
                    AuthError::RateLimited { retry_after_secs } => Some(*retry_after_secs),
                    _ => None,
                };
                (status, code, e.to_string(), retry_after)
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message, retry_after) = self.parts();

        if status.is_server_error() {
            tracing::error!(status = %status, error_code = %code, %message, "Request failed");
        }

        let mut response = (status, Json(ErrorResponse::new(code.to_string(), message))).into_response();
        if let Some(secs) = retry_after {
            if let Ok(value) = HeaderValue::from_str(&secs.to_string()) {
                response.headers_mut().insert(header::RETRY_AFTER, value);
            }
        }
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::MemberId;
    use crate::domain::membership::PeriodNumber;

    fn status_of(err: impl Into<ApiError>) -> StatusCode {
        err.into().into_response().status()
    }

    #[test]
    fn membership_errors_map_by_category() {
        assert_eq!(
            status_of(MembershipError::MemberNotFound(MemberId::new())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(MembershipError::InvalidPaymentSignature),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(MembershipError::PeriodAlreadyPaid(PeriodNumber::new(23))),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_of(MembershipError::DuplicateFolio("F-1".to_string())),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_of(MembershipError::PaymentGateway("down".to_string())),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            status_of(MembershipError::infrastructure("db")),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn otp_failures_are_bad_requests() {
        for err in [
            OtpError::NotFound,
            OtpError::Expired,
            OtpError::TooManyAttempts,
            OtpError::Invalid { remaining: 2 },
        ] {
            assert_eq!(
                status_of(VerificationError::Otp(err)),
                StatusCode::BAD_REQUEST
            );
        }
    }

    #[test]
    fn rate_limit_sets_retry_after() {
        let response = ApiError::from(VerificationError::Otp(OtpError::RateLimited {
            retry_after_secs: 400,
        }))
        .into_response();

        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(response.headers()[header::RETRY_AFTER], "400");
    }

    #[test]
    fn bad_credentials_are_unauthorized() {
        assert_eq!(status_of(AuthError::InvalidCredentials), StatusCode::UNAUTHORIZED);
        assert_eq!(status_of(AuthError::TokenExpired), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn body_is_camel_case_with_success_false() {
        let body = serde_json::to_value(ErrorResponse::new("MEMBER_NOT_FOUND", "gone")).unwrap();
        assert_eq!(body["success"], false);
        assert_eq!(body["errorCode"], "MEMBER_NOT_FOUND");
        assert_eq!(body["message"], "gone");
    }
}
