//! Admin authentication middleware and extractor for axum.
//!
//! - `auth_middleware` - Layer that validates Bearer tokens and injects the admin into extensions
//! - `RequireAdmin` - Extractor that reads the admin back out
//!
//! The middleware uses the `SessionValidator` port, so it does not know the
//! token format.
//!
//! ```text
//! Request → auth_middleware → injects AuthenticatedAdmin into extensions
//!                                      ↓
//!                              Handler → RequireAdmin extractor reads from extensions
//! ```

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use crate::domain::foundation::{AuthError, AuthenticatedAdmin, ErrorCode};
use crate::ports::SessionValidator;

use crate::adapters::http::error::ErrorResponse;

/// Auth middleware state - wraps the session validator.
pub type AuthState = Arc<dyn SessionValidator>;

/// Rejects requests without a valid admin Bearer token.
///
/// Expects `Authorization: Bearer <token>`.
pub async fn auth_middleware(
    State(validator): State<AuthState>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "));

    let Some(token) = token else {
        return AuthRejection::Unauthenticated.into_response();
    };

    match validator.validate(token).await {
        Ok(admin) => {
            request.extensions_mut().insert(admin);
            next.run(request).await
        }
        Err(AuthError::ServiceUnavailable(msg)) => {
            tracing::error!("Auth service unavailable: {}", msg);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ErrorResponse::new(
                    ErrorCode::InternalError.to_string(),
                    "Authentication service unavailable",
                )),
            )
                .into_response()
        }
        Err(AuthError::TokenExpired) => AuthRejection::Expired.into_response(),
        Err(_) => AuthRejection::InvalidToken.into_response(),
    }
}

/// Extractor for handlers behind `auth_middleware`.
#[derive(Debug, Clone)]
pub struct RequireAdmin(pub AuthenticatedAdmin);

impl<S> axum::extract::FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut axum::http::request::Parts,
        _state: &'life1 S,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            parts
                .extensions
                .get::<AuthenticatedAdmin>()
                .cloned()
                .map(RequireAdmin)
                .ok_or(AuthRejection::Unauthenticated)
        })
    }
}

/// Rejection type for authentication failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthRejection {
    /// No Bearer token was provided.
    Unauthenticated,
    InvalidToken,
    Expired,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        let message = match self {
            AuthRejection::Unauthenticated => "Authentication required",
            AuthRejection::InvalidToken => "Invalid token",
            AuthRejection::Expired => "Token expired",
        };

        (
            StatusCode::UNAUTHORIZED,
            Json(ErrorResponse::new(ErrorCode::Unauthorized.to_string(), message)),
        )
            .into_response()
    }
}
