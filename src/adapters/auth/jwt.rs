//! HS256 JWT sessions for administrators.
//!
//! Tokens carry `sub` (username), `iat`, `exp` and a fixed `iss`.

use async_trait::async_trait;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{AuthError, AuthenticatedAdmin, Timestamp};
use crate::ports::{IssuedSession, SessionIssuer, SessionValidator};

const ISSUER: &str = "member-dues";

#[derive(Debug, Serialize, Deserialize)]
struct AdminClaims {
    sub: String,
    iss: String,
    iat: u64,
    exp: u64,
}

/// Signs and validates admin tokens with a shared secret.
pub struct JwtSessions {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl_secs: u64,
}

impl JwtSessions {
    pub fn new(secret: &SecretString, ttl_secs: u64) -> Self {
        let bytes = secret.expose_secret().as_bytes();
        Self {
            encoding_key: EncodingKey::from_secret(bytes),
            decoding_key: DecodingKey::from_secret(bytes),
            ttl_secs,
        }
    }

    fn validation() -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[ISSUER]);
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);
        validation.leeway = 0;
        validation
    }
}

impl std::fmt::Debug for JwtSessions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtSessions")
            .field("ttl_secs", &self.ttl_secs)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl SessionIssuer for JwtSessions {
    async fn issue(
        &self,
        admin: &AuthenticatedAdmin,
        now: Timestamp,
    ) -> Result<IssuedSession, AuthError> {
        let expires_at = now.plus_secs(self.ttl_secs);
        let claims = AdminClaims {
            sub: admin.username.clone(),
            iss: ISSUER.to_string(),
            iat: now.as_unix_secs(),
            exp: expires_at.as_unix_secs(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AuthError::service_unavailable(format!("failed to sign token: {}", e)))?;

        Ok(IssuedSession { token, expires_at })
    }
}

#[async_trait]
impl SessionValidator for JwtSessions {
    async fn validate(&self, token: &str) -> Result<AuthenticatedAdmin, AuthError> {
        let data = decode::<AdminClaims>(token, &self.decoding_key, &Self::validation()).map_err(
            |e| {
                use jsonwebtoken::errors::ErrorKind;
                match e.kind() {
                    ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                    _ => {
                        tracing::debug!(error = %e, "Rejected admin token");
                        AuthError::InvalidToken
                    }
                }
            },
        )?;

        Ok(AuthenticatedAdmin::new(data.claims.sub))
    }
}
