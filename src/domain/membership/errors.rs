//! Membership-specific error types.
//!
//! Errors raised by member management, dues calculation and payment
//! application.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | MemberNotFound | 404 |
//! | EmailMissing | 400 |
//! | NothingDue | 400 |
//! | InvalidSelection | 400 |
//! | AmountMismatch | 400 |
//! | OrderMismatch | 400 |
//! | InvalidPaymentSignature | 400 |
//! | ValidationFailed | 400 |
//! | PeriodAlreadyPaid | 409 |
//! | DuplicateFolio | 409 |
//! | DuplicateEmail | 409 |
//! | InvalidStatusTransition | 409 |
//! | PaymentGateway | 502 |
//! | Infrastructure | 500 |

use crate::domain::foundation::{DomainError, ErrorCode, MemberId, ValidationError};

use super::period::PeriodNumber;
use super::status::MemberStatus;

/// Membership-specific errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MembershipError {
    /// No member with this id.
    MemberNotFound(MemberId),

    /// Member has no email address on file.
    EmailMissing(MemberId),

    /// Every applicable period up to now is settled.
    NothingDue,

    /// Selected periods are not an oldest-first prefix of the due periods.
    InvalidSelection { reason: String },

    /// Client-declared total differs from the server-computed total.
    AmountMismatch { expected: i64, actual: i64 },

    /// Payment details differ from what the checkout order was opened for.
    OrderMismatch { order_id: String },

    /// Period is already settled under a different payment reference.
    PeriodAlreadyPaid(PeriodNumber),

    /// Another member already uses this folio number.
    DuplicateFolio(String),

    /// Another member already uses this email address.
    DuplicateEmail(String),

    /// Status change not permitted from the current status.
    InvalidStatusTransition {
        from: MemberStatus,
        to: MemberStatus,
    },

    /// Gateway signature did not match the order and payment ids.
    InvalidPaymentSignature,

    /// Payment gateway call failed.
    PaymentGateway(String),

    /// Input validation failed.
    ValidationFailed { field: String, message: String },

    /// Storage or other collaborator failure.
    Infrastructure(String),
}

impl MembershipError {
    pub fn member_not_found(id: MemberId) -> Self {
        MembershipError::MemberNotFound(id)
    }

    pub fn email_missing(id: MemberId) -> Self {
        MembershipError::EmailMissing(id)
    }

    pub fn invalid_selection(reason: impl Into<String>) -> Self {
        MembershipError::InvalidSelection {
            reason: reason.into(),
        }
    }

    pub fn amount_mismatch(expected: i64, actual: i64) -> Self {
        MembershipError::AmountMismatch { expected, actual }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        MembershipError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        MembershipError::Infrastructure(message.into())
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            MembershipError::MemberNotFound(_) => ErrorCode::MemberNotFound,
            MembershipError::EmailMissing(_) => ErrorCode::EmailMissing,
            MembershipError::NothingDue => ErrorCode::NothingDue,
            MembershipError::InvalidSelection { .. } => ErrorCode::InvalidSelection,
            MembershipError::AmountMismatch { .. } => ErrorCode::AmountMismatch,
            MembershipError::OrderMismatch { .. } => ErrorCode::OrderMismatch,
            MembershipError::PeriodAlreadyPaid(_) => ErrorCode::PeriodAlreadyPaid,
            MembershipError::DuplicateFolio(_) => ErrorCode::DuplicateFolio,
            MembershipError::DuplicateEmail(_) => ErrorCode::DuplicateEmail,
            MembershipError::InvalidStatusTransition { .. } => ErrorCode::InvalidStateTransition,
            MembershipError::InvalidPaymentSignature => ErrorCode::InvalidPaymentSignature,
            MembershipError::PaymentGateway(_) => ErrorCode::PaymentGatewayError,
            MembershipError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            MembershipError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    /// Returns a user-friendly error message.
    pub fn message(&self) -> String {
        match self {
            MembershipError::MemberNotFound(id) => format!("Member not found: {}", id),
            MembershipError::EmailMissing(_) => {
                "No email address on file for this member".to_string()
            }
            MembershipError::NothingDue => "No dues are outstanding".to_string(),
            MembershipError::InvalidSelection { reason } => {
                format!("Invalid period selection: {}", reason)
            }
            MembershipError::AmountMismatch { expected, actual } => {
                format!("Amount mismatch: expected {}, got {}", expected, actual)
            }
            MembershipError::OrderMismatch { order_id } => {
                format!("Payment does not match order {}", order_id)
            }
            MembershipError::PeriodAlreadyPaid(period) => {
                format!("Period {} has already been paid", period.label())
            }
            MembershipError::DuplicateFolio(folio) => {
                format!("Folio number '{}' is already registered", folio)
            }
            MembershipError::DuplicateEmail(email) => {
                format!("Email '{}' is already registered", email)
            }
            MembershipError::InvalidStatusTransition { from, to } => {
                format!("Cannot change member status from {} to {}", from, to)
            }
            MembershipError::InvalidPaymentSignature => "Invalid payment signature".to_string(),
            MembershipError::PaymentGateway(msg) => format!("Payment gateway error: {}", msg),
            MembershipError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            MembershipError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for MembershipError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for MembershipError {}

impl From<ValidationError> for MembershipError {
    fn from(err: ValidationError) -> Self {
        let field = match &err {
            ValidationError::EmptyField { field }
            | ValidationError::OutOfRange { field, .. }
            | ValidationError::InvalidFormat { field, .. } => field.clone(),
        };
        MembershipError::ValidationFailed {
            field,
            message: err.to_string(),
        }
    }
}

impl From<DomainError> for MembershipError {
    fn from(err: DomainError) -> Self {
        let detail = |key: &str| err.details.get(key).cloned();

        let recovered = match err.code {
            ErrorCode::MemberNotFound => detail("member_id")
                .and_then(|id| id.parse().ok())
                .map(MembershipError::MemberNotFound),
            ErrorCode::PeriodAlreadyPaid => detail("period")
                .and_then(|n| n.parse().ok())
                .map(|n| MembershipError::PeriodAlreadyPaid(PeriodNumber::new(n))),
            ErrorCode::DuplicateFolio => detail("folio_number").map(MembershipError::DuplicateFolio),
            ErrorCode::DuplicateEmail => detail("email").map(MembershipError::DuplicateEmail),
            ErrorCode::InvalidPaymentSignature => Some(MembershipError::InvalidPaymentSignature),
            ErrorCode::PaymentGatewayError => Some(MembershipError::PaymentGateway(err.message.clone())),
            ErrorCode::ValidationFailed
            | ErrorCode::EmptyField
            | ErrorCode::OutOfRange
            | ErrorCode::InvalidFormat => Some(MembershipError::ValidationFailed {
                field: detail("field").unwrap_or_else(|| "unknown".to_string()),
                message: err.message.clone(),
            }),
            _ => None,
        };

        recovered.unwrap_or_else(|| MembershipError::Infrastructure(err.to_string()))
    }
}

/// Carries the variant payload in `details` so the conversion back to
/// `MembershipError` is lossless.
impl From<MembershipError> for DomainError {
    fn from(err: MembershipError) -> Self {
        let base = DomainError::new(err.code(), err.message());
        match err {
            MembershipError::MemberNotFound(id) | MembershipError::EmailMissing(id) => {
                base.with_detail("member_id", id.to_string())
            }
            MembershipError::PeriodAlreadyPaid(period) => {
                base.with_detail("period", period.value().to_string())
            }
            MembershipError::DuplicateFolio(folio) => base.with_detail("folio_number", folio),
            MembershipError::DuplicateEmail(email) => base.with_detail("email", email),
            MembershipError::ValidationFailed { field, .. } => base.with_detail("field", field),
            _ => base,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_maps_to_member_code() {
        let err = MembershipError::member_not_found(MemberId::new());
        assert_eq!(err.code(), ErrorCode::MemberNotFound);
        assert!(err.message().starts_with("Member not found"));
    }

    #[test]
    fn amount_mismatch_reports_both_values() {
        let err = MembershipError::amount_mismatch(3600, 2400);
        assert_eq!(err.message(), "Amount mismatch: expected 3600, got 2400");
    }

    #[test]
    fn already_paid_uses_period_label() {
        let err = MembershipError::PeriodAlreadyPaid(PeriodNumber::new(23));
        assert_eq!(err.message(), "Period 2023-24 has already been paid");
        assert_eq!(err.code(), ErrorCode::PeriodAlreadyPaid);
    }

    #[test]
    fn status_transition_names_both_states() {
        let err = MembershipError::InvalidStatusTransition {
            from: MemberStatus::Removed,
            to: MemberStatus::Active,
        };
        assert_eq!(
            err.to_string(),
            "Cannot change member status from removed to active"
        );
    }

    #[test]
    fn validation_error_keeps_field_name() {
        let err: MembershipError = ValidationError::empty_field("folio_number").into();
        match err {
            MembershipError::ValidationFailed { field, .. } => assert_eq!(field, "folio_number"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn database_domain_error_becomes_infrastructure() {
        let err: MembershipError = DomainError::database("connection reset").into();
        assert!(matches!(err, MembershipError::Infrastructure(_)));
        assert_eq!(err.code(), ErrorCode::DatabaseError);
    }

    #[test]
    fn gateway_domain_error_is_preserved() {
        let err: MembershipError =
            DomainError::new(ErrorCode::PaymentGatewayError, "timeout").into();
        assert_eq!(err, MembershipError::PaymentGateway("timeout".to_string()));
    }

    #[test]
    fn round_trips_into_domain_error() {
        let err: DomainError = MembershipError::NothingDue.into();
        assert_eq!(err.code, ErrorCode::NothingDue);
        assert_eq!(err.message, "No dues are outstanding");
    }

    #[test]
    fn conflict_variants_survive_domain_error_round_trip() {
        let id = MemberId::new();
        for original in [
            MembershipError::MemberNotFound(id),
            MembershipError::PeriodAlreadyPaid(PeriodNumber::new(24)),
            MembershipError::DuplicateFolio("F-100".to_string()),
            MembershipError::DuplicateEmail("a@b.com".to_string()),
        ] {
            let domain: DomainError = original.clone().into();
            assert_eq!(MembershipError::from(domain), original);
        }
    }
}
