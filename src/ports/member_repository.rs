//! Member repository port (write side).
//!
//! Defines the contract for persisting and retrieving Member aggregates and
//! writing payment fields onto them.
//!
//! # Example
//!
//! ```ignore
//! async fn record_payment(
//!     repo: &dyn MemberRepository,
//!     id: &MemberId,
//!     payment: &PaymentApplication,
//! ) -> Result<(), DomainError> {
//!     if repo.find_by_id(id).await?.is_none() {
//!         return Err(DomainError::new(ErrorCode::MemberNotFound, "Member not found"));
//!     }
//!     repo.apply_payment(id, payment).await
//! }
//! ```

use crate::domain::foundation::{DomainError, MemberId};
use crate::domain::membership::{Member, PaymentApplication, PeriodNumber};
use async_trait::async_trait;

/// Repository port for Member aggregate persistence.
///
/// Implementations must ensure:
/// - Unique folio number and unique (case-insensitive) email
/// - `apply_payment` and `mark_exempt` are atomic per member
#[async_trait]
pub trait MemberRepository: Send + Sync {
    /// Save a new member including its payment record.
    ///
    /// # Errors
    ///
    /// - `DuplicateFolio` / `DuplicateEmail` on uniqueness conflicts
    /// - `DatabaseError` on persistence failure
    async fn save(&self, member: &Member) -> Result<(), DomainError>;

    /// Update identity, contact, status and starting period.
    ///
    /// Payment fields are not touched; use `apply_payment` or `mark_exempt`.
    ///
    /// # Errors
    ///
    /// - `MemberNotFound` if the member doesn't exist
    /// - `DuplicateFolio` / `DuplicateEmail` on uniqueness conflicts
    async fn update(&self, member: &Member) -> Result<(), DomainError>;

    /// Find a member by id. Returns `None` if not found.
    async fn find_by_id(&self, id: &MemberId) -> Result<Option<Member>, DomainError>;

    /// Write a settled payment onto every listed period in one unit.
    ///
    /// The write is conditional: if any period is already paid under a
    /// different payment reference, nothing is written.
    ///
    /// # Errors
    ///
    /// - `MemberNotFound` if the member doesn't exist
    /// - `PeriodAlreadyPaid` when the condition fails
    async fn apply_payment(
        &self,
        id: &MemberId,
        payment: &PaymentApplication,
    ) -> Result<(), DomainError>;

    /// Mark periods exempt (amount zero).
    ///
    /// # Errors
    ///
    /// - `MemberNotFound` if the member doesn't exist
    /// - `PeriodAlreadyPaid` if any period is paid; nothing is written
    async fn mark_exempt(&self, id: &MemberId, periods: &[PeriodNumber])
        -> Result<(), DomainError>;
}
