//! Member reader port (read side).
//!
//! Queries for self-service lookup, admin listings and reports.

use crate::domain::foundation::{DomainError, MemberId};
use crate::domain::membership::{Member, MemberStatus};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Default page size for admin listings.
pub const DEFAULT_PAGE_SIZE: u32 = 50;

/// Maximum page size for admin listings.
pub const MAX_PAGE_SIZE: u32 = 200;

/// Reader port for member queries.
#[async_trait]
pub trait MemberReader: Send + Sync {
    /// Non-removed members matching `query` on folio number (exact,
    /// case-insensitive) or name/email substring. At most `limit` results,
    /// ordered by folio number.
    async fn search(&self, query: &str, limit: u32) -> Result<Vec<MemberSummary>, DomainError>;

    /// Filtered, paginated listing ordered by folio number.
    async fn list(&self, filter: &MemberFilter) -> Result<MemberPage, DomainError>;

    /// Every non-removed member with payment records, for reports.
    async fn list_for_reports(&self) -> Result<Vec<Member>, DomainError>;
}

/// Listing filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct MemberFilter {
    pub status: Option<MemberStatus>,
    pub query: Option<String>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl MemberFilter {
    pub fn limit(&self) -> u32 {
        self.limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE)
    }

    pub fn offset(&self) -> u32 {
        self.offset.unwrap_or(0)
    }

    /// Whether `member` passes the status and query filters.
    pub fn matches(&self, member: &Member) -> bool {
        let status_ok = match self.status {
            Some(status) => member.status == status,
            None => true,
        };
        let query_ok = match self.query.as_deref().map(str::trim) {
            Some(q) if !q.is_empty() => member.matches_query(q),
            _ => true,
        };
        status_ok && query_ok
    }
}

/// Lightweight member view for lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemberSummary {
    pub id: MemberId,
    pub folio_number: String,
    pub name: String,
    pub email: Option<String>,
    pub status: MemberStatus,
}

impl From<&Member> for MemberSummary {
    fn from(member: &Member) -> Self {
        Self {
            id: member.id,
            folio_number: member.folio_number.clone(),
            name: member.name.clone(),
            email: member.email.clone(),
            status: member.status,
        }
    }
}

/// One page of a listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberPage {
    pub items: Vec<MemberSummary>,
    pub total: u64,
    pub limit: u32,
    pub offset: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::Timestamp;
    use crate::domain::membership::{MemberDetails, PeriodCatalog};

    fn member(folio: &str, name: &str) -> Member {
        Member::register(
            MemberDetails {
                folio_number: folio.to_string(),
                name: name.to_string(),
                email: None,
                phone: None,
                join_date: None,
            },
            None,
            &PeriodCatalog::default(),
            Timestamp::now(),
        )
        .unwrap()
    }

    #[test]
    fn limit_is_clamped() {
        let filter = MemberFilter {
            limit: Some(10_000),
            ..Default::default()
        };
        assert_eq!(filter.limit(), MAX_PAGE_SIZE);
        assert_eq!(MemberFilter::default().limit(), DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn blank_query_matches_everything() {
        let filter = MemberFilter {
            query: Some("  ".to_string()),
            ..Default::default()
        };
        assert!(filter.matches(&member("F1", "Ravi")));
    }

    #[test]
    fn status_filter_excludes_other_statuses() {
        let filter = MemberFilter {
            status: Some(MemberStatus::Inactive),
            ..Default::default()
        };
        assert!(!filter.matches(&member("F1", "Ravi")));
    }
}
