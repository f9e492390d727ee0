//! In-Memory Member Store
//!
//! Implements both member ports over a single map. Used when no database
//! is configured and throughout the test suites.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, MemberId};
use crate::domain::membership::{
    Member, MembershipError, PaymentApplication, PeriodNumber,
};
use crate::ports::{MemberFilter, MemberPage, MemberReader, MemberRepository, MemberSummary};

/// In-memory storage for members and their payment records.
#[derive(Debug, Clone, Default)]
pub struct InMemoryMemberStore {
    members: Arc<RwLock<HashMap<MemberId, Member>>>,
}

impl InMemoryMemberStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a store with members, skipping uniqueness checks.
    pub fn with_members(members: impl IntoIterator<Item = Member>) -> Self {
        let map = members.into_iter().map(|m| (m.id, m)).collect();
        Self {
            members: Arc::new(RwLock::new(map)),
        }
    }

    pub async fn len(&self) -> usize {
        self.members.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.members.read().await.is_empty()
    }
}

/// Rejects `member` if another member shares its folio number or email.
fn check_unique(members: &HashMap<MemberId, Member>, member: &Member) -> Result<(), DomainError> {
    let folio = member.folio_number.to_lowercase();
    let email = member.email.as_deref().map(str::to_lowercase);

    for other in members.values().filter(|m| m.id != member.id) {
        if other.folio_number.to_lowercase() == folio {
            return Err(MembershipError::DuplicateFolio(member.folio_number.clone()).into());
        }
        if let (Some(email), Some(other_email)) = (&email, &other.email) {
            if other_email.to_lowercase() == *email {
                return Err(MembershipError::DuplicateEmail(email.clone()).into());
            }
        }
    }
    Ok(())
}

fn sorted_by_folio(mut members: Vec<&Member>) -> Vec<&Member> {
    members.sort_by(|a, b| a.folio_number.cmp(&b.folio_number));
    members
}

#[async_trait]
impl MemberRepository for InMemoryMemberStore {
    async fn save(&self, member: &Member) -> Result<(), DomainError> {
        let mut members = self.members.write().await;
        check_unique(&members, member)?;
        members.insert(member.id, member.clone());
        Ok(())
    }

    async fn update(&self, member: &Member) -> Result<(), DomainError> {
        let mut members = self.members.write().await;
        check_unique(&members, member)?;

        let stored = members
            .get_mut(&member.id)
            .ok_or(MembershipError::MemberNotFound(member.id))?;

        // Period entries are owned by apply_payment and mark_exempt.
        let mut payments = stored.payments.clone();
        payments.starting_period = member.payments.starting_period;
        payments.join_date = member.payments.join_date;
        *stored = Member {
            payments,
            ..member.clone()
        };
        Ok(())
    }

    async fn find_by_id(&self, id: &MemberId) -> Result<Option<Member>, DomainError> {
        Ok(self.members.read().await.get(id).cloned())
    }

    async fn apply_payment(
        &self,
        id: &MemberId,
        payment: &PaymentApplication,
    ) -> Result<(), DomainError> {
        let mut members = self.members.write().await;
        let member = members
            .get_mut(id)
            .ok_or(MembershipError::MemberNotFound(*id))?;

        if let Some(period) = payment.conflict_with(&member.payments) {
            return Err(MembershipError::PeriodAlreadyPaid(period).into());
        }

        payment.apply_to(&mut member.payments);
        Ok(())
    }

    async fn mark_exempt(
        &self,
        id: &MemberId,
        periods: &[PeriodNumber],
    ) -> Result<(), DomainError> {
        let mut members = self.members.write().await;
        let member = members
            .get_mut(id)
            .ok_or(MembershipError::MemberNotFound(*id))?;

        if let Some(period) = periods.iter().copied().find(|p| member.payments.is_paid(*p)) {
            return Err(MembershipError::PeriodAlreadyPaid(period).into());
        }

        for period in periods {
            member.payments.mark_exempt(*period)?;
        }
        Ok(())
    }
}

#[async_trait]
impl MemberReader for InMemoryMemberStore {
    async fn search(&self, query: &str, limit: u32) -> Result<Vec<MemberSummary>, DomainError> {
        let members = self.members.read().await;
        let matches = members
            .values()
            .filter(|m| !m.is_removed() && m.matches_query(query))
            .collect();

        Ok(sorted_by_folio(matches)
            .into_iter()
            .take(limit as usize)
            .map(MemberSummary::from)
            .collect())
    }

    async fn list(&self, filter: &MemberFilter) -> Result<MemberPage, DomainError> {
        let members = self.members.read().await;
        let matches = sorted_by_folio(members.values().filter(|m| filter.matches(m)).collect());

        let limit = filter.limit();
        let offset = filter.offset();
        let items = matches
            .iter()
            .skip(offset as usize)
            .take(limit as usize)
            .map(|m| MemberSummary::from(*m))
            .collect();

        Ok(MemberPage {
            items,
            total: matches.len() as u64,
            limit,
            offset,
        })
    }

    async fn list_for_reports(&self) -> Result<Vec<Member>, DomainError> {
        let members = self.members.read().await;
        Ok(sorted_by_folio(members.values().filter(|m| !m.is_removed()).collect())
            .into_iter()
            .cloned()
            .collect())
    }
}
