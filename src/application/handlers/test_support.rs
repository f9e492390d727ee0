//! Fixtures shared by handler tests.

use std::sync::Arc;

use chrono::{NaiveDate, TimeZone, Utc};

use crate::adapters::storage::InMemoryMemberStore;
use crate::domain::foundation::{DomainError, MemberId, Timestamp};
use crate::domain::membership::{
    Member, MemberDetails, PaymentApplication, PeriodCatalog, PeriodNumber,
};
use crate::ports::MemberRepository;

/// 15 June 2025, inside period 25.
pub fn june_2025() -> Timestamp {
    Timestamp::from_datetime(Utc.with_ymd_and_hms(2025, 6, 15, 10, 0, 0).unwrap())
}

pub fn member(folio: &str, email: Option<&str>, starting_period: i32) -> Member {
    Member::register(
        MemberDetails {
            folio_number: folio.to_string(),
            name: format!("Member {}", folio),
            email: email.map(String::from),
            phone: None,
            join_date: None,
        },
        Some(PeriodNumber::new(starting_period)),
        &PeriodCatalog::default(),
        june_2025(),
    )
    .unwrap()
}

/// Stores `member` with `paid` periods settled under one reference.
pub async fn store_with(member: &Member, paid: &[i32]) -> Arc<InMemoryMemberStore> {
    let store = Arc::new(InMemoryMemberStore::new());
    store.save(member).await.unwrap();
    if !paid.is_empty() {
        let payment = PaymentApplication::new(
            paid.iter().copied().map(PeriodNumber::new).collect(),
            "pay_seed",
            1200,
            NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
        )
        .unwrap();
        store.apply_payment(&member.id, &payment).await.unwrap();
    }
    store
}

/// Repository whose every call fails with a database error.
pub struct FailingRepository;

#[async_trait::async_trait]
impl MemberRepository for FailingRepository {
    async fn save(&self, _member: &Member) -> Result<(), DomainError> {
        Err(DomainError::database("connection refused"))
    }

    async fn update(&self, _member: &Member) -> Result<(), DomainError> {
        Err(DomainError::database("connection refused"))
    }

    async fn find_by_id(&self, _id: &MemberId) -> Result<Option<Member>, DomainError> {
        Err(DomainError::database("connection refused"))
    }

    async fn apply_payment(
        &self,
        _id: &MemberId,
        _payment: &PaymentApplication,
    ) -> Result<(), DomainError> {
        Err(DomainError::database("connection refused"))
    }

    async fn mark_exempt(
        &self,
        _id: &MemberId,
        _periods: &[PeriodNumber],
    ) -> Result<(), DomainError> {
        Err(DomainError::database("connection refused"))
    }
}
