//! Row types shared by the member repository and reader.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{DomainError, ErrorCode, MemberId, Timestamp};
use crate::domain::membership::{
    Member, MemberPaymentRecord, MemberStatus, MembershipError, PeriodNumber, PeriodPayment,
};

pub(super) const MEMBER_COLUMNS: &str = "id, folio_number, name, email, phone, join_date, \
     starting_period, status, created_at, updated_at";

/// Database row representation of a member.
#[derive(Debug, sqlx::FromRow)]
pub(super) struct MemberRow {
    pub id: Uuid,
    pub folio_number: String,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub join_date: Option<NaiveDate>,
    pub starting_period: Option<i32>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Database row representation of one period's payment fields.
#[derive(Debug, sqlx::FromRow)]
pub(super) struct PaymentRow {
    pub member_id: Uuid,
    pub period_number: i32,
    pub amount: Option<i64>,
    pub payment_id: Option<String>,
    pub payment_date: Option<NaiveDate>,
}

impl MemberRow {
    pub fn into_member(self, payments: Vec<PaymentRow>) -> Result<Member, DomainError> {
        let status = parse_status(&self.status)?;

        let mut record = MemberPaymentRecord::new(
            self.starting_period.map(PeriodNumber::new),
            self.join_date,
        );
        for row in payments {
            record.set(PeriodNumber::new(row.period_number), row.into_payment());
        }

        Ok(Member {
            id: MemberId::from_uuid(self.id),
            folio_number: self.folio_number,
            name: self.name,
            email: self.email,
            phone: self.phone,
            status,
            payments: record,
            created_at: Timestamp::from_datetime(self.created_at),
            updated_at: Timestamp::from_datetime(self.updated_at),
        })
    }
}

impl PaymentRow {
    pub fn into_payment(self) -> PeriodPayment {
        PeriodPayment {
            amount: self.amount,
            payment_id: self.payment_id,
            payment_date: self.payment_date,
        }
    }
}

fn parse_status(s: &str) -> Result<MemberStatus, DomainError> {
    s.parse().map_err(|_| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid status value: {}", s),
        )
    })
}

pub(super) fn db_error(context: &str, e: sqlx::Error) -> DomainError {
    DomainError::new(ErrorCode::DatabaseError, format!("{}: {}", context, e))
}

/// Maps unique-index violations to the matching conflict code.
pub(super) fn conflict_or_db_error(context: &str, member: &Member, e: sqlx::Error) -> DomainError {
    if let sqlx::Error::Database(db_err) = &e {
        match db_err.constraint() {
            Some("members_folio_number_key") => {
                return MembershipError::DuplicateFolio(member.folio_number.clone()).into();
            }
            Some("members_email_key") => {
                return MembershipError::DuplicateEmail(member.email.clone().unwrap_or_default())
                    .into();
            }
            _ => {}
        }
    }
    db_error(context, e)
}

/// Loads payment rows for `ids`, grouped by member.
pub(super) async fn load_payments(
    pool: &PgPool,
    ids: &[Uuid],
) -> Result<HashMap<Uuid, Vec<PaymentRow>>, DomainError> {
    if ids.is_empty() {
        return Ok(HashMap::new());
    }

    let rows: Vec<PaymentRow> = sqlx::query_as(
        r#"
        SELECT member_id, period_number, amount, payment_id, payment_date
        FROM member_period_payments
        WHERE member_id = ANY($1)
        ORDER BY member_id, period_number
        "#,
    )
    .bind(ids)
    .fetch_all(pool)
    .await
    .map_err(|e| db_error("Failed to load payments", e))?;

    let mut grouped: HashMap<Uuid, Vec<PaymentRow>> = HashMap::new();
    for row in rows {
        grouped.entry(row.member_id).or_default().push(row);
    }
    Ok(grouped)
}

/// Attaches payments to member rows, preserving row order.
pub(super) async fn hydrate(pool: &PgPool, rows: Vec<MemberRow>) -> Result<Vec<Member>, DomainError> {
    let ids: Vec<Uuid> = rows.iter().map(|r| r.id).collect();
    let mut payments = load_payments(pool, &ids).await?;

    rows.into_iter()
        .map(|row| {
            let member_payments = payments.remove(&row.id).unwrap_or_default();
            row.into_member(member_payments)
        })
        .collect()
}
