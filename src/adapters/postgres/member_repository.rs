//! PostgreSQL implementation of MemberRepository.
//!
//! Members live in `members`; each period's payment fields are a row in
//! `member_period_payments` keyed by `(member_id, period_number)`.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::domain::foundation::{DomainError, MemberId};
use crate::domain::membership::{
    Member, MemberPaymentRecord, MembershipError, PaymentApplication, PeriodNumber,
};
use crate::ports::MemberRepository;

use super::member_rows::{
    conflict_or_db_error, db_error, load_payments, MemberRow, PaymentRow, MEMBER_COLUMNS,
};

/// PostgreSQL implementation of the MemberRepository port.
pub struct PostgresMemberRepository {
    pool: PgPool,
}

impl PostgresMemberRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn find_one(&self, clause: &str, value: String) -> Result<Option<Member>, DomainError> {
        let sql = format!("SELECT {} FROM members WHERE {}", MEMBER_COLUMNS, clause);
        let row: Option<MemberRow> = sqlx::query_as(&sql)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Failed to find member", e))?;

        match row {
            Some(row) => {
                let mut payments = load_payments(&self.pool, &[row.id]).await?;
                let member_payments = payments.remove(&row.id).unwrap_or_default();
                Ok(Some(row.into_member(member_payments)?))
            }
            None => Ok(None),
        }
    }
}

fn member_not_found(id: &MemberId) -> DomainError {
    MembershipError::MemberNotFound(*id).into()
}

/// Locks the member row and the requested payment rows, returning the
/// current record for those periods.
async fn lock_periods(
    tx: &mut Transaction<'_, Postgres>,
    id: &MemberId,
    periods: &[PeriodNumber],
) -> Result<MemberPaymentRecord, DomainError> {
    let locked: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM members WHERE id = $1 FOR UPDATE")
        .bind(id.as_uuid())
        .fetch_optional(&mut **tx)
        .await
        .map_err(|e| db_error("Failed to lock member", e))?;
    if locked.is_none() {
        return Err(member_not_found(id));
    }

    let numbers: Vec<i32> = periods.iter().map(PeriodNumber::value).collect();
    let rows: Vec<PaymentRow> = sqlx::query_as(
        r#"
        SELECT member_id, period_number, amount, payment_id, payment_date
        FROM member_period_payments
        WHERE member_id = $1 AND period_number = ANY($2)
        FOR UPDATE
        "#,
    )
    .bind(id.as_uuid())
    .bind(&numbers)
    .fetch_all(&mut **tx)
    .await
    .map_err(|e| db_error("Failed to read payments", e))?;

    let mut record = MemberPaymentRecord::default();
    for row in rows {
        record.set(PeriodNumber::new(row.period_number), row.into_payment());
    }
    Ok(record)
}

async fn upsert_period(
    tx: &mut Transaction<'_, Postgres>,
    id: &MemberId,
    period: PeriodNumber,
    amount: i64,
    payment_id: Option<&str>,
    payment_date: Option<chrono::NaiveDate>,
) -> Result<(), DomainError> {
    sqlx::query(
        r#"
        INSERT INTO member_period_payments (member_id, period_number, amount, payment_id, payment_date)
        VALUES ($1, $2, $3, $4, $5)
        ON CONFLICT (member_id, period_number) DO UPDATE SET
            amount = EXCLUDED.amount,
            payment_id = EXCLUDED.payment_id,
            payment_date = EXCLUDED.payment_date
        "#,
    )
    .bind(id.as_uuid())
    .bind(period.value())
    .bind(amount)
    .bind(payment_id)
    .bind(payment_date)
    .execute(&mut **tx)
    .await
    .map_err(|e| db_error("Failed to write payment", e))?;
    Ok(())
}

#[async_trait]
impl MemberRepository for PostgresMemberRepository {
    async fn save(&self, member: &Member) -> Result<(), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_error("Failed to begin transaction", e))?;

        sqlx::query(
            r#"
            INSERT INTO members (
                id, folio_number, name, email, phone, join_date, starting_period,
                status, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(member.id.as_uuid())
        .bind(&member.folio_number)
        .bind(&member.name)
        .bind(&member.email)
        .bind(&member.phone)
        .bind(member.join_date())
        .bind(member.starting_period().map(|p| p.value()))
        .bind(member.status.as_str())
        .bind(member.created_at.as_datetime())
        .bind(member.updated_at.as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(|e| conflict_or_db_error("Failed to save member", member, e))?;

        for (period, payment) in member.payments.entries() {
            sqlx::query(
                r#"
                INSERT INTO member_period_payments (member_id, period_number, amount, payment_id, payment_date)
                VALUES ($1, $2, $3, $4, $5)
                "#,
            )
            .bind(member.id.as_uuid())
            .bind(period.value())
            .bind(payment.amount)
            .bind(&payment.payment_id)
            .bind(payment.payment_date)
            .execute(&mut *tx)
            .await
            .map_err(|e| db_error("Failed to save payments", e))?;
        }

        tx.commit()
            .await
            .map_err(|e| db_error("Failed to commit member", e))
    }

    async fn update(&self, member: &Member) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE members SET
                folio_number = $2,
                name = $3,
                email = $4,
                phone = $5,
                join_date = $6,
                starting_period = $7,
                status = $8,
                updated_at = $9
            WHERE id = $1
            "#,
        )
        .bind(member.id.as_uuid())
        .bind(&member.folio_number)
        .bind(&member.name)
        .bind(&member.email)
        .bind(&member.phone)
        .bind(member.join_date())
        .bind(member.starting_period().map(|p| p.value()))
        .bind(member.status.as_str())
        .bind(member.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| conflict_or_db_error("Failed to update member", member, e))?;

        if result.rows_affected() == 0 {
            return Err(member_not_found(&member.id));
        }

        Ok(())
    }

    async fn find_by_id(&self, id: &MemberId) -> Result<Option<Member>, DomainError> {
        self.find_one("id = $1::uuid", id.to_string()).await
    }

    async fn apply_payment(
        &self,
        id: &MemberId,
        payment: &PaymentApplication,
    ) -> Result<(), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_error("Failed to begin transaction", e))?;

        let current = lock_periods(&mut tx, id, payment.periods()).await?;
        if let Some(period) = payment.conflict_with(&current) {
            return Err(MembershipError::PeriodAlreadyPaid(period).into());
        }

        for period in payment.periods() {
            upsert_period(
                &mut tx,
                id,
                *period,
                payment.amount_per_period(),
                Some(payment.payment_id()),
                Some(payment.payment_date()),
            )
            .await?;
        }

        sqlx::query("UPDATE members SET updated_at = now() WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&mut *tx)
            .await
            .map_err(|e| db_error("Failed to touch member", e))?;

        tx.commit()
            .await
            .map_err(|e| db_error("Failed to commit payment", e))
    }

    async fn mark_exempt(
        &self,
        id: &MemberId,
        periods: &[PeriodNumber],
    ) -> Result<(), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_error("Failed to begin transaction", e))?;

        let current = lock_periods(&mut tx, id, periods).await?;
        if let Some(period) = periods.iter().copied().find(|p| current.is_paid(*p)) {
            return Err(MembershipError::PeriodAlreadyPaid(period).into());
        }

        for period in periods {
            upsert_period(&mut tx, id, *period, 0, None, None).await?;
        }

        tx.commit()
            .await
            .map_err(|e| db_error("Failed to commit exemption", e))
    }
}
