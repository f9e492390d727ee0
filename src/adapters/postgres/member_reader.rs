//! PostgreSQL implementation of MemberReader.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::foundation::DomainError;
use crate::domain::membership::Member;
use crate::ports::{MemberFilter, MemberPage, MemberReader, MemberSummary};

use super::member_rows::{db_error, hydrate, MemberRow, MEMBER_COLUMNS};

/// Matches folio number exactly or name/email by substring, all
/// case-insensitively. `$1` is the lowercased query.
const QUERY_PREDICATE: &str = "(lower(folio_number) = $1 \
     OR strpos(lower(name), $1) > 0 \
     OR strpos(lower(coalesce(email, '')), $1) > 0)";

/// PostgreSQL implementation of the MemberReader port.
pub struct PostgresMemberReader {
    pool: PgPool,
}

impl PostgresMemberReader {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MemberReader for PostgresMemberReader {
    async fn search(&self, query: &str, limit: u32) -> Result<Vec<MemberSummary>, DomainError> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let sql = format!(
            "SELECT {} FROM members WHERE status <> 'removed' AND {} \
             ORDER BY folio_number LIMIT $2",
            MEMBER_COLUMNS, QUERY_PREDICATE
        );
        let rows: Vec<MemberRow> = sqlx::query_as(&sql)
            .bind(&query)
            .bind(i64::from(limit))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("Failed to search members", e))?;

        // Summaries never expose payments, so skip hydration.
        rows.into_iter()
            .map(|row| row.into_member(Vec::new()).map(|m| MemberSummary::from(&m)))
            .collect()
    }

    async fn list(&self, filter: &MemberFilter) -> Result<MemberPage, DomainError> {
        let query = filter
            .query
            .as_deref()
            .map(|q| q.trim().to_lowercase())
            .filter(|q| !q.is_empty());
        let status = filter.status.map(|s| s.as_str());
        let limit = filter.limit();
        let offset = filter.offset();

        let where_clause = format!(
            "($2::text IS NULL OR status = $2) AND ($1::text IS NULL OR {})",
            QUERY_PREDICATE
        );

        let total: (i64,) = sqlx::query_as(&format!(
            "SELECT COUNT(*) FROM members WHERE {}",
            where_clause
        ))
        .bind(query.as_deref())
        .bind(status)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("Failed to count members", e))?;

        let rows: Vec<MemberRow> = sqlx::query_as(&format!(
            "SELECT {} FROM members WHERE {} ORDER BY folio_number LIMIT $3 OFFSET $4",
            MEMBER_COLUMNS, where_clause
        ))
        .bind(query.as_deref())
        .bind(status)
        .bind(i64::from(limit))
        .bind(i64::from(offset))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to list members", e))?;

        let items = rows
            .into_iter()
            .map(|row| row.into_member(Vec::new()).map(|m| MemberSummary::from(&m)))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(MemberPage {
            items,
            total: total.0.max(0) as u64,
            limit,
            offset,
        })
    }

    async fn list_for_reports(&self) -> Result<Vec<Member>, DomainError> {
        let sql = format!(
            "SELECT {} FROM members WHERE status <> 'removed' ORDER BY folio_number",
            MEMBER_COLUMNS
        );
        let rows: Vec<MemberRow> = sqlx::query_as(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("Failed to load members", e))?;

        hydrate(&self.pool, rows).await
    }
}
