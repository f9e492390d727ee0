//! DTOs shared across route groups.
//!
//! Field names are camelCase on the wire.

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::foundation::{MemberId, Timestamp};
use crate::domain::membership::{
    DuePeriod, Member, MemberStatus, MembershipError, PeriodState, PeriodStatus,
};
use crate::ports::MemberSummary;

/// Parses a member id from a path segment or request body.
pub fn parse_member_id(raw: &str) -> Result<MemberId, MembershipError> {
    raw.trim()
        .parse()
        .map_err(|_| MembershipError::validation("memberId", "not a valid member id"))
}

pub fn rfc3339(ts: &Timestamp) -> String {
    ts.as_datetime().to_rfc3339()
}

/// One row of a member's payment status table.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodStatusDto {
    pub period_number: i32,
    pub period_label: String,
    pub status: PeriodState,
    pub amount: Option<i64>,
    pub payment_id: Option<String>,
    pub payment_date: Option<NaiveDate>,
}

impl From<&PeriodStatus> for PeriodStatusDto {
    fn from(s: &PeriodStatus) -> Self {
        Self {
            period_number: s.period.value(),
            period_label: s.label.clone(),
            status: s.state,
            amount: s.amount,
            payment_id: s.payment_id.clone(),
            payment_date: s.payment_date,
        }
    }
}

/// A period owed now.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DuePeriodDto {
    pub period_number: i32,
    pub period_label: String,
    pub amount: i64,
}

impl From<&DuePeriod> for DuePeriodDto {
    fn from(d: &DuePeriod) -> Self {
        Self {
            period_number: d.period.value(),
            period_label: d.label.clone(),
            amount: d.amount,
        }
    }
}

/// Full member record, for admins and verified members.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberDto {
    pub id: String,
    pub folio_number: String,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub join_date: Option<NaiveDate>,
    pub starting_period: Option<i32>,
    pub status: MemberStatus,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&Member> for MemberDto {
    fn from(m: &Member) -> Self {
        Self {
            id: m.id.to_string(),
            folio_number: m.folio_number.clone(),
            name: m.name.clone(),
            email: m.email.clone(),
            phone: m.phone.clone(),
            join_date: m.join_date(),
            starting_period: m.starting_period().map(|p| p.value()),
            status: m.status,
            created_at: rfc3339(&m.created_at),
            updated_at: rfc3339(&m.updated_at),
        }
    }
}

/// List row for admin listings.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberSummaryDto {
    pub id: String,
    pub folio_number: String,
    pub name: String,
    pub email: Option<String>,
    pub status: MemberStatus,
}

impl From<MemberSummary> for MemberSummaryDto {
    fn from(s: MemberSummary) -> Self {
        Self {
            id: s.id.to_string(),
            folio_number: s.folio_number,
            name: s.name,
            email: s.email,
            status: s.status,
        }
    }
}
