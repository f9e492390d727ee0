//! HTTP DTOs for the admin endpoints.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::application::handlers::RecordOfflinePaymentResult;
use crate::domain::membership::{
    CollectionReport, Defaulter, MemberDetails, MemberStatus, MembershipError, PeriodCollection,
};
use crate::ports::{MemberFilter, MemberPage};

use super::super::dto::{MemberDto, MemberSummaryDto};

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Query string for `GET /admin/members`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListParams {
    pub status: Option<String>,
    pub q: Option<String>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl ListParams {
    pub fn into_filter(self) -> Result<MemberFilter, MembershipError> {
        let status = self
            .status
            .filter(|s| !s.trim().is_empty())
            .map(|s| s.parse::<MemberStatus>())
            .transpose()?;

        Ok(MemberFilter {
            status,
            query: self.q,
            limit: self.limit,
            offset: self.offset,
        })
    }
}

/// Body for creating or updating a member.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberRequest {
    pub folio_number: String,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub join_date: Option<NaiveDate>,
    #[serde(default)]
    pub starting_period: Option<i32>,
}

impl MemberRequest {
    pub fn details(&self) -> MemberDetails {
        MemberDetails {
            folio_number: self.folio_number.clone(),
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            join_date: self.join_date,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChangeStatusRequest {
    pub status: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfflinePaymentRequest {
    pub periods: Vec<i32>,
    /// Receipt or cheque number.
    pub reference: String,
    #[serde(default)]
    pub payment_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExemptionRequest {
    pub periods: Vec<i32>,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub success: bool,
    pub token: String,
    pub expires_at: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct MemberListResponse {
    pub success: bool,
    pub members: Vec<MemberSummaryDto>,
    pub total: u64,
    pub limit: u32,
    pub offset: u32,
}

impl From<MemberPage> for MemberListResponse {
    fn from(page: MemberPage) -> Self {
        Self {
            success: true,
            members: page.items.into_iter().map(Into::into).collect(),
            total: page.total,
            limit: page.limit,
            offset: page.offset,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MemberResponse {
    pub success: bool,
    pub member: MemberDto,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OfflinePaymentResponse {
    pub success: bool,
    pub periods: Vec<i32>,
    pub total_amount: i64,
    pub activated_years: Vec<i32>,
}

impl From<RecordOfflinePaymentResult> for OfflinePaymentResponse {
    fn from(r: RecordOfflinePaymentResult) -> Self {
        Self {
            success: true,
            periods: r.periods.iter().map(|p| p.value()).collect(),
            total_amount: r.total_amount,
            activated_years: r.activated_years,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ExemptionResponse {
    pub success: bool,
    pub periods: Vec<i32>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodCollectionDto {
    pub period_number: i32,
    pub period_label: String,
    pub paid_count: usize,
    pub exempt_count: usize,
    pub due_count: usize,
    pub collected_amount: i64,
}

impl From<&PeriodCollection> for PeriodCollectionDto {
    fn from(p: &PeriodCollection) -> Self {
        Self {
            period_number: p.period.value(),
            period_label: p.label.clone(),
            paid_count: p.paid_count,
            exempt_count: p.exempt_count,
            due_count: p.due_count,
            collected_amount: p.collected_amount,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionReportDto {
    pub current_period: i32,
    pub member_count: usize,
    pub periods: Vec<PeriodCollectionDto>,
    pub total_collected: i64,
    pub total_outstanding: i64,
}

impl From<&CollectionReport> for CollectionReportDto {
    fn from(r: &CollectionReport) -> Self {
        Self {
            current_period: r.current_period.value(),
            member_count: r.member_count,
            periods: r.periods.iter().map(Into::into).collect(),
            total_collected: r.total_collected,
            total_outstanding: r.total_outstanding,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CollectionReportResponse {
    pub success: bool,
    pub report: CollectionReportDto,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DefaulterDto {
    pub member_id: String,
    pub folio_number: String,
    pub name: String,
    pub years_owed: usize,
    pub total_due: i64,
    pub oldest_due: i32,
}

impl From<&Defaulter> for DefaulterDto {
    fn from(d: &Defaulter) -> Self {
        Self {
            member_id: d.member_id.to_string(),
            folio_number: d.folio_number.clone(),
            name: d.name.clone(),
            years_owed: d.years_owed,
            total_due: d.total_due,
            oldest_due: d.oldest_due.value(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DefaultersResponse {
    pub success: bool,
    pub defaulters: Vec<DefaulterDto>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_params_parse_status() {
        let filter = ListParams {
            status: Some("Inactive".to_string()),
            ..Default::default()
        }
        .into_filter()
        .unwrap();
        assert_eq!(filter.status, Some(MemberStatus::Inactive));
    }

    #[test]
    fn list_params_reject_unknown_status() {
        let err = ListParams {
            status: Some("lapsed".to_string()),
            ..Default::default()
        }
        .into_filter()
        .unwrap_err();
        assert!(matches!(err, MembershipError::ValidationFailed { .. }));
    }

    #[test]
    fn member_request_optional_fields_default() {
        let req: MemberRequest =
            serde_json::from_str(r#"{"folioNumber":"F-1","name":"Asha"}"#).unwrap();
        assert_eq!(req.email, None);
        assert_eq!(req.starting_period, None);
    }
}
