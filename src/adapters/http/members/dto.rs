//! HTTP DTOs for the self-service member endpoints.

use serde::{Deserialize, Serialize};

use crate::application::handlers::{MembershipYears, PaymentCalculation};
use crate::domain::membership::mask_email;
use crate::ports::MemberSummary;

use super::super::dto::{DuePeriodDto, MemberDto, PeriodStatusDto};

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
    pub limit: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendOtpRequest {
    pub member_id: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyOtpRequest {
    pub member_id: String,
    pub otp: String,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Lookup result. Never exposes the full email.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberMatchDto {
    pub id: String,
    pub name: String,
    pub folio_number: String,
    pub masked_email: Option<String>,
}

impl From<MemberSummary> for MemberMatchDto {
    fn from(s: MemberSummary) -> Self {
        Self {
            id: s.id.to_string(),
            name: s.name,
            folio_number: s.folio_number,
            masked_email: s.email.as_deref().map(mask_email),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchResponse {
    pub success: bool,
    pub members: Vec<MemberMatchDto>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationDto {
    pub member_id: String,
    pub member_name: String,
    pub starting_period: i32,
    pub current_period: i32,
    pub payment_status: Vec<PeriodStatusDto>,
    pub unpaid_periods: Vec<DuePeriodDto>,
    pub total_due: i64,
    pub years_owed: usize,
}

impl From<&PaymentCalculation> for CalculationDto {
    fn from(c: &PaymentCalculation) -> Self {
        Self {
            member_id: c.member.id.to_string(),
            member_name: c.member.name.clone(),
            starting_period: c.assessment.effective_start.value(),
            current_period: c.assessment.current_period.value(),
            payment_status: c.assessment.statuses.iter().map(Into::into).collect(),
            unpaid_periods: c.assessment.due.iter().map(Into::into).collect(),
            total_due: c.assessment.total_due(),
            years_owed: c.assessment.years_owed(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CalculationResponse {
    pub success: bool,
    pub calculation: CalculationDto,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MembershipYearsDto {
    pub member_id: String,
    pub current_year: i32,
    pub paid_years: Vec<i32>,
    pub latest_paid_year: Option<i32>,
    pub payable_years: Vec<i32>,
    pub total_amount: i64,
    pub has_gap: bool,
    pub gap_year: Option<i32>,
    pub is_first_time: bool,
    pub all_paid: bool,
}

impl From<&MembershipYears> for MembershipYearsDto {
    fn from(y: &MembershipYears) -> Self {
        let plan = &y.plan;
        Self {
            member_id: y.member.id.to_string(),
            current_year: plan.current_year,
            paid_years: plan.paid_years.clone(),
            latest_paid_year: plan.latest_paid_year,
            payable_years: plan.payable_years.clone(),
            total_amount: plan.total_amount,
            has_gap: plan.has_gap(),
            gap_year: plan.gap_year(),
            is_first_time: plan.is_first_time(),
            all_paid: plan.all_paid(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MembershipYearsResponse {
    pub success: bool,
    pub membership_years: MembershipYearsDto,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendOtpResponse {
    pub success: bool,
    /// Masked address the code went to.
    pub email: String,
    pub expires_at: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct VerifyOtpResponse {
    pub success: bool,
    pub verified: bool,
    pub member: MemberDto,
}
