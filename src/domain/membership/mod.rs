//! Membership domain module.
//!
//! Members, their per-period payment records and the dues engine that
//! decides what a member owes and how they may pay it.
//!
//! # Module Structure
//!
//! - `period` - Fiscal membership periods and the fee constant
//! - `status` - MemberStatus state machine
//! - `record` - Per-period payment fields
//! - `member` - Member aggregate
//! - `calculation` - Due-period classification
//! - `options` - Payment plans and sequential selection rules
//! - `gap` - Membership-year view with gap detection
//! - `payment` - Writing a settled payment onto a record
//! - `report` - Collection and defaulter reports

mod calculation;
mod errors;
mod gap;
mod member;
mod options;
mod payment;
mod period;
mod record;
mod report;
mod status;

pub use calculation::{
    assess, compute_unpaid_periods, DuePeriod, PaymentAssessment, PeriodState, PeriodStatus,
};
pub use errors::MembershipError;
pub use gap::{detect_gap, YearPlan, YearPlanState};
pub use member::{mask_email, Member, MemberDetails};
pub use options::{
    build_payment_options, validate_selection, PaymentOption, PaymentPlan, MAX_PARTIAL_YEARS,
};
pub use payment::PaymentApplication;
pub use period::{
    MembershipPeriod, PeriodCatalog, PeriodNumber, DEFAULT_FIRST_PERIOD, DEFAULT_LAST_PERIOD,
    FEE_PER_PERIOD,
};
pub use record::{MemberPaymentRecord, PeriodPayment};
pub use report::{collection_report, defaulters, CollectionReport, Defaulter, PeriodCollection};
pub use status::MemberStatus;
