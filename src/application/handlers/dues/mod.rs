//! Dues handlers.
//!
//! ## Queries
//! - Payment calculation (due periods and payment options)
//! - Membership-year view with gap detection
//!
//! ## Commands
//! - Creating a checkout order for a sequential selection
//! - Verifying and applying a checkout payment
//! - Recording an offline payment (admin)
//! - Granting exemptions (admin)

mod checkout_notes;
mod create_payment_order;
mod get_membership_years;
mod get_payment_calculation;
mod grant_exemption;
mod record_offline_payment;
mod schedule;
mod verify_payment;

pub(crate) use schedule::load_member;
pub use schedule::DuesSchedule;

// Commands
pub use create_payment_order::{
    CreatePaymentOrderCommand, CreatePaymentOrderHandler, CreatePaymentOrderResult,
};
pub use grant_exemption::{GrantExemptionCommand, GrantExemptionHandler};
pub use record_offline_payment::{
    RecordOfflinePaymentCommand, RecordOfflinePaymentHandler, RecordOfflinePaymentResult,
};
pub use verify_payment::{VerifyPaymentCommand, VerifyPaymentHandler, VerifyPaymentResult};

// Queries
pub use get_membership_years::{
    GetMembershipYearsHandler, GetMembershipYearsQuery, MembershipYears,
};
pub use get_payment_calculation::{
    GetPaymentCalculationHandler, GetPaymentCalculationQuery, PaymentCalculation,
};
