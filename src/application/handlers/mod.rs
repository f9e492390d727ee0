//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations through
//! ports. Each handler owns the ports it needs and takes an explicit `now`
//! wherever time matters.

pub mod auth;
pub mod dues;
pub mod members;
pub mod otp;
pub mod reports;

#[cfg(test)]
mod test_support;

pub use auth::{AdminCredentials, LoginAdminCommand, LoginAdminHandler};
pub use dues::{
    CreatePaymentOrderCommand, CreatePaymentOrderHandler, CreatePaymentOrderResult, DuesSchedule,
    GetMembershipYearsHandler, GetMembershipYearsQuery, GetPaymentCalculationHandler,
    GetPaymentCalculationQuery, GrantExemptionCommand, GrantExemptionHandler, MembershipYears,
    PaymentCalculation, RecordOfflinePaymentCommand, RecordOfflinePaymentHandler,
    RecordOfflinePaymentResult, VerifyPaymentCommand, VerifyPaymentHandler, VerifyPaymentResult,
};
pub use members::{
    ChangeMemberStatusCommand, ChangeMemberStatusHandler, CreateMemberCommand,
    CreateMemberHandler, GetMemberHandler, ListMembersHandler, SearchMembersHandler,
    SearchMembersQuery, UpdateMemberCommand, UpdateMemberHandler,
};
pub use otp::{
    OtpService, SendOtpCommand, SendOtpHandler, SendOtpResult, VerificationError,
    VerifyOtpCommand, VerifyOtpHandler,
};
pub use reports::{GetCollectionReportHandler, ListDefaultersHandler};
