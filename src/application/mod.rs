//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Following CQRS, it separates command handlers (write) from query handlers (read).

pub mod handlers;

pub use handlers::{
    // Dues
    CreatePaymentOrderCommand, CreatePaymentOrderHandler, CreatePaymentOrderResult, DuesSchedule,
    GetMembershipYearsHandler, GetMembershipYearsQuery, GetPaymentCalculationHandler,
    GetPaymentCalculationQuery, GrantExemptionCommand, GrantExemptionHandler, MembershipYears,
    PaymentCalculation, RecordOfflinePaymentCommand, RecordOfflinePaymentHandler,
    RecordOfflinePaymentResult, VerifyPaymentCommand, VerifyPaymentHandler, VerifyPaymentResult,
    // Members
    ChangeMemberStatusCommand, ChangeMemberStatusHandler, CreateMemberCommand,
    CreateMemberHandler, GetMemberHandler, ListMembersHandler, SearchMembersHandler,
    SearchMembersQuery, UpdateMemberCommand, UpdateMemberHandler,
    // Verification
    OtpService, SendOtpCommand, SendOtpHandler, SendOtpResult, VerificationError,
    VerifyOtpCommand, VerifyOtpHandler,
    // Admin
    AdminCredentials, GetCollectionReportHandler, ListDefaultersHandler, LoginAdminCommand,
    LoginAdminHandler,
};
