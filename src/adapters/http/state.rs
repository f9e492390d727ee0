//! Shared application state for the HTTP layer.

use std::sync::Arc;

use crate::application::handlers::{
    AdminCredentials, ChangeMemberStatusHandler, CreateMemberHandler, CreatePaymentOrderHandler,
    DuesSchedule, GetCollectionReportHandler, GetMemberHandler, GetMembershipYearsHandler,
    GetPaymentCalculationHandler, GrantExemptionHandler, ListDefaultersHandler,
    ListMembersHandler, LoginAdminHandler, OtpService, RecordOfflinePaymentHandler,
    SearchMembersHandler, SendOtpHandler, UpdateMemberHandler, VerifyOtpHandler,
    VerifyPaymentHandler,
};
use crate::domain::foundation::Timestamp;
use crate::ports::{
    EmailSender, MemberReader, MemberRepository, PaymentGateway, RateLimiter, SessionIssuer,
    SessionValidator,
};

/// Source of the current time.
pub type Clock = Arc<dyn Fn() -> Timestamp + Send + Sync>;

/// Shared application state containing all dependencies.
///
/// Cloned for each request; every dependency is Arc-wrapped.
#[derive(Clone)]
pub struct AppState {
    pub repository: Arc<dyn MemberRepository>,
    pub reader: Arc<dyn MemberReader>,
    pub gateway: Arc<dyn PaymentGateway>,
    pub email: Arc<dyn EmailSender>,
    pub otp: Arc<OtpService>,
    pub rate_limiter: Arc<dyn RateLimiter>,
    pub session_issuer: Arc<dyn SessionIssuer>,
    pub session_validator: Arc<dyn SessionValidator>,
    pub admin: AdminCredentials,
    pub schedule: DuesSchedule,
    pub currency: String,
    pub clock: Clock,
}

impl AppState {
    pub fn now(&self) -> Timestamp {
        (self.clock)()
    }

    /// Replace the wall clock, for tests pinned to a date.
    pub fn with_clock(mut self, clock: impl Fn() -> Timestamp + Send + Sync + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    // Handlers are built on demand from the shared state.

    pub fn search_members_handler(&self) -> SearchMembersHandler {
        SearchMembersHandler::new(self.reader.clone())
    }

    pub fn payment_calculation_handler(&self) -> GetPaymentCalculationHandler {
        GetPaymentCalculationHandler::new(self.repository.clone(), self.schedule.clone())
    }

    pub fn membership_years_handler(&self) -> GetMembershipYearsHandler {
        GetMembershipYearsHandler::new(self.repository.clone(), self.schedule.clone())
    }

    pub fn create_order_handler(&self) -> CreatePaymentOrderHandler {
        CreatePaymentOrderHandler::new(
            self.repository.clone(),
            self.gateway.clone(),
            self.schedule.clone(),
            self.currency.clone(),
        )
    }

    pub fn verify_payment_handler(&self) -> VerifyPaymentHandler {
        VerifyPaymentHandler::new(
            self.repository.clone(),
            self.gateway.clone(),
            self.schedule.clone(),
        )
    }

    pub fn send_otp_handler(&self) -> SendOtpHandler {
        SendOtpHandler::new(self.repository.clone(), self.otp.clone(), self.email.clone())
    }

    pub fn verify_otp_handler(&self) -> VerifyOtpHandler {
        VerifyOtpHandler::new(self.repository.clone(), self.otp.clone())
    }

    pub fn login_handler(&self) -> LoginAdminHandler {
        LoginAdminHandler::new(
            self.admin.clone(),
            self.rate_limiter.clone(),
            self.session_issuer.clone(),
        )
    }

    pub fn list_members_handler(&self) -> ListMembersHandler {
        ListMembersHandler::new(self.reader.clone())
    }

    pub fn get_member_handler(&self) -> GetMemberHandler {
        GetMemberHandler::new(self.repository.clone())
    }

    pub fn create_member_handler(&self) -> CreateMemberHandler {
        CreateMemberHandler::new(self.repository.clone(), self.schedule.clone())
    }

    pub fn update_member_handler(&self) -> UpdateMemberHandler {
        UpdateMemberHandler::new(self.repository.clone(), self.schedule.clone())
    }

    pub fn change_status_handler(&self) -> ChangeMemberStatusHandler {
        ChangeMemberStatusHandler::new(self.repository.clone())
    }

    pub fn offline_payment_handler(&self) -> RecordOfflinePaymentHandler {
        RecordOfflinePaymentHandler::new(self.repository.clone(), self.schedule.clone())
    }

    pub fn exemption_handler(&self) -> GrantExemptionHandler {
        GrantExemptionHandler::new(self.repository.clone(), self.schedule.clone())
    }

    pub fn collection_report_handler(&self) -> GetCollectionReportHandler {
        GetCollectionReportHandler::new(self.reader.clone(), self.schedule.clone())
    }

    pub fn defaulters_handler(&self) -> ListDefaultersHandler {
        ListDefaultersHandler::new(self.reader.clone(), self.schedule.clone())
    }
}
