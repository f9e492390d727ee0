//! Integration tests for the dues payment flow.
//!
//! Drives the application handlers over the in-memory store and the mock
//! gateway: calculate, open an order, verify the payment, then read the
//! result back through the calculation and the admin reports.

use std::sync::Arc;

use chrono::{NaiveDate, TimeZone, Utc};

use member_dues::adapters::{InMemoryMemberStore, MockPaymentGateway};
use member_dues::application::{
    CreatePaymentOrderCommand, CreatePaymentOrderHandler, DuesSchedule, GetCollectionReportHandler,
    GetPaymentCalculationHandler, GetPaymentCalculationQuery, ListDefaultersHandler,
    RecordOfflinePaymentCommand, RecordOfflinePaymentHandler, VerifyPaymentCommand,
    VerifyPaymentHandler,
};
use member_dues::domain::foundation::Timestamp;
use member_dues::domain::membership::{
    Member, MemberDetails, MembershipError, PeriodCatalog, PeriodNumber,
};
use member_dues::ports::MemberRepository;

// =============================================================================
// Test Infrastructure
// =============================================================================

/// 15 June 2025, inside period 25.
fn now() -> Timestamp {
    Timestamp::from_datetime(Utc.with_ymd_and_hms(2025, 6, 15, 10, 0, 0).unwrap())
}

struct Harness {
    store: Arc<InMemoryMemberStore>,
    gateway: MockPaymentGateway,
    schedule: DuesSchedule,
}

impl Harness {
    fn new() -> Self {
        Self {
            store: Arc::new(InMemoryMemberStore::new()),
            gateway: MockPaymentGateway::new(),
            schedule: DuesSchedule::default(),
        }
    }

    async fn register(&self, folio: &str, joined: NaiveDate) -> Member {
        let member = Member::register(
            MemberDetails {
                folio_number: folio.to_string(),
                name: format!("Member {}", folio),
                email: Some(format!("{}@example.org", folio.to_lowercase())),
                phone: None,
                join_date: Some(joined),
            },
            None,
            &PeriodCatalog::default(),
            now(),
        )
        .unwrap();
        self.store.save(&member).await.unwrap();
        member
    }

    fn calculation(&self) -> GetPaymentCalculationHandler {
        GetPaymentCalculationHandler::new(self.store.clone(), self.schedule.clone())
    }

    fn orders(&self) -> CreatePaymentOrderHandler {
        CreatePaymentOrderHandler::new(
            self.store.clone(),
            Arc::new(self.gateway.clone()),
            self.schedule.clone(),
            "INR",
        )
    }

    fn verifier(&self) -> VerifyPaymentHandler {
        VerifyPaymentHandler::new(
            self.store.clone(),
            Arc::new(self.gateway.clone()),
            self.schedule.clone(),
        )
    }

    async fn due_periods(&self, member: &Member) -> Vec<i32> {
        self.calculation()
            .handle(GetPaymentCalculationQuery {
                member_id: member.id,
                now: now(),
            })
            .await
            .unwrap()
            .assessment
            .due
            .iter()
            .map(|d| d.period.value())
            .collect()
    }

    /// Opens an order for `periods` and returns a matching verify command.
    async fn checkout(
        &self,
        member: &Member,
        periods: &[i32],
        payment_id: &str,
    ) -> VerifyPaymentCommand {
        let order = self
            .orders()
            .handle(CreatePaymentOrderCommand {
                member_id: member.id,
                periods: periods.to_vec(),
                now: now(),
            })
            .await
            .unwrap()
            .order;

        VerifyPaymentCommand {
            member_id: member.id,
            signature: self.gateway.sign(&order.id, payment_id),
            order_id: order.id,
            payment_id: payment_id.to_string(),
            periods: periods.to_vec(),
            total_amount: periods.len() as i64 * 1200,
            now: now(),
        }
    }
}

fn joined_2022() -> NaiveDate {
    NaiveDate::from_ymd_opt(2022, 5, 20).unwrap()
}

// =============================================================================
// Tests
// =============================================================================

#[tokio::test]
async fn member_pays_oldest_dues_then_the_rest() {
    let h = Harness::new();
    let member = h.register("F-100", joined_2022()).await;
    assert_eq!(h.due_periods(&member).await, vec![22, 23, 24, 25]);

    let first = h.checkout(&member, &[22, 23], "pay_first").await;
    let result = h.verifier().handle(first).await.unwrap();
    assert_eq!(result.activated_years, vec![2022, 2023]);
    assert!(!result.replayed);
    assert_eq!(h.due_periods(&member).await, vec![24, 25]);

    let second = h.checkout(&member, &[24, 25], "pay_second").await;
    h.verifier().handle(second).await.unwrap();
    assert!(h.due_periods(&member).await.is_empty());

    let stored = h.store.find_by_id(&member.id).await.unwrap().unwrap();
    let paid = stored.payments.get(PeriodNumber::new(24)).unwrap();
    assert_eq!(paid.payment_id.as_deref(), Some("pay_second"));
    assert_eq!(paid.amount, Some(1200));
}

#[tokio::test]
async fn nothing_due_blocks_new_orders() {
    let h = Harness::new();
    let member = h.register("F-101", joined_2022()).await;
    let cmd = h.checkout(&member, &[22, 23, 24, 25], "pay_all").await;
    h.verifier().handle(cmd).await.unwrap();

    let err = h
        .orders()
        .handle(CreatePaymentOrderCommand {
            member_id: member.id,
            periods: vec![26],
            now: now(),
        })
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        MembershipError::NothingDue | MembershipError::InvalidSelection { .. }
    ));
}

#[tokio::test]
async fn skipping_the_oldest_period_is_rejected() {
    let h = Harness::new();
    let member = h.register("F-102", joined_2022()).await;

    let err = h
        .orders()
        .handle(CreatePaymentOrderCommand {
            member_id: member.id,
            periods: vec![23, 24],
            now: now(),
        })
        .await
        .unwrap_err();

    assert!(matches!(err, MembershipError::InvalidSelection { .. }));
    assert!(h.gateway.orders().is_empty());
}

#[tokio::test]
async fn verifying_the_same_payment_twice_is_idempotent() {
    let h = Harness::new();
    let member = h.register("F-103", joined_2022()).await;
    let cmd = h.checkout(&member, &[22], "pay_once").await;

    let first = h.verifier().handle(cmd.clone()).await.unwrap();
    let again = h.verifier().handle(cmd).await.unwrap();

    assert!(!first.replayed);
    assert!(again.replayed);
    assert_eq!(h.due_periods(&member).await, vec![23, 24, 25]);
}

#[tokio::test]
async fn stale_checkout_loses_to_an_earlier_payment() {
    let h = Harness::new();
    let member = h.register("F-104", joined_2022()).await;

    // Two tabs open checkouts for the same period
    let tab_a = h.checkout(&member, &[22], "pay_a").await;
    let tab_b = h.checkout(&member, &[22], "pay_b").await;

    h.verifier().handle(tab_a).await.unwrap();
    let err = h.verifier().handle(tab_b).await.unwrap_err();

    assert!(matches!(
        err,
        MembershipError::InvalidSelection { .. } | MembershipError::PeriodAlreadyPaid(_)
    ));
    let stored = h.store.find_by_id(&member.id).await.unwrap().unwrap();
    assert_eq!(
        stored.payments.get(PeriodNumber::new(22)).unwrap().payment_id.as_deref(),
        Some("pay_a")
    );
}

#[tokio::test]
async fn tampered_total_is_rejected_before_writing() {
    let h = Harness::new();
    let member = h.register("F-105", joined_2022()).await;
    let mut cmd = h.checkout(&member, &[22, 23], "pay_cheap").await;
    cmd.total_amount = 1200;

    let err = h.verifier().handle(cmd).await.unwrap_err();

    assert_eq!(err, MembershipError::amount_mismatch(2400, 1200));
    assert_eq!(h.due_periods(&member).await.len(), 4);
}

#[tokio::test]
async fn one_year_checkout_cannot_claim_further_years() {
    let h = Harness::new();
    let member = h.register("F-106", joined_2022()).await;
    let mut cmd = h.checkout(&member, &[22], "pay_one").await;
    cmd.periods = vec![22, 23, 24];
    cmd.total_amount = 3600;

    let err = h.verifier().handle(cmd).await.unwrap_err();

    assert!(matches!(err, MembershipError::OrderMismatch { .. }));
    assert_eq!(h.due_periods(&member).await.len(), 4);
}

#[tokio::test]
async fn reports_reflect_checkout_and_offline_payments() {
    let h = Harness::new();
    let online = h.register("F-200", joined_2022()).await;
    let offline = h.register("F-201", joined_2022()).await;
    let behind = h.register("F-202", joined_2022()).await;

    let cmd = h.checkout(&online, &[22, 23, 24, 25], "pay_full").await;
    h.verifier().handle(cmd).await.unwrap();

    RecordOfflinePaymentHandler::new(h.store.clone(), h.schedule.clone())
        .handle(RecordOfflinePaymentCommand {
            member_id: offline.id,
            periods: vec![22, 23],
            reference: "CHQ-5531".to_string(),
            payment_date: NaiveDate::from_ymd_opt(2025, 6, 1),
            now: now(),
        })
        .await
        .unwrap();

    let report = GetCollectionReportHandler::new(h.store.clone(), h.schedule.clone())
        .handle(now())
        .await
        .unwrap();
    assert_eq!(report.member_count, 3);
    assert_eq!(report.total_collected, 6 * 1200);
    assert_eq!(report.total_outstanding, 6 * 1200);
    let p22 = report
        .periods
        .iter()
        .find(|p| p.period == PeriodNumber::new(22))
        .unwrap();
    assert_eq!((p22.paid_count, p22.due_count), (2, 1));

    let defaulters = ListDefaultersHandler::new(h.store.clone(), h.schedule.clone())
        .handle(now())
        .await
        .unwrap();
    let order: Vec<_> = defaulters.iter().map(|d| d.member_id).collect();
    assert_eq!(order, vec![behind.id, offline.id]);
    assert_eq!(defaulters[0].years_owed, 4);
}
