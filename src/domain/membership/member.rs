//! Member aggregate.
//!
//! A member is identified internally by [`MemberId`] and externally by a
//! unique folio number. Email is optional but required for self-service
//! verification.

use chrono::NaiveDate;

use crate::domain::foundation::{MemberId, StateMachine, Timestamp};

use super::errors::MembershipError;
use super::period::{PeriodCatalog, PeriodNumber};
use super::record::MemberPaymentRecord;
use super::status::MemberStatus;

/// Editable identity and contact details.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberDetails {
    pub folio_number: String,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub join_date: Option<NaiveDate>,
}

impl MemberDetails {
    /// Trims fields, lowercases the email, drops blank optionals and
    /// validates required fields.
    pub fn normalized(self) -> Result<Self, MembershipError> {
        let folio_number = self.folio_number.trim().to_string();
        if folio_number.is_empty() {
            return Err(MembershipError::validation(
                "folio_number",
                "folio number is required",
            ));
        }

        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err(MembershipError::validation("name", "name is required"));
        }

        let email = non_blank(self.email).map(|e| e.to_lowercase());
        if let Some(email) = &email {
            if !is_plausible_email(email) {
                return Err(MembershipError::validation(
                    "email",
                    "email address is not valid",
                ));
            }
        }

        Ok(Self {
            folio_number,
            name,
            email,
            phone: non_blank(self.phone),
            join_date: self.join_date,
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn is_plausible_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
        }
        None => false,
    }
}

/// Masks an email for display, keeping the first characters of the local
/// part and the whole domain: `jo***@example.com`.
pub fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) => {
            let visible = if local.chars().count() > 2 { 2 } else { 1 };
            let shown: String = local.chars().take(visible).collect();
            format!("{}***@{}", shown, domain)
        }
        None => "***".to_string(),
    }
}

/// A registered member and their payment record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub id: MemberId,
    pub folio_number: String,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub status: MemberStatus,
    pub payments: MemberPaymentRecord,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Member {
    /// Registers a new active member.
    ///
    /// Without an explicit starting period one is derived from the join
    /// date, falling back to the first tracked period.
    pub fn register(
        details: MemberDetails,
        starting_period: Option<PeriodNumber>,
        catalog: &PeriodCatalog,
        now: Timestamp,
    ) -> Result<Self, MembershipError> {
        let details = details.normalized()?;

        let starting_period = match starting_period {
            Some(period) => catalog.period(period.value())?,
            None => details
                .join_date
                .map(|date| catalog.starting_period_for_join_date(date))
                .unwrap_or_else(|| catalog.first()),
        };

        Ok(Self {
            id: MemberId::new(),
            folio_number: details.folio_number,
            name: details.name,
            email: details.email,
            phone: details.phone,
            status: MemberStatus::Active,
            payments: MemberPaymentRecord::new(Some(starting_period), details.join_date),
            created_at: now,
            updated_at: now,
        })
    }

    pub fn join_date(&self) -> Option<NaiveDate> {
        self.payments.join_date
    }

    pub fn starting_period(&self) -> Option<PeriodNumber> {
        self.payments.starting_period
    }

    pub fn masked_email(&self) -> Option<String> {
        self.email.as_deref().map(mask_email)
    }

    pub fn is_removed(&self) -> bool {
        self.status == MemberStatus::Removed
    }

    /// Replaces identity and contact details.
    pub fn update_details(
        &mut self,
        details: MemberDetails,
        now: Timestamp,
    ) -> Result<(), MembershipError> {
        let details = details.normalized()?;
        self.folio_number = details.folio_number;
        self.name = details.name;
        self.email = details.email;
        self.phone = details.phone;
        self.payments.join_date = details.join_date;
        self.updated_at = now;
        Ok(())
    }

    /// Moves the first period the member owes. Recorded payments stay.
    pub fn set_starting_period(&mut self, period: PeriodNumber, now: Timestamp) {
        self.payments.starting_period = Some(period);
        self.updated_at = now;
    }

    /// Moves to `target` if the lifecycle allows it.
    pub fn change_status(
        &mut self,
        target: MemberStatus,
        now: Timestamp,
    ) -> Result<(), MembershipError> {
        let from = self.status;
        self.status = from
            .transition_to(target)
            .map_err(|_| MembershipError::InvalidStatusTransition { from, to: target })?;
        self.updated_at = now;
        Ok(())
    }

    /// Case-insensitive match on folio number, or substring match on
    /// name or email.
    pub fn matches_query(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return false;
        }
        self.folio_number.to_lowercase() == query
            || self.name.to_lowercase().contains(&query)
            || self
                .email
                .as_deref()
                .is_some_and(|email| email.contains(&query))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn details() -> MemberDetails {
        MemberDetails {
            folio_number: " F-101 ".to_string(),
            name: "Asha Rao".to_string(),
            email: Some("Asha.Rao@Example.com".to_string()),
            phone: Some("  ".to_string()),
            join_date: NaiveDate::from_ymd_opt(2022, 7, 1),
        }
    }

    fn register(details: MemberDetails) -> Member {
        Member::register(details, None, &PeriodCatalog::default(), Timestamp::now()).unwrap()
    }

    #[test]
    fn register_normalizes_details() {
        let member = register(details());
        assert_eq!(member.folio_number, "F-101");
        assert_eq!(member.email.as_deref(), Some("asha.rao@example.com"));
        assert_eq!(member.phone, None);
        assert_eq!(member.status, MemberStatus::Active);
    }

    #[test]
    fn register_derives_starting_period_from_join_date() {
        let member = register(details());
        assert_eq!(member.starting_period(), Some(PeriodNumber::new(22)));
    }

    #[test]
    fn register_without_join_date_starts_at_first_period() {
        let member = register(MemberDetails {
            join_date: None,
            ..details()
        });
        assert_eq!(member.starting_period(), Some(PeriodNumber::new(21)));
    }

    #[test]
    fn register_rejects_starting_period_outside_catalog() {
        let result = Member::register(
            details(),
            Some(PeriodNumber::new(40)),
            &PeriodCatalog::default(),
            Timestamp::now(),
        );
        assert!(matches!(result, Err(MembershipError::ValidationFailed { .. })));
    }

    #[test]
    fn register_requires_folio_and_name() {
        let catalog = PeriodCatalog::default();
        let no_folio = MemberDetails {
            folio_number: "   ".to_string(),
            ..details()
        };
        let no_name = MemberDetails {
            name: String::new(),
            ..details()
        };
        assert!(Member::register(no_folio, None, &catalog, Timestamp::now()).is_err());
        assert!(Member::register(no_name, None, &catalog, Timestamp::now()).is_err());
    }

    #[test]
    fn register_rejects_malformed_email() {
        let bad = MemberDetails {
            email: Some("asha@localhost".to_string()),
            ..details()
        };
        assert!(Member::register(bad, None, &PeriodCatalog::default(), Timestamp::now()).is_err());
    }

    #[test]
    fn masks_email_for_display() {
        assert_eq!(mask_email("asha.rao@example.com"), "as***@example.com");
        assert_eq!(mask_email("ab@example.com"), "a***@example.com");
        assert_eq!(mask_email("broken"), "***");
    }

    #[test]
    fn removed_member_cannot_be_reactivated() {
        let mut member = register(details());
        member.change_status(MemberStatus::Removed, Timestamp::now()).unwrap();

        let err = member
            .change_status(MemberStatus::Active, Timestamp::now())
            .unwrap_err();

        assert_eq!(
            err,
            MembershipError::InvalidStatusTransition {
                from: MemberStatus::Removed,
                to: MemberStatus::Active,
            }
        );
        assert!(member.is_removed());
    }

    #[test]
    fn update_details_keeps_payment_history() {
        let mut member = register(details());
        let before = member.payments.starting_period;
        member
            .update_details(
                MemberDetails {
                    name: "Asha R. Rao".to_string(),
                    ..details()
                },
                Timestamp::now(),
            )
            .unwrap();
        assert_eq!(member.name, "Asha R. Rao");
        assert_eq!(member.payments.starting_period, before);
    }

    #[test]
    fn query_matches_folio_exactly_and_name_partially() {
        let member = register(details());
        assert!(member.matches_query("f-101"));
        assert!(!member.matches_query("f-10"));
        assert!(member.matches_query("rao"));
        assert!(member.matches_query("example.com"));
        assert!(!member.matches_query("  "));
    }
}
