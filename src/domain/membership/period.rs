//! Membership periods.
//!
//! A period is one fiscal membership year running April 1 to March 31,
//! numbered by its starting calendar year minus 2000 (period 21 is 2021-22).
//! The set of periods a deployment tracks is a contiguous range held by
//! [`PeriodCatalog`].

use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::ValidationError;

/// Annual membership fee, in whole currency units, charged for every period.
pub const FEE_PER_PERIOD: i64 = 1200;

/// First period tracked when no configuration overrides it.
pub const DEFAULT_FIRST_PERIOD: i32 = 21;

/// Last period tracked when no configuration overrides it.
pub const DEFAULT_LAST_PERIOD: i32 = 28;

/// Calendar month on which a fiscal year begins.
const FISCAL_YEAR_START_MONTH: u32 = 4;

const PERIOD_YEAR_BASE: i32 = 2000;

/// Number identifying a fiscal membership year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PeriodNumber(i32);

impl PeriodNumber {
    pub const fn new(value: i32) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i32 {
        self.0
    }

    /// Calendar year in which this period starts.
    pub fn start_year(&self) -> i32 {
        PERIOD_YEAR_BASE + self.0
    }

    /// Period whose fiscal year starts in `year`.
    pub fn from_start_year(year: i32) -> Self {
        Self(year - PERIOD_YEAR_BASE)
    }

    /// Period containing `date` under the April–March rule.
    pub fn containing(date: NaiveDate) -> Self {
        let start_year = if date.month() >= FISCAL_YEAR_START_MONTH {
            date.year()
        } else {
            date.year() - 1
        };
        Self::from_start_year(start_year)
    }

    /// Display label such as `2021-22`.
    pub fn label(&self) -> String {
        let start = self.start_year();
        format!("{}-{:02}", start, (start + 1).rem_euclid(100))
    }

    pub fn next(&self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for PeriodNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One fiscal membership year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MembershipPeriod {
    pub number: PeriodNumber,
    pub label: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl MembershipPeriod {
    /// Builds the period for `number`, spanning April 1 to March 31.
    pub fn new(number: PeriodNumber) -> Result<Self, ValidationError> {
        let year = number.start_year();
        let start_date = NaiveDate::from_ymd_opt(year, FISCAL_YEAR_START_MONTH, 1)
            .ok_or_else(|| ValidationError::invalid_format("period", "start date out of range"))?;
        let end_date = NaiveDate::from_ymd_opt(year + 1, 3, 31)
            .ok_or_else(|| ValidationError::invalid_format("period", "end date out of range"))?;

        Ok(Self {
            number,
            label: number.label(),
            start_date,
            end_date,
        })
    }
}

/// The ordered, contiguous set of periods a deployment tracks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodCatalog {
    periods: Vec<MembershipPeriod>,
}

impl PeriodCatalog {
    /// Generates every period from `first` through `last` inclusive.
    pub fn new(first: i32, last: i32) -> Result<Self, ValidationError> {
        if first < 1 || first > 99 {
            return Err(ValidationError::out_of_range("first_period", 1, 99, first));
        }
        if last < first || last > 99 {
            return Err(ValidationError::out_of_range("last_period", first, 99, last));
        }

        let periods = (first..=last)
            .map(|n| MembershipPeriod::new(PeriodNumber::new(n)))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { periods })
    }

    pub fn first(&self) -> PeriodNumber {
        self.periods[0].number
    }

    pub fn last(&self) -> PeriodNumber {
        self.periods[self.periods.len() - 1].number
    }

    pub fn len(&self) -> usize {
        self.periods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MembershipPeriod> {
        self.periods.iter()
    }

    pub fn get(&self, number: PeriodNumber) -> Option<&MembershipPeriod> {
        let index = number.value() - self.first().value();
        if index < 0 {
            return None;
        }
        self.periods.get(index as usize)
    }

    pub fn contains(&self, number: PeriodNumber) -> bool {
        number >= self.first() && number <= self.last()
    }

    /// Validates that `value` names a tracked period.
    pub fn period(&self, value: i32) -> Result<PeriodNumber, ValidationError> {
        let number = PeriodNumber::new(value);
        if self.contains(number) {
            Ok(number)
        } else {
            Err(ValidationError::out_of_range(
                "period",
                self.first().value(),
                self.last().value(),
                value,
            ))
        }
    }

    /// Period in force on `date`. May lie outside the catalog.
    pub fn current_period(&self, date: NaiveDate) -> PeriodNumber {
        PeriodNumber::containing(date)
    }

    /// First liable period for a member who joined on `join_date`,
    /// clamped into the catalog.
    pub fn starting_period_for_join_date(&self, join_date: NaiveDate) -> PeriodNumber {
        PeriodNumber::containing(join_date).clamp(self.first(), self.last())
    }
}

impl Default for PeriodCatalog {
    fn default() -> Self {
        let periods = (DEFAULT_FIRST_PERIOD..=DEFAULT_LAST_PERIOD)
            .filter_map(|n| MembershipPeriod::new(PeriodNumber::new(n)).ok())
            .collect();
        Self { periods }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn label_spans_two_calendar_years() {
        assert_eq!(PeriodNumber::new(21).label(), "2021-22");
        assert_eq!(PeriodNumber::new(99).label(), "2099-00");
    }

    #[test]
    fn april_starts_a_new_period() {
        assert_eq!(PeriodNumber::containing(date(2025, 4, 1)), PeriodNumber::new(25));
        assert_eq!(PeriodNumber::containing(date(2025, 12, 31)), PeriodNumber::new(25));
    }

    #[test]
    fn january_to_march_belong_to_previous_period() {
        assert_eq!(PeriodNumber::containing(date(2025, 1, 15)), PeriodNumber::new(24));
        assert_eq!(PeriodNumber::containing(date(2025, 3, 31)), PeriodNumber::new(24));
    }

    #[test]
    fn period_spans_april_to_march() {
        let period = MembershipPeriod::new(PeriodNumber::new(23)).unwrap();
        assert_eq!(period.start_date, date(2023, 4, 1));
        assert_eq!(period.end_date, date(2024, 3, 31));
        assert_eq!(PeriodNumber::containing(date(2024, 2, 29)), period.number);
    }

    #[test]
    fn default_catalog_covers_21_through_28() {
        let catalog = PeriodCatalog::default();
        assert_eq!(catalog.first(), PeriodNumber::new(21));
        assert_eq!(catalog.last(), PeriodNumber::new(28));
        assert_eq!(catalog.len(), 8);
    }

    #[test]
    fn catalog_periods_are_contiguous() {
        let catalog = PeriodCatalog::new(21, 28).unwrap();
        let periods: Vec<_> = catalog.iter().collect();
        for pair in periods.windows(2) {
            assert_eq!(pair[0].number.next(), pair[1].number);
            assert_eq!(pair[0].end_date.succ_opt().unwrap(), pair[1].start_date);
        }
    }

    #[test]
    fn catalog_rejects_inverted_range() {
        assert!(PeriodCatalog::new(28, 21).is_err());
        assert!(PeriodCatalog::new(0, 5).is_err());
    }

    #[test]
    fn catalog_lookup_by_number() {
        let catalog = PeriodCatalog::default();
        assert_eq!(catalog.get(PeriodNumber::new(24)).unwrap().label, "2024-25");
        assert!(catalog.get(PeriodNumber::new(20)).is_none());
        assert!(catalog.get(PeriodNumber::new(29)).is_none());
    }

    #[test]
    fn period_validation_reports_bounds() {
        let catalog = PeriodCatalog::default();
        assert_eq!(catalog.period(22).unwrap(), PeriodNumber::new(22));
        assert_eq!(
            catalog.period(30).unwrap_err(),
            ValidationError::out_of_range("period", 21, 28, 30)
        );
    }

    #[test]
    fn join_date_is_clamped_into_catalog() {
        let catalog = PeriodCatalog::default();
        assert_eq!(
            catalog.starting_period_for_join_date(date(2015, 6, 1)),
            PeriodNumber::new(21)
        );
        assert_eq!(
            catalog.starting_period_for_join_date(date(2023, 2, 1)),
            PeriodNumber::new(22)
        );
        assert_eq!(
            catalog.starting_period_for_join_date(date(2031, 6, 1)),
            PeriodNumber::new(28)
        );
    }
}
