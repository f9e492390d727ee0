//! Notes attached to checkout orders.
//!
//! The create-order handler writes them; the verify handler reads them
//! back from the gateway to confirm a payment settles the member and
//! periods its order was opened for.

use std::collections::BTreeMap;

use crate::domain::foundation::MemberId;
use crate::domain::membership::PeriodNumber;

const MEMBER_ID: &str = "memberId";
const FOLIO_NUMBER: &str = "folioNumber";
const PERIODS: &str = "periods";

#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct CheckoutNotes {
    pub member_id: MemberId,
    pub periods: Vec<PeriodNumber>,
}

impl CheckoutNotes {
    pub fn to_map(&self, folio_number: &str) -> BTreeMap<String, String> {
        let periods = self
            .periods
            .iter()
            .map(|p| p.value().to_string())
            .collect::<Vec<_>>()
            .join(",");

        BTreeMap::from([
            (MEMBER_ID.to_string(), self.member_id.to_string()),
            (FOLIO_NUMBER.to_string(), folio_number.to_string()),
            (PERIODS.to_string(), periods),
        ])
    }

    /// `None` when the notes are missing or were not written by us.
    pub fn from_map(notes: &BTreeMap<String, String>) -> Option<Self> {
        let member_id = notes.get(MEMBER_ID)?.parse().ok()?;
        let periods = notes
            .get(PERIODS)?
            .split(',')
            .map(|p| p.trim().parse().map(PeriodNumber::new))
            .collect::<Result<Vec<_>, _>>()
            .ok()?;

        Some(Self { member_id, periods })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_back_what_it_writes() {
        let notes = CheckoutNotes {
            member_id: MemberId::new(),
            periods: vec![PeriodNumber::new(23), PeriodNumber::new(24)],
        };

        let map = notes.to_map("F-001");

        assert_eq!(map["periods"], "23,24");
        assert_eq!(map["folioNumber"], "F-001");
        assert_eq!(CheckoutNotes::from_map(&map), Some(notes));
    }

    #[test]
    fn foreign_notes_are_ignored() {
        let mut map = BTreeMap::new();
        assert_eq!(CheckoutNotes::from_map(&map), None);

        map.insert("memberId".to_string(), "someone".to_string());
        map.insert("periods".to_string(), "23".to_string());
        assert_eq!(CheckoutNotes::from_map(&map), None);
    }
}
