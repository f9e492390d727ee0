//! Member status state machine.
//!
//! Active and inactive members can be toggled freely. Removal is final:
//! removed members disappear from self-service lookup and reports but
//! their payment history is kept.

use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{StateMachine, ValidationError};
use serde::{Deserialize, Serialize};

/// Lifecycle state of a member record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberStatus {
    /// Current member, liable for dues.
    #[default]
    Active,

    /// Lapsed or suspended member. Still owes past dues.
    Inactive,

    /// Soft-deleted. No way back.
    Removed,
}

impl MemberStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MemberStatus::Active => "active",
            MemberStatus::Inactive => "inactive",
            MemberStatus::Removed => "removed",
        }
    }

    /// Whether the member is visible to self-service and reports.
    pub fn is_listed(&self) -> bool {
        !matches!(self, MemberStatus::Removed)
    }
}

impl StateMachine for MemberStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use MemberStatus::*;
        matches!(
            (self, target),
            (Active, Inactive) | (Active, Removed) | (Inactive, Active) | (Inactive, Removed)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use MemberStatus::*;
        match self {
            Active => vec![Inactive, Removed],
            Inactive => vec![Active, Removed],
            Removed => vec![],
        }
    }
}

impl fmt::Display for MemberStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MemberStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "active" => Ok(MemberStatus::Active),
            "inactive" => Ok(MemberStatus::Inactive),
            "removed" => Ok(MemberStatus::Removed),
            other => Err(ValidationError::invalid_format(
                "status",
                format!("unknown member status '{}'", other),
            )),
        }
    }
}
