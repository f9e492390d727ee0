//! Membership period configuration

use serde::Deserialize;

use crate::domain::membership::{
    PeriodCatalog, DEFAULT_FIRST_PERIOD, DEFAULT_LAST_PERIOD, FEE_PER_PERIOD,
};

use super::error::ValidationError;

/// Tracked period range and the fee charged per period
#[derive(Debug, Clone, Deserialize)]
pub struct PeriodsConfig {
    #[serde(default = "default_first_period")]
    pub first_period: i32,

    #[serde(default = "default_last_period")]
    pub last_period: i32,

    #[serde(default = "default_fee")]
    pub fee_per_period: i64,
}

impl PeriodsConfig {
    /// Build the period catalog for this range
    pub fn catalog(&self) -> Result<PeriodCatalog, ValidationError> {
        PeriodCatalog::new(self.first_period, self.last_period)
            .map_err(|e| ValidationError::InvalidPeriodRange(e.to_string()))
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        self.catalog()?;
        if self.fee_per_period <= 0 {
            return Err(ValidationError::InvalidFee);
        }
        Ok(())
    }
}

impl Default for PeriodsConfig {
    fn default() -> Self {
        Self {
            first_period: default_first_period(),
            last_period: default_last_period(),
            fee_per_period: default_fee(),
        }
    }
}

fn default_first_period() -> i32 {
    DEFAULT_FIRST_PERIOD
}

fn default_last_period() -> i32 {
    DEFAULT_LAST_PERIOD
}

fn default_fee() -> i64 {
    FEE_PER_PERIOD
}
