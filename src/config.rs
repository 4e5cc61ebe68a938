use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::errors::{LedgerError, Result};
use crate::interest::CompoundingFrequency;
use crate::types::{OverRepaymentPolicy, StatusRule};

/// credit limit granted to every new customer
pub const DEFAULT_CREDIT_LIMIT: Money = Money::from_const(dec!(2000));

/// minimum phone length accepted for a new customer
pub const DEFAULT_MIN_PHONE_LENGTH: usize = 10;

/// ledger configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// starting `total_credit` of a new customer
    pub default_credit_limit: Money,
    pub over_repayment: OverRepaymentPolicy,
    pub status_rule: StatusRule,
    /// compounding used by loan projections
    pub compounding: CompoundingFrequency,
    pub min_phone_length: usize,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            default_credit_limit: DEFAULT_CREDIT_LIMIT,
            over_repayment: OverRepaymentPolicy::Permissive,
            status_rule: StatusRule::AsRecorded,
            compounding: CompoundingFrequency::Monthly,
            min_phone_length: DEFAULT_MIN_PHONE_LENGTH,
        }
    }
}

impl LedgerConfig {
    /// refuses over-repayments and derives status uniformly after every event
    pub fn strict() -> Self {
        Self {
            over_repayment: OverRepaymentPolicy::Reject,
            status_rule: StatusRule::Uniform,
            ..Self::default()
        }
    }

    /// load from json, missing fields fall back to defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let config: LedgerConfig =
            serde_json::from_str(json).map_err(|e| LedgerError::InvalidConfiguration {
                message: e.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        if self.default_credit_limit.is_negative() {
            return Err(LedgerError::InvalidConfiguration {
                message: format!("default credit limit {} is negative", self.default_credit_limit),
            });
        }
        if self.min_phone_length == 0 {
            return Err(LedgerError::InvalidConfiguration {
                message: "minimum phone length must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}
