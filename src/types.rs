use serde::{Deserialize, Serialize};
use std::fmt;

/// unique identifier for a customer
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomerId(pub u64);

/// unique identifier for a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(pub u64);

impl fmt::Display for CustomerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// ledger status of a customer or of a loan at issuance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LedgerStatus {
    /// nothing owed past a due date
    #[default]
    UpToDate,
    /// outstanding amount past due
    Overdue,
}

impl LedgerStatus {
    pub fn is_overdue(&self) -> bool {
        matches!(self, LedgerStatus::Overdue)
    }

    /// display label used on statements
    pub fn label(&self) -> &'static str {
        match self {
            LedgerStatus::UpToDate => "Up-to-date",
            LedgerStatus::Overdue => "Overdue",
        }
    }
}

impl fmt::Display for LedgerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// interest model used by projections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum InterestType {
    Simple,
    #[default]
    Compound,
}

/// what happens when a repayment exceeds the outstanding balance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OverRepaymentPolicy {
    /// accept it and let the balance go negative
    #[default]
    Permissive,
    /// refuse it with `LedgerError::OverRepayment`
    Reject,
}

/// how customer status is derived after a repayment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum StatusRule {
    /// loans compare the due date with now, repayments look only at the balance sign
    #[default]
    AsRecorded,
    /// every event recomputes `balance > 0 && due date passed`
    Uniform,
}
