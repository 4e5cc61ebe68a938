use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::decimal::Money;
use crate::ledger::CustomerBook;
use crate::types::{CustomerId, LedgerStatus, TransactionId};

/// whether a due date lies in the past: midnight UTC of `due_date` is before `now`
pub fn due_date_passed(due_date: NaiveDate, now: DateTime<Utc>) -> bool {
    due_date.and_time(NaiveTime::MIN).and_utc() < now
}

/// contact details, free text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub email: String,
    pub phone: String,
}

/// fields supplied by the add-customer form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCustomer {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
}

impl NewCustomer {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
        address: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            phone: phone.into(),
            address: address.into(),
        }
    }
}

/// immutable ledger entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Transaction {
    Loan {
        id: TransactionId,
        item: String,
        amount: Money,
        /// issue date
        date: NaiveDate,
        due_date: NaiveDate,
        /// status at the time of issuance
        status: LedgerStatus,
    },
    Repayment {
        id: TransactionId,
        amount: Money,
        date: NaiveDate,
    },
}

impl Transaction {
    pub fn id(&self) -> TransactionId {
        match self {
            Transaction::Loan { id, .. } | Transaction::Repayment { id, .. } => *id,
        }
    }

    pub fn amount(&self) -> Money {
        match self {
            Transaction::Loan { amount, .. } | Transaction::Repayment { amount, .. } => *amount,
        }
    }

    pub fn date(&self) -> NaiveDate {
        match self {
            Transaction::Loan { date, .. } | Transaction::Repayment { date, .. } => *date,
        }
    }

    pub fn is_loan(&self) -> bool {
        matches!(self, Transaction::Loan { .. })
    }
}

/// customer record with its ledger fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    pub contact: Contact,
    pub address: String,
    pub join_date: NaiveDate,

    /// credit granted when the customer was created
    #[serde(default)]
    pub opening_credit: Money,
    /// opening credit plus every loan ever issued, never decreases
    pub total_credit: Money,
    /// amount currently owed, negative after an accepted over-repayment
    pub balance: Money,
    /// due date of the most recently added loan
    pub due_date: Option<NaiveDate>,
    pub status: LedgerStatus,

    /// in order of entry
    pub transactions: Vec<Transaction>,
}

impl Customer {
    /// fresh customer with the given credit limit and no history
    pub fn new(id: CustomerId, fields: NewCustomer, credit_limit: Money, join_date: NaiveDate) -> Self {
        Self {
            id,
            name: fields.name,
            contact: Contact {
                email: fields.email,
                phone: fields.phone,
            },
            address: fields.address,
            join_date,
            opening_credit: credit_limit,
            total_credit: credit_limit,
            balance: Money::ZERO,
            due_date: None,
            status: LedgerStatus::UpToDate,
            transactions: Vec::new(),
        }
    }

    /// sum of loan amounts
    pub fn total_loaned(&self) -> Money {
        self.transactions
            .iter()
            .filter(|t| t.is_loan())
            .map(Transaction::amount)
            .sum()
    }

    /// sum of repayment amounts
    pub fn total_repaid(&self) -> Money {
        self.transactions
            .iter()
            .filter(|t| !t.is_loan())
            .map(Transaction::amount)
            .sum()
    }

    pub fn is_overdue(&self) -> bool {
        self.status.is_overdue()
    }

    /// whether the customer's current due date lies in the past
    pub fn due_date_passed(&self, now: DateTime<Utc>) -> bool {
        self.due_date.map(|d| due_date_passed(d, now)).unwrap_or(false)
    }

    /// ledger fields agree with the transaction history
    pub fn is_consistent(&self) -> bool {
        let loaned = self.total_loaned();
        self.total_credit == self.opening_credit + loaned
            && self.balance == loaned - self.total_repaid()
    }
}

/// snapshot of the whole book for the audit trail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookSnapshot {
    pub snapshot_id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub book: CustomerBook,
    pub trigger: String,
}

impl BookSnapshot {
    pub fn capture(book: &CustomerBook, trigger: String, timestamp: DateTime<Utc>) -> Self {
        Self {
            snapshot_id: Uuid::new_v4(),
            timestamp,
            book: book.clone(),
            trigger,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample_customer() -> Customer {
        Customer::new(
            CustomerId(1),
            NewCustomer::new("Suresh", "suresh@example.com", "+91 98765 43210", "123 Market St"),
            Money::from_major(2000),
            date(2024, 1, 15),
        )
    }

    #[test]
    fn test_new_customer() {
        let customer = sample_customer();
        assert_eq!(customer.total_credit, Money::from_major(2000));
        assert_eq!(customer.balance, Money::ZERO);
        assert_eq!(customer.due_date, None);
        assert_eq!(customer.status, LedgerStatus::UpToDate);
        assert!(customer.transactions.is_empty());
        assert!(customer.is_consistent());
    }

    #[test]
    fn test_due_date_passed() {
        let now = Utc.with_ymd_and_hms(2025, 4, 28, 9, 30, 0).unwrap();
        assert!(due_date_passed(date(2025, 4, 27), now));
        // a loan due today counts as past once the day has started
        assert!(due_date_passed(date(2025, 4, 28), now));
        assert!(!due_date_passed(date(2025, 4, 29), now));

        let midnight = Utc.with_ymd_and_hms(2025, 4, 28, 0, 0, 0).unwrap();
        assert!(!due_date_passed(date(2025, 4, 28), midnight));
    }

    #[test]
    fn test_totals_from_history() {
        let mut customer = sample_customer();
        customer.transactions.push(Transaction::Loan {
            id: TransactionId(2),
            item: "Rice (10 kg)".to_string(),
            amount: Money::from_major(300),
            date: date(2025, 4, 1),
            due_date: date(2025, 4, 28),
            status: LedgerStatus::UpToDate,
        });
        customer.transactions.push(Transaction::Repayment {
            id: TransactionId(3),
            amount: Money::from_major(100),
            date: date(2025, 4, 15),
        });

        assert_eq!(customer.total_loaned(), Money::from_major(300));
        assert_eq!(customer.total_repaid(), Money::from_major(100));
        assert!(!customer.is_consistent());

        customer.total_credit = Money::from_major(2300);
        customer.balance = Money::from_major(200);
        assert!(customer.is_consistent());
    }

    #[test]
    fn test_transaction_json_is_tagged() {
        let repayment = Transaction::Repayment {
            id: TransactionId(7),
            amount: Money::from_major(100),
            date: date(2025, 4, 15),
        };
        let json = serde_json::to_value(&repayment).unwrap();
        assert_eq!(json["type"], "repayment");
        assert_eq!(json["id"], 7);
        assert_eq!(json["date"], "2025-04-15");
    }
}
