//! read-only customer statement handed to the export layer
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::errors::Result;
use crate::state::{Customer, Transaction};
use crate::types::{CustomerId, LedgerStatus, TransactionId};

/// one line of the transaction history table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatementRow {
    pub transaction_id: TransactionId,
    /// loan item, or "Repayment"
    pub item: String,
    pub amount: Money,
    /// due date for loans, payment date for repayments
    pub date: NaiveDate,
    /// loan status at issuance, empty for repayments
    pub status: String,
}

impl From<&Transaction> for StatementRow {
    fn from(transaction: &Transaction) -> Self {
        match transaction {
            Transaction::Loan { id, item, amount, due_date, status, .. } => StatementRow {
                transaction_id: *id,
                item: item.clone(),
                amount: *amount,
                date: *due_date,
                status: status.label().to_string(),
            },
            Transaction::Repayment { id, amount, date } => StatementRow {
                transaction_id: *id,
                item: "Repayment".to_string(),
                amount: *amount,
                date: *date,
                status: String::new(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatementView {
    pub customer_id: CustomerId,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub join_date: NaiveDate,
    pub total_credit: Money,
    pub balance: Money,
    pub due_date: Option<NaiveDate>,
    pub status: LedgerStatus,
    pub generated_at: DateTime<Utc>,
    pub rows: Vec<StatementRow>,
}

impl StatementView {
    pub fn from_customer(customer: &Customer, generated_at: DateTime<Utc>) -> Self {
        StatementView {
            customer_id: customer.id,
            name: customer.name.clone(),
            phone: customer.contact.phone.clone(),
            email: customer.contact.email.clone(),
            address: customer.address.clone(),
            join_date: customer.join_date,
            total_credit: customer.total_credit,
            balance: customer.balance,
            due_date: customer.due_date,
            status: customer.status,
            generated_at,
            rows: customer.transactions.iter().map(StatementRow::from).collect(),
        }
    }

    /// file name the export layer saves under
    pub fn file_name(&self) -> String {
        format!("{}_.pdf", self.name)
    }

    /// header lines in display order
    pub fn header_lines(&self) -> Vec<String> {
        vec![
            format!("Phone: {}", self.phone),
            format!("Email: {}", self.email),
            format!("Address: {}", self.address),
            format!("Join Date: {}", self.join_date),
            format!("Total Credit: {}", self.total_credit),
            format!("Balance: {}", self.balance),
            format!("Status: {}", self.status),
        ]
    }

    /// convert to pretty-printed json string
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
