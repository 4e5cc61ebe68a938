use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use hourglass_rs::SafeTimeProvider;
use serde::{Deserialize, Serialize};

use crate::config::LedgerConfig;
use crate::decimal::Money;
use crate::errors::{LedgerError, Result};
use crate::ledger::validation::{validate_amount, validate_new_customer, validate_required};
use crate::state::{due_date_passed, Customer, NewCustomer, Transaction};
use crate::types::{CustomerId, LedgerStatus, OverRepaymentPolicy, StatusRule, TransactionId};

/// the session's customer collection.
///
/// ids come from one monotonic counter shared by customers and transactions.
/// iteration follows the order customers were given or added, which need not be
/// id order for seeded books. every operation reads `&self` and returns a new
/// book; the previous snapshot is never touched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(into = "BookRecord", try_from = "BookRecord")]
pub struct CustomerBook {
    customers: BTreeMap<CustomerId, Customer>,
    order: Vec<CustomerId>,
    next_id: u64,
}

/// wire form of a book; the id counter is rebuilt on load
#[derive(Debug, Serialize, Deserialize)]
struct BookRecord {
    customers: Vec<Customer>,
}

impl From<CustomerBook> for BookRecord {
    fn from(mut book: CustomerBook) -> Self {
        let customers = book
            .order
            .iter()
            .filter_map(|id| book.customers.remove(id))
            .collect();
        BookRecord { customers }
    }
}

impl TryFrom<BookRecord> for CustomerBook {
    type Error = LedgerError;

    fn try_from(record: BookRecord) -> Result<Self> {
        CustomerBook::from_customers(record.customers)
    }
}

impl CustomerBook {
    pub fn new() -> Self {
        Self {
            customers: BTreeMap::new(),
            order: Vec::new(),
            next_id: 1,
        }
    }

    /// build from existing records in the given order, rejecting duplicate ids
    pub fn from_customers(customers: impl IntoIterator<Item = Customer>) -> Result<Self> {
        let mut book = Self::new();
        for customer in customers {
            let highest = customer
                .transactions
                .iter()
                .map(|t| t.id().0)
                .chain(std::iter::once(customer.id.0))
                .max()
                .unwrap_or(customer.id.0);
            book.next_id = book.next_id.max(highest.saturating_add(1));
            book.insert(customer)?;
        }
        Ok(book)
    }

    fn insert(&mut self, customer: Customer) -> Result<()> {
        let id = customer.id;
        if self.customers.contains_key(&id) {
            return Err(LedgerError::validation("id", format!("duplicate customer id {id}")));
        }
        self.customers.insert(id, customer);
        self.order.push(id);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.customers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.customers.is_empty()
    }

    pub fn contains(&self, id: CustomerId) -> bool {
        self.customers.contains_key(&id)
    }

    /// customers in collection order
    pub fn iter(&self) -> impl Iterator<Item = &Customer> {
        self.order.iter().filter_map(move |id| self.customers.get(id))
    }

    pub fn first(&self) -> Option<&Customer> {
        self.iter().next()
    }

    /// customer after `id` in collection order, `None` at the end
    pub fn next_after(&self, id: CustomerId) -> Option<CustomerId> {
        let position = self.position(id)?;
        self.order.get(position + 1).copied()
    }

    /// customer before `id` in collection order, `None` at the start
    pub fn previous_before(&self, id: CustomerId) -> Option<CustomerId> {
        let position = self.position(id)?;
        position.checked_sub(1).and_then(|p| self.order.get(p)).copied()
    }

    fn position(&self, id: CustomerId) -> Option<usize> {
        self.order.iter().position(|&c| c == id)
    }

    /// look up a customer, `CustomerNotFound` when absent
    pub fn select_customer(&self, id: CustomerId) -> Result<&Customer> {
        self.customers
            .get(&id)
            .ok_or(LedgerError::CustomerNotFound { id })
    }

    fn allocate_id(&mut self) -> u64 {
        let id = self.next_id.max(1);
        self.next_id = id + 1;
        id
    }

    /// new book with one customer replaced by the result of `update`
    fn with_customer<F>(&self, id: CustomerId, update: F) -> Result<CustomerBook>
    where
        F: FnOnce(&mut Customer, TransactionId) -> Result<()>,
    {
        if !self.contains(id) {
            return Err(LedgerError::CustomerNotFound { id });
        }

        let mut next = self.clone();
        let transaction_id = TransactionId(next.allocate_id());
        let customer = next
            .customers
            .get_mut(&id)
            .ok_or(LedgerError::CustomerNotFound { id })?;
        update(customer, transaction_id)?;
        Ok(next)
    }

    /// add a customer with the configured credit limit and select it
    pub fn add_customer(
        &self,
        fields: NewCustomer,
        config: &LedgerConfig,
        time_provider: &SafeTimeProvider,
    ) -> Result<(CustomerBook, Customer)> {
        validate_new_customer(&fields, config.min_phone_length)?;

        let mut next = self.clone();
        let id = CustomerId(next.allocate_id());
        let join_date = time_provider.now().date_naive();
        let customer = Customer::new(id, fields, config.default_credit_limit, join_date);
        next.insert(customer.clone())?;

        tracing::info!(customer_id = %id, name = %customer.name, "customer added");
        Ok((next, customer))
    }

    /// issue a loan to one customer
    pub fn add_loan(
        &self,
        id: CustomerId,
        item: &str,
        amount: Money,
        due_date: NaiveDate,
        config: &LedgerConfig,
        time_provider: &SafeTimeProvider,
    ) -> Result<CustomerBook> {
        validate_required("item", item)?;
        validate_amount(amount)?;

        let now = time_provider.now();
        let loan_status = if due_date_passed(due_date, now) {
            LedgerStatus::Overdue
        } else {
            LedgerStatus::UpToDate
        };

        let next = self.with_customer(id, |customer, transaction_id| {
            customer.transactions.push(Transaction::Loan {
                id: transaction_id,
                item: item.to_string(),
                amount,
                date: now.date_naive(),
                due_date,
                status: loan_status,
            });
            customer.total_credit += amount;
            customer.balance += amount;
            customer.due_date = Some(due_date);
            customer.status = match config.status_rule {
                StatusRule::AsRecorded => loan_status,
                StatusRule::Uniform => uniform_status(customer, now),
            };
            Ok(())
        })?;

        tracing::info!(customer_id = %id, %amount, %due_date, ?loan_status, "loan issued");
        Ok(next)
    }

    /// record a repayment from one customer
    pub fn record_repayment(
        &self,
        id: CustomerId,
        amount: Money,
        date: NaiveDate,
        config: &LedgerConfig,
        time_provider: &SafeTimeProvider,
    ) -> Result<CustomerBook> {
        validate_amount(amount)?;

        let now = time_provider.now();
        let next = self.with_customer(id, |customer, transaction_id| {
            if amount > customer.balance {
                match config.over_repayment {
                    OverRepaymentPolicy::Reject => {
                        return Err(LedgerError::OverRepayment {
                            balance: customer.balance,
                            requested: amount,
                        });
                    }
                    OverRepaymentPolicy::Permissive => {
                        tracing::warn!(
                            customer_id = %id,
                            balance = %customer.balance,
                            %amount,
                            "repayment exceeds outstanding balance"
                        );
                    }
                }
            }

            customer.transactions.push(Transaction::Repayment {
                id: transaction_id,
                amount,
                date,
            });
            customer.balance -= amount;
            customer.status = match config.status_rule {
                StatusRule::AsRecorded if customer.balance.is_positive() => LedgerStatus::Overdue,
                StatusRule::AsRecorded => LedgerStatus::UpToDate,
                StatusRule::Uniform => uniform_status(customer, now),
            };
            Ok(())
        })?;

        tracing::info!(customer_id = %id, %amount, %date, "repayment recorded");
        Ok(next)
    }
}

/// overdue only while something is owed past the customer's due date
fn uniform_status(customer: &Customer, now: DateTime<Utc>) -> LedgerStatus {
    if customer.balance.is_positive() && customer.due_date_passed(now) {
        LedgerStatus::Overdue
    } else {
        LedgerStatus::UpToDate
    }
}
