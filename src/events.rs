use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::types::{CustomerId, LedgerStatus, TransactionId};

/// all events that can be emitted by the ledger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    CustomerAdded {
        customer_id: CustomerId,
        name: String,
        credit_limit: Money,
        timestamp: DateTime<Utc>,
    },
    CustomerSelected {
        customer_id: CustomerId,
    },

    // ledger events
    LoanIssued {
        customer_id: CustomerId,
        transaction_id: TransactionId,
        item: String,
        amount: Money,
        due_date: NaiveDate,
        new_balance: Money,
        timestamp: DateTime<Utc>,
    },
    RepaymentRecorded {
        customer_id: CustomerId,
        transaction_id: TransactionId,
        amount: Money,
        date: NaiveDate,
        new_balance: Money,
        timestamp: DateTime<Utc>,
    },
    /// accepted under the permissive policy, balance is now negative
    OverRepaymentAccepted {
        customer_id: CustomerId,
        /// part of this repayment beyond what was owed
        excess: Money,
        timestamp: DateTime<Utc>,
    },

    StatusChanged {
        customer_id: CustomerId,
        old_status: LedgerStatus,
        new_status: LedgerStatus,
        timestamp: DateTime<Utc>,
    },
}

/// event store for collecting events during operations
#[derive(Debug, Default)]
pub struct EventStore {
    events: Vec<Event>,
}

impl EventStore {
    pub fn new() -> Self {
        Self {
            events: Vec::new(),
        }
    }

    pub fn emit(&mut self, event: Event) {
        self.events.push(event);
    }

    pub fn take_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}
