use chrono::NaiveDate;
use hourglass_rs::{SafeTimeProvider, TimeSource};
use serde::Serialize;

use crate::config::LedgerConfig;
use crate::decimal::Money;
use crate::errors::{LedgerError, Result};
use crate::events::{Event, EventStore};
use crate::interest::{LoanProjection, LoanTerms};
use crate::ledger::statement::StatementView;
use crate::ledger::summary::{compute_summary, search_by_name, Summary};
use crate::ledger::CustomerBook;
use crate::state::{BookSnapshot, Customer, NewCustomer, Transaction};
use crate::types::CustomerId;

/// one dashboard session: the current book, the selected customer and the audit trail.
///
/// each mutation computes a new book from the current one and publishes it only on
/// success, so a failed operation leaves the session exactly as it was.
pub struct LedgerSession {
    config: LedgerConfig,
    time: SafeTimeProvider,
    book: CustomerBook,
    selected: Option<CustomerId>,
    events: EventStore,
    snapshots: Vec<BookSnapshot>,
}

impl LedgerSession {
    pub fn builder() -> LedgerSessionBuilder {
        LedgerSessionBuilder::new()
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    pub fn time(&self) -> &SafeTimeProvider {
        &self.time
    }

    pub fn book(&self) -> &CustomerBook {
        &self.book
    }

    pub fn selected_id(&self) -> Option<CustomerId> {
        self.selected
    }

    pub fn selected_customer(&self) -> Result<&Customer> {
        let id = self.selected.ok_or(LedgerError::NoCustomerSelected)?;
        self.book.select_customer(id)
    }

    /// change the selection, `CustomerNotFound` leaves it unchanged
    pub fn select(&mut self, id: CustomerId) -> Result<&Customer> {
        self.book.select_customer(id)?;
        self.selected = Some(id);
        self.events.emit(Event::CustomerSelected { customer_id: id });
        self.book.select_customer(id)
    }

    /// step to the next customer in collection order; `None` at the end leaves the selection as is
    pub fn select_next(&mut self) -> Option<&Customer> {
        let id = self.book.next_after(self.selected?)?;
        self.select(id).ok()
    }

    /// step to the previous customer; `None` at the start leaves the selection as is
    pub fn select_previous(&mut self) -> Option<&Customer> {
        let id = self.book.previous_before(self.selected?)?;
        self.select(id).ok()
    }

    pub fn has_next(&self) -> bool {
        self.selected.and_then(|id| self.book.next_after(id)).is_some()
    }

    pub fn has_previous(&self) -> bool {
        self.selected.and_then(|id| self.book.previous_before(id)).is_some()
    }

    /// add a customer and select it
    pub fn add_customer(&mut self, fields: NewCustomer) -> Result<Customer> {
        let (next, customer) = self.book.add_customer(fields, &self.config, &self.time)?;

        self.events.emit(Event::CustomerAdded {
            customer_id: customer.id,
            name: customer.name.clone(),
            credit_limit: customer.total_credit,
            timestamp: self.time.now(),
        });
        self.publish(next, format!("add customer: {}", customer.id));
        self.selected = Some(customer.id);

        Ok(customer)
    }

    /// issue a loan to the selected customer
    pub fn add_loan(&mut self, item: &str, amount: Money, due_date: NaiveDate) -> Result<&Customer> {
        let before = self.selected_customer()?.clone();
        let next = self
            .book
            .add_loan(before.id, item, amount, due_date, &self.config, &self.time)?;
        let after = next.select_customer(before.id)?;

        if let Some(Transaction::Loan { id, .. }) = after.transactions.last() {
            self.events.emit(Event::LoanIssued {
                customer_id: before.id,
                transaction_id: *id,
                item: item.to_string(),
                amount,
                due_date,
                new_balance: after.balance,
                timestamp: self.time.now(),
            });
        }
        self.emit_status_change(&before, after);
        self.publish(next, format!("loan: {} to {}", amount, before.id));

        self.book.select_customer(before.id)
    }

    /// record a repayment from the selected customer
    pub fn record_repayment(&mut self, amount: Money, date: NaiveDate) -> Result<&Customer> {
        let before = self.selected_customer()?.clone();
        let next = self
            .book
            .record_repayment(before.id, amount, date, &self.config, &self.time)?;
        let after = next.select_customer(before.id)?;

        if let Some(Transaction::Repayment { id, .. }) = after.transactions.last() {
            self.events.emit(Event::RepaymentRecorded {
                customer_id: before.id,
                transaction_id: *id,
                amount,
                date,
                new_balance: after.balance,
                timestamp: self.time.now(),
            });
        }
        if amount > before.balance {
            self.events.emit(Event::OverRepaymentAccepted {
                customer_id: before.id,
                excess: amount - before.balance.max(Money::ZERO),
                timestamp: self.time.now(),
            });
        }
        self.emit_status_change(&before, after);
        self.publish(next, format!("repayment: {} from {}", amount, before.id));

        self.book.select_customer(before.id)
    }

    fn emit_status_change(&mut self, before: &Customer, after: &Customer) {
        if before.status != after.status {
            self.events.emit(Event::StatusChanged {
                customer_id: before.id,
                old_status: before.status,
                new_status: after.status,
                timestamp: self.time.now(),
            });
        }
    }

    fn publish(&mut self, next: CustomerBook, trigger: String) {
        self.snapshots
            .push(BookSnapshot::capture(&next, trigger, self.time.now()));
        self.book = next;
    }

    pub fn summary(&self) -> Summary {
        compute_summary(&self.book)
    }

    pub fn search(&self, query: &str) -> Vec<&Customer> {
        search_by_name(&self.book, query)
    }

    /// statement of the selected customer
    pub fn statement(&self) -> Result<StatementView> {
        Ok(StatementView::from_customer(self.selected_customer()?, self.time.now()))
    }

    pub fn statement_for(&self, id: CustomerId) -> Result<StatementView> {
        Ok(StatementView::from_customer(self.book.select_customer(id)?, self.time.now()))
    }

    /// loan simulator projection using the configured compounding
    pub fn projection(&self, terms: LoanTerms) -> LoanProjection {
        LoanProjection::compute_with_frequency(terms, self.config.compounding)
    }

    pub fn events(&self) -> &[Event] {
        self.events.events()
    }

    pub fn take_events(&mut self) -> Vec<Event> {
        self.events.take_events()
    }

    pub fn snapshots(&self) -> &[BookSnapshot] {
        &self.snapshots
    }

    /// get json representation of current state
    pub fn to_json_pretty(&self) -> String {
        let view = SessionView {
            summary: self.summary(),
            selected: self.selected,
            customers: self.book.iter().collect(),
        };

        serde_json::to_string_pretty(&view).unwrap_or_else(|e| format!("JSON error: {}", e))
    }

    /// short alias for json output
    pub fn json(&self) -> String {
        self.to_json_pretty()
    }
}

/// serializable view of a session
#[derive(Debug, Serialize)]
struct SessionView<'a> {
    summary: Summary,
    selected: Option<CustomerId>,
    customers: Vec<&'a Customer>,
}

pub struct LedgerSessionBuilder {
    config: Option<LedgerConfig>,
    time: Option<SafeTimeProvider>,
    customers: Vec<Customer>,
}

impl Default for LedgerSessionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl LedgerSessionBuilder {
    pub fn new() -> Self {
        Self {
            config: None,
            time: None,
            customers: Vec::new(),
        }
    }

    pub fn config(mut self, config: LedgerConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// time source for due date checks and join dates
    pub fn time(mut self, time: SafeTimeProvider) -> Self {
        self.time = Some(time);
        self
    }

    /// customers already on the books; the first one starts selected
    pub fn customers(mut self, customers: Vec<Customer>) -> Self {
        self.customers = customers;
        self
    }

    /// Build with the given time or system time if not set
    pub fn build(self) -> Result<LedgerSession> {
        let config = self.config.unwrap_or_default();
        config.validate()?;

        let time = self
            .time
            .unwrap_or_else(|| SafeTimeProvider::new(TimeSource::System));
        let book = CustomerBook::from_customers(self.customers)?;
        let selected = book.first().map(|c| c.id);

        tracing::debug!(customers = book.len(), ?selected, "ledger session started");

        Ok(LedgerSession {
            config,
            time,
            book,
            selected,
            events: EventStore::new(),
            snapshots: Vec::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{InterestType, LedgerStatus};
    use chrono::{Duration, TimeZone, Utc};

    fn test_session(config: LedgerConfig) -> LedgerSession {
        LedgerSession::builder()
            .config(config)
            .time(SafeTimeProvider::new(TimeSource::Test(
                Utc.with_ymd_and_hms(2025, 5, 10, 12, 0, 0).unwrap(),
            )))
            .build()
            .unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn meena() -> NewCustomer {
        NewCustomer::new("Meena", "meena@example.com", "9876501234", "Old Town")
    }

    #[test]
    fn test_empty_session_has_no_selection() {
        let mut session = test_session(LedgerConfig::default());

        assert_eq!(session.selected_id(), None);
        assert_eq!(session.selected_customer().unwrap_err(), LedgerError::NoCustomerSelected);
        assert!(matches!(
            session.add_loan("Rice", Money::ONE, date(2025, 6, 1)),
            Err(LedgerError::NoCustomerSelected)
        ));
        assert!(matches!(session.select(CustomerId(1)), Err(LedgerError::CustomerNotFound { .. })));
        assert!(session.statement().is_err());
    }

    #[test]
    fn test_add_customer_selects_it() {
        let mut session = test_session(LedgerConfig::default());

        let first = session.add_customer(meena()).unwrap();
        assert_eq!(session.selected_id(), Some(first.id));

        let second = session
            .add_customer(NewCustomer::new("Ravi", "ravi@example.com", "9000011111", "Bazaar"))
            .unwrap();
        assert_eq!(session.selected_id(), Some(second.id));

        session.select(first.id).unwrap();
        assert_eq!(session.selected_customer().unwrap().name, "Meena");
        assert_eq!(session.snapshots().len(), 2);
    }

    #[test]
    fn test_loan_and_repayment_flow() {
        let mut session = test_session(LedgerConfig::default());
        session.add_customer(meena()).unwrap();

        let customer = session.add_loan("Rice", Money::from_major(300), date(2025, 6, 15)).unwrap();
        assert_eq!(customer.balance, Money::from_major(300));
        assert_eq!(customer.total_credit, Money::from_major(2300));

        let customer = session.record_repayment(Money::from_major(100), date(2025, 5, 10)).unwrap();
        assert_eq!(customer.balance, Money::from_major(200));
        assert_eq!(customer.status, LedgerStatus::Overdue);

        let summary = session.summary();
        assert_eq!(summary.total_outstanding, Money::from_major(200));
        assert_eq!(summary.total_overdue, Money::from_major(200));

        let statement = session.statement().unwrap();
        assert_eq!(statement.rows.len(), 2);
        assert_eq!(session.snapshots().len(), 3);
    }

    #[test]
    fn test_events_emitted() {
        let mut session = test_session(LedgerConfig::default());
        let customer = session.add_customer(meena()).unwrap();
        session.add_loan("Rice", Money::from_major(300), date(2025, 6, 15)).unwrap();
        session.record_repayment(Money::from_major(350), date(2025, 5, 10)).unwrap();

        let events = session.take_events();
        assert!(matches!(events[0], Event::CustomerAdded { .. }));
        assert!(matches!(events[1], Event::LoanIssued { .. }));
        assert!(matches!(events[2], Event::RepaymentRecorded { .. }));
        assert!(events.iter().any(|e| matches!(
            e,
            Event::OverRepaymentAccepted { excess, .. } if *excess == Money::from_major(50)
        )));
        assert!(!events.iter().any(|e| matches!(e, Event::StatusChanged { .. })));
        assert_eq!(session.selected_customer().unwrap().id, customer.id);
        assert!(session.events().is_empty());
    }

    #[test]
    fn test_status_change_event() {
        let mut session = test_session(LedgerConfig::default());
        session.add_customer(meena()).unwrap();
        session.add_loan("Rice", Money::from_major(300), date(2025, 6, 15)).unwrap();
        session.record_repayment(Money::from_major(100), date(2025, 5, 10)).unwrap();

        assert!(session.events().iter().any(|e| matches!(
            e,
            Event::StatusChanged {
                old_status: LedgerStatus::UpToDate,
                new_status: LedgerStatus::Overdue,
                ..
            }
        )));
    }

    #[test]
    fn test_failed_operation_leaves_session_untouched() {
        let mut session = test_session(LedgerConfig::strict());
        session.add_customer(meena()).unwrap();
        session.add_loan("Rice", Money::from_major(300), date(2025, 6, 15)).unwrap();
        let book_before = session.book().clone();
        let events_before = session.events().len();

        let err = session
            .record_repayment(Money::from_major(301), date(2025, 5, 10))
            .unwrap_err();

        assert!(matches!(err, LedgerError::OverRepayment { .. }));
        assert_eq!(session.book(), &book_before);
        assert_eq!(session.events().len(), events_before);
        assert_eq!(session.snapshots().len(), 2);
    }

    #[test]
    fn test_initial_customers_first_selected() {
        let customers = vec![
            Customer::new(CustomerId(11), meena(), Money::from_major(2000), date(2024, 3, 1)),
            Customer::new(CustomerId(10), meena(), Money::from_major(2000), date(2024, 2, 1)),
        ];
        let session = LedgerSession::builder()
            .customers(customers)
            .time(SafeTimeProvider::new(TimeSource::Test(
                Utc.with_ymd_and_hms(2025, 5, 10, 12, 0, 0).unwrap(),
            )))
            .build()
            .unwrap();

        assert_eq!(session.selected_id(), Some(CustomerId(11)));
        assert_eq!(session.statement_for(CustomerId(10)).unwrap().customer_id, CustomerId(10));
        assert!(session.statement_for(CustomerId(12)).is_err());
    }

    #[test]
    fn test_time_drives_loan_status() {
        let mut session = test_session(LedgerConfig::default());
        session.add_customer(meena()).unwrap();

        session.time().test_control().unwrap().advance(Duration::days(60));
        let customer = session.add_loan("Dal", Money::from_major(90), date(2025, 6, 15)).unwrap();

        assert_eq!(customer.status, LedgerStatus::Overdue);
    }

    #[test]
    fn test_projection_and_json() {
        let mut session = test_session(LedgerConfig::default());
        session.add_customer(meena()).unwrap();

        let projection = session.projection(LoanTerms::new(10_000.0, 5.0, 24, InterestType::Compound));
        assert_eq!(projection.series.len(), 24);

        let json = session.json();
        assert!(json.contains("\"total_customers\": 1"));
        assert!(json.contains("Meena"));
    }

    #[test]
    fn test_search() {
        let mut session = test_session(LedgerConfig::default());
        session.add_customer(meena()).unwrap();
        session
            .add_customer(NewCustomer::new("Ravi", "ravi@example.com", "9000011111", "Bazaar"))
            .unwrap();

        let found = session.search("mee");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Meena");
    }

    #[test]
    fn test_repeated_over_repayment_reports_each_excess() {
        let mut session = test_session(LedgerConfig::default());
        session.add_customer(meena()).unwrap();
        session.add_loan("Rice", Money::from_major(300), date(2025, 6, 15)).unwrap();
        session.record_repayment(Money::from_major(350), date(2025, 5, 10)).unwrap();
        session.record_repayment(Money::from_major(10), date(2025, 5, 11)).unwrap();

        let excesses: Vec<Money> = session
            .events()
            .iter()
            .filter_map(|e| match e {
                Event::OverRepaymentAccepted { excess, .. } => Some(*excess),
                _ => None,
            })
            .collect();

        assert_eq!(excesses, vec![Money::from_major(50), Money::from_major(10)]);
        assert_eq!(session.selected_customer().unwrap().balance, Money::from_major(-60));
    }

    #[test]
    fn test_step_through_customers() {
        let customers = vec![
            Customer::new(CustomerId(11), meena(), Money::from_major(2000), date(2024, 3, 1)),
            Customer::new(CustomerId(10), meena(), Money::from_major(2000), date(2024, 2, 1)),
        ];
        let mut session = LedgerSession::builder()
            .customers(customers)
            .time(SafeTimeProvider::new(TimeSource::Test(
                Utc.with_ymd_and_hms(2025, 5, 10, 12, 0, 0).unwrap(),
            )))
            .build()
            .unwrap();

        assert!(!session.has_previous());
        assert!(session.select_previous().is_none());
        assert_eq!(session.selected_id(), Some(CustomerId(11)));

        assert_eq!(session.select_next().unwrap().id, CustomerId(10));
        assert!(!session.has_next());
        assert!(session.select_next().is_none());
        assert_eq!(session.selected_id(), Some(CustomerId(10)));

        assert_eq!(session.select_previous().unwrap().id, CustomerId(11));
        assert_eq!(session.events().len(), 2);
    }

    #[test]
    fn test_step_without_selection() {
        let mut session = test_session(LedgerConfig::default());

        assert!(session.select_next().is_none());
        assert!(!session.has_next());
        assert!(!session.has_previous());
    }
}
