use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::ledger::CustomerBook;
use crate::state::Customer;

/// dashboard totals, recomputed from the whole book on every call
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Summary {
    pub total_customers: usize,
    pub total_credit_given: Money,
    pub total_outstanding: Money,
    /// outstanding balance of customers currently marked overdue
    pub total_overdue: Money,
}

pub fn compute_summary(book: &CustomerBook) -> Summary {
    book.iter().fold(Summary::default(), |mut summary, customer| {
        summary.total_customers += 1;
        summary.total_credit_given += customer.total_credit;
        summary.total_outstanding += customer.balance;
        if customer.is_overdue() {
            summary.total_overdue += customer.balance;
        }
        summary
    })
}

/// customers whose name contains `query`, ignoring case; an empty query matches everyone
pub fn search_by_name<'a>(book: &'a CustomerBook, query: &str) -> Vec<&'a Customer> {
    let needle = query.trim().to_lowercase();
    book.iter()
        .filter(|c| needle.is_empty() || c.name.to_lowercase().contains(&needle))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LedgerConfig;
    use crate::state::NewCustomer;
    use chrono::{NaiveDate, TimeZone, Utc};
    use hourglass_rs::{SafeTimeProvider, TimeSource};

    fn build_book() -> CustomerBook {
        let time = SafeTimeProvider::new(TimeSource::Test(
            Utc.with_ymd_and_hms(2025, 5, 10, 12, 0, 0).unwrap(),
        ));
        let config = LedgerConfig::default();
        let book = CustomerBook::new();

        let (book, suresh) = book
            .add_customer(
                NewCustomer::new("Suresh", "suresh@example.com", "9876543210", "Market St"),
                &config,
                &time,
            )
            .unwrap();
        let (book, anita) = book
            .add_customer(
                NewCustomer::new("Anita Das", "anita@example.com", "9123456780", "Station Rd"),
                &config,
                &time,
            )
            .unwrap();
        let (book, _) = book
            .add_customer(
                NewCustomer::new("Ramesh", "ramesh@example.com", "9988776655", "Temple Rd"),
                &config,
                &time,
            )
            .unwrap();

        // overdue: due date already past
        let book = book
            .add_loan(
                suresh.id,
                "Rice",
                Money::from_major(300),
                NaiveDate::from_ymd_opt(2025, 5, 1).unwrap(),
                &config,
                &time,
            )
            .unwrap();
        // up to date: due in the future
        book.add_loan(
            anita.id,
            "Oil",
            Money::from_major(150),
            NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            &config,
            &time,
        )
        .unwrap()
    }

    #[test]
    fn test_compute_summary() {
        let summary = compute_summary(&build_book());

        assert_eq!(summary.total_customers, 3);
        assert_eq!(summary.total_credit_given, Money::from_major(6450));
        assert_eq!(summary.total_outstanding, Money::from_major(450));
        assert_eq!(summary.total_overdue, Money::from_major(300));
    }

    #[test]
    fn test_empty_summary() {
        assert_eq!(compute_summary(&CustomerBook::new()), Summary::default());
    }

    #[test]
    fn test_search_by_name() {
        let book = build_book();

        let names = |query: &str| -> Vec<String> {
            search_by_name(&book, query).iter().map(|c| c.name.clone()).collect()
        };

        assert_eq!(names("esh"), vec!["Suresh", "Ramesh"]);
        assert_eq!(names("ANITA"), vec!["Anita Das"]);
        assert_eq!(names(""), vec!["Suresh", "Anita Das", "Ramesh"]);
        assert!(names("zzz").is_empty());
    }
}
