pub mod config;
pub mod decimal;
pub mod errors;
pub mod events;
pub mod interest;
pub mod ledger;
pub mod state;
pub mod types;

// re-export key types
pub use config::LedgerConfig;
pub use decimal::Money;
pub use errors::{LedgerError, Result};
pub use events::{Event, EventStore};
pub use interest::{
    compound_interest, compound_interest_with_periods, generate_growth_series, simple_interest,
    CompoundingEngine, CompoundingFrequency, InterestCalculator, LoanProjection, LoanTerms,
    MonthlyPoint, RepaymentBreakdown,
};
pub use ledger::{
    compute_summary, parse_date, search_by_name, CustomerBook, LedgerSession, StatementView,
    Summary,
};
pub use state::{Contact, Customer, NewCustomer, Transaction};
pub use types::{
    CustomerId, InterestType, LedgerStatus, OverRepaymentPolicy, StatusRule, TransactionId,
};

// re-export external dependencies that users will need
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use rust_decimal::Decimal;
