/// time control - deterministic due dates with controlled time
use chrono::{Duration, NaiveDate, TimeZone, Utc};
use credit_ledger_rs::{LedgerSession, Money, NewCustomer, SafeTimeProvider, TimeSource};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== time control example ===\n");

    let time = SafeTimeProvider::new(TimeSource::Test(
        Utc.with_ymd_and_hms(2025, 4, 1, 9, 0, 0).unwrap()
    ));

    let mut session = LedgerSession::builder().time(time).build()?;
    session.add_customer(NewCustomer::new(
        "Anita Das",
        "anita@example.com",
        "9123456780",
        "Station Road, Cuttack",
    ))?;

    let due = NaiveDate::from_ymd_opt(2025, 4, 28).unwrap();
    let status = session.add_loan("Cooking oil", Money::from_major(450), due)?.status;
    println!("loan issued on {}: status {}", session.time().now().format("%Y-%m-%d"), status);

    // a month passes without any event: status stays as it was
    session.time().test_control().unwrap().advance(Duration::days(30));
    println!(
        "{}: status still {} (no new event)",
        session.time().now().format("%Y-%m-%d"),
        session.selected_customer()?.status
    );

    // the next loan is already past due
    let status = session.add_loan("Sugar", Money::from_major(60), due)?.status;
    println!("second loan on {}: status {}", session.time().now().format("%Y-%m-%d"), status);

    let summary = session.summary();
    println!("\noutstanding: {}  overdue: {}", summary.total_outstanding, summary.total_overdue);

    Ok(())
}
