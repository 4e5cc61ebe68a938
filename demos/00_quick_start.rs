/// quick start - add a customer, lend, collect
use credit_ledger_rs::{parse_date, LedgerSession, Money, NewCustomer};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut session = LedgerSession::builder().build()?;

    session.add_customer(NewCustomer::new(
        "Suresh",
        "suresh@example.com",
        "+91 98765 43210",
        "123 Market St, Bhubaneswar",
    ))?;

    // rice on credit, due in a month
    session.add_loan("Rice (10 kg)", Money::from_major(300), parse_date("2099-01-31")?)?;

    // part of it comes back
    session.record_repayment(Money::from_major(100), parse_date("2099-01-10")?)?;

    println!("{}", session.json());

    Ok(())
}
