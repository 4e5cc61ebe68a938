/// strict policy - refuse over-repayments and derive status uniformly
use credit_ledger_rs::{LedgerConfig, LedgerError, LedgerSession, Money, NewCustomer, parse_date};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = LedgerConfig::from_json(r#"{ "over_repayment": "reject", "status_rule": "uniform" }"#)?;
    let mut session = LedgerSession::builder().config(config).build()?;

    session.add_customer(NewCustomer::new(
        "Ramesh",
        "ramesh@example.com",
        "9988776655",
        "Temple Road, Puri",
    ))?;
    session.add_loan("Wheat flour", Money::from_major(800), parse_date("2099-12-31")?)?;

    match session.record_repayment(Money::from_major(801), parse_date("2099-01-01")?) {
        Err(LedgerError::OverRepayment { balance, requested }) => {
            println!("refused: {} requested against {} owed", requested, balance);
        }
        other => println!("unexpected outcome: {:?}", other.map(|c| c.balance)),
    }

    let customer = session.record_repayment(Money::from_major(800), parse_date("2099-01-01")?)?;
    println!("paid off: balance {} status {}", customer.balance, customer.status);

    let statement = session.statement()?;
    println!("\n{}", statement.file_name());
    for line in statement.header_lines() {
        println!("  {}", line);
    }
    for row in &statement.rows {
        println!("  {:<12} {:>10} {} {}", row.item, row.amount, row.date, row.status);
    }

    Ok(())
}
