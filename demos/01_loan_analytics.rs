/// loan analytics - simple vs compound growth for the same terms
use credit_ledger_rs::{InterestType, LoanProjection, LoanTerms};

fn main() {
    println!("=== loan simulator ===\n");

    for interest_type in [InterestType::Simple, InterestType::Compound] {
        let projection = LoanProjection::compute(LoanTerms::new(10_000.0, 5.0, 24, interest_type));
        let breakdown = projection.breakdown();

        println!("{:?} interest", interest_type);
        println!("  principal:       {:.2}", breakdown.principal);
        println!("  total interest:  {:.2}", breakdown.interest);
        println!("  total repayment: {:.2}", projection.total_repayment);
        println!("  effective rate:  {:.3}%", projection.effective_annual_rate);

        for point in projection.series.iter().filter(|p| p.month % 6 == 0) {
            println!(
                "  month {:>3} (year {}): interest {:>8.2}  total {:>10.2}",
                point.month, point.year, point.interest, point.total
            );
        }
        println!();
    }
}
