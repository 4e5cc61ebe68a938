use crate::interest::InterestCalculator;
use crate::types::InterestType;

/// simple (non-compounding) interest: `principal * rate * time / 100`
///
/// `annual_rate_percent` is a percentage, 5.0 meaning 5% a year.
/// negative inputs are not rejected, the caller owns their sanity
pub fn simple_interest(principal: f64, annual_rate_percent: f64, time_years: f64) -> f64 {
    (principal * annual_rate_percent * time_years) / 100.0
}

/// simple interest calculator
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleInterest;

impl InterestCalculator for SimpleInterest {
    fn interest(&self, principal: f64, annual_rate_percent: f64, time_years: f64) -> f64 {
        simple_interest(principal, annual_rate_percent, time_years)
    }

    fn interest_type(&self) -> InterestType {
        InterestType::Simple
    }
}
