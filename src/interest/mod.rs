pub mod compound;
pub mod growth;
pub mod simple;

use serde::{Deserialize, Serialize};

use crate::decimal::round_currency;
use crate::types::InterestType;

pub use compound::{
    compound_interest, compound_interest_with_periods, CompoundingEngine, CompoundingFrequency,
};
pub use growth::{generate_growth_series, MonthlyPoint};
pub use simple::{simple_interest, SimpleInterest};

/// trait for interest calculations
pub trait InterestCalculator {
    /// interest portion only, for a percentage annual rate over `time_years`
    fn interest(&self, principal: f64, annual_rate_percent: f64, time_years: f64) -> f64;

    fn interest_type(&self) -> InterestType;
}

/// calculator for an interest type, compound ones using `frequency`
pub fn calculator_for(
    interest_type: InterestType,
    frequency: CompoundingFrequency,
) -> Box<dyn InterestCalculator> {
    match interest_type {
        InterestType::Simple => Box::new(SimpleInterest),
        InterestType::Compound => Box::new(CompoundingEngine::new(frequency)),
    }
}

/// inputs of the loan simulator
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoanTerms {
    pub principal: f64,
    pub annual_rate_percent: f64,
    pub months: i32,
    pub interest_type: InterestType,
}

impl LoanTerms {
    pub fn new(principal: f64, annual_rate_percent: f64, months: i32, interest_type: InterestType) -> Self {
        Self {
            principal,
            annual_rate_percent,
            months,
            interest_type,
        }
    }

    pub fn time_years(&self) -> f64 {
        self.months as f64 / 12.0
    }
}

impl Default for LoanTerms {
    fn default() -> Self {
        Self::new(10_000.0, 5.0, 24, InterestType::Compound)
    }
}

/// principal vs interest split of the final repayment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RepaymentBreakdown {
    pub principal: f64,
    pub interest: f64,
}

/// everything the analytics view renders for one set of terms
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanProjection {
    pub terms: LoanTerms,
    /// unrounded interest over the whole term
    pub total_interest: f64,
    pub total_repayment: f64,
    /// effective annual rate in percent, equal to the nominal rate for simple interest
    pub effective_annual_rate: f64,
    pub series: Vec<MonthlyPoint>,
}

impl LoanProjection {
    /// project with monthly compounding
    pub fn compute(terms: LoanTerms) -> Self {
        Self::compute_with_frequency(terms, CompoundingFrequency::Monthly)
    }

    /// project; `frequency` applies to the compound total, the series always accrues monthly
    pub fn compute_with_frequency(terms: LoanTerms, frequency: CompoundingFrequency) -> Self {
        let calculator = calculator_for(terms.interest_type, frequency);
        let total_interest = calculator.interest(
            terms.principal,
            terms.annual_rate_percent,
            terms.time_years(),
        );
        let effective_annual_rate = match terms.interest_type {
            InterestType::Simple => terms.annual_rate_percent,
            InterestType::Compound => {
                CompoundingEngine::new(frequency).effective_annual_rate(terms.annual_rate_percent)
            }
        };
        let series = generate_growth_series(
            terms.principal,
            terms.annual_rate_percent,
            terms.months,
            terms.interest_type,
        );

        tracing::debug!(
            principal = terms.principal,
            rate = terms.annual_rate_percent,
            months = terms.months,
            ?frequency,
            total_interest,
            "loan projection computed"
        );

        Self {
            terms,
            total_interest,
            total_repayment: terms.principal + total_interest,
            effective_annual_rate,
            series,
        }
    }

    /// the two pie slices, rounded for display
    pub fn breakdown(&self) -> RepaymentBreakdown {
        RepaymentBreakdown {
            principal: round_currency(self.terms.principal),
            interest: round_currency(self.total_interest),
        }
    }
}
