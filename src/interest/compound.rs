use crate::interest::InterestCalculator;
use crate::types::InterestType;

/// compounding periods per year used when none is given
pub const MONTHLY_PERIODS: u32 = 12;

/// compounding frequency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompoundingFrequency {
    Daily,
    Weekly,
    #[default]
    Monthly,
    Quarterly,
    SemiAnnual,
    Annual,
    Continuous,
}

impl CompoundingFrequency {
    /// number of compounding periods per year, `None` for continuous
    pub fn periods_per_year(&self) -> Option<u32> {
        match self {
            CompoundingFrequency::Daily => Some(365),
            CompoundingFrequency::Weekly => Some(52),
            CompoundingFrequency::Monthly => Some(MONTHLY_PERIODS),
            CompoundingFrequency::Quarterly => Some(4),
            CompoundingFrequency::SemiAnnual => Some(2),
            CompoundingFrequency::Annual => Some(1),
            CompoundingFrequency::Continuous => None,
        }
    }
}

/// compound interest with monthly compounding
pub fn compound_interest(principal: f64, annual_rate_percent: f64, time_years: f64) -> f64 {
    compound_interest_with_periods(principal, annual_rate_percent, time_years, MONTHLY_PERIODS)
}

/// compound interest portion: `p * (1 + r/(100 n))^(n t) - p`
///
/// evaluated in double precision exactly as written, with no intermediate rounding
pub fn compound_interest_with_periods(
    principal: f64,
    annual_rate_percent: f64,
    time_years: f64,
    periods_per_year: u32,
) -> f64 {
    let n = periods_per_year as f64;
    let amount = principal * (1.0 + annual_rate_percent / (100.0 * n)).powf(n * time_years);
    amount - principal
}

/// engine for compound interest calculations
#[derive(Debug, Clone, Copy, Default)]
pub struct CompoundingEngine {
    pub frequency: CompoundingFrequency,
}

impl CompoundingEngine {
    pub fn new(frequency: CompoundingFrequency) -> Self {
        Self { frequency }
    }

    /// interest portion for the engine's frequency
    pub fn calculate_compound(&self, principal: f64, annual_rate_percent: f64, time_years: f64) -> f64 {
        match self.frequency.periods_per_year() {
            Some(n) => compound_interest_with_periods(principal, annual_rate_percent, time_years, n),
            None => {
                let growth = (annual_rate_percent / 100.0 * time_years).exp();
                principal * growth - principal
            }
        }
    }

    /// future value: principal plus compounded interest
    pub fn future_value(&self, principal: f64, annual_rate_percent: f64, time_years: f64) -> f64 {
        principal + self.calculate_compound(principal, annual_rate_percent, time_years)
    }

    /// effective annual rate in percent for a nominal annual rate in percent
    pub fn effective_annual_rate(&self, annual_rate_percent: f64) -> f64 {
        self.calculate_compound(100.0, annual_rate_percent, 1.0)
    }
}

impl InterestCalculator for CompoundingEngine {
    fn interest(&self, principal: f64, annual_rate_percent: f64, time_years: f64) -> f64 {
        self.calculate_compound(principal, annual_rate_percent, time_years)
    }

    fn interest_type(&self) -> InterestType {
        InterestType::Compound
    }
}
