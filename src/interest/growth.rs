use serde::{Deserialize, Serialize};

use crate::decimal::round_currency;
use crate::types::InterestType;

/// one month of a growth projection, currency fields rounded to 2dp
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonthlyPoint {
    /// 1-based month number
    pub month: u32,
    /// 1-based year the month falls in
    pub year: u32,
    /// interest accrued in this month
    pub interest: f64,
    /// original principal, identical on every row
    pub principal: f64,
    /// running balance after this month's accrual
    pub total: f64,
}

/// month-by-month growth of a hypothetical loan.
///
/// compound: each month accrues `balance * rate / 12 / 100` on the running balance.
/// simple: each month accrues the constant `principal * rate / 100 / 12`.
/// the running balance is never rounded; only the reported values are, row by row,
/// so totals can drift from a closed-form figure by up to a cent per month.
/// a non-positive `time_months` gives an empty series.
pub fn generate_growth_series(
    principal: f64,
    annual_rate_percent: f64,
    time_months: i32,
    interest_type: InterestType,
) -> Vec<MonthlyPoint> {
    if time_months <= 0 {
        return Vec::new();
    }

    let months = time_months as u32;
    let reported_principal = round_currency(principal);
    let mut series = Vec::with_capacity(months as usize);

    match interest_type {
        InterestType::Compound => {
            let monthly_rate = annual_rate_percent / 12.0 / 100.0;
            let mut balance = principal;
            for month in 1..=months {
                let interest = balance * monthly_rate;
                balance += interest;
                series.push(MonthlyPoint {
                    month,
                    year: year_of(month),
                    interest: round_currency(interest),
                    principal: reported_principal,
                    total: round_currency(balance),
                });
            }
        }
        InterestType::Simple => {
            let monthly_interest = (principal * annual_rate_percent) / 100.0 / 12.0;
            let reported_interest = round_currency(monthly_interest);
            for month in 1..=months {
                let balance = principal + monthly_interest * month as f64;
                series.push(MonthlyPoint {
                    month,
                    year: year_of(month),
                    interest: reported_interest,
                    principal: reported_principal,
                    total: round_currency(balance),
                });
            }
        }
    }

    series
}

fn year_of(month: u32) -> u32 {
    month.div_ceil(12)
}
