//! Accumulated value of each income stream, year by year

use serde::{Deserialize, Serialize};

use crate::assumptions::BenefitAssumptions;

/// Balance of each stream at the end of an age-year
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GrowthPoint {
    pub age: u32,
    pub early_balance: f64,
    pub delayed_balance: f64,
}

/// Accumulate both streams monthly, reinvested at `monthly_rate`
///
/// Each payment is credited at the start of its month and earns a full
/// month of interest. Ages before a stream's claiming age contribute nothing.
pub fn growth_series(
    early_monthly: f64,
    delayed_monthly: f64,
    monthly_rate: f64,
    ages: (u32, u32),
    benefit: &BenefitAssumptions,
) -> Vec<GrowthPoint> {
    let (from_age, to_age) = ages;
    let mut early_balance = 0.0;
    let mut delayed_balance = 0.0;
    let mut points = Vec::with_capacity(to_age.saturating_sub(from_age) as usize + 1);

    for age in from_age..=to_age {
        let early_payment = if age >= benefit.standard_age { early_monthly } else { 0.0 };
        let delayed_payment = if age >= benefit.delayed_age { delayed_monthly } else { 0.0 };

        for _ in 0..12 {
            early_balance = (early_balance + early_payment) * (1.0 + monthly_rate);
            delayed_balance = (delayed_balance + delayed_payment) * (1.0 + monthly_rate);
        }

        points.push(GrowthPoint {
            age,
            early_balance,
            delayed_balance,
        });
    }

    points
}

/// First age at which the deferred balance overtakes the early balance
pub fn crossover_age(points: &[GrowthPoint]) -> Option<u32> {
    points
        .iter()
        .find(|p| p.delayed_balance > p.early_balance)
        .map(|p| p.age)
}
